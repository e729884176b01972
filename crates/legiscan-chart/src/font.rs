//! Embedded font registration.
//!
//! Text is rasterized from a bundled TrueType face so rendering never
//! depends on fonts installed on the host.

use std::sync::OnceLock;

use plotters::style::{register_font, FontStyle};

use crate::error::ChartError;

/// Family name every chart uses for text.
pub(crate) const FAMILY: &str = "sans-serif";

static DEJAVU_SANS: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

static REGISTERED: OnceLock<Result<(), String>> = OnceLock::new();

/// Register the bundled face under [`FAMILY`]. Safe to call repeatedly.
pub(crate) fn ensure_registered() -> Result<(), ChartError> {
    REGISTERED
        .get_or_init(|| {
            register_font(FAMILY, FontStyle::Normal, DEJAVU_SANS)
                .map_err(|_| "bundled DejaVuSans.ttf is not a valid font".to_string())
        })
        .clone()
        .map_err(ChartError::Font)
}
