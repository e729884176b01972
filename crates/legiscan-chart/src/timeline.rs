//! Bill timeline chart.
//!
//! Each action is a point in time, so it is drawn as a zero-width bar: a
//! marker on the row for that action at its date.

use std::path::Path;

use chrono::{Datelike, NaiveDate};
use legiscan_core::types::TimelineEvent;
use plotters::prelude::*;

use crate::error::ChartError;
use crate::font::{self, FAMILY};

const MARKER: RGBColor = RGBColor(31, 119, 180);

/// Render `events` to a PNG at `path`, replacing any earlier render.
///
/// Events are plotted top to bottom in the order given. Parent directories
/// are created when missing.
pub fn render_timeline(
    events: &[TimelineEvent],
    path: &Path,
    width: u32,
    height: u32,
) -> Result<(), ChartError> {
    let (first, last) = match date_span(events) {
        Some(span) => span,
        None => return Err(ChartError::EmptyData("timeline has no events")),
    };
    font::ensure_registered()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let rows = events.len() as i32;
    let row_of = |index: usize| rows - 1 - index as i32;
    let x_range = first.num_days_from_ce() - 1..last.num_days_from_ce() + 1;

    let root = BitMapBackend::new(path, (width.max(200), height.max(100))).into_drawing_area();
    root.fill(&WHITE).map_err(ChartError::render)?;

    let label_width = events
        .iter()
        .map(|e| e.event.chars().count() as u32)
        .max()
        .unwrap_or(0)
        .clamp(8, 40)
        * 8;

    let mut chart = ChartBuilder::on(&root)
        .caption("Bill Timeline", (FAMILY, 24.0).into_font())
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(label_width)
        .build_cartesian_2d(x_range, -1..rows)
        .map_err(ChartError::render)?;

    let event_label = |row: &i32| {
        usize::try_from(rows - 1 - *row)
            .ok()
            .and_then(|i| events.get(i))
            .map(|e| e.event.clone())
            .unwrap_or_default()
    };

    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_labels(6)
        .y_labels(events.len() + 2)
        .x_label_formatter(&|days| format_day(*days))
        .y_label_formatter(&event_label)
        .x_desc("Date")
        .label_style((FAMILY, 13.0).into_font())
        .draw()
        .map_err(ChartError::render)?;

    chart
        .draw_series(events.iter().enumerate().map(|(i, e)| {
            let x = e.start().num_days_from_ce();
            let y = row_of(i);
            Rectangle::new([(x, y), (e.end().num_days_from_ce(), y)], MARKER.stroke_width(6))
        }))
        .map_err(ChartError::render)?;
    chart
        .draw_series(
            events
                .iter()
                .enumerate()
                .map(|(i, e)| Circle::new((e.date.num_days_from_ce(), row_of(i)), 6, MARKER.filled())),
        )
        .map_err(ChartError::render)?;

    root.present().map_err(ChartError::render)?;
    tracing::debug!(path = %path.display(), events = events.len(), "Timeline chart written");
    Ok(())
}

fn date_span(events: &[TimelineEvent]) -> Option<(NaiveDate, NaiveDate)> {
    let first = events.iter().map(|e| e.date).min()?;
    let last = events.iter().map(|e| e.date).max()?;
    Some((first, last))
}

fn format_day(days_from_ce: i32) -> String {
    NaiveDate::from_num_days_from_ce_opt(days_from_ce)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
