//! Vote distribution pie chart.

use std::io::Cursor;

use base64::{engine::general_purpose, Engine as _};
use image::{ImageFormat, RgbImage};
use legiscan_core::types::{VoteCategory, VoteTally};
use plotters::element::Pie;
use plotters::prelude::*;

use crate::error::ChartError;
use crate::font::{self, FAMILY};

const DATA_URI_PREFIX: &str = "data:image/png;base64,";

fn slice_color(category: VoteCategory) -> RGBColor {
    match category {
        VoteCategory::Yes => RGBColor(46, 139, 87),
        VoteCategory::No => RGBColor(205, 55, 55),
        VoteCategory::NotVoting => RGBColor(150, 150, 150),
    }
}

/// Render `tally` as a square pie chart of `size` pixels with percentage
/// labels, returned as a `data:image/png;base64,...` URI.
///
/// Categories with a zero count get no slice. Nothing is written to disk.
pub fn render_vote_pie(tally: &VoteTally, size: u32) -> Result<String, ChartError> {
    if tally.is_empty() {
        return Err(ChartError::EmptyData("vote tally is empty"));
    }
    if tally.total() == 0 {
        return Err(ChartError::EmptyData("vote tally sums to zero"));
    }
    font::ensure_registered()?;

    let png = render_png(tally, size.max(100))?;
    tracing::debug!(bytes = png.len(), "Vote pie chart rendered");
    Ok(format!(
        "{}{}",
        DATA_URI_PREFIX,
        general_purpose::STANDARD.encode(png)
    ))
}

fn render_png(tally: &VoteTally, size: u32) -> Result<Vec<u8>, ChartError> {
    let (mut sizes, mut colors, mut labels) = (Vec::new(), Vec::new(), Vec::new());
    for (category, count) in tally.iter() {
        if count == 0 {
            continue;
        }
        sizes.push(count as f64);
        colors.push(slice_color(category));
        labels.push(category.label());
    }

    let mut buffer = vec![0u8; (size as usize) * (size as usize) * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (size, size)).into_drawing_area();
        root.fill(&WHITE).map_err(ChartError::render)?;
        let area = root
            .titled("Vote Distribution", (FAMILY, size as f64 * 0.05).into_font())
            .map_err(ChartError::render)?;

        let (width, height) = area.dim_in_pixel();
        let center = (width as i32 / 2, height as i32 / 2);
        let radius = width.min(height) as f64 * 0.35;

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(90.0);
        pie.label_style((FAMILY, radius * 0.1).into_font().color(&BLACK));
        pie.percentages((FAMILY, radius * 0.09).into_font().color(&WHITE));
        area.draw(&pie).map_err(ChartError::render)?;
        root.present().map_err(ChartError::render)?;
    }

    encode_png(buffer, size, size)
}

fn encode_png(rgb: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>, ChartError> {
    let image = RgbImage::from_raw(width, height, rgb)
        .ok_or_else(|| ChartError::Encode("pixel buffer does not match image size".into()))?;
    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| ChartError::Encode(e.to_string()))?;
    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn decode(uri: &str) -> Vec<u8> {
        let payload = uri.strip_prefix(DATA_URI_PREFIX).unwrap();
        general_purpose::STANDARD.decode(payload).unwrap()
    }

    #[test]
    fn test_renders_png_data_uri() {
        let tally: VoteTally = [(VoteCategory::Yes, 220), (VoteCategory::No, 210)]
            .into_iter()
            .collect();
        let uri = render_vote_pie(&tally, 400).unwrap();

        assert!(uri.starts_with("data:image/png;base64,"));
        let png = decode(&uri);
        assert!(png.starts_with(PNG_MAGIC));

        let decoded = image::load_from_memory_with_format(&png, ImageFormat::Png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (400, 400));
    }

    #[test]
    fn test_single_category_renders() {
        let tally: VoteTally = [(VoteCategory::NotVoting, 3)].into_iter().collect();
        assert!(render_vote_pie(&tally, 200).is_ok());
    }

    #[test]
    fn test_zero_count_category_is_skipped() {
        let tally: VoteTally = [
            (VoteCategory::Yes, 10),
            (VoteCategory::No, 0),
            (VoteCategory::NotVoting, 2),
        ]
        .into_iter()
        .collect();
        assert!(render_vote_pie(&tally, 200).is_ok());
    }

    #[test]
    fn test_empty_tally_is_rejected() {
        let err = render_vote_pie(&VoteTally::new(), 400).unwrap_err();
        assert!(matches!(err, ChartError::EmptyData(_)));
    }

    #[test]
    fn test_all_zero_tally_is_rejected() {
        let tally: VoteTally = [(VoteCategory::Yes, 0), (VoteCategory::No, 0)]
            .into_iter()
            .collect();
        assert!(matches!(
            render_vote_pie(&tally, 400),
            Err(ChartError::EmptyData(_))
        ));
    }

    #[test]
    fn test_encode_png_rejects_short_buffer() {
        let err = encode_png(vec![0u8; 10], 4, 4).unwrap_err();
        assert!(matches!(err, ChartError::Encode(_)));
    }
}
