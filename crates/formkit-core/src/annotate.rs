//! Text overlay planning for documents without interactive fields.
//!
//! Each region definition with entry text becomes one [`TextAnnotation`]
//! placed over the entry box, converted from image pixels to page space.

use crate::coords::CoordinateTransform;
use crate::error::FormError;
use crate::geometry::{PageRect, Size};
use crate::regions::RegionBatch;

/// Font used when a definition names none.
pub const DEFAULT_FONT: &str = "Arial";
/// Font size used when a definition gives none.
pub const DEFAULT_FONT_SIZE: f64 = 14.0;
/// Text colour used when a definition gives none.
pub const DEFAULT_FONT_COLOR: &str = "000000";

/// A free-text annotation ready to be added to a page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextAnnotation {
    /// 1-based page number.
    pub page: usize,
    /// Normalized `[left, bottom, right, top]` rectangle in page space.
    pub rect: PageRect,
    pub text: String,
    pub font: String,
    pub font_size: f64,
    /// Hex RGB colour such as `"1f2937"`.
    pub font_color: String,
}

impl TextAnnotation {
    /// Colour components in `0.0..=1.0`; malformed colours fall back to black.
    pub fn rgb(&self) -> [f64; 3] {
        parse_hex_color(&self.font_color).unwrap_or([0.0, 0.0, 0.0])
    }
}

fn parse_hex_color(hex: &str) -> Option<[f64; 3]> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .ok()
            .map(|v| f64::from(v) / 255.0)
    };
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// Build the annotations for a region batch.
///
/// `page_size` returns the size of a 1-based page, or `None` if the document
/// has no such page. Definitions without entry text, or with empty text, are
/// skipped before any page lookup.
///
/// # Errors
///
/// Returns [`FormError::InvalidInput`] when the batch lacks image dimensions
/// for a page that carries text, [`FormError::PageOutOfRange`] when the page
/// does not exist, and [`FormError::InvalidDimensions`] for unusable image
/// sizes.
pub fn plan_text_annotations<F>(
    batch: &RegionBatch,
    page_count: usize,
    page_size: F,
) -> Result<Vec<TextAnnotation>, FormError>
where
    F: Fn(usize) -> Option<Size>,
{
    let mut annotations = Vec::new();

    for field in &batch.form_fields {
        let Some(entry_text) = field.entry_text.as_ref() else {
            continue;
        };
        let text = match entry_text.text.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => continue,
        };

        let page = field.page_number;
        let image = batch.page_image(page).ok_or_else(|| {
            FormError::InvalidInput(format!("no image dimensions given for page {page}"))
        })?;
        let page_size = page_size(page).ok_or(FormError::PageOutOfRange { page, page_count })?;
        let transform =
            CoordinateTransform::new(Size::new(image.image_width, image.image_height), page_size)?;

        annotations.push(TextAnnotation {
            page,
            rect: transform.to_page(&field.entry_bounding_box),
            text: text.to_string(),
            font: entry_text
                .font
                .clone()
                .unwrap_or_else(|| DEFAULT_FONT.to_string()),
            font_size: entry_text.font_size.unwrap_or(DEFAULT_FONT_SIZE),
            font_color: entry_text
                .font_color
                .clone()
                .unwrap_or_else(|| DEFAULT_FONT_COLOR.to_string()),
        });
    }

    Ok(annotations)
}
