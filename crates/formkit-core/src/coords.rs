//! Conversion between pixel space and PDF page space.
//!
//! Region definitions are authored against a rendered page image
//! (top-left origin, y down). Annotations live in page space
//! (bottom-left origin, y up). [`CoordinateTransform`] maps the former
//! onto the latter.

use crate::error::FormError;
use crate::geometry::{BBox, PageRect, Size};

/// Maps rectangles from an image of a page onto the page itself.
///
/// The two axes are scaled independently; no aspect-ratio correction is
/// applied, so the caller must pair an image with the page it was rendered
/// from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransform {
    scale_x: f64,
    scale_y: f64,
    page_height: f64,
}

impl CoordinateTransform {
    /// Build a transform from an image size and the page size it depicts.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidDimensions`] if either image dimension is
    /// not a positive finite number.
    pub fn new(image: Size, page: Size) -> Result<Self, FormError> {
        if !(image.width.is_finite() && image.width > 0.0)
            || !(image.height.is_finite() && image.height > 0.0)
        {
            return Err(FormError::InvalidDimensions(format!(
                "image size must be positive, got {}x{}",
                image.width, image.height
            )));
        }
        Ok(Self {
            scale_x: page.width / image.width,
            scale_y: page.height / image.height,
            page_height: page.height,
        })
    }

    pub fn scale_x(&self) -> f64 {
        self.scale_x
    }

    pub fn scale_y(&self) -> f64 {
        self.scale_y
    }

    /// Convert a pixel-space box into a page-space rectangle.
    ///
    /// The result is `[left, bottom, right, top]`, i.e. a normalized `/Rect`.
    pub fn to_page(&self, bbox: &BBox) -> PageRect {
        let left = bbox.x0 * self.scale_x;
        let right = bbox.x1 * self.scale_x;
        let top = self.page_height - bbox.top * self.scale_y;
        let bottom = self.page_height - bbox.bottom * self.scale_y;
        PageRect::new(left, bottom, right, top)
    }
}
