use std::fmt;

/// Bounding box in pixel space (top-left origin, y grows downward).
///
/// Coordinates follow the `[left, top, right, bottom]` convention used by
/// rendered page images:
/// - `x0`: left edge
/// - `top`: top edge (distance from top of image)
/// - `x1`: right edge
/// - `bottom`: bottom edge (distance from top of image)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "[f64; 4]", into = "[f64; 4]")
)]
pub struct BBox {
    pub x0: f64,
    pub top: f64,
    pub x1: f64,
    pub bottom: f64,
}

impl BBox {
    pub fn new(x0: f64, top: f64, x1: f64, bottom: f64) -> Self {
        Self {
            x0,
            top,
            x1,
            bottom,
        }
    }

    /// Width of the bounding box.
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Height of the bounding box.
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Returns `true` if the two boxes share interior area.
    ///
    /// Boxes that only touch along an edge or at a corner do not overlap.
    pub fn overlaps(&self, other: &BBox) -> bool {
        let separated_horizontally = self.x0 >= other.x1 || self.x1 <= other.x0;
        let separated_vertically = self.top >= other.bottom || self.bottom <= other.top;
        !(separated_horizontally || separated_vertically)
    }
}

impl From<[f64; 4]> for BBox {
    fn from(v: [f64; 4]) -> Self {
        BBox::new(v[0], v[1], v[2], v[3])
    }
}

impl From<BBox> for [f64; 4] {
    fn from(b: BBox) -> Self {
        [b.x0, b.top, b.x1, b.bottom]
    }
}

impl fmt::Display for BBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}, {}]", self.x0, self.top, self.x1, self.bottom)
    }
}

/// Rectangle in PDF page space (bottom-left origin, y grows upward).
///
/// Stored exactly as the `/Rect` array `[x0 y0 x1 y1]` reads, which is not
/// guaranteed to be normalized. Use [`left`](PageRect::left) and
/// [`top`](PageRect::top) for orientation-independent edges.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "[f64; 4]", into = "[f64; 4]")
)]
pub struct PageRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl PageRect {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Left edge.
    pub fn left(&self) -> f64 {
        self.x0.min(self.x1)
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x0.max(self.x1)
    }

    /// Top edge (largest y, since page space grows upward).
    pub fn top(&self) -> f64 {
        self.y0.max(self.y1)
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y0.min(self.y1)
    }

    pub fn width(&self) -> f64 {
        self.right() - self.left()
    }

    pub fn height(&self) -> f64 {
        self.top() - self.bottom()
    }
}

impl From<[f64; 4]> for PageRect {
    fn from(v: [f64; 4]) -> Self {
        PageRect::new(v[0], v[1], v[2], v[3])
    }
}

impl From<PageRect> for [f64; 4] {
    fn from(r: PageRect) -> Self {
        [r.x0, r.y0, r.x1, r.y1]
    }
}

/// Width and height of a page or an image, in its own units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
