//! Rectangle types shared by the decoder, suppressor, and remapper.
//!
//! `Rect` lives in the normalized coordinate space the decoder emits (unit
//! square, top-left origin, y down); values may extend past [0, 1] for boxes
//! whose extent crosses the image edge. `PixelRect` is the integer result of
//! remapping into a concrete viewport.

/// Axis-aligned rectangle in normalized coordinates, top-left origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle from its center point and size.
    pub fn from_center(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self {
            x: cx - width / 2.0,
            y: cy - height / 2.0,
            width,
            height,
        }
    }

    /// Returns the right edge (`x + width`).
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge (`y + height`).
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns `width * height`.
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Returns the area of the overlap with `other`, 0.0 when disjoint.
    pub fn intersection_area(&self, other: &Rect) -> f32 {
        let overlap_w = (self.right().min(other.right()) - self.x.max(other.x)).max(0.0);
        let overlap_h = (self.bottom().min(other.bottom()) - self.y.max(other.y)).max(0.0);
        overlap_w * overlap_h
    }

    /// Intersection over union with `other`.
    ///
    /// Returns 0.0 whenever the union area is not positive, so degenerate
    /// zero-size boxes yield 0 rather than NaN.
    pub fn iou(&self, other: &Rect) -> f32 {
        let intersection = self.intersection_area(other);
        let union = self.area() + other.area() - intersection;
        if union > 0.0 {
            intersection / union
        } else {
            0.0
        }
    }
}

/// Axis-aligned rectangle in integer pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    /// Left edge in pixels.
    pub x: i32,
    /// Top edge in pixels.
    pub y: i32,
    /// Horizontal extent in pixels.
    pub width: i32,
    /// Vertical extent in pixels.
    pub height: i32,
}

impl PixelRect {
    /// Creates a rectangle from its top-left corner and size.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the right edge (`x + width`).
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Returns the bottom edge (`y + height`).
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Returns true when the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}
