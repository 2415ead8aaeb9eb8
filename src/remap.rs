//! Aspect-fill remapping from normalized boxes to viewport pixels.
//!
//! The camera frame is assumed to have been aspect-filled before inference:
//! scaled uniformly until it covers the square network input, then center
//! cropped. Remapping undoes that for display. Normalized coordinates scale
//! by the longer viewport side, shift back by the centering offset, truncate
//! to integer pixels, and clip to the viewport bounds.

use crate::geom::{PixelRect, Rect};

/// Destination view in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    /// View width in pixels.
    pub width: u32,
    /// View height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Creates a viewport from its pixel size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Maps a normalized rectangle into this viewport.
    ///
    /// Pixel values truncate toward zero before clipping; float-to-int casts
    /// saturate, so extreme inputs clamp instead of wrapping. A rectangle
    /// entirely outside the viewport clips to an empty result rather than
    /// being dropped, keeping output lists index-aligned with their input.
    pub fn remap(&self, rect: Rect) -> PixelRect {
        let view_w = self.width as f32;
        let view_h = self.height as f32;
        let max_dim = view_w.max(view_h);
        let (x_offset, y_offset) = if view_w < view_h {
            ((view_h - view_w) / 2.0, 0.0)
        } else {
            (0.0, (view_w - view_h) / 2.0)
        };

        let left = (rect.x * max_dim - x_offset) as i32;
        let top = (rect.y * max_dim - y_offset) as i32;
        let width = (rect.width * max_dim) as i32;
        let height = (rect.height * max_dim) as i32;

        let bound_x = i32::try_from(self.width).unwrap_or(i32::MAX);
        let bound_y = i32::try_from(self.height).unwrap_or(i32::MAX);
        let x0 = left.clamp(0, bound_x);
        let y0 = top.clamp(0, bound_y);
        let x1 = left.saturating_add(width).clamp(0, bound_x);
        let y1 = top.saturating_add(height).clamp(0, bound_y);

        PixelRect::new(x0, y0, (x1 - x0).max(0), (y1 - y0).max(0))
    }
}
