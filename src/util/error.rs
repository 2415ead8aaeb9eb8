//! Error types for yolopost.

use thiserror::Error;

/// Result alias for yolopost operations.
pub type YoloPostResult<T> = std::result::Result<T, YoloPostError>;

/// Errors that can occur when constructing views and specs or running the
/// pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum YoloPostError {
    /// A tensor dimension is zero.
    #[error("invalid tensor dimensions: {channels}x{rows}x{cols}")]
    InvalidDimensions {
        channels: usize,
        rows: usize,
        cols: usize,
    },
    /// The backing buffer is shorter than the strided extent of the view.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// The tensor shape does not match the grid's `B*(5+C) x H x W` output.
    #[error(
        "tensor shape mismatch: expected {expected_channels}x{expected_rows}x{expected_cols}, \
         got {channels}x{rows}x{cols}"
    )]
    ShapeMismatch {
        expected_channels: usize,
        expected_rows: usize,
        expected_cols: usize,
        channels: usize,
        rows: usize,
        cols: usize,
    },
    /// The anchor table length does not equal the boxes-per-cell count.
    #[error("anchor count mismatch: expected {expected} anchors, got {got}")]
    AnchorCountMismatch { expected: usize, got: usize },
    /// The label table length does not equal the class count.
    #[error("label count mismatch: expected {expected} labels, got {got}")]
    LabelCountMismatch { expected: usize, got: usize },
    /// The grid geometry itself is unusable.
    #[error("invalid grid spec: {reason}")]
    InvalidGridSpec { reason: &'static str },
}
