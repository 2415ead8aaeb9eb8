//! Strided 3-D tensor views over borrowed buffers.
//!
//! `TensorView` is a borrowed channel/row/column view into a 1-D buffer with
//! explicit element strides, covering both contiguous CHW dumps and padded or
//! interleaved layouts. Validation happens once at construction: the strided
//! extent must fit inside the buffer, so per-element reads in the decoder are
//! plain slice indexing. Strides may overlap or be zero; the view only
//! guarantees that every in-range read stays inside the buffer.

use crate::util::{YoloPostError, YoloPostResult};

/// Scalar element types a [`TensorView`] can be built over.
///
/// The pipeline computes in f32; elements convert on read.
pub trait TensorElement: Copy + Send + Sync {
    /// Converts the element into the pipeline's f32 domain.
    fn to_f32(self) -> f32;
}

impl TensorElement for f32 {
    fn to_f32(self) -> f32 {
        self
    }
}

impl TensorElement for f64 {
    fn to_f32(self) -> f32 {
        self as f32
    }
}

/// Borrowed 3-D view with explicit channel, row, and column strides.
#[derive(Copy, Clone)]
pub struct TensorView<'a, T> {
    data: &'a [T],
    channels: usize,
    rows: usize,
    cols: usize,
    channel_stride: usize,
    row_stride: usize,
    col_stride: usize,
}

impl<'a, T: TensorElement> TensorView<'a, T> {
    /// Creates a contiguous channel-major (CHW) view.
    pub fn from_slice(
        data: &'a [T],
        channels: usize,
        rows: usize,
        cols: usize,
    ) -> YoloPostResult<Self> {
        let plane = rows
            .checked_mul(cols)
            .ok_or(YoloPostError::InvalidDimensions {
                channels,
                rows,
                cols,
            })?;
        Self::with_strides(data, channels, rows, cols, plane, cols, 1)
    }

    /// Creates a view with explicit strides.
    pub fn with_strides(
        data: &'a [T],
        channels: usize,
        rows: usize,
        cols: usize,
        channel_stride: usize,
        row_stride: usize,
        col_stride: usize,
    ) -> YoloPostResult<Self> {
        let needed = required_len(channels, rows, cols, channel_stride, row_stride, col_stride)?;
        if data.len() < needed {
            return Err(YoloPostError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            channels,
            rows,
            cols,
            channel_stride,
            row_stride,
            col_stride,
        })
    }

    /// Returns the channel count.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns the row count.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the column count.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the stride in elements between consecutive channels.
    pub fn channel_stride(&self) -> usize {
        self.channel_stride
    }

    /// Returns the stride in elements between consecutive rows.
    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    /// Returns the stride in elements between consecutive columns.
    pub fn col_stride(&self) -> usize {
        self.col_stride
    }

    /// Returns the backing slice including any padding.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Returns the element at `(channel, row, col)` as f32 if it is within
    /// bounds.
    pub fn get(&self, channel: usize, row: usize, col: usize) -> Option<f32> {
        if channel >= self.channels || row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.at(channel, row, col))
    }

    /// Reads `(channel, row, col)` as f32.
    ///
    /// Construction guarantees every in-range triple lands inside the
    /// buffer, so the read is plain indexing.
    pub(crate) fn at(&self, channel: usize, row: usize, col: usize) -> f32 {
        debug_assert!(channel < self.channels && row < self.rows && col < self.cols);
        let idx =
            channel * self.channel_stride + row * self.row_stride + col * self.col_stride;
        self.data[idx].to_f32()
    }
}

fn required_len(
    channels: usize,
    rows: usize,
    cols: usize,
    channel_stride: usize,
    row_stride: usize,
    col_stride: usize,
) -> YoloPostResult<usize> {
    if channels == 0 || rows == 0 || cols == 0 {
        return Err(YoloPostError::InvalidDimensions {
            channels,
            rows,
            cols,
        });
    }
    let needed = (channels - 1)
        .checked_mul(channel_stride)
        .and_then(|v| {
            (rows - 1)
                .checked_mul(row_stride)
                .and_then(|r| v.checked_add(r))
        })
        .and_then(|v| {
            (cols - 1)
                .checked_mul(col_stride)
                .and_then(|c| v.checked_add(c))
        })
        .and_then(|v| v.checked_add(1))
        .ok_or(YoloPostError::InvalidDimensions {
            channels,
            rows,
            cols,
        })?;
    Ok(needed)
}
