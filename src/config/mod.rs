//! Grid geometry, anchor tables, and pipeline thresholds.
//!
//! `GridSpec` pins down everything the decoder needs to know about one
//! detector head: grid size, box slots per cell, anchors, and the class
//! vocabulary. `PostprocessConfig` carries the tunable thresholds applied
//! after decoding.

mod presets;

use crate::tensor::{TensorElement, TensorView};
use crate::util::{YoloPostError, YoloPostResult};

/// Anchor prior in grid-cell units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    /// Prior width in cells.
    pub width: f32,
    /// Prior height in cells.
    pub height: f32,
}

impl Anchor {
    /// Creates an anchor from its prior size in cells.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Geometry and vocabulary of one detector head output.
///
/// A spec fixes the grid size, the anchor table (one entry per box slot),
/// and the class labels; the tensor shape the decoder accepts,
/// `B*(5+C) x H x W`, follows from it.
#[derive(Clone, Debug)]
pub struct GridSpec {
    grid_height: usize,
    grid_width: usize,
    boxes_per_cell: usize,
    num_classes: usize,
    anchors: Vec<Anchor>,
    labels: Vec<String>,
}

impl GridSpec {
    /// Creates a validated spec.
    ///
    /// The anchor table must hold exactly `boxes_per_cell` entries and the
    /// label table exactly `num_classes` entries; box and class counts are
    /// cross-checked against the tables so mixed-up presets fail here
    /// instead of decoding garbage.
    pub fn new(
        grid_height: usize,
        grid_width: usize,
        boxes_per_cell: usize,
        num_classes: usize,
        anchors: Vec<Anchor>,
        labels: Vec<String>,
    ) -> YoloPostResult<Self> {
        if grid_height == 0 || grid_width == 0 {
            return Err(YoloPostError::InvalidGridSpec {
                reason: "grid dimensions must be non-zero",
            });
        }
        if boxes_per_cell == 0 {
            return Err(YoloPostError::InvalidGridSpec {
                reason: "boxes_per_cell must be non-zero",
            });
        }
        if num_classes == 0 {
            return Err(YoloPostError::InvalidGridSpec {
                reason: "num_classes must be non-zero",
            });
        }
        if anchors.len() != boxes_per_cell {
            return Err(YoloPostError::AnchorCountMismatch {
                expected: boxes_per_cell,
                got: anchors.len(),
            });
        }
        if labels.len() != num_classes {
            return Err(YoloPostError::LabelCountMismatch {
                expected: num_classes,
                got: labels.len(),
            });
        }
        num_classes
            .checked_add(5)
            .and_then(|per_box| per_box.checked_mul(boxes_per_cell))
            .ok_or(YoloPostError::InvalidGridSpec {
                reason: "channel count overflows usize",
            })?;
        boxes_per_cell
            .checked_mul(grid_height)
            .and_then(|cells| cells.checked_mul(grid_width))
            .ok_or(YoloPostError::InvalidGridSpec {
                reason: "cell count overflows usize",
            })?;
        Ok(Self {
            grid_height,
            grid_width,
            boxes_per_cell,
            num_classes,
            anchors,
            labels,
        })
    }

    /// YOLOv2-tiny trained on COCO: 13x13 grid, 5 anchors, 80 classes.
    pub fn yolo_v2_tiny_coco() -> Self {
        Self::new(
            13,
            13,
            presets::COCO_ANCHORS.len(),
            presets::COCO_LABELS.len(),
            presets::COCO_ANCHORS
                .iter()
                .map(|&(w, h)| Anchor::new(w, h))
                .collect(),
            presets::COCO_LABELS.iter().map(|s| s.to_string()).collect(),
        )
        .expect("preset constants are valid")
    }

    /// YOLOv2-tiny trained on Pascal VOC: 13x13 grid, 5 anchors, 20 classes.
    pub fn yolo_v2_tiny_voc() -> Self {
        Self::new(
            13,
            13,
            presets::VOC_ANCHORS.len(),
            presets::VOC_LABELS.len(),
            presets::VOC_ANCHORS
                .iter()
                .map(|&(w, h)| Anchor::new(w, h))
                .collect(),
            presets::VOC_LABELS.iter().map(|s| s.to_string()).collect(),
        )
        .expect("preset constants are valid")
    }

    /// Returns the grid height in cells.
    pub fn grid_height(&self) -> usize {
        self.grid_height
    }

    /// Returns the grid width in cells.
    pub fn grid_width(&self) -> usize {
        self.grid_width
    }

    /// Returns the number of box slots per cell.
    pub fn boxes_per_cell(&self) -> usize {
        self.boxes_per_cell
    }

    /// Returns the number of classes.
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// Returns the channel count the output tensor must carry: `B * (5 + C)`.
    pub fn channels(&self) -> usize {
        self.boxes_per_cell * (5 + self.num_classes)
    }

    /// Returns the number of candidates decoded before thresholding:
    /// `B * H * W`.
    pub fn cell_count(&self) -> usize {
        self.boxes_per_cell * self.grid_height * self.grid_width
    }

    /// Returns the anchor table, one entry per box slot.
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// Returns the class label table in channel order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns the label for `class_idx` if the index is in range.
    pub fn label(&self, class_idx: usize) -> Option<&str> {
        self.labels.get(class_idx).map(String::as_str)
    }

    /// Checks that `view` has exactly the `B*(5+C) x H x W` shape this grid
    /// produces.
    pub fn validate_shape<T: TensorElement>(
        &self,
        view: &TensorView<'_, T>,
    ) -> YoloPostResult<()> {
        let expected_channels = self.channels();
        if view.channels() != expected_channels
            || view.rows() != self.grid_height
            || view.cols() != self.grid_width
        {
            return Err(YoloPostError::ShapeMismatch {
                expected_channels,
                expected_rows: self.grid_height,
                expected_cols: self.grid_width,
                channels: view.channels(),
                rows: view.rows(),
                cols: view.cols(),
            });
        }
        Ok(())
    }
}

/// Thresholds and limits applied after decoding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PostprocessConfig {
    /// Candidates survive decoding only with `score > score_threshold`.
    pub score_threshold: f32,
    /// A kept box suppresses remaining candidates whose IoU with it strictly
    /// exceeds this value; overlaps exactly at the threshold survive.
    pub iou_threshold: f32,
    /// Upper bound on boxes returned by suppression.
    pub max_boxes: usize,
    /// Decode grid units in parallel. Requires the `rayon` feature and is
    /// ignored otherwise; output order is identical either way.
    pub parallel: bool,
}

impl Default for PostprocessConfig {
    fn default() -> Self {
        Self {
            score_threshold: 0.3,
            iou_threshold: 0.5,
            max_boxes: 10,
            parallel: false,
        }
    }
}
