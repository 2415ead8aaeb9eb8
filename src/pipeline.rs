//! End-to-end postprocessing pipeline.
//!
//! `Postprocessor` ties the stages together: shape validation, grid decode,
//! suppression, viewport remapping, label lookup. It holds no mutable state,
//! so one instance can serve many frames (and threads) concurrently.

use crate::candidate::nms::non_max_suppression;
use crate::candidate::Candidate;
use crate::config::{GridSpec, PostprocessConfig};
use crate::decode::decode_grid;
#[cfg(feature = "rayon")]
use crate::decode::decode_grid_par;
use crate::geom::PixelRect;
use crate::remap::Viewport;
use crate::tensor::{TensorElement, TensorView};
use crate::trace::{trace_event, trace_span};
use crate::util::YoloPostResult;

/// Final detection in viewport pixel coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    /// Clipped rectangle in viewport pixels; empty when the box left the
    /// visible area entirely.
    pub rect: PixelRect,
    /// Class label text from the grid's vocabulary.
    pub label: String,
    /// Class index into the grid's vocabulary.
    pub class_idx: usize,
    /// Combined confidence in (0, 1].
    pub score: f32,
}

/// Stateless pipeline facade over one grid spec and one set of thresholds.
#[derive(Clone, Debug)]
pub struct Postprocessor {
    spec: GridSpec,
    cfg: PostprocessConfig,
}

impl Postprocessor {
    /// Creates a postprocessor with default thresholds.
    pub fn new(spec: GridSpec) -> Self {
        Self {
            spec,
            cfg: PostprocessConfig::default(),
        }
    }

    /// Replaces the threshold configuration.
    pub fn with_config(mut self, cfg: PostprocessConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the grid spec.
    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &PostprocessConfig {
        &self.cfg
    }

    /// Decodes every cell of `tensor`, returning candidates above the score
    /// threshold in slot-major, then row, then column order.
    pub fn decode<T: TensorElement>(
        &self,
        tensor: TensorView<'_, T>,
    ) -> YoloPostResult<Vec<Candidate>> {
        self.spec.validate_shape(&tensor)?;
        Ok(self.decode_validated(tensor))
    }

    /// Decodes and suppresses, returning at most `max_boxes` candidates in
    /// descending-score order.
    pub fn postprocess<T: TensorElement>(
        &self,
        tensor: TensorView<'_, T>,
    ) -> YoloPostResult<Vec<Candidate>> {
        let _span = trace_span!("postprocess").entered();
        let mut candidates = self.decode(tensor)?;
        let decoded = candidates.len();
        let kept = non_max_suppression(&mut candidates, self.cfg.iou_threshold, self.cfg.max_boxes);
        trace_event!("suppress", decoded = decoded, kept = kept.len());
        Ok(kept)
    }

    /// Runs the full pipeline and remaps results into `viewport` pixels.
    pub fn detect<T: TensorElement>(
        &self,
        tensor: TensorView<'_, T>,
        viewport: Viewport,
    ) -> YoloPostResult<Vec<Detection>> {
        let kept = self.postprocess(tensor)?;
        let detections = kept
            .into_iter()
            .map(|candidate| {
                let label = self
                    .spec
                    .label(candidate.class_idx)
                    .expect("decoded class index is within the label table");
                Detection {
                    rect: viewport.remap(candidate.rect),
                    label: label.to_string(),
                    class_idx: candidate.class_idx,
                    score: candidate.score,
                }
            })
            .collect();
        Ok(detections)
    }

    fn decode_validated<T: TensorElement>(&self, tensor: TensorView<'_, T>) -> Vec<Candidate> {
        #[cfg(feature = "rayon")]
        if self.cfg.parallel {
            return decode_grid_par(tensor, &self.spec, self.cfg.score_threshold);
        }
        decode_grid(tensor, &self.spec, self.cfg.score_threshold)
    }
}
