//! Postprocessing for YOLO-tiny style single-shot detectors.
//!
//! This crate turns the raw `B*(5+C) x H x W` output tensor of a tiny-YOLO
//! head into a short list of scored, labeled boxes: strided tensor views,
//! per-cell grid decoding, greedy IoU suppression, and aspect-fill viewport
//! remapping, with optional parallel decoding via the `rayon` feature.
//! Inference itself is out of scope; the pipeline starts where the network
//! ends.

mod candidate;
pub mod config;
mod decode;
pub mod geom;
pub mod overlay;
mod pipeline;
mod remap;
pub mod tensor;
mod trace;
pub mod util;

pub use config::{Anchor, GridSpec, PostprocessConfig};
pub use geom::{PixelRect, Rect};
pub use overlay::{OverlayBox, OverlayBuffer};
pub use tensor::{TensorElement, TensorView};
pub use util::{YoloPostError, YoloPostResult};

pub use candidate::nms::non_max_suppression;
pub use candidate::Candidate;
pub use pipeline::{Detection, Postprocessor};
pub use remap::Viewport;
