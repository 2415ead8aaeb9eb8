//! Candidate boxes decoded from the output grid.
//!
//! Includes the deterministic descending-score ordering used by suppression.

use std::cmp::Ordering;

use crate::geom::Rect;

pub(crate) mod nms;

/// One decoded box before suppression.
///
/// All coordinates are normalized to the unit square of the network input;
/// the rectangle may extend past [0, 1] when the box crosses an image edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// Box center x.
    pub cx: f32,
    /// Box center y.
    pub cy: f32,
    /// Box width.
    pub width: f32,
    /// Box height.
    pub height: f32,
    /// Top-left-origin rectangle equivalent to the center/size fields.
    pub rect: Rect,
    /// Objectness confidence, sigmoid of the raw objectness channel.
    pub objectness: f32,
    /// Winning class index, first maximum in channel order.
    pub class_idx: usize,
    /// Probability assigned to the winning class.
    pub class_prob: f32,
    /// Combined confidence: `objectness * class_prob`.
    pub score: f32,
}

fn candidate_cmp_desc(a: &Candidate, b: &Candidate) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.rect.x.total_cmp(&b.rect.x))
        .then_with(|| a.rect.y.total_cmp(&b.rect.y))
        .then_with(|| a.class_idx.cmp(&b.class_idx))
}

/// Sorts candidates by descending score with deterministic tie-breaking.
pub(crate) fn sort_candidates_desc(candidates: &mut [Candidate]) {
    candidates.sort_by(candidate_cmp_desc);
}
