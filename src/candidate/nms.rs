//! Greedy IoU-based non-maximum suppression.

use crate::candidate::{sort_candidates_desc, Candidate};

/// Suppresses overlapping candidates, keeping at most `max_boxes`.
///
/// Candidates are sorted by descending score with deterministic tie-breaks.
/// Walking that order, each surviving candidate is kept and every remaining
/// one whose IoU with it strictly exceeds `iou_threshold` is dropped;
/// overlaps exactly at the threshold survive. The walk stops as soon as
/// `max_boxes` are kept. Kept boxes come back in descending-score order.
pub fn non_max_suppression(
    candidates: &mut [Candidate],
    iou_threshold: f32,
    max_boxes: usize,
) -> Vec<Candidate> {
    if max_boxes == 0 || candidates.is_empty() {
        return Vec::new();
    }

    sort_candidates_desc(candidates);

    let mut kept = Vec::with_capacity(max_boxes.min(candidates.len()));
    let mut dropped = vec![false; candidates.len()];

    for i in 0..candidates.len() {
        if dropped[i] {
            continue;
        }
        let top = candidates[i];
        kept.push(top);
        if kept.len() == max_boxes {
            break;
        }
        for (j, dropped_j) in dropped.iter_mut().enumerate().skip(i + 1) {
            if !*dropped_j && top.rect.iou(&candidates[j].rect) > iou_threshold {
                *dropped_j = true;
            }
        }
    }

    kept
}
