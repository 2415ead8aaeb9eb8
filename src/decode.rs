//! Grid decoding: raw detector output to candidate boxes.
//!
//! The decoder walks box slots, rows, and columns in a fixed order and turns
//! each cell into one candidate: sigmoid on the center offsets and the
//! objectness logit, exponential anchor scaling on the size, max-pivot
//! scoring on the class logits. Candidates at or below the score threshold
//! are dropped on the spot. The optional rayon path splits (slot, row) units
//! across threads and reassembles them in the serial order.

use crate::candidate::Candidate;
use crate::config::{Anchor, GridSpec};
use crate::geom::Rect;
use crate::tensor::{TensorElement, TensorView};
use crate::trace::{trace_event, trace_span};
use crate::util::math::{best_class, sigmoid};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

pub(crate) fn decode_grid<T: TensorElement>(
    view: TensorView<'_, T>,
    spec: &GridSpec,
    score_threshold: f32,
) -> Vec<Candidate> {
    let _span = trace_span!("decode_grid", cells = spec.cell_count()).entered();

    let mut out = Vec::new();
    let mut logits = vec![0.0f32; spec.num_classes()];
    for slot in 0..spec.boxes_per_cell() {
        for row in 0..spec.grid_height() {
            decode_row(view, spec, slot, row, score_threshold, &mut logits, &mut out);
        }
    }

    trace_event!("decode_kept", count = out.len());
    out
}

/// Decodes (slot, row) units in parallel, preserving the serial output order.
#[cfg(feature = "rayon")]
pub(crate) fn decode_grid_par<T: TensorElement>(
    view: TensorView<'_, T>,
    spec: &GridSpec,
    score_threshold: f32,
) -> Vec<Candidate> {
    let _span = trace_span!("decode_grid", cells = spec.cell_count(), parallel = true).entered();

    let rows = spec.grid_height();
    let units: Vec<Vec<Candidate>> = (0..spec.boxes_per_cell() * rows)
        .into_par_iter()
        .map(|unit| {
            let mut logits = vec![0.0f32; spec.num_classes()];
            let mut out = Vec::new();
            decode_row(
                view,
                spec,
                unit / rows,
                unit % rows,
                score_threshold,
                &mut logits,
                &mut out,
            );
            out
        })
        .collect();

    let out: Vec<Candidate> = units.into_iter().flatten().collect();
    trace_event!("decode_kept", count = out.len());
    out
}

fn decode_row<T: TensorElement>(
    view: TensorView<'_, T>,
    spec: &GridSpec,
    slot: usize,
    row: usize,
    score_threshold: f32,
    logits: &mut [f32],
    out: &mut Vec<Candidate>,
) {
    let base_channel = slot * (5 + spec.num_classes());
    let anchor = spec.anchors()[slot];
    for col in 0..spec.grid_width() {
        let candidate = decode_cell(view, spec, base_channel, anchor, row, col, logits);
        if candidate.score > score_threshold {
            out.push(candidate);
        }
    }
}

fn decode_cell<T: TensorElement>(
    view: TensorView<'_, T>,
    spec: &GridSpec,
    base_channel: usize,
    anchor: Anchor,
    row: usize,
    col: usize,
    logits: &mut [f32],
) -> Candidate {
    let tx = view.at(base_channel, row, col);
    let ty = view.at(base_channel + 1, row, col);
    let tw = view.at(base_channel + 2, row, col);
    let th = view.at(base_channel + 3, row, col);
    let to = view.at(base_channel + 4, row, col);

    let grid_w = spec.grid_width() as f32;
    let grid_h = spec.grid_height() as f32;
    let cx = (sigmoid(tx) + col as f32) / grid_w;
    let cy = (sigmoid(ty) + row as f32) / grid_h;
    let width = anchor.width * tw.exp() / grid_w;
    let height = anchor.height * th.exp() / grid_h;
    let objectness = sigmoid(to);

    for (class, logit) in logits.iter_mut().enumerate() {
        *logit = view.at(base_channel + 5 + class, row, col);
    }
    let (class_idx, class_prob) = best_class(logits);

    Candidate {
        cx,
        cy,
        width,
        height,
        rect: Rect::from_center(cx, cy, width, height),
        objectness,
        class_idx,
        class_prob,
        score: objectness * class_prob,
    }
}
