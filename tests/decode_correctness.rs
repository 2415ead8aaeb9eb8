use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use yolopost::{GridSpec, PostprocessConfig, Postprocessor, TensorView};

fn chw_index(spec: &GridSpec, channel: usize, row: usize, col: usize) -> usize {
    (channel * spec.grid_height() + row) * spec.grid_width() + col
}

fn zero_tensor(spec: &GridSpec) -> Vec<f32> {
    vec![0.0f32; spec.channels() * spec.grid_height() * spec.grid_width()]
}

#[test]
fn zero_tensor_decodes_to_nothing() {
    // All-zero logits give every cell a score of 0.5 / C, far below 0.3.
    let spec = GridSpec::yolo_v2_tiny_coco();
    let data = zero_tensor(&spec);
    let view = TensorView::from_slice(&data, 425, 13, 13).unwrap();

    let post = Postprocessor::new(spec);
    let candidates = post.decode(view).unwrap();
    assert!(candidates.is_empty());
}

#[test]
fn single_hot_cell_decodes_to_one_candidate() {
    let spec = GridSpec::yolo_v2_tiny_coco();
    let mut data = zero_tensor(&spec);
    // Slot 0, cell (row 6, col 6): strong objectness, class 42 dominant.
    data[chw_index(&spec, 4, 6, 6)] = 10.0;
    data[chw_index(&spec, 5 + 42, 6, 6)] = 10.0;
    let view = TensorView::from_slice(&data, 425, 13, 13).unwrap();

    let post = Postprocessor::new(spec);
    let candidates = post.decode(view).unwrap();
    assert_eq!(candidates.len(), 1);

    let c = &candidates[0];
    // sigmoid(0) = 0.5, so the center lands in the middle of cell (6, 6).
    assert!((c.cx - 0.5).abs() < 1e-6);
    assert!((c.cy - 0.5).abs() < 1e-6);
    assert!((c.width - 0.738768 / 13.0).abs() < 1e-6);
    assert!((c.height - 0.874946 / 13.0).abs() < 1e-6);
    assert!((c.objectness - 0.9999546).abs() < 1e-5);
    assert_eq!(c.class_idx, 42);
    assert!((c.class_prob - 0.9964262).abs() < 1e-5);
    assert!((c.score - 0.9963810).abs() < 1e-5);
    assert!((c.rect.x - (c.cx - c.width / 2.0)).abs() < 1e-6);
    assert!((c.rect.y - (c.cy - c.height / 2.0)).abs() < 1e-6);
}

#[test]
fn score_threshold_is_strict() {
    let spec = GridSpec::yolo_v2_tiny_coco();
    let mut data = zero_tensor(&spec);
    data[chw_index(&spec, 4, 6, 6)] = 10.0;
    data[chw_index(&spec, 5 + 42, 6, 6)] = 10.0;
    let view = TensorView::from_slice(&data, 425, 13, 13).unwrap();

    let post = Postprocessor::new(spec.clone());
    let score = post.decode(view).unwrap()[0].score;

    // A threshold equal to the score must drop the candidate.
    let post = Postprocessor::new(spec).with_config(PostprocessConfig {
        score_threshold: score,
        ..PostprocessConfig::default()
    });
    assert!(post.decode(view).unwrap().is_empty());
}

#[test]
fn class_ties_resolve_to_the_lowest_index() {
    let spec = GridSpec::yolo_v2_tiny_voc();
    let mut data = zero_tensor(&spec);
    data[chw_index(&spec, 4, 0, 0)] = 10.0;
    data[chw_index(&spec, 5 + 3, 0, 0)] = 5.0;
    data[chw_index(&spec, 5 + 7, 0, 0)] = 5.0;
    let view = TensorView::from_slice(&data, 125, 13, 13).unwrap();

    let post = Postprocessor::new(spec);
    let candidates = post.decode(view).unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].class_idx, 3);
}

#[test]
fn anchors_scale_by_box_slot() {
    let spec = GridSpec::yolo_v2_tiny_voc();
    let mut data = zero_tensor(&spec);
    // Slot 2 starts at channel 2 * (5 + 20) = 50.
    data[chw_index(&spec, 54, 0, 0)] = 10.0;
    data[chw_index(&spec, 55, 0, 0)] = 10.0;
    let view = TensorView::from_slice(&data, 125, 13, 13).unwrap();

    let post = Postprocessor::new(spec);
    let candidates = post.decode(view).unwrap();
    assert_eq!(candidates.len(), 1);

    let c = &candidates[0];
    assert!((c.width - 6.63 / 13.0).abs() < 1e-6);
    assert!((c.height - 11.38 / 13.0).abs() < 1e-6);
    assert_eq!(c.class_idx, 0);
}

#[test]
fn decode_order_is_slot_major() {
    let spec = GridSpec::yolo_v2_tiny_voc();
    let mut data = zero_tensor(&spec);
    // Slot 1 hit at (0, 0) with class 1; slot 0 hit at (5, 9) with class 2.
    data[chw_index(&spec, 25 + 4, 0, 0)] = 10.0;
    data[chw_index(&spec, 25 + 5 + 1, 0, 0)] = 10.0;
    data[chw_index(&spec, 4, 5, 9)] = 10.0;
    data[chw_index(&spec, 5 + 2, 5, 9)] = 10.0;
    let view = TensorView::from_slice(&data, 125, 13, 13).unwrap();

    let post = Postprocessor::new(spec);
    let candidates = post.decode(view).unwrap();
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].class_idx, 2);
    assert_eq!(candidates[1].class_idx, 1);
}

#[test]
fn thresholdless_decode_covers_every_cell() {
    let spec = GridSpec::yolo_v2_tiny_voc();
    let data = zero_tensor(&spec);
    let view = TensorView::from_slice(&data, 125, 13, 13).unwrap();

    let post = Postprocessor::new(spec).with_config(PostprocessConfig {
        score_threshold: 0.0,
        ..PostprocessConfig::default()
    });
    let candidates = post.decode(view).unwrap();
    assert_eq!(candidates.len(), 845);

    // First candidate comes from slot 0, cell (0, 0).
    let first = &candidates[0];
    assert!((first.cx - 0.5 / 13.0).abs() < 1e-6);
    assert!((first.cy - 0.5 / 13.0).abs() < 1e-6);
}

#[test]
fn strided_reads_match_contiguous() {
    let spec = GridSpec::yolo_v2_tiny_voc();
    let mut rng = StdRng::seed_from_u64(123);
    let mut contiguous = zero_tensor(&spec);
    for value in contiguous.iter_mut() {
        *value = rng.random_range(-3.0f32..3.0);
    }
    let contiguous_view = TensorView::from_slice(&contiguous, 125, 13, 13).unwrap();

    // Same logical values spread over a padded layout, NaN in the gaps.
    let (channel_stride, row_stride, col_stride) = (520, 39, 3);
    let needed = 124 * channel_stride + 12 * row_stride + 12 * col_stride + 1;
    let mut padded = vec![f32::NAN; needed];
    for channel in 0..125 {
        for row in 0..13 {
            for col in 0..13 {
                let idx = channel * channel_stride + row * row_stride + col * col_stride;
                padded[idx] = contiguous[chw_index(&spec, channel, row, col)];
            }
        }
    }
    let padded_view = TensorView::with_strides(
        &padded,
        125,
        13,
        13,
        channel_stride,
        row_stride,
        col_stride,
    )
    .unwrap();

    let post = Postprocessor::new(spec).with_config(PostprocessConfig {
        score_threshold: 0.0,
        ..PostprocessConfig::default()
    });
    let from_contiguous = post.decode(contiguous_view).unwrap();
    let from_padded = post.decode(padded_view).unwrap();
    assert_eq!(from_contiguous.len(), 845);
    assert_eq!(from_contiguous, from_padded);
}

#[test]
fn f64_input_matches_f32() {
    let spec = GridSpec::yolo_v2_tiny_voc();
    let mut rng = StdRng::seed_from_u64(7);
    let mut data = zero_tensor(&spec);
    for value in data.iter_mut() {
        *value = rng.random_range(-3.0f32..3.0);
    }
    let wide: Vec<f64> = data.iter().map(|&v| v as f64).collect();

    let view32 = TensorView::from_slice(&data, 125, 13, 13).unwrap();
    let view64 = TensorView::from_slice(&wide, 125, 13, 13).unwrap();

    let post = Postprocessor::new(spec).with_config(PostprocessConfig {
        score_threshold: 0.0,
        ..PostprocessConfig::default()
    });
    assert_eq!(post.decode(view32).unwrap(), post.decode(view64).unwrap());
}
