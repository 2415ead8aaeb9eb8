#![cfg(feature = "rayon")]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use yolopost::{GridSpec, PostprocessConfig, Postprocessor, TensorView, Viewport};

fn random_tensor(spec: &GridSpec, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let len = spec.channels() * spec.grid_height() * spec.grid_width();
    (0..len).map(|_| rng.random_range(-4.0f32..4.0)).collect()
}

#[test]
fn parallel_decode_matches_serial() {
    let spec = GridSpec::yolo_v2_tiny_coco();
    let data = random_tensor(&spec, 2024);
    let view = TensorView::from_slice(&data, 425, 13, 13).unwrap();

    let serial = Postprocessor::new(spec.clone()).with_config(PostprocessConfig {
        score_threshold: 0.0,
        parallel: false,
        ..PostprocessConfig::default()
    });
    let parallel = Postprocessor::new(spec).with_config(PostprocessConfig {
        score_threshold: 0.0,
        parallel: true,
        ..PostprocessConfig::default()
    });

    let from_serial = serial.decode(view).unwrap();
    let from_parallel = parallel.decode(view).unwrap();
    assert_eq!(from_serial.len(), 845);
    assert_eq!(from_serial, from_parallel);
}

#[test]
fn parallel_pipeline_matches_serial() {
    let spec = GridSpec::yolo_v2_tiny_voc();
    let data = random_tensor(&spec, 77);
    let view = TensorView::from_slice(&data, 125, 13, 13).unwrap();

    let serial = Postprocessor::new(spec.clone()).with_config(PostprocessConfig {
        score_threshold: 0.05,
        parallel: false,
        ..PostprocessConfig::default()
    });
    let parallel = Postprocessor::new(spec).with_config(PostprocessConfig {
        score_threshold: 0.05,
        parallel: true,
        ..PostprocessConfig::default()
    });

    assert_eq!(
        serial.postprocess(view).unwrap(),
        parallel.postprocess(view).unwrap()
    );
    let viewport = Viewport::new(480, 640);
    assert_eq!(
        serial.detect(view, viewport).unwrap(),
        parallel.detect(view, viewport).unwrap()
    );
}
