use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use yolopost::{Detection, GridSpec, PostprocessConfig, Postprocessor, TensorView, Viewport};

const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "YOLO-tiny postprocessing CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum GridPresetConfig {
    YoloV2TinyCoco,
    YoloV2TinyVoc,
}

impl From<GridPresetConfig> for GridSpec {
    fn from(value: GridPresetConfig) -> Self {
        match value {
            GridPresetConfig::YoloV2TinyCoco => GridSpec::yolo_v2_tiny_coco(),
            GridPresetConfig::YoloV2TinyVoc => GridSpec::yolo_v2_tiny_voc(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum TensorElementConfig {
    F32,
    F64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct PostprocessConfigJson {
    score_threshold: f32,
    iou_threshold: f32,
    max_boxes: usize,
    parallel: bool,
}

impl Default for PostprocessConfigJson {
    fn default() -> Self {
        let cfg = PostprocessConfig::default();
        Self {
            score_threshold: cfg.score_threshold,
            iou_threshold: cfg.iou_threshold,
            max_boxes: cfg.max_boxes,
            parallel: cfg.parallel,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ViewportJson {
    width: u32,
    height: u32,
}

impl Default for ViewportJson {
    fn default() -> Self {
        Self {
            width: 416,
            height: 416,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    tensor_path: String,
    output_path: Option<String>,
    element: TensorElementConfig,
    grid: GridPresetConfig,
    postprocess: PostprocessConfigJson,
    viewport: ViewportJson,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tensor_path: String::new(),
            output_path: None,
            element: TensorElementConfig::F32,
            grid: GridPresetConfig::YoloV2TinyCoco,
            postprocess: PostprocessConfigJson::default(),
            viewport: ViewportJson::default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct RectRecord {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

#[derive(Debug, Serialize)]
struct DetectionRecord {
    label: String,
    class_idx: usize,
    score: f32,
    rect: RectRecord,
}

impl From<Detection> for DetectionRecord {
    fn from(value: Detection) -> Self {
        Self {
            label: value.label,
            class_idx: value.class_idx,
            score: value.score,
            rect: RectRecord {
                x: value.rect.x,
                y: value.rect.y,
                width: value.rect.width,
                height: value.rect.height,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    detections: Vec<DetectionRecord>,
}

fn read_tensor_f32(path: &str) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
    let bytes = fs::read(path)?;
    if bytes.len() % 4 != 0 {
        return Err(format!("tensor file length {} is not a multiple of 4", bytes.len()).into());
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}

fn read_tensor_f64(path: &str) -> Result<Vec<f64>, Box<dyn std::error::Error>> {
    let bytes = fs::read(path)?;
    if bytes.len() % 8 != 0 {
        return Err(format!("tensor file length {} is not a multiple of 8", bytes.len()).into());
    }
    Ok(bytes
        .chunks_exact(8)
        .map(|chunk| {
            f64::from_le_bytes([
                chunk[0], chunk[1], chunk[2], chunk[3], chunk[4], chunk[5], chunk[6], chunk[7],
            ])
        })
        .collect())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("yolopost=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.tensor_path.is_empty() {
        return Err("tensor_path must be set in the config".into());
    }

    let spec: GridSpec = config.grid.into();
    let channels = spec.channels();
    let rows = spec.grid_height();
    let cols = spec.grid_width();

    let post = Postprocessor::new(spec).with_config(PostprocessConfig {
        score_threshold: config.postprocess.score_threshold,
        iou_threshold: config.postprocess.iou_threshold,
        max_boxes: config.postprocess.max_boxes,
        parallel: config.postprocess.parallel,
    });
    let viewport = Viewport::new(config.viewport.width, config.viewport.height);

    let detections = match config.element {
        TensorElementConfig::F32 => {
            let data = read_tensor_f32(&config.tensor_path)?;
            let view = TensorView::from_slice(&data, channels, rows, cols)?;
            post.detect(view, viewport)?
        }
        TensorElementConfig::F64 => {
            let data = read_tensor_f64(&config.tensor_path)?;
            let view = TensorView::from_slice(&data, channels, rows, cols)?;
            post.detect(view, viewport)?
        }
    };

    let output = Output {
        detections: detections.into_iter().map(DetectionRecord::from).collect(),
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
