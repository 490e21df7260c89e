//! Segments an image at three scales and writes one colorized PNG per scale.
//!
//! # Usage
//!
//! ```bash
//! superpixel <image> [config.yaml|config.json] [output_dir]
//! ```
//!
//! Output files are named `<image stem>_<scale>.png` and land in `output/`
//! unless another directory is given.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{bail, Context};
use superpixel::{Image, MultiScaleSegmenter, SegmentationConfig};

const DEFAULT_OUTPUT_DIR: &str = "output";
const LOG_DIR: &str = "logs";

struct Args {
    image: PathBuf,
    config: Option<PathBuf>,
    output_dir: PathBuf,
}

fn main() -> ExitCode {
    common::log_setup::setup_logging("info", Path::new(LOG_DIR));

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let args = parse_args(env::args().skip(1).collect())?;

    let config = match &args.config {
        Some(path) => SegmentationConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SegmentationConfig::default(),
    };
    tracing::info!(
        sigma = config.sigma,
        k = config.k,
        min_size = config.min_size,
        "Base config"
    );

    let image = Image::read_file(&args.image)
        .with_context(|| format!("Failed to read image {}", args.image.display()))?;
    tracing::info!(path = %args.image.display(), %image, "Loaded image");

    let start = Instant::now();
    let results = MultiScaleSegmenter::new(config).run(&image)?;
    tracing::info!(elapsed_ms = start.elapsed().as_millis(), "Segmentation finished");

    fs::create_dir_all(&args.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            args.output_dir.display()
        )
    })?;

    let stem = file_stem(&args.image)?;
    let mut rng = rand::rng();
    for result in &results {
        let path = args
            .output_dir
            .join(format!("{}_{}.png", stem, result.scale));
        result
            .segmentation
            .labels
            .colorize(&mut rng)
            .save_file(&path)
            .with_context(|| format!("Failed to save {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            segments = result.segmentation.segment_count(),
            "Saved"
        );
    }

    Ok(())
}

fn parse_args(args: Vec<String>) -> anyhow::Result<Args> {
    let mut args = args.into_iter();
    let Some(image) = args.next() else {
        bail!("Usage: superpixel <image> [config.yaml|config.json] [output_dir]");
    };

    let config = args.next().map(PathBuf::from);
    let output_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
    if let Some(extra) = args.next() {
        bail!("Unexpected argument: {}", extra);
    }

    Ok(Args {
        image: PathBuf::from(image),
        config,
        output_dir,
    })
}

fn file_stem(path: &Path) -> anyhow::Result<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .with_context(|| format!("Image path has no file name: {}", path.display()))
}
