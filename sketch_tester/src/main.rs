use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use sketchify::parallel_pipeline::ParallelPipeline;
use sketchify::pipeline::{PipelineConfig, PipelineMode, DEFAULT_GRID_SIZE, DEFAULT_LEVELS};
use sketchify::{load_pixel_grid, save_pixel_grid};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Tile into blocks and re-render each from its border hot points.
    Stroke,
    /// Mark row and column transitions, merge them, despeckle.
    Contrast,
}

impl From<Mode> for PipelineMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Stroke => PipelineMode::Stroke,
            Mode::Contrast => PipelineMode::Contrast,
        }
    }
}

/// Turn a photograph into a sketch raster.
#[derive(Parser, Debug)]
#[command(name = "sketch_tester", version, about)]
struct Cli {
    /// Image to read (any format the `image` crate decodes).
    input: PathBuf,
    /// Image to write; the format follows the extension.
    output: PathBuf,
    #[arg(long, value_enum, default_value_t = Mode::Stroke)]
    mode: Mode,
    /// Block side length in pixels.
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
    grid_size: u32,
    /// Grey levels the input is quantized to.
    #[arg(long, default_value_t = DEFAULT_LEVELS)]
    levels: u32,
    /// Worker tasks for the stroke pass (defaults to the CPU count).
    #[arg(long)]
    workers: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // --- 1. Argument Parsing & Setup ---
    let cli = Cli::parse();
    let defaults = PipelineConfig::default();
    let config = PipelineConfig {
        mode: cli.mode.into(),
        grid_size: cli.grid_size,
        levels: cli.levels,
        workers: cli.workers.unwrap_or(defaults.workers),
        ..defaults
    };

    // --- 2. Pipeline Initialization ---
    // Configuration errors surface here, before the input is even opened.
    let pipeline = ParallelPipeline::new(config).context("invalid pipeline configuration")?;

    // --- 3. Load, Process, Save ---
    let grid = load_pixel_grid(&cli.input)?;
    log::info!("loaded {} ({}x{})", cli.input.display(), grid.width(), grid.height());

    let sketch = pipeline.run(&grid).await.context("sketch pass failed")?;
    save_pixel_grid(&sketch, &cli.output)?;

    println!("Processing complete. Output saved to {}", cli.output.display());
    Ok(())
}
