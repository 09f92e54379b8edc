// THEORY:
// The `pipeline` module is the top-level API of the sketch engine. It wires the
// core modules into the two supported passes and hides them behind one call.
//
// - Stroke pass: quantize to grey bands, then tile the image and run every block
//   through `StrokeProcessor` (border -> tape -> hot points -> border -> render).
//   Output is cropped to whole blocks.
// - Contrast pass: quantize to grey bands, mark transitions along every column
//   and every row, union the two maps darker-wins, then despeckle. Output keeps
//   the input's dimensions.
//
// All configuration is checked in `SketchPipeline::new`, before any pixel is
// read, so a bad grid size or level count never produces partial output.

use crate::core_modules::color_ops::color_ops::{quantize_grey, validate_levels, Levels, TieBreak};
use crate::core_modules::composite::{despeckle, union};
use crate::core_modules::grid_tiler::GridTiler;
use crate::core_modules::hot_points::{HotPointDetector, DEFAULT_NEIGHBORHOOD_SIZE};
use crate::core_modules::pixel_grid::PixelGrid;
use crate::core_modules::strip_scanner::{mark_transitions, two_band_grey, StripScanner};
use crate::core_modules::stroke::StrokeProcessor;
use crate::error::Result;
use std::sync::Arc;

pub use crate::core_modules::pixel::pixel::Pixel;

/// Block side of the classic five-pixel sketch grid.
pub const DEFAULT_GRID_SIZE: u32 = 5;
pub const DEFAULT_LEVELS: Levels = 5;

/// Rows win ties when the two contrast maps are merged.
const CONTRAST_UNION_TIE_BREAK: TieBreak = TieBreak::PreferSecond;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineMode {
    #[default]
    Stroke,
    Contrast,
}

/// Configuration for the SketchPipeline, allowing for tunable behavior.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub mode: PipelineMode,
    /// Side length `k` of a tiling block in pixels.
    pub grid_size: u32,
    /// Number of grey bands the input is quantized to.
    pub levels: Levels,
    /// Samples on each side of a tape position when looking for hot points.
    pub neighborhood_size: usize,
    /// Fill of tiling and strip arenas before results are written.
    pub background: Pixel,
    /// Worker tasks used by the parallel pipeline.
    pub workers: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mode: PipelineMode::default(),
            grid_size: DEFAULT_GRID_SIZE,
            levels: DEFAULT_LEVELS,
            neighborhood_size: DEFAULT_NEIGHBORHOOD_SIZE,
            background: Pixel::NEUTRAL_GREY,
            workers: num_cpus::get(),
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        validate_levels(self.levels)?;
        if self.mode == PipelineMode::Stroke {
            HotPointDetector::new(self.neighborhood_size).validate_grid_size(self.grid_size)?;
        }
        Ok(())
    }
}

/// The main, top-level struct for the sketch engine.
pub struct SketchPipeline {
    config: PipelineConfig,
    tiler: GridTiler,
    scanner: StripScanner,
    stroke: Arc<StrokeProcessor>,
}

impl SketchPipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let detector = HotPointDetector::new(config.neighborhood_size);
        Ok(Self {
            tiler: GridTiler::new(config.grid_size.max(1), config.background),
            scanner: StripScanner::new(config.background),
            stroke: Arc::new(StrokeProcessor::with_placeholder(detector)),
            config,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn tiler(&self) -> &GridTiler {
        &self.tiler
    }

    /// The block transform shared by every block of a stroke pass.
    pub fn stroke_processor(&self) -> Arc<StrokeProcessor> {
        Arc::clone(&self.stroke)
    }

    pub fn quantize(&self, grid: &PixelGrid) -> PixelGrid {
        let levels = self.config.levels;
        grid.map_pixels(|pixel| quantize_grey(pixel, levels))
    }

    pub fn run(&self, grid: &PixelGrid) -> Result<PixelGrid> {
        log::info!(
            "running {:?} pass on {}x{} grid",
            self.config.mode,
            grid.width(),
            grid.height()
        );
        let quantized = self.quantize(grid);
        let output = match self.config.mode {
            PipelineMode::Stroke => self
                .tiler
                .tile_transform(&quantized, |block| self.stroke.process(block))?,
            PipelineMode::Contrast => self.contrast(&quantized)?,
        };
        log::info!("pass finished with {}x{} output", output.width(), output.height());
        Ok(output)
    }

    /// Transition marking on an already quantized grid.
    pub fn contrast(&self, quantized: &PixelGrid) -> Result<PixelGrid> {
        let marker = |strip: &[Pixel]| mark_transitions(strip, two_band_grey);
        let columns = self.scanner.map_columns(quantized, marker)?;
        let rows = self.scanner.map_rows(quantized, marker)?;
        let merged = union(&columns, &rows, CONTRAST_UNION_TIE_BREAK)?;
        Ok(despeckle(&merged))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SketchError;

    #[test]
    fn rejects_bad_configuration_up_front() {
        let config = PipelineConfig {
            levels: 1,
            ..PipelineConfig::default()
        };
        assert!(matches!(
            SketchPipeline::new(config),
            Err(SketchError::InvalidLevels(1))
        ));

        let config = PipelineConfig {
            grid_size: 2,
            ..PipelineConfig::default()
        };
        assert!(matches!(
            SketchPipeline::new(config),
            Err(SketchError::InvalidGridSize { grid_size: 2, neighborhood: 3 })
        ));
    }

    #[test]
    fn contrast_mode_does_not_need_a_valid_grid_size() {
        let config = PipelineConfig {
            mode: PipelineMode::Contrast,
            grid_size: 1,
            ..PipelineConfig::default()
        };
        assert!(SketchPipeline::new(config).is_ok());
    }

    #[test]
    fn stroke_pass_crops_and_paints_placeholders() {
        let pipeline = SketchPipeline::new(PipelineConfig::default()).unwrap();
        let grid = PixelGrid::filled(12, 11, Pixel::new(180, 20, 60));
        let out = pipeline.run(&grid).unwrap();
        assert_eq!(out, PixelGrid::filled(10, 10, Pixel::NEUTRAL_GREY));
    }

    #[test]
    fn contrast_pass_traces_a_vertical_edge() {
        let config = PipelineConfig {
            mode: PipelineMode::Contrast,
            ..PipelineConfig::default()
        };
        let pipeline = SketchPipeline::new(config).unwrap();

        // Dark left half, light right half.
        let mut grid = PixelGrid::filled(6, 4, Pixel::grey(230));
        for x in 0..3 {
            for y in 0..4 {
                grid.set(x, y, Pixel::grey(20));
            }
        }

        let out = pipeline.run(&grid).unwrap();
        assert_eq!((out.width(), out.height()), (6, 4));
        for y in 0..4 {
            // The last dark pixel of every row survives the row scan.
            assert_eq!(out.get(2, y), Pixel::BLACK, "y={y}");
        }
        for y in 0..3 {
            for x in [0, 1, 3, 4] {
                assert_eq!(out.get(x, y), Pixel::WHITE, "x={x} y={y}");
            }
            // Tail of the row scan keeps its quantized light grey.
            assert_eq!(out.get(5, y), Pixel::grey(252), "y={y}");
        }
        // Bottom row holds the tails of the column scans.
        assert_eq!(out.get(0, 3), Pixel::BLACK);
        assert_eq!(out.get(4, 3), Pixel::grey(252));
    }
}
