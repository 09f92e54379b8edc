// THEORY:
// Every fallible operation in the engine reports through a single `SketchError`.
// The failures fall into three families:
// 1.  **I/O**: the image collaborator could not read or write a raster file.
// 2.  **Configuration**: a grid size or level count that the algorithms cannot
//     work with. These are caught by `PipelineConfig::validate` before a single
//     pixel is touched.
// 3.  **Contract**: a transform handed back data of the wrong shape, or the
//     worker pool lost a task.
//
// Out-of-range pixel access is deliberately NOT in this list. It is a bug in the
// caller and panics at the access site.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, SketchError>;

#[derive(Debug, thiserror::Error)]
pub enum SketchError {
    /// The input raster could not be opened or decoded.
    #[error("failed to load image {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The output raster could not be encoded or written.
    #[error("failed to save image {path}: {source}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Quantization needs at least two levels and at most one per byte value.
    #[error("quantization levels must be within [2, 256], got {0}")]
    InvalidLevels(u32),

    /// The block border is too short to hold two non-overlapping neighborhoods.
    #[error("grid size {grid_size} gives a tape shorter than two neighborhoods of {neighborhood}")]
    InvalidGridSize { grid_size: u32, neighborhood: usize },

    #[error("tape length {0} is not divisible into four border edges")]
    TapeLength(usize),

    /// A block or strip transform returned data of the wrong dimensions.
    #[error("expected a result of size {expected}, got {found}")]
    BlockSizeMismatch { expected: usize, found: usize },

    #[error("worker pool failure: {0}")]
    WorkerPool(&'static str),
}
