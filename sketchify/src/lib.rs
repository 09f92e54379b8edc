// THEORY:
// This file is the main entry point for the `sketchify` library crate.
// It follows the standard Rust convention of using `lib.rs` to define the public
// API that will be exposed to external consumers (like the `sketch_tester` driver).
//
// The primary goal is to export `SketchPipeline`, `ParallelPipeline` and their
// configuration as the high-level interface of the engine. The core modules stay
// public so the individual stages (border tape, hot points, tiling) can be used
// and tested on their own.

pub mod core_modules;
pub mod error;
pub mod parallel_pipeline;
pub mod pipeline;

pub use crate::core_modules::pixel_grid::PixelGrid;
pub use crate::core_modules::utils::image_helper::image_helper::{load_pixel_grid, save_pixel_grid};
pub use crate::error::{Result, SketchError};
