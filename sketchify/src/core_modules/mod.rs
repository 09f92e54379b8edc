pub mod block;
pub mod block_renderer;
pub mod border_tape;
pub mod color_ops;
pub mod composite;
pub mod grid_tiler;
pub mod hot_points;
pub mod pixel;
pub mod pixel_grid;
pub mod strip_scanner;
pub mod stroke;
pub mod utils;
