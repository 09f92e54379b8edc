pub mod image_helper {
    use crate::core_modules::pixel_grid::PixelGrid;
    use crate::error::{Result, SketchError};
    use image::RgbImage;
    use std::path::Path;

    /// Opens any raster `image` can decode and drops its alpha channel.
    pub fn load_pixel_grid(path: &Path) -> Result<PixelGrid> {
        let image = image::open(path)
            .map_err(|source| SketchError::ImageLoad {
                path: path.to_path_buf(),
                source,
            })?
            .into_rgb8();
        Ok(PixelGrid::from(&image))
    }

    /// Writes `grid` pixel-for-pixel as RGB8; the format follows the extension.
    pub fn save_pixel_grid(grid: &PixelGrid, path: &Path) -> Result<()> {
        RgbImage::from(grid)
            .save(path)
            .map_err(|source| SketchError::ImageSave {
                path: path.to_path_buf(),
                source,
            })
    }
}
