// THEORY:
// `PixelGrid` is the 2-D table of `Pixel`s that every stage of the engine reads
// and produces. It is indexed `[x][y]`, column-major: the pixels of one column
// are contiguous, so `column(x)` is a plain slice copy and the column strip scan
// is the cache-friendly one.
//
// Key architectural principles:
// 1.  **Value Semantics**: Transforms return a new grid. The only grid that is
//     mutated in place is the private output buffer of a tiling or strip pass.
// 2.  **No Clamping**: `get`/`set` outside the grid is a programming error and
//     panics with the offending coordinate. Nothing is silently clamped.
// 3.  **Image Bridge**: Conversions to and from `image::RgbImage` sit here so the
//     rest of the engine never sees the `image` crate's types.

use crate::core_modules::pixel::pixel::Pixel;
use image::RgbImage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    /// Column-major storage: index `x * height + y`.
    pixels: Vec<Pixel>,
}

impl PixelGrid {
    /// Creates a grid of the given size, every pixel set to `fill`.
    pub fn filled(width: u32, height: u32, fill: Pixel) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        if x >= self.width || y >= self.height {
            panic!(
                "Pixel ({}, {}) is outside a {}x{} grid.",
                x, y, self.width, self.height
            );
        }
        x as usize * self.height as usize + y as usize
    }

    pub fn get(&self, x: u32, y: u32) -> Pixel {
        self.pixels[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, pixel: Pixel) {
        let index = self.index(x, y);
        self.pixels[index] = pixel;
    }

    /// Copies column `x` top to bottom.
    pub fn column(&self, x: u32) -> Vec<Pixel> {
        let start = self.index(x, 0);
        self.pixels[start..start + self.height as usize].to_vec()
    }

    /// Copies row `y` left to right.
    pub fn row(&self, y: u32) -> Vec<Pixel> {
        (0..self.width).map(|x| self.get(x, y)).collect()
    }

    /// Applies `f` to every pixel, producing a new grid of the same size.
    pub fn map_pixels<F>(&self, f: F) -> PixelGrid
    where
        F: Fn(Pixel) -> Pixel,
    {
        Self {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(|&p| f(p)).collect(),
        }
    }

    /// Copies the `size`x`size` square whose top-left corner is `(x, y)`.
    pub fn square(&self, x: u32, y: u32, size: u32) -> PixelGrid {
        let mut square = PixelGrid::filled(size, size, Pixel::default());
        for i in 0..size {
            for j in 0..size {
                square.set(i, j, self.get(x + i, y + j));
            }
        }
        square
    }

    /// Writes `patch` into this grid with its top-left corner at `(x, y)`.
    pub fn paste(&mut self, patch: &PixelGrid, x: u32, y: u32) {
        for i in 0..patch.width {
            for j in 0..patch.height {
                self.set(x + i, y + j, patch.get(i, j));
            }
        }
    }
}

impl From<&RgbImage> for PixelGrid {
    fn from(image: &RgbImage) -> Self {
        let (width, height) = image.dimensions();
        let mut grid = PixelGrid::filled(width, height, Pixel::default());
        for (x, y, rgb) in image.enumerate_pixels() {
            grid.set(x, y, Pixel::from(*rgb));
        }
        grid
    }
}

impl From<&PixelGrid> for RgbImage {
    fn from(grid: &PixelGrid) -> Self {
        RgbImage::from_fn(grid.width, grid.height, |x, y| grid.get(x, y).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_what_set_stored() {
        let mut grid = PixelGrid::filled(4, 3, Pixel::BLACK);
        grid.set(3, 2, Pixel::WHITE);
        assert_eq!(grid.get(3, 2), Pixel::WHITE);
        assert_eq!(grid.get(2, 2), Pixel::BLACK);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
    }

    #[test]
    #[should_panic(expected = "outside a 4x3 grid")]
    fn out_of_range_access_panics() {
        let grid = PixelGrid::filled(4, 3, Pixel::BLACK);
        let _ = grid.get(0, 3);
    }

    #[test]
    fn rows_and_columns_read_in_axis_order() {
        let mut grid = PixelGrid::filled(3, 2, Pixel::BLACK);
        for x in 0..3 {
            for y in 0..2 {
                grid.set(x, y, Pixel::grey((x * 10 + y) as u8));
            }
        }
        assert_eq!(grid.column(1), vec![Pixel::grey(10), Pixel::grey(11)]);
        assert_eq!(grid.row(1), vec![Pixel::grey(1), Pixel::grey(11), Pixel::grey(21)]);
    }

    #[test]
    fn square_and_paste_are_inverse() {
        let mut grid = PixelGrid::filled(6, 6, Pixel::BLACK);
        grid.set(3, 4, Pixel::WHITE);
        let square = grid.square(2, 2, 3);
        assert_eq!(square.get(1, 2), Pixel::WHITE);

        let mut target = PixelGrid::filled(6, 6, Pixel::BLACK);
        target.paste(&square, 2, 2);
        assert_eq!(target, grid);
    }

    #[test]
    fn converts_through_rgb_image() {
        let mut grid = PixelGrid::filled(2, 3, Pixel::new(1, 2, 3));
        grid.set(1, 2, Pixel::new(9, 8, 7));
        let image = RgbImage::from(&grid);
        assert_eq!(image.dimensions(), (2, 3));
        assert_eq!(image.get_pixel(1, 2).0, [9, 8, 7]);
        assert_eq!(PixelGrid::from(&image), grid);
    }
}
