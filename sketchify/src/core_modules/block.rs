// THEORY:
// The `Block` module represents one square tile of the image. It is the unit the
// tiler hands to a block transform and the unit the transform hands back.
//
// Key architectural principles:
// 1.  **Square Only**: A block is always `size`x`size`. Partial tiles at the right
//     or bottom edge of an image are never formed; the tiler drops them.
// 2.  **Data Container**: Like `Pixel`, `Block` is a "dumb" container. It knows
//     its size and its pixels. Reading its border ring is the job of the border
//     tape codec.
// 3.  **Transient**: A block lives for exactly one block-transform invocation.

pub mod block {
    use crate::core_modules::pixel::pixel::Pixel;
    use crate::core_modules::pixel_grid::PixelGrid;

    /// A square tile of pixels, indexed `[x][y]` like the grid it came from.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Block {
        /// The side length of the block in pixels.
        pub size: u32,
        pixels: PixelGrid,
    }

    impl Block {
        /// Builds a block filled with a single color.
        pub fn uniform(size: u32, fill: Pixel) -> Self {
            Self {
                size,
                pixels: PixelGrid::filled(size, size, fill),
            }
        }

        /// Cuts the block whose top-left corner is `(x, y)` out of `grid`.
        pub fn from_grid(grid: &PixelGrid, x: u32, y: u32, size: u32) -> Self {
            Self {
                size,
                pixels: grid.square(x, y, size),
            }
        }

        pub fn get(&self, x: u32, y: u32) -> Pixel {
            self.pixels.get(x, y)
        }

        pub fn set(&mut self, x: u32, y: u32, pixel: Pixel) {
            self.pixels.set(x, y, pixel);
        }

        /// Writes this block into `grid` with its top-left corner at `(x, y)`.
        pub fn paste_into(&self, grid: &mut PixelGrid, x: u32, y: u32) {
            grid.paste(&self.pixels, x, y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::block::Block;
    use crate::core_modules::pixel::pixel::Pixel;
    use crate::core_modules::pixel_grid::PixelGrid;

    #[test]
    fn cuts_and_pastes_at_origin() {
        let mut grid = PixelGrid::filled(10, 10, Pixel::BLACK);
        grid.set(6, 7, Pixel::WHITE);

        let block = Block::from_grid(&grid, 5, 5, 5);
        assert_eq!(block.size, 5);
        assert_eq!(block.get(1, 2), Pixel::WHITE);

        let mut out = PixelGrid::filled(10, 10, Pixel::BLACK);
        block.paste_into(&mut out, 5, 5);
        assert_eq!(out.get(6, 7), Pixel::WHITE);
    }
}
