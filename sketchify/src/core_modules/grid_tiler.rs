// THEORY:
// The `GridTiler` is the orchestrator of the block layer. It slices a grid into
// non-overlapping `k`x`k` blocks, hands each one to a block transform, and
// reassembles the results into a fresh output grid.
//
// Key architectural principles:
// 1.  **Orchestration**: It is not an analyzer itself. It knows block geometry and
//     nothing about what the transform does with a block.
// 2.  **Remainder Policy**: Output dimensions are `floor(w/k)*k` by `floor(h/k)*k`.
//     Columns and rows that do not fill a whole block are dropped, never padded.
// 3.  **Independence**: Blocks share no state. Origins are visited x-major (every
//     block of a column of blocks before moving right), but any order, or any
//     number of workers, produces the same output.
// 4.  **Private Arena**: The output grid is pre-filled with the background color
//     and is the only mutable buffer of the pass. Nobody else holds it until the
//     pass returns.

use crate::core_modules::block::block::Block;
use crate::core_modules::pixel::pixel::Pixel;
use crate::core_modules::pixel_grid::PixelGrid;
use crate::error::{Result, SketchError};

/// Top-left pixel coordinate of one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockOrigin {
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Clone)]
pub struct GridTiler {
    /// The side length of a block in pixels.
    grid_size: u32,
    /// Color of the output arena before any block is written.
    background: Pixel,
}

impl GridTiler {
    pub fn new(grid_size: u32, background: Pixel) -> Self {
        assert!(grid_size > 0, "Grid size must be positive.");
        Self {
            grid_size,
            background,
        }
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Output dimensions after dropping the partial blocks.
    pub fn output_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        (
            (width / self.grid_size) * self.grid_size,
            (height / self.grid_size) * self.grid_size,
        )
    }

    /// Every block origin of a `width`x`height` grid, x-major.
    pub fn block_origins(&self, width: u32, height: u32) -> Vec<BlockOrigin> {
        let (new_width, new_height) = self.output_dimensions(width, height);
        let step = self.grid_size as usize;
        (0..new_width)
            .step_by(step)
            .flat_map(|x| (0..new_height).step_by(step).map(move |y| BlockOrigin { x, y }))
            .collect()
    }

    /// A background-filled arena sized for the tiled output of `grid`.
    pub fn output_arena(&self, grid: &PixelGrid) -> PixelGrid {
        let (new_width, new_height) = self.output_dimensions(grid.width(), grid.height());
        PixelGrid::filled(new_width, new_height, self.background)
    }

    pub fn extract(&self, grid: &PixelGrid, origin: BlockOrigin) -> Block {
        Block::from_grid(grid, origin.x, origin.y, self.grid_size)
    }

    /// Pastes a processed block, rejecting one of the wrong size.
    pub fn write_back(&self, arena: &mut PixelGrid, origin: BlockOrigin, block: &Block) -> Result<()> {
        if block.size != self.grid_size {
            return Err(SketchError::BlockSizeMismatch {
                expected: self.grid_size as usize,
                found: block.size as usize,
            });
        }
        block.paste_into(arena, origin.x, origin.y);
        Ok(())
    }

    /// Applies `block_fn` to every whole block of `grid` and reassembles the result.
    pub fn tile_transform<F>(&self, grid: &PixelGrid, mut block_fn: F) -> Result<PixelGrid>
    where
        F: FnMut(&Block) -> Result<Block>,
    {
        let mut arena = self.output_arena(grid);
        let origins = self.block_origins(grid.width(), grid.height());
        log::debug!(
            "tiling {}x{} grid into {} blocks of {}",
            grid.width(),
            grid.height(),
            origins.len(),
            self.grid_size
        );

        for origin in origins {
            let block = self.extract(grid, origin);
            let processed = block_fn(&block)?;
            self.write_back(&mut arena, origin, &processed)?;
        }

        Ok(arena)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_black_blocks_cover_a_divisible_grid() {
        let grid = PixelGrid::filled(10, 10, Pixel::grey(200));
        let tiler = GridTiler::new(5, Pixel::NEUTRAL_GREY);
        let out = tiler
            .tile_transform(&grid, |block| Ok(Block::uniform(block.size, Pixel::BLACK)))
            .unwrap();
        assert_eq!(out, PixelGrid::filled(10, 10, Pixel::BLACK));
    }

    #[test]
    fn drops_the_remainder_strip() {
        let grid = PixelGrid::filled(13, 7, Pixel::WHITE);
        let tiler = GridTiler::new(5, Pixel::NEUTRAL_GREY);
        let mut calls = 0;
        let out = tiler
            .tile_transform(&grid, |block| {
                calls += 1;
                Ok(block.clone())
            })
            .unwrap();
        assert_eq!(calls, 2);
        assert_eq!((out.width(), out.height()), (10, 5));
        assert_eq!(out, PixelGrid::filled(10, 5, Pixel::WHITE));
    }

    #[test]
    fn visits_origins_x_major() {
        let tiler = GridTiler::new(2, Pixel::NEUTRAL_GREY);
        let origins: Vec<(u32, u32)> = tiler
            .block_origins(4, 5)
            .into_iter()
            .map(|o| (o.x, o.y))
            .collect();
        assert_eq!(origins, vec![(0, 0), (0, 2), (2, 0), (2, 2)]);
    }

    #[test]
    fn blocks_stay_in_place() {
        let mut grid = PixelGrid::filled(6, 6, Pixel::WHITE);
        grid.set(4, 1, Pixel::BLACK);
        let tiler = GridTiler::new(3, Pixel::NEUTRAL_GREY);
        let out = tiler.tile_transform(&grid, |block| Ok(block.clone())).unwrap();
        assert_eq!(out, grid);
    }

    #[test]
    fn rejects_wrongly_sized_results() {
        let grid = PixelGrid::filled(6, 6, Pixel::WHITE);
        let tiler = GridTiler::new(3, Pixel::NEUTRAL_GREY);
        let result = tiler.tile_transform(&grid, |_| Ok(Block::uniform(2, Pixel::BLACK)));
        assert!(matches!(
            result,
            Err(SketchError::BlockSizeMismatch { expected: 3, found: 2 })
        ));
    }

    #[test]
    fn grid_smaller_than_a_block_yields_an_empty_grid() {
        let grid = PixelGrid::filled(4, 9, Pixel::WHITE);
        let tiler = GridTiler::new(5, Pixel::NEUTRAL_GREY);
        let out = tiler.tile_transform(&grid, |block| Ok(block.clone())).unwrap();
        assert_eq!((out.width(), out.height()), (0, 5));
    }
}
