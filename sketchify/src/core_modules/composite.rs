// THEORY:
// Whole-grid combinators used at the end of the contrast pass.
//
// - `union` overlays two equally sized maps pixel by pixel, keeping whichever
//   pixel is darker. Marked transitions are dark on a white field, so the union
//   keeps every transition found by either scan.
// - `despeckle` is the smoothing step: a non-white pixel with no non-white
//   4-neighbor is an isolated speck and is reset to white. It reads only its
//   input, so the result does not depend on scan order.

use crate::core_modules::color_ops::color_ops::{darker, TieBreak};
use crate::core_modules::pixel::pixel::Pixel;
use crate::core_modules::pixel_grid::PixelGrid;
use crate::error::{Result, SketchError};

pub fn union(one: &PixelGrid, two: &PixelGrid, tie: TieBreak) -> Result<PixelGrid> {
    if (one.width(), one.height()) != (two.width(), two.height()) {
        return Err(SketchError::BlockSizeMismatch {
            expected: one.width() as usize * one.height() as usize,
            found: two.width() as usize * two.height() as usize,
        });
    }

    let mut merged = PixelGrid::filled(one.width(), one.height(), Pixel::WHITE);
    for x in 0..one.width() {
        for y in 0..one.height() {
            merged.set(x, y, darker(one.get(x, y), two.get(x, y), tie));
        }
    }
    Ok(merged)
}

pub fn despeckle(grid: &PixelGrid) -> PixelGrid {
    let (width, height) = (grid.width() as i64, grid.height() as i64);
    let mut smoothed = grid.clone();

    for x in 0..width {
        for y in 0..height {
            if grid.get(x as u32, y as u32) == Pixel::WHITE {
                continue;
            }
            let isolated = [(0i64, 1i64), (0, -1), (1, 0), (-1, 0)].iter().all(|&(dx, dy)| {
                let (nx, ny) = (x + dx, y + dy);
                let in_bounds = nx >= 0 && nx < width && ny >= 0 && ny < height;
                !in_bounds || grid.get(nx as u32, ny as u32) == Pixel::WHITE
            });
            if isolated {
                smoothed.set(x as u32, y as u32, Pixel::WHITE);
            }
        }
    }
    smoothed
}
