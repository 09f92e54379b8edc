// THEORY:
// The `StripScanner` applies a one-dimensional transform to every full row or
// every full column of a grid, independently. It powers the contrast pass, which
// flags brightness transitions between adjacent pixels along a single axis.
//
// `mark_transitions` is that 1-D transform. It walks adjacent pairs left to
// right and keeps only the brighter side of every change:
//
//     equal pair     -> the left pixel becomes white
//     left brighter  -> the left pixel keeps its color
//     right brighter -> the right pixel keeps its color
//
// Writes happen in walk order, so a pixel kept by one pair can still be
// whitened by the next pair. The last pixel is only ever written as the right
// side of a pair.

use crate::core_modules::color_ops::color_ops::{quantize_level, Levels};
use crate::core_modules::pixel::pixel::{Grey, Pixel};
use crate::core_modules::pixel_grid::PixelGrid;
use crate::error::{Result, SketchError};

/// Band count of the default transition normalizer.
pub const TRANSITION_LEVELS: Levels = 2;

pub type Strip = Vec<Pixel>;

/// Greyscale snapped to two bands; the normalizer the contrast pass uses.
pub fn two_band_grey(pixel: Pixel) -> Grey {
    quantize_level(pixel.greyscale(), TRANSITION_LEVELS)
}

pub fn mark_transitions<N>(strip: &[Pixel], normalize: N) -> Strip
where
    N: Fn(Pixel) -> Grey,
{
    let mut marked = strip.to_vec();
    for i in 0..strip.len().saturating_sub(1) {
        let current = normalize(strip[i]);
        let next = normalize(strip[i + 1]);

        if current == next {
            marked[i] = Pixel::WHITE;
        } else if current > next {
            marked[i] = strip[i];
        } else {
            marked[i + 1] = strip[i + 1];
        }
    }
    marked
}

#[derive(Debug, Clone)]
pub struct StripScanner {
    background: Pixel,
}

impl StripScanner {
    pub fn new(background: Pixel) -> Self {
        Self { background }
    }

    /// Applies `strip_fn` to every column (top to bottom).
    pub fn map_columns<F>(&self, grid: &PixelGrid, strip_fn: F) -> Result<PixelGrid>
    where
        F: Fn(&[Pixel]) -> Strip,
    {
        let mut arena = PixelGrid::filled(grid.width(), grid.height(), self.background);
        for x in 0..grid.width() {
            let processed = Self::checked(strip_fn(grid.column(x).as_slice()), grid.height())?;
            for (y, pixel) in (0..grid.height()).zip(processed) {
                arena.set(x, y, pixel);
            }
        }
        log::debug!("scanned {} columns", grid.width());
        Ok(arena)
    }

    /// Applies `strip_fn` to every row (left to right).
    pub fn map_rows<F>(&self, grid: &PixelGrid, strip_fn: F) -> Result<PixelGrid>
    where
        F: Fn(&[Pixel]) -> Strip,
    {
        let mut arena = PixelGrid::filled(grid.width(), grid.height(), self.background);
        for y in 0..grid.height() {
            let processed = Self::checked(strip_fn(grid.row(y).as_slice()), grid.width())?;
            for (x, pixel) in (0..grid.width()).zip(processed) {
                arena.set(x, y, pixel);
            }
        }
        log::debug!("scanned {} rows", grid.height());
        Ok(arena)
    }

    fn checked(strip: Strip, expected: u32) -> Result<Strip> {
        if strip.len() != expected as usize {
            return Err(SketchError::BlockSizeMismatch {
                expected: expected as usize,
                found: strip.len(),
            });
        }
        Ok(strip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DARK: Pixel = Pixel::new(20, 20, 20);
    const LIGHT: Pixel = Pixel::new(230, 230, 230);

    #[test]
    fn flat_runs_turn_white_except_the_tail() {
        let marked = mark_transitions(&[DARK, DARK, DARK], two_band_grey);
        assert_eq!(marked, vec![Pixel::WHITE, Pixel::WHITE, DARK]);
    }

    #[test]
    fn keeps_the_brighter_side_of_a_change() {
        // light -> dark: left kept, then dark == dark whitens index 1.
        let marked = mark_transitions(&[LIGHT, DARK, DARK], two_band_grey);
        assert_eq!(marked, vec![LIGHT, Pixel::WHITE, DARK]);

        // dark -> light: right kept, then overwritten by the equal pair after it.
        let marked = mark_transitions(&[DARK, LIGHT, LIGHT], two_band_grey);
        assert_eq!(marked, vec![DARK, Pixel::WHITE, LIGHT]);
    }

    #[test]
    fn tiny_strips_pass_through() {
        assert!(mark_transitions(&[], two_band_grey).is_empty());
        assert_eq!(mark_transitions(&[DARK], two_band_grey), vec![DARK]);
    }

    #[test]
    fn columns_and_rows_are_scanned_independently() {
        let mut grid = PixelGrid::filled(3, 2, DARK);
        grid.set(0, 0, LIGHT);
        let scanner = StripScanner::new(Pixel::NEUTRAL_GREY);

        let reversed = |strip: &[Pixel]| strip.iter().rev().copied().collect::<Strip>();

        let columns = scanner.map_columns(&grid, reversed).unwrap();
        assert_eq!(columns.get(0, 1), LIGHT);
        assert_eq!(columns.get(0, 0), DARK);

        let rows = scanner.map_rows(&grid, reversed).unwrap();
        assert_eq!(rows.get(2, 0), LIGHT);
        assert_eq!(rows.get(0, 0), DARK);
    }

    #[test]
    fn rejects_strips_of_the_wrong_length() {
        let grid = PixelGrid::filled(3, 2, DARK);
        let scanner = StripScanner::new(Pixel::NEUTRAL_GREY);
        let result = scanner.map_rows(&grid, |strip: &[Pixel]| strip[1..].to_vec());
        assert!(matches!(
            result,
            Err(SketchError::BlockSizeMismatch { expected: 3, found: 2 })
        ));
    }
}
