// THEORY:
// The `HotPointDetector` is the analytical core of the stroke pipeline. It walks
// a block's border tape and asks, at every position, "how much brighter is the
// ring just before me than the ring just after me?"
//
// Algorithm:
// 1.  **Neighborhoods**: For tape index `i`, the left neighborhood is the `N`
//     pixels at `i-N .. i-1` and the right neighborhood the `N` pixels at
//     `i+1 .. i+N`, both wrapping around the tape. Each is summarized by its
//     per-channel mean (integer truncation, exactly `N` samples).
// 2.  **Discontinuity**: `greyscale(left) - greyscale(right)`. The sign matters:
//     only bright-to-dark transitions (walking the ring forward) rank high.
// 3.  **Ranking**: Positions are ordered by discontinuity, largest first. Ties go
//     to the lower index, so the result is fully deterministic.
// 4.  **Selection**: The top two positions are the hot points. Each block border
//     is assumed to be crossed by a sketch stroke at most twice.
// 5.  **Marking**: The output tape is black everywhere except the two hot points,
//     which carry the darker of their two neighborhood colors.
//
// The tape must be at least two neighborhoods long. Anything shorter is a
// configuration error and is rejected rather than degraded to fewer points.

use crate::core_modules::border_tape::Tape;
use crate::core_modules::color_ops::color_ops::{darker, TieBreak};
use crate::core_modules::pixel::pixel::Pixel;
use crate::error::{Result, SketchError};

pub type Discontinuity = i16;

pub const DEFAULT_NEIGHBORHOOD_SIZE: usize = 3;
pub const HOT_POINT_COUNT: usize = 2;

/// Left neighborhood wins when both sides are equally bright.
const HOT_POINT_TIE_BREAK: TieBreak = TieBreak::PreferFirst;

/// A fixed-size run of consecutive tape samples on one side of a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighborhood {
    samples: Vec<Pixel>,
}

impl Neighborhood {
    pub fn new(samples: Vec<Pixel>) -> Self {
        Self { samples }
    }

    /// Per-channel mean of the samples, truncated.
    pub fn average(&self) -> Pixel {
        let count = self.samples.len() as u32;
        if count == 0 {
            return Pixel::default();
        }
        let (mut sum_r, mut sum_g, mut sum_b) = (0u32, 0u32, 0u32);
        for pixel in &self.samples {
            sum_r += pixel.red as u32;
            sum_g += pixel.green as u32;
            sum_b += pixel.blue as u32;
        }
        Pixel::new(
            (sum_r / count) as u8,
            (sum_g / count) as u8,
            (sum_b / count) as u8,
        )
    }
}

/// One selected position on the tape with the colors that put it there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotPoint {
    pub index: usize,
    pub left_color: Pixel,
    pub right_color: Pixel,
    pub discontinuity: Discontinuity,
}

impl HotPoint {
    /// The color a hot point leaves on the output tape.
    pub fn stroke_color(&self) -> Pixel {
        darker(self.left_color, self.right_color, HOT_POINT_TIE_BREAK)
    }
}

#[derive(Debug, Clone)]
pub struct HotPointDetector {
    neighborhood_size: usize,
}

impl Default for HotPointDetector {
    fn default() -> Self {
        Self {
            neighborhood_size: DEFAULT_NEIGHBORHOOD_SIZE,
        }
    }
}

impl HotPointDetector {
    pub fn new(neighborhood_size: usize) -> Self {
        Self { neighborhood_size }
    }

    pub fn neighborhood_size(&self) -> usize {
        self.neighborhood_size
    }

    /// Shortest tape this detector accepts.
    pub fn min_tape_len(&self) -> usize {
        (HOT_POINT_COUNT * self.neighborhood_size).max(HOT_POINT_COUNT)
    }

    /// Checks that blocks of side `grid_size` produce a usable tape.
    pub fn validate_grid_size(&self, grid_size: u32) -> Result<()> {
        let tape_len = 4 * (grid_size as usize).saturating_sub(1);
        if tape_len < self.min_tape_len() {
            return Err(SketchError::InvalidGridSize {
                grid_size,
                neighborhood: self.neighborhood_size,
            });
        }
        Ok(())
    }

    pub fn left_neighborhood(&self, tape: &Tape, index: usize) -> Neighborhood {
        let start = index as isize - self.neighborhood_size as isize;
        Neighborhood::new(tape.window(start, self.neighborhood_size))
    }

    pub fn right_neighborhood(&self, tape: &Tape, index: usize) -> Neighborhood {
        Neighborhood::new(tape.window(index as isize + 1, self.neighborhood_size))
    }

    fn candidate(&self, tape: &Tape, index: usize) -> HotPoint {
        let left_color = self.left_neighborhood(tape, index).average();
        let right_color = self.right_neighborhood(tape, index).average();
        HotPoint {
            index,
            left_color,
            right_color,
            discontinuity: left_color.greyscale() as Discontinuity
                - right_color.greyscale() as Discontinuity,
        }
    }

    /// Ranks every tape position and returns the two strongest transitions.
    pub fn detect(&self, tape: &Tape) -> Result<[HotPoint; HOT_POINT_COUNT]> {
        if tape.len() < self.min_tape_len() {
            return Err(SketchError::InvalidGridSize {
                grid_size: (tape.len() / 4 + 1) as u32,
                neighborhood: self.neighborhood_size,
            });
        }

        let mut ranked: Vec<HotPoint> = (0..tape.len()).map(|i| self.candidate(tape, i)).collect();
        // Stable sort keeps ascending index order among equal discontinuities.
        ranked.sort_by(|a, b| b.discontinuity.cmp(&a.discontinuity));

        Ok([ranked[0], ranked[1]])
    }

    /// Builds the output tape: black, except for the two hot points.
    pub fn mark(&self, tape: &Tape) -> Result<Tape> {
        let hot_points = self.detect(tape)?;
        log::trace!(
            "hot points at {} and {} (discontinuity {} / {})",
            hot_points[0].index,
            hot_points[1].index,
            hot_points[0].discontinuity,
            hot_points[1].discontinuity
        );

        let mut marked = Tape::black(tape.len());
        for hot_point in &hot_points {
            marked.set(hot_point.index, hot_point.stroke_color());
        }
        Ok(marked)
    }
}
