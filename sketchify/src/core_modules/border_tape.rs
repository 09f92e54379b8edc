// THEORY:
// The border tape codec turns the outer ring of a square block into a single
// circular sequence (the "tape") and back again.
//
// The ring is read as four edges, each oriented so that it starts where the
// previous one ended:
//
//     top    : (0, 0)     -> (k-1, 0)      along x
//     right  : (k-1, 0)   -> (k-1, k-1)    along y
//     bottom : (k-1, k-1) -> (0, k-1)      along x, reversed
//     left   : (0, k-1)   -> (0, 0)        along y, reversed
//
// Consecutive edges share their corner pixel. Linearizing drops the last pixel
// of every edge, so each corner lands on the tape exactly once and the tape is
// `4(k-1)` long. Delinearizing splits the tape into four equal runs and gives
// every run back its trailing corner by borrowing the first pixel of the next
// run (the fourth run borrows from the first). The two directions are exact
// inverses for every ring.

use crate::core_modules::block::block::Block;
use crate::core_modules::pixel::pixel::Pixel;
use crate::error::{Result, SketchError};

const EDGES: usize = 4;

/// The four oriented edges of a block's border ring, each `k` pixels long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Borders {
    pub top: Vec<Pixel>,
    pub right: Vec<Pixel>,
    pub bottom: Vec<Pixel>,
    pub left: Vec<Pixel>,
}

impl Borders {
    /// Side length of the block these edges came from.
    pub fn edge_len(&self) -> usize {
        self.top.len()
    }
}

/// A circular sequence of pixels. Every index is taken modulo the length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    pixels: Vec<Pixel>,
}

impl Tape {
    pub fn new(pixels: Vec<Pixel>) -> Self {
        Self { pixels }
    }

    /// A tape of `len` black pixels.
    pub fn black(len: usize) -> Self {
        Self::new(vec![Pixel::BLACK; len])
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Wraps any signed offset onto the tape.
    #[inline]
    pub fn circular_index(&self, index: isize) -> usize {
        index.rem_euclid(self.pixels.len() as isize) as usize
    }

    pub fn at(&self, index: isize) -> Pixel {
        self.pixels[self.circular_index(index)]
    }

    pub fn set(&mut self, index: usize, pixel: Pixel) {
        self.pixels[index] = pixel;
    }

    /// The `count` pixels starting at `start`, wrapping past either end.
    pub fn window(&self, start: isize, count: usize) -> Vec<Pixel> {
        (0..count as isize).map(|offset| self.at(start + offset)).collect()
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }
}

/// Reads the border ring of `block` as four oriented, corner-sharing edges.
pub fn extract_border(block: &Block) -> Borders {
    let last = block.size - 1;
    Borders {
        top: (0..block.size).map(|i| block.get(i, 0)).collect(),
        right: (0..block.size).map(|j| block.get(last, j)).collect(),
        bottom: (0..block.size).map(|i| block.get(last - i, last)).collect(),
        left: (0..block.size).map(|j| block.get(0, last - j)).collect(),
    }
}

pub fn linearize(borders: &Borders) -> Tape {
    let run = borders.edge_len().saturating_sub(1);
    let pixels = [&borders.top, &borders.right, &borders.bottom, &borders.left]
        .into_iter()
        .flat_map(|edge| edge[..run].iter().copied())
        .collect();
    Tape::new(pixels)
}

pub fn delinearize(tape: &Tape) -> Result<Borders> {
    if tape.len() % EDGES != 0 {
        return Err(SketchError::TapeLength(tape.len()));
    }
    let run = tape.len() / EDGES;
    let edge = |n: usize| -> Vec<Pixel> {
        let start = (n * run) as isize;
        // The trailing corner is the first pixel of the next run.
        tape.window(start, run + 1)
    };
    Ok(Borders {
        top: edge(0),
        right: edge(1),
        bottom: edge(2),
        left: edge(3),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A block whose every pixel encodes its own coordinate.
    fn coordinate_block(size: u32) -> Block {
        let mut block = Block::uniform(size, Pixel::BLACK);
        for x in 0..size {
            for y in 0..size {
                block.set(x, y, Pixel::new(x as u8, y as u8, 0));
            }
        }
        block
    }

    #[test]
    fn edges_share_their_corners() {
        let borders = extract_border(&coordinate_block(3));
        assert_eq!(
            borders.top,
            vec![Pixel::new(0, 0, 0), Pixel::new(1, 0, 0), Pixel::new(2, 0, 0)]
        );
        assert_eq!(
            borders.right,
            vec![Pixel::new(2, 0, 0), Pixel::new(2, 1, 0), Pixel::new(2, 2, 0)]
        );
        assert_eq!(
            borders.bottom,
            vec![Pixel::new(2, 2, 0), Pixel::new(1, 2, 0), Pixel::new(0, 2, 0)]
        );
        assert_eq!(
            borders.left,
            vec![Pixel::new(0, 2, 0), Pixel::new(0, 1, 0), Pixel::new(0, 0, 0)]
        );
    }

    #[test]
    fn tape_has_one_entry_per_ring_cell() {
        for size in 2..=9 {
            let tape = linearize(&extract_border(&coordinate_block(size)));
            assert_eq!(tape.len(), 4 * (size as usize - 1));
        }
    }

    #[test]
    fn tape_round_trips_to_borders() {
        for size in 2..=9 {
            let borders = extract_border(&coordinate_block(size));
            let restored = delinearize(&linearize(&borders)).unwrap();
            assert_eq!(restored, borders, "size={size}");
        }
    }

    #[test]
    fn rejects_tape_not_divisible_by_four() {
        let tape = Tape::black(6);
        assert!(matches!(delinearize(&tape), Err(SketchError::TapeLength(6))));
    }

    #[test]
    fn circular_index_wraps_both_ways() {
        let tape = Tape::new((0..6).map(Pixel::grey).collect());
        assert_eq!(tape.at(-1), Pixel::grey(5));
        assert_eq!(tape.at(7), Pixel::grey(1));
        assert_eq!(
            tape.window(-3, 3),
            vec![Pixel::grey(3), Pixel::grey(4), Pixel::grey(5)]
        );
    }
}
