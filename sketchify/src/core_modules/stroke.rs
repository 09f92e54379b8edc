// THEORY:
// `StrokeProcessor` is the block transform the stroke pipeline hands to the tiler.
// It chains the core stages for one block:
//
//     extract_border -> linearize -> HotPointDetector::mark -> delinearize -> render
//
// It holds no per-block state, so one processor is shared by every block of a
// pass, and across worker tasks in the parallel pipeline.

use crate::core_modules::block::block::Block;
use crate::core_modules::block_renderer::{BlockRenderer, PlaceholderRenderer};
use crate::core_modules::border_tape::{delinearize, extract_border, linearize};
use crate::core_modules::hot_points::HotPointDetector;
use crate::error::Result;

pub struct StrokeProcessor {
    detector: HotPointDetector,
    renderer: Box<dyn BlockRenderer>,
}

impl StrokeProcessor {
    pub fn new(detector: HotPointDetector, renderer: Box<dyn BlockRenderer>) -> Self {
        Self { detector, renderer }
    }

    pub fn with_placeholder(detector: HotPointDetector) -> Self {
        Self::new(detector, Box::new(PlaceholderRenderer::default()))
    }

    pub fn process(&self, block: &Block) -> Result<Block> {
        let borders = extract_border(block);
        let tape = linearize(&borders);
        let marked = self.detector.mark(&tape)?;
        let marked_borders = delinearize(&marked)?;
        Ok(self.renderer.render(&marked_borders))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::pixel::pixel::Pixel;

    #[test]
    fn renders_a_neutral_block_of_the_same_size() {
        let processor = StrokeProcessor::with_placeholder(HotPointDetector::default());
        let mut block = Block::uniform(5, Pixel::WHITE);
        block.set(0, 0, Pixel::BLACK);
        block.set(4, 2, Pixel::BLACK);

        let out = processor.process(&block).unwrap();
        assert_eq!(out, Block::uniform(5, Pixel::NEUTRAL_GREY));
    }

    #[test]
    fn surfaces_undersized_blocks() {
        let processor = StrokeProcessor::with_placeholder(HotPointDetector::default());
        assert!(processor.process(&Block::uniform(2, Pixel::WHITE)).is_err());
    }
}
