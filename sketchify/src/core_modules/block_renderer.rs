// THEORY:
// A `BlockRenderer` turns a (hot-pointed) border ring back into a full block for
// the tiler to paste into the output image.
//
// The only renderer shipped is the placeholder: it reads nothing from the ring
// but its length and paints a uniform neutral-grey canvas of the matching size.
// The stroke between the two hot points is never drawn into interior pixels.
// A line-drawing renderer that connects the hot points would implement the same
// trait and slot into `StrokeProcessor` without touching the rest of the pipeline.

use crate::core_modules::block::block::Block;
use crate::core_modules::border_tape::Borders;
use crate::core_modules::pixel::pixel::Pixel;

pub trait BlockRenderer: Send + Sync {
    fn render(&self, borders: &Borders) -> Block;
}

/// Emits a flat block of one color, sized from the border edges.
#[derive(Debug, Clone)]
pub struct PlaceholderRenderer {
    pub fill: Pixel,
}

impl Default for PlaceholderRenderer {
    fn default() -> Self {
        Self {
            fill: Pixel::NEUTRAL_GREY,
        }
    }
}

impl BlockRenderer for PlaceholderRenderer {
    fn render(&self, borders: &Borders) -> Block {
        Block::uniform(borders.edge_len() as u32, self.fill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_ignores_border_content() {
        let borders = Borders {
            top: vec![Pixel::WHITE; 4],
            right: vec![Pixel::BLACK; 4],
            bottom: vec![Pixel::WHITE; 4],
            left: vec![Pixel::BLACK; 4],
        };
        let block = PlaceholderRenderer::default().render(&borders);
        assert_eq!(block, Block::uniform(4, Pixel::NEUTRAL_GREY));
    }
}
