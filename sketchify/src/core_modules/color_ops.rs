// THEORY:
// `ColorOps` holds the pure, single-pixel (or pixel-pair) color functions of the
// engine. Nothing here knows about grids or neighbors.
//
// Quantization maps a channel value onto one of `levels` bands:
//
//     round(value * (levels - 1) / 255) * (255 / (levels - 1))
//
// where the final division is integer (floor) division. When 255 is not a
// multiple of `levels - 1` the bands do not reach 255 and are not perfectly
// even (five levels give 0, 63, 126, 189, 252). That banding is part of the
// behavior: the two-level normalizer used for transition marking depends on it.
//
// `darker` picks the operand with the lower greyscale value. When both operands
// are equally bright the caller states which one wins through `TieBreak`;
// different stages of the engine want different answers.

pub mod color_ops {
    use crate::core_modules::pixel::pixel::{Channel, Pixel};
    use crate::error::{Result, SketchError};

    pub type Levels = u32;

    pub const MIN_LEVELS: Levels = 2;
    pub const MAX_LEVELS: Levels = 256;

    /// Which operand `darker` returns when both have the same greyscale value.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum TieBreak {
        PreferFirst,
        PreferSecond,
    }

    pub fn validate_levels(levels: Levels) -> Result<Levels> {
        if (MIN_LEVELS..=MAX_LEVELS).contains(&levels) {
            Ok(levels)
        } else {
            Err(SketchError::InvalidLevels(levels))
        }
    }

    pub fn greyscale(pixel: Pixel) -> Channel {
        pixel.greyscale()
    }

    /// Snaps a channel value onto the nearest of `levels` discrete bands.
    ///
    /// `levels` must already have passed `validate_levels`; a value below two is
    /// a division by zero.
    pub fn quantize_level(value: Channel, levels: Levels) -> Channel {
        debug_assert!((MIN_LEVELS..=MAX_LEVELS).contains(&levels));
        let steps = levels - 1;
        let band = (value as f64 * steps as f64 / 255.0).round() as u32;
        (band * (255 / steps)) as Channel
    }

    pub fn quantize_color(pixel: Pixel, levels: Levels) -> Pixel {
        Pixel::new(
            quantize_level(pixel.red, levels),
            quantize_level(pixel.green, levels),
            quantize_level(pixel.blue, levels),
        )
    }

    /// Reduces to greyscale first, then quantizes once.
    pub fn quantize_grey(pixel: Pixel, levels: Levels) -> Pixel {
        Pixel::grey(quantize_level(pixel.greyscale(), levels))
    }

    pub fn darker(one: Pixel, two: Pixel, tie: TieBreak) -> Pixel {
        let (grey_one, grey_two) = (one.greyscale(), two.greyscale());
        if grey_one < grey_two {
            one
        } else if grey_two < grey_one {
            two
        } else {
            match tie {
                TieBreak::PreferFirst => one,
                TieBreak::PreferSecond => two,
            }
        }
    }
}
