// THEORY:
// The `Pixel` module is the most fundamental unit of the sketch engine. It is a
// "dumb" data container for a single RGB triple. Alpha never makes it this far;
// the image loader discards it.
//
// The only heuristic that lives here is `greyscale`: the plain arithmetic mean of
// the three channels, truncated toward zero. It is not a perceptual luma. The
// truncation biases every comparison slightly toward dark, and the quantization
// banding and hot-point ranking downstream are tuned against exactly that bias,
// so it must stay integer math.

pub mod pixel {
    pub type Byte = u8;
    pub type Bytes = Vec<Byte>;
    pub type Channel = Byte;
    pub type Grey = Byte;

    const CHANNELS: usize = 3;

    /// A "dumb" data container representing a single RGB pixel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Pixel {
        /// The red channel value (0-255).
        pub red: Channel,
        /// The green channel value (0-255).
        pub green: Channel,
        /// The blue channel value (0-255).
        pub blue: Channel,
    }

    impl Pixel {
        pub const BLACK: Pixel = Pixel::new(0, 0, 0);
        pub const WHITE: Pixel = Pixel::new(255, 255, 255);
        pub const NEUTRAL_GREY: Pixel = Pixel::new(127, 127, 127);

        pub const fn new(red: Channel, green: Channel, blue: Channel) -> Self {
            Pixel { red, green, blue }
        }

        pub const fn grey(value: Grey) -> Self {
            Pixel::new(value, value, value)
        }

        /// Arithmetic mean of the channels, truncated.
        pub fn greyscale(&self) -> Grey {
            ((self.red as u16 + self.green as u16 + self.blue as u16) / CHANNELS as u16) as Grey
        }
    }

    impl From<&[Byte]> for Pixel {
        fn from(bytes: &[Byte]) -> Self {
            if bytes.len() != CHANNELS {
                panic!("Cannot convert {} bytes into pixel.", bytes.len());
            }
            Pixel::new(bytes[0], bytes[1], bytes[2])
        }
    }

    impl From<Pixel> for Bytes {
        fn from(pixel: Pixel) -> Self {
            vec![pixel.red, pixel.green, pixel.blue]
        }
    }

    impl From<image::Rgb<u8>> for Pixel {
        fn from(rgb: image::Rgb<u8>) -> Self {
            let [red, green, blue] = rgb.0;
            Pixel::new(red, green, blue)
        }
    }

    impl From<Pixel> for image::Rgb<u8> {
        fn from(pixel: Pixel) -> Self {
            image::Rgb([pixel.red, pixel.green, pixel.blue])
        }
    }
}
