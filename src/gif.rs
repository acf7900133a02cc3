
use std::default::Default;



pub mod blocks;
pub mod encoder;
pub mod errors;
pub mod lzw;
pub mod palette;
pub mod pixels;
pub mod quantizer;
pub mod sink;
pub mod validators;



pub use self::encoder::{encode, Encoder};


/// Disposal method codes
pub mod disposal {
    /// No action required
    pub const UNSPECIFIED: u8 = 0;
    /// Leave the frame in place
    pub const KEEP: u8 = 1;
    /// Restore the frame area to the background color
    pub const BACKGROUND: u8 = 2;
    /// Restore the frame area to its previous content
    pub const PREVIOUS: u8 = 3;
}


#[derive(Clone, Debug)]
pub struct Document {
    pub width: u32,
    pub height: u32,
    /// `Some(0)` loops forever; `None` writes no loop extension
    pub loop_count: Option<u16>,
    pub comment: Option<String>,
    /// Quantizer sample factor (1 = best)
    pub quality: u32,
    /// Fallbacks for values a frame leaves unset
    pub defaults: FrameDefaults,
    pub frames: Vec<Frame>,
}

#[derive(Clone, Debug, Default)]
pub struct Frame {
    /// RGBA, width * height * 4 bytes
    pub pixels: Vec<u8>,
    pub left: Option<u32>,
    pub top: Option<u32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub disposal: Option<u8>,
    /// In hundredths of a second
    pub delay: Option<u32>,
    pub transparent: Option<Rgb>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FrameDefaults {
    pub left: Option<u32>,
    pub top: Option<u32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub disposal: Option<u8>,
    pub delay: Option<u32>,
    pub transparent: Option<Rgb>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}


impl Document {
    pub fn new(width: u32, height: u32) -> Self {
        Document {
            width,
            height,
            loop_count: None,
            comment: None,
            quality: quantizer::DEFAULT_QUALITY,
            defaults: FrameDefaults::default(),
            frames: vec![],
        }
    }

    pub fn add_frame(&mut self, frame: Frame) -> &mut Self {
        self.frames.push(frame);
        self
    }

    pub fn set_comment(&mut self, comment: &str) -> &mut Self {
        self.comment = Some(comment.to_owned());
        self
    }

    /// Rounded to hundredths of a second.
    pub fn set_delay_millis(&mut self, milliseconds: u32) -> &mut Self {
        self.defaults.delay = Some(milliseconds.saturating_add(5) / 10);
        self
    }

    pub fn set_dispose(&mut self, code: u8) -> &mut Self {
        self.defaults.disposal = Some(code);
        self
    }

    /// Ignored unless `fps` is positive.
    pub fn set_frame_rate(&mut self, fps: f64) -> &mut Self {
        if fps > 0.0 {
            self.defaults.delay = Some((100.0 / fps).round() as u32);
        }
        self
    }

    /// Lower is better and slower; clamped to at least 1.
    pub fn set_quality(&mut self, quality: u32) -> &mut Self {
        self.quality = quality.max(1);
        self
    }

    pub fn set_repeat(&mut self, loop_count: u16) -> &mut Self {
        self.loop_count = Some(loop_count);
        self
    }

    pub fn set_transparent(&mut self, color: Option<Rgb>) -> &mut Self {
        self.defaults.transparent = color;
        self
    }
}

impl Frame {
    pub fn new(pixels: Vec<u8>) -> Self {
        Frame { pixels, ..Default::default() }
    }
}

impl Rgb {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Rgb { red, green, blue }
    }

    /// From `0xRRGGBB`; higher bits are ignored.
    pub fn from_u32(value: u32) -> Self {
        Rgb {
            red: (value >> 16) as u8,
            green: (value >> 8) as u8,
            blue: value as u8,
        }
    }
}



#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_from_u32() {
        assert_eq!(Rgb::from_u32(0x12_34_56), Rgb::new(0x12, 0x34, 0x56));
        assert_eq!(Rgb::from_u32(0xFF00_00FF), Rgb::new(0, 0, 0xFF));
    }

    #[test]
    fn test_delay_setters() {
        let mut document = Document::new(1, 1);
        document.set_delay_millis(125);
        assert_eq!(document.defaults.delay, Some(13));
        document.set_frame_rate(0.0);
        assert_eq!(document.defaults.delay, Some(13));
        document.set_frame_rate(30.0);
        assert_eq!(document.defaults.delay, Some(3));
    }

    #[test]
    fn test_quality_is_at_least_one() {
        let mut document = Document::new(1, 1);
        assert_eq!(document.quality, 10);
        document.set_quality(0);
        assert_eq!(document.quality, 1);
    }
}
