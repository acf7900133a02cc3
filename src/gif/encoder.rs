
use log::{debug, trace};

use super::blocks::{self, GraphicControl, ImageDescriptor, ScreenDescriptor};
use super::errors::GifResult;
use super::lzw::{EntropyCoder, LzwCoder};
use super::palette::{self, UsedEntrySet};
use super::pixels;
use super::quantizer::{NeuQuantizer, Quantizer};
use super::sink::Sink;
use super::validators::*;
use super::{disposal, Document, Frame, Rgb};



const COLOR_DEPTH: u8 = 8;
const COLOR_RESOLUTION: u8 = COLOR_DEPTH - 1;


/// Encodes `document` with the NeuQuant quantizer and the LZW coder.
pub fn encode(document: &Document) -> GifResult<Vec<u8>> {
    Encoder::new().encode(document)
}


pub struct Encoder<Q = NeuQuantizer, C = LzwCoder> {
    quantizer: Q,
    coder: C,
}

/// Frame settings after falling back to the document defaults.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Resolved<'a> {
    pixels: &'a [u8],
    left: u16,
    top: u16,
    width: u16,
    height: u16,
    disposal: u8,
    delay: u16,
    transparent: Option<Rgb>,
}


impl Encoder {
    pub fn new() -> Self {
        Encoder { quantizer: NeuQuantizer::default(), coder: LzwCoder }
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Encoder::new()
    }
}

impl<Q: Quantizer, C: EntropyCoder> Encoder<Q, C> {
    pub fn with(quantizer: Q, coder: C) -> Self {
        Encoder { quantizer, coder }
    }

    /// Every frame is validated before the first byte is written.
    pub fn encode(&self, document: &Document) -> GifResult<Vec<u8>> {
        let (width, height) = validate_document(document)?;
        let frames = document.frames.iter()
            .map(|frame| resolve(document, frame))
            .collect::<GifResult<Vec<_>>>()?;

        debug!(
            "Encoding {}x{} with {} frames (loop: {:?}, quality: {})",
            width, height, frames.len(), document.loop_count, document.quality);

        let mut sink = Sink::new();
        blocks::write_header(&mut sink);
        let screen = ScreenDescriptor {
            width,
            height,
            color_resolution: COLOR_RESOLUTION,
            ..Default::default()
        };
        blocks::write_logical_screen_descriptor(&mut sink, &screen);

        if let Some(comment) = document.comment.as_ref() {
            blocks::write_comment_extension(&mut sink, comment)?;
        }
        if let Some(loop_count) = document.loop_count {
            blocks::write_netscape_loop_extension(&mut sink, loop_count);
        }

        for (index, frame) in frames.iter().enumerate() {
            self.write_frame(&mut sink, index, frame, document.quality)?;
        }

        blocks::write_trailer(&mut sink);
        debug!("Encoded {} bytes", sink.len());
        Ok(sink.into_bytes())
    }

    fn write_frame(&self, sink: &mut Sink, index: usize, frame: &Resolved, quality: u32) -> GifResult<()> {
        let rgb = pixels::to_rgb(frame.pixels);
        let quantized = self.quantizer.quantize(&rgb, quality)?;
        let pixel_count = usize::from(frame.width) * usize::from(frame.height);
        let colors = validate_quantized(&quantized, pixel_count)?;
        let used = UsedEntrySet::from_indices(&quantized.indices);

        let transparent = frame.transparent.map(|color| {
            palette::closest_used(&quantized.palette, &used, color).unwrap_or(0)
        });

        let image_data = self.coder.encode(frame.width, frame.height, &quantized.indices, COLOR_DEPTH)?;
        let table_size = blocks::table_size_field(colors);

        trace!(
            "Frame {}: {}x{}+{}+{}, {} colors ({} used), disposal={}, delay={}, transparent={:?}",
            index, frame.width, frame.height, frame.left, frame.top,
            colors, used.len(), frame.disposal, frame.delay, transparent);

        let control = GraphicControl {
            disposal: frame.disposal,
            user_input: false,
            transparent,
            delay: frame.delay,
        };
        blocks::write_graphic_control_extension(sink, &control);

        let descriptor = ImageDescriptor {
            left: frame.left,
            top: frame.top,
            width: frame.width,
            height: frame.height,
            local_color_table: true,
            interlace: false,
            sort: false,
            local_table_size: table_size,
        };
        blocks::write_image_descriptor(sink, &descriptor);
        blocks::write_color_table(sink, &quantized.palette, table_size);
        sink.write_bytes(&image_data);

        Ok(())
    }
}


fn resolve<'a>(document: &Document, frame: &'a Frame) -> GifResult<Resolved<'a>> {
    let defaults = &document.defaults;

    let left = validate_position("left", frame.left.or(defaults.left).unwrap_or(0))?;
    let top = validate_position("top", frame.top.or(defaults.top).unwrap_or(0))?;
    let width = validate_size("width", frame.width.or(defaults.width).unwrap_or(document.width))?;
    let height = validate_size("height", frame.height.or(defaults.height).unwrap_or(document.height))?;
    let delay = validate_delay(frame.delay.or(defaults.delay).unwrap_or(0))?;
    let transparent = frame.transparent.or(defaults.transparent);

    let disposal = match frame.disposal.or(defaults.disposal) {
        Some(code) => validate_disposal(code)?,
        None if transparent.is_some() => disposal::BACKGROUND,
        None => disposal::UNSPECIFIED,
    };

    validate_pixels(width, height, &frame.pixels)?;

    Ok(Resolved { pixels: &frame.pixels, left, top, width, height, disposal, delay, transparent })
}



#[cfg(test)]
mod tests {
    use super::*;
    use crate::gif::FrameDefaults;

    fn document(frames: Vec<Frame>) -> Document {
        let mut document = Document::new(2, 2);
        document.frames = frames;
        document
    }

    #[test]
    fn test_frame_values_override_defaults() {
        let mut document = document(vec![]);
        document.defaults = FrameDefaults { left: Some(1), delay: Some(7), disposal: Some(3), ..Default::default() };
        let frame = Frame { pixels: vec![0; 4], width: Some(1), height: Some(1), delay: Some(9), ..Default::default() };
        let resolved = resolve(&document, &frame).unwrap();
        assert_eq!((resolved.left, resolved.top), (1, 0));
        assert_eq!((resolved.width, resolved.height), (1, 1));
        assert_eq!(resolved.delay, 9);
        assert_eq!(resolved.disposal, 3);
    }

    #[test]
    fn test_transparency_defaults_disposal_to_background() {
        let mut document = document(vec![]);
        let frame = Frame::new(vec![0; 16]);
        assert_eq!(resolve(&document, &frame).unwrap().disposal, disposal::UNSPECIFIED);

        document.set_transparent(Some(Rgb::new(0, 0, 0)));
        assert_eq!(resolve(&document, &frame).unwrap().disposal, disposal::BACKGROUND);

        let frame = Frame { disposal: Some(1), ..frame };
        assert_eq!(resolve(&document, &frame).unwrap().disposal, 1);
    }

    #[test]
    fn test_invalid_frame_settings() {
        let document = document(vec![]);
        let frame = |f: fn(&mut Frame)| {
            let mut frame = Frame::new(vec![0; 16]);
            f(&mut frame);
            frame
        };
        assert!(resolve(&document, &frame(|it| it.disposal = Some(8))).is_err());
        assert!(resolve(&document, &frame(|it| it.delay = Some(65536))).is_err());
        assert!(resolve(&document, &frame(|it| it.left = Some(65536))).is_err());
        assert!(resolve(&document, &frame(|it| it.width = Some(0))).is_err());
        assert!(resolve(&document, &frame(|it| it.pixels.push(0))).is_err());
    }
}
