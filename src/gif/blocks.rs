
use super::errors::GifResult;
use super::sink::{latin1, Sink};



const SIGNATURE: &[u8; 6] = b"GIF89a";

const EXTENSION_INTRODUCER: u8 = 0x21;
const GRAPHIC_CONTROL_LABEL: u8 = 0xF9;
const COMMENT_LABEL: u8 = 0xFE;
const APPLICATION_LABEL: u8 = 0xFF;
const IMAGE_SEPARATOR: u8 = 0x2C;
const TRAILER: u8 = 0x3B;

const MAX_SUB_BLOCK: usize = 0xFF;


#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ScreenDescriptor {
    pub width: u16,
    pub height: u16,
    pub global_color_table: bool,
    /// Bits per primary color minus one (3 bits)
    pub color_resolution: u8,
    pub sort: bool,
    pub global_table_size: u8,
    pub background_index: u8,
    pub pixel_aspect_ratio: u8,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GraphicControl {
    pub disposal: u8,
    pub user_input: bool,
    /// Palette index treated as transparent
    pub transparent: Option<u8>,
    /// In hundredths of a second
    pub delay: u16,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ImageDescriptor {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
    pub local_color_table: bool,
    pub interlace: bool,
    pub sort: bool,
    pub local_table_size: u8,
}


impl ScreenDescriptor {
    pub fn packed(&self) -> u8 {
        (self.global_color_table as u8) << 7
            | (self.color_resolution & 0b111) << 4
            | (self.sort as u8) << 3
            | (self.global_table_size & 0b111)
    }
}

impl GraphicControl {
    pub fn packed(&self) -> u8 {
        (self.disposal & 0b111) << 2
            | (self.user_input as u8) << 1
            | self.transparent.is_some() as u8
    }
}

impl ImageDescriptor {
    pub fn packed(&self) -> u8 {
        (self.local_color_table as u8) << 7
            | (self.interlace as u8) << 6
            | (self.sort as u8) << 5
            | (self.local_table_size & 0b111)
    }
}


/// Size field for a color table holding `colors` entries: `ceil(log2(colors)) - 1`.
pub fn table_size_field(colors: usize) -> u8 {
    (colors.max(2).min(256).next_power_of_two().trailing_zeros() - 1) as u8
}

/// Byte length of the color table declared by `size_field`.
pub fn table_len(size_field: u8) -> usize {
    3 * (2 << (size_field & 0b111))
}


pub fn write_header(sink: &mut Sink) {
    sink.write_bytes(SIGNATURE);
}

pub fn write_logical_screen_descriptor(sink: &mut Sink, descriptor: &ScreenDescriptor) {
    sink.write_short(descriptor.width);
    sink.write_short(descriptor.height);
    sink.write_byte(descriptor.packed());
    sink.write_byte(descriptor.background_index);
    sink.write_byte(descriptor.pixel_aspect_ratio);
}

/// Writes `table` and pads it with zeros up to the size declared by `size_field`.
pub fn write_color_table(sink: &mut Sink, table: &[u8], size_field: u8) {
    let len = table_len(size_field);
    let table = &table[.. table.len().min(len)];
    sink.write_bytes(table);
    for _ in table.len() .. len {
        sink.write_byte(0);
    }
}

pub fn write_graphic_control_extension(sink: &mut Sink, control: &GraphicControl) {
    sink.write_byte(EXTENSION_INTRODUCER);
    sink.write_byte(GRAPHIC_CONTROL_LABEL);
    sink.write_byte(4);
    sink.write_byte(control.packed());
    sink.write_short(control.delay);
    sink.write_byte(control.transparent.unwrap_or(0));
    sink.write_byte(0);
}

/// The whole comment is one data stream, split into sub-blocks only where it exceeds 255 bytes.
pub fn write_comment_extension(sink: &mut Sink, comment: &str) -> GifResult<()> {
    let data = latin1(comment)?;
    sink.write_byte(EXTENSION_INTRODUCER);
    sink.write_byte(COMMENT_LABEL);
    write_sub_blocks(sink, &data);
    sink.write_byte(0);
    Ok(())
}

pub fn write_application_extension(sink: &mut Sink, identifier: &[u8; 8], authentication_code: &[u8; 3], data_blocks: &[&[u8]]) {
    sink.write_byte(EXTENSION_INTRODUCER);
    sink.write_byte(APPLICATION_LABEL);
    sink.write_byte(11);
    sink.write_bytes(identifier);
    sink.write_bytes(authentication_code);
    for data in data_blocks {
        write_sub_blocks(sink, data);
    }
    sink.write_byte(0);
}

/// `loop_count` of zero loops forever.
pub fn write_netscape_loop_extension(sink: &mut Sink, loop_count: u16) {
    let data = [1, (loop_count & 0xFF) as u8, (loop_count >> 8) as u8];
    write_application_extension(sink, b"NETSCAPE", b"2.0", &[&data[..]]);
}

pub fn write_image_descriptor(sink: &mut Sink, descriptor: &ImageDescriptor) {
    sink.write_byte(IMAGE_SEPARATOR);
    sink.write_short(descriptor.left);
    sink.write_short(descriptor.top);
    sink.write_short(descriptor.width);
    sink.write_short(descriptor.height);
    sink.write_byte(descriptor.packed());
}

/// Table based image data: minimum code size followed by the compressed stream in sub-blocks.
pub fn write_image_data(sink: &mut Sink, min_code_size: u8, compressed: &[u8]) {
    sink.write_byte(min_code_size);
    write_sub_blocks(sink, compressed);
    sink.write_byte(0);
}

pub fn write_trailer(sink: &mut Sink) {
    sink.write_byte(TRAILER);
}

/// Length-prefixed chunks, without the terminator.
fn write_sub_blocks(sink: &mut Sink, data: &[u8]) {
    for chunk in data.chunks(MAX_SUB_BLOCK) {
        sink.write_byte(chunk.len() as u8);
        sink.write_bytes(chunk);
    }
}



#[cfg(test)]
mod tests {
    use super::*;

    fn written<F: FnOnce(&mut Sink)>(f: F) -> Vec<u8> {
        let mut sink = Sink::new();
        f(&mut sink);
        sink.into_bytes()
    }

    #[test]
    fn test_table_size_field() {
        #[rustfmt::skip]
        fn expected(colors: usize) -> u8 {
            match colors {
                0  ..=2   => 0,
                3  ..=4   => 1,
                5  ..=8   => 2,
                9  ..=16  => 3,
                17 ..=32  => 4,
                33 ..=64  => 5,
                65 ..=128 => 6,
                _ => 7,
            }
        }

        for colors in 0 ..= 300 {
            assert_eq!(table_size_field(colors), expected(colors), "colors={}", colors);
        }
    }

    #[test]
    fn test_color_table_padding() {
        for colors in 1 ..= 256 {
            let table: Vec<u8> = (0 .. colors * 3).map(|i| (i % 250) as u8 + 1).collect();
            let field = table_size_field(colors);
            let bytes = written(|sink| write_color_table(sink, &table, field));
            assert_eq!(bytes.len(), 3 * (1 << (field + 1)));
            assert_eq!(&bytes[.. table.len()], &table[..]);
            assert!(bytes[table.len() ..].iter().all(|it| *it == 0));
        }
    }

    #[test]
    fn test_disposal_bits_round_trip() {
        for disposal in 0 ..= 7 {
            for transparent in &[None, Some(3)] {
                let control = GraphicControl { disposal, transparent: *transparent, delay: 0, user_input: false };
                assert_eq!((control.packed() >> 2) & 0b111, disposal);
                assert_eq!(control.packed() & 1, transparent.is_some() as u8);
            }
        }
    }

    #[test]
    fn test_graphic_control_extension_layout() {
        let control = GraphicControl { disposal: 2, user_input: false, transparent: Some(5), delay: 0x0102 };
        let bytes = written(|sink| write_graphic_control_extension(sink, &control));
        assert_eq!(bytes, vec![0x21, 0xF9, 0x04, 0b0000_1001, 0x02, 0x01, 0x05, 0x00]);
    }

    #[test]
    fn test_screen_descriptor_layout() {
        let descriptor = ScreenDescriptor { width: 300, height: 2, color_resolution: 7, ..Default::default() };
        let bytes = written(|sink| write_logical_screen_descriptor(sink, &descriptor));
        assert_eq!(bytes, vec![0x2C, 0x01, 0x02, 0x00, 0x70, 0x00, 0x00]);
    }

    #[test]
    fn test_image_descriptor_layout() {
        let descriptor = ImageDescriptor {
            left: 1,
            top: 2,
            width: 3,
            height: 4,
            local_color_table: true,
            local_table_size: 7,
            ..Default::default()
        };
        let bytes = written(|sink| write_image_descriptor(sink, &descriptor));
        assert_eq!(bytes, vec![0x2C, 1, 0, 2, 0, 3, 0, 4, 0, 0x87]);
    }

    #[test]
    fn test_loop_extension_layout() {
        let bytes = written(|sink| write_netscape_loop_extension(sink, 0x0203));
        let mut expected = vec![0x21, 0xFF, 0x0B];
        expected.extend_from_slice(b"NETSCAPE2.0");
        expected.extend_from_slice(&[0x03, 0x01, 0x03, 0x02, 0x00]);
        assert_eq!(bytes, expected);
    }

    // A comment is one stream, not one sub-block per character.
    #[test]
    fn test_comment_is_not_split_per_character() {
        let bytes = written(|sink| write_comment_extension(sink, "hello").unwrap());
        assert_eq!(bytes, vec![0x21, 0xFE, 5, b'h', b'e', b'l', b'l', b'o', 0]);
    }

    #[test]
    fn test_long_comment_is_chunked() {
        let comment: String = std::iter::repeat('x').take(300).collect();
        let bytes = written(|sink| write_comment_extension(sink, &comment).unwrap());
        assert_eq!(bytes.len(), 2 + 1 + 255 + 1 + 45 + 1);
        assert_eq!(bytes[2], 255);
        assert_eq!(bytes[2 + 1 + 255], 45);
        assert_eq!(*bytes.last().unwrap(), 0);
    }

    #[test]
    fn test_empty_comment() {
        let bytes = written(|sink| write_comment_extension(sink, "").unwrap());
        assert_eq!(bytes, vec![0x21, 0xFE, 0]);
    }

    #[test]
    fn test_invalid_comment_writes_nothing() {
        let mut sink = Sink::new();
        assert!(write_comment_extension(&mut sink, "\u{1F600}").is_err());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_image_data_framing() {
        let compressed = vec![0xAA; 256];
        let bytes = written(|sink| write_image_data(sink, 8, &compressed));
        assert_eq!(bytes[0], 8);
        assert_eq!(bytes[1], 255);
        assert_eq!(bytes[2 + 255], 1);
        assert_eq!(bytes.len(), 1 + 1 + 255 + 1 + 1 + 1);
        assert_eq!(*bytes.last().unwrap(), 0);
    }
}
