
use byteorder::{ByteOrder, LittleEndian};

use super::errors::{GifError, GifResult};



/// Append-only byte buffer the container blocks are written into.
#[derive(Clone, Debug, Default)]
pub struct Sink {
    bytes: Vec<u8>,
}


impl Sink {
    pub fn new() -> Self {
        Sink::default()
    }

    pub fn write_byte(&mut self, value: u8) {
        self.bytes.push(value);
    }

    pub fn write_short(&mut self, value: u16) {
        let mut buffer = [0; 2];
        LittleEndian::write_u16(&mut buffer, value);
        self.bytes.extend_from_slice(&buffer);
    }

    pub fn write_bytes(&mut self, data: &[u8]) {
        self.bytes.extend_from_slice(data);
    }

    /// Writes one byte per character. Nothing is written if any character is above U+00FF.
    pub fn write_text(&mut self, text: &str) -> GifResult<()> {
        let encoded = latin1(text)?;
        self.bytes.extend_from_slice(&encoded);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}


pub fn latin1(text: &str) -> GifResult<Vec<u8>> {
    text.chars()
        .map(|c| {
            let code = c as u32;
            if code <= 0xFF {
                Ok(code as u8)
            } else {
                Err(GifError::InvalidText(c))
            }
        })
        .collect()
}



#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_is_little_endian() {
        let mut sink = Sink::new();
        sink.write_short(0x1234);
        sink.write_byte(0xAB);
        assert_eq!(sink.to_bytes(), vec![0x34, 0x12, 0xAB]);
    }

    #[test]
    fn test_to_bytes_is_repeatable() {
        let mut sink = Sink::new();
        sink.write_bytes(&[1, 2, 3]);
        assert_eq!(sink.to_bytes(), sink.to_bytes());
        sink.write_byte(4);
        assert_eq!(sink.into_bytes(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_text_accepts_latin1() {
        let mut sink = Sink::new();
        sink.write_text("GIF\u{e9}").unwrap();
        assert_eq!(sink.to_bytes(), vec![b'G', b'I', b'F', 0xE9]);
    }

    #[test]
    fn test_text_rejects_wide_characters_without_writing() {
        let mut sink = Sink::new();
        sink.write_byte(7);
        match sink.write_text("ab\u{263a}") {
            Err(GifError::InvalidText('\u{263a}')) => (),
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(sink.to_bytes(), vec![7]);
    }
}
