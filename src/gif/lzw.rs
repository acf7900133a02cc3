
use weezl::BitOrder;
use weezl::encode::Encoder as LzwEncoder;

use super::blocks;
use super::errors::GifResult;
use super::sink::Sink;



const MIN_CODE_SIZE: u8 = 2;


/// Compresses palette indices into image data sub-blocks, ready to be appended after the color table.
///
/// The output starts with the minimum code size byte and ends with the empty sub-block.
pub trait EntropyCoder {
    fn encode(&self, width: u16, height: u16, indices: &[u8], color_depth: u8) -> GifResult<Vec<u8>>;
}

impl<F> EntropyCoder for F where F: Fn(u16, u16, &[u8], u8) -> GifResult<Vec<u8>> {
    fn encode(&self, width: u16, height: u16, indices: &[u8], color_depth: u8) -> GifResult<Vec<u8>> {
        self(width, height, indices, color_depth)
    }
}


/// Variable length code LZW, least significant bit first.
#[derive(Clone, Copy, Debug, Default)]
pub struct LzwCoder;


impl EntropyCoder for LzwCoder {
    fn encode(&self, _width: u16, _height: u16, indices: &[u8], color_depth: u8) -> GifResult<Vec<u8>> {
        let min_code_size = color_depth.max(MIN_CODE_SIZE).min(8);
        let compressed = LzwEncoder::new(BitOrder::Lsb, min_code_size).encode(indices)?;
        let mut sink = Sink::new();
        blocks::write_image_data(&mut sink, min_code_size, &compressed);
        Ok(sink.into_bytes())
    }
}
