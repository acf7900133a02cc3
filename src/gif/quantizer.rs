
use color_quant::NeuQuant;

use super::errors::GifResult;
use super::palette::MAX_COLORS;
use super::pixels;



/// Sample factor used when the document does not set one.
pub const DEFAULT_QUALITY: u32 = 10;

const MAX_SAMPLE_FACTOR: u32 = 30;


pub struct Quantized {
    /// RGB triples, at most 256 of them
    pub palette: Vec<u8>,
    /// One palette index per pixel
    pub indices: Vec<u8>,
}

/// Reduces an RGB image to a palette and per-pixel indices.
///
/// Every returned index must be smaller than the number of palette entries.
/// Lower `sample` values trade speed for fidelity.
pub trait Quantizer {
    fn quantize(&self, rgb: &[u8], sample: u32) -> GifResult<Quantized>;
}

impl<F> Quantizer for F where F: Fn(&[u8], u32) -> GifResult<Quantized> {
    fn quantize(&self, rgb: &[u8], sample: u32) -> GifResult<Quantized> {
        self(rgb, sample)
    }
}


/// NeuQuant neural-net quantizer.
#[derive(Clone, Copy, Debug)]
pub struct NeuQuantizer {
    colors: usize,
}


impl NeuQuantizer {
    pub fn new(colors: usize) -> Self {
        NeuQuantizer { colors: colors.max(2).min(MAX_COLORS) }
    }
}

impl Default for NeuQuantizer {
    fn default() -> Self {
        NeuQuantizer::new(MAX_COLORS)
    }
}

impl Quantizer for NeuQuantizer {
    fn quantize(&self, rgb: &[u8], sample: u32) -> GifResult<Quantized> {
        let rgba = pixels::to_rgba(rgb);
        let sample = sample.max(1).min(MAX_SAMPLE_FACTOR) as i32;
        let network = NeuQuant::new(sample, self.colors, &rgba);
        let palette = network.color_map_rgb();
        let indices = rgba.chunks_exact(4).map(|pixel| network.index_of(pixel) as u8).collect();
        Ok(Quantized { palette, indices })
    }
}
