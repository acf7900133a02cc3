

pub mod gif;



pub use crate::gif::{disposal, encode, Document, Encoder, Frame, FrameDefaults, Rgb};
pub use crate::gif::errors::{GifError, GifResult};
pub use crate::gif::lzw::{EntropyCoder, LzwCoder};
pub use crate::gif::quantizer::{NeuQuantizer, Quantized, Quantizer};
