
use std::convert::TryFrom;

use super::Document;
use super::errors::{GifError, GifResult};
use super::palette::{self, MAX_COLORS};
use super::quantizer::Quantized;



pub fn validate_document(document: &Document) -> GifResult<(u16, u16)> {
    if document.frames.is_empty() {
        return Err(GifError::EmptyDocument);
    }
    let width = validate_size("width", document.width)?;
    let height = validate_size("height", document.height)?;
    Ok((width, height))
}

/// Width or height, `[1, 65535]`.
pub fn validate_size(name: &'static str, value: u32) -> GifResult<u16> {
    match u16::try_from(value) {
        Ok(0) | Err(_) => Err(GifError::InvalidDimension { name, value }),
        Ok(size) => Ok(size),
    }
}

/// Left or top, `[0, 65535]`.
pub fn validate_position(name: &'static str, value: u32) -> GifResult<u16> {
    u16::try_from(value).map_err(|_| GifError::InvalidDimension { name, value })
}

pub fn validate_disposal(disposal: u8) -> GifResult<u8> {
    if disposal <= 0b111 {
        Ok(disposal)
    } else {
        Err(GifError::InvalidDisposal(disposal))
    }
}

pub fn validate_delay(delay: u32) -> GifResult<u16> {
    u16::try_from(delay).map_err(|_| GifError::InvalidDelay(delay))
}

pub fn validate_pixels(width: u16, height: u16, pixels: &[u8]) -> GifResult<()> {
    let expected = usize::from(width) * usize::from(height) * 4;
    let actual = pixels.len();
    if expected < actual {
        return Err(GifError::TooLargeImage(expected, actual));
    }
    if actual < expected {
        return Err(GifError::TooSmallImage(expected, actual));
    }
    Ok(())
}

/// Checks the quantizer kept its contract and returns the number of colors.
pub fn validate_quantized(quantized: &Quantized, pixel_count: usize) -> GifResult<usize> {
    let len = quantized.palette.len();
    let colors = palette::color_count(&quantized.palette);
    if len % 3 != 0 || colors == 0 || MAX_COLORS < colors {
        return Err(GifError::InvalidPalette(len));
    }

    if quantized.indices.len() != pixel_count {
        return Err(GifError::IndexCountMismatch(pixel_count, quantized.indices.len()));
    }

    if let Some(index) = quantized.indices.iter().find(|it| colors <= **it as usize) {
        return Err(GifError::IndexOutOfPalette { index: *index, colors });
    }

    Ok(colors)
}
