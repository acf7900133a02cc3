
/// Drops the alpha channel of every RGBA pixel.
pub fn to_rgb(rgba: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(rgba.len() / 4 * 3);
    for pixel in rgba.chunks_exact(4) {
        result.extend_from_slice(&pixel[..3]);
    }
    result
}

/// Adds an opaque alpha channel to every RGB pixel.
pub fn to_rgba(rgb: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(rgb.len() / 3 * 4);
    for pixel in rgb.chunks_exact(3) {
        result.extend_from_slice(pixel);
        result.push(0xFF);
    }
    result
}
