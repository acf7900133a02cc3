
use failure::Fail;


pub type GifResult<T> = Result<T, GifError>;



#[derive(Fail, Debug)]
pub enum GifError {
    #[fail(display = "No frames to encode")]
    EmptyDocument,
    #[fail(display = "Index count mismatch: expected={}, actual={}", _0, _1)]
    IndexCountMismatch(usize, usize),
    #[fail(display = "Index out of palette: index={}, colors={}", index, colors)]
    IndexOutOfPalette { index: u8, colors: usize },
    #[fail(display = "Invalid delay: {}", _0)]
    InvalidDelay(u32),
    #[fail(display = "Invalid {}: {}", name, value)]
    InvalidDimension { name: &'static str, value: u32 },
    #[fail(display = "Invalid disposal method: {}", _0)]
    InvalidDisposal(u8),
    #[fail(display = "Invalid palette length: {}", _0)]
    InvalidPalette(usize),
    #[fail(display = "Character not representable as a byte: {:?}", _0)]
    InvalidText(char),
    #[fail(display = "LZW error: {}", _0)]
    Lzw(weezl::LzwError),
    #[fail(display = "Too large image: expected={}, actual={}", _0, _1)]
    TooLargeImage(usize, usize),
    #[fail(display = "Too small image: expected={}, actual={}", _0, _1)]
    TooSmallImage(usize, usize),
}

macro_rules! define_error {
    ($source:ty, $kind:tt) => {
        impl From<$source> for GifError {
            fn from(error: $source) -> GifError {
                GifError::$kind(error)
            }
        }
    }
}

define_error!(weezl::LzwError, Lzw);
