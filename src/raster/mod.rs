mod pixel;
mod pixel_buffer;

pub use pixel::{Pixel, SENTINEL};
pub use pixel_buffer::{PixelBuffer, CHANNELS};
