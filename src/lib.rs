//! Kaleidoscope image effect over packed RGB888 rasters
//!
//! Load a JPEG, fold it into mirrored wedges around the image center, and
//! write it back out. The raster primitives (bilinear sampling, rescale,
//! gamma, dim, Gaussian blur) are usable on their own.

pub mod codec;
pub mod convolution;
pub mod effects;
pub mod error;
pub mod geometry;
pub mod raster;
pub mod resample;
pub mod settings;
pub mod tone;

pub use codec::{load, save, Codec, JpegCodec};
pub use convolution::{blur, blur_with_order, ConvolutionOrder, GaussianKernel};
pub use effects::{kaleidoscope, Effect, Kaleidoscope};
pub use error::{Error, LoadError, SaveError, SettingsError};
pub use raster::{Pixel, PixelBuffer, SENTINEL};
pub use resample::rescale;
pub use settings::Settings;
pub use tone::{dim, gamma};
