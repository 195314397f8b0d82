mod adjust;
mod kaleidoscope;

pub use adjust::{Dim, Gamma, GaussianBlur};
pub use kaleidoscope::{kaleidoscope, normalize_sectors, wedge_sequence, Kaleidoscope, DEFAULT_SECTORS};

use crate::raster::PixelBuffer;

/// Trait for all in-place image effects
pub trait Effect {
    /// Apply the effect to the buffer, mutating it in place
    fn apply(&self, buffer: &mut PixelBuffer);

    /// Effect name for logging
    fn name(&self) -> &str;
}
