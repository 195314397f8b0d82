//! In-place tone adjustments applied to every channel byte

use crate::raster::PixelBuffer;

/// Gamma values below zero are replaced with this
pub const MIN_GAMMA: f32 = 0.01;

/// Build the 256-entry lookup table for `gamma`
fn gamma_table(g: f32) -> [u8; 256] {
    let mut table = [0u8; 256];
    for (c, out) in table.iter_mut().enumerate() {
        let normalized = c as f32 / 255.0;
        *out = (normalized.powf(g) * 255.0).round().clamp(0.0, 255.0) as u8;
    }
    table
}

/// Gamma curve: `out = round((c / 255)^g * 255)`
///
/// Negative `g` is treated as 0.01. `g == 1.0` leaves the buffer unchanged.
pub fn gamma(buffer: &mut PixelBuffer, g: f32) {
    let g = if g < 0.0 {
        log::warn!("gamma {} is negative, using {}", g, MIN_GAMMA);
        MIN_GAMMA
    } else {
        g
    };

    let table = gamma_table(g);
    for c in buffer.as_bytes_mut() {
        *c = table[*c as usize];
    }
}

/// Scale brightness to `percent` of the original, rounding down
///
/// Negative percents count as 0 (black). 100 and above are a no-op.
pub fn dim(buffer: &mut PixelBuffer, percent: i32) {
    let percent = percent.max(0);
    if percent > 99 {
        return;
    }

    let bytes = buffer.as_bytes_mut();
    if percent == 0 {
        bytes.fill(0);
        return;
    }

    // c * 99 fits comfortably in u16
    let percent = percent as u16;
    for c in bytes {
        *c = (*c as u16 * percent / 100) as u8;
    }
}
