//! Percentage rescaling with bilinear sampling

use crate::raster::PixelBuffer;

/// Scale a dimension by `percent / 100`, rounding down and saturating at `u32::MAX`
#[inline]
pub fn scaled_dimension(dim: u32, percent: i32) -> u32 {
    u32::try_from(dim as u64 * percent.max(0) as u64 / 100).unwrap_or(u32::MAX)
}

/// Build a new buffer at `percent` of the source size
///
/// - `percent <= 0` gives an empty 0x0 buffer
/// - `percent == 100` gives an exact copy
/// - anything else samples the source bilinearly at `(c, r) * 100 / percent`
pub fn rescale(source: &PixelBuffer, percent: i32) -> PixelBuffer {
    if percent <= 0 {
        return PixelBuffer::new();
    }
    if percent == 100 {
        return source.clone();
    }

    let width = scaled_dimension(source.width(), percent);
    let height = scaled_dimension(source.height(), percent);
    let step = 100.0 / percent as f32;

    let mut output = PixelBuffer::with_size(width, height);
    for row in 0..height as i32 {
        let src_row = step * row as f32;
        for col in 0..width as i32 {
            output.set_pixel(col, row, source.sample_bilinear(step * col as f32, src_row));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Pixel;

    fn checker(width: u32, height: u32) -> PixelBuffer {
        let mut buffer = PixelBuffer::with_size(width, height);
        for row in 0..height as i32 {
            for col in 0..width as i32 {
                let v = if (col + row) % 2 == 0 { 240 } else { 16 };
                buffer.set_pixel(col, row, Pixel::new(v, 255 - v, (col * 3) as u8));
            }
        }
        buffer
    }

    #[test]
    fn test_non_positive_percent_is_empty() {
        let src = checker(4, 4);
        for percent in [0, -1, -100] {
            let out = rescale(&src, percent);
            assert!(out.is_empty());
            assert_eq!((out.width(), out.height()), (0, 0));
        }
    }

    #[test]
    fn test_hundred_percent_is_identity() {
        let src = checker(7, 3);
        assert_eq!(rescale(&src, 100), src);
    }

    #[test]
    fn test_half_of_2x2_takes_top_left() {
        let mut src = PixelBuffer::with_size(2, 2);
        src.set_pixel(0, 0, Pixel::new(11, 22, 33));
        src.set_pixel(1, 0, Pixel::gray(200));
        src.set_pixel(0, 1, Pixel::gray(100));
        src.set_pixel(1, 1, Pixel::gray(50));

        let out = rescale(&src, 50);
        assert_eq!((out.width(), out.height()), (1, 1));
        assert_eq!(out.get_pixel(0, 0), Pixel::new(11, 22, 33));
    }

    #[test]
    fn test_dimensions_round_down() {
        let src = checker(5, 3);
        let out = rescale(&src, 50);
        assert_eq!((out.width(), out.height()), (2, 1));

        let out = rescale(&src, 33);
        assert_eq!((out.width(), out.height()), (1, 0));
        assert!(out.is_empty());
    }

    #[test]
    fn test_upscale_doubles_dimensions() {
        let src = checker(3, 2);
        let out = rescale(&src, 200);
        assert_eq!((out.width(), out.height()), (6, 4));
        // Even destination columns land on source pixels exactly
        assert_eq!(out.get_pixel(2, 2), src.get_pixel(1, 1));
    }

    #[test]
    fn test_half_step_truncates_each_term() {
        // 0.5*45 + 0.5*45 = 22 + 22: each weighted term truncates on its own
        let src = PixelBuffer::filled(3, 3, Pixel::new(90, 45, 180));
        let out = rescale(&src, 200);
        assert_eq!(out.get_pixel(0, 0), Pixel::new(90, 45, 180));
        assert_eq!(out.get_pixel(1, 0), Pixel::new(90, 44, 180));
        assert_eq!(out.get_pixel(1, 1), Pixel::new(90, 44, 180));
    }

    #[test]
    fn test_scaled_dimension_saturates() {
        assert_eq!(scaled_dimension(300, 50), 150);
        assert_eq!(scaled_dimension(300, i32::MAX), u32::MAX);
        assert_eq!(scaled_dimension(u32::MAX, i32::MAX), u32::MAX);
        assert_eq!(scaled_dimension(300, -5), 0);
    }
}
