use std::ops::{Add, Mul};

/// Returned by sampling an empty buffer (opaque blue, easy to spot)
pub const SENTINEL: Pixel = Pixel::new(0, 0, 255);

/// An 8-bit RGB triple
///
/// Arithmetic wraps instead of saturating: `+` adds each channel modulo 256,
/// and `f32 * Pixel` truncates each product toward zero before wrapping to
/// 8 bits. Interpolation and convolution accumulate weighted sums with these
/// operators, so the wrapping is part of the visible output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Same value on all three channels
    #[inline]
    pub const fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }

    #[inline]
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    #[inline]
    pub fn as_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<(u8, u8, u8)> for Pixel {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Pixel> for (u8, u8, u8) {
    fn from(p: Pixel) -> Self {
        (p.r, p.g, p.b)
    }
}

impl Add for Pixel {
    type Output = Pixel;

    #[inline]
    fn add(self, rhs: Pixel) -> Pixel {
        Pixel::new(
            self.r.wrapping_add(rhs.r),
            self.g.wrapping_add(rhs.g),
            self.b.wrapping_add(rhs.b),
        )
    }
}

/// Truncate toward zero, then keep the low 8 bits
#[inline]
fn scale_channel(coef: f32, c: u8) -> u8 {
    (coef * c as f32) as i32 as u8
}

impl Mul<Pixel> for f32 {
    type Output = Pixel;

    #[inline]
    fn mul(self, rhs: Pixel) -> Pixel {
        Pixel::new(
            scale_channel(self, rhs.r),
            scale_channel(self, rhs.g),
            scale_channel(self, rhs.b),
        )
    }
}
