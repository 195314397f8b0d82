//! Effect wrappers around the tone and convolution operators

use super::Effect;
use crate::convolution::{blur_with_order, ConvolutionOrder};
use crate::raster::PixelBuffer;
use crate::tone;

/// Gamma correction with a fixed exponent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gamma(pub f32);

impl Effect for Gamma {
    fn apply(&self, buffer: &mut PixelBuffer) {
        tone::gamma(buffer, self.0);
    }

    fn name(&self) -> &str {
        "Gamma"
    }
}

/// Brightness scaled to a percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dim(pub i32);

impl Effect for Dim {
    fn apply(&self, buffer: &mut PixelBuffer) {
        tone::dim(buffer, self.0);
    }

    fn name(&self) -> &str {
        "Dim"
    }
}

/// Gaussian blur with a radius and read order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GaussianBlur {
    pub radius: usize,
    pub order: ConvolutionOrder,
}

impl GaussianBlur {
    pub fn new(radius: usize) -> Self {
        Self {
            radius,
            order: ConvolutionOrder::default(),
        }
    }

    pub fn with_order(mut self, order: ConvolutionOrder) -> Self {
        self.order = order;
        self
    }
}

impl Effect for GaussianBlur {
    fn apply(&self, buffer: &mut PixelBuffer) {
        blur_with_order(buffer, self.radius, self.order);
    }

    fn name(&self) -> &str {
        "Gaussian Blur"
    }
}
