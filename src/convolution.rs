//! Gaussian blur over a PixelBuffer
//!
//! The kernel is a full (2r+1)x(2r+1) matrix, not separable passes, with
//! weights `exp(-(dx^2 + dy^2) / 2)` normalized to sum to 1. Borders use
//! clamp-to-edge addressing. Per-channel sums are accumulated in f32 and
//! truncated when written back.

use serde::{Deserialize, Serialize};

use crate::raster::{Pixel, PixelBuffer};

// ============================================================================
// Kernel
// ============================================================================

/// Normalized square Gaussian kernel, stored row-major
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKernel {
    radius: usize,
    weights: Vec<f32>,
}

impl GaussianKernel {
    pub fn new(radius: usize) -> Self {
        let size = 2 * radius + 1;
        let r = radius as i64;
        let mut weights = vec![0.0f32; size * size];

        // The kernel is symmetric under a 180 degree turn: fill the lower
        // triangle (row <= col) and mirror each entry through the center.
        for col in 0..size {
            for row in 0..=col {
                let dx = col as i64 - r;
                let dy = row as i64 - r;
                let value = (-((dx * dx + dy * dy) as f32) / 2.0).exp();
                weights[row * size + col] = value;
                weights[(size - row - 1) * size + (size - col - 1)] = value;
            }
        }

        let sum: f32 = weights.iter().sum();
        for w in &mut weights {
            *w /= sum;
        }

        Self { radius, weights }
    }

    #[inline]
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Side length, `2 * radius + 1`
    #[inline]
    pub fn size(&self) -> usize {
        2 * self.radius + 1
    }

    /// Weight at offset (dx, dy) from the center; both must lie in [-r, r]
    #[inline]
    pub fn weight(&self, dx: i32, dy: i32) -> f32 {
        let r = self.radius as i32;
        let col = (dx + r) as usize;
        let row = (dy + r) as usize;
        self.weights[row * self.size() + col]
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }
}

// ============================================================================
// Convolution
// ============================================================================

/// Where the convolution reads neighbours from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvolutionOrder {
    /// Read from an untouched copy of the input. Every output pixel sees the
    /// original neighbourhood.
    #[default]
    Snapshot,
    /// Read from the buffer being written, column by column, top to bottom.
    /// Pixels to the right of and below a written pixel sample already-blurred
    /// values, which smears the result toward the bottom-right.
    Sequential,
}

/// Weighted sum of the neighbourhood around (col, row), truncated per channel
#[inline]
fn convolve_at(source: &PixelBuffer, kernel: &GaussianKernel, col: i32, row: i32) -> Pixel {
    let r = kernel.radius() as i32;
    let (mut acc_r, mut acc_g, mut acc_b) = (0.0f32, 0.0f32, 0.0f32);

    for dx in -r..=r {
        for dy in -r..=r {
            let px = source.get_pixel(col + dx, row + dy);
            let coef = kernel.weight(dx, dy);
            acc_r += px.r as f32 * coef;
            acc_g += px.g as f32 * coef;
            acc_b += px.b as f32 * coef;
        }
    }

    Pixel::new(acc_r as u8, acc_g as u8, acc_b as u8)
}

/// Gaussian blur with radius `radius`, reading from a snapshot of the input
pub fn blur(buffer: &mut PixelBuffer, radius: usize) {
    blur_with_order(buffer, radius, ConvolutionOrder::Snapshot);
}

/// Gaussian blur with an explicit read order
///
/// Radius 0 is the identity kernel and returns without touching the buffer.
pub fn blur_with_order(buffer: &mut PixelBuffer, radius: usize, order: ConvolutionOrder) {
    if radius == 0 || buffer.is_empty() {
        return;
    }

    let kernel = GaussianKernel::new(radius);
    let width = buffer.width() as i32;
    let height = buffer.height() as i32;

    match order {
        ConvolutionOrder::Snapshot => {
            let source = buffer.clone();
            for row in 0..height {
                for col in 0..width {
                    buffer.set_pixel(col, row, convolve_at(&source, &kernel, col, row));
                }
            }
        },
        ConvolutionOrder::Sequential => {
            for col in 0..width {
                for row in 0..height {
                    let px = convolve_at(buffer, &kernel, col, row);
                    buffer.set_pixel(col, row, px);
                }
            }
        },
    }
}
