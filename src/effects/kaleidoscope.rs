//! Kaleidoscope Effect
//!
//! Tiles a half-size copy of the image into triangular wedges around the
//! center. Every wedge is filled from the same reference wedge (the one
//! hanging straight down from the center), rotated into place:
//!
//! ```text
//!      ______
//!     /\    /\
//!    /  \  /  \
//!   /____\/____\
//!   \    /\    /
//!    \  /  \  /
//!     \/____\/
//! ```
//!
//! Pixels outside the union of wedges keep the darkened, blurred background.

use std::f64::consts::TAU;
use std::iter;

use super::{Dim, Effect, Gamma, GaussianBlur};
use crate::convolution::ConvolutionOrder;
use crate::geometry::{rotate_around, Point2D, Triangle};
use crate::raster::PixelBuffer;
use crate::resample::rescale;

pub const DEFAULT_SECTORS: u32 = 8;

const MIN_SECTORS: u32 = 4;
const FALLBACK_SECTORS: u32 = 6;

// Fixed preprocessing chain
const SCALED_COPY_PERCENT: i32 = 50;
const BACKGROUND_GAMMA: f32 = 1.2;
const BACKGROUND_DIM_PERCENT: i32 = 50;
const BACKGROUND_BLUR_RADIUS: usize = 2;

/// Fewer than 4 sectors become 6; odd counts round up to the next even one
pub fn normalize_sectors(sectors: u32) -> u32 {
    let sectors = if sectors < MIN_SECTORS {
        FALLBACK_SECTORS
    } else {
        sectors
    };
    if sectors % 2 == 1 {
        sectors.checked_add(1).unwrap_or(sectors - 1)
    } else {
        sectors
    }
}

/// Angle spanned by one wedge, `2*pi / sectors`
#[inline]
fn sector_angle(sectors: u32) -> f32 {
    (TAU / sectors as f64) as f32
}

/// The wedges in paint order
///
/// Wedge 0 has its apex at the image center and its base on the bottom row,
/// half-width `tan(angle / 2) * scaled_height`. Each following wedge reuses the
/// previous far base vertex and rotates it one more sector around the apex, so
/// neighbours share an edge while the wedges walk around the circle. The
/// sequence is lazy: only one triangle is alive at a time whatever `sectors` is.
pub fn wedge_sequence(width: u32, height: u32, scaled_height: u32, sectors: u32) -> impl Iterator<Item = Triangle> {
    let angle = sector_angle(sectors);
    let apex = Point2D::new(width as f32 / 2.0, height as f32 / 2.0);
    let half_base = (angle / 2.0).tan() * scaled_height as f32;
    let base_y = height as f32 - 1.0;

    let first = Triangle::new(
        apex,
        Point2D::new(apex.x + half_base, base_y),
        Point2D::new(apex.x - half_base, base_y),
    );

    iter::successors(Some(first), move |prev| {
        let mut next = *prev;
        next.vertices[1] = prev.vertices[2];
        next.vertices[2] = rotate_around(prev.vertices[2], apex, angle);
        Some(next)
    })
    .take(sectors as usize)
}

/// Kaleidoscope mosaic with a configurable sector count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kaleidoscope {
    sectors: u32,
    blur_order: ConvolutionOrder,
}

impl Kaleidoscope {
    /// `sectors` is normalized, see [`normalize_sectors`]
    pub fn new(sectors: u32) -> Self {
        let normalized = normalize_sectors(sectors);
        if normalized != sectors {
            log::warn!("sector count {} adjusted to {}", sectors, normalized);
        }
        Self {
            sectors: normalized,
            blur_order: ConvolutionOrder::default(),
        }
    }

    /// Choose how the background blur reads its neighbours
    pub fn with_blur_order(mut self, order: ConvolutionOrder) -> Self {
        self.blur_order = order;
        self
    }

    #[inline]
    pub fn sectors(&self) -> u32 {
        self.sectors
    }

    #[inline]
    pub fn blur_order(&self) -> ConvolutionOrder {
        self.blur_order
    }

    /// Darken and soften the original in place; order matters
    fn prepare_background(&self, buffer: &mut PixelBuffer) {
        let chain: [&dyn Effect; 3] = [
            &Gamma(BACKGROUND_GAMMA),
            &Dim(BACKGROUND_DIM_PERCENT),
            &GaussianBlur::new(BACKGROUND_BLUR_RADIUS).with_order(self.blur_order),
        ];
        for effect in chain {
            log::debug!("background: {}", effect.name());
            effect.apply(buffer);
        }
    }

    /// Fill one wedge by pulling pixels from the reference wedge of `source`
    fn paint_wedge(buffer: &mut PixelBuffer, source: &PixelBuffer, wedge: &Triangle, angle_offset: f32) {
        let apex = wedge.apex();
        let bounds = wedge.bounds();
        let source_center_x = (source.width() / 2) as f32;

        // Truncation matches the float-to-int conversion of the scan window;
        // rows and columns outside the image could never be written anyway.
        let row_start = (bounds.min_y as i32).max(0);
        let row_end = (bounds.max_y.floor() as i32).min(buffer.height() as i32 - 1);
        let col_start = (bounds.min_x as i32).max(0);
        let col_end = (bounds.max_x.floor() as i32).min(buffer.width() as i32 - 1);

        for row in row_start..=row_end {
            for col in col_start..=col_end {
                let p = Point2D::new(col as f32, row as f32);
                if !wedge.contains(p) {
                    continue;
                }

                let local = rotate_around(p, apex, -angle_offset);
                let sx = local.x - apex.x + source_center_x;
                let sy = local.y - apex.y;
                buffer.set_pixel(col, row, source.sample_bilinear(sx, sy));
            }
        }
    }
}

impl Default for Kaleidoscope {
    fn default() -> Self {
        Self::new(DEFAULT_SECTORS)
    }
}

impl Effect for Kaleidoscope {
    fn apply(&self, buffer: &mut PixelBuffer) {
        if buffer.is_empty() {
            log::debug!("kaleidoscope: empty buffer, nothing to do");
            return;
        }

        // Taken before any adjustment so the wedges show the untouched image
        let scaled = rescale(buffer, SCALED_COPY_PERCENT);
        log::debug!(
            "kaleidoscope: {}x{} -> scaled copy {}x{}, {} sectors",
            buffer.width(),
            buffer.height(),
            scaled.width(),
            scaled.height(),
            self.sectors
        );

        self.prepare_background(buffer);

        let angle = sector_angle(self.sectors);
        let wedges = wedge_sequence(buffer.width(), buffer.height(), scaled.height(), self.sectors);
        for (sector, wedge) in wedges.enumerate() {
            let angle_offset = sector as f32 * angle;
            log::trace!("sector {}: offset {:.4} rad, wedge {:?}", sector, angle_offset, wedge.vertices);
            Self::paint_wedge(buffer, &scaled, &wedge, angle_offset);
        }
    }

    fn name(&self) -> &str {
        "Kaleidoscope"
    }
}

/// Apply the kaleidoscope effect with `sectors` wedges
pub fn kaleidoscope(buffer: &mut PixelBuffer, sectors: u32) {
    Kaleidoscope::new(sectors).apply(buffer);
}
