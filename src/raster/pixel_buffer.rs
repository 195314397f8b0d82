use super::pixel::{Pixel, SENTINEL};

/// Bytes per pixel in the packed store
pub const CHANNELS: usize = 3;

// ============================================================================
// PixelBuffer
// ============================================================================

/// Packed RGB888 raster, row-major, no stride padding
///
/// The store holds exactly `width * height * 3` bytes, or nothing at all when
/// the buffer has zero pixels. Every operator in this crate reads and writes
/// through this type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Create an empty 0x0 buffer with no storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a black buffer of the given size
    pub fn with_size(width: u32, height: u32) -> Self {
        let mut buffer = Self::new();
        buffer.resize(width, height);
        buffer
    }

    /// Create a buffer filled with a single color
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Self {
        let mut buffer = Self::with_size(width, height);
        buffer.fill(pixel);
        buffer
    }

    /// Wrap packed RGB bytes. Returns None if `data` is not `width * height * 3` long.
    pub fn from_rgb(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if data.len() != byte_count(width, height) {
            return None;
        }
        Some(Self {
            pixels: data,
            width,
            height,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// True when the buffer holds no storage
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Raw RGB bytes, `width * height * 3` long
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable access to raw bytes for per-channel operators
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Consume the buffer and hand back its bytes
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    /// Change the reported dimensions.
    ///
    /// The store is reallocated (and zeroed) only when the total pixel count
    /// changes. Reshaping to the same count, e.g. 10x10 to 20x5, keeps the old
    /// bytes in place and only updates `width`/`height`; rows are then read
    /// with the new stride until the caller overwrites them.
    pub fn resize(&mut self, width: u32, height: u32) {
        let new_count = width as usize * height as usize;
        if new_count != self.pixel_count() {
            self.pixels = if new_count == 0 {
                Vec::new()
            } else {
                vec![0; new_count * CHANNELS]
            };
        }
        self.width = width;
        self.height = height;
    }

    /// Copy-assign from `src`, reusing this buffer's storage when the pixel count matches
    pub fn copy_from(&mut self, src: &PixelBuffer) {
        self.resize(src.width, src.height);
        self.pixels.copy_from_slice(&src.pixels);
    }

    /// Move the contents out, leaving this buffer empty
    pub fn take(&mut self) -> PixelBuffer {
        std::mem::take(self)
    }

    /// Set every pixel to one color
    pub fn fill(&mut self, pixel: Pixel) {
        for chunk in self.pixels.chunks_exact_mut(CHANNELS) {
            chunk.copy_from_slice(&pixel.as_array());
        }
    }

    /// Byte offset of pixel (col, row); caller guarantees bounds
    #[inline]
    fn pixel_index(&self, col: u32, row: u32) -> usize {
        (row as usize * self.width as usize + col as usize) * CHANNELS
    }

    /// Check if coordinates are within bounds
    #[inline]
    fn in_bounds(&self, col: i32, row: i32) -> bool {
        col >= 0 && (col as i64) < self.width as i64 && row >= 0 && (row as i64) < self.height as i64
    }

    /// Read a pixel with clamp-to-edge addressing.
    /// Returns `SENTINEL` when the buffer holds no storage.
    #[inline]
    pub fn get_pixel(&self, col: i32, row: i32) -> Pixel {
        if self.pixels.is_empty() {
            return SENTINEL;
        }
        let col = (col.max(0) as u32).min(self.width - 1);
        let row = (row.max(0) as u32).min(self.height - 1);
        let idx = self.pixel_index(col, row);
        Pixel::from_slice(&self.pixels[idx..idx + CHANNELS])
    }

    /// Sample at a fractional position with bilinear interpolation
    ///
    /// The coordinates are clamped into the image first. The four neighbours
    /// come from `get_pixel`, so sampling past the last row or column reuses
    /// the edge pixels.
    ///
    /// ```text
    ///      AB
    ///  A o----o B
    ///    |  | |
    ///    |--x-|
    ///  C o----o D
    ///      CD
    /// ```
    pub fn sample_bilinear(&self, col: f32, row: f32) -> Pixel {
        if self.pixels.is_empty() {
            return SENTINEL;
        }

        let col = if col < 0.0 {
            0.0
        } else if col >= self.width as f32 {
            (self.width - 1) as f32
        } else {
            col
        };
        let row = if row < 0.0 {
            0.0
        } else if row >= self.height as f32 {
            (self.height - 1) as f32
        } else {
            row
        };

        let fx = col.fract();
        let fy = row.fract();
        let x0 = col.trunc() as i32;
        let y0 = row.trunc() as i32;

        let a = self.get_pixel(x0, y0);
        let b = self.get_pixel(x0 + 1, y0);
        let c = self.get_pixel(x0, y0 + 1);
        let d = self.get_pixel(x0 + 1, y0 + 1);

        let ab = (1.0 - fx) * a + fx * b;
        let cd = (1.0 - fx) * c + fx * d;
        (1.0 - fy) * ab + fy * cd
    }

    /// Write a pixel; out-of-bounds writes are ignored
    #[inline]
    pub fn set_pixel(&mut self, col: i32, row: i32, pixel: Pixel) {
        if self.in_bounds(col, row) {
            let idx = self.pixel_index(col as u32, row as u32);
            self.pixels[idx..idx + CHANNELS].copy_from_slice(&pixel.as_array());
        }
    }

    /// Iterate over `(col, row, pixel)` in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, Pixel)> + '_ {
        let width = self.width.max(1);
        self.pixels
            .chunks_exact(CHANNELS)
            .enumerate()
            .map(move |(i, px)| ((i as u32) % width, (i as u32) / width, Pixel::from_slice(px)))
    }
}

#[inline]
fn byte_count(width: u32, height: u32) -> usize {
    width as usize * height as usize * CHANNELS
}
