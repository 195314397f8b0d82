//! Codec boundary: compressed bytes in, RGB888 buffers out, and back
//!
//! The effect pipeline never sees file formats. A [`Codec`] turns bytes into
//! `(width, height, pixels)` and back; [`load`] and [`save`] add the file I/O
//! and the optional rescale on load.

use std::fs;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageFormat};

use crate::error::{LoadError, SaveError};
use crate::raster::PixelBuffer;
use crate::resample::rescale;

/// Quality used when the caller does not pick one
pub const DEFAULT_QUALITY: u8 = 90;

/// Raw decoder output: packed RGB, row-major, no padding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Compressed-format encoder/decoder
pub trait Codec {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, LoadError>;

    /// Encode packed RGB data; `quality` is a percentage in 0..=100
    fn encode(&self, data: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>, SaveError>;
}

// ============================================================================
// JPEG
// ============================================================================

/// Baseline JPEG via the `image` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegCodec;

impl Codec for JpegCodec {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, LoadError> {
        let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Jpeg)
            .map_err(|e| LoadError::Decode(e.to_string()))?;
        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();
        Ok(DecodedImage {
            width,
            height,
            data: rgb.into_raw(),
        })
    }

    fn encode(&self, data: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>, SaveError> {
        if width == 0 || height == 0 {
            return Err(SaveError::Encode(format!("cannot encode a {}x{} image", width, height)));
        }

        // The encoder's quantization tables need quality >= 1
        let quality = quality.clamp(1, 100);
        let mut out = Vec::new();
        JpegEncoder::new_with_quality(&mut out, quality)
            .encode(data, width, height, ExtendedColorType::Rgb8)
            .map_err(|e| SaveError::Encode(e.to_string()))?;
        Ok(out)
    }
}

// ============================================================================
// File helpers
// ============================================================================

/// Read and decode a JPEG file, then rescale it to `scale_percent`
pub fn load(path: impl AsRef<Path>, scale_percent: i32) -> Result<PixelBuffer, LoadError> {
    load_with(&JpegCodec, path, scale_percent)
}

/// Read and decode with a specific codec
pub fn load_with<C: Codec + ?Sized>(
    codec: &C,
    path: impl AsRef<Path>,
    scale_percent: i32,
) -> Result<PixelBuffer, LoadError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let decoded = codec.decode(&bytes)?;
    let (width, height) = (decoded.width, decoded.height);
    let buffer = PixelBuffer::from_rgb(width, height, decoded.data).ok_or_else(|| {
        LoadError::Decode(format!("decoder returned the wrong byte count for {}x{}", width, height))
    })?;
    log::debug!("decoded {}: {}x{} ({} bytes)", path.display(), width, height, bytes.len());

    if scale_percent == 100 {
        Ok(buffer)
    } else {
        Ok(rescale(&buffer, scale_percent))
    }
}

/// Encode as JPEG and write to `path`
///
/// `quality` is clamped to 0..=100. Nothing is written unless encoding succeeded.
pub fn save(buffer: &PixelBuffer, path: impl AsRef<Path>, quality: i32) -> Result<(), SaveError> {
    save_with(&JpegCodec, buffer, path, quality)
}

/// Encode with a specific codec and write to `path`
pub fn save_with<C: Codec + ?Sized>(
    codec: &C,
    buffer: &PixelBuffer,
    path: impl AsRef<Path>,
    quality: i32,
) -> Result<(), SaveError> {
    let path = path.as_ref();
    let clamped = quality.clamp(0, 100);
    if clamped != quality {
        log::warn!("quality {} out of range, using {}", quality, clamped);
    }

    let bytes = codec.encode(buffer.as_bytes(), buffer.width(), buffer.height(), clamped as u8)?;
    fs::write(path, &bytes).map_err(|source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Pixel;
    use std::cell::Cell;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("kaleidoscope-{}-{}", std::process::id(), name))
    }

    /// Stores width and height as two little-endian u32s followed by the raw bytes
    struct RawCodec;

    impl Codec for RawCodec {
        fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, LoadError> {
            if bytes.len() < 8 {
                return Err(LoadError::Decode("short header".into()));
            }
            let width = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
            let height = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
            Ok(DecodedImage {
                width,
                height,
                data: bytes[8..].to_vec(),
            })
        }

        fn encode(&self, data: &[u8], width: u32, height: u32, _quality: u8) -> Result<Vec<u8>, SaveError> {
            let mut out = Vec::with_capacity(8 + data.len());
            out.extend_from_slice(&width.to_le_bytes());
            out.extend_from_slice(&height.to_le_bytes());
            out.extend_from_slice(data);
            Ok(out)
        }
    }

    #[test]
    fn test_jpeg_encode_then_decode_keeps_size() {
        let buffer = PixelBuffer::filled(24, 16, Pixel::new(200, 120, 40));
        let bytes = JpegCodec.encode(buffer.as_bytes(), 24, 16, 90).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

        let decoded = JpegCodec.decode(&bytes).unwrap();
        assert_eq!((decoded.width, decoded.height), (24, 16));
        assert_eq!(decoded.data.len(), 24 * 16 * 3);
        // Flat color survives lossy compression closely
        let px = Pixel::from_slice(&decoded.data[..3]);
        assert!((px.r as i32 - 200).abs() <= 4, "{:?}", px);
    }

    #[test]
    fn test_jpeg_decode_garbage_fails() {
        let err = JpegCodec.decode(b"definitely not a jpeg").unwrap_err();
        assert!(matches!(err, LoadError::Decode(_)));
    }

    #[test]
    fn test_jpeg_encode_empty_fails() {
        let err = JpegCodec.encode(&[], 0, 0, 90).unwrap_err();
        assert!(matches!(err, SaveError::Encode(_)));
    }

    #[test]
    fn test_jpeg_quality_zero_is_accepted() {
        let buffer = PixelBuffer::filled(8, 8, Pixel::gray(77));
        assert!(JpegCodec.encode(buffer.as_bytes(), 8, 8, 0).is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load(temp_path("does-not-exist.jpg"), 100).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_load_with_rescales() {
        let path = temp_path("rescale.raw");
        let buffer = PixelBuffer::filled(8, 6, Pixel::new(1, 2, 3));
        save_with(&RawCodec, &buffer, &path, 90).unwrap();

        let full = load_with(&RawCodec, &path, 100).unwrap();
        assert_eq!(full, buffer);

        let half = load_with(&RawCodec, &path, 50).unwrap();
        assert_eq!((half.width(), half.height()), (4, 3));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_with_size_mismatch() {
        let path = temp_path("mismatch.raw");
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&4u32.to_le_bytes());
        bytes.extend_from_slice(&4u32.to_le_bytes());
        bytes.extend_from_slice(&[0; 5]);
        fs::write(&path, bytes).unwrap();

        let err = load_with(&RawCodec, &path, 100).unwrap_err();
        assert!(matches!(err, LoadError::Decode(_)));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_into_missing_directory() {
        let buffer = PixelBuffer::filled(4, 4, Pixel::gray(10));
        let path = temp_path("no-such-dir").join("out.jpg");
        let err = save(&buffer, &path, 90).unwrap_err();
        assert!(matches!(err, SaveError::Io { .. }));
    }

    #[test]
    fn test_failed_encode_writes_nothing() {
        let path = temp_path("never-written.jpg");
        let _ = fs::remove_file(&path);
        let err = save(&PixelBuffer::new(), &path, 90).unwrap_err();
        assert!(matches!(err, SaveError::Encode(_)));
        assert!(!path.exists());
    }

    /// Remembers the quality it was asked to encode with
    #[derive(Default)]
    struct QualityRecorder {
        seen: Cell<Option<u8>>,
    }

    impl Codec for QualityRecorder {
        fn decode(&self, _bytes: &[u8]) -> Result<DecodedImage, LoadError> {
            Err(LoadError::Decode("encode only".into()))
        }

        fn encode(&self, data: &[u8], _width: u32, _height: u32, quality: u8) -> Result<Vec<u8>, SaveError> {
            self.seen.set(Some(quality));
            Ok(data.to_vec())
        }
    }

    #[test]
    fn test_save_clamps_quality() {
        let buffer = PixelBuffer::filled(2, 2, Pixel::gray(5));
        let path = temp_path("quality.raw");
        let codec = QualityRecorder::default();

        for (requested, expected) in [(250, 100), (-7, 0), (55, 55)] {
            save_with(&codec, &buffer, &path, requested).unwrap();
            assert_eq!(codec.seen.get(), Some(expected));
        }
        let _ = fs::remove_file(&path);
    }
}
