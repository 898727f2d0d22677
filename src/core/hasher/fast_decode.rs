//! Fast image decoding with format-specific optimizations.
//!
//! Uses zune-jpeg for JPEG data (1.5-2x faster than image crate),
//! falls back to image crate for other formats.

use super::traits::ImageDecoder;
use image::{DynamicImage, ImageBuffer, Luma, Rgb, Rgba};
use tracing::debug;
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;
use zune_jpeg::JpegDecoder;

/// Supported image formats for fast decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    WebP,
    Other,
}

impl ImageFormat {
    /// Detect format from the leading magic bytes
    pub fn sniff(bytes: &[u8]) -> Self {
        match image::guess_format(bytes) {
            Ok(image::ImageFormat::Jpeg) => Self::Jpeg,
            Ok(image::ImageFormat::Png) => Self::Png,
            Ok(image::ImageFormat::WebP) => Self::WebP,
            _ => Self::Other,
        }
    }
}

/// Fast image decoder that uses optimized decoders per format
#[derive(Debug, Clone, Copy, Default)]
pub struct FastDecoder;

impl FastDecoder {
    /// Fast JPEG decoding using zune-jpeg
    fn decode_jpeg(bytes: &[u8]) -> Option<DynamicImage> {
        // Configure decoder to output RGB
        let options = DecoderOptions::new_fast().jpeg_set_out_colorspace(ColorSpace::RGB);
        let mut decoder = JpegDecoder::new_with_options(bytes, options);

        let pixels = match decoder.decode() {
            Ok(pixels) => pixels,
            Err(e) => {
                debug!("zune-jpeg decode failed: {:?}", e);
                return None;
            }
        };

        let info = decoder.info()?;
        let width = info.width as u32;
        let height = info.height as u32;

        // Get actual output colorspace after decoding
        let out_colorspace = decoder.get_output_colorspace().unwrap_or(ColorSpace::RGB);

        match out_colorspace {
            ColorSpace::RGB => {
                let buffer: ImageBuffer<Rgb<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(width, height, pixels)?;
                Some(DynamicImage::ImageRgb8(buffer))
            }
            ColorSpace::RGBA => {
                let buffer: ImageBuffer<Rgba<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(width, height, pixels)?;
                Some(DynamicImage::ImageRgba8(buffer))
            }
            ColorSpace::Luma => {
                let buffer: ImageBuffer<Luma<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(width, height, pixels)?;
                Some(DynamicImage::ImageLuma8(buffer))
            }
            // Unsupported colorspace, let the image crate handle it
            _ => None,
        }
    }

    /// Fallback to image crate for everything else
    fn decode_fallback(bytes: &[u8]) -> Option<DynamicImage> {
        match image::load_from_memory(bytes) {
            Ok(image) => Some(image),
            Err(e) => {
                debug!("image decode failed: {}", e);
                None
            }
        }
    }
}

impl ImageDecoder for FastDecoder {
    fn decode(&self, bytes: &[u8]) -> Option<DynamicImage> {
        match ImageFormat::sniff(bytes) {
            ImageFormat::Jpeg => {
                Self::decode_jpeg(bytes).or_else(|| Self::decode_fallback(bytes))
            }
            _ => Self::decode_fallback(bytes),
        }
    }
}
