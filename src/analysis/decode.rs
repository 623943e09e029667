//! Image decoding.
//!
//! Raw bytes + declared MIME type in, [`PixelBuffer`] out. This is the only
//! place image bytes are parsed; everything downstream works on the decoded
//! buffer. A decode failure never produces a buffer.

use image::{DynamicImage, GrayImage, RgbImage};
use tracing::debug;

use super::AnalysisError;

/// Maximum input size (in bytes) before rejecting.
/// Prevents OOM on corrupt/adversarial files.
const MAX_IMAGE_BYTES: usize = 50 * 1024 * 1024; // 50 MB

/// Decoded image data: height x width x 3, 8-bit channels, BGR order.
///
/// Invariant: non-empty. Construction goes through [`PixelBuffer::decode`],
/// which rejects empty and undecodable input.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    /// BGR-interleaved pixel data, row-major.
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Decode raw image bytes into a BGR pixel buffer.
    ///
    /// The declared MIME type must begin with `image/` and the bytes must
    /// decode into a non-empty image; anything else is
    /// [`AnalysisError::InvalidImage`].
    pub fn decode(bytes: &[u8], content_type: &str) -> Result<Self, AnalysisError> {
        if !content_type.starts_with("image/") {
            return Err(AnalysisError::InvalidImage(format!(
                "unsupported content type: {content_type}"
            )));
        }
        if bytes.is_empty() {
            return Err(AnalysisError::InvalidImage("empty input".into()));
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(AnalysisError::InvalidImage(format!(
                "input too large: {} bytes",
                bytes.len()
            )));
        }

        let img = image::load_from_memory(bytes)
            .map_err(|e| AnalysisError::InvalidImage(format!("decode failed: {e}")))?;
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        if width == 0 || height == 0 {
            return Err(AnalysisError::InvalidImage("image has no pixels".into()));
        }

        let mut data = Vec::with_capacity((width as usize) * (height as usize) * 3);
        for px in rgb.pixels() {
            data.extend_from_slice(&[px.0[2], px.0[1], px.0[0]]);
        }

        debug!(width, height, bytes = bytes.len(), "Image decoded");
        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Iterate pixels as `[b, g, r]` triples in row-major order.
    pub fn bgr_pixels(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.data.chunks_exact(3)
    }

    /// Grayscale view using Rec. 601 luma: `0.114*B + 0.587*G + 0.299*R`.
    ///
    /// Computed in-crate rather than via `to_luma8`, which applies Rec. 709
    /// weights; the spot threshold is calibrated against Rec. 601.
    pub fn to_gray(&self) -> GrayImage {
        let mut gray = GrayImage::new(self.width, self.height);
        for (dst, src) in gray.pixels_mut().zip(self.data.chunks_exact(3)) {
            let luma = 0.114 * src[0] as f32 + 0.587 * src[1] as f32 + 0.299 * src[2] as f32;
            dst.0[0] = luma.round().clamp(0.0, 255.0) as u8;
        }
        gray
    }

    /// RGB view for report rendering.
    pub fn to_rgb_image(&self) -> RgbImage {
        let mut rgb = RgbImage::new(self.width, self.height);
        for (dst, src) in rgb.pixels_mut().zip(self.data.chunks_exact(3)) {
            dst.0 = [src[2], src[1], src[0]];
        }
        rgb
    }

    /// RGB view as a `DynamicImage`, for embedding in documents.
    pub fn to_dynamic_image(&self) -> DynamicImage {
        DynamicImage::ImageRgb8(self.to_rgb_image())
    }
}
