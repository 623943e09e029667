//! Metrics extraction.
//!
//! Computes the full [`SkinMetrics`] record from a decoded pixel buffer:
//! average color, brightness, spot coverage and texture descriptors, plus
//! the skin type bucket derived from brightness.

use image::{GrayImage, Luma};
use tracing::debug;

use super::classify;
use super::decode::PixelBuffer;
use super::texture;
use super::types::SkinMetrics;
use crate::config::{SPOT_BLUR_SIGMA, SPOT_THRESHOLD};

/// Extract all metrics for one image.
pub fn extract(buffer: &PixelBuffer) -> SkinMetrics {
    let gray = buffer.to_gray();

    let average_color = average_color(buffer);
    let brightness = brightness_from(&average_color);
    let skin_type = classify::skin_type_for(brightness);

    let mask = threshold_mask(&gray);
    let spot_percentage = spot_fraction(&mask);

    let texture = texture::analyze(&gray);

    debug!(
        brightness,
        spot_percentage,
        roughness = texture.roughness,
        skin_type = %skin_type,
        "Metrics extracted"
    );

    SkinMetrics {
        average_color,
        spot_percentage,
        texture,
        skin_type,
        brightness,
    }
}

/// Per-channel arithmetic mean over all pixels, BGR order.
pub fn average_color(buffer: &PixelBuffer) -> [f64; 3] {
    let mut sums = [0u64; 3];
    for px in buffer.bgr_pixels() {
        sums[0] += px[0] as u64;
        sums[1] += px[1] as u64;
        sums[2] += px[2] as u64;
    }
    let n = buffer.pixel_count() as f64;
    [
        sums[0] as f64 / n,
        sums[1] as f64 / n,
        sums[2] as f64 / n,
    ]
}

/// Mean of the three channel means.
///
/// Each channel mean is truncated to a whole unit before averaging; the
/// skin type boundaries assume this, so reports stay stable near them.
pub(crate) fn brightness_from(average_color: &[f64; 3]) -> f64 {
    (average_color[0].trunc() + average_color[1].trunc() + average_color[2].trunc()) / 3.0
}

/// Spot mask for a pixel buffer: spot pixels white (255), background black.
///
/// Grayscale is blurred with the fixed Gaussian, then cut at the fixed
/// threshold: strictly below the threshold is a spot, at or above is
/// background. Not adaptive to image lighting.
pub fn spot_mask(buffer: &PixelBuffer) -> GrayImage {
    threshold_mask(&buffer.to_gray())
}

fn threshold_mask(gray: &GrayImage) -> GrayImage {
    let blurred = image::imageops::blur(gray, SPOT_BLUR_SIGMA);
    let mut mask = GrayImage::new(gray.width(), gray.height());
    for (dst, src) in mask.pixels_mut().zip(blurred.pixels()) {
        *dst = Luma([if src.0[0] < SPOT_THRESHOLD { 255 } else { 0 }]);
    }
    mask
}

fn spot_fraction(mask: &GrayImage) -> f64 {
    let spots = mask.pixels().filter(|p| p.0[0] == 255).count();
    spots as f64 / ((mask.width() as f64) * (mask.height() as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::solid_buffer;
    use crate::analysis::SkinType;

    #[test]
    fn average_color_is_per_channel_mean_in_bgr_order() {
        // Solid RGB (10, 20, 30) -> BGR means (30, 20, 10).
        let buffer = solid_buffer(8, 8, [10, 20, 30]);
        let avg = average_color(&buffer);
        assert_eq!(avg, [30.0, 20.0, 10.0]);
    }

    #[test]
    fn brightness_truncates_each_channel_before_averaging() {
        let b = brightness_from(&[10.9, 20.9, 30.9]);
        assert_eq!(b, 20.0);
    }

    #[test]
    fn solid_black_image_is_all_spots() {
        let buffer = solid_buffer(32, 32, [0, 0, 0]);
        let metrics = extract(&buffer);
        assert_eq!(metrics.spot_percentage, 1.0);
        assert_eq!(metrics.brightness, 0.0);
        assert_eq!(metrics.skin_type, SkinType::TypeVI);
    }

    #[test]
    fn solid_white_image_has_no_spots() {
        let buffer = solid_buffer(32, 32, [255, 255, 255]);
        let metrics = extract(&buffer);
        assert_eq!(metrics.spot_percentage, 0.0);
        assert_eq!(metrics.brightness, 255.0);
        assert_eq!(metrics.skin_type, SkinType::TypeI);
    }

    #[test]
    fn spot_percentage_stays_in_unit_interval() {
        let img = image::RgbImage::from_fn(64, 64, |x, _| {
            image::Rgb([(x * 4) as u8, (x * 4) as u8, (x * 4) as u8])
        });
        let buffer = crate::analysis::fixtures::buffer_from(&img);
        let metrics = extract(&buffer);
        assert!((0.0..=1.0).contains(&metrics.spot_percentage));
        assert!((0.0..=1.0).contains(&metrics.texture.pattern_uniformity));
    }

    #[test]
    fn mask_is_strictly_binary() {
        let img = image::RgbImage::from_fn(32, 32, |x, y| {
            image::Rgb([((x * y) % 256) as u8, 90, 120])
        });
        let buffer = crate::analysis::fixtures::buffer_from(&img);
        let mask = spot_mask(&buffer);
        assert!(mask.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }

    #[test]
    fn mid_gray_above_threshold_is_background() {
        let buffer = solid_buffer(16, 16, [100, 100, 100]);
        let mask = spot_mask(&buffer);
        assert!(mask.pixels().all(|p| p.0[0] == 0));
    }
}
