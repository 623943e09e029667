//! Texture descriptors.
//!
//! The grayscale image is downsampled to a fixed square tile; roughness is
//! the tile's population standard deviation, and pattern uniformity is the
//! fraction of tile pixels carrying the flat local-binary-pattern code.
//!
//! Pattern extraction is the one step allowed to degrade: when the sampling
//! ring does not fit the tile, uniformity falls back to 0.0 instead of
//! failing the analysis. No other failure is recovered here.

use image::{imageops::FilterType, GrayImage};
use tracing::debug;

use super::types::TextureMetrics;
use crate::config::{LBP_POINTS, LBP_RADIUS, TEXTURE_TILE_SIZE};

/// Compute texture descriptors for a grayscale image.
pub fn analyze(gray: &GrayImage) -> TextureMetrics {
    let tile = image::imageops::resize(
        gray,
        TEXTURE_TILE_SIZE,
        TEXTURE_TILE_SIZE,
        FilterType::Triangle,
    );

    let roughness = population_std_dev(&tile);
    let pattern_uniformity = match flat_code_fraction(&tile) {
        Some(fraction) => fraction,
        None => {
            debug!(
                tile = TEXTURE_TILE_SIZE,
                radius = LBP_RADIUS,
                "Pattern extraction unavailable for tile, using flat fallback"
            );
            0.0
        }
    };

    TextureMetrics {
        roughness,
        pattern_uniformity,
    }
}

/// Population standard deviation of all pixel values.
pub(crate) fn population_std_dev(tile: &GrayImage) -> f64 {
    let n = (tile.width() as f64) * (tile.height() as f64);
    let mean = tile.pixels().map(|p| p.0[0] as f64).sum::<f64>() / n;
    let variance = tile
        .pixels()
        .map(|p| {
            let d = p.0[0] as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    variance.sqrt()
}

/// Fraction of tile pixels whose rotation-invariant uniform local binary
/// pattern code is 0 (every ring sample strictly below the center).
///
/// Returns `None` when the sampling ring cannot fit inside the tile, the
/// single condition under which pattern extraction is unavailable.
pub(crate) fn flat_code_fraction(tile: &GrayImage) -> Option<f64> {
    let ring_span = 2 * LBP_RADIUS + 1;
    if tile.width() < ring_span || tile.height() < ring_span {
        return None;
    }

    let total = (tile.width() as usize) * (tile.height() as usize);
    let mut flat = 0usize;
    for y in 0..tile.height() {
        for x in 0..tile.width() {
            if uniform_lbp_code(tile, x, y) == 0 {
                flat += 1;
            }
        }
    }
    Some(flat as f64 / total as f64)
}

/// Rotation-invariant uniform LBP code for one pixel.
///
/// Samples `LBP_POINTS` positions on a circle of radius `LBP_RADIUS` with
/// bilinear interpolation; a sample at or above the center sets its bit.
/// Uniform patterns (at most two 0/1 transitions around the ring) encode as
/// their number of set bits; all others share the non-uniform code
/// `LBP_POINTS + 1`.
fn uniform_lbp_code(tile: &GrayImage, x: u32, y: u32) -> u32 {
    let center = tile.get_pixel(x, y).0[0] as f64;
    let points = LBP_POINTS as usize;
    let radius = LBP_RADIUS as f64;

    let mut bits = [false; 32];
    for (p, bit) in bits.iter_mut().take(points).enumerate() {
        let theta = 2.0 * std::f64::consts::PI * (p as f64) / (points as f64);
        let sx = x as f64 + radius * theta.cos();
        let sy = y as f64 - radius * theta.sin();
        *bit = sample_bilinear(tile, sx, sy) >= center;
    }

    let transitions = (0..points)
        .filter(|&p| bits[p] != bits[(p + 1) % points])
        .count();
    let ones = bits.iter().take(points).filter(|&&b| b).count() as u32;

    if transitions <= 2 {
        ones
    } else {
        LBP_POINTS + 1
    }
}

/// Bilinear interpolation at fractional coordinates, clamped to the tile so
/// every ring sample is defined for every pixel.
fn sample_bilinear(tile: &GrayImage, fx: f64, fy: f64) -> f64 {
    let max_x = (tile.width() - 1) as f64;
    let max_y = (tile.height() - 1) as f64;
    let fx = fx.clamp(0.0, max_x);
    let fy = fy.clamp(0.0, max_y);

    let x0 = fx.floor() as u32;
    let y0 = fy.floor() as u32;
    let x1 = (x0 + 1).min(tile.width() - 1);
    let y1 = (y0 + 1).min(tile.height() - 1);
    let tx = fx - x0 as f64;
    let ty = fy - y0 as f64;

    let v00 = tile.get_pixel(x0, y0).0[0] as f64;
    let v10 = tile.get_pixel(x1, y0).0[0] as f64;
    let v01 = tile.get_pixel(x0, y1).0[0] as f64;
    let v11 = tile.get_pixel(x1, y1).0[0] as f64;

    let top = v00 * (1.0 - tx) + v10 * tx;
    let bottom = v01 * (1.0 - tx) + v11 * tx;
    top * (1.0 - ty) + bottom * ty
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn flat_tile(size: u32, value: u8) -> GrayImage {
        GrayImage::from_pixel(size, size, Luma([value]))
    }

    #[test]
    fn flat_tile_has_zero_roughness() {
        assert_eq!(population_std_dev(&flat_tile(50, 128)), 0.0);
    }

    #[test]
    fn checkerboard_roughness_is_half_range() {
        let tile = GrayImage::from_fn(50, 50, |x, y| {
            Luma([if (x + y) % 2 == 0 { 0 } else { 255 }])
        });
        assert!((population_std_dev(&tile) - 127.5).abs() < 1e-9);
    }

    #[test]
    fn flat_tile_carries_no_flat_codes() {
        // On a flat tile every ring sample equals the center, so every bit is
        // set and the code is LBP_POINTS, never 0.
        let fraction = flat_code_fraction(&flat_tile(50, 128)).unwrap();
        assert_eq!(fraction, 0.0);
    }

    #[test]
    fn lone_bright_pixel_is_the_only_flat_code() {
        let mut tile = flat_tile(50, 10);
        tile.put_pixel(25, 25, Luma([200]));
        let fraction = flat_code_fraction(&tile).unwrap();
        assert!((fraction - 1.0 / 2500.0).abs() < 1e-12);
    }

    #[test]
    fn fraction_stays_in_unit_interval() {
        let tile = GrayImage::from_fn(50, 50, |x, y| Luma([((x * 7 + y * 13) % 256) as u8]));
        let fraction = flat_code_fraction(&tile).unwrap();
        assert!((0.0..=1.0).contains(&fraction));
    }

    #[test]
    fn ring_too_large_for_tile_is_unavailable() {
        assert!(flat_code_fraction(&flat_tile(5, 10)).is_none());
    }

    #[test]
    fn analyze_handles_degenerate_input() {
        // A 1x1 source still resizes to the fixed tile, so analysis succeeds
        // and both descriptors are defined.
        let metrics = analyze(&flat_tile(1, 77));
        assert_eq!(metrics.roughness, 0.0);
        assert_eq!(metrics.pattern_uniformity, 0.0);
    }

    #[test]
    fn analyze_reports_nonzero_roughness_for_textured_input() {
        let gray = GrayImage::from_fn(200, 200, |x, _| Luma([if x < 100 { 30 } else { 220 }]));
        let metrics = analyze(&gray);
        assert!(metrics.roughness > 20.0);
        assert!((0.0..=1.0).contains(&metrics.pattern_uniformity));
    }
}
