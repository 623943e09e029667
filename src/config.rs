//! Pipeline constants.
//!
//! Every magic number in the analysis pipeline lives here as a plain named
//! constant. None of these are derived or tuned at runtime: the spot
//! threshold and texture tile size in particular are fixed calibration
//! points; downstream classification assumes them.

/// Application-level constants
pub const APP_NAME: &str = "Dermalens";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ── Spot detection ───────────────────────────────────────────────

/// Fixed grayscale cutoff for spot detection (0-255 scale).
/// Pixels strictly below this level count as spots.
pub const SPOT_THRESHOLD: u8 = 60;

/// Gaussian blur sigma applied before thresholding.
/// The auto-selected sigma for a 5x5 kernel:
/// 0.3 * ((5 - 1) * 0.5 - 1) + 0.8 = 1.1
pub const SPOT_BLUR_SIGMA: f32 = 1.1;

/// Spot coverage above which pigmentation recommendations trigger.
pub const SPOT_RECOMMENDATION_CUTOFF: f64 = 0.05;

// ── Texture ──────────────────────────────────────────────────────

/// Side length of the square grayscale tile used for texture analysis.
pub const TEXTURE_TILE_SIZE: u32 = 50;

/// Radius of the local binary pattern sampling ring, in pixels.
pub const LBP_RADIUS: u32 = 3;

/// Number of sample points on the local binary pattern ring.
pub const LBP_POINTS: u32 = 24;

/// Roughness above which texture recommendations trigger.
pub const ROUGHNESS_RECOMMENDATION_CUTOFF: f64 = 20.0;

// ── Skin type classification ─────────────────────────────────────

/// Brightness boundaries for the six-bucket skin type scale, decreasing.
/// Brightness strictly above a boundary maps to that bucket; at or below
/// the last boundary maps to the darkest bucket.
pub const SKIN_TYPE_BOUNDARIES: [f64; 5] = [200.0, 170.0, 140.0, 110.0, 80.0];

// ── Report geometry ──────────────────────────────────────────────

/// Report page width in millimeters (US letter).
pub const PAGE_WIDTH_MM: f32 = 215.9;

/// Report page height in millimeters (US letter).
pub const PAGE_HEIGHT_MM: f32 = 279.4;

/// Width of the color bar chart canvas in pixels.
pub const CHART_WIDTH_PX: u32 = 400;

/// Height of the color bar chart canvas in pixels.
pub const CHART_HEIGHT_PX: u32 = 200;

// ── Logging ──────────────────────────────────────────────────────

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_PKG_NAME"))
}
