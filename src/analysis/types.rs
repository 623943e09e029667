use serde::{Deserialize, Serialize};

/// Texture descriptors computed from the downsampled grayscale tile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextureMetrics {
    /// Population standard deviation of the tile's pixel values. >= 0.
    pub roughness: f64,
    /// Fraction of tile pixels whose local binary pattern code is the flat
    /// code (0). In [0, 1]. Falls back to 0.0 when pattern extraction is
    /// unavailable for the tile.
    pub pattern_uniformity: f64,
}

/// Six-bucket skin type scale, ordered lightest to darkest.
///
/// Derived solely from brightness: identical brightness always yields the
/// identical variant. Serializes as the full display label so the hosting
/// layer can emit it verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SkinType {
    #[serde(rename = "Type I - Very fair skin")]
    TypeI,
    #[serde(rename = "Type II - Fair skin")]
    TypeII,
    #[serde(rename = "Type III - Medium skin")]
    TypeIII,
    #[serde(rename = "Type IV - Olive skin")]
    TypeIV,
    #[serde(rename = "Type V - Brown skin")]
    TypeV,
    #[serde(rename = "Type VI - Dark brown to black skin")]
    TypeVI,
}

impl SkinType {
    /// Full display label, as printed in reports.
    pub fn label(&self) -> &'static str {
        match self {
            SkinType::TypeI => "Type I - Very fair skin",
            SkinType::TypeII => "Type II - Fair skin",
            SkinType::TypeIII => "Type III - Medium skin",
            SkinType::TypeIV => "Type IV - Olive skin",
            SkinType::TypeV => "Type V - Brown skin",
            SkinType::TypeVI => "Type VI - Dark brown to black skin",
        }
    }
}

impl std::fmt::Display for SkinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Complete metrics record for one analyzed image.
///
/// Produced once per analysis and immutable thereafter. Channel order in
/// `average_color` matches the pixel buffer: blue, green, red.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkinMetrics {
    /// Per-channel arithmetic mean over all pixels, BGR order.
    pub average_color: [f64; 3],
    /// Fraction of pixels classified as spots. In [0, 1].
    pub spot_percentage: f64,
    /// Texture descriptors.
    pub texture: TextureMetrics,
    /// Skin type bucket derived from `brightness`.
    pub skin_type: SkinType,
    /// Mean of the three channel means. Each channel mean is truncated to a
    /// whole unit before averaging; the classification boundaries assume
    /// this.
    pub brightness: f64,
}
