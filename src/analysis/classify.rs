//! Classification and recommendations.
//!
//! Skin type is a pure lookup on brightness against five fixed boundaries.
//! Recommendations are a pure function of the metrics record: independent
//! rules applied in a fixed order, so identical metrics always produce the
//! identical list.

use super::types::{SkinMetrics, SkinType};
use crate::config::{
    ROUGHNESS_RECOMMENDATION_CUTOFF, SKIN_TYPE_BOUNDARIES, SPOT_RECOMMENDATION_CUTOFF,
};

/// Map brightness to its skin type bucket.
///
/// Boundaries are exhaustive: every brightness maps to exactly one bucket,
/// with anything at or below the lowest boundary landing in the darkest.
pub fn skin_type_for(brightness: f64) -> SkinType {
    if brightness > SKIN_TYPE_BOUNDARIES[0] {
        SkinType::TypeI
    } else if brightness > SKIN_TYPE_BOUNDARIES[1] {
        SkinType::TypeII
    } else if brightness > SKIN_TYPE_BOUNDARIES[2] {
        SkinType::TypeIII
    } else if brightness > SKIN_TYPE_BOUNDARIES[3] {
        SkinType::TypeIV
    } else if brightness > SKIN_TYPE_BOUNDARIES[4] {
        SkinType::TypeV
    } else {
        SkinType::TypeVI
    }
}

/// Build the recommendation list for a metrics record.
///
/// Rule order is fixed: skin type, spots, texture, then the general pair.
/// Always non-empty.
pub fn recommendations(metrics: &SkinMetrics) -> Vec<String> {
    let mut recs = Vec::new();

    match metrics.skin_type {
        SkinType::TypeI | SkinType::TypeII => {
            recs.push("Use sunscreen with SPF 50+ daily, even on cloudy days.".to_string());
            recs.push(
                "Avoid prolonged sun exposure, especially between 10 AM and 4 PM.".to_string(),
            );
        }
        SkinType::TypeIII | SkinType::TypeIV => {
            recs.push("Use sunscreen with SPF 30+ daily.".to_string());
            recs.push("Limit sun exposure during peak hours.".to_string());
        }
        SkinType::TypeV | SkinType::TypeVI => {
            recs.push("Use sunscreen with SPF 15+ daily.".to_string());
        }
    }

    if metrics.spot_percentage > SPOT_RECOMMENDATION_CUTOFF {
        recs.push(
            "Consider products with ingredients like niacinamide or vitamin C to address hyperpigmentation."
                .to_string(),
        );
        recs.push(
            "Consult a dermatologist for a personalized treatment plan for spots.".to_string(),
        );
    }

    if metrics.texture.roughness > ROUGHNESS_RECOMMENDATION_CUTOFF {
        recs.push("Use gentle exfoliants 1-2 times per week to improve skin texture.".to_string());
        recs.push("Consider adding a hydrating serum to your skincare routine.".to_string());
    }

    recs.push(
        "Maintain a consistent skincare routine with gentle cleansing twice daily.".to_string(),
    );
    recs.push("Stay hydrated by drinking plenty of water throughout the day.".to_string());

    recs
}
