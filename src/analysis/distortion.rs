use serde::Serialize;

use crate::map::GeoId;
use super::{Dataset, PixelShares, Statistic};

/// A demographic's share of the population next to its share of the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Distortion {
    pub population_ratio: f64, // ΣN / ΣD
    pub pixel_ratio: f64,      // Σ(N/D · share) / Σshare
    pub total_population: f64, // ΣD
    pub total_pixels: f64,     // Σshare
    pub units: usize,          // units that contributed
}

impl Distortion {
    /// How much the map over- or under-states the demographic, in ratio points.
    #[inline] pub fn gap(&self) -> f64 { self.pixel_ratio - self.population_ratio }
}

/// Compare the population-weighted ratio ΣN/ΣD to the ratio implied by drawing each
/// unit's N/D over its pixel share.
///
/// A unit whose denominator is zero or unknown has no relevant people and contributes
/// nothing; so does a unit with an unknown numerator. Returns `None` if nothing contributed.
pub fn distortion(
    shares: &PixelShares,
    numerator: impl Fn(&GeoId) -> Option<f64>,
    denominator: impl Fn(&GeoId) -> Option<f64>,
) -> Option<Distortion> {
    let mut num_population = 0.0;
    let mut den_population = 0.0;
    let mut num_pixels = 0.0;
    let mut den_pixels = 0.0;
    let mut units = 0;

    for (geo_id, pixels) in shares.iter() {
        let Some(d) = denominator(geo_id).filter(|&d| d != 0.0) else { continue };
        let Some(n) = numerator(geo_id) else { continue };

        num_population += n;
        den_population += d;
        num_pixels += n / d * pixels;
        den_pixels += pixels;
        units += 1;
    }

    if den_population == 0.0 || den_pixels == 0.0 {
        return None;
    }

    Some(Distortion {
        population_ratio: num_population / den_population,
        pixel_ratio: num_pixels / den_pixels,
        total_population: den_population,
        total_pixels: den_pixels,
        units,
    })
}

/// Distortion of a built-in statistic, or `None` if it has no denominator or no unit contributed.
pub fn statistic_distortion(shares: &PixelShares, statistic: Statistic, data: &Dataset) -> Option<Distortion> {
    if !statistic.has_denominator() {
        return None;
    }
    let result = distortion(
        shares,
        |geo_id| statistic.numerator(data, geo_id),
        |geo_id| statistic.denominator(data, geo_id),
    );
    match &result {
        Some(d) => tracing::info!(
            statistic = %statistic.title(),
            population_ratio = d.population_ratio,
            pixel_ratio = d.pixel_ratio,
            units = d.units,
            "computed distortion",
        ),
        None => tracing::warn!(statistic = %statistic.title(), "no unit has data for this statistic"),
    }
    result
}
