use std::collections::BTreeMap;

use crate::{index::PixelIndex, map::GeoId};
use super::Demographics;

/// Fractional number of pixels apportioned to each unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PixelShares {
    shares: BTreeMap<GeoId, f64>,
    pixels: usize, // pixels with at least one eligible unit
}

impl PixelShares {
    /// Shares given directly, e.g. from an external apportionment.
    pub fn from_shares<I: IntoIterator<Item = (GeoId, f64)>>(shares: I, pixels: usize) -> Self {
        Self { shares: shares.into_iter().collect(), pixels }
    }

    #[inline] pub fn get(&self, geo_id: &GeoId) -> Option<f64> { self.shares.get(geo_id).copied() }

    /// Units with a share, sorted by GeoId.
    pub fn iter(&self) -> impl Iterator<Item = (&GeoId, f64)> + '_ {
        self.shares.iter().map(|(geo_id, &share)| (geo_id, share))
    }

    #[inline] pub fn num_units(&self) -> usize { self.shares.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.shares.is_empty() }

    /// Number of pixels that were apportioned.
    #[inline] pub fn num_pixels(&self) -> usize { self.pixels }

    /// Sum of all shares; equals `num_pixels` up to floating-point error.
    pub fn total(&self) -> f64 { self.shares.values().sum() }
}

/// Apportion every pixel evenly among its units that have residents.
/// Units with zero or unknown population are dropped; a pixel left with no units is dropped.
pub fn apportion(index: &PixelIndex, demographics: &Demographics) -> PixelShares {
    let shares = apportion_with(index, |geo_id| demographics.is_populated(geo_id));
    tracing::info!(units = shares.num_units(), pixels = shares.num_pixels(), "apportioned pixels");
    shares
}

/// Apportion every pixel evenly among its units for which `eligible` holds.
pub fn apportion_with(index: &PixelIndex, eligible: impl Fn(&GeoId) -> bool) -> PixelShares {
    let keep = index.units().iter().map(|geo_id| eligible(geo_id)).collect::<Vec<_>>();

    let mut totals = vec![0.0f64; index.num_units()];
    let mut pixels = 0;
    let mut units = Vec::new();
    for (_, cell) in index.iter() {
        units.clear();
        units.extend(cell.iter().copied().filter(|&ordinal| keep[ordinal as usize]));
        // An empty pixel contributes nothing.
        if units.is_empty() { continue }

        pixels += 1;
        let share = 1.0 / units.len() as f64;
        for &ordinal in &units {
            totals[ordinal as usize] += share;
        }
    }

    let shares = index.units().iter().zip(totals)
        .zip(keep)
        .filter(|&(_, keep)| keep)
        .map(|((geo_id, total), _)| (geo_id.clone(), total))
        .collect();

    PixelShares { shares, pixels }
}
