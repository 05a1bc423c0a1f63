//! "Where does X% of the population live": rank units by how densely the statistic
//! packs into their pixels and highlight the densest ones.

use std::{cmp::Ordering, collections::BTreeSet};

use serde::Serialize;

use crate::{index::PixelIndex, map::GeoId, raster::RasterGrid};
use super::{PixelShares, percent};

/// One ranked unit.
#[derive(Debug, Clone, PartialEq)]
pub struct RankEntry {
    pub geo_id: GeoId,
    pub value: f64,
    pub share: f64,
    pub density: f64,    // value per pixel; +inf when the unit has no pixel share
    pub cumulative: f64, // running value total up to and including this unit, over the grand total
}

/// Units ordered from densest to sparsest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranking {
    entries: Vec<RankEntry>,
    total: f64,
}

impl Ranking {
    #[inline] pub fn entries(&self) -> &[RankEntry] { &self.entries }

    /// Grand total of the ranked values.
    #[inline] pub fn total(&self) -> f64 { self.total }

    #[inline] pub fn len(&self) -> usize { self.entries.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Units whose cumulative fraction is at most `fraction`.
    /// A non-positive grand total highlights nothing.
    pub fn highlighted(&self, fraction: f64) -> BTreeSet<GeoId> {
        if self.total <= 0.0 {
            return BTreeSet::new();
        }
        self.entries.iter()
            .take_while(|entry| entry.cumulative <= fraction)
            .map(|entry| entry.geo_id.clone())
            .collect()
    }

    /// Sum of the values of `units`.
    pub fn value_of(&self, units: &BTreeSet<GeoId>) -> f64 {
        self.entries.iter()
            .filter(|entry| units.contains(&entry.geo_id))
            .map(|entry| entry.value)
            .sum()
    }
}

/// Rank every unit with a pixel share by `value / share`, densest first.
///
/// Ties (including several zero-share units) are broken by GeoId ascending, so the
/// ranking is fully deterministic. Units whose value is unknown are left out.
pub fn rank(shares: &PixelShares, value: impl Fn(&GeoId) -> Option<f64>) -> Ranking {
    let mut entries = shares.iter()
        .filter_map(|(geo_id, share)| {
            let value = value(geo_id)?;
            // Zero share: ranked first instead of dividing by zero.
            let density = if share > 0.0 { value / share } else { f64::INFINITY };
            Some(RankEntry { geo_id: geo_id.clone(), value, share, density, cumulative: 0.0 })
        })
        .collect::<Vec<_>>();

    entries.sort_by(|a, b| match b.density.total_cmp(&a.density) {
        Ordering::Equal => a.geo_id.cmp(&b.geo_id),
        ordering => ordering,
    });

    let total = entries.iter().map(|entry| entry.value).sum::<f64>();
    let mut running = 0.0;
    for entry in &mut entries {
        running += entry.value;
        entry.cumulative = if total > 0.0 { running / total } else { 0.0 };
    }

    Ranking { entries, total }
}

/// Per-pixel fraction of the pixel apportioned to highlighted units.
#[derive(Debug, Clone, PartialEq)]
pub struct HotMap {
    grid: RasterGrid,
    values: Vec<Option<f64>>, // None where the pixel has no residents
    pixels: usize,
    hot_pixels: f64,
}

impl HotMap {
    #[inline] pub fn grid(&self) -> RasterGrid { self.grid }

    /// Highlighted fraction of the pixel at `(x, y)` in `[0, 1]`, or `None` if nobody lives there.
    #[inline]
    pub fn get(&self, pixel: (u32, u32)) -> Option<f64> {
        if !self.grid.contains(pixel) { return None }
        self.values[self.grid.offset(pixel)]
    }

    /// Pixels with at least one resident unit.
    #[inline] pub fn num_pixels(&self) -> usize { self.pixels }

    /// Sum of highlighted fractions over all pixels.
    #[inline] pub fn hot_pixels(&self) -> f64 { self.hot_pixels }
}

/// Spread `highlighted` over the map. Resident units are those with a pixel share;
/// each resident pixel with k of them gives `1/k` to every highlighted one.
pub fn hot_map(index: &PixelIndex, shares: &PixelShares, highlighted: &BTreeSet<GeoId>) -> HotMap {
    let grid = index.grid();
    let resident = index.units().iter().map(|geo_id| shares.get(geo_id).is_some()).collect::<Vec<_>>();
    let hot = index.units().iter().map(|geo_id| highlighted.contains(geo_id)).collect::<Vec<_>>();

    let mut values = vec![None; grid.len()];
    let mut pixels = 0;
    let mut hot_pixels = 0.0;
    for (pixel, cell) in index.iter() {
        let k = cell.iter().filter(|&&ordinal| resident[ordinal as usize]).count();
        if k == 0 { continue }

        let lit = cell.iter().filter(|&&ordinal| resident[ordinal as usize] && hot[ordinal as usize]).count();
        let v = lit as f64 / k as f64;
        values[grid.offset(pixel)] = Some(v);
        pixels += 1;
        hot_pixels += v;
    }

    HotMap { grid, values, pixels, hot_pixels }
}

/// The numbers printed on a highlight map's legend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageReport {
    pub title: String,
    pub fraction: f64,
    pub total_value: f64,
    pub highlighted_value: f64,
    pub highlighted_units: usize,
    pub total_pixels: usize,
    pub highlighted_pixels: f64,
}

impl CoverageReport {
    /// Percent of the statistic that lives in highlighted units.
    pub fn population_percent(&self) -> Option<f64> {
        (self.total_value > 0.0).then(|| percent(self.highlighted_value / self.total_value))
    }

    /// Percent of the map those units are drawn on.
    pub fn map_percent(&self) -> Option<f64> {
        (self.total_pixels > 0).then(|| percent(self.highlighted_pixels / self.total_pixels as f64))
    }

    /// Legend lines: title, population share, map share.
    pub fn legend(&self) -> [String; 3] {
        let show = |value: Option<f64>| value.map_or_else(|| "n/a".to_string(), |v| format!("{v}%"));
        [
            format!("{}:", self.title),
            format!("{} of the population", show(self.population_percent())),
            format!("lives in {} of the map", show(self.map_percent())),
        ]
    }
}

/// Rank, highlight, and measure how much of the map the highlighted units take up.
pub fn coverage_report(
    title: &str,
    fraction: f64,
    index: &PixelIndex,
    shares: &PixelShares,
    value: impl Fn(&GeoId) -> Option<f64>,
) -> (CoverageReport, HotMap) {
    let ranking = rank(shares, value);
    let highlighted = ranking.highlighted(fraction);
    let hot = hot_map(index, shares, &highlighted);

    let report = CoverageReport {
        title: title.to_string(),
        fraction,
        total_value: ranking.total(),
        highlighted_value: ranking.value_of(&highlighted),
        highlighted_units: highlighted.len(),
        total_pixels: hot.num_pixels(),
        highlighted_pixels: hot.hot_pixels(),
    };

    tracing::info!(
        title,
        fraction,
        highlighted_units = report.highlighted_units,
        population_percent = ?report.population_percent(),
        map_percent = ?report.map_percent(),
        "computed coverage",
    );

    (report, hot)
}
