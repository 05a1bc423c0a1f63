//! Per-unit summary table: land area next to the pixels the unit was drawn on.

use std::path::Path;

use anyhow::Result;
use polars::{df, frame::DataFrame};

use crate::{analysis::apportion_with, index::PixelIndex, map::{GeoType, GeoUnit}};
use super::csv::write_csv;

/// Conventional file name for the unit summary of `ty` units at raster `width`.
pub fn units_file_name(ty: GeoType, width: u32) -> String {
    format!("{ty}_units_{width}.csv")
}

/// One row per unit in the index, sorted by GeoId: `geo_id`, `state`, `land_m2`, `pixels`.
/// Pixels are apportioned over every unit in the index, regardless of population.
pub fn unit_summary(units: &[GeoUnit], index: &PixelIndex) -> Result<DataFrame> {
    let shares = apportion_with(index, |_| true);

    let mut rows = units.iter()
        .filter(|unit| index.ordinal(&unit.geo_id).is_some())
        .collect::<Vec<_>>();
    rows.sort_by(|a, b| a.geo_id.cmp(&b.geo_id));
    rows.dedup_by(|a, b| a.geo_id == b.geo_id);

    let df = df!(
        "geo_id" => rows.iter().map(|unit| unit.geo_id.id().to_string()).collect::<Vec<_>>(),
        "state" => rows.iter().map(|unit| unit.state.clone()).collect::<Vec<_>>(),
        "land_m2" => rows.iter().map(|unit| unit.land_m2).collect::<Vec<_>>(),
        "pixels" => rows.iter().map(|unit| shares.get(&unit.geo_id).unwrap_or(0.0)).collect::<Vec<_>>(),
    )?;
    Ok(df)
}

/// Build and write the unit summary to `path`.
pub fn write_unit_summary(units: &[GeoUnit], index: &PixelIndex, path: &Path) -> Result<()> {
    let mut df = unit_summary(units, index)?;
    write_csv(&mut df, path)?;
    tracing::info!(path = %path.display(), units = df.height(), "wrote unit summary");
    Ok(())
}
