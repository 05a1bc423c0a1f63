use anyhow::{Context, Result};
use geo::LineString;
use rayon::prelude::*;
use serde::Serialize;

use crate::{map::GeoUnit, raster::{Coverage, Mask, Projection, RasterGrid, rasterize}};
use super::{PixelIndex, PixelIndexBuilder};

/// Counts reported after an index build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub included: usize,   // units rasterized
    pub excluded: usize,   // units outside the state whitelist
    pub fallback: usize,   // units smaller than one pixel
    pub empty: usize,      // units with no vertices
    pub off_raster: usize, // units lying entirely off the raster
    pub pixels: usize,     // non-empty pixels in the index
}

/// Output of `build_index`.
#[derive(Debug)]
pub struct IndexBuild {
    pub index: PixelIndex,
    pub composite: Mask, // union of all drawn shapes, for visual checks
    pub stats: BuildStats,
}

/// Rasterize every unit whose state is in `states` and record which pixels it covers.
///
/// Projection runs sequentially; rasterization of each unit is independent and runs in
/// parallel. Results are merged in input order and canonicalised by `PixelIndexBuilder::build`,
/// so the output does not depend on thread scheduling.
pub fn build_index(units: &[GeoUnit], grid: RasterGrid, states: &[&str], project: &Projection) -> Result<IndexBuild> {
    let (included, excluded) = units.iter()
        .partition::<Vec<_>, _>(|unit| states.contains(&unit.state.as_str()));

    for unit in &excluded {
        tracing::trace!(geo_id = %unit.geo_id, state = %unit.state, "skipping unit outside whitelist");
    }

    // Project points to pixel coordinates.
    let projected = included.iter()
        .map(|unit| project_rings(unit, project))
        .collect::<Result<Vec<_>>>()?;

    let coverages = projected.par_iter()
        .zip(included.par_iter())
        .map(|(rings, unit)| rasterize(rings, grid)
            .with_context(|| format!("[index::build] failed to rasterize {}", unit.geo_id)))
        .collect::<Result<Vec<Coverage>>>()?;

    let mut builder = PixelIndexBuilder::new(grid);
    let mut composite = Mask::new((0, 0), grid.width(), grid.height());
    let mut stats = BuildStats { included: included.len(), excluded: excluded.len(), ..Default::default() };

    for (unit, coverage) in included.iter().zip(&coverages) {
        if coverage.is_empty() {
            if unit.rings.iter().all(|ring| ring.0.is_empty()) {
                tracing::warn!(geo_id = %unit.geo_id, "unit has no vertices, nothing drawn");
                stats.empty += 1;
            } else {
                tracing::warn!(geo_id = %unit.geo_id, "unit lies off the raster, nothing drawn");
                stats.off_raster += 1;
            }
            continue;
        }
        if coverage.is_fallback() {
            tracing::debug!(geo_id = %unit.geo_id, pixel = ?coverage.pixels()[0], "unit smaller than one pixel");
            stats.fallback += 1;
        } else {
            for &pixel in coverage.pixels() { composite.set(pixel) }
        }
        builder.insert_all(&unit.geo_id, coverage.pixels())?;
    }

    let index = builder.build();
    stats.pixels = index.num_pixels();

    tracing::info!(
        included = stats.included,
        excluded = stats.excluded,
        fallback = stats.fallback,
        off_raster = stats.off_raster,
        pixels = stats.pixels,
        "built pixel index for {}x{} raster", grid.width(), grid.height(),
    );

    Ok(IndexBuild { index, composite, stats })
}

fn project_rings(unit: &GeoUnit, project: &Projection) -> Result<Vec<LineString<f64>>> {
    unit.rings.iter()
        .map(|ring| ring.0.iter()
            .map(|coord| project(coord))
            .collect::<Result<Vec<_>>>()
            .map(LineString::new))
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("[index::build] failed to project {}", unit.geo_id))
}
