//! Properties of the pixel index: partition of unity, order independence,
//! the sub-pixel guarantee, binary coverage and the file round trip.
//!
//! Shapes are given directly in pixel coordinates through an identity projection.

use anyhow::Result;
use geo::{Coord, LineString};

use censusraster::{
    GeoId, GeoType, GeoUnit, IndexBuild, PixelIndex, RasterGrid, apportion_with, build_index,
    read_index_file, scan, write_index_file,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn identity(coord: &Coord<f64>) -> Result<Coord<f64>> { Ok(*coord) }

fn rect(id: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> GeoUnit {
    GeoUnit {
        geo_id: GeoId::new(GeoType::County, id),
        state: id[..2].to_string(),
        rings: vec![LineString::from(vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)])],
        land_m2: (x1 - x0) * (y1 - y0),
    }
}

/// Deterministic scatter of overlapping rectangles, including a few specks.
fn scatter(count: usize, grid: RasterGrid) -> Vec<GeoUnit> {
    let mut seed = 0x5eed_u64;
    let mut next = move || {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (seed >> 11) as f64 / (1u64 << 53) as f64
    };
    (0..count)
        .map(|i| {
            let x = next() * grid.width() as f64;
            let y = next() * grid.height() as f64;
            let size = if i % 5 == 0 { 0.3 } else { 1.0 + next() * 6.0 };
            rect(&format!("01{:03}", i), x, y, x + size, y + size * (0.5 + next()))
        })
        .collect()
}

fn build(units: &[GeoUnit], grid: RasterGrid) -> IndexBuild {
    build_index(units, grid, &["01"], &identity).unwrap()
}

fn fallback_pixels(units: &[GeoUnit], index: &PixelIndex) -> Vec<(String, Vec<(u32, u32)>)> {
    let mut pixels = units.iter()
        .filter(|unit| unit.land_m2 < 0.5)
        .map(|unit| (unit.geo_id.id().to_string(), index.pixels_of(&unit.geo_id)))
        .collect::<Vec<_>>();
    pixels.sort();
    pixels
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn every_pixel_is_apportioned_exactly_once() {
    let grid = RasterGrid::new(40, 25).unwrap();
    let build = build(&scatter(60, grid), grid);
    let shares = apportion_with(&build.index, |_| true);

    for (_, cell) in build.index.iter() {
        let k = cell.len();
        let sum = cell.iter().map(|_| 1.0 / k as f64).sum::<f64>();
        assert!((sum - 1.0).abs() < 1e-12);
    }
    assert_eq!(shares.num_pixels(), build.index.num_pixels());
    assert!((shares.total() - build.index.num_pixels() as f64).abs() < 1e-9);
}

#[test]
fn build_does_not_depend_on_input_order() {
    let grid = RasterGrid::new(40, 25).unwrap();
    let units = scatter(60, grid);
    let mut reversed = units.clone();
    reversed.reverse();
    let mut rotated = units.clone();
    rotated.rotate_left(17);

    let first = build(&units, grid);
    let second = build(&units, grid);
    let third = build(&reversed, grid);
    let fourth = build(&rotated, grid);

    assert_eq!(first.index, second.index);
    assert_eq!(first.index, third.index);
    assert_eq!(first.index, fourth.index);
    assert_eq!(fallback_pixels(&units, &first.index), fallback_pixels(&units, &third.index));
    assert_eq!(first.stats, third.stats);
}

#[test]
fn every_unit_claims_at_least_one_pixel() {
    let grid = RasterGrid::new(40, 25).unwrap();
    let units = scatter(60, grid);
    let build = build(&units, grid);

    for unit in &units {
        assert!(!build.index.pixels_of(&unit.geo_id).is_empty(), "{} has no pixel", unit.geo_id);
    }
}

#[test]
fn sub_pixel_shape_lands_on_rounded_vertex_mean() {
    let grid = RasterGrid::new(10, 10).unwrap();
    let speck = GeoUnit {
        geo_id: GeoId::new(GeoType::County, "01001"),
        state: "01".into(),
        rings: vec![LineString::from(vec![(2.6, 1.6), (2.8, 1.6), (2.8, 1.8), (2.6, 1.8)])],
        land_m2: 0.04,
    };
    let build = build(std::slice::from_ref(&speck), grid);

    // Mean of the four vertices is (2.7, 1.7), which rounds to (3, 2).
    assert_eq!(build.index.pixels_of(&speck.geo_id), vec![(3, 2)]);
    assert_eq!(build.stats.fallback, 1);
}

#[test]
fn masks_hold_only_on_and_off() {
    let grid = RasterGrid::new(40, 25).unwrap();
    for unit in scatter(60, grid) {
        if let Some(mask) = scan(&unit.rings, grid) {
            assert!(mask.data().iter().all(|&v| v == censusraster::OFF || v == censusraster::ON));
        }
    }
}

#[test]
fn index_file_round_trips() {
    let grid = RasterGrid::new(40, 25).unwrap();
    let build = build(&scatter(60, grid), grid);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("county_pixels_40.csv");
    write_index_file(&build.index, &path).unwrap();
    let reread = read_index_file(&path, grid, GeoType::County).unwrap();

    assert_eq!(reread, build.index);
    assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), build.index.num_pixels());
}
