//! End-to-end analysis scenarios: shares from rasterized shapes, distortion bounds,
//! coverage ranking, and a full `analyze` run over files on disk.

use std::fs;

use anyhow::Result;
use geo::{Coord, LineString};

use censusraster::{
    AnalyzeConfig, GeoId, GeoType, GeoUnit, PixelIndexBuilder, PixelShares, RasterGrid, Statistic,
    StatisticRun, analyze, apportion_with, build_index, distortion, index_file_name, projected_bounds,
    rank, write_index_file,
};

fn county(id: &str) -> GeoId { GeoId::new(GeoType::County, id) }

fn identity(coord: &Coord<f64>) -> Result<Coord<f64>> { Ok(*coord) }

fn rect(id: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> GeoUnit {
    GeoUnit {
        geo_id: county(id),
        state: "01".into(),
        rings: vec![LineString::from(vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1)])],
        land_m2: 0.0,
    }
}

#[test]
fn three_overlapping_squares_share_their_common_pixel() {
    // All three meet on pixel (1, 0); each keeps one pixel of its own.
    let units = [
        rect("01001", 0.0, 0.0, 2.0, 1.0), // (0, 0), (1, 0)
        rect("01003", 1.0, 0.0, 3.0, 1.0), // (1, 0), (2, 0)
        rect("01005", 1.0, 0.0, 2.0, 2.0), // (1, 0), (1, 1)
    ];
    let build = build_index(&units, RasterGrid::new(3, 2).unwrap(), &["01"], &identity).unwrap();
    let shares = apportion_with(&build.index, |_| true);

    assert_eq!(build.index.cell((1, 0)).len(), 3);
    assert!((shares.total() - build.stats.pixels as f64).abs() < 1e-12);
    for unit in &units {
        let share = shares.get(&unit.geo_id).unwrap();
        assert!(share >= 1.0, "{} has share {share}", unit.geo_id);
        assert!((share - 4.0 / 3.0).abs() < 1e-12);
    }
}

#[test]
fn subset_statistics_stay_within_bounds() {
    let shares = PixelShares::from_shares(
        [("01001", 0.25), ("01003", 3.0), ("01005", 12.5), ("01007", 1.0)].map(|(id, s)| (county(id), s)),
        17,
    );
    let n = |g: &GeoId| Some(match g.id() { "01001" => 900.0, "01003" => 0.0, "01005" => 40.0, _ => 7.0 });
    let d = |g: &GeoId| Some(match g.id() { "01001" => 1000.0, "01003" => 50.0, "01005" => 40.0, _ => 7.0 });

    let result = distortion(&shares, n, d).unwrap();
    assert!((0.0..=1.0).contains(&result.population_ratio));
    assert!((0.0..=1.0).contains(&result.pixel_ratio));
    assert_eq!(result.units, 4);
}

#[test]
fn ranking_highlights_the_densest_unit_first() {
    let shares = PixelShares::from_shares(["01001", "01003", "01005", "01007"].map(|id| (county(id), 1.0)), 4);
    let value = |g: &GeoId| Some(match g.id() { "01001" => 10.0, "01003" => 20.0, "01005" => 30.0, _ => 40.0 });

    let ranking = rank(&shares, value);
    assert_eq!(ranking.entries()[0].geo_id, county("01007"));
    assert_eq!(ranking.entries()[0].density, 40.0);
    assert_eq!(ranking.highlighted(0.5).into_iter().collect::<Vec<_>>(), vec![county("01007")]);
    assert_eq!(ranking, rank(&shares, value));
}

#[test]
fn analyze_writes_maps_and_report() {
    let dir = tempfile::tempdir().unwrap();
    let width = 8;
    let grid = RasterGrid::from_width(width, &projected_bounds()).unwrap();

    // A dense city on one pixel next to a sparse county on three, plus an empty county.
    let mut builder = PixelIndexBuilder::new(grid);
    builder.insert(&county("01001"), (2, 2)).unwrap();
    builder.insert(&county("01003"), (2, 2)).unwrap();
    for x in 3..6 { builder.insert(&county("01003"), (x, 2)).unwrap(); }
    builder.insert(&county("01005"), (6, 2)).unwrap();
    write_index_file(&builder.build(), &dir.path().join(index_file_name(GeoType::County, width))).unwrap();

    fs::write(dir.path().join("county_population.csv"), "\
state,county,population,white
01,001,9000,3000
01,003,1000,900
01,005,0,0
").unwrap();

    let mut config = AnalyzeConfig::new(GeoType::County, width, dir.path(), &dir.path().join("out"));
    config.runs = vec![
        StatisticRun::new(Statistic::AllPeople, 0.5, "all_50"),
        StatisticRun::new(Statistic::NonWhite, 0.95, "non_whites"),
    ];
    let report = analyze(&config).unwrap();

    // 01005 has no residents: its pixel is dropped.
    assert_eq!(report.units, 2);
    assert_eq!(report.pixels, 4);

    let all = &report.statistics[0];
    assert!(all.distortion.is_none());
    assert_eq!(all.coverage.highlighted_units, 0); // 9000 / 10000 > 50%

    let non_white = &report.statistics[1];
    let distortion = non_white.distortion.unwrap();
    assert!((distortion.population_ratio - 6100.0 / 10000.0).abs() < 1e-12);
    // Pixel shares: 01001 = 0.5, 01003 = 3.5.
    assert!((distortion.pixel_ratio - (2.0 / 3.0 * 0.5 + 0.1 * 3.5) / 4.0).abs() < 1e-12);
    assert!(distortion.pixel_ratio < distortion.population_ratio);

    let out = dir.path().join("out");
    for name in ["all_50.png", "all_50.svg", "non_whites.png", "non_whites.svg", "report.json"] {
        assert!(out.join(name).exists(), "{name} missing");
    }
}

#[test]
fn analyze_fails_without_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let config = AnalyzeConfig::new(GeoType::Tract, 8, dir.path(), dir.path());
    assert!(analyze(&config).is_err());
    assert!(!dir.path().join("report.json").exists());
}
