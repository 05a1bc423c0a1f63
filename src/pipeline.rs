//! End-to-end runs: shapefiles → pixel index, and pixel index + tables → statistics and maps.
//! Keep this thin; all work lives in submodules.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use geo::Coord;

use crate::{
    analysis::{
        AnalysisReport, Dataset, Demographics, Elections, StatisticReport, StatisticRun,
        apportion, coverage_report, default_runs, statistic_distortion,
    },
    config::{CONTIGUOUS_US, projected_bounds},
    index::{BuildStats, build_index},
    io::{
        fs::{ensure_dir_exists, require_dir_exists, require_file_exists},
        index::{index_file_name, read_index_file, write_index_file},
        png::write_mask_png,
        units::{units_file_name, write_unit_summary},
    },
    map::{GeoType, find_shapefiles, read_units},
    raster::{Projector, RasterGrid},
    render::{write_density_map, write_highlight_map},
};

/// Settings for building a pixel index from boundary shapefiles.
#[derive(Debug, Clone)]
pub struct PixelsConfig {
    pub unit: GeoType,
    pub width: u32,
    pub shapefiles: PathBuf, // directory searched recursively for .shp files
    pub out_dir: PathBuf,
    pub states: Vec<String>, // state FIPS codes to rasterize
}

impl PixelsConfig {
    /// Defaults to the contiguous US.
    pub fn new(unit: GeoType, width: u32, shapefiles: &Path, out_dir: &Path) -> Self {
        Self {
            unit,
            width,
            shapefiles: shapefiles.to_path_buf(),
            out_dir: out_dir.to_path_buf(),
            states: CONTIGUOUS_US.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn index_path(&self) -> PathBuf { self.out_dir.join(index_file_name(self.unit, self.width)) }

    pub fn debug_raster_path(&self) -> PathBuf { self.out_dir.join(format!("map_{}_{}.png", self.unit, self.width)) }

    pub fn units_path(&self) -> PathBuf { self.out_dir.join(units_file_name(self.unit, self.width)) }
}

/// Rasterize every unit in the shapefiles and write the pixel index, the debug raster
/// and the unit summary.
pub fn build_pixels(config: &PixelsConfig) -> Result<BuildStats> {
    require_dir_exists(&config.shapefiles)?;
    ensure_dir_exists(&config.out_dir)?;

    let grid = RasterGrid::from_width(config.width, &projected_bounds())?;
    let projector = Projector::new(grid)?;

    // Every file is read before anything is written, so a bad shape leaves no partial output.
    let mut units = Vec::new();
    for path in find_shapefiles(&config.shapefiles)? {
        units.extend(read_units(&path, config.unit)?);
    }
    tracing::info!(units = units.len(), unit = %config.unit, "loaded boundaries");

    let states = config.states.iter().map(String::as_str).collect::<Vec<_>>();
    let build = build_index(&units, grid, &states, &|coord: &Coord<f64>| projector.project(coord))?;

    write_index_file(&build.index, &config.index_path())?;
    write_mask_png(&build.composite, &config.debug_raster_path())?;
    write_unit_summary(&units, &build.index, &config.units_path())?;

    tracing::info!(path = %config.index_path().display(), "wrote pixel index");
    Ok(build.stats)
}

/// Settings for analyzing a pixel index against demographic tables.
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    pub unit: GeoType,
    pub width: u32,
    pub index: PathBuf,
    pub demographics: PathBuf,
    pub elections: PathBuf,
    pub out_dir: PathBuf,
    pub runs: Vec<StatisticRun>,
    pub density_maps: bool, // also write a grayscale rendering per run
}

impl AnalyzeConfig {
    /// Inputs at their conventional names in `data_dir`, all built-in statistics.
    pub fn new(unit: GeoType, width: u32, data_dir: &Path, out_dir: &Path) -> Self {
        Self {
            unit,
            width,
            index: data_dir.join(index_file_name(unit, width)),
            demographics: data_dir.join(format!("{unit}_population.csv")),
            elections: data_dir.join("prez2012county.csv"),
            out_dir: out_dir.to_path_buf(),
            runs: default_runs(unit),
            density_maps: false,
        }
    }
}

/// Apportion pixels, then compute distortion and coverage for every run and draw its map.
/// Any missing input aborts before a single output is written.
pub fn analyze(config: &AnalyzeConfig) -> Result<AnalysisReport> {
    require_file_exists(&config.index)?;
    require_file_exists(&config.demographics)?;
    let needs_elections = config.runs.iter().any(|run| run.statistic.needs_elections());
    if needs_elections {
        require_file_exists(&config.elections)?;
    }
    for run in &config.runs {
        ensure!((0.0..=1.0).contains(&run.fraction),
            "[pipeline] fraction {} for {} is outside [0, 1]", run.fraction, run.file_stem);
    }
    ensure_dir_exists(&config.out_dir)?;

    let grid = RasterGrid::from_width(config.width, &projected_bounds())?;
    let index = read_index_file(&config.index, grid, config.unit)?;
    let data = Dataset {
        demographics: Demographics::read_csv(&config.demographics, config.unit)?,
        elections: needs_elections.then(|| Elections::read_csv(&config.elections)).transpose()?,
    };

    let shares = apportion(&index, &data.demographics);

    let mut statistics = Vec::with_capacity(config.runs.len());
    for run in &config.runs {
        let title = run.statistic.title();
        let distortion = statistic_distortion(&shares, run.statistic, &data);
        let (coverage, hot) = coverage_report(&title, run.fraction, &index, &shares,
            |geo_id| run.statistic.numerator(&data, geo_id));

        write_highlight_map(&hot, &coverage, &config.out_dir, &run.file_stem)
            .with_context(|| format!("[pipeline] Failed to draw {}", run.file_stem))?;
        if config.density_maps {
            write_density_map(&hot, &config.out_dir, &run.file_stem)?;
        }

        statistics.push(StatisticReport { name: run.file_stem.clone(), title, distortion, coverage });
    }

    let report = AnalysisReport {
        unit: config.unit,
        width: config.width,
        units: shares.num_units(),
        pixels: shares.num_pixels(),
        statistics,
    };
    report.write_json(&config.out_dir.join("report.json"))?;
    Ok(report)
}
