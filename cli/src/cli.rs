use std::path::PathBuf;

use censusraster::{DEFAULT_ANALYSIS_WIDTH, GeoType};

/// Census rasterization CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "censusraster", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Rasterize boundary shapefiles into a pixel index
    Pixels(PixelsArgs),

    /// Compute distortion and coverage maps from a pixel index
    Analyze(AnalyzeArgs),
}

#[derive(clap::Args, Debug)]
pub struct PixelsArgs {
    /// Unit of geography: "tract" or "county"
    pub unit: GeoType,

    /// Raster width in pixels (height follows the projected bounds)
    pub width: u32,

    /// Directory searched recursively for .shp files, defaults to "./shapefiles"
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub shapefiles: Option<PathBuf>,

    /// Output directory, defaults to "."
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Restrict to these state FIPS codes (must be contiguous US states)
    #[arg(long, value_delimiter = ',')]
    pub states: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct AnalyzeArgs {
    /// Unit of geography: "tract" or "county"
    pub unit: GeoType,

    /// Raster width the pixel index was built at
    #[arg(short, long, default_value_t = DEFAULT_ANALYSIS_WIDTH)]
    pub width: u32,

    /// Directory holding the pixel index and tables, defaults to "."
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub data: Option<PathBuf>,

    /// Pixel index file, defaults to "<data>/<unit>_pixels_<width>.csv"
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub pixels: Option<PathBuf>,

    /// Demographic table, defaults to "<data>/<unit>_population.csv"
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub demographics: Option<PathBuf>,

    /// County election results, defaults to "<data>/prez2012county.csv"
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub elections: Option<PathBuf>,

    /// Output directory for maps and report.json, defaults to "."
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Statistics to compute (e.g. all,poverty,income); defaults to the full built-in set
    #[arg(long, value_delimiter = ',')]
    pub statistics: Vec<String>,

    /// Fraction of the statistic to highlight for selected statistics
    #[arg(short, long, default_value_t = 0.95)]
    pub fraction: f64,

    /// Override the median income threshold of the income statistic
    #[arg(long)]
    pub median_income: Option<f64>,

    /// Also write a grayscale density rendering per statistic
    #[arg(long)]
    pub density: bool,
}
