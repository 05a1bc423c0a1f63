#![doc = "Census raster public API"]
mod analysis;
mod config;
mod index;
mod io;
mod map;
mod pipeline;
mod raster;
mod render;

#[doc(inline)]
pub use map::{GeoId, GeoType, GeoUnit, find_shapefiles, read_units, unit_from_shape};

#[doc(inline)]
pub use config::{
    ALBERS_PROJ4, CONTIGUOUS_US, DEFAULT_ANALYSIS_WIDTH, MEDIAN_INCOME_COUNTY, MEDIAN_INCOME_TRACT,
    SOURCE_PROJ4, is_contiguous, projected_bounds,
};

#[doc(inline)]
pub use raster::{Coverage, Mask, OFF, ON, Pixel, Projection, Projector, RasterGrid, rasterize, scan};

#[doc(inline)]
pub use index::{BuildStats, IndexBuild, PixelIndex, PixelIndexBuilder, build_index};

#[doc(inline)]
pub use io::{
    index::{index_file_name, read_index, read_index_file, write_index, write_index_file},
    units::{unit_summary, units_file_name, write_unit_summary},
};

#[doc(inline)]
pub use analysis::{
    AnalysisReport, CoverageReport, Dataset, Demographics, Distortion, ElectionRecord, Elections, HotMap,
    PixelShares, RankEntry, Ranking, Statistic, StatisticReport, StatisticRun, apportion, apportion_with,
    coverage_report, default_runs, distortion, hot_map, percent, rank, statistic_distortion,
};

#[doc(inline)]
pub use render::{density_image, highlight_image, write_density_map, write_highlight_map};

#[doc(inline)]
pub use pipeline::{AnalyzeConfig, PixelsConfig, analyze, build_pixels};
