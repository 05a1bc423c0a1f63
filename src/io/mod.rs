//! IO module for format-specific reading and writing operations.
//!
//! - `csv` - Polars-backed CSV tables (demographics, elections, unit summaries)
//! - `fs` - directory and input file checks
//! - `index` - the variable-width pixel index file
//! - `png` - raster images
//! - `svg` - legend overlays for rendered maps
//! - `units` - per-unit land area and pixel summary

pub(crate) mod csv;
pub(crate) mod fs;
pub mod index;
pub(crate) mod png;
pub(crate) mod svg;
pub mod units;
