//! Raster image output for analysis results.

mod color;
mod map;

pub use map::{density_image, highlight_image, write_density_map, write_highlight_map};
