mod build;
mod pixel_index;

pub use build::{BuildStats, IndexBuild, build_index};
pub use pixel_index::{PixelIndex, PixelIndexBuilder};
