mod grid;
mod mask;
mod proj;
mod rasterize;

pub use grid::{Pixel, RasterGrid};
pub use mask::{Mask, OFF, ON};
pub use proj::{Projection, Projector};
pub use rasterize::{Coverage, rasterize, scan};
