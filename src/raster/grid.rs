use anyhow::{Result, ensure};
use geo::Rect;

/// Pixel coordinate (x, y), origin top-left.
pub type Pixel = (u32, u32);

/// Dimensions of the output raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RasterGrid {
    width: u32,
    height: u32,
}

impl RasterGrid {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        ensure!(width > 0 && height > 0, "[raster::grid] raster must be non-empty, got {width}x{height}");
        Ok(Self { width, height })
    }

    /// Derive the height that preserves the aspect ratio of `bounds` at the given width.
    pub fn from_width(width: u32, bounds: &Rect<f64>) -> Result<Self> {
        ensure!(bounds.width() > 0.0, "[raster::grid] projected bounds have zero width");
        let height = (width as f64 * bounds.height() / bounds.width()).round() as u32;
        Self::new(width, height)
    }

    #[inline] pub fn width(&self) -> u32 { self.width }

    #[inline] pub fn height(&self) -> u32 { self.height }

    /// Total number of pixels.
    #[inline] pub fn len(&self) -> usize { self.width as usize * self.height as usize }

    #[inline] pub fn is_empty(&self) -> bool { self.len() == 0 }

    #[inline]
    pub fn contains(&self, (x, y): Pixel) -> bool { x < self.width && y < self.height }

    /// Row-major offset of a pixel.
    #[inline]
    pub fn offset(&self, (x, y): Pixel) -> usize { y as usize * self.width as usize + x as usize }

    /// Inverse of `offset`.
    #[inline]
    pub fn pixel(&self, offset: usize) -> Pixel {
        ((offset % self.width as usize) as u32, (offset / self.width as usize) as u32)
    }
}
