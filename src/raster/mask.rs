use anyhow::{Result, bail};
use ndarray::Array2;

use super::Pixel;

/// Pixel value of an uncovered pixel.
pub const OFF: u8 = 0;
/// Pixel value of a covered pixel.
pub const ON: u8 = 255;

/// A single-channel coverage raster over a window of the full grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    origin: Pixel,
    data: Array2<u8>, // indexed [[row, col]]
}

impl Mask {
    /// An all-OFF window of `width` x `height` pixels whose top-left pixel is `origin`.
    pub fn new(origin: Pixel, width: u32, height: u32) -> Self {
        Self { origin, data: Array2::from_elem((height as usize, width as usize), OFF) }
    }

    /// Wrap raw pixel values, including ones the scanline never writes.
    #[cfg(test)]
    pub(crate) fn from_array(origin: Pixel, data: Array2<u8>) -> Self { Self { origin, data } }

    #[inline] pub fn origin(&self) -> Pixel { self.origin }

    #[inline] pub fn width(&self) -> u32 { self.data.ncols() as u32 }

    #[inline] pub fn height(&self) -> u32 { self.data.nrows() as u32 }

    #[inline] pub fn data(&self) -> &Array2<u8> { &self.data }

    /// Turn on the pixels `x_start..x_end` (window-relative) in row `row`.
    pub(crate) fn fill_span(&mut self, row: usize, x_start: usize, x_end: usize) {
        for col in x_start..x_end.min(self.data.ncols()) {
            self.data[[row, col]] = ON;
        }
    }

    /// Turn on a pixel given in full-grid coordinates; pixels outside the window are ignored.
    pub fn set(&mut self, (x, y): Pixel) {
        let (Some(col), Some(row)) = (x.checked_sub(self.origin.0), y.checked_sub(self.origin.1)) else { return };
        if let Some(value) = self.data.get_mut([row as usize, col as usize]) {
            *value = ON;
        }
    }

    /// Number of pixels that are ON.
    pub fn count_on(&self) -> usize {
        self.data.iter().filter(|&&value| value == ON).count()
    }

    /// Full-grid coordinates of every ON pixel, in row-major order.
    /// Fails if any pixel is partially covered: the scanline never antialiases,
    /// so such a value means the rasterizer is misconfigured.
    pub fn covered(&self) -> Result<Vec<Pixel>> {
        let mut pixels = Vec::new();
        for ((row, col), &value) in self.data.indexed_iter() {
            match value {
                OFF => {}
                ON => pixels.push((self.origin.0 + col as u32, self.origin.1 + row as u32)),
                other => bail!(
                    "[raster::mask] partial coverage value {other} at pixel ({}, {})",
                    self.origin.0 + col as u32, self.origin.1 + row as u32,
                ),
            }
        }
        Ok(pixels)
    }
}
