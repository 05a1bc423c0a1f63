//! PNG raster output.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use image::{GrayImage, RgbaImage};

use crate::raster::Mask;

/// Save a coverage mask as a single-channel PNG (0 = off, 255 = on).
pub(crate) fn write_mask_png(mask: &Mask, path: &Path) -> Result<()> {
    let pixels = mask.data().iter().copied().collect::<Vec<_>>();
    let image = GrayImage::from_raw(mask.width(), mask.height(), pixels)
        .ok_or_else(|| anyhow!("[io::png] mask buffer does not match {}x{}", mask.width(), mask.height()))?;
    write_gray_png(&image, path)
}

/// Save a single-channel image.
pub(crate) fn write_gray_png(image: &GrayImage, path: &Path) -> Result<()> {
    image.save(path)
        .with_context(|| format!("[io::png] Failed to write {}", path.display()))
}

/// Save a color+alpha image.
pub(crate) fn write_rgba_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image.save(path)
        .with_context(|| format!("[io::png] Failed to write {}", path.display()))
}
