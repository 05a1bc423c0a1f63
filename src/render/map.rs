use std::path::Path;

use anyhow::Result;
use image::{GrayImage, Luma, Rgba, RgbaImage};

use crate::{analysis::{CoverageReport, HotMap}, io::{png, svg::SvgWriter}};
use super::color::{gray_level, highlight_color};

/// Color every resident pixel by its highlighted fraction; pixels without residents stay transparent.
pub fn highlight_image(hot: &HotMap) -> RgbaImage {
    let grid = hot.grid();
    RgbaImage::from_fn(grid.width(), grid.height(), |x, y| match hot.get((x, y)) {
        Some(lit) => highlight_color(lit),
        None => Rgba([0, 0, 0, 0]),
    })
}

/// Single-channel rendering of the highlighted fraction, [0, 1] scaled to [0, 255].
pub fn density_image(hot: &HotMap) -> GrayImage {
    let grid = hot.grid();
    GrayImage::from_fn(grid.width(), grid.height(), |x, y| Luma([hot.get((x, y)).map_or(0, gray_level)]))
}

/// Write `{stem}.png` and a `{stem}.svg` that overlays the legend on it.
pub fn write_highlight_map(hot: &HotMap, report: &CoverageReport, out_dir: &Path, stem: &str) -> Result<()> {
    let png_name = format!("{stem}.png");
    png::write_rgba_png(&highlight_image(hot), &out_dir.join(&png_name))?;

    let (width, height) = (hot.grid().width(), hot.grid().height());
    let font_size = (height / 22) as f64;

    let mut svg = SvgWriter::new(&out_dir.join(format!("{stem}.svg")))?;
    svg.write_header(width, height)?;
    svg.write_styles(font_size)?;
    svg.write_image(&png_name, width, height)?;
    // Legend sits in the lower left corner.
    svg.write_lines(&report.legend(), width as f64 / 50.0, 0.8 * height as f64 + font_size, 1.33 * font_size)?;
    svg.write_footer()?;

    tracing::debug!(dir = %out_dir.display(), stem, "wrote highlight map");
    Ok(())
}

/// Write the grayscale density rendering as `{stem}_density.png`.
pub fn write_density_map(hot: &HotMap, out_dir: &Path, stem: &str) -> Result<()> {
    png::write_gray_png(&density_image(hot), &out_dir.join(format!("{stem}_density.png")))
}
