//! Pixel index file: one line per non-empty pixel, `x,y,geo_id,geo_id,...`.

use std::{fs::File, io::{BufRead, BufReader, BufWriter, Write}, path::Path};

use anyhow::{Context, Result, bail, ensure};

use crate::{index::{PixelIndex, PixelIndexBuilder}, map::{GeoId, GeoType}, raster::RasterGrid};

/// Conventional file name for the index of `ty` units at raster `width`.
pub fn index_file_name(ty: GeoType, width: u32) -> String {
    format!("{ty}_pixels_{width}.csv")
}

/// Write every non-empty pixel in row-major order, unit ids sorted.
pub fn write_index<W: Write>(index: &PixelIndex, writer: &mut W) -> Result<()> {
    for ((x, y), cell) in index.iter() {
        write!(writer, "{x},{y}")?;
        for &ordinal in cell {
            write!(writer, ",{}", index.unit(ordinal))?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Write the index to a file at `path`.
pub fn write_index_file(index: &PixelIndex, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("[io::index::write] Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_index(index, &mut writer)
        .with_context(|| format!("[io::index::write] Failed to write index to {}", path.display()))?;
    writer.flush()?;
    Ok(())
}

/// Read an index written by `write_index`. Rows may be in any order, but each pixel
/// may appear only once and each unit only once per row.
pub fn read_index<R: BufRead>(reader: R, grid: RasterGrid, ty: GeoType) -> Result<PixelIndex> {
    let mut builder = PixelIndexBuilder::new(grid);
    let mut seen = vec![false; grid.len()];

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("[io::index::read] Failed to read line {}", line_no + 1))?;
        let line = line.trim();
        if line.is_empty() { continue }

        let mut fields = line.split(',');
        let pixel = (
            parse_coord(fields.next(), "x", line_no)?,
            parse_coord(fields.next(), "y", line_no)?,
        );
        ensure!(grid.contains(pixel),
            "[io::index::read] line {}: pixel ({}, {}) is outside the {}x{} raster",
            line_no + 1, pixel.0, pixel.1, grid.width(), grid.height());

        let offset = grid.offset(pixel);
        ensure!(!seen[offset], "[io::index::read] line {}: pixel ({}, {}) listed twice", line_no + 1, pixel.0, pixel.1);
        seen[offset] = true;

        let mut count = 0;
        for id in fields {
            let id = id.trim();
            ensure!(!id.is_empty(), "[io::index::read] line {}: empty unit id", line_no + 1);
            if !builder.insert(&GeoId::new(ty, id), pixel)? {
                bail!("[io::index::read] line {}: unit {id} listed twice", line_no + 1);
            }
            count += 1;
        }
        ensure!(count > 0, "[io::index::read] line {}: pixel row without units", line_no + 1);
    }

    Ok(builder.build())
}

/// Read the index file at `path`.
pub fn read_index_file(path: &Path, grid: RasterGrid, ty: GeoType) -> Result<PixelIndex> {
    let file = File::open(path)
        .with_context(|| format!("[io::index::read] Failed to open pixel index: {}", path.display()))?;
    read_index(BufReader::new(file), grid, ty)
        .with_context(|| format!("[io::index::read] Invalid pixel index {}", path.display()))
}

fn parse_coord(field: Option<&str>, name: &str, line_no: usize) -> Result<u32> {
    let Some(field) = field else { bail!("[io::index::read] line {}: missing {name} coordinate", line_no + 1) };
    field.trim().parse()
        .with_context(|| format!("[io::index::read] line {}: invalid {name} coordinate {field:?}", line_no + 1))
}
