use anyhow::Result;
use geo::{Coord, LineString};

use super::{Mask, Pixel, RasterGrid};

/// The set of pixels a single unit claims on the raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coverage {
    pixels: Vec<Pixel>,
    fallback: bool, // true if the shape was too small to cover any pixel centre
}

impl Coverage {
    #[inline] pub fn pixels(&self) -> &[Pixel] { &self.pixels }

    #[inline] pub fn is_fallback(&self) -> bool { self.fallback }

    #[inline] pub fn is_empty(&self) -> bool { self.pixels.is_empty() }

    #[inline] pub fn len(&self) -> usize { self.pixels.len() }
}

/// Rasterize the rings of one projected shape (pixel-space coordinates).
///
/// Each ring is scan-filled on its own (even-odd, sampled at pixel centres) and the
/// covered pixels are unioned. A shape that covers no pixel centre at all is assigned
/// the single pixel nearest to the mean of its vertices, so no unit on the raster
/// disappears. A shape whose mean falls off the raster covers nothing.
pub fn rasterize(rings: &[LineString<f64>], grid: RasterGrid) -> Result<Coverage> {
    let scanned = match scan(rings, grid) {
        Some(mask) => mask.covered()?,
        None => Vec::new(),
    };
    if !scanned.is_empty() {
        return Ok(Coverage { pixels: scanned, fallback: false });
    }

    Ok(match mean_pixel(rings, grid) {
        Some(pixel) => Coverage { pixels: vec![pixel], fallback: true },
        None => Coverage { pixels: Vec::new(), fallback: false },
    })
}

/// Scan-fill every ring into a mask covering the shape's bounding box (clipped to the grid).
/// Returns `None` if no pixel centre falls inside the bounding box.
pub fn scan(rings: &[LineString<f64>], grid: RasterGrid) -> Option<Mask> {
    let (origin, width, height) = window(rings, grid)?;
    let mut mask = Mask::new(origin, width, height);
    let mut crossings = Vec::new();
    for ring in rings {
        scan_ring(&ring.0, &mut mask, &mut crossings);
    }
    Some(mask)
}

/// Pixel window whose centres lie within the bounding box of all finite vertices.
fn window(rings: &[LineString<f64>], grid: RasterGrid) -> Option<(Pixel, u32, u32)> {
    let (mut min, mut max) = (Coord { x: f64::INFINITY, y: f64::INFINITY }, Coord { x: f64::NEG_INFINITY, y: f64::NEG_INFINITY });
    for coord in rings.iter().flat_map(|ring| ring.0.iter()).filter(|c| c.x.is_finite() && c.y.is_finite()) {
        min = Coord { x: min.x.min(coord.x), y: min.y.min(coord.y) };
        max = Coord { x: max.x.max(coord.x), y: max.y.max(coord.y) };
    }
    if min.x > max.x { return None }

    // Pixel i is sampled at i + 0.5.
    let col0 = ((min.x - 0.5).ceil() as i64).max(0);
    let row0 = ((min.y - 0.5).ceil() as i64).max(0);
    let col1 = ((max.x - 0.5).floor() as i64).min(grid.width() as i64 - 1);
    let row1 = ((max.y - 0.5).floor() as i64).min(grid.height() as i64 - 1);
    if col0 > col1 || row0 > row1 { return None }

    Some(((col0 as u32, row0 as u32), (col1 - col0 + 1) as u32, (row1 - row0 + 1) as u32))
}

/// Even-odd scanline fill of one (implicitly closed) ring.
fn scan_ring(coords: &[Coord<f64>], mask: &mut Mask, crossings: &mut Vec<f64>) {
    if coords.len() < 3 { return }
    let (ox, oy) = mask.origin();
    let width = mask.width() as f64;

    for row in 0..mask.height() as usize {
        let yc = oy as f64 + row as f64 + 0.5;

        crossings.clear();
        for (k, a) in coords.iter().enumerate() {
            let b = &coords[(k + 1) % coords.len()];
            // Half-open rule: a vertex exactly on the scanline is counted once.
            if (a.y <= yc) != (b.y <= yc) {
                crossings.push(a.x + (yc - a.y) * (b.x - a.x) / (b.y - a.y));
            }
        }
        crossings.sort_by(f64::total_cmp);

        for span in crossings.chunks_exact(2) {
            // Pixel centres in [span[0], span[1]).
            let start = ((span[0] - 0.5).ceil() - ox as f64).clamp(0.0, width);
            let end = ((span[1] - 0.5).ceil() - ox as f64).clamp(0.0, width);
            if start < end {
                mask.fill_span(row, start as usize, end as usize);
            }
        }
    }
}

/// Nearest pixel to the mean of all vertices (ties to even), or `None` if that is off the grid.
fn mean_pixel(rings: &[LineString<f64>], grid: RasterGrid) -> Option<Pixel> {
    let count = rings.iter().map(|ring| ring.0.len()).sum::<usize>();
    if count == 0 { return None }

    let sum = rings.iter()
        .flat_map(|ring| ring.0.iter())
        .fold(Coord { x: 0.0, y: 0.0 }, |acc, c| Coord { x: acc.x + c.x, y: acc.y + c.y });
    let (x, y) = ((sum.x / count as f64).round_ties_even(), (sum.y / count as f64).round_ties_even());
    if !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 { return None }

    let pixel = (x as u32, y as u32);
    grid.contains(pixel).then_some(pixel)
}
