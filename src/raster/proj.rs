use anyhow::{Context, Result, anyhow};
use geo::{Coord, Rect};
use proj4rs::{proj::Proj as Proj4, transform::transform};

use crate::config::{ALBERS_PROJ4, SOURCE_PROJ4, projected_bounds};
use super::RasterGrid;

/// Projection function: lon/lat -> raster pixel coords (x, y).
pub type Projection<'a> = dyn Fn(&Coord<f64>) -> Result<Coord<f64>> + 'a;

/// Projects lon/lat into the pixel space of a raster via a fixed Albers projection
/// and a fixed projected bounding box.
pub struct Projector {
    from: Proj4,
    to: Proj4,
    bounds: Rect<f64>,
    grid: RasterGrid,
}

impl Projector {
    /// Contiguous-US Albers projector for `grid`.
    pub fn new(grid: RasterGrid) -> Result<Self> {
        Self::with_bounds(grid, projected_bounds())
    }

    pub fn with_bounds(grid: RasterGrid, bounds: Rect<f64>) -> Result<Self> {
        let from = Proj4::from_proj_string(SOURCE_PROJ4)
            .with_context(|| anyhow!("[raster::proj] failed to build source PROJ.4: {SOURCE_PROJ4}"))?;
        let to = Proj4::from_proj_string(ALBERS_PROJ4)
            .with_context(|| anyhow!("[raster::proj] failed to build target PROJ.4: {ALBERS_PROJ4}"))?;
        Ok(Self { from, to, bounds, grid })
    }

    #[inline] pub fn grid(&self) -> RasterGrid { self.grid }

    /// lon/lat degrees -> Albers meters.
    pub fn to_planar(&self, coord: &Coord<f64>) -> Result<Coord<f64>> {
        let mut point = (coord.x.to_radians(), coord.y.to_radians(), 0.0);
        transform(&self.from, &self.to, &mut point)
            .with_context(|| format!("[raster::proj] CRS transform failed for ({}, {})", coord.x, coord.y))?;
        Ok(Coord { x: point.0, y: point.1 })
    }

    /// Albers meters -> unit square, relative to the projected bounds.
    #[inline]
    pub fn normalize(&self, planar: &Coord<f64>) -> Coord<f64> {
        Coord {
            x: (planar.x - self.bounds.min().x) / self.bounds.width(),
            y: (planar.y - self.bounds.min().y) / self.bounds.height(),
        }
    }

    /// Unit square -> pixel space, with y flipped so north is up.
    #[inline]
    pub fn to_pixel(&self, normalized: &Coord<f64>) -> Coord<f64> {
        let (width, height) = (self.grid.width() as f64, self.grid.height() as f64);
        Coord { x: normalized.x * width, y: height - normalized.y * height }
    }

    /// lon/lat degrees -> pixel space.
    pub fn project(&self, coord: &Coord<f64>) -> Result<Coord<f64>> {
        Ok(self.to_pixel(&self.normalize(&self.to_planar(coord)?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projector() -> Projector {
        Projector::new(RasterGrid::from_width(800, &projected_bounds()).unwrap()).unwrap()
    }

    #[test]
    fn projection_origin_maps_to_planar_zero() {
        let planar = projector().to_planar(&Coord { x: -96.0, y: 23.0 }).unwrap();
        assert!(planar.x.abs() < 1.0, "x = {}", planar.x);
        assert!(planar.y.abs() < 1.0, "y = {}", planar.y);
    }

    #[test]
    fn bounds_corners_normalize_to_unit_square() {
        let projector = projector();
        let bounds = projected_bounds();
        assert_eq!(projector.normalize(&bounds.min()), Coord { x: 0.0, y: 0.0 });
        assert_eq!(projector.normalize(&bounds.max()), Coord { x: 1.0, y: 1.0 });
    }

    #[test]
    fn pixel_space_flips_y() {
        let projector = projector();
        assert_eq!(projector.to_pixel(&Coord { x: 0.0, y: 0.0 }), Coord { x: 0.0, y: 501.0 });
        assert_eq!(projector.to_pixel(&Coord { x: 1.0, y: 1.0 }), Coord { x: 800.0, y: 0.0 });
    }

    #[test]
    fn kansas_lands_inside_the_raster_and_is_deterministic() {
        let projector = projector();
        let lebanon_ks = Coord { x: -98.58, y: 39.83 };
        let a = projector.project(&lebanon_ks).unwrap();
        let b = projector.project(&lebanon_ks).unwrap();
        assert_eq!(a, b);
        assert!(a.x > 0.0 && a.x < 800.0);
        assert!(a.y > 0.0 && a.y < 501.0);
        // West of the central meridian.
        let meridian = projector.project(&Coord { x: -96.0, y: 39.83 }).unwrap();
        assert!(a.x < meridian.x);
    }
}
