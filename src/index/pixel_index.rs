use ahash::AHashMap;
use anyhow::{Result, ensure};
use smallvec::SmallVec;

use crate::{map::GeoId, raster::{Pixel, RasterGrid}};

/// Unit ordinals drawn on one pixel. Most pixels hold one or two units.
type Cell = SmallVec<[u32; 2]>;

/// Which geographic units are drawn on which pixels of a raster.
///
/// Units are stored once in a table sorted by GeoId; each pixel holds the sorted
/// ordinals of its units, so two indexes with the same content compare equal
/// regardless of the order they were built in.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelIndex {
    grid: RasterGrid,
    units: Vec<GeoId>,
    cells: Vec<Cell>, // row-major, grid.len() entries
}

impl PixelIndex {
    #[inline] pub fn grid(&self) -> RasterGrid { self.grid }

    /// All units that cover at least one pixel, sorted by GeoId.
    #[inline] pub fn units(&self) -> &[GeoId] { &self.units }

    #[inline] pub fn num_units(&self) -> usize { self.units.len() }

    #[inline] pub fn unit(&self, ordinal: u32) -> &GeoId { &self.units[ordinal as usize] }

    /// Ordinal of a unit in this index, if it covers any pixel.
    #[inline]
    pub fn ordinal(&self, geo_id: &GeoId) -> Option<u32> {
        self.units.binary_search(geo_id).ok().map(|i| i as u32)
    }

    /// Ordinals of the units drawn on `pixel` (empty outside the grid).
    #[inline]
    pub fn cell(&self, pixel: Pixel) -> &[u32] {
        if self.grid.contains(pixel) { &self.cells[self.grid.offset(pixel)] } else { &[] }
    }

    /// GeoIds of the units drawn on `pixel`, in sorted order.
    pub fn units_at(&self, pixel: Pixel) -> impl Iterator<Item = &GeoId> + '_ {
        self.cell(pixel).iter().map(|&ordinal| self.unit(ordinal))
    }

    /// Every non-empty pixel with its unit ordinals, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Pixel, &[u32])> + '_ {
        self.cells.iter().enumerate()
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(offset, cell)| (self.grid.pixel(offset), cell.as_slice()))
    }

    /// Number of pixels with at least one unit.
    pub fn num_pixels(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Pixels covered by a given unit, in row-major order.
    pub fn pixels_of(&self, geo_id: &GeoId) -> Vec<Pixel> {
        let Some(ordinal) = self.ordinal(geo_id) else { return Vec::new() };
        self.iter()
            .filter(|(_, cell)| cell.contains(&ordinal))
            .map(|(pixel, _)| pixel)
            .collect()
    }
}

/// Accumulates pixel → unit assignments and produces an immutable `PixelIndex`.
#[derive(Debug)]
pub struct PixelIndexBuilder {
    grid: RasterGrid,
    units: Vec<GeoId>,
    lookup: AHashMap<GeoId, u32>, // Map between geo_ids and insertion ordinals.
    cells: Vec<Cell>,
}

impl PixelIndexBuilder {
    pub fn new(grid: RasterGrid) -> Self {
        Self {
            grid,
            units: Vec::new(),
            lookup: AHashMap::new(),
            cells: vec![Cell::new(); grid.len()],
        }
    }

    #[inline] pub fn grid(&self) -> RasterGrid { self.grid }

    fn intern(&mut self, geo_id: &GeoId) -> u32 {
        if let Some(&ordinal) = self.lookup.get(geo_id) { return ordinal }
        let ordinal = self.units.len() as u32;
        self.units.push(geo_id.clone());
        self.lookup.insert(geo_id.clone(), ordinal);
        ordinal
    }

    /// Record that `geo_id` is drawn on `pixel`. Returns false if it was already recorded there.
    pub fn insert(&mut self, geo_id: &GeoId, pixel: Pixel) -> Result<bool> {
        ensure!(self.grid.contains(pixel),
            "[index::builder] pixel ({}, {}) is outside the {}x{} raster",
            pixel.0, pixel.1, self.grid.width(), self.grid.height());

        let ordinal = self.intern(geo_id);
        let cell = &mut self.cells[self.grid.offset(pixel)];
        if cell.contains(&ordinal) { return Ok(false) }
        cell.push(ordinal);
        Ok(true)
    }

    /// Record every pixel of a unit's coverage. Returns the number of new assignments.
    pub fn insert_all(&mut self, geo_id: &GeoId, pixels: &[Pixel]) -> Result<usize> {
        let mut added = 0;
        for &pixel in pixels {
            if self.insert(geo_id, pixel)? { added += 1 }
        }
        Ok(added)
    }

    /// Canonicalise ordering (units by GeoId, cells ascending) and freeze.
    pub fn build(self) -> PixelIndex {
        let mut order = (0..self.units.len() as u32).collect::<Vec<_>>();
        order.sort_by(|&a, &b| self.units[a as usize].cmp(&self.units[b as usize]));

        let mut remap = vec![0u32; self.units.len()];
        for (new, &old) in order.iter().enumerate() {
            remap[old as usize] = new as u32;
        }

        let cells = self.cells.into_iter()
            .map(|cell| {
                let mut cell = cell.into_iter().map(|old| remap[old as usize]).collect::<Cell>();
                cell.sort_unstable();
                cell
            })
            .collect();

        let mut units = self.units;
        units.sort();

        PixelIndex { grid: self.grid, units, cells }
    }
}
