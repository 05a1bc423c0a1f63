use geo::LineString;

use super::GeoId;

/// A geographic unit as loaded from a boundary shapefile.
#[derive(Debug, Clone)]
pub struct GeoUnit {
    pub geo_id: GeoId,
    pub state: String,               // STATEFP
    pub rings: Vec<LineString<f64>>, // (lon, lat), one per shapefile part
    pub land_m2: f64,                // ALAND
}

impl GeoUnit {
    /// Total number of vertices over all rings.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.rings.iter().map(|ring| ring.0.len()).sum()
    }
}
