//! Fixed configuration for the contiguous-US raster workflow.

use geo::{Coord, Rect};

/// Source CRS of TIGER/ACS shapefiles (lon/lat degrees).
pub const SOURCE_PROJ4: &str = "+proj=longlat +datum=WGS84 +no_defs +type=crs";

/// Albers equal-area conic tuned for the contiguous United States.
pub const ALBERS_PROJ4: &str =
    "+proj=aea +lat_1=29.5 +lat_2=45.5 +lat_0=23 +lon_0=-96 +x_0=0 +y_0=0 +ellps=clrk66 +units=m +no_defs";

/// Bounding box of the projected map, in Albers meters.
pub fn projected_bounds() -> Rect<f64> {
    Rect::new(
        Coord { x: -2_387_000.0, y: 254_700.0 },
        Coord { x: 2_263_000.0, y: 3_169_000.0 },
    )
}

/// State FIPS codes of the 48 contiguous states plus DC.
pub const CONTIGUOUS_US: [&str; 49] = [
    "01", "04", "05", "06", "08", "09", "10", "11", "12", "13", "16",
    "17", "18", "19", "20", "21", "22", "23", "24", "25", "26", "27",
    "28", "29", "30", "31", "32", "33", "34", "35", "36", "37", "38",
    "39", "40", "41", "42", "44", "45", "46", "47", "48", "49", "50",
    "51", "53", "54", "55", "56",
];

/// Raster width used by the analysis step when none is given.
pub const DEFAULT_ANALYSIS_WIDTH: u32 = 800;

/// Median household income thresholds that split the population in half.
pub const MEDIAN_INCOME_TRACT: f64 = 53_150.0;
pub const MEDIAN_INCOME_COUNTY: f64 = 53_350.0;

/// Returns true if `state` is eligible for projection and rasterization.
#[inline]
pub fn is_contiguous(state: &str) -> bool {
    CONTIGUOUS_US.contains(&state)
}
