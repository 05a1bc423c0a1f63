use std::{fmt, str::FromStr};

use serde::Serialize;

/// Level of census geography a raster is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GeoType {
    County, // County -> State
    Tract,  // Tract -> County
}

impl GeoType {
    pub fn to_str(&self) -> &'static str {
        match self {
            GeoType::County => "county",
            GeoType::Tract => "tract",
        }
    }

    /// Width of a GEOID at this level (state + county [+ tract]).
    pub fn id_len(&self) -> usize {
        match self {
            GeoType::County => 5,
            GeoType::Tract => 11,
        }
    }

    pub fn order() -> [GeoType; 2] { [GeoType::County, GeoType::Tract] }
}

impl fmt::Display for GeoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.to_str()) }
}

impl FromStr for GeoType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GeoType::order().into_iter()
            .find(|ty| ty.to_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown unit kind {s:?} (expected \"tract\" or \"county\")"))
    }
}
