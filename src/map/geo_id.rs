use std::{cmp::Ordering, fmt, sync::Arc};

use super::geo_type::GeoType;

/// Stable key for a geographic unit.
/// Keep the original GEOID text (with leading zeros) but avoid repeated owned Strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeoId {
    ty: GeoType,
    id: Arc<str>, // e.g., "31001" for county, "31001000100" for tract
}

impl GeoId {
    pub fn new(ty: GeoType, id: &str) -> Self {
        Self { ty, id: Arc::from(id) }
    }

    /// Build a GEOID from its FIPS components, as the demographic tables store them.
    pub fn from_parts(state: &str, county: &str, tract: Option<&str>) -> Self {
        match tract {
            Some(tract) => Self::new(GeoType::Tract, &format!("{state}{county}{tract}")),
            None => Self::new(GeoType::County, &format!("{state}{county}")),
        }
    }

    #[inline] pub fn ty(&self) -> GeoType { self.ty }

    #[inline] pub fn id(&self) -> &str { &self.id }

    /// Two-digit state FIPS prefix.
    #[inline] pub fn state(&self) -> &str { &self.id[..self.id.len().min(2)] }

    /// Returns the `GeoId` of the enclosing unit at `parent_ty`
    /// by truncating this GeoId's string to the correct prefix length.
    pub fn to_parent(&self, parent_ty: GeoType) -> GeoId {
        // If the id is shorter than expected, just take the full id.
        let prefix: Arc<str> = Arc::from(&self.id[..self.id.len().min(parent_ty.id_len())]);
        GeoId { ty: parent_ty, id: prefix }
    }
}

impl Ord for GeoId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id).then(self.ty.cmp(&other.ty))
    }
}

impl PartialOrd for GeoId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl fmt::Display for GeoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.id) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_parts_concatenates_fips() {
        let tract = GeoId::from_parts("01", "001", Some("020100"));
        assert_eq!(tract.id(), "01001020100");
        assert_eq!(tract.ty(), GeoType::Tract);
        assert_eq!(tract.state(), "01");
        assert_eq!(tract.to_parent(GeoType::County).id(), "01001");
    }

    #[test]
    fn ordering_follows_text() {
        let mut ids = vec![
            GeoId::new(GeoType::County, "06037"),
            GeoId::new(GeoType::County, "01001"),
            GeoId::new(GeoType::County, "04013"),
        ];
        ids.sort();
        let text = ids.iter().map(GeoId::id).collect::<Vec<_>>();
        assert_eq!(text, ["01001", "04013", "06037"]);
    }
}
