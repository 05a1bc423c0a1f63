//! Boundary shapefile loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail, ensure};
use geo::{Coord, LineString};
use shapefile::{Reader, Shape, dbase::{FieldValue, Record}};
use walkdir::WalkDir;

use super::{GeoId, GeoType, GeoUnit};

/// List every `.shp` file below `dir`, sorted by path so loading order is stable.
pub fn find_shapefiles(dir: &Path) -> Result<Vec<PathBuf>> {
    ensure!(dir.is_dir(), "[map::read] Shapefile directory does not exist: {}", dir.display());

    let mut paths = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("shp")))
        .collect::<Vec<_>>();
    paths.sort();

    ensure!(!paths.is_empty(), "[map::read] No .shp files found in {}", dir.display());
    Ok(paths)
}

/// Reads all units of level `ty` from a `.shp` file (and its `.dbf` sidecar).
pub fn read_units(path: &Path, ty: GeoType) -> Result<Vec<GeoUnit>> {
    let mut reader = Reader::from_path(path)
        .with_context(|| format!("[map::read] Failed to open shapefile: {}", path.display()))?;

    let mut units = Vec::with_capacity(reader.shape_count()?);
    for (i, result) in reader.iter_shapes_and_records().enumerate() {
        let (shape, record) = result
            .with_context(|| format!("[map::read] Error reading shape+record {i} in {}", path.display()))?;
        units.push(unit_from_shape(shape, &record, ty)
            .with_context(|| format!("[map::read] Invalid record {i} in {}", path.display()))?);
    }

    tracing::debug!(path = %path.display(), units = units.len(), "loaded shapefile");
    Ok(units)
}

/// Convert one shapefile record into a `GeoUnit`.
/// Any shape other than a plain Polygon is a fatal error: the boundary files are structurally uniform.
pub fn unit_from_shape(shape: Shape, record: &Record, ty: GeoType) -> Result<GeoUnit> {
    let polygon = match shape {
        Shape::Polygon(polygon) => polygon,
        other => bail!("found non-Polygon shape: {:?}", other.shapetype()),
    };

    let geo_id = get_character_field(record, "GEOID")?;
    ensure!(geo_id.len() == ty.id_len(),
        "GEOID {geo_id:?} has length {}, expected {} for {ty}", geo_id.len(), ty.id_len());

    let rings = polygon.rings().iter()
        .map(|ring| LineString::new(
            ring.points().iter()
                .map(|pt| Coord { x: pt.x, y: pt.y })
                .collect()
        ))
        .collect();

    Ok(GeoUnit {
        state: get_character_field(record, "STATEFP")?,
        geo_id: GeoId::new(ty, &geo_id),
        rings,
        land_m2: get_numeric_field(record, "ALAND")?,
    })
}

/// Get the value of a character field from a Record
fn get_character_field(record: &Record, field: &str) -> Result<String> {
    match record.get(field) {
        Some(FieldValue::Character(Some(s))) => Ok(s.trim().to_string()),
        _ => bail!("missing or invalid character field: {}", field)
    }
}

/// Get the value of a numeric field from a Record
fn get_numeric_field(record: &Record, field: &str) -> Result<f64> {
    match record.get(field) {
        Some(FieldValue::Numeric(Some(n))) => Ok(*n),
        Some(FieldValue::Float(Some(n))) => Ok(*n as f64),
        _ => bail!("missing or invalid numeric field: {}", field)
    }
}

#[cfg(test)]
mod tests {
    use shapefile::{Point, Polygon, PolygonRing};

    use super::*;

    fn tract_record(geo_id: &str, state: &str) -> Record {
        let mut record = Record::default();
        record.insert("GEOID".to_string(), FieldValue::Character(Some(geo_id.to_string())));
        record.insert("STATEFP".to_string(), FieldValue::Character(Some(state.to_string())));
        record.insert("ALAND".to_string(), FieldValue::Numeric(Some(1234.0)));
        record
    }

    #[test]
    fn polygon_record_becomes_unit() {
        let polygon = Polygon::new(PolygonRing::Outer(vec![
            Point::new(-90.0, 40.0),
            Point::new(-90.0, 41.0),
            Point::new(-89.0, 41.0),
            Point::new(-90.0, 40.0),
        ]));
        let unit = unit_from_shape(Shape::Polygon(polygon), &tract_record("17001000100", "17"), GeoType::Tract)
            .unwrap();

        assert_eq!(unit.geo_id.id(), "17001000100");
        assert_eq!(unit.state, "17");
        assert_eq!(unit.rings.len(), 1);
        assert_eq!(unit.num_vertices(), 4);
        assert_eq!(unit.land_m2, 1234.0);
    }

    #[test]
    fn non_polygon_shape_is_fatal() {
        let shape = Shape::Point(Point::new(-90.0, 40.0));
        let err = unit_from_shape(shape, &tract_record("17001000100", "17"), GeoType::Tract).unwrap_err();
        assert!(err.to_string().contains("non-Polygon"));
    }

    #[test]
    fn wrong_geoid_width_is_rejected() {
        let polygon = Polygon::new(PolygonRing::Outer(vec![
            Point::new(0.0, 0.0), Point::new(0.0, 1.0), Point::new(1.0, 1.0), Point::new(0.0, 0.0),
        ]));
        assert!(unit_from_shape(Shape::Polygon(polygon), &tract_record("17001", "17"), GeoType::Tract).is_err());
    }

    #[test]
    fn missing_directory_is_an_error() {
        assert!(find_shapefiles(Path::new("/definitely/not/here")).is_err());
    }
}
