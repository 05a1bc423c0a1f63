mod geo_id;
mod geo_type;
mod read;
mod unit;

pub use geo_id::GeoId;
pub use geo_type::GeoType;
pub use read::{find_shapefiles, read_units, unit_from_shape};
pub use unit::GeoUnit;
