//! Demographic and election tables keyed by GEOID.

use std::path::Path;

use ahash::AHashMap;
use anyhow::{Context, Result, anyhow, ensure};
use polars::{frame::DataFrame, prelude::DataType};

use crate::{io::csv::read_csv, map::{GeoId, GeoType}};

/// Columns that make up the GEOID rather than carrying values.
const KEY_COLUMNS: [&str; 3] = ["state", "county", "tract"];

/// Named numeric attributes per unit. A missing value (empty CSV field) is `None`, never zero.
#[derive(Debug, Clone, Default)]
pub struct Demographics {
    columns: AHashMap<String, usize>,
    rows: AHashMap<GeoId, Vec<Option<f64>>>,
}

impl Demographics {
    pub fn new<S: AsRef<str>>(columns: &[S]) -> Self {
        Self {
            columns: columns.iter().enumerate().map(|(i, name)| (name.as_ref().to_string(), i)).collect(),
            rows: AHashMap::new(),
        }
    }

    /// Insert (or replace) a unit's values, in column order.
    pub fn insert(&mut self, geo_id: GeoId, values: Vec<Option<f64>>) -> Result<()> {
        ensure!(values.len() == self.columns.len(),
            "[analysis::data] {} values given for {} columns", values.len(), self.columns.len());
        self.rows.insert(geo_id, values);
        Ok(())
    }

    #[inline] pub fn len(&self) -> usize { self.rows.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    #[inline] pub fn contains(&self, geo_id: &GeoId) -> bool { self.rows.contains_key(geo_id) }

    #[inline] pub fn has_column(&self, column: &str) -> bool { self.columns.contains_key(column) }

    /// Value of `column` for a unit, or `None` if the unit, the column, or the value is unknown.
    pub fn get(&self, geo_id: &GeoId, column: &str) -> Option<f64> {
        let &i = self.columns.get(column)?;
        self.rows.get(geo_id)?[i]
    }

    #[inline]
    pub fn population(&self, geo_id: &GeoId) -> Option<f64> { self.get(geo_id, "population") }

    /// True if the unit has residents. Zero or unknown population means "no residents".
    #[inline]
    pub fn is_populated(&self, geo_id: &GeoId) -> bool {
        self.population(geo_id).is_some_and(|population| population > 0.0)
    }

    /// Build from a DataFrame with `state`, `county` [, `tract`] string columns.
    pub fn from_dataframe(df: &DataFrame, ty: GeoType) -> Result<Self> {
        let state = df.column("state")?.str()?;
        let county = df.column("county")?.str()?;
        let tract = match ty {
            GeoType::Tract => Some(df.column("tract")?.str()?),
            GeoType::County => None,
        };

        let names = df.get_column_names().into_iter()
            .map(|name| name.to_string())
            .filter(|name| !KEY_COLUMNS.contains(&name.as_str()))
            .collect::<Vec<_>>();

        let casted = names.iter()
            .map(|name| df.column(name)?.cast(&DataType::Float64)
                .with_context(|| format!("[analysis::data] column {name:?} is not numeric")))
            .collect::<Result<Vec<_>>>()?;
        let values = casted.iter()
            .map(|column| Ok(column.f64()?))
            .collect::<Result<Vec<_>>>()?;

        let mut table = Self::new(&names);
        for row in 0..df.height() {
            let missing = || anyhow!("[analysis::data] row {row} has an empty FIPS code");
            let geo_id = GeoId::from_parts(
                state.get(row).ok_or_else(missing)?,
                county.get(row).ok_or_else(missing)?,
                match &tract {
                    Some(tract) => Some(tract.get(row).ok_or_else(missing)?),
                    None => None,
                },
            );
            table.insert(geo_id, values.iter().map(|column| column.get(row)).collect())?;
        }

        Ok(table)
    }

    /// Load `{unit}_population.csv`-style tables.
    pub fn read_csv(path: &Path, ty: GeoType) -> Result<Self> {
        let key_columns = match ty {
            GeoType::Tract => &KEY_COLUMNS[..],
            GeoType::County => &KEY_COLUMNS[..2],
        };
        let df = read_csv(path, key_columns)?;
        let table = Self::from_dataframe(&df, ty)
            .with_context(|| format!("[analysis::data] Invalid demographic table {}", path.display()))?;
        tracing::info!(path = %path.display(), units = table.len(), "loaded demographics");
        Ok(table)
    }
}

/// 2012 presidential vote shares for one county, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ElectionRecord {
    pub pct_obama: Option<f64>,
    pub pct_romney: Option<f64>,
}

/// County-level election results.
#[derive(Debug, Clone, Default)]
pub struct Elections {
    counties: AHashMap<GeoId, ElectionRecord>,
}

impl Elections {
    pub fn insert(&mut self, county: GeoId, record: ElectionRecord) {
        self.counties.insert(county, record);
    }

    #[inline] pub fn len(&self) -> usize { self.counties.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.counties.is_empty() }

    /// Results for the county containing `geo_id` (a county or a tract).
    pub fn get(&self, geo_id: &GeoId) -> Option<&ElectionRecord> {
        self.counties.get(&geo_id.to_parent(GeoType::County))
    }

    /// Build from a DataFrame with a `FIPS` column and `PCT_OBM` / `PCT_ROM` percentages.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let fips = df.column("FIPS")?.str()?;
        let obama = df.column("PCT_OBM")?.cast(&DataType::Float64)?;
        let romney = df.column("PCT_ROM")?.cast(&DataType::Float64)?;
        let (obama, romney) = (obama.f64()?, romney.f64()?);

        let mut elections = Self::default();
        for row in 0..df.height() {
            let Some(code) = fips.get(row) else { continue };
            // Some sources drop the leading zero of the state code.
            let code = format!("{:0>5}", code.trim());
            elections.insert(
                GeoId::new(GeoType::County, &code),
                ElectionRecord { pct_obama: obama.get(row), pct_romney: romney.get(row) },
            );
        }
        Ok(elections)
    }

    pub fn read_csv(path: &Path) -> Result<Self> {
        let df = read_csv(path, &["FIPS"])?;
        let elections = Self::from_dataframe(&df)
            .with_context(|| format!("[analysis::data] Invalid election table {}", path.display()))?;
        tracing::info!(path = %path.display(), counties = elections.len(), "loaded election results");
        Ok(elections)
    }
}

/// Everything a statistic may read. Passed explicitly to every accessor.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub demographics: Demographics,
    pub elections: Option<Elections>,
}

#[cfg(test)]
mod tests {
    use polars::prelude::*;

    use super::*;

    fn tract(id: &str) -> GeoId { GeoId::new(GeoType::Tract, id) }

    #[test]
    fn missing_values_stay_missing() {
        let mut table = Demographics::new(&["population", "median_income"]);
        table.insert(tract("01001020100"), vec![Some(1200.0), None]).unwrap();
        table.insert(tract("01001020200"), vec![Some(0.0), Some(40000.0)]).unwrap();

        assert_eq!(table.population(&tract("01001020100")), Some(1200.0));
        assert_eq!(table.get(&tract("01001020100"), "median_income"), None);
        assert_eq!(table.get(&tract("01001020100"), "no_such_column"), None);
        assert!(table.is_populated(&tract("01001020100")));
        assert!(!table.is_populated(&tract("01001020200")));
        assert!(!table.is_populated(&tract("99999999999")));
    }

    #[test]
    fn insert_checks_arity() {
        let mut table = Demographics::new(&["population"]);
        assert!(table.insert(tract("01001020100"), vec![Some(1.0), Some(2.0)]).is_err());
    }

    #[test]
    fn dataframe_rows_become_geoids() {
        let df = df!(
            "state" => ["01", "01"],
            "county" => ["001", "003"],
            "tract" => ["020100", "010100"],
            "population" => [Some(1200.0), None],
            "white" => [Some(800.0), Some(5.0)],
        ).unwrap();
        let table = Demographics::from_dataframe(&df, GeoType::Tract).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&tract("01001020100"), "white"), Some(800.0));
        assert_eq!(table.population(&tract("01003010100")), None);
        assert!(!table.has_column("state"));
    }

    #[test]
    fn elections_are_found_from_tracts() {
        let df = df!(
            "FIPS" => ["1001", "06037"],
            "PCT_OBM" => [26.6, 69.7],
            "PCT_ROM" => [72.6, 27.8],
        ).unwrap();
        let elections = Elections::from_dataframe(&df).unwrap();

        let record = elections.get(&tract("01001020100")).unwrap();
        assert_eq!(record.pct_obama, Some(26.6));
        assert_eq!(elections.get(&GeoId::new(GeoType::County, "06037")).unwrap().pct_romney, Some(27.8));
        assert!(elections.get(&GeoId::new(GeoType::County, "48201")).is_none());
    }
}
