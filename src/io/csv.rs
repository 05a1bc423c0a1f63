//! Polars-backed CSV tables.

use std::{fs::File, path::Path, sync::Arc};

use anyhow::{Context, Result};
use polars::{
    frame::DataFrame,
    io::{SerReader, SerWriter},
    prelude::{CsvReadOptions, CsvReader, CsvWriter, DataType, Field, Schema, SchemaRef},
};

/// Reads a CSV file from `path` into a Polars DataFrame, forcing `text_columns` to be
/// read as strings so FIPS codes keep their leading zeros.
pub(crate) fn read_csv(path: &Path, text_columns: &[&str]) -> Result<DataFrame> {
    let file = File::open(path)
        .with_context(|| format!("[io::csv::read] Failed to open CSV file: {}", path.display()))?;

    let options = CsvReadOptions::default()
        .with_has_header(true)
        .with_schema_overwrite(Some(text_schema(text_columns)));

    CsvReader::new(file)
        .with_options(options)
        .finish()
        .with_context(|| format!("[io::csv::read] Failed to read CSV from {:?}", path))
}

/// Schema overwrite declaring every listed column as String.
fn text_schema(columns: &[&str]) -> SchemaRef {
    Arc::new(Schema::from_iter(
        columns.iter().map(|&name| Field::new(name.into(), DataType::String))
    ))
}

/// Write a DataFrame to a CSV file.
pub(crate) fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("[io::csv::write] Failed to create CSV file: {}", path.display()))?;
    CsvWriter::new(file)
        .finish(df)
        .with_context(|| format!("[io::csv::write] Failed to write CSV to {:?}", path))
}
