//! CSV reading operations.

use std::{fs::File, io::Cursor, path::Path};

use anyhow::{Context, Result};
use polars::{frame::DataFrame, io::SerReader, prelude::{Column, CsvReadOptions, CsvReader}};

use crate::data::DataError;

pub(crate) const REGION_COL: &str = "RegioS";
pub(crate) const PERIOD_COL: &str = "Perioden";
pub(crate) const LABEL_COL: &str = "ID_x";
pub(crate) const POP_END_COL: &str = "BevolkingAanHetEindeVanDePeriode_15";
pub(crate) const POP_START_COL: &str = "BevolkingAanHetBeginVanDePeriode_1";
pub(crate) const SOLAR_COL: &str = "norm_prod_solar_allpower";
pub(crate) const WIND_COL: &str = "norm_prod_wind";
pub(crate) const FRACTION_SOLAR_COL: &str = "FractionSolar";
pub(crate) const FRACTION_WIND_COL: &str = "FractionWind";
pub(crate) const FRACTION_TOTAL_COL: &str = "FractionTotal";

/// Reads the energy dataset CSV at `path` into a Polars DataFrame.
pub(crate) fn read_csv(path: &Path) -> Result<DataFrame> {
    let file = File::open(path)
        .with_context(|| format!("[io::csv::read] Failed to open CSV file: {}", path.display()))?;
    CsvReader::new(file)
        .with_options(dataset_read_options())
        .finish()
        .with_context(|| format!("[io::csv::read] Failed to read CSV from {:?}", path))
}

/// Reads the energy dataset from CSV bytes (for embedding hosts and tests).
pub(crate) fn read_csv_bytes(bytes: &[u8]) -> Result<DataFrame> {
    CsvReader::new(Cursor::new(bytes))
        .with_options(dataset_read_options())
        .finish()
        .context("[io::csv::read] Failed to read CSV from bytes")
}

/// Every column is read as text: region codes keep their exact spelling and
/// the population column may use a comma decimal separator. Numbers are parsed per cell.
fn dataset_read_options() -> CsvReadOptions {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
}

fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name).map_err(|_| DataError::MissingColumn(name.to_string()).into())
}

/// Text cells of a column; nulls become empty strings and surrounding whitespace is trimmed.
pub(crate) fn string_values(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let values = column(df, name)?.str()
        .with_context(|| format!("[io::csv::read] column {name:?} is not text"))?;

    Ok(values.into_iter()
        .map(|cell| cell.map(str::trim).unwrap_or_default().to_string())
        .collect())
}

/// Numeric cells of a column. Nulls, NaN, infinities, and unparseable cells become 0.
/// Returns the values and the number of coerced cells.
pub(crate) fn numeric_values(df: &DataFrame, name: &str) -> Result<(Vec<f64>, usize)> {
    parsed_values(df, name, parse_finite)
}

/// Like [`numeric_values`], for a column that may use a comma decimal separator.
pub(crate) fn decimal_values(df: &DataFrame, name: &str) -> Result<(Vec<f64>, usize)> {
    parsed_values(df, name, parse_decimal)
}

fn parsed_values(df: &DataFrame, name: &str, parse: impl Fn(&str) -> Option<f64>) -> Result<(Vec<f64>, usize)> {
    let values = column(df, name)?.str()
        .with_context(|| format!("[io::csv::read] column {name:?} is not text"))?;

    let mut coerced = 0;
    let values = values.into_iter()
        .map(|cell| match cell.and_then(&parse) {
            Some(v) => v,
            None => { coerced += 1; 0.0 }
        })
        .collect();

    Ok((values, coerced))
}

/// Parse a finite number written with either decimal separator.
/// With a comma present, it is the decimal separator and dots before it group
/// thousands: "1.234,5" -> 1234.5. A dot after the comma makes the cell unparseable.
pub(crate) fn parse_decimal(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    match cell.split_once(',') {
        Some((whole, frac)) if !frac.contains(['.', ',']) =>
            parse_finite(&format!("{}.{frac}", whole.replace('.', ""))),
        Some(_) => None,
        None => parse_finite(cell),
    }
}

fn parse_finite(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
