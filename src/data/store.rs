use std::{path::Path, sync::Arc};

use ahash::AHashMap;
use anyhow::{Context, Result};
use polars::frame::DataFrame;

use crate::{common, io::csv, region::{CoordinateTable, UnknownRegion}};
use super::Observation;

/// Load-time data problems. Raised once at startup, never deferred to rendering.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("[data] dataset is missing required column {0:?}")]
    MissingColumn(String),

    #[error("[data] row {row}: {source}")]
    UnknownRegion { row: usize, #[source] source: UnknownRegion },
}

/// The loaded dataset, immutable after construction.
#[derive(Debug, Clone, Default)]
pub struct DataStore {
    observations: Vec<Observation>,
    periods: Vec<Arc<str>>, // distinct periods, in order of first appearance
}

impl DataStore {
    /// Read and validate the dataset CSV at `path`.
    pub fn read_csv(path: &Path, table: &CoordinateTable) -> Result<Self> {
        common::require_file_exists(path)?;
        let df = csv::read_csv(path)?;
        Self::from_frame(&df, table)
            .with_context(|| format!("[data] Failed to load dataset {}", path.display()))
    }

    /// Read and validate the dataset from CSV bytes.
    pub fn from_csv_bytes(bytes: &[u8], table: &CoordinateTable) -> Result<Self> {
        Self::from_frame(&csv::read_csv_bytes(bytes)?, table)
    }

    /// Build the store from a dataset frame, normalizing every numeric column
    /// and checking each region code against `table`.
    pub fn from_frame(df: &DataFrame, table: &CoordinateTable) -> Result<Self> {
        let regions = csv::string_values(df, csv::REGION_COL)?;
        let periods = csv::string_values(df, csv::PERIOD_COL)?;
        let labels = csv::string_values(df, csv::LABEL_COL)?;

        let (pop_end, coerced) = csv::decimal_values(df, csv::POP_END_COL)?;
        log_coerced(csv::POP_END_COL, coerced);

        let numeric = |name: &str| -> Result<Vec<f64>> {
            let (values, coerced) = csv::numeric_values(df, name)?;
            log_coerced(name, coerced);
            Ok(values)
        };
        let pop_start = numeric(csv::POP_START_COL)?;
        let solar = numeric(csv::SOLAR_COL)?;
        let wind = numeric(csv::WIND_COL)?;
        let fraction_solar = numeric(csv::FRACTION_SOLAR_COL)?;
        let fraction_wind = numeric(csv::FRACTION_WIND_COL)?;
        let fraction_total = numeric(csv::FRACTION_TOTAL_COL)?;

        let mut interned: AHashMap<String, Arc<str>> = AHashMap::new();
        let mut intern = |text: String| -> Arc<str> {
            interned.entry(text).or_insert_with_key(|k| Arc::from(k.as_str())).clone()
        };

        let observations = (0..df.height())
            .map(|i| {
                let region = table.resolve(&regions[i])
                    .map_err(|source| DataError::UnknownRegion { row: i, source })?;
                Ok(Observation {
                    region,
                    period: intern(periods[i].clone()),
                    label: intern(labels[i].clone()),
                    pop_end: pop_end[i],
                    pop_start: pop_start[i],
                    solar: solar[i],
                    wind: wind[i],
                    fraction_solar: fraction_solar[i],
                    fraction_wind: fraction_wind[i],
                    fraction_total: fraction_total[i],
                })
            })
            .collect::<Result<Vec<_>, DataError>>()?;

        Self::from_observations(observations, table)
    }

    /// Build the store from rows that were already parsed.
    pub fn from_observations(observations: Vec<Observation>, table: &CoordinateTable) -> Result<Self> {
        for (row, obs) in observations.iter().enumerate() {
            table.position(&obs.region)
                .map_err(|source| DataError::UnknownRegion { row, source })?;
        }

        let mut periods: Vec<Arc<str>> = Vec::new();
        for obs in &observations {
            if !periods.contains(&obs.period) { periods.push(obs.period.clone()) }
        }

        tracing::debug!(rows = observations.len(), periods = periods.len(), "[data] dataset loaded");
        Ok(Self { observations, periods })
    }

    #[inline] pub fn len(&self) -> usize { self.observations.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.observations.is_empty() }

    /// All rows, in file order.
    #[inline] pub fn observations(&self) -> &[Observation] { &self.observations }

    /// Distinct periods in order of first appearance.
    #[inline] pub fn periods(&self) -> &[Arc<str>] { &self.periods }

    /// Rows of one period in file order, or every row when `period` is `None`.
    /// An unknown period selects nothing.
    pub fn select(&self, period: Option<&str>) -> Vec<&Observation> {
        self.observations.iter()
            .filter(|obs| period.is_none_or(|p| &*obs.period == p))
            .collect()
    }
}

fn log_coerced(column: &str, coerced: usize) {
    if coerced > 0 {
        tracing::debug!(column, coerced, "[data] non-numeric cells read as 0");
    }
}
