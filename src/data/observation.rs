use std::sync::Arc;

use crate::region::RegionCode;

/// One dataset row: a region's figures for one reporting period.
/// All numeric fields are already normalized; missing values read as 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Observation {
    pub region: RegionCode,
    pub period: Arc<str>,     // e.g. "2018JJ00"
    pub label: Arc<str>,      // identity text shown on hover
    pub pop_end: f64,         // population at the end of the period
    pub pop_start: f64,       // population at the start of the period
    pub solar: f64,           // normalized solar production
    pub wind: f64,            // normalized wind production
    pub fraction_solar: f64,  // solar self-sufficiency
    pub fraction_wind: f64,   // wind self-sufficiency
    pub fraction_total: f64,  // total self-sufficiency
}
