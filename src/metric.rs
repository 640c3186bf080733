use std::{fmt, str::FromStr};

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::data::Observation;

/// The quantity shown on the map: drives marker size and color, and the hover value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MetricSelector {
    #[default]
    #[serde(rename = "Population")]
    Population,
    #[serde(rename = "Solar Energy")]
    SolarEnergy,
    #[serde(rename = "Wind Energy")]
    WindEnergy,
    #[serde(rename = "Fraction (Solar)")]
    FractionSolar,
    #[serde(rename = "Fraction (Wind)")]
    FractionWind,
    #[serde(rename = "Fraction (Total)")]
    FractionTotal,
}

/// Static rendering parameters of a metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSpec {
    /// Marker sizes are clipped to this lower bound.
    pub floor: f64,
    /// CSS color of every marker.
    pub color: &'static str,
    /// Dropdown and hover label.
    pub label: &'static str,
}

impl MetricSelector {
    /// Metrics in dropdown order.
    pub const ALL: [MetricSelector; 6] = [
        MetricSelector::Population,
        MetricSelector::SolarEnergy,
        MetricSelector::WindEnergy,
        MetricSelector::FractionSolar,
        MetricSelector::FractionWind,
        MetricSelector::FractionTotal,
    ];

    pub fn spec(&self) -> MetricSpec {
        match self {
            MetricSelector::Population =>
                MetricSpec { floor: 1.0, color: "cornflowerblue", label: "Population" },
            MetricSelector::SolarEnergy =>
                MetricSpec { floor: 1.0, color: "#ffea2d", label: "Solar Energy" },
            MetricSelector::WindEnergy =>
                MetricSpec { floor: 1.0, color: "#008080", label: "Wind Energy" },
            MetricSelector::FractionSolar =>
                MetricSpec { floor: 0.0, color: "coral", label: "Fraction (Solar)" },
            MetricSelector::FractionWind =>
                MetricSpec { floor: 0.0, color: "midnightblue", label: "Fraction (Wind)" },
            MetricSelector::FractionTotal =>
                MetricSpec { floor: 0.0, color: "purple", label: "Fraction (Total)" },
        }
    }

    #[inline] pub fn label(&self) -> &'static str { self.spec().label }

    /// Self-sufficiency fractions, where a value above 1 means net production.
    #[inline]
    pub fn is_fraction(&self) -> bool {
        matches!(self, MetricSelector::FractionSolar | MetricSelector::FractionWind | MetricSelector::FractionTotal)
    }

    /// Value that sizes the marker, before clipping.
    pub fn value(&self, obs: &Observation) -> f64 {
        match self {
            MetricSelector::Population => obs.pop_end,
            MetricSelector::SolarEnergy => obs.solar,
            MetricSelector::WindEnergy => obs.wind,
            MetricSelector::FractionSolar => obs.fraction_solar,
            MetricSelector::FractionWind => obs.fraction_wind,
            MetricSelector::FractionTotal => obs.fraction_total,
        }
    }

    /// Value shown on hover. Population shows the start-of-period count
    /// while sizing by the end-of-period count.
    pub fn hover_value(&self, obs: &Observation) -> f64 {
        match self {
            MetricSelector::Population => obs.pop_start,
            _ => self.value(obs),
        }
    }

    /// Short kebab-case name, used on the command line.
    pub fn to_str(&self) -> &'static str {
        match self {
            MetricSelector::Population => "population",
            MetricSelector::SolarEnergy => "solar-energy",
            MetricSelector::WindEnergy => "wind-energy",
            MetricSelector::FractionSolar => "fraction-solar",
            MetricSelector::FractionWind => "fraction-wind",
            MetricSelector::FractionTotal => "fraction-total",
        }
    }
}

impl fmt::Display for MetricSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

impl FromStr for MetricSelector {
    type Err = anyhow::Error;

    /// Accepts the dropdown label ("Fraction (Solar)") or the kebab name ("fraction-solar").
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        for metric in MetricSelector::ALL {
            if s.eq_ignore_ascii_case(metric.label()) || s.eq_ignore_ascii_case(metric.to_str()) {
                return Ok(metric);
            }
        }
        bail!("[metric] unknown metric {s:?}, expected one of: {}",
            MetricSelector::ALL.map(|m| m.to_str()).join(", "))
    }
}
