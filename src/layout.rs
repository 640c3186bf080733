//! Marker layout: turns the rows of one selection into marker geometry.

use std::{path::Path, sync::Arc};

use anyhow::Result;
use geo::Coord;
use serde::Serialize;

use crate::{common, data::Observation, metric::MetricSelector, region::{CoordinateTable, RegionCode, UnknownRegion}};

/// Diameter in pixels of the largest marker of a layout.
pub const DEFAULT_MARKER_DIAMETER_PX: f64 = 30.0;

/// One marker on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerRecord {
    pub region: RegionCode,
    pub position: Coord<f64>,   // map pixels, origin bottom-left
    pub size: f64,              // metric value clipped to the metric's floor
    pub color: &'static str,
    pub hover_label: Arc<str>,  // identity text of the row
    pub hover_value: f64,       // raw value shown on hover
}

/// Markers of one render, sharing a single size reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerLayout {
    metric: MetricSelector,
    markers: Vec<MarkerRecord>,
    size_ref: Option<f64>, // largest marker size, `None` when there are no markers
}

impl MarkerLayout {
    #[inline] pub fn metric(&self) -> MetricSelector { self.metric }

    #[inline] pub fn markers(&self) -> &[MarkerRecord] { &self.markers }

    #[inline] pub fn len(&self) -> usize { self.markers.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.markers.is_empty() }

    /// Largest marker size of this layout.
    #[inline] pub fn size_ref(&self) -> Option<f64> { self.size_ref }

    /// Size units per square pixel, so that the largest marker is `diameter_px` across.
    pub fn area_scale(&self, diameter_px: f64) -> Option<f64> {
        self.size_ref.map(|size_ref| size_ref / (diameter_px * diameter_px))
    }

    /// Rendered diameter of a marker of the given size. Marker area is proportional to size.
    pub fn diameter(&self, size: f64, diameter_px: f64) -> f64 {
        match self.area_scale(diameter_px) {
            Some(scale) if scale > 0.0 => (size / scale).sqrt(),
            _ => 0.0,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> { Ok(serde_json::to_string_pretty(self)?) }

    /// Write the markers as pretty-printed JSON to `path`.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        common::write_file(path, self.to_json_pretty()?)
    }
}

/// Lay out one marker per observation for `metric`.
///
/// Every region must have a position in `table`; a missing one aborts the layout.
/// With `self_sufficient_only`, fraction metrics keep only rows whose value exceeds 1;
/// the flag does nothing for the other metrics. Marker order follows `observations`.
pub fn layout_markers<'a>(
    observations: impl IntoIterator<Item = &'a Observation>,
    metric: MetricSelector,
    self_sufficient_only: bool,
    table: &CoordinateTable,
) -> Result<MarkerLayout, UnknownRegion> {
    let spec = metric.spec();
    let filter = self_sufficient_only && metric.is_fraction();

    let positioned = observations.into_iter()
        .map(|obs| Ok((obs, table.position(&obs.region)?)))
        .collect::<Result<Vec<_>, UnknownRegion>>()?;
    let total = positioned.len();

    let markers: Vec<MarkerRecord> = positioned.into_iter()
        .filter(|(obs, _)| !filter || metric.value(obs) > 1.0)
        .map(|(obs, position)| MarkerRecord {
            region: obs.region.clone(),
            position,
            size: metric.value(obs).max(spec.floor),
            color: spec.color,
            hover_label: obs.label.clone(),
            hover_value: metric.hover_value(obs),
        })
        .collect();

    let size_ref = markers.iter()
        .map(|marker| marker.size)
        .reduce(f64::max);

    tracing::debug!(%metric, markers = markers.len(), dropped = total - markers.len(), ?size_ref, "[layout] markers laid out");

    Ok(MarkerLayout { metric, markers, size_ref })
}
