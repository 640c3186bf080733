use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    config::DashboardConfig,
    data::DataStore,
    figure::Figure,
    image::BackgroundImage,
    layout::{MarkerLayout, layout_markers},
    metric::MetricSelector,
    region::CoordinateTable,
};

/// One dropdown entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

/// The user's current choices. A `None` period shows every period unfiltered.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Selection {
    pub period: Option<String>,
    pub metric: MetricSelector,
    pub self_sufficient_only: bool,
}

/// Everything a front end needs to drive the map: the loaded data, the fixed
/// region positions, the background, and the dashboard constants.
/// Built once at startup and shared read-only between renders.
#[derive(Debug, Clone)]
pub struct Dashboard {
    store: DataStore,
    table: CoordinateTable,
    background: Option<BackgroundImage>,
    config: DashboardConfig,
}

impl Dashboard {
    /// Startup problems that do not stop the dashboard are logged here, once.
    pub fn new(store: DataStore, table: CoordinateTable, background: Option<BackgroundImage>, config: DashboardConfig) -> Self {
        if let Some(period) = &config.default_period {
            if !store.periods().iter().any(|p| &**p == period) {
                tracing::warn!(period = %period, "[dashboard] default period not present in the dataset");
            }
        }
        if let Some(image) = &background {
            if !image.fits_canvas(config.canvas_width, config.canvas_height) {
                tracing::warn!(
                    image_width = image.width(), image_height = image.height(),
                    width = config.canvas_width, height = config.canvas_height,
                    "[dashboard] background size differs from the canvas; stretching"
                );
            }
        }
        Self { store, table, background, config }
    }

    #[inline] pub fn store(&self) -> &DataStore { &self.store }

    #[inline] pub fn table(&self) -> &CoordinateTable { &self.table }

    #[inline] pub fn config(&self) -> &DashboardConfig { &self.config }

    #[inline] pub fn background(&self) -> Option<&BackgroundImage> { self.background.as_ref() }

    /// Year dropdown: one entry per distinct period, in dataset order.
    pub fn year_options(&self) -> Vec<DropdownOption> {
        self.store.periods().iter()
            .map(|p| DropdownOption { label: p.to_string(), value: p.to_string() })
            .collect()
    }

    /// Metric dropdown, in display order.
    pub fn metric_options(&self) -> Vec<DropdownOption> {
        MetricSelector::ALL.iter()
            .map(|m| DropdownOption { label: m.label().to_string(), value: m.label().to_string() })
            .collect()
    }

    /// Selection shown before any user interaction.
    pub fn default_selection(&self) -> Selection {
        Selection {
            period: self.config.default_period.clone(),
            metric: self.config.default_metric,
            self_sufficient_only: false,
        }
    }

    /// Lay out the markers of a selection. An unknown region aborts the render.
    pub fn layout(&self, selection: &Selection) -> Result<MarkerLayout> {
        let rows = self.store.select(selection.period.as_deref());
        if rows.is_empty() {
            tracing::debug!(period = ?selection.period, "[dashboard] selection matches no rows");
        }

        layout_markers(rows, selection.metric, selection.self_sufficient_only, &self.table)
            .with_context(|| format!("[dashboard] cannot render {} for period {:?}", selection.metric, selection.period))
    }

    /// Figure for a selection; called once per change of any input.
    pub fn update_figure(&self, selection: &Selection) -> Result<Figure> {
        let layout = self.layout(selection)?;
        Ok(Figure::new(&layout, self.background.as_ref(), &self.config))
    }

    /// Standalone SVG map for a selection.
    pub fn render_svg(&self, selection: &Selection) -> Result<String> {
        self.layout(selection)?.to_svg_string(self.background.as_ref(), &self.config)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{data::Observation, image::png_header, region::{RegionCode, UnknownRegion}};

    fn row(region: &str, period: &str, fraction: f64) -> Observation {
        Observation {
            region: RegionCode::new(region),
            period: Arc::from(period),
            label: Arc::from(region),
            pop_end: 10.0,
            pop_start: 9.0,
            fraction_solar: fraction,
            ..Observation::default()
        }
    }

    fn dashboard() -> Dashboard {
        let table = CoordinateTable::default();
        let store = DataStore::from_observations(vec![
            row("ET0101", "2017JJ00", 2.0),
            row("ET0101", "2018JJ00", 1.5),
            row("ET0201", "2018JJ00", 0.5),
        ], &table).unwrap();
        Dashboard::new(store, table, None, DashboardConfig::default())
    }

    #[test]
    fn options_follow_data_and_metrics() {
        let dash = dashboard();
        let years: Vec<String> = dash.year_options().into_iter().map(|o| o.value).collect();
        assert_eq!(years, vec!["2017JJ00", "2018JJ00"]);

        let metrics: Vec<String> = dash.metric_options().into_iter().map(|o| o.label).collect();
        assert_eq!(metrics, vec!["Population", "Solar Energy", "Wind Energy",
            "Fraction (Solar)", "Fraction (Wind)", "Fraction (Total)"]);
    }

    #[test]
    fn default_selection_is_2018_population() {
        let selection = dashboard().default_selection();
        assert_eq!(selection.period.as_deref(), Some("2018JJ00"));
        assert_eq!(selection.metric, MetricSelector::Population);
        assert!(!selection.self_sufficient_only);
    }

    #[test]
    fn selection_drives_the_layout() {
        let dash = dashboard();
        let mut selection = dash.default_selection();
        assert_eq!(dash.layout(&selection).unwrap().len(), 2);

        selection.metric = MetricSelector::FractionSolar;
        selection.self_sufficient_only = true;
        let layout = dash.layout(&selection).unwrap();
        assert_eq!(layout.len(), 1);
        assert_eq!(layout.markers()[0].hover_value, 1.5);

        selection.period = None;
        assert_eq!(dash.layout(&selection).unwrap().len(), 2);
    }

    #[test]
    fn unknown_period_renders_nothing() {
        let dash = dashboard();
        let selection = Selection { period: Some("2030JJ00".into()), ..Selection::default() };
        let figure = dash.update_figure(&selection).unwrap();
        assert!(figure.data[0].x.is_empty());
        assert!(dash.render_svg(&selection).unwrap().contains("</svg>"));
    }

    #[test]
    fn render_fails_on_region_missing_from_table() {
        // The store was validated against the full table; rendering uses a smaller one.
        let full = CoordinateTable::default();
        let store = DataStore::from_observations(vec![row("ET0101", "2018JJ00", 1.0)], &full).unwrap();
        let partial = CoordinateTable::with_regions(&[("ET0201", 575.0, 840.0)]);
        let dash = Dashboard::new(store, partial, None, DashboardConfig::default());

        let err = dash.update_figure(&dash.default_selection()).unwrap_err();
        assert!(err.downcast_ref::<UnknownRegion>().is_some());
        assert!(err.to_string().contains("cannot render Population"));
    }

    #[test]
    fn mismatched_background_is_stretched() {
        let dash = dashboard();
        let image = BackgroundImage::from_png_bytes(png_header(449, 516)).unwrap();
        let dash = Dashboard::new(dash.store.clone(), dash.table.clone(), Some(image), DashboardConfig::default());

        let figure = dash.update_figure(&dash.default_selection()).unwrap();
        assert_eq!(figure.layout.images[0].sizex, 898.0);
        assert_eq!(figure.layout.images[0].sizey, 1032.0);
        assert!(dash.render_svg(&dash.default_selection()).unwrap().contains(r#"width="898" height="1032" preserveAspectRatio="none""#));
    }

    #[test]
    fn selection_deserializes_with_defaults() {
        let selection: Selection = serde_json::from_str(r#"{ "metric": "Fraction (Wind)" }"#).unwrap();
        assert_eq!(selection.metric, MetricSelector::FractionWind);
        assert_eq!(selection.period, None);
    }
}
