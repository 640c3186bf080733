//! Plotly figure document handed to the dashboard front end.
//!
//! The figure holds the background image as a layout image anchored at the
//! top-left corner of the canvas, and one scatter trace carrying the markers.
//! Axes are hidden and pinned to the canvas, so marker coordinates are map pixels.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::{common, config::DashboardConfig, image::BackgroundImage, layout::MarkerLayout};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<ScatterTrace>,
    pub layout: FigureLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTrace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub mode: &'static str,
    pub text: Vec<String>,
    pub textposition: &'static str,
    pub customdata: Vec<(String, f64)>,  // (hover label, hover value)
    pub marker: MarkerStyle,
    pub hovertemplate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerStyle {
    pub color: &'static str,
    pub size: Vec<f64>,
    pub sizemode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizeref: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FigureLayout {
    pub images: Vec<LayoutImage>,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub clickmode: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutImage {
    pub source: String,
    pub xref: &'static str,
    pub yref: &'static str,
    pub x: f64,
    pub y: f64,
    pub sizex: f64,
    pub sizey: f64,
    pub sizing: &'static str,
    pub opacity: f64,
    pub layer: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub visible: bool,
    pub range: [f64; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scaleanchor: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scaleratio: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin { pub l: f64, pub r: f64, pub t: f64, pub b: f64 }

impl Figure {
    /// Build the figure for one marker layout. Without a background image the
    /// layout carries no image layer.
    pub fn new(layout: &MarkerLayout, background: Option<&BackgroundImage>, config: &DashboardConfig) -> Self {
        let (width, height) = (config.canvas_width, config.canvas_height);
        let markers = layout.markers();

        let trace = ScatterTrace {
            kind: "scatter",
            x: markers.iter().map(|m| m.position.x).collect(),
            y: markers.iter().map(|m| m.position.y).collect(),
            mode: "markers+text",
            text: markers.iter().map(|m| m.region.to_string()).collect(),
            textposition: "top center",
            customdata: markers.iter().map(|m| (m.hover_label.to_string(), m.hover_value)).collect(),
            marker: MarkerStyle {
                color: layout.metric().spec().color,
                size: markers.iter().map(|m| m.size).collect(),
                sizemode: "area",
                sizeref: layout.area_scale(config.marker_diameter_px),
            },
            hovertemplate: format!("<b>%{{text}}</b><br>{}: %{{customdata[1]}}<extra></extra>", layout.metric().label()),
        };

        let images = background.into_iter()
            .map(|image| LayoutImage {
                source: image.data_uri(),
                xref: "x",
                yref: "y",
                x: 0.0,
                y: height,
                sizex: width,
                sizey: height,
                sizing: "stretch",
                opacity: 1.0,
                layer: "below",
            })
            .collect();

        Self {
            data: vec![trace],
            layout: FigureLayout {
                images,
                xaxis: Axis { visible: false, range: [0.0, width], scaleanchor: None, scaleratio: None },
                yaxis: Axis { visible: false, range: [0.0, height], scaleanchor: Some("x"), scaleratio: Some(1.0) },
                width,
                height,
                margin: Margin { l: 0.0, r: 0.0, t: 0.0, b: 0.0 },
                clickmode: "event+select",
            },
        }
    }

    pub fn to_json(&self) -> Result<String> { Ok(serde_json::to_string(self)?) }

    pub fn to_json_pretty(&self) -> Result<String> { Ok(serde_json::to_string_pretty(self)?) }

    /// Write the pretty-printed figure to `path`.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        common::write_file(path, self.to_json_pretty()?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{json, Value};

    use super::*;
    use crate::{data::Observation, image::png_header, layout::layout_markers, metric::MetricSelector, region::{CoordinateTable, RegionCode}};

    fn layout(metric: MetricSelector) -> MarkerLayout {
        let rows = vec![
            Observation {
                region: RegionCode::new("ET0101"), label: Arc::from("Groningen"),
                pop_end: 400.0, pop_start: 390.0, solar: 12.0, ..Observation::default()
            },
            Observation {
                region: RegionCode::new("ET3002"), label: Arc::from("Zuid-Limburg"),
                pop_end: 100.0, pop_start: 99.0, solar: 3.0, ..Observation::default()
            },
        ];
        layout_markers(&rows, metric, false, &CoordinateTable::default()).unwrap()
    }

    #[test]
    fn trace_carries_markers() {
        let figure = Figure::new(&layout(MetricSelector::Population), None, &DashboardConfig::default());
        let value: Value = serde_json::from_str(&figure.to_json().unwrap()).unwrap();
        let trace = &value["data"][0];

        assert_eq!(trace["type"], "scatter");
        assert_eq!(trace["x"], json!([760.0, 560.0]));
        assert_eq!(trace["y"], json!([910.0, 48.0]));
        assert_eq!(trace["text"], json!(["ET0101", "ET3002"]));
        assert_eq!(trace["customdata"], json!([["Groningen", 390.0], ["Zuid-Limburg", 99.0]]));
        assert_eq!(trace["marker"]["color"], "cornflowerblue");
        assert_eq!(trace["marker"]["size"], json!([400.0, 100.0]));
        assert_eq!(trace["marker"]["sizemode"], "area");
        assert_eq!(trace["marker"]["sizeref"], json!(400.0 / 900.0));
        assert_eq!(trace["hovertemplate"], "<b>%{text}</b><br>Population: %{customdata[1]}<extra></extra>");
    }

    #[test]
    fn layout_is_pinned_to_canvas() {
        let image = BackgroundImage::from_png_bytes(png_header(898, 1032)).unwrap();
        let figure = Figure::new(&layout(MetricSelector::SolarEnergy), Some(&image), &DashboardConfig::default());
        let value: Value = serde_json::from_str(&figure.to_json_pretty().unwrap()).unwrap();
        let layout = &value["layout"];

        assert_eq!(layout["width"], 898.0);
        assert_eq!(layout["height"], 1032.0);
        assert_eq!(layout["clickmode"], "event+select");
        assert_eq!(layout["xaxis"], json!({ "visible": false, "range": [0.0, 898.0] }));
        assert_eq!(layout["yaxis"], json!({ "visible": false, "range": [0.0, 1032.0], "scaleanchor": "x", "scaleratio": 1.0 }));
        assert_eq!(layout["margin"], json!({ "l": 0.0, "r": 0.0, "t": 0.0, "b": 0.0 }));

        let img = &layout["images"][0];
        assert_eq!(img["y"], 1032.0);
        assert_eq!(img["sizex"], 898.0);
        assert_eq!(img["layer"], "below");
        assert!(img["source"].as_str().unwrap().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn writes_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/figure.json");
        let figure = Figure::new(&layout(MetricSelector::WindEnergy), None, &DashboardConfig::default());
        figure.write_json(&path).unwrap();

        let value: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["data"][0]["marker"]["color"], "#008080");
    }

    #[test]
    fn empty_layout_omits_sizeref() {
        let empty = layout_markers(Vec::<&Observation>::new(), MetricSelector::FractionTotal, true, &CoordinateTable::default()).unwrap();
        let figure = Figure::new(&empty, None, &DashboardConfig::default());
        let value: Value = serde_json::from_str(&figure.to_json().unwrap()).unwrap();

        assert_eq!(value["data"][0]["x"], json!([]));
        assert!(value["data"][0]["marker"].get("sizeref").is_none());
        assert_eq!(value["data"][0]["marker"]["color"], "purple");
        assert_eq!(value["layout"]["images"], json!([]));
    }
}
