use std::{io::Write, path::Path};

use anyhow::Result;

use crate::{common, config::DashboardConfig, image::BackgroundImage, layout::MarkerLayout};
use super::{SvgStringWriter, SvgWriter, escape_xml, write_svg_footer, write_svg_header, write_svg_styles};

/// Gap in pixels between a marker's top edge and its region label.
const LABEL_GAP: f64 = 4.0;

fn draw_markers(writer: &mut impl Write, layout: &MarkerLayout, background: Option<&BackgroundImage>, config: &DashboardConfig) -> Result<()> {
    let (width, height) = (config.canvas_width, config.canvas_height);
    let metric = layout.metric();

    write_svg_header(writer, width, height, metric.label())?;
    write_svg_styles(writer)?;

    if let Some(image) = background {
        writeln!(writer, r#"<image x="0" y="0" width="{width}" height="{height}" preserveAspectRatio="none" href="{}"/>"#,
            image.data_uri())?;
    }

    // Map pixels have y up; SVG has y down.
    for marker in layout.markers() {
        let cx = marker.position.x;
        let cy = height - marker.position.y;
        let r = layout.diameter(marker.size, config.marker_diameter_px) / 2.0;

        writeln!(writer, r#"<g data-region="{region}">"#, region = escape_xml(marker.region.as_str()))?;
        writeln!(writer, r#"<circle class="marker" cx="{cx:.3}" cy="{cy:.3}" r="{r:.3}" fill="{}"><title>{}&#10;{}: {}</title></circle>"#,
            marker.color,
            escape_xml(&marker.hover_label),
            escape_xml(metric.label()),
            marker.hover_value,
        )?;
        writeln!(writer, r#"<text class="label" x="{cx:.3}" y="{y:.3}">{}</text>"#,
            escape_xml(marker.region.as_str()),
            y = cy - r - LABEL_GAP,
        )?;
        writeln!(writer, "</g>")?;
    }

    write_svg_footer(writer)
}

impl MarkerLayout {
    /// Write the layout as a standalone SVG map at `path`.
    pub fn to_svg(&self, path: &Path, background: Option<&BackgroundImage>, config: &DashboardConfig) -> Result<()> {
        common::ensure_parent_dir_exists(path)?;
        let mut writer = SvgWriter::new(path)?;
        draw_markers(&mut writer, self, background, config)?;
        writer.flush()?;
        Ok(())
    }

    /// Render the layout as an SVG document string.
    pub fn to_svg_string(&self, background: Option<&BackgroundImage>, config: &DashboardConfig) -> Result<String> {
        let mut writer = SvgStringWriter::new();
        draw_markers(&mut writer, self, background, config)?;
        writer.into_string()
    }
}
