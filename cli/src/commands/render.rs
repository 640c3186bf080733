use std::path::PathBuf;

use anyhow::Result;

use energymap::{BackgroundImage, CoordinateTable, Dashboard, DashboardConfig, DataStore, Figure, Selection};

use crate::cli::{Cli, OutputFormat, RenderArgs};

pub fn run(_cli: &Cli, args: &RenderArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => DashboardConfig::read_json(path)?,
        None => DashboardConfig::default(),
    };

    // Load everything up front so data problems surface before rendering.
    let table = CoordinateTable::default();
    let store = DataStore::read_csv(&args.data, &table)?;
    let background = args.image.as_deref().map(BackgroundImage::read).transpose()?;
    tracing::info!(rows = store.len(), periods = store.periods().len(), data = %args.data.display(), "[render] dataset loaded");

    let dashboard = Dashboard::new(store, table, background, config);
    let selection = selection(&dashboard, args);
    tracing::info!(period = ?selection.period, metric = %selection.metric, self_sufficient = selection.self_sufficient_only, "[render] selection");

    let layout = dashboard.layout(&selection)?;
    let (background, config) = (dashboard.background(), dashboard.config());

    match output_path(args) {
        Some(path) => {
            match args.format {
                OutputFormat::Svg => layout.to_svg(&path, background, config)?,
                OutputFormat::Figure => Figure::new(&layout, background, config).write_json(&path)?,
                OutputFormat::Markers => layout.write_json(&path)?,
            }
            tracing::info!(output = %path.display(), "[render] written");
        }
        None => {
            let output = match args.format {
                OutputFormat::Svg => layout.to_svg_string(background, config)?,
                OutputFormat::Figure => Figure::new(&layout, background, config).to_json_pretty()?,
                OutputFormat::Markers => layout.to_json_pretty()?,
            };
            println!("{output}");
        }
    }

    Ok(())
}

/// Selection from the arguments, falling back to the dashboard defaults.
fn selection(dashboard: &Dashboard, args: &RenderArgs) -> Selection {
    let defaults = dashboard.default_selection();
    Selection {
        period: if args.all_periods { None } else { args.period.clone().or(defaults.period) },
        metric: args.metric.unwrap_or(defaults.metric),
        self_sufficient_only: args.self_sufficient,
    }
}

fn output_path(args: &RenderArgs) -> Option<PathBuf> {
    match (&args.output, args.format) {
        (Some(path), _) => Some(path.clone()),
        (None, OutputFormat::Svg) => Some(PathBuf::from("map.svg")),
        (None, _) => None,
    }
}
