use std::path::PathBuf;

use energymap::MetricSelector;

/// Energy map CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "energymap", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// List the periods of a dataset (year dropdown options)
    Periods(PeriodsArgs),

    /// Render the markers of one selection
    Render(RenderArgs),

    /// Print an interaction event payload the way the debug panels show it
    Echo(EchoArgs),
}

#[derive(clap::Args, Debug)]
pub struct PeriodsArgs {
    /// Input dataset (CSV)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub data: PathBuf,

    /// Print dropdown options as JSON instead of one period per line
    #[arg(long)]
    pub json: bool,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, clap::ValueEnum)]
pub enum OutputFormat { Svg, Figure, Markers }

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// Input dataset (CSV)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub data: PathBuf,

    /// Background map (PNG)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub image: Option<PathBuf>,

    /// Period to show, defaults to the configured period
    #[arg(short, long, conflicts_with = "all_periods")]
    pub period: Option<String>,

    /// Show every period unfiltered
    #[arg(long)]
    pub all_periods: bool,

    /// Metric, e.g. "Population" or fraction-solar; defaults to the configured metric
    #[arg(short, long)]
    pub metric: Option<MetricSelector>,

    /// Keep only self-sufficient regions (fraction metrics only)
    #[arg(long)]
    pub self_sufficient: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
    pub format: OutputFormat,

    /// Dashboard config overrides (JSON)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Output file; defaults to "./map.svg" for SVG and stdout for JSON formats
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct EchoArgs {
    /// Event payload (JSON); reads stdin when omitted
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: Option<PathBuf>,
}
