#![doc = "energymap public API"]
mod common;
mod config;
mod dashboard;
mod data;
mod figure;
mod image;
mod io;
mod layout;
mod metric;
mod region;

#[doc(inline)]
pub use config::DashboardConfig;

#[doc(inline)]
pub use dashboard::{Dashboard, DebugPanel, DropdownOption, Selection, echo_event};

#[doc(inline)]
pub use data::{DataError, DataStore, Observation};

#[doc(inline)]
pub use figure::{Axis, Figure, FigureLayout, LayoutImage, Margin, MarkerStyle, ScatterTrace};

#[doc(inline)]
pub use image::BackgroundImage;

#[doc(inline)]
pub use layout::{DEFAULT_MARKER_DIAMETER_PX, MarkerLayout, MarkerRecord, layout_markers};

#[doc(inline)]
pub use metric::{MetricSelector, MetricSpec};

#[doc(inline)]
pub use region::{CoordinateTable, RegionCode, UnknownRegion};
