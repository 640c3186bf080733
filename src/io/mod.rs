//! IO module for format-specific reading and writing operations.
//!
//! - `csv` - CSV reading of the energy dataset
//! - `svg` - SVG export of marker layouts
//!
//! Figure JSON is produced by serde in `figure.rs`.

pub(crate) mod csv;
pub(crate) mod svg;
