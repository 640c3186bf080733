//! SVG format writing operations for map export.

mod markers;
mod writer;

pub(crate) use writer::*;
