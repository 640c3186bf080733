//! CSV reading for the energy dataset.

mod read;

pub(crate) use read::*;
