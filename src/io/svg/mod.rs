//! SVG format writing operations for chart and map export.

mod color;
mod writer;

pub(crate) use color::*;
pub(crate) use writer::*;
