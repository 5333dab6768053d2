//! IO module for format-specific reading and writing operations.
//!
//! # Format Modules
//!
//! - `csv` - CSV format for the population table and the choropleth color table
//! - `svg` - SVG format for chart and map export

pub(crate) mod csv;
pub(crate) mod svg;
