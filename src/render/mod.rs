//! Static renderings of pipeline output.
//!
//! Renderers only read the values they are given. Each has a generic `*_to` form that writes
//! to any `std::io::Write` and a `write_*` form that writes to a file.

mod chart;
mod choropleth;
mod map;

pub use chart::{continent_bar_chart_to, growth_line_chart_to, write_continent_bar_chart, write_growth_line_chart};
pub use choropleth::{choropleth_frame, write_choropleth_csv};
pub use map::{city_point_map_to, write_city_point_map};

/// Human-readable population: 7.9B, 37.5M, 512.0K.
pub(crate) fn compact_number(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e9 { format!("{:.1}B", value / 1e9) }
    else if abs >= 1e6 { format!("{:.1}M", value / 1e6) }
    else if abs >= 1e3 { format!("{:.1}K", value / 1e3) }
    else { format!("{value:.0}") }
}
