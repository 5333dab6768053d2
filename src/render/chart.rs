use std::{io::Write, path::Path};

use anyhow::{Result as AnyResult, ensure};

use crate::error::{PipelineError, Result};
use crate::io::svg::{
    SvgWriter, escape_text, golden_angle_color, write_svg_footer, write_svg_header, write_svg_styles, write_svg_title,
};
use crate::table::{ContinentTotal, TimeSeries};
use super::compact_number;

const WIDTH: f64 = 900.0;
const HEIGHT: f64 = 520.0;
const LEFT: f64 = 90.0;
const RIGHT: f64 = 30.0;
const TOP: f64 = 60.0;
const BOTTOM: f64 = 70.0;
const GRID_LINES: usize = 5;

/// Plot area in canvas coordinates.
struct Frame {
    x0: f64,
    x1: f64,
    y0: f64, // bottom
    y1: f64, // top
}

impl Frame {
    fn new() -> Self {
        Self { x0: LEFT, x1: WIDTH - RIGHT, y0: HEIGHT - BOTTOM, y1: TOP }
    }

    #[inline] fn width(&self) -> f64 { self.x1 - self.x0 }

    #[inline] fn height(&self) -> f64 { self.y0 - self.y1 }

    /// Canvas y for `value` on a linear axis from 0 to `max`.
    #[inline] fn y(&self, value: f64, max: f64) -> f64 { self.y0 - value / max * self.height() }
}

/// Horizontal gridlines with value labels, plus both axes.
fn write_axes<W: Write>(writer: &mut W, frame: &Frame, y_max: f64) -> AnyResult<()> {
    for i in 0..=GRID_LINES {
        let value = y_max * i as f64 / GRID_LINES as f64;
        let y = frame.y(value, y_max);
        writeln!(writer, r#"<line class="grid" x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}"/>"#, frame.x0, frame.x1)?;
        writeln!(writer, r#"<text class="label" x="{:.1}" y="{:.1}" text-anchor="end">{}</text>"#,
            frame.x0 - 8.0, y + 4.0, compact_number(value))?;
    }
    writeln!(writer, r#"<line class="axis" x1="{x0:.1}" y1="{y0:.1}" x2="{x1:.1}" y2="{y0:.1}"/>"#,
        x0 = frame.x0, x1 = frame.x1, y0 = frame.y0)?;
    writeln!(writer, r#"<line class="axis" x1="{x0:.1}" y1="{y0:.1}" x2="{x0:.1}" y2="{y1:.1}"/>"#,
        x0 = frame.x0, y0 = frame.y0, y1 = frame.y1)?;
    Ok(())
}

fn bar_chart<W: Write>(writer: &mut W, totals: &[ContinentTotal], year: u16) -> AnyResult<()> {
    ensure!(!totals.is_empty(), "[render::chart] No continent totals to draw.");

    let frame = Frame::new();
    let max = totals.iter().map(|t| t.population).max().unwrap_or(0).max(1) as f64 * 1.1;
    let slot = frame.width() / totals.len() as f64;
    let bar = slot * 0.7;

    write_svg_header(writer, WIDTH, HEIGHT)?;
    write_svg_styles(writer)?;
    write_svg_title(writer, WIDTH, &format!("Population by Continent ({year})"))?;
    write_axes(writer, &frame, max)?;

    for (i, total) in totals.iter().enumerate() {
        let value = total.population as f64;
        let x = frame.x0 + slot * i as f64 + (slot - bar) / 2.0;
        let y = frame.y(value, max);
        let name = escape_text(&total.continent);
        writeln!(writer, r#"<rect class="bar" x="{x:.1}" y="{y:.1}" width="{bar:.1}" height="{h:.1}" style="fill:{c}"><title>{name}: {value}</title></rect>"#,
            h = frame.y0 - y,
            c = golden_angle_color(i),
        )?;
        writeln!(writer, r#"<text class="label" x="{:.1}" y="{:.1}" text-anchor="middle">{}</text>"#,
            x + bar / 2.0, y - 6.0, compact_number(value))?;
        writeln!(writer, r#"<text class="label" x="{:.1}" y="{:.1}" text-anchor="middle">{name}</text>"#,
            x + bar / 2.0, frame.y0 + 18.0)?;
    }

    write_svg_footer(writer)
}

fn line_chart<W: Write>(writer: &mut W, series: &TimeSeries, prediction: Option<(f64, f64)>) -> AnyResult<()> {
    ensure!(series.points.len() >= 2, "[render::chart] Need at least two points to draw a line.");

    let frame = Frame::new();
    let first_year = series.points[0].0 as f64;
    let mut last_year = series.points[series.points.len() - 1].0 as f64;
    let mut max = series.values().max().unwrap_or(0) as f64;
    if let Some((year, value)) = prediction {
        ensure!(year.is_finite() && value.is_finite(), "[render::chart] Prediction is not finite.");
        last_year = last_year.max(year);
        max = max.max(value);
    }
    ensure!(last_year > first_year, "[render::chart] Series spans a single year.");
    let max = max.max(1.0) * 1.1;
    let x = |year: f64| frame.x0 + (year - first_year) / (last_year - first_year) * frame.width();

    write_svg_header(writer, WIDTH, HEIGHT)?;
    write_svg_styles(writer)?;
    write_svg_title(writer, WIDTH, &format!("Population Growth in {}", series.country))?;
    write_axes(writer, &frame, max)?;

    let points = series.points.iter()
        .map(|&(year, pop)| format!("{:.1},{:.1}", x(year as f64), frame.y(pop as f64, max)))
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(writer, r#"<polyline class="series" points="{points}"/>"#)?;

    for &(year, pop) in &series.points {
        let (cx, cy) = (x(year as f64), frame.y(pop as f64, max));
        writeln!(writer, r##"<circle cx="{cx:.1}" cy="{cy:.1}" r="3.5" fill="#2563eb"><title>{year}: {pop}</title></circle>"##)?;
        writeln!(writer, r#"<text class="label" x="{cx:.1}" y="{:.1}" text-anchor="middle">{year}</text>"#, frame.y0 + 18.0)?;
    }

    if let (Some((year, value)), Some((last, pop))) = (prediction, series.last()) {
        let (x0, y0) = (x(last as f64), frame.y(pop as f64, max));
        let (x1, y1) = (x(year), frame.y(value, max));
        writeln!(writer, r#"<polyline class="forecast" points="{x0:.1},{y0:.1} {x1:.1},{y1:.1}"/>"#)?;
        writeln!(writer, r##"<circle cx="{x1:.1}" cy="{y1:.1}" r="4.5" fill="#dc2626"><title>{year:.0} (predicted): {value:.0}</title></circle>"##)?;
        writeln!(writer, r#"<text class="label" x="{x1:.1}" y="{:.1}" text-anchor="middle">{year:.0}</text>"#, frame.y0 + 36.0)?;
    }

    write_svg_footer(writer)
}

/// Bar chart of population per continent.
pub fn continent_bar_chart_to<W: Write>(writer: &mut W, totals: &[ContinentTotal], year: u16) -> Result<()> {
    bar_chart(writer, totals, year).map_err(PipelineError::render)
}

pub fn write_continent_bar_chart(path: &Path, totals: &[ContinentTotal], year: u16) -> Result<()> {
    let mut writer = SvgWriter::new(path).map_err(PipelineError::render)?;
    continent_bar_chart_to(&mut writer, totals, year)?;
    writer.finish(path).map_err(PipelineError::render)
}

/// Line chart of a country's population, with an optional dashed extension to a
/// predicted `(year, population)` point.
pub fn growth_line_chart_to<W: Write>(writer: &mut W, series: &TimeSeries, prediction: Option<(f64, f64)>) -> Result<()> {
    line_chart(writer, series, prediction).map_err(PipelineError::render)
}

pub fn write_growth_line_chart(path: &Path, series: &TimeSeries, prediction: Option<(f64, f64)>) -> Result<()> {
    let mut writer = SvgWriter::new(path).map_err(PipelineError::render)?;
    growth_line_chart_to(&mut writer, series, prediction)?;
    writer.finish(path).map_err(PipelineError::render)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals() -> Vec<ContinentTotal> {
        vec![
            ContinentTotal { continent: "Asia".into(), population: 4_721_383_274 },
            ContinentTotal { continent: "Africa".into(), population: 1_426_730_932 },
            ContinentTotal { continent: "Europe".into(), population: 743_147_538 },
        ]
    }

    fn series() -> TimeSeries {
        TimeSeries {
            country: "Morocco".into(),
            points: vec![(1970, 15), (1980, 19), (1990, 24), (2000, 28), (2010, 32), (2015, 34), (2020, 36), (2022, 37)],
        }
    }

    #[test]
    fn bar_chart_has_one_bar_per_continent() {
        let mut out = Vec::new();
        continent_bar_chart_to(&mut out, &totals(), 2022).unwrap();
        let svg = String::from_utf8(out).unwrap();
        assert_eq!(svg.matches(r#"class="bar""#).count(), 3);
        assert!(svg.contains("Population by Continent (2022)"));
        assert!(svg.contains(">Asia</text>"));
    }

    #[test]
    fn empty_bar_chart_is_render_error() {
        let mut out = Vec::new();
        assert!(matches!(continent_bar_chart_to(&mut out, &[], 2022), Err(PipelineError::Render(_))));
    }

    #[test]
    fn line_chart_draws_every_point_and_forecast() {
        let mut out = Vec::new();
        growth_line_chart_to(&mut out, &series(), Some((2030.0, 42.0))).unwrap();
        let svg = String::from_utf8(out).unwrap();
        assert_eq!(svg.matches("<circle").count(), 9);
        assert_eq!(svg.matches(r#"class="forecast""#).count(), 1);
        assert!(svg.contains("Population Growth in Morocco"));
    }

    #[test]
    fn line_chart_without_forecast() {
        let mut out = Vec::new();
        growth_line_chart_to(&mut out, &series(), None).unwrap();
        let svg = String::from_utf8(out).unwrap();
        assert_eq!(svg.matches("<circle").count(), 8);
        assert!(!svg.contains(r#"class="forecast""#));
    }

    #[test]
    fn single_point_line_chart_is_render_error() {
        let series = TimeSeries { country: "X".into(), points: vec![(2022, 1)] };
        let mut out = Vec::new();
        assert!(matches!(growth_line_chart_to(&mut out, &series, None), Err(PipelineError::Render(_))));
    }
}
