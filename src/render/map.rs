use std::{io::Write, path::Path};

use anyhow::{Result as AnyResult, ensure};
use geo::{Coord, Rect, coord};

use crate::cities::City;
use crate::error::{PipelineError, Result};
use crate::io::svg::{SvgWriter, TURBO, escape_text, write_svg_footer, write_svg_header, write_svg_styles, write_svg_title};

const WIDTH: f64 = 1200.0;
const MARGIN: f64 = 20.0;
const TITLE_SPACE: f64 = 40.0;
const MAX_RADIUS: f64 = 15.0;
const GRATICULE_STEP: f64 = 30.0;

/// Projection function: lon/lat -> SVG coords (x,y)
type Projection = dyn Fn(&Coord<f64>) -> (f64, f64);

/// Equirectangular projection of `bounds` onto a canvas `width` wide, preserving aspect.
fn equirectangular(bounds: Rect<f64>, width: f64) -> (Box<Projection>, f64) {
    let scale = (width - 2.0 * MARGIN) / bounds.width();
    let height = bounds.height() * scale + 2.0 * MARGIN + TITLE_SPACE;
    let (min, max) = (bounds.min(), bounds.max());
    let project = move |c: &Coord<f64>| {
        (MARGIN + (c.x - min.x) * scale, MARGIN + TITLE_SPACE + (max.y - c.y) * scale)
    };
    (Box::new(project), height)
}

fn draw_graticule(writer: &mut impl Write, bounds: Rect<f64>, project: &Projection) -> AnyResult<()> {
    let (min, max) = (bounds.min(), bounds.max());
    let mut lon = (min.x / GRATICULE_STEP).ceil() * GRATICULE_STEP;
    while lon <= max.x {
        let (x1, y1) = project(&coord! { x: lon, y: max.y });
        let (x2, y2) = project(&coord! { x: lon, y: min.y });
        writeln!(writer, r#"<line class="grid" x1="{x1:.1}" y1="{y1:.1}" x2="{x2:.1}" y2="{y2:.1}"/>"#)?;
        lon += GRATICULE_STEP;
    }
    let mut lat = (min.y / GRATICULE_STEP).ceil() * GRATICULE_STEP;
    while lat <= max.y {
        let (x1, y1) = project(&coord! { x: min.x, y: lat });
        let (x2, y2) = project(&coord! { x: max.x, y: lat });
        writeln!(writer, r#"<line class="grid" x1="{x1:.1}" y1="{y1:.1}" x2="{x2:.1}" y2="{y2:.1}"/>"#)?;
        lat += GRATICULE_STEP;
    }
    Ok(())
}

fn point_map<W: Write>(writer: &mut W, cities: &[City]) -> AnyResult<()> {
    ensure!(!cities.is_empty(), "[render::map] No cities to draw.");

    let bounds = Rect::new(coord! { x: -180.0, y: -90.0 }, coord! { x: 180.0, y: 90.0 });
    let (project, height) = equirectangular(bounds, WIDTH);

    let sizes = cities.iter().map(|c| c.population_millions);
    let max = sizes.clone().fold(f64::NEG_INFINITY, f64::max);
    let min = sizes.fold(f64::INFINITY, f64::min);

    write_svg_header(writer, WIDTH, height)?;
    write_svg_styles(writer)?;
    write_svg_title(writer, WIDTH, "World's Major Cities by Population")?;
    draw_graticule(writer, bounds, &project)?;

    // Largest first so small circles stay on top.
    let mut order = cities.iter().collect::<Vec<_>>();
    order.sort_by(|a, b| b.population_millions.total_cmp(&a.population_millions));

    for city in order {
        let (cx, cy) = project(&city.location.0);
        let r = if max > 0.0 { (city.population_millions.max(0.0) / max).sqrt() * MAX_RADIUS } else { MAX_RADIUS };
        writeln!(writer, r#"<circle class="city" cx="{cx:.1}" cy="{cy:.1}" r="{r:.2}" style="fill:{fill}"><title>{name}, {country}: {pop:.1}M</title></circle>"#,
            fill = TURBO.scaled(city.population_millions, min, max),
            name = escape_text(city.name),
            country = escape_text(city.country),
            pop = city.population_millions,
        )?;
    }

    write_svg_footer(writer)
}

/// Point map of `cities` over a world graticule; circle area and color follow population.
pub fn city_point_map_to<W: Write>(writer: &mut W, cities: &[City]) -> Result<()> {
    point_map(writer, cities).map_err(PipelineError::render)
}

pub fn write_city_point_map(path: &Path, cities: &[City]) -> Result<()> {
    let mut writer = SvgWriter::new(path).map_err(PipelineError::render)?;
    city_point_map_to(&mut writer, cities)?;
    writer.finish(path).map_err(PipelineError::render)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cities::major_cities;

    #[test]
    fn projection_maps_corners() {
        let bounds = Rect::new(coord! { x: -180.0, y: -90.0 }, coord! { x: 180.0, y: 90.0 });
        let (project, height) = equirectangular(bounds, 760.0);
        // 720 px for 360 degrees: 2 px per degree.
        assert_eq!(height, 180.0 * 2.0 + 2.0 * MARGIN + TITLE_SPACE);
        assert_eq!(project(&coord! { x: -180.0, y: 90.0 }), (MARGIN, MARGIN + TITLE_SPACE));
        assert_eq!(project(&coord! { x: 0.0, y: 0.0 }), (MARGIN + 360.0, MARGIN + TITLE_SPACE + 180.0));
    }

    #[test]
    fn one_circle_per_city() {
        let cities = major_cities();
        let mut out = Vec::new();
        city_point_map_to(&mut out, &cities).unwrap();
        let svg = String::from_utf8(out).unwrap();
        assert_eq!(svg.matches("<circle").count(), cities.len());
        assert!(svg.contains("São Paulo, Brazil: 22.6M"));
    }

    #[test]
    fn no_cities_is_render_error() {
        let mut out = Vec::new();
        assert!(matches!(city_point_map_to(&mut out, &[]), Err(PipelineError::Render(_))));
    }
}
