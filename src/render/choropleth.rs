use std::path::Path;

use polars::{frame::DataFrame, prelude::NamedFrom, series::Series};

use crate::error::{PipelineError, Result};
use crate::io::{csv::write_csv, svg::{PLASMA, VIRIDIS}};
use crate::table::Table;

fn range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// Per-country fill colors for the population and density choropleths, keyed on ISO3.
///
/// Columns: `iso3`, `country`, `population_2022`, `density`, `log_density`,
/// `population_fill` (Plasma, linear in population) and `density_fill` (Viridis, linear in
/// log density). Records without a derived log density get a neutral fill.
pub fn choropleth_frame(table: &Table) -> Result<DataFrame> {
    let (pop_min, pop_max) = range(table.iter().map(|r| r.latest_population() as f64));
    let (log_min, log_max) = range(table.iter().filter_map(|r| r.log_density));

    let codes = table.iter().map(|r| r.iso3_code.clone()).collect::<Vec<_>>();
    let names = table.iter().map(|r| r.country.clone()).collect::<Vec<_>>();
    let pops = table.iter().map(|r| r.latest_population()).collect::<Vec<_>>();
    let densities = table.iter().map(|r| r.density_per_km2).collect::<Vec<_>>();
    let logs = table.iter().map(|r| r.log_density).collect::<Vec<_>>();
    let pop_fills = pops.iter()
        .map(|&p| PLASMA.scaled(p as f64, pop_min, pop_max).to_hex())
        .collect::<Vec<_>>();
    let density_fills = logs.iter()
        .map(|l| VIRIDIS.scaled(l.unwrap_or(f64::NAN), log_min, log_max).to_hex())
        .collect::<Vec<_>>();

    DataFrame::new(vec![
        Series::new("iso3".into(), codes).into(),
        Series::new("country".into(), names).into(),
        Series::new("population_2022".into(), pops).into(),
        Series::new("density".into(), densities).into(),
        Series::new("log_density".into(), logs).into(),
        Series::new("population_fill".into(), pop_fills).into(),
        Series::new("density_fill".into(), density_fills).into(),
    ])
    .map_err(|e| PipelineError::Render(format!("failed to build choropleth frame: {e}")))
}

/// Write the choropleth color table as CSV.
pub fn write_choropleth_csv(path: &Path, table: &Table) -> Result<()> {
    let mut df = choropleth_frame(table)?;
    write_csv(&mut df, path).map_err(PipelineError::render)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::csv::write_csv_to;
    use crate::table::test_record as record;

    fn table() -> Table {
        let mut a = record("AAA", "Alpha", "Asia", 1000);
        a.density_per_km2 = Some(9.0);
        a.log_density = Some(1.0);
        let mut b = record("BBB", "Beta", "Asia", 10);
        b.density_per_km2 = Some(99.0);
        b.log_density = Some(2.0);
        let c = record("CCC", "Gamma", "Asia", 500);
        Table::from_records(vec![a, b, c]).unwrap()
    }

    #[test]
    fn one_row_per_record() {
        let df = choropleth_frame(&table()).unwrap();
        assert_eq!(df.height(), 3);
        assert_eq!(df.width(), 7);
    }

    fn fill(df: &DataFrame, column: &str, row: usize) -> String {
        df.column(column).unwrap().str().unwrap().get(row).unwrap().to_string()
    }

    #[test]
    fn fills_span_the_ramps() {
        let df = choropleth_frame(&table()).unwrap();
        // Most populous gets the top of Plasma, densest gets the top of Viridis.
        assert_eq!(fill(&df, "population_fill", 0), "#f0f921");
        assert_eq!(fill(&df, "population_fill", 1), "#0d0887");
        assert_eq!(fill(&df, "density_fill", 0), "#440154");
        assert_eq!(fill(&df, "density_fill", 1), "#fde725");
        // No log density: neutral gray.
        assert_eq!(fill(&df, "density_fill", 2), "#969696");
    }

    #[test]
    fn csv_header() {
        let mut df = choropleth_frame(&table()).unwrap();
        let mut out = Vec::new();
        write_csv_to(&mut df, &mut out).unwrap();
        let csv = String::from_utf8(out).unwrap();
        assert_eq!(csv.lines().next(), Some("iso3,country,population_2022,density,log_density,population_fill,density_fill"));
        assert_eq!(csv.lines().count(), 4);
    }
}
