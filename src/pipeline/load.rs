//! Reading the raw CSV into a `Table`.

use std::path::Path;

use anyhow::Context;
use polars::{frame::DataFrame, prelude::DataType};

use crate::error::{PipelineError, Result};
use crate::io::csv::{read_csv, read_csv_string};
use crate::table::{
    AREA_COLUMNS, CODE_COLUMNS, CONTINENT_COLUMNS, COUNTRY_COLUMNS, CountryRecord, DENSITY_COLUMNS,
    SNAPSHOT_YEARS, Table, normalize_column_name, population_column, resolve_column,
};

/// Read and validate the table at `path`.
pub(crate) fn load_path(path: &Path) -> Result<Table> {
    let df = read_csv(path).map_err(PipelineError::load)?;
    table_from_frame(df)
}

/// Read and validate a table from CSV text.
pub(crate) fn load_str(csv: &str) -> Result<Table> {
    let df = read_csv_string(csv).map_err(PipelineError::load)?;
    table_from_frame(df)
}

/// Rename every column to its normalized form.
fn normalize_columns(df: &mut DataFrame) -> anyhow::Result<Vec<String>> {
    let names = df.get_column_names().iter()
        .map(|name| normalize_column_name(name.as_str()))
        .collect::<Vec<_>>();
    df.set_column_names(names.iter().map(String::as_str))
        .context("[pipeline::load] Failed to rename columns (normalized names collide?)")?;
    Ok(names)
}

fn string_column(df: &DataFrame, name: &str) -> anyhow::Result<Vec<Option<String>>> {
    let column = df.column(name)?.cast(&DataType::String)
        .with_context(|| format!("[pipeline::load] Column {name} is not text"))?;
    Ok(column.str()?.into_iter().map(|v| v.map(|s| s.trim().to_string())).collect())
}

fn float_column(df: &DataFrame, name: &str) -> anyhow::Result<Vec<Option<f64>>> {
    let column = df.column(name)?.cast(&DataType::Float64)
        .with_context(|| format!("[pipeline::load] Column {name} is not numeric"))?;
    Ok(column.f64()?.into_iter().collect())
}

fn required<'a>(columns: &[String], aliases: &[&'a str]) -> Result<&'a str> {
    resolve_column(columns, aliases)
        .ok_or_else(|| PipelineError::Load(format!("missing required column (one of {aliases:?})")))
}

fn cell<T>(value: Option<T>, row: usize, column: &str) -> Result<T> {
    value.ok_or_else(|| PipelineError::Load(format!("row {row}: missing value in column {column}")))
}

fn is_country_code(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic())
}

fn population_value(value: f64, row: usize, column: &str) -> Result<u64> {
    // `u64::MAX as f64` rounds up to 2^64, which no longer fits.
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value >= u64::MAX as f64 {
        return Err(PipelineError::Load(format!("row {row}: invalid population {value} in column {column}")));
    }
    Ok(value as u64)
}

/// Convert a raw frame into a table, normalizing headers and validating every required cell.
pub(crate) fn table_from_frame(mut df: DataFrame) -> Result<Table> {
    let columns = normalize_columns(&mut df).map_err(PipelineError::load)?;

    let country_col = required(&columns, COUNTRY_COLUMNS)?;
    let continent_col = required(&columns, CONTINENT_COLUMNS)?;
    let code_col = required(&columns, CODE_COLUMNS)?;
    let area_col = required(&columns, AREA_COLUMNS)?;
    let density_col = resolve_column(&columns, DENSITY_COLUMNS);

    let pop_cols = SNAPSHOT_YEARS.iter()
        .map(|&year| {
            let name = population_column(year);
            match columns.contains(&name) {
                true => Ok(name),
                false => Err(PipelineError::Load(format!("missing required column {name}"))),
            }
        })
        .collect::<Result<Vec<_>>>()?;

    let extract = || -> anyhow::Result<_> {
        let countries = string_column(&df, country_col)?;
        let continents = string_column(&df, continent_col)?;
        let codes = string_column(&df, code_col)?;
        let areas = float_column(&df, area_col)?;
        let densities = match density_col {
            Some(name) => float_column(&df, name)?,
            None => vec![None; df.height()],
        };
        let pops = pop_cols.iter()
            .map(|name| float_column(&df, name))
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok((countries, continents, codes, areas, densities, pops))
    };
    let (countries, continents, codes, areas, densities, pops) = extract().map_err(PipelineError::load)?;

    let mut table = Table::new();
    for i in 0..df.height() {
        let row = i + 1;
        let iso3_code = cell(codes[i].clone(), row, code_col)?;
        if !is_country_code(&iso3_code) {
            return Err(PipelineError::Load(format!("row {row}: {iso3_code:?} is not a three-letter country code")));
        }
        if table.contains(&iso3_code) {
            return Err(PipelineError::Load(format!("row {row}: duplicate country code {iso3_code}")));
        }

        let mut population = [0u64; SNAPSHOT_YEARS.len()];
        for (slot, (values, name)) in population.iter_mut().zip(pops.iter().zip(&pop_cols)) {
            *slot = population_value(cell(values[i], row, name)?, row, name)?;
        }

        table.push(CountryRecord {
            country: cell(countries[i].clone(), row, country_col)?,
            continent: cell(continents[i].clone(), row, continent_col)?,
            iso3_code,
            area_km2: areas[i],
            density_per_km2: densities[i],
            log_density: None,
            population,
        })?;
    }

    Ok(table)
}
