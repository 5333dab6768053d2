//! Summary of one run: aggregates plus the trend forecast.

use std::fmt;

use serde::Serialize;

use crate::config::RunConfig;
use crate::error::{PipelineError, Result};
use crate::predict::Predictor;
use crate::table::{ContinentTotal, Table, TimeSeries};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCountry {
    pub rank: usize,
    pub country: String,
    pub iso3_code: String,
    pub population: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub year: u16,
    /// Predicted population, truncated toward zero.
    pub population: i64,
    pub r_squared: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub records: usize,
    pub report_year: u16,
    pub world_population: u64,
    pub top: Vec<RankedCountry>,
    pub by_continent: Vec<ContinentTotal>,
    pub series: TimeSeries,
    pub forecast: Forecast,
}

impl Report {
    /// Compute every aggregate named by `config` and fit `predictor` to the country's series.
    pub fn build(table: &Table, config: &RunConfig, predictor: &mut dyn Predictor) -> Result<Self> {
        let year = config.report_year;

        let top = table.top_n(year, config.top_n)?
            .into_iter()
            .enumerate()
            .map(|(i, r)| RankedCountry {
                rank: i + 1,
                country: r.country.clone(),
                iso3_code: r.iso3_code.clone(),
                population: r.population(year).unwrap_or_default(),
            })
            .collect();

        let series = table.time_series(&config.country)?;
        predictor.fit(&series)?;
        let forecast = Forecast {
            year: config.prediction_year,
            population: predictor.predict(config.prediction_year as f64)?.trunc() as i64,
            r_squared: predictor.score()?,
        };

        Ok(Self {
            records: table.len(),
            report_year: year,
            world_population: table.world_total(year)?,
            top,
            by_continent: table.by_continent(year)?,
            series,
            forecast,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PipelineError::Render(format!("failed to serialize report: {e}")))
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year = self.report_year;
        writeln!(f, "Records: {}", self.records)?;
        writeln!(f, "World population in {year}: {}", self.world_population)?;

        writeln!(f, "\nTop {} most populated countries ({year}):", self.top.len())?;
        for r in &self.top {
            writeln!(f, "  {:>3}. {:<32} {:>14}", r.rank, r.country, r.population)?;
        }

        writeln!(f, "\nPopulation by continent ({year}):")?;
        for c in &self.by_continent {
            writeln!(f, "  {:<20} {:>14}", c.continent, c.population)?;
        }

        writeln!(f, "\nPopulation of {}:", self.series.country)?;
        for (y, p) in &self.series.points {
            writeln!(f, "  {y}  {p:>14}")?;
        }

        write!(f, "\nPredicted population of {} in {}: {} (R² = {:.4})",
            self.series.country, self.forecast.year, self.forecast.population, self.forecast.r_squared)
    }
}
