//! Read-only aggregate queries over a finished table.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{PipelineError, Result};
use super::{CountryRecord, SNAPSHOT_YEARS, Table, year_index};

/// Summed population of one continent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContinentTotal {
    pub continent: String,
    pub population: u64,
}

/// Population of one country at each snapshot year, year-ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSeries {
    pub country: String,
    pub points: Vec<(u16, u64)>,
}

impl TimeSeries {
    pub fn years(&self) -> impl Iterator<Item = u16> + '_ { self.points.iter().map(|&(y, _)| y) }

    pub fn values(&self) -> impl Iterator<Item = u64> + '_ { self.points.iter().map(|&(_, p)| p) }

    /// Last (most recent) point of the series.
    pub fn last(&self) -> Option<(u16, u64)> { self.points.last().copied() }
}

fn overflow(year: u16, scope: &str) -> PipelineError {
    PipelineError::Data(format!("{year} population of {scope} overflows"))
}

fn checked_year(year: u16) -> Result<usize> {
    year_index(year)
        .ok_or_else(|| PipelineError::Data(format!("{year} is not a snapshot year (expected one of {SNAPSHOT_YEARS:?})")))
}

impl Table {
    /// Sum of every record's population in `year`.
    pub fn world_total(&self, year: u16) -> Result<u64> {
        let i = checked_year(year)?;
        self.iter()
            .try_fold(0u64, |total, r| total.checked_add(r.population[i]))
            .ok_or_else(|| overflow(year, "the world"))
    }

    /// The `n` most populated records in `year`, descending; ties keep table order.
    pub fn top_n(&self, year: u16, n: usize) -> Result<Vec<&CountryRecord>> {
        let i = checked_year(year)?;
        let mut ranked = self.iter().collect::<Vec<_>>();
        ranked.sort_by(|a, b| b.population[i].cmp(&a.population[i]));
        ranked.truncate(n);
        Ok(ranked)
    }

    /// Population per continent in `year`, largest first; ties ordered by name.
    pub fn by_continent(&self, year: u16) -> Result<Vec<ContinentTotal>> {
        let i = checked_year(year)?;
        let mut sums: BTreeMap<&str, u64> = BTreeMap::new();
        for record in self.iter() {
            let sum = sums.entry(record.continent.as_str()).or_default();
            *sum = sum.checked_add(record.population[i])
                .ok_or_else(|| overflow(year, &record.continent))?;
        }

        let mut totals = sums.into_iter()
            .map(|(continent, population)| ContinentTotal { continent: continent.to_string(), population })
            .collect::<Vec<_>>();
        totals.sort_by(|a, b| b.population.cmp(&a.population));
        Ok(totals)
    }

    /// Snapshot series for the first record named `country`.
    pub fn time_series(&self, country: &str) -> Result<TimeSeries> {
        let record = self.iter()
            .find(|r| r.country == country)
            .ok_or_else(|| PipelineError::Data(format!("country {country:?} not found")))?;

        Ok(TimeSeries {
            country: record.country.clone(),
            points: SNAPSHOT_YEARS.iter().copied().zip(record.population).collect(),
        })
    }
}
