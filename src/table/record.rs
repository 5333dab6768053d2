use serde::Serialize;

/// Years for which the source records a population, ascending.
pub const SNAPSHOT_YEARS: [u16; 8] = [1970, 1980, 1990, 2000, 2010, 2015, 2020, 2022];

/// Most recent snapshot; density backfill divides this year's population by area.
pub const REPORT_YEAR: u16 = 2022;

/// Position of `year` in `SNAPSHOT_YEARS`, if it is a snapshot year.
#[inline]
pub fn year_index(year: u16) -> Option<usize> {
    SNAPSHOT_YEARS.iter().position(|&y| y == year)
}

/// One row of the population table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryRecord {
    pub country: String,
    pub continent: String,
    pub iso3_code: String,
    pub area_km2: Option<f64>,
    pub density_per_km2: Option<f64>,
    pub log_density: Option<f64>,
    /// Population per snapshot year, aligned with `SNAPSHOT_YEARS`.
    pub population: [u64; SNAPSHOT_YEARS.len()],
}

impl CountryRecord {
    /// Population in `year`, or `None` if `year` is not a snapshot year.
    #[inline]
    pub fn population(&self, year: u16) -> Option<u64> {
        year_index(year).map(|i| self.population[i])
    }

    /// Population in the most recent snapshot year.
    #[inline]
    pub fn latest_population(&self) -> u64 {
        self.population[SNAPSHOT_YEARS.len() - 1]
    }
}
