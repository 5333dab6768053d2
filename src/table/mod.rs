//! Country table: one record per country/territory, unique by ISO3 code.

mod aggregate;
mod record;
mod schema;
mod table;

pub use aggregate::{ContinentTotal, TimeSeries};
pub use record::{CountryRecord, REPORT_YEAR, SNAPSHOT_YEARS, year_index};
pub use table::Table;

pub(crate) use schema::*;

#[cfg(test)]
pub(crate) use table::tests::record as test_record;
