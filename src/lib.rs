#![doc = "World population table: cleaning, aggregation, rendering and trend prediction"]
mod cities;
mod common;
mod config;
mod error;
mod io;
mod pipeline;
mod predict;
pub mod render;
mod report;
mod table;

#[doc(inline)]
pub use error::{PipelineError, Result};

#[doc(inline)]
pub use table::{ContinentTotal, CountryRecord, REPORT_YEAR, SNAPSHOT_YEARS, Table, TimeSeries, year_index};

#[doc(inline)]
pub use pipeline::{Pipeline, Stage, TerritoryMergeRule, prepare_table};

#[doc(inline)]
pub use predict::{LinearRegression, Predictor};

#[doc(inline)]
pub use cities::{City, major_cities};

#[doc(inline)]
pub use config::RunConfig;

#[doc(inline)]
pub use report::{Forecast, RankedCountry, Report};

pub use common::fs::ensure_dir_exists;

