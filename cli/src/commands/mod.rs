pub mod render;
pub mod report;

use anyhow::{Context, Result};
use worldpop::{Pipeline, RunConfig, Table};

use crate::cli::RunArgs;

/// Config file (if any) with command-line overrides applied.
pub fn resolve_config(args: &RunArgs) -> Result<RunConfig> {
    let mut config = match &args.config {
        Some(path) => RunConfig::from_json_file(path)?,
        None => RunConfig::default(),
    };
    if let Some(country) = &args.country { config.country = country.clone() }
    if let Some(year) = args.year { config.prediction_year = year }
    if args.no_merge { config.merge = None }
    Ok(config)
}

/// Load the input and run the pipeline to a finished table.
pub fn prepare(cli: &crate::cli::Cli, args: &RunArgs, config: &RunConfig) -> Result<Table> {
    let prepare = || -> worldpop::Result<Table> {
        Pipeline::load_path(&args.input, cli.verbose)?
            .run(config.merge.as_ref())?
            .into_table()
    };
    prepare().with_context(|| format!("Failed to prepare population table from {}", args.input.display()))
}
