use anyhow::Result;
use worldpop::{LinearRegression, Report};

use super::{prepare, resolve_config};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::ReportArgs) -> Result<()> {
    let mut config = resolve_config(&args.run)?;
    if let Some(top) = args.top { config.top_n = top }

    let table = prepare(cli, &args.run, &config)?;
    let report = Report::build(&table, &config, &mut LinearRegression::new())?;

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        println!("{report}");
    }

    Ok(())
}
