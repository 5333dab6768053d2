use anyhow::Result;
use worldpop::{LinearRegression, Predictor, ensure_dir_exists, major_cities, render};

use super::{prepare, resolve_config};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::RenderArgs) -> Result<()> {
    let config = resolve_config(&args.run)?;
    let out_dir = &args.output.clone().unwrap_or(".".into());
    ensure_dir_exists(out_dir)?;

    let table = prepare(cli, &args.run, &config)?;

    let continents = table.by_continent(config.report_year)?;
    let path = out_dir.join("continents.svg");
    if cli.verbose > 0 { eprintln!("[render] writing {}", path.display()) }
    render::write_continent_bar_chart(&path, &continents, config.report_year)?;

    let series = table.time_series(&config.country)?;
    let mut model = LinearRegression::new();
    model.fit(&series)?;
    let year = config.prediction_year as f64;
    let path = out_dir.join("growth.svg");
    if cli.verbose > 0 { eprintln!("[render] writing {}", path.display()) }
    render::write_growth_line_chart(&path, &series, Some((year, model.predict(year)?)))?;

    let path = out_dir.join("cities.svg");
    if cli.verbose > 0 { eprintln!("[render] writing {}", path.display()) }
    render::write_city_point_map(&path, &major_cities())?;

    let path = out_dir.join("choropleth.csv");
    if cli.verbose > 0 { eprintln!("[render] writing {}", path.display()) }
    render::write_choropleth_csv(&path, &table)?;

    println!("Rendered 4 files into {}", out_dir.display());
    Ok(())
}
