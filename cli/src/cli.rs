use std::path::PathBuf;

/// World population analysis CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "worldpop", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Print aggregates and the population forecast
    Report(ReportArgs),

    /// Write charts, the city map and the choropleth color table
    Render(RenderArgs),
}

/// Options shared by every command that runs the pipeline.
#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Input population CSV
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// JSON run configuration; flags below override it
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Country to chart and extrapolate, defaults to "Morocco"
    #[arg(long)]
    pub country: Option<String>,

    /// Year to predict, defaults to 2030
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Keep every territory as its own row
    #[arg(long)]
    pub no_merge: bool,
}

#[derive(clap::Args, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Length of the most-populated ranking, defaults to 10
    #[arg(short, long)]
    pub top: Option<usize>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Output directory, defaults to "."
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,
}
