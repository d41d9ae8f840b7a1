use std::path::PathBuf;

use _model::{Category, SortBy};
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{config::Config, yelp::Yelp};

mod config;
mod dataset;
mod extract;
mod neighborhood;
#[cfg(test)]
mod testing;
mod utils;
mod yelp;

/// Collects nearby businesses for every neighborhood centroid into one CSV.
#[derive(Debug, Parser)]
struct Cli {
    /// CSV with a neighborhood name, latitude and longitude per row
    #[arg(long, default_value = "socioeconomic.csv")]
    input: PathBuf,
    /// Overwritten on every successful run
    #[arg(long, default_value = "yelp.csv")]
    output: PathBuf,
    /// Also write a markdown summary of the run here
    #[arg(long)]
    report: Option<PathBuf>,
    #[arg(long, env = "YELP_API_KEY", hide_env_values = true)]
    api_key: String,
    #[arg(long, value_delimiter = ',', default_values_t = Category::defaults())]
    categories: Vec<Category>,
    /// Results per category and neighborhood
    #[arg(long, default_value_t = 12, value_parser = clap::value_parser!(u32).range(1..=50))]
    limit: u32,
    #[arg(long, value_enum, default_value_t = SortBy::Distance)]
    sort_by: SortBy,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config {
        report: cli.report,
        categories: cli.categories,
        limit: cli.limit,
        sort_by: cli.sort_by,
        ..Config::new(cli.input, cli.output)
    };

    let search = Yelp::new(cli.api_key);
    dataset::build(&search, &config)?;

    Ok(())
}
