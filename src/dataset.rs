use std::{fmt::Write as _, io::Write as _, path::Path};

use _model::{Business, Neighborhood};
use anyhow::{Context, Result};
use itertools::Itertools;
use serde::Deserialize;
use tempfile::NamedTempFile;
use tracing::{info, info_span, warn};

use crate::{
    config::Config,
    extract::{Listings, Skipped},
    neighborhood,
    utils::progress_bar,
    yelp::Search,
};

const HEADER: [&str; 8] = [
    "name",
    "phone",
    "latitude",
    "longitude",
    "info",
    "type",
    "address",
    "url",
];

#[derive(Debug)]
pub struct Dataset {
    pub neighborhoods: usize,
    pub queries: usize,
    /// Rows before the cross-neighborhood phone dedup.
    pub fetched: usize,
    pub businesses: Vec<Business>,
    pub skipped: Vec<Skipped>,
}

/// Reads the neighborhoods, searches around each of them and overwrites the
/// output with the deduplicated rows. The output is left alone unless every
/// step, report included, succeeds.
pub fn build(search: &dyn Search, config: &Config) -> Result<Dataset> {
    let neighborhoods = read_neighborhoods(&config.input)?;
    info!(
        "Searching {} categories around {} neighborhoods...",
        config.categories.len(),
        neighborhoods.len()
    );

    let dataset = assemble(search, &neighborhoods, config)?;

    let output = stage(&config.output, &render_businesses(&dataset.businesses)?)?;
    let staged_report = match &config.report {
        Some(path) => Some((path, stage(path, report(&dataset)?.as_bytes())?)),
        None => None,
    };

    // output last, so any earlier failure keeps the previous table
    if let Some((path, file)) = staged_report {
        file.persist(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    output
        .persist(&config.output)
        .with_context(|| format!("Failed to write {}", config.output.display()))?;

    info!(
        "Wrote {} businesses to {} ({} duplicates dropped, {} entries skipped)",
        dataset.businesses.len(),
        config.output.display(),
        dataset.fetched - dataset.businesses.len(),
        dataset.skipped.len()
    );
    if !dataset.skipped.is_empty() {
        warn!(
            "{} search results were skipped for missing or empty fields",
            dataset.skipped.len()
        );
    }

    Ok(dataset)
}

pub fn assemble(
    search: &dyn Search,
    neighborhoods: &[Neighborhood],
    config: &Config,
) -> Result<Dataset> {
    let pb = progress_bar(neighborhoods.len() as u64);
    let mut tables = Vec::with_capacity(neighborhoods.len());
    for x in neighborhoods {
        let _span = info_span!("neighborhood", name = %x.name).entered();
        let table = neighborhood::collect(search, x, config)
            .with_context(|| format!("Failed to collect {}", x.name))?;
        tables.push(table);
        pb.inc(1);
    }
    pb.finish_and_clear();

    let mut merged = Listings::default();
    for table in tables {
        merged.append(table);
    }
    let fetched = merged.businesses.len();

    Ok(Dataset {
        neighborhoods: neighborhoods.len(),
        queries: neighborhoods.len() * config.categories.len(),
        fetched,
        businesses: dedup(merged.businesses),
        skipped: merged.skipped,
    })
}

/// Drops every row whose phone was already seen, keeping the first.
pub fn dedup(businesses: Vec<Business>) -> Vec<Business> {
    businesses
        .into_iter()
        .unique_by(|x| x.phone.clone())
        .collect()
}

#[derive(Deserialize)]
struct RawNeighborhood {
    #[serde(rename = "COMMUNITY AREA NAME", alias = "name", alias = "neighborhood")]
    name: String,
    latitude: f64,
    longitude: f64,
}

pub fn read_neighborhoods(path: &Path) -> Result<Vec<Neighborhood>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut output = Vec::new();
    for x in reader.deserialize::<RawNeighborhood>() {
        let x = x.with_context(|| format!("Failed to read {}", path.display()))?;
        output.push(Neighborhood::new(x.name, x.latitude, x.longitude)?);
    }

    Ok(output)
}

pub fn render_businesses(businesses: &[Business]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for x in businesses {
        writer.serialize(x)?;
    }
    Ok(writer.into_inner().map_err(|e| e.into_error())?)
}

/// Writes `contents` to a temporary file beside `path`, ready to be renamed
/// over it.
fn stage(path: &Path, contents: &[u8]) -> Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(x) if !x.as_os_str().is_empty() => x,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create a temporary file for {}", path.display()))?;
    file.write_all(contents)?;
    file.as_file().sync_all()?;
    Ok(file)
}

fn report(dataset: &Dataset) -> Result<String> {
    let mut md = String::new();
    writeln!(md, "## Statistics\n")?;
    writeln!(md, "- {} neighborhoods", dataset.neighborhoods)?;
    writeln!(md, "- {} queries", dataset.queries)?;
    writeln!(md, "- {} rows fetched", dataset.fetched)?;
    writeln!(
        md,
        "- {} duplicate phones dropped",
        dataset.fetched - dataset.businesses.len()
    )?;
    writeln!(md, "- {} rows written", dataset.businesses.len())?;
    writeln!(md, "- {} entries skipped", dataset.skipped.len())?;

    if !dataset.skipped.is_empty() {
        writeln!(md, "\n## Skipped\n")?;
        for x in &dataset.skipped {
            writeln!(
                md,
                "- {} {}: {}",
                x.category,
                x.name.as_deref().unwrap_or("(unnamed)"),
                x.reason
            )?;
        }
    }

    Ok(md)
}
