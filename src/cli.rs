use std::{
    fs::File,
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use hoikumap_core::{
    cache::LocationCache,
    usecases::{resolve_locations, GeocodeTask},
};
use hoikumap_entities::location::Location;

use crate::{adapters, config::Config, gateways};

#[derive(Debug, Parser)]
#[command(name = "hoikumap", version, about)]
struct Args {
    /// Path to the configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve coordinates for every facility in the waiting-children table
    Facilities,
    /// Resolve coordinates for the configured ward names
    Districts {
        /// Write the rows to FILE instead of standard output
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = Config::try_load_from_file_or_default(args.config.as_deref())?;
    log::info!("Resolving locations for the {} datasets", config.last_updated);
    match args.command {
        Command::Facilities => resolve_facilities(&config),
        Command::Districts { out } => resolve_districts(&config, out.as_deref()),
    }
}

fn resolve_facilities(config: &Config) -> Result<()> {
    let datasets = &config.datasets;
    for (label, path) in [
        ("waiting", &datasets.waiting),
        ("acceptable", &datasets.acceptable),
        ("enrolled", &datasets.enrolled),
    ] {
        if !path.exists() {
            bail!("Missing {label} table '{}'", path.display());
        }
    }

    let waiting = File::open(&datasets.waiting).with_context(|| {
        format!(
            "Cannot open waiting-children table '{}'",
            datasets.waiting.display()
        )
    })?;
    let facilities = adapters::csv::read_waiting_facilities(waiting)?;
    log::info!(
        "Loaded {} facilities from '{}'",
        facilities.len(),
        datasets.waiting.display()
    );

    let cache = load_cache(&datasets.last_month_location)?;
    let out = File::create(&datasets.location).with_context(|| {
        format!(
            "Cannot create location file '{}'",
            datasets.location.display()
        )
    })?;
    let tasks = facilities.into_iter().map(GeocodeTask::from);
    write_resolved(config, tasks, &cache, out)
}

fn resolve_districts(config: &Config, out: Option<&Path>) -> Result<()> {
    let tasks: Vec<_> = config
        .wards
        .iter()
        .map(|ward| GeocodeTask::from_place_name(ward.clone()))
        .collect();
    let writer: Box<dyn Write> = match out {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("Cannot create location file '{}'", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };
    // There is no monthly output to consult for the ward centers.
    write_resolved(config, tasks, &LocationCache::default(), writer)
}

fn load_cache(path: &Path) -> Result<LocationCache> {
    match File::open(path) {
        Ok(file) => {
            let cache = adapters::csv::read_location_cache(file)?;
            log::info!(
                "Loaded {} cached locations from '{}'",
                cache.len(),
                path.display()
            );
            Ok(cache)
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::info!(
                "No previous location file at '{}': every name will be geocoded",
                path.display()
            );
            Ok(LocationCache::default())
        }
        Err(err) => Err(err)
            .with_context(|| format!("Cannot open location cache '{}'", path.display())),
    }
}

fn write_resolved(
    config: &Config,
    tasks: impl IntoIterator<Item = GeocodeTask>,
    cache: &LocationCache,
    out: impl Write,
) -> Result<()> {
    let resolver = gateways::geocode_resolver(&config.geocoding);
    let mut writer = adapters::csv::LocationWriter::new(out)?;
    let mut index = 0usize;
    let stats = resolve_locations(tasks, cache, &resolver, |location: &Location| -> Result<()> {
        writer.write(location)?;
        let pos = location
            .pos
            .map(|pos| pos.to_string())
            .unwrap_or_else(|| "0,0".to_string());
        log::info!("{index:04} {},{pos}", location.name);
        index += 1;
        Ok(())
    })?;
    log::info!(
        "{} locations written ({} cached, {} fetched, {} unresolved)",
        stats.cached + stats.fetched + stats.unresolved,
        stats.cached,
        stats.fetched,
        stats.unresolved
    );
    Ok(())
}
