use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Result};
use hoikumap_core::retry::RetryPolicy;

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "hoikumap.toml";

const ENV_NAME_CONFIG_FILE: &str = "HOIKUMAP_CONFIG";

#[derive(Debug)]
pub struct Config {
    /// Label of the open-data snapshot, e.g. "2024/07".
    pub last_updated: String,
    pub wards: Vec<String>,
    pub datasets: Datasets,
    pub geocoding: Geocoding,
}

#[derive(Debug)]
pub struct Datasets {
    /// Waiting children per facility (入所待ち人数).
    pub waiting: PathBuf,
    /// Free capacity per facility (受入可能数).
    pub acceptable: PathBuf,
    /// Enrolled children per facility (入所児童数).
    pub enrolled: PathBuf,
    /// Output file with one coordinate row per facility.
    pub location: PathBuf,
    /// The previous month's output, consulted as a read-only cache.
    pub last_month_location: PathBuf,
}

#[derive(Debug)]
pub struct Geocoding {
    pub api_url: String,
    pub retry: RetryPolicy,
}

impl Config {
    pub fn try_load_from_file_or_default(file_path: Option<&Path>) -> Result<Self> {
        let file_path: PathBuf = file_path
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(ENV_NAME_CONFIG_FILE).map(PathBuf::from))
            .unwrap_or_else(|| {
                log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
                PathBuf::from(DEFAULT_CONFIG_FILE_NAME)
            });

        let raw_config = match fs::read_to_string(&file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "'{}' not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        Self::try_from(raw_config)
    }
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            last_updated,
            wards,
            datasets,
            geocoding,
        } = from;

        let last_updated = last_updated.unwrap_or_else(raw::Config::default_last_updated);

        let wards = wards.unwrap_or_else(raw::Config::default_wards);
        if wards.is_empty() {
            return Err(anyhow!("No wards defined"));
        }

        let raw::Datasets {
            waiting,
            acceptable,
            enrolled,
            location,
            last_month_location,
        } = datasets.unwrap_or_default();
        let datasets = Datasets {
            waiting,
            acceptable,
            enrolled,
            location,
            last_month_location,
        };

        let raw::Geocoding {
            api_url,
            max_attempts,
            delay,
        } = geocoding.unwrap_or_default();
        if max_attempts == 0 {
            return Err(anyhow!("geocoding max-attempts must be at least 1"));
        }
        if delay.is_zero() {
            log::warn!("Geocoding without a delay violates the provider's usage policy");
        }
        let geocoding = Geocoding {
            api_url,
            retry: RetryPolicy {
                max_attempts,
                delay,
            },
        };

        Ok(Self {
            last_updated,
            wards,
            datasets,
            geocoding,
        })
    }
}
