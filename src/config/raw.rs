use std::{path::PathBuf, time::Duration};

use duration_str::deserialize_duration;
use serde::Deserialize;

const DEFAULT_CONFIG_FILE: &str = include_str!("hoikumap.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub last_updated: Option<String>,
    pub wards: Option<Vec<String>>,
    pub datasets: Option<Datasets>,
    pub geocoding: Option<Geocoding>,
}

impl Default for Config {
    fn default() -> Self {
        let cfg: Self = toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration");
        cfg
    }
}

impl Config {
    pub fn default_last_updated() -> String {
        Self::default().last_updated.expect("last-updated")
    }

    pub fn default_wards() -> Vec<String> {
        Self::default().wards.expect("wards")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Datasets {
    pub waiting: PathBuf,
    pub acceptable: PathBuf,
    pub enrolled: PathBuf,
    pub location: PathBuf,
    pub last_month_location: PathBuf,
}

impl Default for Datasets {
    fn default() -> Self {
        Config::default().datasets.expect("Datasets configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Geocoding {
    pub api_url: String,
    pub max_attempts: u32,
    #[serde(deserialize_with = "deserialize_duration")]
    pub delay: Duration,
}

impl Default for Geocoding {
    fn default() -> Self {
        Config::default().geocoding.expect("Geocoding configuration")
    }
}
