//! Pipeline configuration file support.
//!
//! Configuration is read from a TOML file; every field has a default so a
//! missing file or a partial file is fine.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use chrono_tz::Tz;

use crate::error::{Error, Result};

/// Pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Bucket holding the rolling daily snapshots and images
    #[serde(default = "default_url_prefix")]
    pub url_prefix: String,
    /// Bucket holding the long-term image archive
    #[serde(default = "default_archive_url_prefix")]
    pub archive_url_prefix: String,
    /// IANA name of the feeder's time zone; day boundaries are evaluated
    /// here, not in the deployment host's local zone
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    /// How many calendar days of snapshots to load
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    /// Chart hour-axis lower bound
    #[serde(default = "default_min_hr")]
    pub min_hr: u32,
    /// Chart hour-axis upper bound
    #[serde(default = "default_max_hr")]
    pub max_hr: u32,
    /// Images per gallery row
    #[serde(default = "default_num_image_cols")]
    pub num_image_cols: usize,
}

fn default_url_prefix() -> String {
    "https://storage.googleapis.com/tweeterssp-web-site-contents/".to_string()
}

fn default_archive_url_prefix() -> String {
    "https://storage.googleapis.com/archive_jpg_from_birdclassifier/".to_string()
}

fn default_time_zone() -> String {
    "America/Chicago".to_string()
}

fn default_window_days() -> u32 {
    3
}

fn default_min_hr() -> u32 {
    6
}

fn default_max_hr() -> u32 {
    18
}

fn default_num_image_cols() -> usize {
    5
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            url_prefix: default_url_prefix(),
            archive_url_prefix: default_archive_url_prefix(),
            time_zone: default_time_zone(),
            window_days: default_window_days(),
            min_hr: default_min_hr(),
            max_hr: default_max_hr(),
            num_image_cols: default_num_image_cols(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| Error::Configuration(format!("failed to read config file: {}", e)))?;
        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| Error::Configuration(format!("failed to parse config file: {}", e)))?;
        Ok(config)
    }

    /// Load `tweeters.toml` from the current or parent directory, falling
    /// back to defaults when no file exists.
    pub fn load_default() -> Self {
        for candidate in ["tweeters.toml", "../tweeters.toml"] {
            if Path::new(candidate).exists() {
                if let Ok(config) = Self::from_file(candidate) {
                    return config;
                }
            }
        }
        Self::default()
    }

    /// Resolve the configured time-zone name.
    pub fn tz(&self) -> Result<Tz> {
        self.time_zone
            .parse()
            .map_err(|_| Error::Configuration(format!("unknown time zone '{}'", self.time_zone)))
    }
}
