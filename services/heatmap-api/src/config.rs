//! Service configuration.
//!
//! Loaded from an optional YAML file. Every field has a serde default so a
//! partial file (or no file at all) yields a working configuration.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub tiles: TilesConfig,
    #[serde(default)]
    pub points: PointsConfig,
    #[serde(default)]
    pub geocoding: GeocodingConfig,
}

/// Where rendered tiles are stored.
#[derive(Debug, Clone, Deserialize)]
pub struct TilesConfig {
    #[serde(default = "default_tiles_root")]
    pub root: PathBuf,
    /// File name of the transparent placeholder under `root`.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

impl Default for TilesConfig {
    fn default() -> Self {
        Self {
            root: default_tiles_root(),
            placeholder: default_placeholder(),
        }
    }
}

fn default_tiles_root() -> PathBuf {
    PathBuf::from("files")
}

fn default_placeholder() -> String {
    "empty.png".to_string()
}

/// Which collaborator supplies the point set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    File,
    Geocoding,
}

/// Point loading and refresh.
#[derive(Debug, Clone, Deserialize)]
pub struct PointsConfig {
    #[serde(default)]
    pub source: SourceKind,
    /// JSON file read by the file source.
    #[serde(default = "default_points_path")]
    pub path: PathBuf,
    /// Reload interval; 0 loads once at startup.
    #[serde(default)]
    pub refresh_interval_secs: u64,
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::default(),
            path: default_points_path(),
            refresh_interval_secs: 0,
        }
    }
}

fn default_points_path() -> PathBuf {
    PathBuf::from("points.json")
}

/// Geocoding collaborator settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Newline-separated list of addresses to resolve.
    #[serde(default = "default_addresses_path")]
    pub addresses_path: PathBuf,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_chunk_delay_ms")]
    pub chunk_delay_ms: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_initial_retry_delay_ms")]
    pub initial_retry_delay_ms: u64,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key_env: default_api_key_env(),
            addresses_path: default_addresses_path(),
            chunk_size: default_chunk_size(),
            chunk_delay_ms: default_chunk_delay_ms(),
            max_retries: default_max_retries(),
            initial_retry_delay_ms: default_initial_retry_delay_ms(),
        }
    }
}

fn default_endpoint() -> String {
    "https://maps.googleapis.com/maps/api/geocode/json".to_string()
}

fn default_api_key_env() -> String {
    "GEOCODING_API_KEY".to_string()
}

fn default_addresses_path() -> PathBuf {
    PathBuf::from("addresses.txt")
}

fn default_chunk_size() -> usize {
    30
}

fn default_chunk_delay_ms() -> u64 {
    1000
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_retry_delay_ms() -> u64 {
    500
}

impl ServiceConfig {
    /// Load configuration from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                let config = Self::from_yaml(&content)
                    .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
                info!(path = %path.display(), "Loaded service config");
                config
            }
            None => {
                debug!("No config file given, using defaults");
                Self::default()
            }
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    fn validate(&self) -> Result<()> {
        let name = self.tiles.placeholder.as_str();
        // Rejects "", ".", ".." and anything with a separator.
        if Path::new(name).file_name().and_then(|n| n.to_str()) != Some(name) {
            bail!(
                "tiles.placeholder must be a plain file name, got {:?}",
                self.tiles.placeholder
            );
        }
        if self.points.source == SourceKind::Geocoding {
            if self.geocoding.chunk_size == 0 {
                bail!("geocoding.chunk_size must be at least 1");
            }
            if self.geocoding.endpoint.is_empty() {
                bail!("geocoding.endpoint must be set when points.source is geocoding");
            }
        }
        Ok(())
    }
}
