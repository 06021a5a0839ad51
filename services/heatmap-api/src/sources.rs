//! Point sources.
//!
//! A source produces the raw point set the service renders from. Sources
//! are the only place that talks to the outside world for data, and the
//! only place that retries.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::future::join_all;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use heatmap_common::LatLonDeg;

use crate::config::{GeocodingConfig, ServiceConfig, SourceKind};

/// Something that can produce a point set on demand.
#[async_trait]
pub trait PointSource: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Load the full point set.
    async fn load(&self) -> Result<Vec<LatLonDeg>>;
}

/// Build the source selected by `config.points.source`.
pub fn build_source(config: &ServiceConfig) -> Result<Arc<dyn PointSource>> {
    let source: Arc<dyn PointSource> = match config.points.source {
        SourceKind::File => Arc::new(FilePointSource::new(&config.points.path)),
        SourceKind::Geocoding => Arc::new(GeocodingPointSource::new(config.geocoding.clone())?),
    };
    info!(source = source.name(), "Configured point source");
    Ok(source)
}

// ============================================================================
// File source
// ============================================================================

/// Reads points from a JSON file.
///
/// Accepts either `[[lat, lon], ...]` or `[{"lat": .., "lon": ..}, ...]`.
#[derive(Debug, Clone)]
pub struct FilePointSource {
    path: PathBuf,
}

impl FilePointSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PointRecord {
    Pair([f64; 2]),
    Object { lat: f64, lon: f64 },
}

impl From<PointRecord> for LatLonDeg {
    fn from(record: PointRecord) -> Self {
        match record {
            PointRecord::Pair([lat, lon]) => LatLonDeg::new(lat, lon),
            PointRecord::Object { lat, lon } => LatLonDeg::new(lat, lon),
        }
    }
}

/// Parse a JSON point list in either accepted shape.
pub fn parse_points_json(content: &str) -> Result<Vec<LatLonDeg>> {
    let records: Vec<PointRecord> =
        serde_json::from_str(content).context("Expected a JSON array of points")?;
    Ok(records.into_iter().map(LatLonDeg::from).collect())
}

#[async_trait]
impl PointSource for FilePointSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn load(&self) -> Result<Vec<LatLonDeg>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read points file: {}", self.path.display()))?;
        let points = parse_points_json(&content)
            .with_context(|| format!("Failed to parse points file: {}", self.path.display()))?;
        debug!(path = %self.path.display(), points = points.len(), "Loaded points file");
        Ok(points)
    }
}

// ============================================================================
// Geocoding source
// ============================================================================

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Location,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

/// Extract the first result's location from a geocoding response body.
///
/// Returns `None` for malformed bodies and empty result lists.
pub fn parse_geocode_body(body: &str) -> Option<LatLonDeg> {
    let response: GeocodeResponse = serde_json::from_str(body).ok()?;
    let first = response.results.into_iter().next()?;
    Some(LatLonDeg::new(first.geometry.location.lat, first.geometry.location.lng))
}

/// Parse an address list: one address per line, blank lines and `#`
/// comments ignored.
pub fn parse_addresses(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

/// Resolves a list of street addresses through a geocoding HTTP API.
pub struct GeocodingPointSource {
    client: Client,
    config: GeocodingConfig,
    api_key: Option<String>,
}

impl GeocodingPointSource {
    /// Create the source. The API key is read from `config.api_key_env`.
    pub fn new(config: GeocodingConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env).ok();
        if api_key.is_none() {
            warn!(env = %config.api_key_env, "Geocoding API key not set, sending unauthenticated requests");
        }
        Self::with_api_key(config, api_key)
    }

    pub fn with_api_key(config: GeocodingConfig, api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Resolve addresses chunk by chunk, pausing between chunks.
    ///
    /// Output order follows input order; unresolved addresses are skipped.
    pub async fn resolve_all(&self, addresses: &[String]) -> Vec<LatLonDeg> {
        let chunk_size = self.config.chunk_size.max(1);
        let delay = Duration::from_millis(self.config.chunk_delay_ms);
        let mut points = Vec::with_capacity(addresses.len());

        for (i, chunk) in addresses.chunks(chunk_size).enumerate() {
            if i > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let resolved = join_all(chunk.iter().map(|a| self.resolve_with_retry(a))).await;
            let before = points.len();
            points.extend(resolved.into_iter().flatten());
            debug!(
                chunk = i,
                requested = chunk.len(),
                resolved = points.len() - before,
                "Geocoded address chunk"
            );
        }

        points
    }

    /// Resolve one address, retrying transport failures with exponential backoff.
    async fn resolve_with_retry(&self, address: &str) -> Option<LatLonDeg> {
        let mut delay = Duration::from_millis(self.config.initial_retry_delay_ms);
        let mut attempt = 0;

        loop {
            match self.resolve(address).await {
                Ok(point) => return point,
                Err(e) if attempt < self.config.max_retries => {
                    attempt += 1;
                    warn!(
                        address = %address,
                        attempt = attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Geocoding request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) => {
                    warn!(address = %address, error = %e, "Geocoding failed, dropping address");
                    return None;
                }
            }
        }
    }

    /// One geocoding request.
    ///
    /// `Ok(None)` means the service answered but had no usable location;
    /// `Err` means the request itself failed and may be retried.
    async fn resolve(&self, address: &str) -> Result<Option<LatLonDeg>, reqwest::Error> {
        let mut request = self
            .client
            .get(&self.config.endpoint)
            .query(&[("address", address)]);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            debug!(address = %address, status = %status, "Geocoding returned non-200");
            return Ok(None);
        }

        let point = parse_geocode_body(&body);
        if point.is_none() {
            debug!(address = %address, "Geocoding returned no result");
        }
        Ok(point)
    }
}

#[async_trait]
impl PointSource for GeocodingPointSource {
    fn name(&self) -> &str {
        "geocoding"
    }

    #[instrument(skip(self), fields(endpoint = %self.config.endpoint))]
    async fn load(&self) -> Result<Vec<LatLonDeg>> {
        let path = &self.config.addresses_path;
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read address list: {}", path.display()))?;
        let addresses = parse_addresses(&content);

        let points = self.resolve_all(&addresses).await;
        info!(
            addresses = addresses.len(),
            resolved = points.len(),
            "Geocoded address list"
        );
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pairs() {
        let pts = parse_points_json("[[55.75, 37.62], [59.93, 30.31]]").unwrap();
        assert_eq!(pts, vec![LatLonDeg::new(55.75, 37.62), LatLonDeg::new(59.93, 30.31)]);
    }

    #[test]
    fn test_parse_objects() {
        let pts = parse_points_json(r#"[{"lat": 1.0, "lon": 2.0}]"#).unwrap();
        assert_eq!(pts, vec![LatLonDeg::new(1.0, 2.0)]);
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_points_json("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(parse_points_json(r#"{"lat": 1.0}"#).is_err());
        assert!(parse_points_json("[[1.0]]").is_err());
    }

    #[test]
    fn test_geocode_body_first_result() {
        let body = r#"{
            "results": [
                {"geometry": {"location": {"lat": 55.7, "lng": 37.6}}},
                {"geometry": {"location": {"lat": 0.0, "lng": 0.0}}}
            ],
            "status": "OK"
        }"#;
        assert_eq!(parse_geocode_body(body), Some(LatLonDeg::new(55.7, 37.6)));
    }

    #[test]
    fn test_geocode_body_no_results() {
        assert_eq!(parse_geocode_body(r#"{"results": [], "status": "ZERO_RESULTS"}"#), None);
        assert_eq!(parse_geocode_body(r#"{"status": "REQUEST_DENIED"}"#), None);
        assert_eq!(parse_geocode_body("not json"), None);
    }

    #[test]
    fn test_parse_addresses() {
        let content = "# stores\nTverskaya 1\n\n   Arbat 10  \n#closed\n";
        assert_eq!(parse_addresses(content), vec!["Tverskaya 1", "Arbat 10"]);
    }
}
