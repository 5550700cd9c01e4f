use serde::Deserialize;

use crate::core::config::GeocodingConfig;
use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::LocationSource;
use crate::features::reports::models::{Coordinates, Location};
use crate::shared::constants::LOCATION_NOT_SPECIFIED;

/// OpenCage geocode response, reduced to what display needs
#[derive(Debug, Deserialize)]
struct OpenCageResponse {
    #[serde(default)]
    results: Vec<OpenCageResult>,
}

#[derive(Debug, Deserialize)]
struct OpenCageResult {
    formatted: Option<String>,
}

/// Display text for a location and how it was produced
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub display: String,
    pub source: LocationSource,
}

/// Best-effort reverse geocoding with a formatted-coordinate fallback
pub struct GeocodingService {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl GeocodingService {
    pub fn new(config: &GeocodingConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("CivicReportCore/1.0 (citizen-report-system)")
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Never fails: address first, then one reverse-geocoding attempt, then formatted coordinates
    pub async fn resolve(&self, location: &Location) -> ResolvedLocation {
        if let Some(address) = &location.address {
            return ResolvedLocation {
                display: address.clone(),
                source: LocationSource::Address,
            };
        }

        let Some(coords) = location.coordinates else {
            return ResolvedLocation {
                display: LOCATION_NOT_SPECIFIED.to_string(),
                source: LocationSource::Unspecified,
            };
        };

        match self.reverse_geocode(coords).await {
            Ok(Some(formatted)) => ResolvedLocation {
                display: formatted,
                source: LocationSource::Geocoded,
            },
            Ok(None) => ResolvedLocation {
                display: coords.to_display_string(),
                source: LocationSource::Coordinates,
            },
            Err(e) => {
                tracing::warn!("Reverse geocoding failed, using coordinates: {}", e);
                ResolvedLocation {
                    display: coords.to_display_string(),
                    source: LocationSource::Coordinates,
                }
            }
        }
    }

    /// `Ok(None)` when no key is configured, the provider answers non-OK, or nothing matches
    pub async fn reverse_geocode(&self, coords: Coordinates) -> Result<Option<String>> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Ok(None);
        };

        let query = format!("{},{}", coords.lat, coords.lng);
        let url = format!(
            "{}/geocode/v1/json?q={}&key={}&limit=1&no_annotations=1",
            self.base_url,
            urlencoding::encode(&query),
            urlencoding::encode(api_key)
        );

        tracing::debug!("Reverse geocoding {}", query);

        self.execute_request(&url).await
    }

    async fn execute_request(&self, url: &str) -> Result<Option<String>> {
        let response = self.client.get(url).send().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Geocoding request failed: {}", e))
        })?;

        if !response.status().is_success() {
            tracing::warn!("Geocoding provider returned status: {}", response.status());
            return Ok(None);
        }

        let body: OpenCageResponse = response.json().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Failed to parse geocoding response: {}", e))
        })?;

        Ok(body
            .results
            .into_iter()
            .next()
            .and_then(|r| r.formatted)
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty()))
    }
}
