use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::LOCATION_NOT_SPECIFIED;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Fixed four-decimal form with hemisphere letters, e.g. "40.7128°N, 74.0060°W"
    pub fn to_display_string(&self) -> String {
        let ns = if self.lat >= 0.0 { 'N' } else { 'S' };
        let ew = if self.lng >= 0.0 { 'E' } else { 'W' };
        format!(
            "{:.4}°{}, {:.4}°{}",
            self.lat.abs(),
            ns,
            self.lng.abs(),
            ew
        )
    }
}

/// Where a report says the issue is: an address, a coordinate pair, both, or neither
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Location {
    pub address: Option<String>,
    pub coordinates: Option<Coordinates>,
}

impl Location {
    pub fn new(address: Option<&str>, coordinates: Option<Coordinates>) -> Self {
        Self {
            address: address
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(String::from),
            coordinates,
        }
    }

    /// Display text without any network lookup
    pub fn offline_display(&self) -> String {
        if let Some(address) = &self.address {
            return address.clone();
        }
        match &self.coordinates {
            Some(coords) => coords.to_display_string(),
            None => LOCATION_NOT_SPECIFIED.to_string(),
        }
    }
}
