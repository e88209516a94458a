//! Typed response envelope for the forward-geocoding provider.

use serde::Deserialize;

/// Top-level response: ranked results plus a status envelope.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    pub status: Option<GeocodeStatus>,
}

/// One candidate; only the formatted address line is consumed.
#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub formatted: String,
}

/// Provider status envelope; `code` 200 means OK even when `results` is empty.
#[derive(Debug, Deserialize)]
pub struct GeocodeStatus {
    pub code: u16,
    #[serde(default)]
    pub message: String,
}
