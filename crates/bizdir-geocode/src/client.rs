//! HTTP client for the forward-geocoding provider.
//!
//! Wraps `reqwest` with provider-specific error handling, API key management,
//! and typed response deserialization. The provider reports request-level
//! problems in a JSON `"status"` envelope; those surface as
//! [`GeocodeError::ApiError`].

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::GeocodeError;
use crate::suggest::SuggestionProvider;
use crate::types::GeocodeResponse;

const DEFAULT_BASE_URL: &str = "https://api.opencagedata.com/geocode/v1/json";

/// Client for the forward-geocoding API.
///
/// Manages the HTTP client, API key, and base URL. Use [`GeocodeClient::new`]
/// for production or [`GeocodeClient::with_base_url`] to point at a mock
/// server in tests.
#[derive(Debug)]
pub struct GeocodeClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl GeocodeClient {
    /// Creates a new client pointed at the production geocoding endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, GeocodeError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeocodeError::ApiError`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("bizdir/0.1 (business-directory)")
            .build()?;

        let base_url = Url::parse(base_url)
            .map_err(|e| GeocodeError::ApiError(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Looks up ranked address candidates for partial address text.
    ///
    /// Returns the provider's formatted address strings in relevance order,
    /// capped at `limit`. An empty `country_code` omits the restriction.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::ApiError`] if the provider's status envelope
    ///   reports an error.
    /// - [`GeocodeError::Http`] on network failure or non-2xx HTTP status.
    /// - [`GeocodeError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn forward_geocode(
        &self,
        query: &str,
        limit: usize,
        country_code: &str,
    ) -> Result<Vec<String>, GeocodeError> {
        let url = self.build_url(query, limit, country_code);
        let body = self.request_json(&url).await?;
        Self::check_api_error(&body)?;

        let envelope: GeocodeResponse =
            serde_json::from_value(body).map_err(|e| GeocodeError::Deserialize {
                context: format!("forward_geocode(q={query})"),
                source: e,
            })?;

        Ok(envelope
            .results
            .into_iter()
            .map(|result| result.formatted)
            .collect())
    }

    /// Builds the full request URL with properly percent-encoded query
    /// parameters (`q`, `key`, `limit`, and an optional `countrycode`).
    fn build_url(&self, query: &str, limit: usize, country_code: &str) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", query);
            pairs.append_pair("key", &self.api_key);
            pairs.append_pair("limit", &limit.to_string());
            if !country_code.is_empty() {
                pairs.append_pair("countrycode", country_code);
            }
        }
        url
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the
    /// response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] on network failure or a non-2xx status.
    /// Returns [`GeocodeError::Deserialize`] if the body is not valid JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, GeocodeError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    /// Checks the `"status"` envelope and returns an error for any code
    /// other than 200.
    fn check_api_error(body: &serde_json::Value) -> Result<(), GeocodeError> {
        let Some(status) = body.get("status") else {
            return Ok(());
        };
        let code = status.get("code").and_then(serde_json::Value::as_u64);
        if code.is_some_and(|c| c != 200) {
            let msg = status
                .get("message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            return Err(GeocodeError::ApiError(msg));
        }
        Ok(())
    }
}

impl SuggestionProvider for GeocodeClient {
    fn suggest(
        &self,
        query: &str,
        limit: usize,
        country_code: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>, GeocodeError>> + Send {
        self.forward_geocode(query, limit, country_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> GeocodeClient {
        GeocodeClient::with_base_url("test-key", 30, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_constructs_correct_query_string() {
        let client = test_client("https://api.opencagedata.com/geocode/v1/json");
        let url = client.build_url("Cape Town", 5, "za");
        assert_eq!(
            url.as_str(),
            "https://api.opencagedata.com/geocode/v1/json?q=Cape+Town&key=test-key&limit=5&countrycode=za"
        );
    }

    #[test]
    fn build_url_omits_empty_country_code() {
        let client = test_client("https://api.opencagedata.com/geocode/v1/json");
        let url = client.build_url("Main Road", 5, "");
        assert!(!url.as_str().contains("countrycode"));
    }

    #[test]
    fn build_url_encodes_special_characters() {
        let client = test_client("https://api.opencagedata.com/geocode/v1/json");
        let url = client.build_url("12 Church & Long St", 5, "za");
        assert!(
            url.as_str().contains("Church+%26+Long") || url.as_str().contains("Church%20%26%20Long"),
            "query param should be percent-encoded: {url}"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = GeocodeClient::with_base_url("k", 10, "not a url").unwrap_err();
        assert!(matches!(err, GeocodeError::ApiError(_)));
    }

    #[test]
    fn status_envelope_error_is_surfaced() {
        let body = serde_json::json!({
            "status": { "code": 402, "message": "quota exceeded" },
            "results": []
        });
        let err = GeocodeClient::check_api_error(&body).unwrap_err();
        assert!(matches!(err, GeocodeError::ApiError(ref m) if m == "quota exceeded"));
    }

    #[test]
    fn status_code_200_is_ok() {
        let body = serde_json::json!({
            "status": { "code": 200, "message": "OK" },
            "results": []
        });
        assert!(GeocodeClient::check_api_error(&body).is_ok());
    }
}
