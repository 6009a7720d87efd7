//! HTTP transport for the Rick and Morty API.
//!
//! Builds URLs, performs GET requests and hands back raw body bytes.
//! Decoding is left to the repositories so each one owns its schema.

use std::time::Duration;

use log::{debug, info, warn};
use reqwest::Url;
use serde::Deserialize;

use super::error::FetchError;

pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api";

/// Error body the API sends alongside 4xx responses.
#[derive(Deserialize, Debug)]
struct ApiErrorBody {
    error: String,
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    /// Creates a client rooted at `base_url` (e.g. `https://rickandmortyapi.com/api`).
    ///
    /// `timeout` bounds each whole request; `None` keeps reqwest's default.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Self {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|e| {
            warn!("Failed to build configured HTTP client ({}), using defaults", e);
            reqwest::Client::new()
        });

        Self {
            base_url: base_url.into(),
            client,
        }
    }

    /// Joins `path` under the base URL and appends the query pairs.
    ///
    /// Pairs whose value is absent or empty are dropped entirely. The API treats
    /// `name=` as "match nothing", so an empty filter must never go on the wire.
    pub fn build_url(&self, path: &str, query: &[(&str, Option<String>)]) -> Result<Url, FetchError> {
        let raw = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let mut url = Url::parse(&raw).map_err(|e| {
            FetchError::Network(format!("bad base URL {raw:?} (check api.base_url): {e}"))
        })?;

        let pairs: Vec<(&str, &str)> = query
            .iter()
            .filter_map(|(key, value)| match value.as_deref() {
                Some(v) if !v.is_empty() => Some((*key, v)),
                _ => None,
            })
            .collect();

        // Touching query_pairs_mut with nothing to add would leave a dangling '?'
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    /// Performs a GET and returns the body of a 2xx response.
    pub async fn get(
        &self,
        path: &str,
        query: &[(&str, Option<String>)],
    ) -> Result<Vec<u8>, FetchError> {
        let url = self.build_url(path, query)?;
        info!("GET {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        debug!("{} -> {}", url, status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error)
                .ok()
                .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
            warn!("API error: {} - {}", status.as_u16(), message);
            return Err(FetchError::Protocol {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        debug!("{} returned {} bytes", url, bytes.len());
        Ok(bytes.to_vec())
    }
}
