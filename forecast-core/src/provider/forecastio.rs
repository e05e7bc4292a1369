use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::model::{ForecastRequest, ForecastResponse};

use super::ForecastSource;

pub const DEFAULT_BASE_URL: &str = "https://api.forecast.io/forecast/";

/// Forecast.io client. Issues one GET per fetch; no retries, no caching.
#[derive(Debug, Clone)]
pub struct ForecastIoProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl ForecastIoProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    /// `{base}{api_key}/{lat},{lon}`; the units go in the query string.
    fn request_url(&self, request: &ForecastRequest) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!("{base}/{}/{}", self.api_key, request.location)
    }
}

#[async_trait]
impl ForecastSource for ForecastIoProvider {
    async fn fetch(&self, request: &ForecastRequest) -> Result<ForecastResponse> {
        let url = self.request_url(request);
        debug!(
            url = %url.replace(&self.api_key, "<redacted>"),
            units = request.units.provider_query(),
            "requesting forecast"
        );

        let res = self
            .http
            .get(&url)
            .query(&[("units", request.units.provider_query())])
            .send()
            .await
            .context("Failed to send request to Forecast.io")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read Forecast.io response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Forecast.io request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        serde_json::from_str(&body).context("Failed to parse Forecast.io JSON")
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((end, _)) => format!("{}...", &body[..end]),
        None => body.to_string(),
    }
}
