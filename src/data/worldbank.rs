//! World Bank API v2 integration for the report indicators.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{Indicator, ReportConfig};
use crate::error::{AppError, FetchError};

pub const DEFAULT_BASE_URL: &str = "http://api.worldbank.org/v2";
pub const BASE_URL_ENV: &str = "WB_API_BASE_URL";

const DATE_WINDOW: &str = "1990:2015";
const PER_PAGE: usize = 1000;

/// Anything that can hand back the raw JSON body for one indicator query.
///
/// `WorldBankClient` is the real implementation; tests substitute canned
/// bodies. Implementations must be `Sync` so fetches can fan out.
pub trait IndicatorSource: Sync {
    fn fetch_body(&self, country_filter: &str, indicator: Indicator) -> Result<String, FetchError>;
}

/// Endpoint for one indicator across all countries in `country_filter`.
pub fn indicator_url(base_url: &str, country_filter: &str, indicator: Indicator) -> String {
    format!(
        "{}/countries/{country_filter}/indicators/{}?date={DATE_WINDOW}&per_page={PER_PAGE}&format=json",
        base_url.trim_end_matches('/'),
        indicator.code(),
    )
}

pub struct WorldBankClient {
    client: Client,
    base_url: String,
}

impl WorldBankClient {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, AppError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::new(4, format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Resolve the base URL from the config, then `WB_API_BASE_URL` (`.env`
    /// is honoured), then the public endpoint.
    pub fn from_config(config: &ReportConfig) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let base_url = config
            .base_url
            .clone()
            .or_else(|| std::env::var(BASE_URL_ENV).ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(base_url, config.timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl IndicatorSource for WorldBankClient {
    fn fetch_body(&self, country_filter: &str, indicator: Indicator) -> Result<String, FetchError> {
        let url = indicator_url(&self.base_url, country_filter, indicator);
        log::debug!("GET {url}");

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|source| FetchError::Network { indicator, source })?;

        if !resp.status().is_success() {
            return Err(FetchError::Status {
                indicator,
                status: resp.status().as_u16(),
            });
        }

        resp.text()
            .map_err(|source| FetchError::Network { indicator, source })
    }
}

/// One observation as the API returns it (nested objects not yet flattened).
#[derive(Debug, Deserialize)]
pub struct RawObservation {
    pub indicator: NamedRef,
    pub country: NamedRef,
    pub date: String,
    #[serde(default)]
    pub value: Option<f64>,
}

/// `{"id": ..., "value": ...}` reference object, or the bare name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NamedRef {
    Object { value: String },
    Name(String),
}

impl NamedRef {
    /// The readable name, whichever form the API used.
    pub fn into_name(self) -> String {
        match self {
            NamedRef::Object { value } | NamedRef::Name(value) => value,
        }
    }
}

/// Decode a response body into its observation records.
///
/// The body is `[pagination, records]`. Pagination is discarded; a `null`
/// records element means the query matched nothing.
pub fn parse_observations(indicator: Indicator, body: &str) -> Result<Vec<RawObservation>, FetchError> {
    let parsed: Value = serde_json::from_str(body)
        .map_err(|e| FetchError::parse(indicator, format!("invalid JSON: {e}")))?;

    let Value::Array(mut parts) = parsed else {
        return Err(FetchError::parse(indicator, "expected a top-level JSON array"));
    };

    if parts.len() < 2 {
        let reason = parts
            .first()
            .and_then(api_message)
            .unwrap_or_else(|| "response has no data element".to_string());
        return Err(FetchError::parse(indicator, reason));
    }

    let data = parts.swap_remove(1);
    if data.is_null() {
        return Ok(Vec::new());
    }

    serde_json::from_value(data)
        .map_err(|e| FetchError::parse(indicator, format!("unexpected record layout: {e}")))
}

// Error payloads look like `[{"message": [{"id": "120", "value": "..."}]}]`.
fn api_message(envelope: &Value) -> Option<String> {
    envelope
        .get("message")?
        .get(0)?
        .get("value")?
        .as_str()
        .map(|s| format!("API error: {s}"))
}
