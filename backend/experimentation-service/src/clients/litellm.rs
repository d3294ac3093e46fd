//! LiteLLM model-catalog client
//!
//! Issues a single bounded GET against `{LITELLM_URL}/v1/model/info` and
//! filters the catalog down to chat-capable models. Every failure class
//! is captured into the result record; nothing is raised to the caller.

use std::time::Duration;

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::LitellmConfig;

/// Identifier reported for this upstream in every result.
pub const SERVICE_NAME: &str = "litellm";

/// Upper bound on how much of an upstream error body is kept.
const ERROR_BODY_LIMIT: usize = 200;

/// Classified catalog-fetch failure. The tiers exist for operator
/// diagnosis; routes surface all of them the same way.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Upstream answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never completed: DNS, refused connection, timeout.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Anything else, tagged with a kind so operators can diagnose it.
    #[error("{kind}: {message}")]
    Unknown { kind: String, message: String },
}

impl Serialize for CatalogError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outcome of one catalog fetch. A set `error` implies empty `models`.
#[derive(Debug, Serialize)]
pub struct ModelCatalog {
    pub service: &'static str,
    pub base_url: String,
    pub models: Vec<String>,
    pub error: Option<CatalogError>,
}

impl ModelCatalog {
    fn success(base_url: &str, models: Vec<String>) -> Self {
        Self {
            service: SERVICE_NAME,
            base_url: base_url.to_owned(),
            models,
            error: None,
        }
    }

    fn failure(base_url: &str, error: CatalogError) -> Self {
        Self {
            service: SERVICE_NAME,
            base_url: base_url.to_owned(),
            models: Vec::new(),
            error: Some(error),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ModelInfoResponse {
    #[serde(default)]
    data: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ModelDescriptor {
    model_name: String,
    #[serde(default)]
    model_info: ModelInfo,
}

#[derive(Debug, Default, Deserialize)]
struct ModelInfo {
    #[serde(default)]
    mode: Option<String>,
}

/// Fetch the chat-capable models from the configured LiteLLM deployment.
///
/// `api_key` overrides the configured default key; with neither present
/// the request goes out unauthenticated. One attempt, bounded by
/// `timeout`, no retries.
pub async fn fetch_chat_models(
    config: &LitellmConfig,
    api_key: Option<&str>,
    timeout: Duration,
) -> ModelCatalog {
    let base_url = config.base_url.as_str();
    let url = format!("{}/v1/model/info", base_url.trim_end_matches('/'));
    let key = api_key
        .filter(|k| !k.is_empty())
        .map(str::to_owned)
        .or_else(|| config.api_key.clone());

    let client = match reqwest::Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "failed to build catalog HTTP client");
            return ModelCatalog::failure(
                base_url,
                CatalogError::Unknown {
                    kind: "ClientBuildError".to_owned(),
                    message: e.to_string(),
                },
            );
        }
    };

    let mut request = client.get(&url).header("accept", "application/json");
    if let Some(key) = &key {
        request = request.header("Authorization", format!("Bearer {}", key));
    }

    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            warn!(url = %url, error = %e, "catalog request failed to complete");
            return ModelCatalog::failure(base_url, CatalogError::Connection(e.to_string()));
        }
    };

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let prefix: String = body.chars().take(ERROR_BODY_LIMIT).collect();
        warn!(url = %url, status = status.as_u16(), "catalog request returned an error status");
        return ModelCatalog::failure(
            base_url,
            CatalogError::Http {
                status: status.as_u16(),
                body: prefix,
            },
        );
    }

    let payload: ModelInfoResponse = match response.json().await {
        Ok(payload) => payload,
        Err(e) if e.is_timeout() || e.is_connect() => {
            warn!(url = %url, error = %e, "catalog response timed out mid-read");
            return ModelCatalog::failure(base_url, CatalogError::Connection(e.to_string()));
        }
        Err(e) => {
            warn!(url = %url, error = %e, "catalog response could not be decoded");
            return ModelCatalog::failure(
                base_url,
                CatalogError::Unknown {
                    kind: "DecodeError".to_owned(),
                    message: e.to_string(),
                },
            );
        }
    };

    let models = chat_model_names(payload.data);
    debug!(url = %url, count = models.len(), "catalog fetch succeeded");
    ModelCatalog::success(base_url, models)
}

/// Keep descriptors whose `model_info.mode` is "chat", projected to their
/// `model_name`. Entries that don't decode are skipped rather than
/// failing the whole catalog.
fn chat_model_names(data: Vec<serde_json::Value>) -> Vec<String> {
    data.into_iter()
        .filter_map(|raw| serde_json::from_value::<ModelDescriptor>(raw).ok())
        .filter(|descriptor| descriptor.model_info.mode.as_deref() == Some("chat"))
        .map(|descriptor| descriptor.model_name)
        .collect()
}
