//! LiteLLM catalog proxy
//!
//! GET /api/litellm/models - list chat-capable models from the configured
//! LiteLLM deployment

use std::time::Duration;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::clients::litellm::{self, ModelCatalog};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::middleware::AuthenticatedUser;

#[derive(Debug, Deserialize)]
pub struct ModelsQuery {
    #[serde(default)]
    pub api_key: Option<String>,
    /// Upstream timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: f64,
}

fn default_timeout() -> f64 {
    5.0
}

#[derive(Debug, Serialize)]
struct ModelsResponse {
    #[serde(flatten)]
    catalog: ModelCatalog,
    user_id: i64,
}

/// GET /api/litellm/models
pub async fn list_chat_models(
    config: web::Data<Config>,
    user: AuthenticatedUser,
    query: web::Query<ModelsQuery>,
) -> Result<HttpResponse> {
    let query = query.into_inner();

    let timeout = Duration::try_from_secs_f64(query.timeout)
        .ok()
        .filter(|t| !t.is_zero())
        .ok_or_else(|| {
            AppError::BadRequest("timeout must be a positive number of seconds".to_string())
        })?;

    let catalog =
        litellm::fetch_chat_models(&config.litellm, query.api_key.as_deref(), timeout).await;

    if let Some(error) = &catalog.error {
        return Err(AppError::Upstream(error.to_string()));
    }

    Ok(HttpResponse::Ok().json(ModelsResponse {
        catalog,
        user_id: user.user_id,
    }))
}
