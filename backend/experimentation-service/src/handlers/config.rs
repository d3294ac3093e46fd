//! Client-facing runtime configuration
//!
//! GET /api/config - URLs the browser frontend needs, plus the caller's id

use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;

use crate::config::Config;
use crate::middleware::AuthenticatedUser;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub backend_url: String,
    pub litellm_url: String,
    pub frontend_url: String,
    #[serde(rename = "user_id")]
    pub user_id: i64,
}

/// GET /api/config
pub async fn get_client_config(
    config: web::Data<Config>,
    user: AuthenticatedUser,
) -> impl Responder {
    HttpResponse::Ok().json(ClientConfig {
        backend_url: config.urls.backend_url.clone(),
        litellm_url: config.litellm.base_url.clone(),
        frontend_url: config.urls.frontend_url(),
        user_id: user.user_id,
    })
}
