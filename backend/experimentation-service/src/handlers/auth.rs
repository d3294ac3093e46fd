//! Session issuance
//!
//! POST /auth - exchange a token handed off by the upstream auth service
//! for a scoped session cookie. The token is forwarded verbatim; this
//! service never mints one.

use actix_web::{cookie::Cookie, http::header, web, HttpResponse};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::security::jwt::{self, TokenError};

#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub token: String,
    pub user_id: i64,
}

/// POST /auth
///
/// Re-validates the handed-off token, checks it names the asserted user,
/// and redirects to the application root with the session cookie set.
pub async fn establish_session(
    config: web::Data<Config>,
    form: web::Form<SessionRequest>,
) -> Result<HttpResponse> {
    let form = form.into_inner();

    let claims = jwt::decode_token(&form.token, &config.auth).map_err(|e| match e {
        TokenError::Verification(cause) => {
            warn!(error = %cause, "session issuance rejected: token failed verification");
            AppError::InvalidToken
        }
        TokenError::UnsupportedAlgorithm(_) => {
            warn!(error = %e, "session issuance failed");
            AppError::Issuance(e.to_string())
        }
    })?;

    // A token with no identity claim cannot match the asserted user.
    if claims.user_id != Some(form.user_id) {
        warn!(
            asserted = form.user_id,
            claimed = ?claims.user_id,
            "session issuance rejected: identity mismatch"
        );
        return Err(AppError::IdentityMismatch);
    }

    let cookie = session_cookie(&config, &form.token);
    debug!(user_id = form.user_id, "session established");

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .cookie(cookie)
        .finish())
}

/// Build the scoped session cookie around the original token string.
/// The Domain attribute is attached only when configured non-empty; an
/// unset domain must not become an empty-string attribute.
fn session_cookie(config: &Config, token: &str) -> Cookie<'static> {
    let cookie_cfg = &config.auth.cookie;

    let mut builder = Cookie::build(cookie_cfg.name.clone(), token.to_owned())
        .path("/")
        .http_only(true)
        .secure(cookie_cfg.secure)
        .same_site(cookie_cfg.same_site());

    if let Some(domain) = cookie_cfg.domain.as_deref().filter(|d| !d.is_empty()) {
        builder = builder.domain(domain.to_owned());
    }

    builder.finish()
}
