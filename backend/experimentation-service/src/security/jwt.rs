//! Verification of externally issued session tokens.
//!
//! Tokens are minted by the upstream auth service and only verified here;
//! this service never signs one.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AuthConfig;

/// Claims carried by an upstream-issued session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user email). Optional so an absent claim is detected
    /// rather than defaulted.
    #[serde(default)]
    pub sub: Option<String>,
    /// Stable numeric user identifier.
    #[serde(default)]
    pub user_id: Option<i64>,
    /// Expiration time (Unix timestamp), enforced during decode.
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    /// The configured algorithm name is not a known JWT algorithm.
    /// A configuration fault, not a token fault.
    #[error("unsupported JWT algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Signature, expiry, or structural failure. Callers collapse this to
    /// one coarse kind at the user-facing boundary; the source error
    /// stays available for logging.
    #[error("token verification failed: {0}")]
    Verification(#[from] jsonwebtoken::errors::Error),
}

/// Decode and verify a token against the configured secret and algorithm.
pub fn decode_token(token: &str, auth: &AuthConfig) -> Result<Claims, TokenError> {
    let algorithm: Algorithm = auth
        .algorithm
        .parse()
        .map_err(|_| TokenError::UnsupportedAlgorithm(auth.algorithm.clone()))?;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(auth.secret_key.as_bytes()),
        &Validation::new(algorithm),
    )?;

    Ok(token_data.claims)
}
