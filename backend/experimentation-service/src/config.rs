//! Configuration for the experimentation service
//!
//! One immutable snapshot assembled at startup from environment variables
//! (with an optional .env file) and handed to each component by reference.
//! No other module reads the environment.

use actix_web::cookie::SameSite;
use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub litellm: LitellmConfig,
    pub urls: ClientUrls,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Comma-separated allowed origins, or "*".
    pub cors_allowed_origins: String,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared secret the upstream auth service signs session tokens with.
    pub secret_key: String,
    /// JWT algorithm name, e.g. "HS256".
    pub algorithm: String,
    pub cookie: CookieConfig,
}

#[derive(Debug, Clone)]
pub struct CookieConfig {
    /// Name of the session cookie.
    pub name: String,
    /// Cookie Domain attribute; unset means no attribute at all.
    pub domain: Option<String>,
    pub secure: bool,
    pub same_site: String,
}

impl CookieConfig {
    /// Map the configured SameSite name onto the cookie attribute.
    /// Unrecognized values fall back to Lax.
    pub fn same_site(&self) -> SameSite {
        match self.same_site.to_ascii_lowercase().as_str() {
            "strict" => SameSite::Strict,
            "none" => SameSite::None,
            _ => SameSite::Lax,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LitellmConfig {
    pub base_url: String,
    /// Default API key; a per-request key overrides it.
    pub api_key: Option<String>,
}

/// URLs reported to browser clients via /api/config.
#[derive(Debug, Clone)]
pub struct ClientUrls {
    pub backend_url: String,
    pub frontend_port: u16,
}

impl ClientUrls {
    pub fn frontend_url(&self) -> String {
        format!("http://localhost:{}", self.frontend_port)
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let secret_key = env::var("SECRET_KEY").context("SECRET_KEY must be set")?;

        Ok(Self {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("SERVER_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8001),
                cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "*".to_string()),
            },
            auth: AuthConfig {
                secret_key,
                algorithm: env::var("ALGORITHM").unwrap_or_else(|_| "HS256".to_string()),
                cookie: CookieConfig {
                    name: env::var("ACCESS_TOKEN").unwrap_or_else(|_| "access_token".to_string()),
                    domain: env::var("COOKIE_DOMAIN").ok().filter(|d| !d.is_empty()),
                    secure: env::var("COOKIE_SECURE")
                        .ok()
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(false),
                    same_site: env::var("COOKIE_SAMESITE").unwrap_or_else(|_| "lax".to_string()),
                },
            },
            litellm: LitellmConfig {
                base_url: env::var("LITELLM_URL")
                    .unwrap_or_else(|_| "http://localhost:4000".to_string()),
                api_key: env::var("LITELLM_API_KEY").ok().filter(|k| !k.is_empty()),
            },
            urls: ClientUrls {
                backend_url: env::var("BACKEND_URL")
                    .unwrap_or_else(|_| "http://localhost:8001".to_string()),
                frontend_port: env::var("FRONTEND_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8000),
            },
        })
    }
}
