//! Route configuration
//!
//! Centralized route setup. The health probe and the issuance endpoint
//! stay public; everything else sits behind the session gate.

use actix_web::web;

use crate::config::Config;
use crate::handlers;
use crate::middleware::SessionAuth;

/// Configure all routes for the application.
pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    cfg.route("/health", web::get().to(handlers::health_check))
        .route("/auth", web::post().to(handlers::establish_session))
        .service(
            web::scope("/api")
                .wrap(SessionAuth::new(config.auth.clone()))
                .route("/config", web::get().to(handlers::get_client_config))
                .route("/litellm/models", web::get().to(handlers::list_chat_models)),
        )
        .service(
            web::resource("/")
                .wrap(SessionAuth::new(config.auth.clone()))
                .route(web::get().to(handlers::index)),
        );
}
