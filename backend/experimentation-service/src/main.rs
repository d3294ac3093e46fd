use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use experimentation_service::config::Config;
use experimentation_service::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,experimentation_service=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");

    tracing::info!(
        "Starting experimentation-service v{}",
        env!("CARGO_PKG_VERSION")
    );
    tracing::info!(
        algorithm = %config.auth.algorithm,
        cookie = %config.auth.cookie.name,
        litellm_url = %config.litellm.base_url,
        "session verification configured"
    );

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("listening on http://{}", bind_addr);

    HttpServer::new(move || {
        // Build CORS configuration from the comma-separated origin list
        let mut cors = Cors::default();
        for origin in config.server.cors_allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        let config = config.clone();
        App::new()
            .app_data(web::Data::new(config.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .configure(|cfg| routes::configure(cfg, &config))
    })
    .bind(&bind_addr)?
    .run()
    .await
}
