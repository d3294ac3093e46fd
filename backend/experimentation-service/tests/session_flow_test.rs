//! End-to-end session tests over the real route table: issuance via
//! POST /auth, then the issued cookie (or a bearer header) unlocking the
//! protected routes.

use actix_web::{cookie::Cookie, http::header, test, web, App};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;
use serde_json::json;

use experimentation_service::config::{
    AuthConfig, ClientUrls, Config, CookieConfig, LitellmConfig, ServerConfig,
};
use experimentation_service::routes;

const SECRET: &str = "test-secret";

fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8001,
            cors_allowed_origins: "*".to_string(),
        },
        auth: AuthConfig {
            secret_key: SECRET.to_string(),
            algorithm: "HS256".to_string(),
            cookie: CookieConfig {
                name: "access_token".to_string(),
                domain: None,
                secure: false,
                same_site: "lax".to_string(),
            },
        },
        litellm: LitellmConfig {
            base_url: "http://localhost:4000".to_string(),
            api_key: None,
        },
        urls: ClientUrls {
            backend_url: "http://localhost:8001".to_string(),
            frontend_port: 8000,
        },
    }
}

fn mint(claims: &serde_json::Value) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

fn valid_token(user_id: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    mint(&json!({"sub": "user@example.com", "user_id": user_id, "exp": now + 3600, "iat": now}))
}

#[derive(Serialize)]
struct SessionForm {
    token: String,
    user_id: i64,
}

macro_rules! test_app {
    ($config:expr) => {{
        let config = $config;
        test::init_service(
            App::new()
                .app_data(web::Data::new(config.clone()))
                .configure(|cfg| routes::configure(cfg, &config)),
        )
        .await
    }};
}

#[actix_web::test]
async fn test_issuance_sets_cookie_and_redirects() {
    let app = test_app!(test_config());
    let token = valid_token(42);

    let req = test::TestRequest::post()
        .uri("/auth")
        .set_form(SessionForm {
            token: token.clone(),
            user_id: 42,
        })
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");

    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "access_token")
        .expect("session cookie should be set");
    // The externally issued token is forwarded verbatim
    assert_eq!(cookie.value(), token);
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.domain(), None);
}

#[actix_web::test]
async fn test_issuance_rejects_identity_mismatch() {
    let app = test_app!(test_config());

    let req = test::TestRequest::post()
        .uri("/auth")
        .set_form(SessionForm {
            token: valid_token(42),
            user_id: 7,
        })
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    assert!(resp.response().cookies().next().is_none());
}

#[actix_web::test]
async fn test_issuance_rejects_forged_token() {
    let app = test_app!(test_config());

    let now = chrono::Utc::now().timestamp();
    let forged = encode(
        &Header::new(Algorithm::HS256),
        &json!({"sub": "user@example.com", "user_id": 42, "exp": now + 3600}),
        &EncodingKey::from_secret(b"other-secret"),
    )
    .unwrap();

    let req = test::TestRequest::post()
        .uri("/auth")
        .set_form(SessionForm {
            token: forged,
            user_id: 42,
        })
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    assert!(resp.response().cookies().next().is_none());
}

#[actix_web::test]
async fn test_issued_cookie_unlocks_root() {
    let app = test_app!(test_config());
    let token = valid_token(42);

    let req = test::TestRequest::post()
        .uri("/auth")
        .set_form(SessionForm {
            token: token.clone(),
            user_id: 42,
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "access_token")
        .unwrap()
        .into_owned();

    let req = test::TestRequest::get().uri("/").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn test_protected_routes_reject_without_credential() {
    let app = test_app!(test_config());

    for uri in ["/", "/api/config", "/api/litellm/models"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401, "expected 401 for {}", uri);
    }
}

#[actix_web::test]
async fn test_client_config_reports_urls_and_user() {
    let app = test_app!(test_config());

    let req = test::TestRequest::get()
        .uri("/api/config")
        .insert_header(("Authorization", format!("Bearer {}", valid_token(42))))
        .to_request();

    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["backendUrl"], "http://localhost:8001");
    assert_eq!(body["litellmUrl"], "http://localhost:4000");
    assert_eq!(body["frontendUrl"], "http://localhost:8000");
    assert_eq!(body["user_id"], 42);
}

#[actix_web::test]
async fn test_cookie_wins_over_bearer_header() {
    let app = test_app!(test_config());

    let req = test::TestRequest::get()
        .uri("/api/config")
        .cookie(Cookie::new("access_token", valid_token(42)))
        .insert_header(("Authorization", "Bearer not.a.token"))
        .to_request();

    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["user_id"], 42);
}

#[actix_web::test]
async fn test_health_needs_no_credential() {
    let app = test_app!(test_config());

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "experimentation");
}

#[actix_web::test]
async fn test_error_body_carries_detail() {
    let app = test_app!(test_config());

    let req = test::TestRequest::get().uri("/api/config").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "no token provided");
}
