//! Gated application shell.

use actix_web::{HttpResponse, Responder};

/// GET / - minimal shell served once the session gate passes. The UI
/// itself belongs to the frontend; this route only proves the session.
pub async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(
            r#"<!DOCTYPE html>
<html>
<head><title>Experimentation</title></head>
<body>
    <p>Experimentation service is running and your session is valid.</p>
</body>
</html>
"#,
        )
}
