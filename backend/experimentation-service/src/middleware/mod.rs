pub mod session_auth;

// Middleware modules:
// - session_auth: session token verification (cookie or bearer header)
// - Request logging: handled by actix_web::middleware::Logger
// - CORS: handled by actix_cors::Cors

pub use session_auth::{AuthenticatedUser, SessionAuth};
