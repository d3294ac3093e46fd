use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Request carried no usable credential, or one that failed
    /// verification. The message is the coarse user-facing text; the
    /// detailed cause is logged where the failure was classified.
    #[error("{0}")]
    Unauthenticated(String),

    /// Handed-off token failed verification during session issuance.
    #[error("invalid or expired token")]
    InvalidToken,

    /// Handed-off token names a different user than asserted.
    #[error("token does not match the provided user_id")]
    IdentityMismatch,

    /// Anything unanticipated while establishing a session.
    #[error("failed to establish session: {0}")]
    Issuance(String),

    #[error("{0}")]
    BadRequest(String),

    /// Catalog fetch failed; the message carries the classified cause.
    #[error("{0}")]
    Upstream(String),
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated(_) | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::IdentityMismatch | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Issuance(_) | AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            detail: self.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Unauthenticated("no token provided".to_string()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::InvalidToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::IdentityMismatch.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::BadRequest("bad timeout".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Issuance("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Upstream("HTTP 503: overloaded".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_upstream_detail_passes_through() {
        let err = AppError::Upstream("Connection failed: refused".to_string());
        assert_eq!(err.to_string(), "Connection failed: refused");
    }
}
