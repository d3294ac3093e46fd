//! Session credential gate for protected routes.
//!
//! Extracts a signed token from the session cookie or an Authorization
//! bearer header, verifies it, and stashes the authenticated user in the
//! request extensions. Re-evaluated on every request; nothing is cached
//! between requests.

use std::rc::Rc;

use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::debug;

use crate::config::AuthConfig;
use crate::error::AppError;
use crate::security::jwt;

/// Identity proven by a verified session token. Request-scoped.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub email: String,
    pub user_id: i64,
}

/// Session authentication middleware factory.
pub struct SessionAuth {
    auth: Rc<AuthConfig>,
}

impl SessionAuth {
    pub fn new(auth: AuthConfig) -> Self {
        Self {
            auth: Rc::new(auth),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthMiddleware {
            service: Rc::new(service),
            auth: self.auth.clone(),
        }))
    }
}

pub struct SessionAuthMiddleware<S> {
    service: Rc<S>,
    auth: Rc<AuthConfig>,
}

impl<S, B> Service<ServiceRequest> for SessionAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let auth = self.auth.clone();

        Box::pin(async move {
            // Extract the token as an owned String before touching the
            // request extensions. The cookie wins over the Authorization
            // header; a header without the "Bearer " prefix counts as no
            // token at all.
            let found = req
                .cookie(&auth.cookie.name)
                .map(|cookie| (cookie.value().to_string(), "cookie"))
                .or_else(|| {
                    req.headers()
                        .get("Authorization")
                        .and_then(|header| header.to_str().ok())
                        .and_then(|header| header.strip_prefix("Bearer "))
                        .map(|token| (token.to_string(), "bearer"))
                });

            let (token, source) = match found {
                Some(found) => found,
                None => {
                    debug!(path = %req.path(), "request carried no session token");
                    return Err(AppError::Unauthenticated("no token provided".to_string()).into());
                }
            };

            let claims = match jwt::decode_token(&token, &auth) {
                Ok(claims) => claims,
                Err(e) => {
                    debug!(path = %req.path(), source, error = %e, "session token rejected");
                    return Err(
                        AppError::Unauthenticated("invalid or expired token".to_string()).into(),
                    );
                }
            };

            let user = match (claims.sub, claims.user_id) {
                (Some(email), Some(user_id)) if !email.is_empty() => AuthenticatedUser {
                    email,
                    user_id,
                },
                _ => {
                    debug!(path = %req.path(), source, "session token missing required claims");
                    return Err(
                        AppError::Unauthenticated("invalid token payload".to_string()).into()
                    );
                }
            };

            debug!(path = %req.path(), source, user_id = user.user_id, "request authenticated");
            req.extensions_mut().insert(user);

            service.call(req).await
        })
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>().cloned() {
            Some(user) => ready(Ok(user)),
            None => ready(Err(AppError::Unauthenticated(
                "no token provided".to_string(),
            )
            .into())),
        }
    }
}
