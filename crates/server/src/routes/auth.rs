use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, Method},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use service::auth::{AuthError, TokenVerifier};
use service::AccessGate;

use crate::errors::JsonApiError;

pub const AUTH_COOKIE: &str = "auth_token";

#[derive(Clone)]
pub struct ServerState {
    pub gate: Arc<AccessGate>,
    pub verifier: Arc<TokenVerifier>,
}

/// Pull the raw token from `Authorization: Bearer ...`, else the `auth_token` cookie.
pub fn bearer_token(headers: &HeaderMap, jar: &CookieJar) -> Result<String, AuthError> {
    if let Some(value) = headers.get(AUTHORIZATION) {
        let value = value.to_str().map_err(|_| AuthError::MalformedHeader)?;
        let (scheme, token) = value.split_once(' ').ok_or(AuthError::MalformedHeader)?;
        let token = token.trim();
        if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
            return Err(AuthError::MalformedHeader);
        }
        return Ok(token.to_string());
    }
    jar.get(AUTH_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(AuthError::MissingToken)
}

/// Middleware: verify the bearer token and stash the `Caller` in request extensions.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    // CORS preflight
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }
    let token = bearer_token(req.headers(), &jar).map_err(|e| {
        debug!(code = e.code(), path = %req.uri().path(), "bearer token rejected");
        JsonApiError::from(e)
    })?;
    let caller = state.verifier.verify(&token).map_err(|e| {
        debug!(code = e.code(), path = %req.uri().path(), "bearer token rejected");
        JsonApiError::from(e)
    })?;
    req.extensions_mut().insert(caller);
    Ok(next.run(req).await)
}
