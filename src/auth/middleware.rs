//! Axum middleware that attaches the caller [`Principal`] to each request.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Method, Request},
    middleware::Next,
    response::Response,
};
use tracing::{field, info_span, warn};

use crate::api::error::ApiError;
use crate::auth::identity::IdentityProvider;
use crate::auth::models::{AuthError, Principal};
use crate::observability::MetricsRecorder;

pub type IdentityState = Arc<dyn IdentityProvider>;

/// Middleware entry point that resolves the caller identity.
///
/// Requests without an `Authorization` header continue as
/// [`Principal::anonymous`]; portal reads are public and the permission gate
/// denies anonymous callers on guarded operations.
pub async fn authenticate(
    State(identity): State<IdentityState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    if request.method() == Method::OPTIONS {
        return Ok(next.run(request).await);
    }

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let correlation_id = uuid::Uuid::new_v4();
    let span = info_span!(
        "auth_middleware.authenticate",
        http.method = %method,
        http.path = %path,
        auth.user_id = field::Empty,
        correlation_id = %correlation_id
    );

    let header = request.headers().get(AUTHORIZATION).map(|value| value.to_str().unwrap_or(""));

    let metrics = MetricsRecorder::new();
    let principal = match header {
        None => Principal::anonymous(),
        Some(raw) => {
            let token = parse_bearer(raw).map_err(|err| {
                warn!(parent: &span, %correlation_id, error = %err, "authentication failed");
                metrics.record_authentication("malformed");
                ApiError::from(err)
            })?;
            match identity.resolve(token).await {
                Ok(principal) => {
                    metrics.record_authentication("success");
                    principal
                }
                Err(err) => {
                    warn!(parent: &span, %correlation_id, error = %err, "authentication failed");
                    metrics.record_authentication("rejected");
                    return Err(ApiError::from(err));
                }
            }
        }
    };

    if let Some(user_id) = principal.user_id() {
        span.record("auth.user_id", field::display(user_id));
    }
    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

fn parse_bearer(header: &str) -> Result<&str, AuthError> {
    let (scheme, token) = header.trim().split_once(' ').ok_or(AuthError::MalformedBearer)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::MalformedBearer);
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::MalformedBearer);
    }
    Ok(token)
}
