use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::user::ports::UserRepository;

/// Verified principal attached to request extensions after token
/// validation. Reconstructed fresh on every request; nothing is stored
/// server-side.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Logging stage of the request pipeline.
///
/// Records method, URI, and host for every request before delegating; it
/// never rejects, so rejected requests are logged too.
pub async fn log_request(req: Request, next: Next) -> Response {
    let host = req
        .headers()
        .get(http::header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");

    tracing::info!(
        method = %req.method(),
        uri = %req.uri(),
        host = %host,
        "Incoming request"
    );

    next.run(req).await
}

/// Authentication stage of the request pipeline.
///
/// Extracts the bearer token, verifies it, and makes the principal
/// available to the handler. On any failure the chain short-circuits with
/// 401 and the handler never runs.
pub async fn authenticate<UR: UserRepository>(
    State(state): State<AppState<UR>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = bearer_token(&req)?;

    let claims = state.authenticator.verify_token(token).map_err(|e| {
        tracing::warn!("Token verification failed: {}", e);
        ApiError::Unauthorized("Invalid or expired token".to_string()).into_response()
    })?;

    let user_id = claims.user_id().map_err(|_| {
        tracing::warn!("Token subject is not a user id");
        ApiError::Unauthorized("Invalid or expired token".to_string()).into_response()
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: UserId(user_id),
    });

    Ok(next.run(req).await)
}

/// Extract the token from the `Authorization` header.
///
/// The scheme is matched case-sensitively as exactly `Bearer ` and the
/// remainder must be non-empty; any deviation is a 401.
fn bearer_token(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            ApiError::Unauthorized("Missing Authorization header".to_string()).into_response()
        })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        ApiError::Unauthorized("Invalid Authorization header".to_string()).into_response()
    })?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(ApiError::Unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        )
        .into_response()),
    }
}
