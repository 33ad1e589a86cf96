use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::user::authorization::ensure_not_self;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// The authenticated principal becomes a follower of the path user.
pub async fn follow_user<UR: UserRepository>(
    State(state): State<AppState<UR>>,
    Extension(principal): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let user_id = UserId::from_string(&id).map_err(UserError::from)?;

    // Following yourself is a denial, not a no-op
    ensure_not_self(principal.user_id, user_id)?;

    state
        .user_service
        .follow_user(&user_id, &principal.user_id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}
