use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::user::authorization::ensure_owner;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Nickname;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// HTTP request body for updating a user (raw JSON).
///
/// An update replaces the whole profile, so all fields are required; the
/// password is not updatable through this operation.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub nick: String,
    pub email: String,
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, UserError> {
        let name = DisplayName::new(self.name)?;
        let nick = Nickname::new(self.nick)?;
        let email = EmailAddress::new(self.email)?;

        Ok(UpdateUserCommand { name, nick, email })
    }
}

/// Response body for user operations
#[derive(Debug, Serialize, PartialEq)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub nick: String,
    pub email: String,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.0,
            name: user.name.as_str().to_string(),
            nick: user.nick.as_str().to_string(),
            email: user.email.as_str().to_string(),
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

pub async fn update_user<UR: UserRepository>(
    State(state): State<AppState<UR>>,
    Extension(principal): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<ApiSuccess<UserResponse>, ApiError> {
    let user_id = UserId::from_string(&id).map_err(UserError::from)?;

    // Only the owner may modify the record; denial never reaches the service
    ensure_owner(principal.user_id, user_id)?;

    let command = req.try_into_command()?;

    state
        .user_service
        .update_user(&user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|user| ApiSuccess::new(StatusCode::OK, user.into()))
}
