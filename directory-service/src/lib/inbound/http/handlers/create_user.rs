use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Nickname;
use crate::domain::user::models::User;
use crate::inbound::http::router::AppState;
use crate::user::errors::DisplayNameError;
use crate::user::errors::EmailError;
use crate::user::errors::NicknameError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

pub async fn create_user<UR: UserRepository>(
    State(state): State<AppState<UR>>,
    Json(body): Json<CreateUserRequest>,
) -> Result<ApiSuccess<CreateUserResponseData>, ApiError> {
    state
        .user_service
        .create_user(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequest {
    name: String,
    nick: String,
    email: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseCreateUserRequestError {
    #[error("Invalid name: {0}")]
    Name(#[from] DisplayNameError),

    #[error("Invalid nick: {0}")]
    Nick(#[from] NicknameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Password is required and cannot be blank")]
    BlankPassword,
}

impl CreateUserRequest {
    fn try_into_command(self) -> Result<CreateUserCommand, ParseCreateUserRequestError> {
        let name = DisplayName::new(self.name)?;
        let nick = Nickname::new(self.nick)?;
        let email = EmailAddress::new(self.email)?;
        if self.password.is_empty() {
            return Err(ParseCreateUserRequestError::BlankPassword);
        }
        Ok(CreateUserCommand::new(name, nick, email, self.password))
    }
}

impl From<ParseCreateUserRequestError> for ApiError {
    fn from(err: ParseCreateUserRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateUserResponseData {
    pub id: i64,
    pub name: String,
    pub nick: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for CreateUserResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            name: user.name.as_str().to_string(),
            nick: user.nick.as_str().to_string(),
            email: user.email.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}
