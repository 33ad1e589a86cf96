use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

pub async fn get_user<UR: UserRepository>(
    State(state): State<AppState<UR>>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<GetUserResponseData>, ApiError> {
    let user_id = UserId::from_string(&user_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .user_service
        .get_user(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetUserResponseData {
    pub id: i64,
    pub name: String,
    pub nick: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for GetUserResponseData {
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
