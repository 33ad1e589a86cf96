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
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

pub async fn list_followers<UR: UserRepository>(
    State(state): State<AppState<UR>>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<Vec<FollowerData>>, ApiError> {
    let user_id = UserId::from_string(&id).map_err(UserError::from)?;

    state
        .user_service
        .list_followers(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|followers| {
            ApiSuccess::new(
                StatusCode::OK,
                followers.iter().map(FollowerData::from).collect(),
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FollowerData {
    pub id: i64,
    pub name: String,
    pub nick: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for FollowerData {
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
