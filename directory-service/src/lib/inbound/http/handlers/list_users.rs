use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::User;
use crate::inbound::http::router::AppState;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// List users, optionally filtered by name or nick: `GET /users?user=ada`.
pub async fn list_users<UR: UserRepository>(
    State(state): State<AppState<UR>>,
    Query(query): Query<ListUsersQuery>,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError> {
    let filter = query.user.unwrap_or_default();

    state
        .user_service
        .list_users(&filter)
        .await
        .map_err(ApiError::from)
        .map(|users| {
            ApiSuccess::new(
                StatusCode::OK,
                users.iter().map(UserData::from).collect(),
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListUsersQuery {
    user: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: i64,
    pub name: String,
    pub nick: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
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
