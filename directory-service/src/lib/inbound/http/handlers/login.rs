use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use crate::inbound::http::router::AppState;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Login with email and password.
///
/// On success the response body is the raw token string, with no JSON
/// envelope. Unknown email and wrong password are indistinguishable to the
/// caller: both yield 401 with the same generic message.
pub async fn login<UR: UserRepository>(
    State(state): State<AppState<UR>>,
    Json(body): Json<LoginRequestBody>,
) -> Result<String, ApiError> {
    // NotFoundByEmail maps to Unauthorized("Invalid credentials")
    let user = state
        .user_service
        .get_user_by_email(&body.email)
        .await
        .map_err(ApiError::from)?;

    let claims = auth::Claims::for_user(user.id.0, state.jwt_expiration_hours);

    state
        .authenticator
        .authenticate(&user.password_hash, &body.password, &claims)
        .map_err(|e| match e {
            auth::AuthenticationError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid credentials".to_string())
            }
            auth::AuthenticationError::Password(err) => {
                ApiError::InternalServerError(format!("Password verification failed: {}", err))
            }
            auth::AuthenticationError::Jwt(err) => {
                ApiError::InternalServerError(format!("Token issuance failed: {}", err))
            }
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}
