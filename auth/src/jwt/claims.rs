use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claim set asserted by an access token.
///
/// The subject carries the user id in decimal form, per the RFC 7519 string
/// subject convention. Tokens are time-bounded: `exp` is set to issuance
/// time plus a fixed TTL and there is no server-side revocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject: the authenticated user's id
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Build claims for a user, expiring a fixed number of hours from now.
    pub fn for_user(user_id: i64, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(expiration_hours);

        Self {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Parse the subject back into a numeric user id.
    ///
    /// # Errors
    /// * `InvalidToken` - subject is not a decimal integer
    pub fn user_id(&self) -> Result<i64, super::JwtError> {
        self.sub.parse().map_err(|_| super::JwtError::InvalidToken)
    }

    /// Check whether the claims are expired at the given instant.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
