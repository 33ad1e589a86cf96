use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token
/// issuance.
///
/// Owns the password hasher and the JWT handler; constructed once at startup
/// with the signing secret and shared read-only across requests.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Authentication operation errors.
///
/// `InvalidCredentials` covers every password mismatch; the remaining
/// variants are internal failures of the underlying primitives.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Jwt(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator from the JWT signing secret.
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a signed token.
    ///
    /// # Arguments
    /// * `stored_hash` - password hash as persisted for the user
    /// * `password` - plaintext candidate submitted at login
    /// * `claims` - claim set to sign on success
    ///
    /// # Errors
    /// * `InvalidCredentials` - password does not match
    /// * `Password` - stored hash unreadable or primitive failure
    /// * `Jwt` - token signing failed
    pub fn authenticate(
        &self,
        stored_hash: &str,
        password: &str,
        claims: &Claims,
    ) -> Result<String, AuthenticationError> {
        match self.password_hasher.verify(stored_hash, password) {
            Ok(()) => {}
            Err(PasswordError::Mismatch) => return Err(AuthenticationError::InvalidCredentials),
            Err(e) => return Err(AuthenticationError::Password(e)),
        }

        Ok(self.jwt_handler.encode(claims)?)
    }

    /// Issue a token without password verification.
    ///
    /// # Errors
    /// * `JwtError` - token signing failed
    pub fn issue_token(&self, claims: &Claims) -> Result<String, JwtError> {
        self.jwt_handler.encode(claims)
    }

    /// Verify a token and extract its claims.
    ///
    /// # Errors
    /// * `InvalidToken` - malformed, badly-signed, wrong-algorithm, or
    ///   expired token
    pub fn verify_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_authenticate_success() {
        let authenticator = Authenticator::new(SECRET);

        let password = "my_password";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        let claims = Claims::for_user(123, 6);
        let token = authenticator
            .authenticate(&hash, password, &claims)
            .expect("Authentication failed");

        assert!(!token.is_empty());

        let decoded = authenticator
            .verify_token(&token)
            .expect("Token verification failed");
        assert_eq!(decoded.user_id().unwrap(), 123);
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = Authenticator::new(SECRET);

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let claims = Claims::for_user(123, 6);
        let result = authenticator.authenticate(&hash, "wrong_password", &claims);

        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_malformed_stored_hash() {
        let authenticator = Authenticator::new(SECRET);

        let claims = Claims::for_user(123, 6);
        let result = authenticator.authenticate("garbage", "password", &claims);

        assert!(matches!(result, Err(AuthenticationError::Password(_))));
    }

    #[test]
    fn test_issue_and_verify_token() {
        let authenticator = Authenticator::new(SECRET);

        let token = authenticator
            .issue_token(&Claims::for_user(7, 6))
            .expect("Failed to issue token");

        let decoded = authenticator
            .verify_token(&token)
            .expect("Failed to verify token");
        assert_eq!(decoded.user_id().unwrap(), 7);
    }

    #[test]
    fn test_verify_invalid_token() {
        let authenticator = Authenticator::new(SECRET);

        assert!(authenticator.verify_token("invalid.token.here").is_err());
    }
}
