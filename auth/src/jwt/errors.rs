use thiserror::Error;

/// Error type for token operations.
///
/// Verification failures are deliberately coarse: a malformed, badly-signed,
/// wrong-algorithm, or expired token all surface as `InvalidToken`, so
/// callers cannot tell them apart.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Token is invalid or expired")]
    InvalidToken,
}
