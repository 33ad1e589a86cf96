use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid user id: {0}")]
    InvalidFormat(String),
}

/// Error for DisplayName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DisplayNameError {
    #[error("Name is required and cannot be blank")]
    Blank,
}

/// Error for Nickname validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NicknameError {
    #[error("Nick too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Nick too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Nick contains invalid characters (only alphanumeric, underscore, and hyphen allowed)")]
    InvalidCharacters,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (converted via #[from])
    #[error("Invalid user id: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid name: {0}")]
    InvalidName(#[from] DisplayNameError),

    #[error("Invalid nick: {0}")]
    InvalidNickname(#[from] NicknameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    // Domain-level errors
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("User not found with email: {0}")]
    NotFoundByEmail(String),

    #[error("Nick already exists: {0}")]
    NickAlreadyExists(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
