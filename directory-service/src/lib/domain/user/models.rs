use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::DisplayNameError;
use crate::user::errors::EmailError;
use crate::user::errors::NicknameError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// Represents a registered member of the directory. The password is held
/// only as its hash; the plaintext never reaches this type.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: DisplayName,
    pub nick: Nickname,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User record as submitted for insertion. Storage assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: DisplayName,
    pub nick: Nickname,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl UserId {
    /// Parse a user id from its decimal string form.
    ///
    /// # Errors
    /// * `InvalidFormat` - string is not a non-negative decimal integer
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        s.parse::<i64>()
            .ok()
            .filter(|id| *id >= 0)
            .map(UserId)
            .ok_or_else(|| UserIdError::InvalidFormat(s.to_string()))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type.
///
/// Required and non-blank; surrounding whitespace is trimmed away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(name: String) -> Result<Self, DisplayNameError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            Err(DisplayNameError::Blank)
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Nickname value type.
///
/// The unique handle other members see. 3-32 characters, alphanumeric plus
/// underscore and hyphen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nickname(String);

impl Nickname {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid nickname.
    ///
    /// # Errors
    /// * `TooShort` / `TooLong` - length outside 3-32
    /// * `InvalidCharacters` - contains characters outside the allowed set
    pub fn new(nick: String) -> Result<Self, NicknameError> {
        let nick = nick.trim().to_string();
        let nick = Self::with_valid_length(nick)?;
        let nick = Self::with_valid_chars(nick)?;
        Ok(Self(nick))
    }

    fn with_valid_length(nick: String) -> Result<String, NicknameError> {
        let length = nick.len();
        if length < Self::MIN_LENGTH {
            Err(NicknameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(NicknameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(nick)
        }
    }

    fn with_valid_chars(nick: String) -> Result<String, NicknameError> {
        if nick
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            Ok(nick)
        } else {
            Err(NicknameError::InvalidCharacters)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type.
///
/// Validated with an RFC 5322 compliant parser; surrounding whitespace is
/// trimmed before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(email: String) -> Result<Self, EmailError> {
        let email = email.trim().to_string();
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to register a new user with validated fields.
#[derive(Debug)]
pub struct CreateUserCommand {
    pub name: DisplayName,
    pub nick: Nickname,
    pub email: EmailAddress,
    pub password: String,
}

impl CreateUserCommand {
    pub fn new(name: DisplayName, nick: Nickname, email: EmailAddress, password: String) -> Self {
        Self {
            name,
            nick,
            email,
            password,
        }
    }
}

/// Command to update an existing user.
///
/// All three fields are required; an update replaces the profile as a whole
/// and never touches the password.
#[derive(Debug)]
pub struct UpdateUserCommand {
    pub name: DisplayName,
    pub nick: Nickname,
    pub email: EmailAddress,
}
