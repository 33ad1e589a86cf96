use thiserror::Error;

use crate::user::models::UserId;

/// Deny reasons for identity-scoped operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("cannot modify or delete a user that is not your own")]
    NotResourceOwner,

    #[error("cannot follow or unfollow yourself")]
    SelfReference,
}

/// Allow only when the principal acts on its own user record.
///
/// Used by update and delete: a mismatch between the authenticated id and
/// the target id is a denial.
pub fn ensure_owner(principal: UserId, target: UserId) -> Result<(), AuthorizationError> {
    if principal == target {
        Ok(())
    } else {
        Err(AuthorizationError::NotResourceOwner)
    }
}

/// Deny when the principal targets itself.
///
/// The follow relationship excludes self-references, so this is the inverse
/// of `ensure_owner` and is kept as its own named check.
pub fn ensure_not_self(principal: UserId, target: UserId) -> Result<(), AuthorizationError> {
    if principal == target {
        Err(AuthorizationError::SelfReference)
    } else {
        Ok(())
    }
}
