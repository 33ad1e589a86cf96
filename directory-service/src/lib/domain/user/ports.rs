use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user, hashing the submitted password.
    ///
    /// # Errors
    /// * `NickAlreadyExists` / `EmailAlreadyExists` - uniqueness conflict
    /// * `DatabaseError` - storage operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - user does not exist
    /// * `DatabaseError` - storage operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Retrieve user by unique email address. Used by login only.
    ///
    /// # Errors
    /// * `NotFoundByEmail` - no user with this email
    /// * `DatabaseError` - storage operation failed
    async fn get_user_by_email(&self, email: &str) -> Result<User, UserError>;

    /// List users whose name or nick contains the filter,
    /// case-insensitively. An empty filter matches everyone.
    ///
    /// # Errors
    /// * `DatabaseError` - storage operation failed
    async fn list_users(&self, name_or_nick: &str) -> Result<Vec<User>, UserError>;

    /// Replace an existing user's name, nick, and email.
    ///
    /// # Errors
    /// * `NotFound` - user does not exist
    /// * `NickAlreadyExists` / `EmailAlreadyExists` - uniqueness conflict
    /// * `DatabaseError` - storage operation failed
    async fn update_user(&self, id: &UserId, command: UpdateUserCommand)
        -> Result<User, UserError>;

    /// Delete an existing user.
    ///
    /// # Errors
    /// * `NotFound` - user does not exist
    /// * `DatabaseError` - storage operation failed
    async fn delete_user(&self, id: &UserId) -> Result<(), UserError>;

    /// Record `follower_id` as a follower of `user_id`. Following a user
    /// twice is a no-op.
    ///
    /// # Errors
    /// * `DatabaseError` - storage operation failed
    async fn follow_user(&self, user_id: &UserId, follower_id: &UserId) -> Result<(), UserError>;

    /// Remove `follower_id` from `user_id`'s followers. Unfollowing a user
    /// that was never followed is a no-op.
    ///
    /// # Errors
    /// * `DatabaseError` - storage operation failed
    async fn unfollow_user(&self, user_id: &UserId, follower_id: &UserId)
        -> Result<(), UserError>;

    /// List the users following `user_id`.
    ///
    /// # Errors
    /// * `DatabaseError` - storage operation failed
    async fn list_followers(&self, user_id: &UserId) -> Result<Vec<User>, UserError>;
}

/// Persistence operations for the user aggregate and its follower set.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user; storage assigns the id.
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by identifier, `None` if absent.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address, `None` if absent.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Retrieve users whose name or nick contains the filter,
    /// case-insensitively.
    async fn search(&self, name_or_nick: &str) -> Result<Vec<User>, UserError>;

    /// Update an existing user's profile fields.
    async fn update(&self, user: User) -> Result<User, UserError>;

    /// Remove a user from storage.
    async fn delete(&self, id: &UserId) -> Result<(), UserError>;

    /// Insert a follower relationship; duplicates are ignored.
    async fn follow(&self, user_id: &UserId, follower_id: &UserId) -> Result<(), UserError>;

    /// Remove a follower relationship if present.
    async fn unfollow(&self, user_id: &UserId, follower_id: &UserId) -> Result<(), UserError>;

    /// Retrieve the users following `user_id`.
    async fn find_followers(&self, user_id: &UserId) -> Result<Vec<User>, UserError>;
}
