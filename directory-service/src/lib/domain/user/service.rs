use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Orchestrates the repository and hashes passwords on registration; the
/// plaintext never leaves this layer.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self
            .password_hasher
            .hash(&command.password)
            .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))?;

        let user = NewUser {
            name: command.name,
            nick: command.nick,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        self.repository.create(user).await
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, UserError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or(UserError::NotFoundByEmail(email.to_string()))
    }

    async fn list_users(&self, name_or_nick: &str) -> Result<Vec<User>, UserError> {
        self.repository.search(name_or_nick).await
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        user.name = command.name;
        user.nick = command.nick;
        user.email = command.email;

        self.repository.update(user).await
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await
    }

    async fn follow_user(&self, user_id: &UserId, follower_id: &UserId) -> Result<(), UserError> {
        self.repository.follow(user_id, follower_id).await
    }

    async fn unfollow_user(
        &self,
        user_id: &UserId,
        follower_id: &UserId,
    ) -> Result<(), UserError> {
        self.repository.unfollow(user_id, follower_id).await
    }

    async fn list_followers(&self, user_id: &UserId) -> Result<Vec<User>, UserError> {
        self.repository.find_followers(user_id).await
    }
}
