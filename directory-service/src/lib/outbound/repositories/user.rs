use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Nickname;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &PgRow) -> Result<User, UserError> {
        Ok(User {
            id: UserId(row.try_get("id").map_err(db_error)?),
            name: DisplayName::new(row.try_get("name").map_err(db_error)?)?,
            nick: Nickname::new(row.try_get("nick").map_err(db_error)?)?,
            email: EmailAddress::new(row.try_get("email").map_err(db_error)?)?,
            password_hash: row.try_get("password_hash").map_err(db_error)?,
            created_at: row.try_get("created_at").map_err(db_error)?,
        })
    }
}

fn db_error(e: sqlx::Error) -> UserError {
    UserError::DatabaseError(e.to_string())
}

/// Map unique-constraint violations to the matching conflict error.
fn unique_violation(e: sqlx::Error, nick: &Nickname, email: &EmailAddress) -> UserError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            if db_err.constraint() == Some("users_nick_key") {
                return UserError::NickAlreadyExists(nick.as_str().to_string());
            }
            if db_err.constraint() == Some("users_email_key") {
                return UserError::EmailAlreadyExists(email.as_str().to_string());
            }
        }
    }
    UserError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (name, nick, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(user.name.as_str())
        .bind(user.nick.as_str())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_violation(e, &user.nick, &user.email))?;

        let id: i64 = row.try_get("id").map_err(db_error)?;

        Ok(User {
            id: UserId(id),
            name: user.name,
            nick: user.nick,
            email: user.email,
            password_hash: user.password_hash,
            created_at: user.created_at,
        })
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, nick, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, nick, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn search(&self, name_or_nick: &str) -> Result<Vec<User>, UserError> {
        let pattern = format!("%{}%", name_or_nick);

        let rows = sqlx::query(
            r#"
            SELECT id, name, nick, email, password_hash, created_at
            FROM users
            WHERE name ILIKE $1 OR nick ILIKE $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.iter().map(Self::row_to_user).collect()
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = $2, nick = $3, email = $4
            WHERE id = $1
            "#,
        )
        .bind(user.id.0)
        .bind(user.name.as_str())
        .bind(user.nick.as_str())
        .bind(user.email.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| unique_violation(e, &user.nick, &user.email))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(user.id.to_string()));
        }

        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn follow(&self, user_id: &UserId, follower_id: &UserId) -> Result<(), UserError> {
        sqlx::query(
            r#"
            INSERT INTO followers (user_id, follower_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user_id.0)
        .bind(follower_id.0)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn unfollow(&self, user_id: &UserId, follower_id: &UserId) -> Result<(), UserError> {
        sqlx::query(
            r#"
            DELETE FROM followers
            WHERE user_id = $1 AND follower_id = $2
            "#,
        )
        .bind(user_id.0)
        .bind(follower_id.0)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn find_followers(&self, user_id: &UserId) -> Result<Vec<User>, UserError> {
        let rows = sqlx::query(
            r#"
            SELECT u.id, u.name, u.nick, u.email, u.password_hash, u.created_at
            FROM users u
            JOIN followers f ON u.id = f.follower_id
            WHERE f.user_id = $1
            ORDER BY u.created_at DESC
            "#,
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.iter().map(Self::row_to_user).collect()
    }
}
