//! Authentication library for the directory service
//!
//! Provides the building blocks for stateless token authentication:
//! - Password hashing and verification (Argon2id)
//! - JWT issuance and validation (HS256)
//! - An authenticator coordinating both for the login flow
//!
//! The signing secret is injected at construction. Nothing here performs
//! I/O; every operation is CPU-bound and safe to share across request
//! handlers behind an `Arc`.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify(&hash, "my_password").is_ok());
//! assert!(hasher.verify(&hash, "not_my_password").is_err());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let token = handler.encode(&Claims::for_user(42, 6)).unwrap();
//! let claims = handler.decode(&token).unwrap();
//! assert_eq!(claims.user_id().unwrap(), 42);
//! ```
//!
//! ## Login Flow
//! ```
//! use auth::{Authenticator, Claims};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Registration: store only the hash
//! let stored_hash = auth.hash_password("hunter2!").unwrap();
//!
//! // Login: verify the candidate and issue a token
//! let claims = Claims::for_user(7, 6);
//! let token = auth.authenticate(&stored_hash, "hunter2!", &claims).unwrap();
//!
//! // Every protected request: verify and extract the principal
//! let decoded = auth.verify_token(&token).unwrap();
//! assert_eq!(decoded.user_id().unwrap(), 7);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
