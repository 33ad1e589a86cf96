use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Password hashing implementation (Argon2id).
///
/// Every hash gets a fresh random salt, so equal plaintexts never produce
/// equal stored hashes. Verification re-derives the hash with the salt and
/// parameters embedded in the stored PHC string.
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password for storage.
    ///
    /// # Returns
    /// PHC string format hash (algorithm, parameters, salt, and digest)
    ///
    /// # Errors
    /// * `HashingFailed` - underlying entropy or primitive failure
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a candidate password against a stored hash.
    ///
    /// # Arguments
    /// * `stored_hash` - hash in PHC string format, as persisted
    /// * `candidate` - plaintext password submitted by the caller
    ///
    /// # Errors
    /// * `Mismatch` - candidate does not match the stored hash
    /// * `InvalidHash` - stored hash cannot be parsed
    pub fn verify(&self, stored_hash: &str, candidate: &str) -> Result<(), PasswordError> {
        let parsed_hash = PasswordHash::new(stored_hash)
            .map_err(|e| PasswordError::InvalidHash(e.to_string()))?;

        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed_hash)
            .map_err(|e| match e {
                argon2::password_hash::Error::Password => PasswordError::Mismatch,
                other => PasswordError::InvalidHash(other.to_string()),
            })
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
