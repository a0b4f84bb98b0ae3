//! Peppered Argon2id password hashing with a separately stored salt.

use argon2::{Algorithm, Argon2, Params, Version};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use subtle::ConstantTimeEq;

use usersvc_core::config::{Argon2Config, AuthConfig};
use usersvc_core::error::AppError;

/// Length of a freshly generated salt in bytes.
const SALT_LEN: usize = 16;

/// Length of the derived hash in bytes.
const HASH_LEN: usize = 32;

/// A hash and the salt it was derived with, both base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedPassword {
    /// Base64 Argon2id output.
    pub hash: String,
    /// Base64 random salt.
    pub salt: String,
}

/// Handles password hashing and verification using Argon2id.
///
/// Every hash is keyed with the process-wide pepper, so a leaked user table
/// is not enough to mount an offline attack.
#[derive(Clone)]
pub struct PasswordHasher {
    /// Secret mixed into every hash.
    pepper: Vec<u8>,
    /// Cost parameters.
    params: Params,
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl PasswordHasher {
    /// Creates a hasher from the auth configuration.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AppError> {
        Self::new(config.password_secret.as_bytes(), &config.argon2)
    }

    /// Creates a hasher from a pepper and cost parameters.
    pub fn new(pepper: &[u8], cost: &Argon2Config) -> Result<Self, AppError> {
        if pepper.is_empty() {
            return Err(AppError::configuration("password secret must not be empty"));
        }
        let params = Params::new(
            cost.memory_kib,
            cost.iterations,
            cost.parallelism,
            Some(HASH_LEN),
        )
        .map_err(|e| AppError::configuration(format!("Invalid Argon2 parameters: {e}")))?;

        Ok(Self {
            pepper: pepper.to_vec(),
            params,
        })
    }

    /// Hashes a plaintext password with a fresh random salt.
    pub fn hash_password(&self, password: &str) -> Result<HashedPassword, AppError> {
        let salt: [u8; SALT_LEN] = rand::random();
        let hash = self.derive(password, &salt)?;

        Ok(HashedPassword {
            hash: STANDARD.encode(hash),
            salt: STANDARD.encode(salt),
        })
    }

    /// Verifies a plaintext password against a stored hash and salt.
    ///
    /// Returns `Ok(true)` if the password matches, `Ok(false)` if not.
    /// Errors only when the stored hash or salt is malformed.
    pub fn check_password(
        &self,
        password: &str,
        stored_hash: &str,
        stored_salt: &str,
    ) -> Result<bool, AppError> {
        let salt = STANDARD
            .decode(stored_salt)
            .map_err(|e| AppError::internal(format!("Stored salt is not valid base64: {e}")))?;
        if salt.len() < argon2::MIN_SALT_LEN {
            return Err(AppError::internal(format!(
                "Stored salt is too short: {} bytes",
                salt.len()
            )));
        }

        let expected = STANDARD
            .decode(stored_hash)
            .map_err(|e| AppError::internal(format!("Stored hash is not valid base64: {e}")))?;
        if expected.len() != HASH_LEN {
            return Err(AppError::internal(format!(
                "Stored hash has unexpected length: {} bytes",
                expected.len()
            )));
        }

        let computed = self.derive(password, &salt)?;
        Ok(bool::from(computed[..].ct_eq(&expected[..])))
    }

    fn derive(&self, password: &str, salt: &[u8]) -> Result<[u8; HASH_LEN], AppError> {
        let argon2 = Argon2::new_with_secret(
            &self.pepper,
            Algorithm::Argon2id,
            Version::V0x13,
            self.params.clone(),
        )
        .map_err(|e| AppError::internal(format!("Password hasher setup failed: {e}")))?;

        let mut out = [0u8; HASH_LEN];
        argon2
            .hash_password_into(password.as_bytes(), salt, &mut out)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;
        Ok(out)
    }
}
