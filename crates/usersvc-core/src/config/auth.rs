//! Authentication configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Token signing, token lifetime, and password hashing configuration.
///
/// Secrets have no defaults; they must come from a config file or the
/// environment.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC-SHA256 secret for access tokens.
    pub access_secret: String,
    /// HMAC-SHA256 secret for refresh tokens. Must differ from `access_secret`.
    pub refresh_secret: String,
    /// Process-wide secret mixed into every password hash.
    pub password_secret: String,
    /// Access token lifetime in seconds.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_seconds: u64,
    /// Refresh token lifetime in seconds.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_seconds: u64,
    /// Clock skew tolerated when validating `exp`, in seconds.
    #[serde(default)]
    pub jwt_leeway_seconds: u64,
    /// Argon2 cost parameters.
    #[serde(default)]
    pub argon2: Argon2Config,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("access_token_ttl_seconds", &self.access_token_ttl_seconds)
            .field("refresh_token_ttl_seconds", &self.refresh_token_ttl_seconds)
            .field("jwt_leeway_seconds", &self.jwt_leeway_seconds)
            .field("argon2", &self.argon2)
            .finish_non_exhaustive()
    }
}

impl AuthConfig {
    /// Access token lifetime.
    pub fn access_ttl(&self) -> Duration {
        Duration::from_secs(self.access_token_ttl_seconds)
    }

    /// Refresh token lifetime.
    pub fn refresh_ttl(&self) -> Duration {
        Duration::from_secs(self.refresh_token_ttl_seconds)
    }

    /// Rejects configurations that would break token separation or pairing.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.access_secret.is_empty()
            || self.refresh_secret.is_empty()
            || self.password_secret.is_empty()
        {
            return Err(AppError::configuration(
                "auth secrets must not be empty",
            ));
        }
        if self.access_secret == self.refresh_secret {
            return Err(AppError::configuration(
                "access_secret and refresh_secret must differ",
            ));
        }
        if self.access_token_ttl_seconds == 0 {
            return Err(AppError::configuration(
                "access_token_ttl_seconds must be positive",
            ));
        }
        if self.access_token_ttl_seconds >= self.refresh_token_ttl_seconds {
            return Err(AppError::configuration(format!(
                "access token TTL ({}s) must be shorter than refresh token TTL ({}s)",
                self.access_token_ttl_seconds, self.refresh_token_ttl_seconds
            )));
        }
        Ok(())
    }
}

/// Argon2id cost parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Argon2Config {
    /// Memory cost in KiB.
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    /// Number of passes.
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Degree of parallelism.
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

impl Default for Argon2Config {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

fn default_access_ttl() -> u64 {
    3600
}

fn default_refresh_ttl() -> u64 {
    86_400
}

fn default_memory_kib() -> u32 {
    19_456
}

fn default_iterations() -> u32 {
    2
}

fn default_parallelism() -> u32 {
    1
}
