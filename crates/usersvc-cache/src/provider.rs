//! Cache manager that dispatches to the configured provider.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use usersvc_core::config::cache::CacheConfig;
use usersvc_core::error::AppError;
use usersvc_core::result::AppResult;
use usersvc_core::traits::cache::CacheProvider;

/// Cache manager that wraps the configured cache provider.
///
/// The provider is selected at construction time based on configuration.
/// Every operation is bounded by the configured timeout; an elapsed
/// timeout surfaces as a cache error.
#[derive(Debug, Clone)]
pub struct CacheManager {
    /// The inner cache provider.
    inner: Arc<dyn CacheProvider>,
    /// Upper bound for a single operation.
    timeout: Duration,
}

impl CacheManager {
    /// Create a new cache manager from configuration.
    pub async fn new(config: &CacheConfig) -> AppResult<Self> {
        let inner: Arc<dyn CacheProvider> = match config.provider.as_str() {
            #[cfg(feature = "redis-backend")]
            "redis" => {
                info!("Initializing Redis cache provider");
                let client = crate::redis::RedisClient::connect(&config.redis).await?;
                Arc::new(crate::redis::RedisCacheProvider::new(client))
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory cache provider");
                Arc::new(crate::memory::MemoryCacheProvider::new(&config.memory))
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown cache provider: '{other}'. Supported: memory, redis"
                )));
            }
        };

        Ok(Self {
            inner,
            timeout: config.operation_timeout(),
        })
    }

    /// Create a cache manager from an existing provider (for testing).
    pub fn from_provider(provider: Arc<dyn CacheProvider>, timeout: Duration) -> Self {
        Self {
            inner: provider,
            timeout,
        }
    }

    /// Get a reference to the inner provider.
    pub fn provider(&self) -> &dyn CacheProvider {
        self.inner.as_ref()
    }

    async fn bounded<T>(
        &self,
        op: &'static str,
        key: &str,
        fut: impl Future<Output = AppResult<T>> + Send,
    ) -> AppResult<T> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    op,
                    key,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Cache operation timed out"
                );
                Err(AppError::cache(format!(
                    "Cache {op} timed out after {}ms",
                    self.timeout.as_millis()
                )))
            }
        }
    }
}

#[async_trait]
impl CacheProvider for CacheManager {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.bounded("get", key, self.inner.get(key)).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.bounded("set", key, self.inner.set(key, value, ttl)).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.bounded("delete", key, self.inner.delete(key)).await
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        self.bounded("exists", key, self.inner.exists(key)).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.bounded("health_check", "", self.inner.health_check()).await
    }
}
