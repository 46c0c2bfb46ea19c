//! Access-Token Cache
//!
//! Zoho access tokens live one hour; the cache keeps the current token and
//! hands it out until a safety margin before expiry. Holding the mutex
//! across a refresh serializes concurrent expired-token requests within
//! this process.

use std::future::Future;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Refresh this long before the token actually expires.
const EXPIRY_MARGIN: Duration = Duration::from_secs(5 * 60);

#[derive(Clone, Debug)]
struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// Process-wide cache for one access token.
#[derive(Default)]
pub(crate) struct TokenCache {
    slot: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Return the cached token, or refresh through `refresh` when absent
    /// or inside the expiry margin.
    pub(crate) async fn get_or_refresh<F, Fut, E>(&self, refresh: F) -> Result<String, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(String, Duration), E>>,
    {
        let mut slot = self.slot.lock().await;

        if let Some(token) = slot.as_ref()
            && Instant::now() < token.expires_at
        {
            return Ok(token.value.clone());
        }

        let (value, lifetime) = refresh().await?;
        let expires_at = Instant::now() + lifetime.saturating_sub(EXPIRY_MARGIN);

        *slot = Some(CachedToken {
            value: value.clone(),
            expires_at,
        });

        tracing::debug!(lifetime_secs = lifetime.as_secs(), "Refreshed Zoho access token");

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_token_reused_until_expiry() {
        let cache = TokenCache::new();

        let first: Result<_, ()> = cache
            .get_or_refresh(|| async { Ok(("tok_1".to_string(), Duration::from_secs(3600))) })
            .await;
        assert_eq!(first.unwrap(), "tok_1");

        // Second call must come from the cache, not the refresh closure.
        let second: Result<_, ()> = cache
            .get_or_refresh(|| async { panic!("refresh should not run") })
            .await;
        assert_eq!(second.unwrap(), "tok_1");
    }

    #[tokio::test]
    async fn test_short_lived_token_refreshed() {
        let cache = TokenCache::new();

        // Lifetime below the margin expires immediately.
        let _: Result<_, ()> = cache
            .get_or_refresh(|| async { Ok(("tok_1".to_string(), Duration::from_secs(10))) })
            .await;

        let second: Result<_, ()> = cache
            .get_or_refresh(|| async { Ok(("tok_2".to_string(), Duration::from_secs(3600))) })
            .await;
        assert_eq!(second.unwrap(), "tok_2");
    }

    #[tokio::test]
    async fn test_refresh_error_propagates_and_caches_nothing() {
        let cache = TokenCache::new();

        let failed: Result<String, &str> =
            cache.get_or_refresh(|| async { Err("upstream down") }).await;
        assert!(failed.is_err());

        let retry: Result<_, &str> = cache
            .get_or_refresh(|| async { Ok(("tok_1".to_string(), Duration::from_secs(3600))) })
            .await;
        assert_eq!(retry.unwrap(), "tok_1");
    }
}
