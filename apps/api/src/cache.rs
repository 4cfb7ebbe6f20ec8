//! Read-through JSON cache in Redis for the public resource listings.
//! Every Redis failure is logged and treated as a miss.

use redis::AsyncCommands;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

#[derive(Clone)]
pub struct ResponseCache {
    client: redis::Client,
    ttl_secs: u64,
}

impl ResponseCache {
    pub fn new(client: redis::Client, ttl_secs: u64) -> Self {
        Self { client, ttl_secs }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        if self.ttl_secs == 0 {
            return None;
        }
        let mut conn = match self.client.get_multiplexed_async_connection().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Cache unavailable, reading through: {e}");
                return None;
            }
        };
        let raw: Option<String> = match conn.get(key).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Cache GET {key} failed: {e}");
                return None;
            }
        };
        let value = serde_json::from_str(&raw?)
            .map_err(|e| warn!("Discarding undecodable cache entry {key}: {e}"))
            .ok()?;
        debug!("Cache hit {key}");
        Some(value)
    }

    pub async fn put_json<T: Serialize>(&self, key: &str, value: &T) {
        if self.ttl_secs == 0 {
            return;
        }
        let payload = match serde_json::to_string(value) {
            Ok(p) => p,
            Err(e) => {
                warn!("Cache encode for {key} failed: {e}");
                return;
            }
        };
        let result: redis::RedisResult<()> = async {
            let mut conn = self.client.get_multiplexed_async_connection().await?;
            conn.set_ex(key, payload, self.ttl_secs).await
        }
        .await;
        if let Err(e) = result {
            warn!("Cache SET {key} failed: {e}");
        }
    }
}

/// Builds a cache key from a prefix and the (already normalised) query parts.
pub fn cache_key(prefix: &str, parts: &[Option<&str>]) -> String {
    let mut key = prefix.to_string();
    for part in parts {
        key.push(':');
        key.push_str(&part.unwrap_or("").to_lowercase());
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_is_positional() {
        assert_eq!(
            cache_key("resources:list", &[Some("Python"), None, Some("udemy")]),
            "resources:list:python::udemy"
        );
        assert_ne!(
            cache_key("resources:list", &[Some("free"), None]),
            cache_key("resources:list", &[None, Some("free")])
        );
    }

    #[tokio::test]
    async fn test_zero_ttl_disables_cache() {
        let client = redis::Client::open("redis://127.0.0.1:1/").unwrap();
        let cache = ResponseCache::new(client, 0);
        cache.put_json("k", &vec![1, 2, 3]).await;
        assert_eq!(cache.get_json::<Vec<i32>>("k").await, None);
    }
}
