//! Runs against a real Redis in a container; needs Docker.
//! Run with `cargo test -p titleparser-cache -- --ignored`.

use jiff::Timestamp;
use redis::AsyncCommands;
use titleparser_cache::{LayeredCache, MokaTitleCache, RedisTitleCache};
use titleparser_core::{CacheEntry, HttpStatusError, ResolveError, TitleCache};
use titleparser_test_infra::redis::RedisServer;

fn entry_expiring_in(title: &str, secs: i64) -> CacheEntry {
    let now = Timestamp::now().as_second();
    CacheEntry {
        title: title.to_string(),
        added: now,
        ttl: now + secs,
        error: None,
    }
}

async fn start() -> (RedisServer, RedisTitleCache) {
    let server = RedisServer::start()
        .await
        .expect("Failed to start Redis container");
    let url = server.url().await.expect("Failed to get Redis url");
    let cache = RedisTitleCache::connect(&url)
        .await
        .expect("Failed to connect to Redis");
    (server, cache)
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_redis_cache_basic_get_put() {
    let (_server, cache) = start().await;
    let entry = entry_expiring_in("Example Page", 3600);

    assert!(cache.get("https://example.com").await.unwrap().is_none());

    cache.put("https://example.com", &entry).await.unwrap();

    let cached = cache.get("https://example.com").await.unwrap();
    assert_eq!(cached, Some(entry));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_redis_cache_stores_wire_format_with_expiry() {
    let (server, cache) = start().await;
    let entry = entry_expiring_in("Example Page", 3600);

    cache.put("https://example.com", &entry).await.unwrap();

    let mut conn = server.connection().await.unwrap();
    let raw: String = conn.get("https://example.com").await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["title"], "Example Page");
    assert_eq!(value["added"], entry.added);
    assert_eq!(value["ttl"], entry.ttl);
    assert!(value.get("error").is_none());

    let expires_in: i64 = conn.ttl("https://example.com").await.unwrap();
    assert!(expires_in > 3500 && expires_in <= 3600, "got {expires_in}");
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_redis_cache_applies_key_prefix() {
    let (server, cache) = start().await;
    let cache = cache.with_key_prefix("tp:title:");
    let entry = entry_expiring_in("Prefixed", 3600);

    cache.put("https://example.com", &entry).await.unwrap();

    let mut conn = server.connection().await.unwrap();
    let bare: bool = conn.exists("https://example.com").await.unwrap();
    let prefixed: bool = conn.exists("tp:title:https://example.com").await.unwrap();
    assert!(!bare);
    assert!(prefixed);
    assert_eq!(cache.get("https://example.com").await.unwrap(), Some(entry));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_redis_cache_keeps_failure_classification() {
    let (_server, cache) = start().await;
    let mut entry = entry_expiring_in("", 3600);
    entry.error = Some(ResolveError::Http(HttpStatusError::Forbidden));

    cache.put("https://example.com/blocked", &entry).await.unwrap();

    let cached = cache
        .get("https://example.com/blocked")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        cached.error,
        Some(ResolveError::Http(HttpStatusError::Forbidden))
    );
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_redis_cache_skips_expired_entries() {
    let (server, cache) = start().await;

    cache
        .put("https://example.com/old", &entry_expiring_in("Old", -10))
        .await
        .unwrap();

    let mut conn = server.connection().await.unwrap();
    let exists: bool = conn.exists("https://example.com/old").await.unwrap();
    assert!(!exists);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_redis_cache_rejects_garbage() {
    let (server, cache) = start().await;

    let mut conn = server.connection().await.unwrap();
    let _: () = conn.set("https://example.com/bad", "not json").await.unwrap();

    assert!(cache.get("https://example.com/bad").await.is_err());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_layered_cache_backfills_from_redis() {
    let (_server, redis) = start().await;
    let entry = entry_expiring_in("Example Page", 3600);
    redis.put("https://example.com", &entry).await.unwrap();

    let cache = LayeredCache::new(MokaTitleCache::new(), redis);
    assert_eq!(
        cache.get("https://example.com").await.unwrap(),
        Some(entry.clone())
    );
    assert_eq!(
        cache.l1().get("https://example.com").await.unwrap(),
        Some(entry)
    );
}
