use crate::*;
use std::sync::Arc;
use std::time::Duration;

fn manual_cache(max_size: usize, ttl_secs: u64) -> (MemoryCache<String, Arc<ManualClock>>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let cache = MemoryCache::with_clock(max_size, Duration::from_secs(ttl_secs), Arc::clone(&clock));
    (cache, clock)
}

// ========== Cache ==========

#[test]
fn test_cache_set_get() {
    let (mut cache, _clock) = manual_cache(10, 60);
    cache.set("a", "value".to_string());
    assert_eq!(cache.get("a").as_deref(), Some("value"));
    assert!(cache.get("missing").is_none());
}

#[test]
fn test_cache_expiry() {
    let (mut cache, clock) = manual_cache(10, 60);
    cache.set("a", "value".to_string());
    clock.advance(Duration::from_secs(61));
    assert!(cache.get("a").is_none());
}

#[test]
fn test_cache_per_entry_ttl() {
    let (mut cache, clock) = manual_cache(10, 60);
    cache.set_with_ttl("short", "x".to_string(), Duration::from_secs(5));
    cache.set("long", "y".to_string());
    clock.advance(Duration::from_secs(10));
    assert!(cache.get("short").is_none());
    assert!(cache.get("long").is_some());
}

#[test]
fn test_cache_evicts_oldest_at_capacity() {
    let (mut cache, _clock) = manual_cache(2, 60);
    cache.set("first", "1".to_string());
    cache.set("second", "2".to_string());
    cache.set("third", "3".to_string());
    assert!(cache.get("first").is_none());
    assert!(cache.get("second").is_some());
    assert!(cache.get("third").is_some());
}

#[test]
fn test_cache_overwrite_keeps_age() {
    let (mut cache, _clock) = manual_cache(2, 60);
    cache.set("first", "1".to_string());
    cache.set("second", "2".to_string());
    // Overwriting does not refresh insertion order.
    cache.set("first", "1b".to_string());
    cache.set("third", "3".to_string());
    assert!(cache.get("first").is_none());
    assert_eq!(cache.get("second").as_deref(), Some("2"));
}

#[test]
fn test_cache_len_sweeps_expired() {
    let (mut cache, clock) = manual_cache(10, 60);
    cache.set("a", "1".to_string());
    cache.set("b", "2".to_string());
    assert_eq!(cache.len(), 2);
    clock.advance(Duration::from_secs(61));
    assert_eq!(cache.len(), 0);
    assert!(cache.is_empty());
}

#[test]
fn test_cache_remove_and_clear() {
    let (mut cache, _clock) = manual_cache(10, 60);
    cache.set("a", "1".to_string());
    assert!(cache.remove("a"));
    assert!(!cache.remove("a"));
    cache.set("b", "2".to_string());
    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn test_cache_close_releases_entries() {
    let (mut cache, _clock) = manual_cache(10, 60);
    cache.set("a", "1".to_string());
    cache.close();
    assert!(cache.get("a").is_none());
}

#[test]
fn test_cache_key_builder() {
    assert_eq!(cache_key("book", &["42", "segments"]), "book:42:segments");
}

// ========== Rate limiter ==========

fn manual_limiter(
    window_secs: u64,
    max_requests: usize,
    max_tokens: usize,
) -> (RateLimiter<Arc<ManualClock>>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let config = RateLimitConfig {
        window: Duration::from_secs(window_secs),
        max_requests,
        max_tokens,
    };
    (RateLimiter::with_clock(config, Arc::clone(&clock)), clock)
}

#[test]
fn test_limiter_allows_within_budget() {
    let (mut limiter, _clock) = manual_limiter(60, 3, 100);
    assert!(limiter.check("ip1").allowed);
    assert!(limiter.check("ip1").allowed);
    let third = limiter.check("ip1");
    assert!(third.allowed);
    assert_eq!(third.remaining, 0);
}

#[test]
fn test_limiter_denies_over_budget() {
    let (mut limiter, _clock) = manual_limiter(60, 2, 100);
    limiter.check("ip1");
    limiter.check("ip1");
    let denied = limiter.check("ip1");
    assert!(!denied.allowed);
    assert_eq!(denied.remaining, 0);
}

#[test]
fn test_limiter_window_resets() {
    let (mut limiter, clock) = manual_limiter(60, 1, 100);
    assert!(limiter.check("ip1").allowed);
    assert!(!limiter.check("ip1").allowed);
    clock.advance(Duration::from_secs(61));
    assert!(limiter.check("ip1").allowed);
}

#[test]
fn test_limiter_tokens_independent() {
    let (mut limiter, _clock) = manual_limiter(60, 1, 100);
    assert!(limiter.check("ip1").allowed);
    assert!(limiter.check("ip2").allowed);
}

#[test]
fn test_limiter_evicts_oldest_token_at_capacity() {
    let (mut limiter, clock) = manual_limiter(60, 1, 2);
    limiter.check("ip1");
    clock.advance(Duration::from_secs(1));
    limiter.check("ip2");
    clock.advance(Duration::from_secs(1));
    // Capacity reached: ip1 (earliest reset) is evicted to admit ip3.
    limiter.check("ip3");
    assert!(limiter.check("ip1").allowed);
}

#[test]
fn test_limiter_reset_token() {
    let (mut limiter, _clock) = manual_limiter(60, 1, 100);
    assert!(limiter.check("ip1").allowed);
    limiter.reset("ip1");
    assert!(limiter.check("ip1").allowed);
}

#[test]
fn test_limiter_reset_after_counts_down() {
    let (mut limiter, clock) = manual_limiter(60, 5, 100);
    limiter.check("ip1");
    clock.advance(Duration::from_secs(20));
    let decision = limiter.check("ip1");
    assert_eq!(decision.reset_after, Duration::from_secs(40));
}
