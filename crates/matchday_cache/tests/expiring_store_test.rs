//! Tests for the expiring store.

use matchday_cache::{ExpiringStore, ExpiringStoreConfig, ExpiringStoreConfigBuilder};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
struct ChatFlags {
    on_fire_mode: bool,
}

const HALF_HOUR: Duration = Duration::from_secs(30 * 60);

#[test]
fn test_never_written_key_is_absent() {
    let store: ExpiringStore<ChatFlags> = ExpiringStore::new("chat_preferences", HALF_HOUR);

    assert!(store.get("100").is_none());
    assert!(store.get("").is_none());
    assert!(store.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_put_then_get_within_validity() {
    let store = ExpiringStore::new("chat_preferences", HALF_HOUR);

    store.put("100", ChatFlags { on_fire_mode: true });
    tokio::time::advance(Duration::from_secs(10 * 60)).await;

    assert_eq!(store.get("100"), Some(ChatFlags { on_fire_mode: true }));
}

#[tokio::test(start_paused = true)]
async fn test_entry_expires_after_validity() {
    let store = ExpiringStore::new("chat_preferences", HALF_HOUR);

    store.put("100", ChatFlags { on_fire_mode: true });

    tokio::time::advance(Duration::from_secs(10 * 60)).await;
    assert_eq!(store.get("100"), Some(ChatFlags { on_fire_mode: true }));

    tokio::time::advance(Duration::from_secs(21 * 60)).await;
    assert_eq!(store.get("100"), None);
}

#[tokio::test(start_paused = true)]
async fn test_exact_validity_boundary_is_fresh() {
    let store = ExpiringStore::new("competitions", Duration::from_secs(200 * 60));
    store.put("competitions", vec!["PL", "CL"]);

    tokio::time::advance(Duration::from_secs(200 * 60)).await;
    assert_eq!(store.get("competitions"), Some(vec!["PL", "CL"]));

    tokio::time::advance(Duration::from_millis(1)).await;
    assert_eq!(store.get("competitions"), None);
}

#[tokio::test(start_paused = true)]
async fn test_expired_key_stays_absent() {
    let store = ExpiringStore::new("tables", Duration::from_secs(60));
    store.put("2021", 20u32);

    tokio::time::advance(Duration::from_secs(61)).await;
    assert_eq!(store.get("2021"), None);
    assert_eq!(store.len(), 0);

    assert_eq!(store.get("2021"), None);
}

#[tokio::test(start_paused = true)]
async fn test_put_overwrites_and_restarts_validity() {
    let store = ExpiringStore::new("matches", Duration::from_secs(60));
    store.put("2001", "first");

    tokio::time::advance(Duration::from_secs(45)).await;
    store.put("2001", "second");

    tokio::time::advance(Duration::from_secs(45)).await;
    assert_eq!(store.get("2001"), Some("second"));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_clones_share_entries() {
    let store = ExpiringStore::new("tables", Duration::from_secs(60));
    let writer = store.clone();

    writer.put("2021", 1u8);

    assert_eq!(store.get("2021"), Some(1));
}

#[tokio::test(start_paused = true)]
async fn test_purge_expired_removes_only_stale_entries() {
    let store = ExpiringStore::new("summaries", Duration::from_secs(60));
    store.put("2024-05-01", 1u8);

    tokio::time::advance(Duration::from_secs(30)).await;
    store.put("2024-05-02", 2u8);

    tokio::time::advance(Duration::from_secs(31)).await;
    assert_eq!(store.purge_expired(), 1);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("2024-05-02"), Some(2));
}

#[tokio::test(start_paused = true)]
async fn test_capacity_evicts_oldest_write() {
    let config = ExpiringStoreConfigBuilder::default()
        .validity_secs(300)
        .max_entries(Some(2))
        .build()
        .unwrap();
    let store = ExpiringStore::from_config("matches", &config);

    store.put("1", "a");
    tokio::time::advance(Duration::from_secs(1)).await;
    store.put("2", "b");
    tokio::time::advance(Duration::from_secs(1)).await;
    store.put("3", "c");

    assert_eq!(store.len(), 2);
    assert!(store.get("1").is_none()); // Evicted
    assert_eq!(store.get("2"), Some("b"));
    assert_eq!(store.get("3"), Some("c"));
}

#[tokio::test(start_paused = true)]
async fn test_capacity_prefers_expired_entries() {
    let store = ExpiringStore::new("matches", Duration::from_secs(60)).with_max_entries(2);

    store.put("stale", 0u8);
    tokio::time::advance(Duration::from_secs(50)).await;
    store.put("fresh", 1u8);
    tokio::time::advance(Duration::from_secs(20)).await;
    store.put("new", 2u8);

    assert_eq!(store.len(), 2);
    assert_eq!(store.get("fresh"), Some(1));
    assert_eq!(store.get("new"), Some(2));
}

#[test]
fn test_overwrite_in_full_store_evicts_nothing() {
    let store = ExpiringStore::new("matches", Duration::from_secs(60)).with_max_entries(2);

    store.put("1", 1u8);
    store.put("2", 2u8);
    store.put("2", 3u8);

    assert_eq!(store.get("1"), Some(1));
    assert_eq!(store.get("2"), Some(3));
}

#[tokio::test(start_paused = true)]
async fn test_purge_task_sweeps_cold_keys() {
    let store = ExpiringStore::new("summaries", Duration::from_secs(60));
    store.put("2024-05-01", 1u8);

    let handle = store.spawn_purge_task(Duration::from_secs(30));

    tokio::time::sleep(Duration::from_secs(95)).await;
    assert!(store.is_empty());

    handle.abort();
}

#[test]
fn test_config_defaults() {
    let config = ExpiringStoreConfig::default();

    assert_eq!(*config.validity_secs(), 300);
    assert_eq!(config.max_entries(), &None);
    assert_eq!(config.validity(), Duration::from_secs(300));

    let tuned = config.with_validity_secs(60).with_max_entries(Some(10));
    assert_eq!(tuned.validity(), Duration::from_secs(60));
    assert_eq!(tuned.max_entries(), &Some(10));
}
