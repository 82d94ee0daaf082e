//! 缓存系统集成测试
//!
//! 测试 redb 持久化缓存与 TTL 行为

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use dict_translator::translation::dictionary::{DictionaryOrigin, Mapping};
use dict_translator::translation::storage::{DictionaryCache, RedbStorage, Storage};
use dict_translator::translation::{TranslatorConfig, TranslatorService};

const HOUR: Duration = Duration::from_secs(3600);

fn sample() -> Mapping {
    [("hello", "你好"), ("look for", "寻找"), ("door", "门")]
        .into_iter()
        .collect()
}

#[test]
fn test_redb_cache_roundtrip_across_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dictionary.redb");

    {
        let storage = Arc::new(RedbStorage::open(&path).unwrap());
        let cache = DictionaryCache::new(storage, "dict", HOUR);
        cache.write_at(&sample(), 1_000).unwrap();
    }

    let storage = Arc::new(RedbStorage::open(&path).unwrap());
    let cache = DictionaryCache::new(storage, "dict", HOUR);
    let entry = cache.read_at(1_000 + 1_000).expect("entry within ttl");
    assert_eq!(entry.mapping, sample());
}

#[test]
fn test_redb_cache_expires_after_ttl() {
    let dir = TempDir::new().unwrap();
    let storage = Arc::new(RedbStorage::open(dir.path().join("d.redb")).unwrap());
    let cache = DictionaryCache::new(storage, "dict", HOUR);

    cache.write_at(&sample(), 0).unwrap();
    assert!(cache.read_at(HOUR.as_millis() as i64 - 1).is_some());
    assert!(cache.read_at(HOUR.as_millis() as i64).is_none());
}

#[test]
fn test_keys_are_independent() {
    let dir = TempDir::new().unwrap();
    let storage: Arc<dyn Storage> = Arc::new(RedbStorage::open(dir.path().join("d.redb")).unwrap());

    let first = DictionaryCache::new(Arc::clone(&storage), "first", HOUR);
    let second = DictionaryCache::new(Arc::clone(&storage), "second", HOUR);

    first.write(&sample()).unwrap();
    assert!(first.read().is_some());
    assert!(second.read().is_none());
}

#[test]
fn test_corrupt_bytes_are_a_miss() {
    let dir = TempDir::new().unwrap();
    let storage = Arc::new(RedbStorage::open(dir.path().join("d.redb")).unwrap());
    storage.set("dict", b"\x00\x01 definitely not json").unwrap();

    let cache = DictionaryCache::new(storage, "dict", HOUR);
    assert!(cache.read().is_none());
}

/// 服务从磁盘缓存启动，不访问网络
#[tokio::test]
async fn test_service_starts_from_persistent_cache() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cache").join("dictionary.redb");

    let config = TranslatorConfig {
        sources: vec!["http://127.0.0.1:9/unreachable.json".to_string()],
        fetch_timeout_ms: 100,
        cache_path: path.to_string_lossy().into_owned(),
        ..Default::default()
    };

    {
        let storage = Arc::new(RedbStorage::open(&path).unwrap());
        DictionaryCache::new(storage, config.cache_key.clone(), config.cache_ttl())
            .write(&sample())
            .unwrap();
    }

    let mut service = TranslatorService::from_config(config).await.unwrap();
    assert_eq!(service.origin(), &DictionaryOrigin::Cache);
    assert_eq!(service.status().entries, 3);
    assert_eq!(service.translate_text("Look for the door."), "寻找 the 门.");
}

#[tokio::test]
async fn test_offline_service_still_reads_cache() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dictionary.redb");

    let config = TranslatorConfig {
        offline: true,
        cache_path: path.to_string_lossy().into_owned(),
        ..Default::default()
    };

    {
        let storage = Arc::new(RedbStorage::open(&path).unwrap());
        DictionaryCache::new(storage, config.cache_key.clone(), config.cache_ttl())
            .write(&sample())
            .unwrap();
    }

    let service = TranslatorService::from_config(config).await.unwrap();
    assert_eq!(service.origin(), &DictionaryOrigin::Cache);
    assert!(!service.status().is_online);
}
