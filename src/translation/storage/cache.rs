//! 词典缓存
//!
//! 在固定键下保存一份带时间戳的词典。过期条目在读取时惰性忽略，
//! 不做主动清理；存储不可读或内容损坏都按未命中处理。

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::backend::Storage;
use crate::translation::dictionary::Mapping;
use crate::translation::error::{helpers, TranslationError, TranslationResult};

/// 缓存条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub mapping: Mapping,
    pub stored_at_ms: i64,
}

impl CacheEntry {
    pub fn new(mapping: Mapping, stored_at_ms: i64) -> Self {
        Self {
            mapping,
            stored_at_ms,
        }
    }

    /// 条目在 `now_ms` 时刻是否仍然有效
    pub fn is_valid_at(&self, now_ms: i64, ttl: Duration) -> bool {
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        now_ms.saturating_sub(self.stored_at_ms) < ttl_ms
    }
}

/// 单键词典缓存
#[derive(Clone)]
pub struct DictionaryCache {
    storage: Arc<dyn Storage>,
    key: String,
    ttl: Duration,
}

impl DictionaryCache {
    pub fn new(storage: Arc<dyn Storage>, key: impl Into<String>, ttl: Duration) -> Self {
        Self {
            storage,
            key: key.into(),
            ttl,
        }
    }

    /// 读取当前有效的缓存条目
    pub fn read(&self) -> Option<CacheEntry> {
        self.read_at(now_ms())
    }

    /// 以给定时刻判断有效性读取缓存条目
    pub fn read_at(&self, now_ms: i64) -> Option<CacheEntry> {
        let bytes = match self.storage.get(&self.key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                tracing::debug!("词典缓存未命中: {}", self.key);
                return None;
            }
            Err(e) => {
                helpers::log_error(&e);
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_slice(&bytes) {
            Ok(entry) => entry,
            Err(e) => {
                let error = TranslationError::CacheReadError(format!("缓存内容损坏: {}", e));
                helpers::log_error(&error);
                return None;
            }
        };

        if entry.mapping.is_empty() {
            tracing::debug!("缓存中的词典为空，忽略");
            return None;
        }

        if !entry.is_valid_at(now_ms, self.ttl) {
            tracing::debug!(
                "词典缓存已过期 (写入于 {}，TTL {}s)",
                entry.stored_at_ms,
                self.ttl.as_secs()
            );
            return None;
        }

        Some(entry)
    }

    /// 以当前时间写入词典，覆盖已有条目
    pub fn write(&self, mapping: &Mapping) -> TranslationResult<()> {
        self.write_at(mapping, now_ms())
    }

    pub fn write_at(&self, mapping: &Mapping, now_ms: i64) -> TranslationResult<()> {
        let entry = CacheEntry::new(mapping.clone(), now_ms);
        let bytes = serde_json::to_vec(&entry).map_err(helpers::cache_error)?;
        self.storage.set(&self.key, &bytes)?;
        tracing::debug!("词典已写入缓存: {} 个词条", mapping.len());
        Ok(())
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
