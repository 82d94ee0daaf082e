//! 词典获取器
//!
//! 按 缓存 → 网络源竞速 → 内置词典 的顺序降级，获取过程本身永不失败。
//!
//! ## 竞速
//! 所有源同时发起，每次尝试各自受超时约束。编排只有一轮：每次取出最先完成的尝试，
//! 成功则立即胜出，失败则继续等待剩余尝试。多个尝试在同一次轮询中完成时，
//! 配置顺序靠前的源优先。胜出后其余尝试被丢弃，结果不再使用，计时器随之释放，
//! 因此缓存只会被写入一次。

use std::sync::Arc;
use std::time::Duration;

use futures::future::{select_all, BoxFuture, FutureExt};

use super::builtin::builtin_mapping;
use super::fetcher::{SourceFetcher, Transport};
use super::mapping::Mapping;
use crate::translation::config::{constants, TranslatorConfig};
use crate::translation::error::{helpers, TranslationResult};
use crate::translation::storage::{DictionaryCache, Storage};

/// 获取器配置
#[derive(Debug, Clone)]
pub struct AcquirerConfig {
    /// 候选词典源，顺序仅用于同时完成时的优先级
    pub sources: Vec<String>,
    /// 每次尝试的超时
    pub fetch_timeout: Duration,
    pub cache_key: String,
    pub cache_ttl: Duration,
}

impl Default for AcquirerConfig {
    fn default() -> Self {
        Self {
            sources: constants::DEFAULT_SOURCES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            fetch_timeout: constants::DEFAULT_FETCH_TIMEOUT,
            cache_key: constants::DEFAULT_CACHE_KEY.to_string(),
            cache_ttl: constants::DEFAULT_CACHE_TTL,
        }
    }
}

impl From<&TranslatorConfig> for AcquirerConfig {
    fn from(config: &TranslatorConfig) -> Self {
        Self {
            // 离线模式下不尝试任何网络源
            sources: if config.offline {
                Vec::new()
            } else {
                config.sources.clone()
            },
            fetch_timeout: config.fetch_timeout(),
            cache_key: config.cache_key.clone(),
            cache_ttl: config.cache_ttl(),
        }
    }
}

/// 词典来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionaryOrigin {
    /// 来自网络源（在配置中的下标与 URL）
    Network { source_index: usize, url: String },
    /// 来自未过期的缓存
    Cache,
    /// 内置基础词典
    BuiltIn,
}

impl DictionaryOrigin {
    pub fn describe(&self) -> String {
        match self {
            DictionaryOrigin::Network { url, .. } => format!("网络词典 ({})", url),
            DictionaryOrigin::Cache => "本地缓存词典".to_string(),
            DictionaryOrigin::BuiltIn => "内置基础词典".to_string(),
        }
    }
}

/// 一次获取的结果
#[derive(Debug, Clone)]
pub struct Acquisition {
    pub mapping: Arc<Mapping>,
    pub origin: DictionaryOrigin,
}

impl Acquisition {
    pub fn from_network(&self) -> bool {
        matches!(self.origin, DictionaryOrigin::Network { .. })
    }
}

/// 词典获取器
pub struct DictionaryAcquirer {
    sources: Vec<String>,
    fetcher: SourceFetcher,
    cache_key: String,
    cache_ttl: Duration,
    cache: Option<DictionaryCache>,
    fallback: Arc<Mapping>,
}

impl DictionaryAcquirer {
    /// 创建不带缓存、以内置词典兜底的获取器
    pub fn new(config: AcquirerConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            sources: config.sources,
            fetcher: SourceFetcher::new(transport, config.fetch_timeout),
            cache_key: config.cache_key,
            cache_ttl: config.cache_ttl,
            cache: None,
            fallback: Arc::new(builtin_mapping()),
        }
    }

    /// 使用给定存储作为词典缓存
    pub fn with_storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.cache = Some(DictionaryCache::new(
            storage,
            self.cache_key.clone(),
            self.cache_ttl,
        ));
        self
    }

    /// 替换兜底词典
    pub fn with_fallback(mut self, mapping: Mapping) -> Self {
        self.fallback = Arc::new(mapping);
        self
    }

    /// 获取当前会话使用的词典
    pub async fn acquire(&self) -> Acquisition {
        if let Some(entry) = self.cache.as_ref().and_then(DictionaryCache::read) {
            tracing::info!("使用缓存词典: {} 个词条", entry.mapping.len());
            return Acquisition {
                mapping: Arc::new(entry.mapping),
                origin: DictionaryOrigin::Cache,
            };
        }

        if let Some((source_index, mapping)) = self.race_sources().await {
            let url = self.sources[source_index].clone();
            tracing::info!("词典源 {} 加载成功: {} 个词条", url, mapping.len());

            if let Some(cache) = &self.cache {
                if let Err(e) = cache.write(&mapping) {
                    helpers::log_error(&e);
                }
            }

            return Acquisition {
                mapping: Arc::new(mapping),
                origin: DictionaryOrigin::Network { source_index, url },
            };
        }

        if self.sources.is_empty() {
            tracing::info!("未配置词典源，使用内置基础词典 ({} 个词条)", self.fallback.len());
        } else {
            tracing::warn!(
                "所有词典源均加载失败，使用内置基础词典 ({} 个词条)",
                self.fallback.len()
            );
        }
        Acquisition {
            mapping: Arc::clone(&self.fallback),
            origin: DictionaryOrigin::BuiltIn,
        }
    }

    /// 竞速所有源，返回胜出源的下标和词典
    async fn race_sources(&self) -> Option<(usize, Mapping)> {
        if self.sources.is_empty() {
            tracing::debug!("没有配置词典源，跳过网络加载");
            return None;
        }

        let mut pending: Vec<BoxFuture<'_, (usize, TranslationResult<Mapping>)>> = self
            .sources
            .iter()
            .enumerate()
            .map(|(index, url)| {
                let fetcher = &self.fetcher;
                async move { (index, fetcher.fetch(url).await) }.boxed()
            })
            .collect();

        tracing::debug!("并行尝试 {} 个词典源", pending.len());

        while !pending.is_empty() {
            // 按引用竞速，失败的尝试按位置移除，剩余尝试保持配置顺序
            let ((index, result), position, _) = select_all(pending.iter_mut()).await;
            match result {
                Ok(mapping) => return Some((index, mapping)),
                Err(e) => {
                    helpers::log_error(&e.with_context(format!("词典源 {}", index)));
                    drop(pending.remove(position));
                }
            }
        }

        None
    }
}
