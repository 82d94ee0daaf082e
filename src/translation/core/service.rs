//! 翻译服务
//!
//! 一个会话只获取一次词典，之后所有翻译都由同一个替换引擎完成。
//!
//! ```rust,no_run
//! use dict_translator::translation::{TranslatorConfig, TranslatorService};
//!
//! # async fn example() {
//! let mut service = TranslatorService::from_config(TranslatorConfig::default())
//!     .await
//!     .expect("http client");
//! println!("{}", service.translate_text("Find the door."));
//! # }
//! ```

use std::sync::Arc;
use std::time::Instant;

use crate::extract::TextSource;
use crate::translation::{
    config::TranslatorConfig,
    core::engine::{EngineConfig, EngineStats, SubstitutionEngine},
    dictionary::{AcquirerConfig, DictionaryAcquirer, DictionaryOrigin, HttpTransport},
    error::{TranslationError, TranslationResult},
    storage::{MemoryStorage, RedbStorage, Storage},
};

/// 服务状态快照
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceStatus {
    pub origin: DictionaryOrigin,
    pub entries: usize,
    pub is_online: bool,
    pub lookups: usize,
    pub memo_hits: usize,
    pub translations: usize,
    pub phrase_matches: usize,
}

impl ServiceStatus {
    /// 面向用户的一行状态描述
    pub fn summary(&self) -> String {
        match self.origin {
            DictionaryOrigin::BuiltIn => format!("使用内置词典 ({} 个词条)", self.entries),
            _ => format!("已加载 {} 个词条 ({})", self.entries, self.origin.describe()),
        }
    }
}

/// 一次页面翻译的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTranslation {
    pub original: String,
    pub translated: String,
}

/// 翻译服务
pub struct TranslatorService {
    engine: SubstitutionEngine,
    origin: DictionaryOrigin,
}

impl TranslatorService {
    /// 获取词典并创建引擎
    pub async fn start(config: &TranslatorConfig, acquirer: &DictionaryAcquirer) -> Self {
        let started = Instant::now();
        let acquisition = acquirer.acquire().await;

        tracing::info!(
            "词典就绪: {} 个词条, 来源 {}, 耗时 {:?}",
            acquisition.mapping.len(),
            acquisition.origin.describe(),
            started.elapsed()
        );

        let engine = SubstitutionEngine::new(
            Arc::clone(&acquisition.mapping),
            EngineConfig {
                memo_capacity: config.memo_capacity,
                is_online: !config.offline,
            },
        );

        Self {
            engine,
            origin: acquisition.origin,
        }
    }

    /// 按配置组装默认的传输层、存储和兜底词典后启动
    pub async fn from_config(config: TranslatorConfig) -> TranslationResult<Self> {
        let acquirer = Self::build_acquirer(&config)?;
        Ok(Self::start(&config, &acquirer).await)
    }

    /// 按配置组装词典获取器
    pub fn build_acquirer(config: &TranslatorConfig) -> TranslationResult<DictionaryAcquirer> {
        let acquirer = DictionaryAcquirer::new(
            AcquirerConfig::from(config),
            Arc::new(HttpTransport::new()?),
        );

        if !config.cache_enabled {
            return Ok(acquirer);
        }

        let storage: Arc<dyn Storage> = match RedbStorage::open(config.resolved_cache_path()) {
            Ok(storage) => Arc::new(storage),
            Err(e) => {
                tracing::warn!("无法打开缓存数据库，改用内存缓存: {}", e);
                Arc::new(MemoryStorage::new())
            }
        };

        Ok(acquirer.with_storage(storage))
    }

    /// 翻译一段文本
    pub fn translate_text(&mut self, text: &str) -> String {
        self.engine.translate(text)
    }

    /// 从来源提取文本并翻译
    pub fn translate_source(&mut self, source: &dyn TextSource) -> TranslationResult<PageTranslation> {
        let original = source
            .extract()
            .ok_or(TranslationError::NoTranslatableText)?;
        let translated = self.engine.translate(&original);

        Ok(PageTranslation {
            original,
            translated,
        })
    }

    pub fn origin(&self) -> &DictionaryOrigin {
        &self.origin
    }

    pub fn get_stats(&self) -> &EngineStats {
        self.engine.get_stats()
    }

    /// 当前状态
    pub fn status(&self) -> ServiceStatus {
        let stats = self.engine.get_stats();
        ServiceStatus {
            origin: self.origin.clone(),
            entries: self.engine.mapping().len(),
            is_online: self.engine.is_online(),
            lookups: stats.lookups(),
            memo_hits: stats.memo_hits(),
            translations: stats.translations(),
            phrase_matches: stats.phrase_matches(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::PlainTextSource;

    async fn offline_service() -> TranslatorService {
        let config = TranslatorConfig {
            offline: true,
            cache_enabled: false,
            ..Default::default()
        };
        TranslatorService::from_config(config).await.unwrap()
    }

    #[tokio::test]
    async fn test_offline_service_uses_builtin() {
        let mut service = offline_service().await;
        assert_eq!(service.origin(), &DictionaryOrigin::BuiltIn);
        assert_eq!(service.translate_text("Find the door."), "找到 the 门.");

        let status = service.status();
        assert!(!status.is_online);
        assert_eq!(status.translations, 1);
        assert!(status.summary().starts_with("使用内置词典"));
    }

    #[tokio::test]
    async fn test_translate_source() {
        let mut service = offline_service().await;

        let page = service
            .translate_source(&PlainTextSource::new("  Find the home in the city.  "))
            .unwrap();
        assert_eq!(page.original, "Find the home in the city.");
        assert_eq!(page.translated, "找到 the 家 in the 城市.");

        assert_eq!(
            service.translate_source(&PlainTextSource::new("tiny")),
            Err(TranslationError::NoTranslatableText)
        );
    }
}
