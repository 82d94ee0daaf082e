//! 词典替换翻译模块
//!
//! 提供完整的翻译功能，采用清晰的模块化架构：
//! - **config**: 配置管理
//! - **core**: 翻译服务和替换引擎
//! - **dictionary**: 词典映射、内置词典与多源获取
//! - **pipeline**: 分句、分词与短语匹配
//! - **storage**: 词典缓存与持久化存储
//! - **error**: 错误处理
//!
//! # 基本用法
//!
//! ```rust,no_run
//! use dict_translator::translation::{TranslatorConfig, TranslatorService};
//!
//! # async fn example() -> dict_translator::TranslationResult<()> {
//! let config = TranslatorConfig {
//!     offline: true,
//!     ..Default::default()
//! };
//! let mut service = TranslatorService::from_config(config).await?;
//! assert_eq!(service.translate_text("Find the door."), "找到 the 门.");
//! # Ok(())
//! # }
//! ```

/// 配置管理模块
pub mod config;

/// 核心模块 - 翻译服务与替换引擎
pub mod core;

/// 词典模块 - 映射表、内置词典和网络获取
pub mod dictionary;

/// 错误处理模块
pub mod error;

/// 文本处理管道模块
pub mod pipeline;

/// 存储模块 - 词典缓存
pub mod storage;

pub use config::{constants, ConfigManager, TranslatorConfig};
pub use core::{
    EngineConfig, EngineStats, PageTranslation, ServiceStatus, SubstitutionEngine,
    TranslatorService,
};
pub use dictionary::{
    builtin_mapping, Acquisition, AcquirerConfig, DictionaryAcquirer, DictionaryOrigin,
    HttpTransport, Lexicon, Mapping, SourceFetcher, Transport, BUILTIN_VERSION,
};
pub use error::{ErrorSeverity, TranslationError, TranslationResult};
pub use storage::{CacheEntry, DictionaryCache, MemoryStorage, RedbStorage, Storage};
