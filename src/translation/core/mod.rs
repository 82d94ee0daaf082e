//! 翻译系统核心模块
//!
//! - **服务层** (`service.rs`): 会话级入口，获取词典后持有引擎
//! - **引擎层** (`engine.rs`): 同步的逐词元替换翻译
//!
//! ```text
//! TranslatorService (service.rs)
//!     ├── DictionaryAcquirer (dictionary/acquirer.rs)
//!     │       ├── DictionaryCache (storage/cache.rs)
//!     │       └── SourceFetcher (dictionary/fetcher.rs)
//!     └── SubstitutionEngine (engine.rs)
//!             └── PhraseMatcher (pipeline/phrase.rs)
//! ```

pub mod engine;
pub mod service;

pub use engine::{EngineConfig, EngineStats, SubstitutionEngine};
pub use service::{PageTranslation, ServiceStatus, TranslatorService};
