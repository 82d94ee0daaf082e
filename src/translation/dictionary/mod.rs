//! 词典模块
//!
//! - **mapping**: 词典映射表与查找规则
//! - **builtin**: 内置基础词典
//! - **fetcher**: 单个词典源的有界获取
//! - **acquirer**: 缓存、网络竞速与内置词典的降级编排

pub mod acquirer;
pub mod builtin;
pub mod fetcher;
pub mod mapping;

pub use acquirer::{Acquisition, AcquirerConfig, DictionaryAcquirer, DictionaryOrigin};
pub use builtin::{builtin_mapping, BUILTIN_VERSION};
pub use fetcher::{HttpTransport, SourceFetcher, Transport};
pub use mapping::{Lexicon, Mapping};
