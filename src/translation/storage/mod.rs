//! 存储模块
//!
//! 提供键值存储后端和单键词典缓存。

pub mod backend;
pub mod cache;

pub use backend::{MemoryStorage, RedbStorage, Storage};
pub use cache::{CacheEntry, DictionaryCache};
