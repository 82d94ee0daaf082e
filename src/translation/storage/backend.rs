//! 键值存储后端
//!
//! 词典缓存只依赖 `Storage` 接口：内存实现用于测试和无法打开缓存文件时的降级，
//! redb 实现把缓存持久化到磁盘。

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use redb::{Database, TableDefinition};

use crate::translation::error::{helpers, TranslationError, TranslationResult};

const STORAGE_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("dictionary_cache");

/// 持久化键值存储
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> TranslationResult<Option<Vec<u8>>>;
    fn set(&self, key: &str, value: &[u8]) -> TranslationResult<()>;
}

/// 内存存储
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> TranslationResult<Option<Vec<u8>>> {
        let entries = self.entries.read().map_err(read_error)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> TranslationResult<()> {
        let mut entries = self.entries.write().map_err(helpers::cache_error)?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

/// 基于 redb 的磁盘存储
pub struct RedbStorage {
    db: Database,
}

impl RedbStorage {
    /// 打开或创建缓存数据库，必要时创建父目录
    pub fn open<P: AsRef<Path>>(path: P) -> TranslationResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let db = Database::create(path).map_err(|e| {
            helpers::cache_error(format!("无法打开缓存数据库 {}: {}", path.display(), e))
        })?;
        tracing::debug!("已打开缓存数据库: {}", path.display());

        Ok(Self { db })
    }
}

impl Storage for RedbStorage {
    fn get(&self, key: &str) -> TranslationResult<Option<Vec<u8>>> {
        let txn = self.db.begin_read().map_err(read_error)?;
        let table = match txn.open_table(STORAGE_TABLE) {
            Ok(table) => table,
            // 尚未写入过任何条目
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(read_error(e)),
        };

        let value = table.get(key).map_err(read_error)?;
        Ok(value.map(|guard| guard.value().to_vec()))
    }

    fn set(&self, key: &str, value: &[u8]) -> TranslationResult<()> {
        let txn = self.db.begin_write().map_err(helpers::cache_error)?;
        {
            let mut table = txn.open_table(STORAGE_TABLE).map_err(helpers::cache_error)?;
            table.insert(key, value).map_err(helpers::cache_error)?;
        }
        txn.commit().map_err(helpers::cache_error)?;
        Ok(())
    }
}

fn read_error<E: std::fmt::Display>(error: E) -> TranslationError {
    TranslationError::CacheReadError(error.to_string())
}
