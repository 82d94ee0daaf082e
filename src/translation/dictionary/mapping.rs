//! 词典映射表
//!
//! 词条的键按原样存储，查找时先用小写并去除首尾空白的形式匹配，
//! 再回退到区分大小写的原样匹配。

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::translation::error::{TranslationError, TranslationResult};

/// 词条查找接口
///
/// 短语匹配器和替换引擎通过它访问词典，便于在引擎内部统计查找次数。
pub trait Lexicon {
    fn lookup(&self, term: &str) -> Option<&str>;
}

/// 源词到译词的映射表，激活后不再修改
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, String>", into = "HashMap<String, String>")]
pub struct Mapping {
    entries: HashMap<String, String>,
}

impl Mapping {
    /// 从 JSON 载荷解析映射表
    ///
    /// 载荷必须是字符串到字符串的对象。空译文会被丢弃，
    /// 丢弃后为空的词典视为解析失败。
    pub fn from_json_slice(body: &[u8]) -> TranslationResult<Self> {
        let raw: HashMap<String, String> = serde_json::from_slice(body)?;
        let total = raw.len();
        let mapping = Self::from(raw);

        if mapping.len() < total {
            tracing::debug!("丢弃了 {} 个空词条", total - mapping.len());
        }

        if mapping.is_empty() {
            return Err(TranslationError::ParseError("词典为空".to_string()));
        }

        Ok(mapping)
    }

    /// 查找译文：先小写匹配，再原样匹配
    pub fn get(&self, term: &str) -> Option<&str> {
        let normalized = term.trim().to_lowercase();
        self.entries
            .get(&normalized)
            .or_else(|| self.entries.get(term))
            .map(String::as_str)
    }

    /// 查找译文，找不到时返回原词
    pub fn translate<'a>(&'a self, term: &'a str) -> &'a str {
        self.get(term).unwrap_or(term)
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.get(term).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Lexicon for Mapping {
    fn lookup(&self, term: &str) -> Option<&str> {
        self.get(term)
    }
}

// 空键和空白译文不构成词条
fn is_usable_entry(key: &str, value: &str) -> bool {
    !key.is_empty() && !value.trim().is_empty()
}

impl<K, V> FromIterator<(K, V)> for Mapping
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .filter(|(k, v): &(String, String)| is_usable_entry(k, v))
                .collect(),
        }
    }
}

impl From<HashMap<String, String>> for Mapping {
    fn from(raw: HashMap<String, String>) -> Self {
        raw.into_iter().collect()
    }
}

impl From<Mapping> for HashMap<String, String> {
    fn from(mapping: Mapping) -> Self {
        mapping.entries
    }
}
