//! 替换翻译引擎
//!
//! 引擎持有会话词典的只读引用，把输入文本逐句、逐词元替换为译文。
//!
//! ## 工作流程
//! 1. 查询记忆缓存，完全相同的输入直接返回上次结果
//! 2. 分句，并对每句分词
//! 3. 对每个未被消耗的单词位置尝试短语匹配，命中则整体替换并跳过所有被消耗的词元
//! 4. 未命中短语时按单词查找，找不到就保留原词
//! 5. 标点原样保留，拼接时去掉 `.` `,` `!` `?` 前的空白
//! 6. 句子之间用单个空格连接，写入记忆缓存
//!
//! 翻译从不失败，未知词语按原样输出。

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use lru::LruCache;

use crate::translation::config::constants;
use crate::translation::dictionary::{Lexicon, Mapping};
use crate::translation::pipeline::{
    is_preposition, join_tokens, split_sentences, tokenize, PhraseMatcher, Token,
};

/// 引擎配置
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// 记忆缓存容量（条目数）
    ///
    /// 容量足够时行为与不限容量完全一致，超出后淘汰最久未使用的条目
    pub memo_capacity: usize,

    /// 是否在线，仅用于日志，不影响翻译逻辑
    pub is_online: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            memo_capacity: constants::DEFAULT_MEMO_CAPACITY,
            is_online: true,
        }
    }
}

/// 引擎统计信息
#[derive(Debug, Default)]
pub struct EngineStats {
    /// 词典查找次数（单词与短语候选都计入）
    pub lookups: AtomicUsize,
    /// 记忆缓存命中次数
    pub memo_hits: AtomicUsize,
    /// 实际计算的翻译次数
    pub translations: AtomicUsize,
    /// 短语替换次数
    pub phrase_matches: AtomicUsize,
}

impl EngineStats {
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    pub fn memo_hits(&self) -> usize {
        self.memo_hits.load(Ordering::Relaxed)
    }

    pub fn translations(&self) -> usize {
        self.translations.load(Ordering::Relaxed)
    }

    pub fn phrase_matches(&self) -> usize {
        self.phrase_matches.load(Ordering::Relaxed)
    }
}

// 统计查找次数的词典视图
struct ProbedLexicon<'a> {
    mapping: &'a Mapping,
    lookups: &'a AtomicUsize,
}

impl Lexicon for ProbedLexicon<'_> {
    fn lookup(&self, term: &str) -> Option<&str> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        self.mapping.get(term)
    }
}

/// 替换翻译引擎
pub struct SubstitutionEngine {
    mapping: Arc<Mapping>,
    matcher: PhraseMatcher,
    memo: LruCache<String, String>,
    config: EngineConfig,
    stats: EngineStats,
}

impl SubstitutionEngine {
    pub fn new(mapping: Arc<Mapping>, config: EngineConfig) -> Self {
        let capacity = NonZeroUsize::new(config.memo_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            mapping,
            matcher: PhraseMatcher::new(),
            memo: LruCache::new(capacity),
            config,
            stats: EngineStats::default(),
        }
    }

    /// 翻译文本
    pub fn translate(&mut self, text: &str) -> String {
        if let Some(memoized) = self.memo.get(text) {
            self.stats.memo_hits.fetch_add(1, Ordering::Relaxed);
            return memoized.clone();
        }

        if !self.config.is_online {
            tracing::warn!("离线模式下，使用缓存和基础词典翻译");
        }

        let result = split_sentences(text)
            .into_iter()
            .map(|sentence| self.translate_sentence(sentence))
            .collect::<Vec<_>>()
            .join(" ");

        self.stats.translations.fetch_add(1, Ordering::Relaxed);
        self.memo.put(text.to_string(), result.clone());
        result
    }

    fn translate_sentence(&self, sentence: &str) -> String {
        let tokens = tokenize(sentence);
        let lexicon = ProbedLexicon {
            mapping: &self.mapping,
            lookups: &self.stats.lookups,
        };

        let mut output: Vec<&str> = Vec::with_capacity(tokens.len());
        let mut index = 0;

        while index < tokens.len() {
            match &tokens[index] {
                Token::Punct(punct) => {
                    output.push(punct.as_str());
                    index += 1;
                }
                Token::Word(word) => {
                    if !is_preposition(word) {
                        if let Some(found) = self.matcher.find_phrase(&tokens, index, &lexicon) {
                            tracing::trace!("短语匹配: {} -> {}", found.phrase, found.translation);
                            self.stats.phrase_matches.fetch_add(1, Ordering::Relaxed);
                            output.push(found.translation);
                            index += found.len;
                            continue;
                        }
                    }

                    output.push(lexicon.lookup(word).unwrap_or(word.as_str()));
                    index += 1;
                }
            }
        }

        join_tokens(&output)
    }

    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    pub fn is_online(&self) -> bool {
        self.config.is_online
    }

    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }

    pub fn get_stats(&self) -> &EngineStats {
        &self.stats
    }
}
