//! 短语匹配
//!
//! 从给定位置开始，依次尝试 3 个词和 2 个词的短语，长短语优先。
//! 短语只由连续的单词词元组成，中间夹有标点的窗口不会被尝试。

use super::tokenizer::Token;
use crate::translation::dictionary::Lexicon;

pub const MAX_PHRASE_WORDS: usize = 3;
pub const MIN_PHRASE_WORDS: usize = 2;

/// 不作为短语开头的介词，总是按单词翻译
pub const PREPOSITIONS: &[&str] = &["on", "at", "in", "of", "to", "for", "with", "by", "from"];

pub fn is_preposition(word: &str) -> bool {
    PREPOSITIONS.contains(&word.to_lowercase().as_str())
}

/// 一次短语匹配的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseMatch<'a> {
    pub phrase: String,
    pub translation: &'a str,
    /// 短语占用的词元数
    pub len: usize,
}

/// 短语匹配器
#[derive(Debug, Clone, Copy)]
pub struct PhraseMatcher {
    max_words: usize,
    min_words: usize,
}

impl Default for PhraseMatcher {
    fn default() -> Self {
        Self {
            max_words: MAX_PHRASE_WORDS,
            min_words: MIN_PHRASE_WORDS,
        }
    }
}

impl PhraseMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 查找从 `start` 开始、词典中存在的最长短语
    pub fn find_phrase<'a, L>(
        &self,
        tokens: &[Token],
        start: usize,
        lexicon: &'a L,
    ) -> Option<PhraseMatch<'a>>
    where
        L: Lexicon + ?Sized,
    {
        for len in (self.min_words..=self.max_words).rev() {
            let Some(window) = tokens.get(start..start + len) else {
                continue;
            };
            if !window.iter().all(Token::is_word) {
                continue;
            }

            let phrase = window
                .iter()
                .map(Token::as_str)
                .collect::<Vec<_>>()
                .join(" ");

            if let Some(translation) = lexicon.lookup(&phrase) {
                return Some(PhraseMatch {
                    phrase,
                    translation,
                    len,
                });
            }
        }

        None
    }
}
