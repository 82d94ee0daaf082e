//! 文本处理管道模块
//!
//! 分句、分词、短语匹配与译文拼接

pub mod phrase;
pub mod tokenizer;

pub use phrase::{is_preposition, PhraseMatch, PhraseMatcher, PREPOSITIONS};
pub use tokenizer::{join_tokens, split_sentences, tokenize, Token};
