//! 分句与分词
//!
//! 所有函数都是纯函数，可重复调用，不保存任何状态。

use std::sync::LazyLock;

use regex::Regex;

// 句末标点后的空白即为句子边界
static SENTENCE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("sentence boundary regex"));

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\w']+)|([^\w\s])").expect("token regex"));

static SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([.,!?])").expect("punctuation spacing regex"));

/// 词元
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// 由字母、数字、下划线和撇号组成的最长连续串
    Word(String),
    /// 单个非单词、非空白字符
    Punct(String),
}

impl Token {
    pub fn as_str(&self) -> &str {
        match self {
            Token::Word(text) | Token::Punct(text) => text,
        }
    }

    pub fn is_word(&self) -> bool {
        matches!(self, Token::Word(_))
    }
}

/// 按句末标点后的空白分句，丢弃空句
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in SENTENCE_BOUNDARY.find_iter(text) {
        // 标点都是单字节字符，保留在前一句末尾
        sentences.push(&text[start..boundary.start() + 1]);
        start = boundary.end();
    }
    sentences.push(&text[start..]);

    sentences.retain(|s| !s.trim().is_empty());
    sentences
}

/// 把句子切分为单词和标点词元，保持原有顺序
pub fn tokenize(sentence: &str) -> Vec<Token> {
    TOKEN
        .captures_iter(sentence)
        .filter_map(|caps| {
            if let Some(word) = caps.get(1) {
                Some(Token::Word(word.as_str().to_string()))
            } else {
                caps.get(2).map(|punct| Token::Punct(punct.as_str().to_string()))
            }
        })
        .collect()
}

/// 用单个空格拼接词元，并去掉 `.` `,` `!` `?` 前的空白
pub fn join_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    let joined = tokens
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(" ");
    SPACE_BEFORE_PUNCT.replace_all(&joined, "$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(Token::as_str).collect()
    }

    #[test]
    fn test_split_sentences() {
        assert_eq!(split_sentences("A. B! C?"), vec!["A.", "B!", "C?"]);
        assert_eq!(
            split_sentences("Look for it.  Then stop!\nDone"),
            vec!["Look for it.", "Then stop!", "Done"]
        );
    }

    #[test]
    fn test_split_sentences_keeps_inner_punctuation() {
        // 标点后没有空白时不分句
        assert_eq!(split_sentences("v1.2 is out."), vec!["v1.2 is out."]);
        assert_eq!(split_sentences("Wait... what?"), vec!["Wait...", "what?"]);
    }

    #[test]
    fn test_split_sentences_drops_blank() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   \n ").is_empty());
        assert_eq!(split_sentences("Hi. "), vec!["Hi."]);
    }

    #[test]
    fn test_tokenize_words_and_punctuation() {
        let tokens = tokenize("Don't stop, (ever) 42!");
        assert_eq!(
            words(&tokens),
            vec!["Don't", "stop", ",", "(", "ever", ")", "42", "!"]
        );
        assert!(tokens[0].is_word());
        assert!(!tokens[2].is_word());
    }

    #[test]
    fn test_tokenize_keeps_every_symbol() {
        let tokens = tokenize("a--b");
        assert_eq!(words(&tokens), vec!["a", "-", "-", "b"]);
    }

    #[test]
    fn test_join_tokens_removes_space_before_punctuation() {
        assert_eq!(
            join_tokens(&["Hello", ",", "world", "!"]),
            "Hello, world!"
        );
        assert_eq!(join_tokens(&["a", "(", "b", ")"]), "a ( b )");
        assert_eq!(join_tokens::<&str>(&[]), "");
    }
}
