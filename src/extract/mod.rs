//! 待翻译文本的提取
//!
//! - **PlainTextSource**: 纯文本输入
//! - **HtmlTextSource**: 从 HTML 页面的正文区域提取文本

pub mod html;

pub use html::HtmlTextSource;

use crate::translation::config::constants::{MAX_TEXT_CHARS, MIN_TEXT_CHARS};

/// 可提供待翻译文本的来源
pub trait TextSource {
    /// 提取待翻译文本，没有可用内容时返回 `None`
    fn extract(&self) -> Option<String>;
}

/// 去除首尾空白后长度超过下限时，截断到上限返回
pub(crate) fn page_text(raw: &str) -> Option<String> {
    let text = raw.trim();
    if text.chars().count() > MIN_TEXT_CHARS {
        Some(text.chars().take(MAX_TEXT_CHARS).collect())
    } else {
        None
    }
}

/// 纯文本来源
#[derive(Debug, Clone)]
pub struct PlainTextSource {
    text: String,
    verbatim: bool,
}

impl PlainTextSource {
    /// 按页面正文规则处理：过短的文本视为没有内容，过长的截断
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            verbatim: false,
        }
    }

    /// 原样使用文本，只拒绝空白内容
    pub fn verbatim<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            verbatim: true,
        }
    }
}

impl TextSource for PlainTextSource {
    fn extract(&self) -> Option<String> {
        if self.verbatim {
            (!self.text.trim().is_empty()).then(|| self.text.clone())
        } else {
            page_text(&self.text)
        }
    }
}
