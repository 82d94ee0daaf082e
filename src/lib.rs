//! # Dict Translator
//!
//! 基于词典替换的英译中工具库：从多个网络源竞速获取词典，带 TTL 缓存与内置兜底，
//! 再按短语优先、单词其次的规则逐句替换文本。
//!
//! ## 模块组织
//!
//! - `translation` - 词典获取、缓存与替换翻译
//! - `extract` - 从纯文本或 HTML 页面中提取待翻译文本
//! - `env` - 类型安全的环境变量

pub mod env;
pub mod extract;
pub mod translation;

pub use extract::{HtmlTextSource, PlainTextSource, TextSource};
pub use translation::{TranslationError, TranslationResult, TranslatorConfig, TranslatorService};
