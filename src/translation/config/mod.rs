//! 翻译器配置管理模块
//!
//! 提供简化的配置管理，支持环境变量、配置文件和默认值

pub mod manager;

pub use manager::{ConfigManager, TranslatorConfig};

/// 配置常量
pub mod constants {
    use std::time::Duration;

    pub const USER_AGENT: &str = concat!("dict-translator/", env!("CARGO_PKG_VERSION"));

    // 词典源，按优先级排列，竞速平局时下标小者胜出
    pub const DEFAULT_SOURCES: &[&str] = &[
        "https://cdn.jsdelivr.net/gh/fighting41love/funNLP@master/data/%E4%B8%AD%E8%8B%B1%E6%96%87%E8%AF%8D%E5%85%B8/english_dictionary.json",
        "https://gitee.com/fighting41love/funNLP/raw/master/data/%E4%B8%AD%E8%8B%B1%E6%96%87%E8%AF%8D%E5%85%B8/english_dictionary.json",
        "https://ghproxy.com/https://raw.githubusercontent.com/fighting41love/funNLP/master/data/%E4%B8%AD%E8%8B%B1%E6%96%87%E8%AF%8D%E5%85%B8/english_dictionary.json",
        "https://raw.githubusercontent.com/fighting41love/funNLP/master/data/%E4%B8%AD%E8%8B%B1%E6%96%87%E8%AF%8D%E5%85%B8/english_dictionary.json",
    ];

    // 获取设置
    pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

    // 缓存设置
    pub const DEFAULT_CACHE_KEY: &str = "translator-dict-cache";
    pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60); // 24小时
    pub const DEFAULT_CACHE_PATH: &str = "~/.cache/dict-translator/dictionary.redb";

    // 引擎设置
    pub const DEFAULT_MEMO_CAPACITY: usize = 1000;

    // 页面文本提取
    pub const MIN_TEXT_CHARS: usize = 10;
    pub const MAX_TEXT_CHARS: usize = 500;
    pub const CONTENT_SELECTORS: &[&str] = &[
        ".content", ".main", ".article", ".post", ".text", "article", "main", "p", "body",
    ];

    // 配置文件搜索路径
    pub const CONFIG_PATHS: &[&str] = &[
        "dict-translator.toml",
        ".dict-translator.toml",
        "~/.config/dict-translator/config.toml",
        "/etc/dict-translator/config.toml",
    ];
}
