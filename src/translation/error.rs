//! 翻译模块统一错误处理
//!
//! 提供结构化错误类型和错误处理机制。词典获取过程中的单个源错误
//! 只在获取器内部记录，不会传播给调用方。

use std::fmt;

use thiserror::Error;

/// 翻译错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    /// 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),

    /// 网络错误（传输失败或非成功状态码）
    #[error("网络错误: {0}")]
    NetworkError(String),

    /// 超时错误
    #[error("操作超时: {0}")]
    TimeoutError(String),

    /// 解析错误（词典载荷格式无效）
    #[error("解析错误: {0}")]
    ParseError(String),

    /// 缓存读取错误，调用方应视为缓存未命中
    #[error("缓存读取错误: {0}")]
    CacheReadError(String),

    /// 缓存写入错误
    #[error("缓存错误: {0}")]
    CacheError(String),

    /// IO错误
    #[error("IO错误: {0}")]
    IoError(String),

    /// 输入验证错误
    #[error("输入无效: {0}")]
    InvalidInput(String),

    /// 页面中没有可翻译的文本
    #[error("未找到可翻译的文本内容")]
    NoTranslatableText,

    /// 内部错误
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl TranslationError {
    /// 检查错误是否来自某个词典源（可由下一个源或降级路径吸收）
    pub fn is_source_failure(&self) -> bool {
        matches!(
            self,
            TranslationError::NetworkError(_)
                | TranslationError::TimeoutError(_)
                | TranslationError::ParseError(_)
        )
    }

    /// 获取错误的严重程度
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TranslationError::ConfigError(_) => ErrorSeverity::Critical,
            TranslationError::NetworkError(_) => ErrorSeverity::Warning,
            TranslationError::TimeoutError(_) => ErrorSeverity::Warning,
            TranslationError::ParseError(_) => ErrorSeverity::Warning,
            TranslationError::CacheReadError(_) => ErrorSeverity::Info,
            TranslationError::CacheError(_) => ErrorSeverity::Warning,
            TranslationError::IoError(_) => ErrorSeverity::Error,
            TranslationError::InvalidInput(_) => ErrorSeverity::Info,
            TranslationError::NoTranslatableText => ErrorSeverity::Error,
            TranslationError::InternalError(_) => ErrorSeverity::Critical,
        }
    }

    /// 创建带上下文的错误
    pub fn with_context<T: fmt::Display>(mut self, context: T) -> Self {
        let new_msg = match &self {
            TranslationError::NoTranslatableText => return self,
            other => format!("{} (上下文: {})", other.message(), context),
        };

        match &mut self {
            TranslationError::ConfigError(msg)
            | TranslationError::NetworkError(msg)
            | TranslationError::TimeoutError(msg)
            | TranslationError::ParseError(msg)
            | TranslationError::CacheReadError(msg)
            | TranslationError::CacheError(msg)
            | TranslationError::IoError(msg)
            | TranslationError::InvalidInput(msg)
            | TranslationError::InternalError(msg) => *msg = new_msg,
            TranslationError::NoTranslatableText => {}
        }

        self
    }

    fn message(&self) -> &str {
        match self {
            TranslationError::ConfigError(msg)
            | TranslationError::NetworkError(msg)
            | TranslationError::TimeoutError(msg)
            | TranslationError::ParseError(msg)
            | TranslationError::CacheReadError(msg)
            | TranslationError::CacheError(msg)
            | TranslationError::IoError(msg)
            | TranslationError::InvalidInput(msg)
            | TranslationError::InternalError(msg) => msg,
            TranslationError::NoTranslatableText => "",
        }
    }
}

/// 错误严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl From<std::io::Error> for TranslationError {
    fn from(error: std::io::Error) -> Self {
        TranslationError::IoError(error.to_string())
    }
}

impl From<serde_json::Error> for TranslationError {
    fn from(error: serde_json::Error) -> Self {
        TranslationError::ParseError(format!("JSON解析错误: {}", error))
    }
}

impl From<toml::de::Error> for TranslationError {
    fn from(error: toml::de::Error) -> Self {
        TranslationError::ConfigError(format!("TOML解析错误: {}", error))
    }
}

impl From<tokio::time::error::Elapsed> for TranslationError {
    fn from(error: tokio::time::error::Elapsed) -> Self {
        TranslationError::TimeoutError(format!("异步操作超时: {}", error))
    }
}

impl From<reqwest::Error> for TranslationError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            TranslationError::TimeoutError(error.to_string())
        } else if error.is_decode() {
            TranslationError::ParseError(error.to_string())
        } else {
            TranslationError::NetworkError(error.to_string())
        }
    }
}

/// 错误结果类型别名
pub type TranslationResult<T> = Result<T, TranslationError>;

/// 错误处理助手函数
pub mod helpers {
    use super::*;

    /// 按严重程度记录错误
    pub fn log_error(error: &TranslationError) {
        match error.severity() {
            ErrorSeverity::Info => tracing::info!("翻译信息: {}", error),
            ErrorSeverity::Warning => tracing::warn!("翻译警告: {}", error),
            ErrorSeverity::Error => tracing::error!("翻译错误: {}", error),
            ErrorSeverity::Critical => tracing::error!("翻译严重错误: {}", error),
        }
    }

    /// 创建网络错误
    pub fn network_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::NetworkError(msg.to_string())
    }

    /// 创建配置错误
    pub fn config_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::ConfigError(msg.to_string())
    }

    /// 创建缓存错误
    pub fn cache_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::CacheError(msg.to_string())
    }

    /// 创建超时错误
    pub fn timeout_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::TimeoutError(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_failures_are_classified() {
        assert!(TranslationError::NetworkError("503".into()).is_source_failure());
        assert!(TranslationError::TimeoutError("10s".into()).is_source_failure());
        assert!(TranslationError::ParseError("not json".into()).is_source_failure());
        assert!(!TranslationError::CacheReadError("corrupt".into()).is_source_failure());
        assert!(!TranslationError::NoTranslatableText.is_source_failure());
    }

    #[test]
    fn test_with_context_appends_message() {
        let error = helpers::network_error("连接被拒绝").with_context("https://example.com/dict.json");
        assert_eq!(
            error.to_string(),
            "网络错误: 连接被拒绝 (上下文: https://example.com/dict.json)"
        );

        let unchanged = TranslationError::NoTranslatableText.with_context("ignored");
        assert_eq!(unchanged, TranslationError::NoTranslatableText);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(ErrorSeverity::Critical > ErrorSeverity::Warning);
        assert_eq!(
            TranslationError::CacheReadError("x".into()).severity(),
            ErrorSeverity::Info
        );
        assert_eq!(
            helpers::config_error("bad").severity(),
            ErrorSeverity::Critical
        );
    }

    #[test]
    fn test_json_error_converts_to_parse_error() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert!(matches!(TranslationError::from(err), TranslationError::ParseError(_)));
    }
}
