//! 配置管理器
//!
//! 提供统一的配置接口，支持文件配置、环境变量和默认值

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::constants;
use crate::env::{cache, dictionary, EnvVar};
use crate::translation::error::{helpers, TranslationError, TranslationResult};

/// 翻译器配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TranslatorConfig {
    // 词典源配置
    pub sources: Vec<String>,
    pub fetch_timeout_ms: u64,
    pub offline: bool,

    // 缓存配置
    pub cache_enabled: bool,
    pub cache_ttl_secs: u64,
    pub cache_path: String,
    pub cache_key: String,

    // 引擎配置
    pub memo_capacity: usize,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            sources: constants::DEFAULT_SOURCES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            fetch_timeout_ms: constants::DEFAULT_FETCH_TIMEOUT.as_millis() as u64,
            offline: false,

            cache_enabled: true,
            cache_ttl_secs: constants::DEFAULT_CACHE_TTL.as_secs(),
            cache_path: constants::DEFAULT_CACHE_PATH.to_string(),
            cache_key: constants::DEFAULT_CACHE_KEY.to_string(),

            memo_capacity: constants::DEFAULT_MEMO_CAPACITY,
        }
    }
}

impl TranslatorConfig {
    /// 验证配置
    pub fn validate(&self) -> TranslationResult<()> {
        for source in &self.sources {
            let url = url::Url::parse(source)
                .map_err(|e| helpers::config_error(format!("无效的词典源 {}: {}", source, e)))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(helpers::config_error(format!(
                    "词典源必须使用 http 或 https: {}",
                    source
                )));
            }
        }

        if self.fetch_timeout_ms == 0 {
            return Err(helpers::config_error("获取超时不能为0"));
        }

        if self.cache_enabled {
            if self.cache_ttl_secs == 0 {
                return Err(helpers::config_error("启用缓存时TTL不能为0"));
            }
            if self.cache_key.trim().is_empty() {
                return Err(helpers::config_error("缓存键不能为空"));
            }
            if self.cache_path.trim().is_empty() {
                return Err(helpers::config_error("缓存路径不能为空"));
            }
        }

        if self.memo_capacity == 0 {
            return Err(helpers::config_error("记忆缓存容量不能为0"));
        }

        Ok(())
    }

    /// 应用环境变量覆盖，只处理显式设置的变量
    pub fn apply_env_overrides(&mut self) {
        if let Some(sources) = env_value::<_, dictionary::Sources>() {
            tracing::info!("环境变量覆盖词典源: {} 个", sources.len());
            self.sources = sources;
        }

        if let Some(timeout) = env_value::<_, dictionary::FetchTimeout>() {
            self.fetch_timeout_ms = timeout.as_millis() as u64;
        }

        if let Some(offline) = env_value::<_, dictionary::Offline>() {
            self.offline = offline;
        }

        if let Some(enabled) = env_value::<_, cache::Enabled>() {
            self.cache_enabled = enabled;
        }

        if let Some(ttl) = env_value::<_, cache::Ttl>() {
            self.cache_ttl_secs = ttl.as_secs();
        }

        if let Some(path) = env_value::<_, cache::Path>() {
            self.cache_path = path;
        }

        if let Some(size) = env_value::<_, cache::MemoSize>() {
            self.memo_capacity = size;
        }
    }

    /// 转换为Duration类型
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// 展开 `~` 后的缓存文件路径
    pub fn resolved_cache_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.cache_path).as_ref())
    }

    /// 渲染为 TOML 文本
    pub fn to_toml(&self) -> TranslationResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| helpers::config_error(format!("序列化配置失败: {}", e)))
    }
}

fn env_value<T, V: EnvVar<T>>() -> Option<T> {
    match V::lookup()? {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("忽略无效的环境变量: {}", e);
            None
        }
    }
}

/// 配置管理器
pub struct ConfigManager {
    config: TranslatorConfig,
}

impl ConfigManager {
    /// 按搜索路径加载配置，再应用环境变量覆盖
    pub fn new() -> TranslationResult<Self> {
        Self::load_dotenv();

        let config = match Self::find_config_file() {
            Some(path) => {
                tracing::info!("加载配置文件: {}", path.display());
                Self::load_from_file(&path)?
            }
            None => {
                tracing::debug!("未找到配置文件，使用默认配置");
                TranslatorConfig::default()
            }
        };

        Self::finish(config)
    }

    /// 从指定文件加载配置，再应用环境变量覆盖
    pub fn from_file<P: AsRef<Path>>(path: P) -> TranslationResult<Self> {
        Self::load_dotenv();

        let expanded = PathBuf::from(
            shellexpand::tilde(&path.as_ref().to_string_lossy()).as_ref(),
        );
        tracing::info!("加载配置文件: {}", expanded.display());
        let config = Self::load_from_file(&expanded)?;
        Self::finish(config)
    }

    fn finish(mut config: TranslatorConfig) -> TranslationResult<Self> {
        config.apply_env_overrides();
        config.validate()?;
        Ok(Self { config })
    }

    pub fn into_config(self) -> TranslatorConfig {
        self.config
    }

    fn find_config_file() -> Option<PathBuf> {
        constants::CONFIG_PATHS
            .iter()
            .map(|path| PathBuf::from(shellexpand::tilde(path).as_ref()))
            .find(|path| path.exists())
    }

    /// 解析配置文件，`.toml` 按 TOML 解析，其余按 JSON 解析
    pub fn load_from_file(path: &Path) -> TranslationResult<TranslatorConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| helpers::config_error(format!("读取配置文件失败: {}", e)))?;

        let is_toml = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            toml::from_str(&content)
                .map_err(|e| TranslationError::ConfigError(format!("解析TOML配置失败: {}", e)))
        } else {
            serde_json::from_str(&content)
                .map_err(|e| TranslationError::ConfigError(format!("解析JSON配置失败: {}", e)))
        }
    }

    /// 加载 .env 文件
    fn load_dotenv() {
        let env_files = [".env.local", ".env"];

        for env_file in &env_files {
            if Path::new(env_file).exists() && dotenv::from_filename(env_file).is_ok() {
                tracing::debug!("已加载环境变量文件: {}", env_file);
                break;
            }
        }
    }

    /// 生成示例配置文件
    pub fn generate_example_config<P: AsRef<Path>>(path: P) -> TranslationResult<()> {
        let content = TranslatorConfig::default().to_toml()?;

        std::fs::write(path, content)
            .map_err(|e| helpers::config_error(format!("写入配置文件失败: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = TranslatorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sources.len(), 4);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(10));
        assert_eq!(config.cache_ttl(), Duration::from_secs(86400));
        assert_eq!(config.cache_key, "translator-dict-cache");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = TranslatorConfig::default();
        config.sources = vec!["not a url".to_string()];
        assert!(matches!(
            config.validate(),
            Err(TranslationError::ConfigError(_))
        ));

        let mut config = TranslatorConfig::default();
        config.sources = vec!["ftp://example.com/dict.json".to_string()];
        assert!(config.validate().is_err());

        let mut config = TranslatorConfig::default();
        config.memo_capacity = 0;
        assert!(config.validate().is_err());

        let mut config = TranslatorConfig::default();
        config.cache_ttl_secs = 0;
        assert!(config.validate().is_err());
        config.cache_enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_sources_are_valid() {
        let config = TranslatorConfig {
            sources: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dict-translator.toml");
        std::fs::write(
            &path,
            "fetch_timeout_ms = 2500\nsources = [\"https://example.com/dict.json\"]\n",
        )
        .unwrap();

        let config = ConfigManager::load_from_file(&path).unwrap();
        assert_eq!(config.fetch_timeout_ms, 2500);
        assert_eq!(config.sources, vec!["https://example.com/dict.json"]);
        assert_eq!(config.memo_capacity, constants::DEFAULT_MEMO_CAPACITY);
    }

    #[test]
    fn test_json_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"offline": true, "cache_enabled": false}"#).unwrap();

        let config = ConfigManager::load_from_file(&path).unwrap();
        assert!(config.offline);
        assert!(!config.cache_enabled);
    }

    #[test]
    fn test_malformed_config_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "sources = [").unwrap();

        assert!(matches!(
            ConfigManager::load_from_file(&path),
            Err(TranslationError::ConfigError(_))
        ));
        assert!(ConfigManager::load_from_file(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_example_config_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("example.toml");
        ConfigManager::generate_example_config(&path).unwrap();

        let config = ConfigManager::load_from_file(&path).unwrap();
        assert_eq!(config, TranslatorConfig::default());
    }
}
