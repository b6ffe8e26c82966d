/// 客户端配置
///
/// 支持TOML/JSON配置文件与环境变量覆盖
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::impl_default;

/// 宿主导出符号所在的默认命名空间
pub const DEFAULT_NAMESPACE: &str = "PLand_LDAPI";

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 文件读取错误
    #[error("Config file error: {0}")]
    FileError(#[from] std::io::Error),
    /// 解析错误
    #[error("Config parse error: {0}")]
    ParseError(String),
    /// 验证错误
    #[error("Config validation error: {0}")]
    ValidationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// 客户端主配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// 导入命名空间
    pub namespace: String,

    /// 日志配置
    pub logging: LoggingConfig,
}

impl_default!(ClientConfig {
    namespace: DEFAULT_NAMESPACE.to_string(),
    logging: LoggingConfig::default(),
});

impl ClientConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// 从TOML文件加载配置
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_toml_str(&content)
    }

    /// 从TOML字符串解析配置
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 从JSON文件加载配置
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_json_str(&content)
    }

    /// 从JSON字符串解析配置
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 保存为TOML文件
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 保存为JSON文件
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 从环境变量覆盖配置
    ///
    /// - `LDAPI_NAMESPACE`
    /// - `LDAPI_LOG_LEVEL` (`trace` / `debug` / `info` / `warn` / `error`)
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(namespace) = lookup("LDAPI_NAMESPACE") {
            self.namespace = namespace;
        }
        if let Some(val) = lookup("LDAPI_LOG_LEVEL") {
            match val.parse() {
                Ok(level) => self.logging.level = level,
                Err(e) => tracing::warn!(target: "ldapi.client", "Ignoring LDAPI_LOG_LEVEL: {}", e),
            }
        }
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.namespace.is_empty() {
            return Err(ConfigError::ValidationError(
                "namespace must not be empty".to_string(),
            ));
        }
        if self.namespace.chars().any(char::is_whitespace) {
            return Err(ConfigError::ValidationError(format!(
                "namespace '{}' must not contain whitespace",
                self.namespace
            )));
        }
        Ok(())
    }

    /// 自动查找并加载配置文件
    ///
    /// 按以下顺序查找：
    /// 1. ./ldapi.toml
    /// 2. ./ldapi.json
    /// 3. ~/.config/pland_ldapi/config.toml
    /// 4. 使用默认配置
    ///
    /// 最后应用环境变量覆盖。
    pub fn load_or_default() -> Self {
        let mut config = Self::find().unwrap_or_else(|| {
            tracing::info!(target: "ldapi.client", "Using default configuration");
            Self::default()
        });
        config.apply_env_overrides();
        config
    }

    fn find() -> Option<Self> {
        if let Ok(config) = Self::from_toml_file("ldapi.toml") {
            tracing::info!(target: "ldapi.client", "Loaded config from ldapi.toml");
            return Some(config);
        }

        if let Ok(config) = Self::from_json_file("ldapi.json") {
            tracing::info!(target: "ldapi.client", "Loaded config from ldapi.json");
            return Some(config);
        }

        let home = env::var_os("HOME")?;
        let config_path = PathBuf::from(home)
            .join(".config")
            .join("pland_ldapi")
            .join("config.toml");
        let config = Self::from_toml_file(&config_path).ok()?;
        tracing::info!(target: "ldapi.client", "Loaded config from {:?}", config_path);
        Some(config)
    }
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 连接时是否安装 `tracing` 订阅者（宿主已有订阅者时保持 `false`）
    pub init: bool,

    /// 日志级别
    pub level: LogLevel,

    /// 是否输出 target
    pub with_target: bool,

    /// 是否使用ANSI颜色
    pub ansi: bool,
}

impl_default!(LoggingConfig {
    init: false,
    level: LogLevel::Info,
    with_target: true,
    ansi: false,
});

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// 跟踪
    Trace,
    /// 调试
    Debug,
    /// 信息
    Info,
    /// 警告
    Warn,
    /// 错误
    Error,
}

impl LogLevel {
    /// `EnvFilter` 指令
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_filter())
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(ConfigError::ParseError(format!("unknown log level '{}'", other))),
        }
    }
}
