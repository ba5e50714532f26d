use crate::log::appender::AppenderConfig;
use crate::log::formatter::LogFormat;
use crate::log::level::LogLevel;
use crate::log::store::StoreConfig;
use anyhow::Result;
use serde::Deserialize;
use smart_default::SmartDefault;

/// 终结失败时对调用方的反馈方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorMode {
    /// 只写诊断行，终结调用返回 Ok
    #[default]
    Report,
    /// 写诊断行，并把错误返回给调用方
    Propagate,
}

/// Logger 配置
///
/// # 示例
///
/// ```
/// use eventlog::log::{LoggerConfig, LogFormat, LogLevel};
///
/// let config = LoggerConfig::from_json(r#"
///     {
///         level: "warn",
///         format: "json",
///         colored: false,
///         appender: {
///             type: "ConsoleAppender",
///             options: { target: "stderr" }
///         },
///         store: { type: "MemoryStore" }
///     }
/// "#).unwrap();
///
/// assert_eq!(config.level, LogLevel::Warn);
/// assert_eq!(config.format, LogFormat::Json);
/// ```
#[derive(Debug, Clone, Deserialize, SmartDefault, PartialEq)]
#[serde(default)]
pub struct LoggerConfig {
    /// 最低输出级别（只作用于日志记录的输出流）
    #[default(LogLevel::Info)]
    pub level: LogLevel,

    /// 输出格式
    pub format: LogFormat,

    /// 是否启用颜色输出
    #[default = true]
    pub colored: bool,

    /// 输出流，为 null 时不输出
    #[default(Some(AppenderConfig::default()))]
    pub appender: Option<AppenderConfig>,

    /// 持久化存储，为 null 时不持久化
    pub store: Option<StoreConfig>,

    /// 终结失败的反馈方式
    pub error_mode: ErrorMode,
}

impl LoggerConfig {
    /// 从 JSON 字符串创建（支持 JSON5 格式）
    pub fn from_json(json_str: &str) -> Result<Self> {
        Ok(json5::from_str(json_str)?)
    }

    /// 从 YAML 字符串创建
    pub fn from_yaml(yaml_str: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml_str)?)
    }

    /// 从 TOML 字符串创建
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::appender::{ConsoleAppenderConfig, FileAppenderConfig, Target};
    use crate::log::store::FileStoreConfig;

    #[test]
    fn test_logger_config_default() {
        let config = LoggerConfig::default();
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.format, LogFormat::Basic);
        assert!(config.colored);
        assert_eq!(config.appender, Some(AppenderConfig::default()));
        assert!(config.store.is_none());
        assert_eq!(config.error_mode, ErrorMode::Report);
    }

    #[test]
    fn test_logger_config_from_json() -> Result<()> {
        let config = LoggerConfig::from_json(
            r#"
            {
                // 注释和尾随逗号都可以
                level: "debug",
                format: "text",
                colored: false,
                appender: {
                    type: "FileAppender",
                    options: { file_path: "/tmp/app.log" },
                },
                store: { type: "FileStore", options: { dir: "/tmp/records" } },
                error_mode: "propagate",
            }
        "#,
        )?;

        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.format, LogFormat::Text);
        assert!(!config.colored);
        assert_eq!(
            config.appender,
            Some(AppenderConfig::FileAppender(FileAppenderConfig {
                file_path: "/tmp/app.log".to_string()
            }))
        );
        assert_eq!(
            config.store,
            Some(StoreConfig::FileStore(FileStoreConfig {
                dir: "/tmp/records".to_string()
            }))
        );
        assert_eq!(config.error_mode, ErrorMode::Propagate);
        Ok(())
    }

    #[test]
    fn test_logger_config_numeric_level_and_null_appender() -> Result<()> {
        let config = LoggerConfig::from_json(r#"{ level: 2, appender: null }"#)?;
        assert_eq!(config.level, LogLevel::Warn);
        assert!(config.appender.is_none());
        Ok(())
    }

    #[test]
    fn test_logger_config_from_yaml() -> Result<()> {
        let config = LoggerConfig::from_yaml(
            r#"
level: error
format: json
appender:
  type: ConsoleAppender
  options:
    target: stderr
"#,
        )?;

        assert_eq!(config.level, LogLevel::Error);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(
            config.appender,
            Some(AppenderConfig::ConsoleAppender(ConsoleAppenderConfig {
                target: Target::Stderr
            }))
        );
        Ok(())
    }

    #[test]
    fn test_logger_config_from_toml() -> Result<()> {
        let config = LoggerConfig::from_toml(
            r#"
level = "trace"
colored = false

[store]
type = "MemoryStore"
"#,
        )?;

        assert_eq!(config.level, LogLevel::Trace);
        assert!(!config.colored);
        assert_eq!(config.store, Some(StoreConfig::MemoryStore));
        Ok(())
    }

    #[test]
    fn test_logger_config_invalid_level() {
        assert!(LoggerConfig::from_json(r#"{ level: "loud" }"#).is_err());
        assert!(LoggerConfig::from_json(r#"{ level: 1000 }"#).is_err());
    }
}
