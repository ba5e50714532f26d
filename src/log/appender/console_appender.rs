use crate::log::appender::LogAppender;
use anyhow::Result;
use serde::Deserialize;
use smart_default::SmartDefault;
use std::io::{self, Write};

/// 终端输出目标
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, SmartDefault)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    Stdout,
    Stderr,
}

/// ConsoleAppender 配置
#[derive(Debug, Clone, Deserialize, PartialEq, SmartDefault)]
#[serde(default)]
pub struct ConsoleAppenderConfig {
    /// 输出目标
    pub target: Target,
}

/// 终端输出器
///
/// 将日志输出到标准输出或标准错误
pub struct ConsoleAppender {
    config: ConsoleAppenderConfig,
}

impl ConsoleAppender {
    pub fn new(config: ConsoleAppenderConfig) -> Self {
        Self { config }
    }
}

impl LogAppender for ConsoleAppender {
    fn append(&self, formatted_message: &str) -> Result<()> {
        match self.config.target {
            Target::Stdout => {
                let mut out = io::stdout().lock();
                writeln!(out, "{}", formatted_message)?;
                out.flush()?;
            }
            Target::Stderr => {
                let mut out = io::stderr().lock();
                writeln!(out, "{}", formatted_message)?;
                out.flush()?;
            }
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        match self.config.target {
            Target::Stdout => io::stdout().flush()?,
            Target::Stderr => io::stderr().flush()?,
        }
        Ok(())
    }
}

crate::impl_from!(ConsoleAppenderConfig => ConsoleAppender);
crate::impl_box_from!(ConsoleAppender => dyn LogAppender);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_appender_append() {
        let appender = ConsoleAppender::new(ConsoleAppenderConfig::default());
        assert!(appender.append("Test message").is_ok());
        assert!(appender.flush().is_ok());
    }

    #[test]
    fn test_console_appender_stderr() {
        let appender = ConsoleAppender::from(ConsoleAppenderConfig {
            target: Target::Stderr,
        });
        assert_eq!(appender.config.target, Target::Stderr);
        assert!(appender.append("to stderr").is_ok());
    }

    #[test]
    fn test_console_appender_config_from_json() {
        let config: ConsoleAppenderConfig = json5::from_str(r#"{ target: "stderr" }"#).unwrap();
        assert_eq!(config.target, Target::Stderr);

        let config: ConsoleAppenderConfig = json5::from_str("{}").unwrap();
        assert_eq!(config.target, Target::Stdout);
    }
}
