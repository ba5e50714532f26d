mod console_appender;
mod file_appender;
mod memory_appender;
mod trait_;
mod writer_appender;

pub use console_appender::{ConsoleAppender, ConsoleAppenderConfig, Target};
pub use file_appender::{FileAppender, FileAppenderConfig};
pub use memory_appender::MemoryAppender;
pub use trait_::LogAppender;
pub use writer_appender::WriterAppender;

use anyhow::Result;
use serde::Deserialize;
use std::sync::Arc;

/// Appender 配置，形如 `{ type: "ConsoleAppender", options: { target: "stdout" } }`
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", content = "options")]
pub enum AppenderConfig {
    ConsoleAppender(ConsoleAppenderConfig),
    FileAppender(FileAppenderConfig),
}

impl Default for AppenderConfig {
    fn default() -> Self {
        AppenderConfig::ConsoleAppender(ConsoleAppenderConfig::default())
    }
}

impl AppenderConfig {
    /// 按配置创建 Appender
    pub fn build(&self) -> Result<Arc<dyn LogAppender>> {
        let appender: Arc<dyn LogAppender> = match self {
            AppenderConfig::ConsoleAppender(config) => {
                let boxed: Box<dyn LogAppender> = Box::new(ConsoleAppender::from(config.clone())).into();
                Arc::from(boxed)
            }
            AppenderConfig::FileAppender(config) => Arc::new(FileAppender::new(config.clone())?),
        };
        Ok(appender)
    }
}
