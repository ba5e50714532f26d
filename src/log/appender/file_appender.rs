use crate::log::appender::LogAppender;
use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

/// FileAppender 配置
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FileAppenderConfig {
    /// 日志文件路径
    pub file_path: String,
}

/// 文件输出器
///
/// 以追加方式写入文件，每行写完立即 flush
pub struct FileAppender {
    file: Mutex<File>,
    config: FileAppenderConfig,
}

impl FileAppender {
    /// 从配置创建 FileAppender，父目录不存在时自动创建
    pub fn new(config: FileAppenderConfig) -> Result<Self> {
        let path = PathBuf::from(&config.file_path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            file: Mutex::new(file),
            config,
        })
    }

    /// 获取日志文件路径
    pub fn path(&self) -> &str {
        &self.config.file_path
    }
}

impl LogAppender for FileAppender {
    fn append(&self, formatted_message: &str) -> Result<()> {
        let mut file = self.file.lock().map_err(|e| anyhow!("lock log file: {}", e))?;
        let mut line = String::with_capacity(formatted_message.len() + 1);
        line.push_str(formatted_message);
        line.push('\n');
        file.write_all(line.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        let mut file = self.file.lock().map_err(|e| anyhow!("lock log file: {}", e))?;
        file.flush()?;
        Ok(())
    }
}
