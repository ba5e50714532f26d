use crate::log::appender::LogAppender;
use anyhow::{anyhow, Result};
use std::io::Write;
use std::sync::Mutex;

/// 通用输出器，包装任意 `io::Write`
pub struct WriterAppender<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterAppender<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// 取回内部的 writer
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| anyhow!("writer lock poisoned: {}", e))
    }
}

impl<W: Write + Send> LogAppender for WriterAppender<W> {
    fn append(&self, formatted_message: &str) -> Result<()> {
        let mut writer = self.writer.lock().map_err(|e| anyhow!("lock writer: {}", e))?;
        writeln!(writer, "{}", formatted_message)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        let mut writer = self.writer.lock().map_err(|e| anyhow!("lock writer: {}", e))?;
        writer.flush()?;
        Ok(())
    }
}
