use crate::log::appender::LogAppender;
use anyhow::{anyhow, Result};
use std::sync::Mutex;

/// 内存输出器
///
/// 收集每一行输出，便于嵌入方检查或在测试中断言
#[derive(Default)]
pub struct MemoryAppender {
    lines: Mutex<Vec<String>>,
}

impl MemoryAppender {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前收集到的所有行
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// 清空并返回已收集的行
    pub fn drain(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|mut l| std::mem::take(&mut *l))
            .unwrap_or_default()
    }
}

impl LogAppender for MemoryAppender {
    fn append(&self, formatted_message: &str) -> Result<()> {
        self.lines
            .lock()
            .map_err(|e| anyhow!("lock memory appender: {}", e))?
            .push(formatted_message.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_appender_collects_lines() {
        let appender = MemoryAppender::new();
        appender.append("a").unwrap();
        appender.append("b").unwrap();
        assert_eq!(appender.lines(), vec!["a", "b"]);

        assert_eq!(appender.drain(), vec!["a", "b"]);
        assert!(appender.lines().is_empty());
    }
}
