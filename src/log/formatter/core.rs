use crate::log::record::Record;
use anyhow::Result;

/// 日志格式化器 trait
///
/// 负责将终结后的 Record 格式化为一行文本（不含换行符）
pub trait LogFormatter: Send + Sync {
    /// 格式化日志记录
    fn format(&self, record: &Record) -> Result<String>;
}
