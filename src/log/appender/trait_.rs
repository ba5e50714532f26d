use anyhow::Result;

/// 日志输出器 trait
///
/// 负责把一条完整的格式化结果写到输出流，不写半条记录。
/// 实现需自行保证并发安全，Logger 不会额外加锁。
pub trait LogAppender: Send + Sync {
    /// 输出一行日志（不含换行符）
    fn append(&self, formatted_message: &str) -> Result<()>;

    /// 刷新缓冲区（默认实现为空操作）
    fn flush(&self) -> Result<()> {
        Ok(())
    }
}
