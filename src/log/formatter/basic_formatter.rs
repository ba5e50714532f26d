use crate::log::formatter::LogFormatter;
use crate::log::record::Record;
use anyhow::Result;
use serde::Deserialize;
use smart_default::SmartDefault;

/// BasicFormatter 配置
#[derive(Debug, Clone, Deserialize, PartialEq, SmartDefault)]
#[serde(default)]
pub struct BasicFormatterConfig {
    /// 是否启用颜色输出
    #[default = true]
    pub colored: bool,
}

/// 基础格式化器
///
/// 只输出记录的简短形式：请求为 `method url`，错误和日志为消息本身
pub struct BasicFormatter {
    config: BasicFormatterConfig,
}

impl BasicFormatter {
    pub fn new(config: BasicFormatterConfig) -> Self {
        Self { config }
    }
}

impl LogFormatter for BasicFormatter {
    fn format(&self, record: &Record) -> Result<String> {
        let msg = record.to_string();
        if !self.config.colored {
            return Ok(msg);
        }

        let mut result = String::with_capacity(msg.len() + 9);
        result.push_str("\x1b[90m"); // bright black
        result.push_str(&msg);
        result.push_str("\x1b[0m");
        Ok(result)
    }
}

crate::impl_from!(BasicFormatterConfig => BasicFormatter);
crate::impl_box_from!(BasicFormatter => dyn LogFormatter);
