use crate::log::formatter::LogFormatter;
use crate::log::record::Record;
use anyhow::{bail, Result};
use chrono::SecondsFormat;
use serde::Deserialize;
use serde_json::Value;
use smart_default::SmartDefault;

/// TextFormatter 配置
#[derive(Debug, Clone, Deserialize, PartialEq, SmartDefault)]
#[serde(default)]
pub struct TextFormatterConfig {
    /// 是否启用颜色输出
    #[default = false]
    pub colored: bool,
}

/// 结构化文本格式化器
///
/// 输出形如 `<updated> key="value" ... _meta="value"` 的一行：
/// 字段来自记录的序列化结果，跳过 id、时间戳、meta 容器以及空值/零值，
/// 之后是以下划线为前缀的 meta 条目
pub struct TextFormatter {
    config: TextFormatterConfig,
}

/// 序列化后视为“空”的字段值，布尔字段只在为 true 时输出
const SKIPPED_VALUES: [&str; 6] = ["", "null", "[]", "{}", "0", "false"];

/// 不参与 key="value" 输出的字段
const SKIPPED_FIELDS: [&str; 4] = ["id", "created", "updated", "meta"];

impl TextFormatter {
    pub fn new(config: TextFormatterConfig) -> Self {
        Self { config }
    }

    fn push_pair(&self, result: &mut String, prefix: &str, key: &str, value: &str) {
        result.push(' ');
        if self.config.colored {
            result.push_str("\x1b[36m"); // cyan
        }
        result.push_str(prefix);
        result.push_str(key);
        if self.config.colored {
            result.push_str("\x1b[0m"); // reset
        }
        result.push_str("=\"");
        for c in value.chars() {
            match c {
                '"' => result.push_str("\\\""),
                '\\' => result.push_str("\\\\"),
                '\n' => result.push_str("\\n"),
                c => result.push(c),
            }
        }
        result.push('"');
    }
}

/// 标量直接取文本，数组和对象取紧凑 JSON
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

impl LogFormatter for TextFormatter {
    fn format(&self, record: &Record) -> Result<String> {
        let Value::Object(fields) = serde_json::to_value(record)? else {
            bail!("{} record did not serialize to an object", record.kind());
        };

        let mut result = String::with_capacity(128);

        if self.config.colored {
            result.push_str("\x1b[2m"); // dimmed
        }
        result.push_str(
            &record
                .base()
                .updated
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
        );
        if self.config.colored {
            result.push_str("\x1b[0m"); // reset
        }

        for (key, value) in &fields {
            if SKIPPED_FIELDS.contains(&key.as_str()) {
                continue;
            }
            let text = value_text(value);
            if SKIPPED_VALUES.contains(&text.as_str()) {
                continue;
            }
            self.push_pair(&mut result, "", key, &text);
        }

        for (key, value) in record.meta() {
            self.push_pair(&mut result, "_", key, value);
        }

        Ok(result)
    }
}

crate::impl_from!(TextFormatterConfig => TextFormatter);
crate::impl_box_from!(TextFormatter => dyn LogFormatter);
