use crate::log::formatter::{
    basic_formatter::{BasicFormatter, BasicFormatterConfig},
    json_formatter::{JsonFormatter, JsonFormatterConfig},
    text_formatter::{TextFormatter, TextFormatterConfig},
    LogFormatter,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// 一行简短描述
    #[default]
    Basic,
    /// 空格分隔的 key="value"
    Text,
    /// 每行一个 JSON 对象
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(LogFormat::Basic),
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("unknown log format: {}", s)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Basic => f.write_str("basic"),
            LogFormat::Text => f.write_str("text"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

/// 按输出格式与颜色开关创建 Formatter
pub fn create_formatter(format: LogFormat, colored: bool) -> Box<dyn LogFormatter> {
    match format {
        LogFormat::Basic => Box::new(BasicFormatter::from(BasicFormatterConfig { colored })).into(),
        LogFormat::Text => Box::new(TextFormatter::from(TextFormatterConfig { colored })).into(),
        LogFormat::Json => Box::new(JsonFormatter::from(JsonFormatterConfig::default())).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::level::LogLevel;
    use crate::log::record::{LogRecord, Record};

    fn record() -> Record {
        let mut log = LogRecord::new(LogLevel::Info);
        log.message = "msg".to_string();
        Record::from(log)
    }

    #[test]
    fn test_create_formatter() {
        let basic = create_formatter(LogFormat::Basic, false);
        assert_eq!(basic.format(&record()).unwrap(), "msg");

        let text = create_formatter(LogFormat::Text, false);
        assert!(text.format(&record()).unwrap().contains(r#"message="msg""#));

        let json = create_formatter(LogFormat::Json, true);
        let value: serde_json::Value = serde_json::from_str(&json.format(&record()).unwrap()).unwrap();
        assert_eq!(value["message"], "msg");
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("BASIC".parse::<LogFormat>().unwrap(), LogFormat::Basic);
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("Json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
        assert_eq!(LogFormat::Text.to_string(), "text");
    }

    #[test]
    fn test_log_format_serde() {
        let format: LogFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(format, LogFormat::Json);
        assert_eq!(serde_json::to_string(&LogFormat::Basic).unwrap(), "\"basic\"");
    }
}
