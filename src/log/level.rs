use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;

/// 日志级别
///
/// 按 rank 排序：`trace < debug < info < warn < error < fatal < panic`，
/// 另有两个哨兵值 `NoLevel`（不过滤）与 `Disabled`（全部屏蔽）。
/// 数值形式的级别用 `Custom` 表示，比较与相等都只看 rank。
#[derive(Debug, Clone, Copy)]
pub enum LogLevel {
    /// 最详细的日志
    Trace,
    /// 调试信息
    Debug,
    /// 一般信息
    Info,
    /// 警告信息
    Warn,
    /// 错误信息
    Error,
    /// 致命错误
    Fatal,
    /// 需要中止进程的错误
    Panic,
    /// 未指定级别，始终输出
    NoLevel,
    /// 禁用，始终屏蔽
    Disabled,
    /// 数值级别（来自机器生成的数据）
    Custom(i8),
}

/// 级别解析错误，保留原始输入便于诊断
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseLevelError {
    #[error("unknown level: '{input}', defaulting to no-level")]
    Unknown { input: String },

    #[error("out-of-bounds level: '{input}', defaulting to no-level")]
    OutOfBounds { input: String },
}

impl ParseLevelError {
    /// 解析失败的原始输入
    pub fn input(&self) -> &str {
        match self {
            ParseLevelError::Unknown { input } | ParseLevelError::OutOfBounds { input } => input,
        }
    }

    /// 解析失败时的回退级别
    pub fn fallback(&self) -> LogLevel {
        LogLevel::NoLevel
    }
}

impl LogLevel {
    /// 所有具名级别，按 rank 升序
    pub const ALL: [LogLevel; 9] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
        LogLevel::Panic,
        LogLevel::NoLevel,
        LogLevel::Disabled,
    ];

    /// 级别的数值 rank
    pub fn rank(self) -> i8 {
        match self {
            LogLevel::Trace => -1,
            LogLevel::Debug => 0,
            LogLevel::Info => 1,
            LogLevel::Warn => 2,
            LogLevel::Error => 3,
            LogLevel::Fatal => 4,
            LogLevel::Panic => 5,
            LogLevel::NoLevel => 6,
            LogLevel::Disabled => 7,
            LogLevel::Custom(n) => n,
        }
    }

    /// 从 rank 构造，已知数值归一化为具名级别
    pub fn from_rank(rank: i8) -> Self {
        match rank {
            -1 => LogLevel::Trace,
            0 => LogLevel::Debug,
            1 => LogLevel::Info,
            2 => LogLevel::Warn,
            3 => LogLevel::Error,
            4 => LogLevel::Fatal,
            5 => LogLevel::Panic,
            6 => LogLevel::NoLevel,
            7 => LogLevel::Disabled,
            n => LogLevel::Custom(n),
        }
    }

    /// 解析级别：名称大小写不敏感，否则按 i8 范围内的整数解析
    pub fn parse(s: &str) -> Result<Self, ParseLevelError> {
        let lower = s.to_lowercase();
        if let Some(level) = LogLevel::ALL.iter().find(|l| l.as_str() == lower) {
            return Ok(*level);
        }

        let n: i64 = s.parse().map_err(|_| ParseLevelError::Unknown {
            input: s.to_string(),
        })?;
        let rank = i8::try_from(n).map_err(|_| ParseLevelError::OutOfBounds {
            input: s.to_string(),
        })?;
        Ok(LogLevel::from_rank(rank))
    }

    /// 具名级别的规范文本，数值级别返回空串（请使用 Display）
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
            LogLevel::Panic => "panic",
            LogLevel::Disabled => "disabled",
            LogLevel::NoLevel | LogLevel::Custom(_) => "",
        }
    }

    /// 判断该级别在给定阈值下是否放行
    pub fn passes(self, threshold: LogLevel) -> bool {
        if threshold == LogLevel::Disabled || self == LogLevel::Disabled {
            return false;
        }
        if self == LogLevel::NoLevel || threshold == LogLevel::NoLevel {
            return true;
        }
        self >= threshold
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl PartialEq for LogLevel {
    fn eq(&self, other: &Self) -> bool {
        self.rank() == other.rank()
    }
}

impl Eq for LogLevel {}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl Hash for LogLevel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
    }
}

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogLevel::parse(s)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Custom(n) => write!(f, "{}", n),
            level => f.write_str(level.as_str()),
        }
    }
}

impl Serialize for LogLevel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

struct LogLevelVisitor;

impl<'de> Visitor<'de> for LogLevelVisitor {
    type Value = LogLevel;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a level name or an integer in the i8 range")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<LogLevel, E> {
        LogLevel::parse(v).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<LogLevel, E> {
        i8::try_from(v)
            .map(LogLevel::from_rank)
            .map_err(|_| E::custom(ParseLevelError::OutOfBounds { input: v.to_string() }))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<LogLevel, E> {
        i8::try_from(v)
            .map(LogLevel::from_rank)
            .map_err(|_| E::custom(ParseLevelError::OutOfBounds { input: v.to_string() }))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<LogLevel, E> {
        if v.fract() == 0.0 && v >= i8::MIN as f64 && v <= i8::MAX as f64 {
            Ok(LogLevel::from_rank(v as i8))
        } else {
            Err(E::custom(ParseLevelError::OutOfBounds { input: v.to_string() }))
        }
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LogLevelVisitor)
    }
}
