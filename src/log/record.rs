use crate::log::level::LogLevel;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// 记录附带的元数据，保持插入顺序，值在写入时即转换为文本
pub type Metadata = IndexMap<String, String>;

/// 记录时间戳的文本布局（UTC，毫秒精度）
pub const DEFAULT_DATE_LAYOUT: &str = "%Y-%m-%d %H:%M:%S%.3fZ";

/// 按 [`DEFAULT_DATE_LAYOUT`] 格式化时间
pub fn format_date(time: &DateTime<Utc>) -> String {
    time.format(DEFAULT_DATE_LAYOUT).to_string()
}

/// 以 [`DEFAULT_DATE_LAYOUT`] (反)序列化 `DateTime<Utc>`
pub mod date_layout {
    use super::DEFAULT_DATE_LAYOUT;
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&time.format(DEFAULT_DATE_LAYOUT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, DEFAULT_DATE_LAYOUT)
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}

/// 三种记录共有的字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseFields {
    /// 持久化时由存储分配，未保存前为空
    #[serde(default)]
    pub id: String,
    #[serde(with = "date_layout")]
    pub created: DateTime<Utc>,
    #[serde(with = "date_layout")]
    pub updated: DateTime<Utc>,
}

impl BaseFields {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            created: now,
            updated: now,
        }
    }

    /// 尚未被存储分配 id
    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }

    pub fn refresh_updated(&mut self) {
        self.updated = Utc::now();
    }
}

impl Default for BaseFields {
    fn default() -> Self {
        Self::new()
    }
}

/// 请求的认证上下文
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestAuth {
    #[default]
    Guest,
    Admin,
    AuthRecord,
}

impl RequestAuth {
    /// 由两个上下文标志推导，普通认证记录优先于管理员
    pub fn from_flags(is_admin: bool, is_auth_record: bool) -> Self {
        if is_auth_record {
            RequestAuth::AuthRecord
        } else if is_admin {
            RequestAuth::Admin
        } else {
            RequestAuth::Guest
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RequestAuth::Guest => "guest",
            RequestAuth::Admin => "admin",
            RequestAuth::AuthRecord => "auth_record",
        }
    }
}

impl fmt::Display for RequestAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP 请求记录
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestRecord {
    #[serde(flatten)]
    pub base: BaseFields,
    pub url: String,
    /// 小写的请求方法
    pub method: String,
    pub status: u16,
    pub auth: RequestAuth,
    pub user_ip: String,
    pub remote_ip: String,
    pub referer: String,
    pub user_agent: String,
    #[serde(default)]
    pub meta: Metadata,
}

impl fmt::Display for RequestRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

/// 应用错误记录
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ErrorRecord {
    #[serde(flatten)]
    pub base: BaseFields,
    #[serde(rename = "error")]
    pub message: String,
    pub file: String,
    pub line: u32,
    pub fatal: bool,
    /// 外部监督者据此决定是否中止进程，不参与序列化
    #[serde(skip)]
    abort: bool,
    #[serde(default)]
    pub meta: Metadata,
}

impl ErrorRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// 致命错误，`abort` 标记是否应中止进程
    pub fn fatal(abort: bool) -> Self {
        Self {
            fatal: true,
            abort,
            ..Self::default()
        }
    }

    pub fn should_abort(&self) -> bool {
        self.abort
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// 分级的自由文本日志记录
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LogRecord {
    #[serde(flatten)]
    pub base: BaseFields,
    pub level: LogLevel,
    pub message: String,
    #[serde(default)]
    pub meta: Metadata,
}

impl LogRecord {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// 记录类型判别值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Request,
    Error,
    Log,
}

impl RecordKind {
    /// 持久化时使用的表名
    pub fn table_name(self) -> &'static str {
        match self {
            RecordKind::Request => "_requests",
            RecordKind::Error => "_errors",
            RecordKind::Log => "_logs",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Request => f.write_str("request"),
            RecordKind::Error => f.write_str("error"),
            RecordKind::Log => f.write_str("log"),
        }
    }
}

/// 一条日志事件，三种记录形态之一
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Request(RequestRecord),
    Error(ErrorRecord),
    Log(LogRecord),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Request(_) => RecordKind::Request,
            Record::Error(_) => RecordKind::Error,
            Record::Log(_) => RecordKind::Log,
        }
    }

    pub fn base(&self) -> &BaseFields {
        match self {
            Record::Request(r) => &r.base,
            Record::Error(r) => &r.base,
            Record::Log(r) => &r.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut BaseFields {
        match self {
            Record::Request(r) => &mut r.base,
            Record::Error(r) => &mut r.base,
            Record::Log(r) => &mut r.base,
        }
    }

    pub fn id(&self) -> &str {
        &self.base().id
    }

    pub fn meta(&self) -> &Metadata {
        match self {
            Record::Request(r) => &r.meta,
            Record::Error(r) => &r.meta,
            Record::Log(r) => &r.meta,
        }
    }

    pub fn meta_mut(&mut self) -> &mut Metadata {
        match self {
            Record::Request(r) => &mut r.meta,
            Record::Error(r) => &mut r.meta,
            Record::Log(r) => &mut r.meta,
        }
    }

    pub fn refresh_updated(&mut self) {
        self.base_mut().refresh_updated();
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::Request(r) => r.fmt(f),
            Record::Error(r) => r.fmt(f),
            Record::Log(r) => r.fmt(f),
        }
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Record::Request(r) => r.serialize(serializer),
            Record::Error(r) => r.serialize(serializer),
            Record::Log(r) => r.serialize(serializer),
        }
    }
}

impl From<RequestRecord> for Record {
    fn from(r: RequestRecord) -> Self {
        Record::Request(r)
    }
}

impl From<ErrorRecord> for Record {
    fn from(r: ErrorRecord) -> Self {
        Record::Error(r)
    }
}

impl From<LogRecord> for Record {
    fn from(r: LogRecord) -> Self {
        Record::Log(r)
    }
}
