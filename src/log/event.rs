use crate::log::config::ErrorMode;
use crate::log::error::EventError;
use crate::log::level::LogLevel;
use crate::log::logger::Logger;
use crate::log::record::{format_date, Metadata, Record};
use crate::log::request::{capture, RequestContext};
use chrono::{DateTime, Utc};
use std::fmt::{self, Write as _};
use std::panic::Location;
use std::time::Duration;

/// 正在构建中的事件
///
/// 由 [`Logger`] 的各级别方法创建，绑定一条记录。设置元数据的方法按值链式调用，
/// 不会失败；[`Event::msg`]、[`Event::msgf`]、[`Event::send`] 终结事件，
/// 把记录写入输出流并交给存储。
///
/// 终结只会生效一次：记录被保存（或没有配置存储）后内部引用即被清空，
/// 再次终结什么也不做。保存失败时记录保留在事件中，调用方可以再次终结重试。
///
/// ```
/// use eventlog::log::Logger;
///
/// let logger = Logger::disabled();
/// logger
///     .info()
///     .str("user", "alice")
///     .int("attempt", 3)
///     .msg("login")
///     .unwrap();
/// ```
#[must_use = "an event does nothing until it is finalized"]
pub struct Event<'a> {
    logger: &'a Logger,
    level: LogLevel,
    record: Option<Record>,
    meta: Metadata,
}

impl<'a> Event<'a> {
    pub(crate) fn new(logger: &'a Logger, level: LogLevel, record: Record) -> Self {
        Self {
            logger,
            level,
            record: Some(record),
            meta: Metadata::new(),
        }
    }

    /// 创建事件时的级别
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// 当前绑定的记录，终结后为 `None`
    pub fn record(&self) -> Option<&Record> {
        self.record.as_ref()
    }

    /// 已累积但尚未写入记录的元数据
    pub fn metadata(&self) -> &Metadata {
        &self.meta
    }

    pub fn is_finalized(&self) -> bool {
        self.record.is_none()
    }

    /// 改为绑定一条从请求捕获的请求记录，已设置的元数据保留
    pub fn request(mut self, ctx: &impl RequestContext) -> Self {
        if self.record.is_some() {
            self.record = Some(Record::from(capture(ctx)));
        }
        self
    }

    pub fn str(mut self, key: &str, value: impl Into<String>) -> Self {
        self.meta.insert(key.to_string(), value.into());
        self
    }

    /// 字符串列表以紧凑的 JSON 数组保存
    pub fn strs<I, S>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        let text = serde_json::to_string(&values)
            .unwrap_or_else(|_| format!("[{}]", values.join(" ")));
        self.meta.insert(key.to_string(), text);
        self
    }

    pub fn value(mut self, key: &str, value: impl fmt::Display) -> Self {
        self.meta.insert(key.to_string(), value.to_string());
        self
    }

    pub fn int(mut self, key: &str, value: i64) -> Self {
        self.meta.insert(key.to_string(), value.to_string());
        self
    }

    /// 附加错误
    ///
    /// `None` 不做任何修改。错误记录写入 `error`、`file`、`line` 字段，
    /// 文件与行号取自调用位置；其他记录把错误文本存为元数据 `error`。
    #[track_caller]
    pub fn err<E: fmt::Display>(mut self, err: Option<E>) -> Self {
        let Some(err) = err else {
            return self;
        };

        let location = Location::caller();
        match &mut self.record {
            Some(Record::Error(record)) => {
                record.message = err.to_string();
                record.file = location.file().to_string();
                record.line = location.line();
            }
            _ => {
                self.meta.insert("error".to_string(), err.to_string());
            }
        }
        self
    }

    pub fn time(mut self, key: &str, time: &DateTime<Utc>) -> Self {
        self.meta.insert(key.to_string(), format_date(time));
        self
    }

    pub fn duration(mut self, key: &str, duration: Duration) -> Self {
        self.meta.insert(key.to_string(), format_duration(duration));
        self
    }

    /// 以消息终结事件
    ///
    /// 日志记录的消息写入 `message`，其余记录写入元数据 `msg`；
    /// 末尾的一个换行会被去掉，空消息表示不带消息终结。
    pub fn msg(&mut self, msg: impl AsRef<str>) -> Result<(), EventError> {
        let msg = msg.as_ref();
        let msg = msg.strip_suffix('\n').unwrap_or(msg);

        match &mut self.record {
            Some(Record::Log(record)) if !msg.is_empty() => {
                record.message = msg.to_string();
            }
            Some(_) if !msg.is_empty() => {
                self.meta.insert("msg".to_string(), msg.to_string());
            }
            _ => {}
        }

        self.flush()
    }

    /// 以格式化消息终结事件，配合 `format_args!` 使用
    pub fn msgf(&mut self, args: fmt::Arguments<'_>) -> Result<(), EventError> {
        self.msg(args.to_string())
    }

    /// 不带消息终结事件
    pub fn send(&mut self) -> Result<(), EventError> {
        self.msg("")
    }

    fn flush(&mut self) -> Result<(), EventError> {
        let logger = self.logger;
        let Some(record) = self.record.as_mut() else {
            return Ok(());
        };

        if !logger.has_sinks() {
            self.record = None;
            return Ok(());
        }

        record.refresh_updated();

        let stream_enabled = match &*record {
            Record::Log(log) => log.level.passes(logger.level()),
            Record::Request(_) | Record::Error(_) => true,
        };

        record.meta_mut().extend(self.meta.drain(..));

        let mut failure = None;
        if stream_enabled {
            if let Err(e) = logger.write(record) {
                failure = Some(e);
            }
        }

        match logger.store() {
            Some(store) => match store.save(record) {
                Ok(()) => self.record = None,
                Err(e) => {
                    let err = EventError::from(e);
                    logger.report(&err);
                    failure = Some(err);
                }
            },
            None => self.record = None,
        }

        match (failure, logger.error_mode()) {
            (Some(err), ErrorMode::Propagate) => Err(err),
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("level", &self.level)
            .field("record", &self.record)
            .field("meta", &self.meta)
            .finish()
    }
}

/// 紧凑的时长文本，如 `1.5s`、`250ms`、`1m30s`、`1h0m0s`
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < 1_000 {
        return format!("{}ns", nanos);
    }
    if nanos < 1_000_000 {
        return format!("{}µs", decimal(nanos, 1_000));
    }
    if nanos < 1_000_000_000 {
        return format!("{}ms", decimal(nanos, 1_000_000));
    }

    let secs = duration.as_secs();
    let hours = secs / 3600;
    let minutes = secs % 3600 / 60;

    let mut out = String::new();
    if hours > 0 {
        let _ = write!(out, "{}h", hours);
    }
    if hours > 0 || minutes > 0 {
        let _ = write!(out, "{}m", minutes);
    }
    let _ = write!(out, "{}s", decimal(nanos % 60_000_000_000, 1_000_000_000));
    out
}

// value / unit，去掉小数部分末尾的 0
fn decimal(value: u128, unit: u128) -> String {
    let whole = value / unit;
    let frac = value % unit;
    if frac == 0 {
        return whole.to_string();
    }

    let width = unit.ilog10() as usize;
    let frac = format!("{:0width$}", frac, width = width);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}
