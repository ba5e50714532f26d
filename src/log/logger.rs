use crate::log::appender::LogAppender;
use crate::log::config::{ErrorMode, LoggerConfig};
use crate::log::error::{EventError, LoggerError};
use crate::log::event::Event;
use crate::log::formatter::{create_formatter, LogFormat, LogFormatter};
use crate::log::level::LogLevel;
use crate::log::record::{ErrorRecord, LogRecord, Record};
use crate::log::request::{capture, RequestContext};
use crate::log::store::RecordStore;
use anyhow::Result;
use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;

/// 核心日志器
///
/// 在启动时按配置构造一次，之后以引用传给各处使用。持有最低级别、
/// 输出格式、颜色开关、输出流以及只能设置一次的持久化存储。
/// 事件在调用方线程上同步终结，Logger 不会缓冲或重试。
pub struct Logger {
    level: LogLevel,
    format: LogFormat,
    colored: bool,
    error_mode: ErrorMode,
    formatter: Box<dyn LogFormatter>,
    appender: Option<Arc<dyn LogAppender>>,
    store: OnceCell<Arc<dyn RecordStore>>,
}

impl Logger {
    /// 从配置创建 Logger，按需创建输出流与存储
    pub fn new(config: LoggerConfig) -> Result<Self> {
        let appender = config.appender.as_ref().map(|c| c.build()).transpose()?;

        let logger = Self {
            level: config.level,
            format: config.format,
            colored: config.colored,
            error_mode: config.error_mode,
            formatter: create_formatter(config.format, config.colored),
            appender,
            store: OnceCell::new(),
        };

        if let Some(store_config) = &config.store {
            logger.set_store(store_config.build()?)?;
        }

        Ok(logger)
    }

    /// 没有任何输出的 Logger，所有事件都被静默丢弃
    pub fn disabled() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Basic,
            colored: false,
            error_mode: ErrorMode::Report,
            formatter: create_formatter(LogFormat::Basic, false),
            appender: None,
            store: OnceCell::new(),
        }
    }

    /// 替换输出流
    pub fn with_appender(mut self, appender: Arc<dyn LogAppender>) -> Self {
        self.appender = Some(appender);
        self
    }

    /// 移除输出流
    pub fn without_appender(mut self) -> Self {
        self.appender = None;
        self
    }

    /// 设置持久化存储，只有第一次设置生效
    ///
    /// 已经设置过时返回 [`LoggerError::StoreAlreadyInitialized`]，原存储保持不变
    pub fn set_store(&self, store: Arc<dyn RecordStore>) -> Result<(), LoggerError> {
        self.store
            .set(store)
            .map_err(|_| LoggerError::StoreAlreadyInitialized)
    }

    /// 当前最低级别
    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn format(&self) -> LogFormat {
        self.format
    }

    pub fn colored(&self) -> bool {
        self.colored
    }

    pub fn error_mode(&self) -> ErrorMode {
        self.error_mode
    }

    pub fn appender(&self) -> Option<&Arc<dyn LogAppender>> {
        self.appender.as_ref()
    }

    pub fn store(&self) -> Option<&Arc<dyn RecordStore>> {
        self.store.get()
    }

    /// 是否至少配置了一个输出
    pub fn has_sinks(&self) -> bool {
        self.appender.is_some() || self.store.get().is_some()
    }

    /// 指定级别的事件：error 及以上绑定错误记录，其余绑定日志记录
    pub fn event(&self, level: LogLevel) -> Event<'_> {
        let record = match level {
            LogLevel::Error => Record::from(ErrorRecord::new()),
            LogLevel::Fatal => Record::from(ErrorRecord::fatal(false)),
            LogLevel::Panic => Record::from(ErrorRecord::fatal(true)),
            level => Record::from(LogRecord::new(level)),
        };
        Event::new(self, level, record)
    }

    pub fn trace(&self) -> Event<'_> {
        self.event(LogLevel::Trace)
    }

    pub fn debug(&self) -> Event<'_> {
        self.event(LogLevel::Debug)
    }

    pub fn info(&self) -> Event<'_> {
        self.event(LogLevel::Info)
    }

    pub fn warn(&self) -> Event<'_> {
        self.event(LogLevel::Warn)
    }

    pub fn error(&self) -> Event<'_> {
        self.event(LogLevel::Error)
    }

    pub fn fatal(&self) -> Event<'_> {
        self.event(LogLevel::Fatal)
    }

    pub fn panic(&self) -> Event<'_> {
        self.event(LogLevel::Panic)
    }

    /// 捕获一次 HTTP 请求，生成绑定请求记录的事件
    pub fn request(&self, ctx: &impl RequestContext) -> Event<'_> {
        Event::new(self, LogLevel::Info, Record::from(capture(ctx)))
    }

    /// 格式化并写入输出流，未配置输出流时什么都不做
    pub(crate) fn write(&self, record: &Record) -> Result<(), EventError> {
        let Some(appender) = &self.appender else {
            return Ok(());
        };

        let line = self.formatter.format(record).map_err(|e| {
            let err = EventError::Render(e.to_string());
            self.report(&err);
            err
        })?;

        appender.append(&line).map_err(|e| {
            let err = EventError::Append(e.to_string());
            self.report(&err);
            err
        })
    }

    /// 输出一条诊断行；输出流不可用时退回到 log 门面
    pub(crate) fn report(&self, err: &dyn fmt::Display) {
        let line = format!("error: {}", err);
        match &self.appender {
            Some(appender) => {
                if let Err(e) = appender.append(&line) {
                    ::log::warn!("{} (diagnostic write failed: {})", line, e);
                }
            }
            None => ::log::warn!("{}", line),
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::disabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::appender::MemoryAppender;
    use crate::log::store::{MemoryStore, StoreConfig};

    #[test]
    fn test_logger_new_from_config() -> Result<()> {
        let config = LoggerConfig::from_json(
            r#"
            {
                level: "debug",
                format: "json",
                colored: false,
                store: { type: "MemoryStore" }
            }
        "#,
        )?;

        let logger = Logger::new(config)?;
        assert_eq!(logger.level(), LogLevel::Debug);
        assert_eq!(logger.format(), LogFormat::Json);
        assert!(!logger.colored());
        assert!(logger.appender().is_some());
        assert!(logger.store().is_some());
        Ok(())
    }

    #[test]
    fn test_logger_store_set_once() -> Result<()> {
        let logger = Logger::new(LoggerConfig {
            store: Some(StoreConfig::MemoryStore),
            ..LoggerConfig::default()
        })?;

        let second = Arc::new(MemoryStore::new());
        assert_eq!(
            logger.set_store(second),
            Err(LoggerError::StoreAlreadyInitialized)
        );
        Ok(())
    }

    #[test]
    fn test_logger_set_store_first_wins() {
        let logger = Logger::disabled();
        let first = Arc::new(MemoryStore::new());
        let second = Arc::new(MemoryStore::new());

        assert!(logger.set_store(first.clone()).is_ok());
        assert!(logger.set_store(second.clone()).is_err());

        let mut ev = logger.info();
        ev.msg("hello").unwrap();
        assert_eq!(first.logs().unwrap().len(), 1);
        assert!(second.logs().unwrap().is_empty());
    }

    #[test]
    fn test_logger_event_binding() {
        let logger = Logger::disabled();

        assert!(matches!(logger.trace().record(), Some(Record::Log(_))));
        assert!(matches!(logger.warn().record(), Some(Record::Log(_))));

        match logger.error().record() {
            Some(Record::Error(e)) => assert!(!e.fatal && !e.should_abort()),
            other => panic!("unexpected record: {:?}", other),
        }
        match logger.fatal().record() {
            Some(Record::Error(e)) => assert!(e.fatal && !e.should_abort()),
            other => panic!("unexpected record: {:?}", other),
        }
        match logger.panic().record() {
            Some(Record::Error(e)) => assert!(e.fatal && e.should_abort()),
            other => panic!("unexpected record: {:?}", other),
        }
        match logger.debug().record() {
            Some(Record::Log(l)) => assert_eq!(l.level, LogLevel::Debug),
            other => panic!("unexpected record: {:?}", other),
        }
    }

    #[test]
    fn test_logger_report_goes_to_stream() {
        let appender = Arc::new(MemoryAppender::new());
        let logger = Logger::disabled().with_appender(appender.clone());

        logger.report(&"disk full");
        assert_eq!(appender.lines(), vec!["error: disk full"]);

        let logger = logger.without_appender();
        assert!(!logger.has_sinks());
        logger.report(&"nobody listens");
    }
}
