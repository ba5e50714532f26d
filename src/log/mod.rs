//! 事件日志模块
//!
//! 捕获三类运行事件（HTTP 请求、应用错误、分级日志），附加元数据，
//! 按级别过滤后渲染到输出流，并交给记录存储持久化。
//!
//! # 特性
//!
//! - 日志级别：Trace, Debug, Info, Warn, Error, Fatal, Panic，以及 NoLevel / Disabled
//! - 三种记录：RequestRecord、ErrorRecord、LogRecord
//! - 三种输出格式：basic、text、json
//! - 输出流：ConsoleAppender、FileAppender、WriterAppender、MemoryAppender
//! - 记录存储：MemoryStore、FileStore，或任意实现 [`RecordStore`] 的类型
//! - 基于配置的创建（JSON5 / YAML / TOML）
//! - axum 请求日志中间件
//!
//! # 快速开始
//!
//! ```rust
//! use eventlog::log::*;
//! use std::sync::Arc;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = LoggerConfig::from_json(r#"
//!         {
//!             level: "info",
//!             format: "text",
//!             colored: false,
//!             appender: {
//!                 type: "ConsoleAppender",
//!                 options: { target: "stdout" }
//!             }
//!         }
//!     "#)?;
//!
//!     let logger = Logger::new(config)?;
//!     let store = Arc::new(MemoryStore::new());
//!     logger.set_store(store.clone())?;
//!
//!     logger.info().str("version", "1.0.0").msg("application started")?;
//!     logger
//!         .error()
//!         .err(Some("connection refused"))
//!         .int("retries", 3)
//!         .send()?;
//!
//!     assert_eq!(store.logs()?.len(), 1);
//!     assert_eq!(store.errors()?.len(), 1);
//!     Ok(())
//! }
//! ```

pub mod appender;
pub mod client_ip;
pub mod config;
pub mod error;
pub mod event;
pub mod formatter;
pub mod global;
pub mod level;
pub mod logger;
pub mod middleware;
pub mod record;
pub mod request;
pub mod store;

// 重新导出核心类型
pub use appender::{
    AppenderConfig, ConsoleAppender, ConsoleAppenderConfig, FileAppender, FileAppenderConfig,
    LogAppender, MemoryAppender, Target, WriterAppender,
};
pub use client_ip::real_user_ip;
pub use config::{ErrorMode, LoggerConfig};
pub use error::{EventError, LoggerError};
pub use event::{format_duration, Event};
pub use formatter::{
    create_formatter, BasicFormatter, BasicFormatterConfig, JsonFormatter, JsonFormatterConfig,
    LogFormat, LogFormatter, TextFormatter, TextFormatterConfig,
};
pub use level::{LogLevel, ParseLevelError};
pub use logger::Logger;
pub use middleware::log_requests;
pub use record::{
    BaseFields, ErrorRecord, LogRecord, Metadata, Record, RecordKind, RequestAuth, RequestRecord,
};
pub use request::{capture, HttpExchange, RequestContext};
pub use store::{FileStore, FileStoreConfig, MemoryStore, RecordStore, StoreConfig, StoreError};
