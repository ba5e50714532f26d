//! EventLog - 面向后端服务的结构化事件日志
//!
//! 捕获 HTTP 请求、应用错误和分级日志三类事件，渲染到输出流并持久化到记录存储。
//!
//! ## 模块
//!
//! - **log**: 事件日志模块（级别、记录、格式化、输出流、存储、中间件）
//!
//! ## 设计理念
//!
//! - 🔒 **类型安全**: 三种记录是封闭的枚举，分发处穷尽匹配
//! - 🧩 **显式装配**: Logger 在启动时构造一次，以引用传入各处
//! - ⚡ **同步直写**: 不缓冲、不重试，在调用方线程上完成

#[macro_use]
mod macros;

pub mod log;

// 重新导出主要的公共 API
pub use log::{
    Event, EventError, LogAppender, LogFormat, LogFormatter, LogLevel, Logger, LoggerConfig,
    Record, RecordStore,
};
