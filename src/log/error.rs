use crate::log::store::StoreError;
use thiserror::Error;

/// 事件终结时的失败
///
/// 每种失败都会先以诊断行的形式写入输出流
#[derive(Error, Debug)]
pub enum EventError {
    #[error("failed to render record: {0}")]
    Render(String),

    #[error("failed to write record: {0}")]
    Append(String),

    #[error("failed to save record: {0}")]
    Store(#[from] StoreError),
}

/// Logger 装配阶段的错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoggerError {
    #[error("record store already initialized")]
    StoreAlreadyInitialized,

    #[error("global logger already initialized")]
    GlobalAlreadyInitialized,
}
