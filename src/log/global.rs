use crate::log::config::LoggerConfig;
use crate::log::error::LoggerError;
use crate::log::event::Event;
use crate::log::level::LogLevel;
use crate::log::logger::Logger;
use crate::log::request::RequestContext;
use anyhow::Result;
use once_cell::sync::{Lazy, OnceCell};

/// 进程级默认 Logger，只能设置一次
static GLOBAL_LOGGER: OnceCell<Logger> = OnceCell::new();

/// 未初始化时使用的 Logger，没有任何输出
static DISABLED_LOGGER: Lazy<Logger> = Lazy::new(Logger::disabled);

/// 按配置初始化全局 Logger
///
/// # 示例
///
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     eventlog::log::global::init(LoggerConfig::from_yaml("level: debug")?)?;
///     eventlog::log::global::info().msg("started")?;
///     Ok(())
/// }
/// ```
pub fn init(config: LoggerConfig) -> Result<()> {
    set(Logger::new(config)?)?;
    Ok(())
}

/// 设置全局 Logger，已经设置过时返回错误，原 Logger 保持不变
pub fn set(logger: Logger) -> Result<(), LoggerError> {
    GLOBAL_LOGGER
        .set(logger)
        .map_err(|_| LoggerError::GlobalAlreadyInitialized)
}

/// 全局 Logger 是否已经初始化
pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// 获取全局 Logger，未初始化时返回一个静默的 Logger
pub fn get() -> &'static Logger {
    GLOBAL_LOGGER.get().unwrap_or_else(|| &*DISABLED_LOGGER)
}

pub fn event(level: LogLevel) -> Event<'static> {
    get().event(level)
}

pub fn trace() -> Event<'static> {
    get().trace()
}

pub fn debug() -> Event<'static> {
    get().debug()
}

pub fn info() -> Event<'static> {
    get().info()
}

pub fn warn() -> Event<'static> {
    get().warn()
}

pub fn error() -> Event<'static> {
    get().error()
}

pub fn fatal() -> Event<'static> {
    get().fatal()
}

pub fn panic() -> Event<'static> {
    get().panic()
}

pub fn request(ctx: &impl RequestContext) -> Event<'static> {
    get().request(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_uninitialized_is_silent() {
        assert!(!is_initialized());
        assert!(!get().has_sinks());

        let mut ev = error().err(Some("nobody listens"));
        assert!(ev.send().is_ok());
        assert!(ev.is_finalized());
        assert!(info().msg("dropped").is_ok());
    }
}
