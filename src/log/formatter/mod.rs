mod basic_formatter;
mod core;
mod json_formatter;
mod registry;
mod text_formatter;

pub use self::core::LogFormatter;
pub use basic_formatter::{BasicFormatter, BasicFormatterConfig};
pub use json_formatter::{JsonFormatter, JsonFormatterConfig};
pub use registry::{create_formatter, LogFormat};
pub use text_formatter::{TextFormatter, TextFormatterConfig};
