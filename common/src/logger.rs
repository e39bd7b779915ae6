// Third party imports
use serde::{Deserialize, Serialize};
use tracing_subscriber::{
    fmt,
    EnvFilter,
    prelude::*,
};

// Internal imports
use crate::error::{CommonError, CommonResult};

/// Mức độ log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Debug
    Debug,
    /// Info
    Info,
    /// Warning
    Warning,
    /// Error
    Error,
}

impl LogLevel {
    /// Directive dùng cho EnvFilter
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warning => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Cấu hình logger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Mức độ log mặc định, bị ghi đè bởi RUST_LOG
    pub default_level: LogLevel,
    /// Bật màu ANSI cho stderr
    pub with_ansi: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            default_level: LogLevel::Info,
            with_ansi: true,
        }
    }
}

impl LoggerConfig {
    /// EnvFilter theo RUST_LOG, nếu không có thì dùng mức mặc định
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_level.as_directive()))
    }
}

/// Khởi tạo tracing subscriber toàn cục.
///
/// Chỉ gọi được một lần mỗi process; lần gọi sau trả về `CommonError::Logger`.
pub fn init_logger(config: &LoggerConfig) -> CommonResult<()> {
    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(
            fmt::Layer::new()
                .with_writer(std::io::stderr)
                .with_ansi(config.with_ansi)
        )
        .try_init()
        .map_err(|e| CommonError::Logger(e.to_string()))
}
