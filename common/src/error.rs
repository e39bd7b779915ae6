// Standard library imports
use std::io;

// Third party imports
use thiserror::Error;

/// Lỗi chung
#[derive(Debug, Error)]
pub enum CommonError {
    /// Lỗi cấu hình
    #[error("Config error: {0}")]
    Config(String),
    /// Dung lượng cache không hợp lệ
    #[error("Invalid cache capacity: {0}")]
    InvalidCapacity(usize),
    /// Lỗi khởi tạo logger
    #[error("Logger error: {0}")]
    Logger(String),
    /// Lỗi JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Lỗi IO
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Kiểu kết quả chung
pub type CommonResult<T> = Result<T, CommonError>;
