// Re-exports for common crate
pub mod prelude {
    // Common modules
    pub use crate::cache;
    pub use crate::error;
    pub use crate::models;

    pub use crate::cache::{MemoCell, MemoDiscipline, MemoInput, MemoMap};
    pub use crate::error::*;
    pub use crate::models::{ChainType, KnownNetworks, NetworkClassifier};
}

// Modules paths - tất cả các module trong src
pub mod cache;
pub mod error;
pub mod logger;
pub mod models;

// Re-exports
pub use cache::{MemoCell, MemoDiscipline, MemoInput, MemoMap, DEFAULT_MEMO_MAP_CAPACITY};
pub use error::{CommonError, CommonResult};
pub use logger::{init_logger, LogLevel, LoggerConfig};
pub use models::{ChainType, KnownNetworks, NetworkClassifier};
