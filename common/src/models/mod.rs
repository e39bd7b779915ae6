// Internal modules
mod chain;

// Re-exports
pub use chain::*;
