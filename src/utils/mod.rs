pub mod config;
pub mod formatting;
pub mod logging;

// Re-exports
pub use config::*;
pub use logging::*;
