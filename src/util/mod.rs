//! Utility modules for jx-project

pub mod logging;

pub use logging::{init_logging, LoggingConfig};
