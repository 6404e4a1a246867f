//! Logging utilities.
//!
//! Centralizes logger initialization behind the standard `log` facade so the
//! engine and any frontends share one setup path.

mod init;

pub use init::{init_logging, LoggingConfig};
