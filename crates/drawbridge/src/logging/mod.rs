//! Logger setup for hosts embedding the bridge.
//!
//! The library itself only logs through the `log` facade; hosts that already
//! install a logger can ignore this module.

mod init;

pub use init::{init_logging, LoggingConfig};
