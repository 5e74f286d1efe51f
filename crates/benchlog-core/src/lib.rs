//! # Benchlog Core Library
//!
//! Core functionality for the benchlog serial telemetry logger.
//!
//! This library provides:
//! - Serial transport sessions with a fixed-token handshake
//! - Line parsing with per-field zero-fallback
//! - Timestamped CSV datalogging to date-derived files
//! - Sweep and monitor acquisition loops
//! - An operator command relay and a crash-restart supervisor
//! - A demo device simulator for running without hardware
//!
//! ## Example
//!
//! ```rust,ignore
//! use benchlog_core::acquisition::run_sweep;
//! use benchlog_core::config::{SessionConfig, SweepConfig};
//! use benchlog_core::datalog::LogWriter;
//! use benchlog_core::protocol::Session;
//!
//! let session = Session::open(&SessionConfig::default()).await?;
//! let log = LogWriter::sweep(".");
//! run_sweep(session, &SweepConfig::default(), &log).await?;
//! ```

#![warn(missing_docs)]

pub mod acquisition;
pub mod clock;
pub mod config;
pub mod datalog;
pub mod demo;
pub mod protocol;
pub mod reading;
pub mod relay;
pub mod supervisor;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::acquisition::{run_monitor, run_sweep, RunError};
    pub use crate::config::{MonitorConfig, SessionConfig, SweepConfig};
    pub use crate::datalog::LogWriter;
    pub use crate::demo::DemoDevice;
    pub use crate::protocol::{Session, TransportError};
    pub use crate::reading::Reading;
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
