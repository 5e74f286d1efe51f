//! Acquisition loops
//!
//! Converts raw rig lines into timestamped numeric records and persists
//! them. Two variants share the read/parse/timestamp/append shape: a
//! bounded setpoint sweep and an unbounded interactive monitor.

mod monitor;
mod sweep;

pub use monitor::run_monitor;
pub use sweep::run_sweep;

use thiserror::Error;

use crate::protocol::TransportError;

/// Errors that end an acquisition run
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("log write failed: {0}")]
    Log(#[from] std::io::Error),
}
