//! Run configuration
//!
//! Plain data structs with the rig's fixed defaults; the CLI can load
//! them from a JSON file and override individual values with flags.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::protocol::{DEFAULT_BAUD_RATE, DEFAULT_READ_TIMEOUT};

/// Transport session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Serial port name
    pub port: String,
    /// Baud rate
    pub baud_rate: u32,
    /// Read timeout in seconds
    pub read_timeout_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            port: String::new(),
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout_secs: DEFAULT_READ_TIMEOUT.as_secs(),
        }
    }
}

impl SessionConfig {
    /// Read timeout as a [`Duration`]
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}

/// Sweep run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Commanded setpoint levels, iterated once each in order
    pub levels: Vec<u32>,
    /// Reads taken at each level
    pub reads_per_level: u32,
    /// Directory the sweep log file is written to
    pub log_dir: PathBuf,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            levels: vec![0, 20, 40, 60, 80],
            reads_per_level: 300,
            log_dir: PathBuf::from("."),
        }
    }
}

impl SweepConfig {
    /// Total reads over the whole sweep
    pub fn total_reads(&self) -> u64 {
        u64::from(self.reads_per_level) * self.levels.len() as u64
    }

    /// Up-front duration estimate printed to the operator, in hours.
    /// Assumes the rig's fixed 4-reads-per-minute pace; not measured.
    pub fn estimated_hours(&self) -> f64 {
        self.total_reads() as f64 / 240.0
    }
}

/// Monitor run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Directory the daily log file is written to
    pub log_dir: PathBuf,
    /// Pause between forwarded operator commands, in seconds
    pub command_pause_secs: u64,
    /// Delay before the supervisor reopens the port after a crash, in seconds
    pub restart_delay_secs: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("."),
            command_pause_secs: 1,
            restart_delay_secs: 1,
        }
    }
}

impl MonitorConfig {
    /// Pause between forwarded commands
    pub fn command_pause(&self) -> Duration {
        Duration::from_secs(self.command_pause_secs)
    }

    /// Delay between supervisor restarts
    pub fn restart_delay(&self) -> Duration {
        Duration::from_secs(self.restart_delay_secs)
    }
}
