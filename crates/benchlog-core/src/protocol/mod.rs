//! Serial Transport
//!
//! Owns the serial connection to the measurement rig for the lifetime of
//! one acquisition run: port enumeration, the `begin` handshake, and
//! newline-framed reads and writes.

mod error;
mod serial;
mod session;

pub use error::TransportError;
pub use serial::{list_ports, open_stream, PortInfo};
pub use session::{LineStream, Session};

use std::time::Duration;

/// Default baud rate for the rig link
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Default read timeout.
///
/// Deliberately generous: the rig can sit idle for minutes between sweep
/// segments while the bench settles.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(200);

/// Greeting the rig sends once after reset; acquisition is gated on it.
pub const HANDSHAKE_TOKEN: &[u8] = b"begin";
