//! Transport errors

use thiserror::Error;
use tokio_util::codec::LinesCodecError;

/// Errors that can occur on the serial link to the rig
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("serial port error: {0}")]
    Serial(#[from] tokio_serial::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("read timed out")]
    Timeout,

    #[error("transport closed")]
    Closed,

    #[error("handshake mismatch: expected {expected:?}, got {actual:?}")]
    HandshakeMismatch {
        /// The greeting the rig is required to send
        expected: String,
        /// What actually arrived
        actual: String,
    },

    #[error("line exceeded maximum length")]
    LineTooLong,
}

impl From<LinesCodecError> for TransportError {
    fn from(err: LinesCodecError) -> Self {
        match err {
            LinesCodecError::MaxLineLengthExceeded => TransportError::LineTooLong,
            LinesCodecError::Io(e) => TransportError::Io(e),
        }
    }
}
