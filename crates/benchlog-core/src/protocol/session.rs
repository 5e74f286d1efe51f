//! Transport session
//!
//! One session owns the byte stream to the rig from open to close.
//! Dropping the session (or the [`LineStream`] made from it) releases the
//! underlying port on every exit path.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tokio::time::timeout;
use tokio_serial::SerialStream;
use tokio_util::codec::{Framed, LinesCodec};

use super::{TransportError, HANDSHAKE_TOKEN};
use crate::config::SessionConfig;

/// An open transport session, prior to line framing.
///
/// Generic over the byte stream so tests and demo mode can run over an
/// in-memory duplex pipe instead of real hardware.
pub struct Session<T> {
    stream: T,
    read_timeout: Duration,
}

impl Session<SerialStream> {
    /// Open a serial session on the configured port.
    pub async fn open(config: &SessionConfig) -> Result<Self, TransportError> {
        let stream = super::serial::open_stream(&config.port, config.baud_rate)?;
        tracing::info!(port = %config.port, baud = config.baud_rate, "session opened");
        Ok(Self::from_stream(stream, config.read_timeout()))
    }
}

impl<T> Session<T>
where
    T: AsyncRead + AsyncWrite + Unpin + Send,
{
    /// Wrap an already-open byte stream.
    pub fn from_stream(stream: T, read_timeout: Duration) -> Self {
        Self {
            stream,
            read_timeout,
        }
    }

    /// Read exactly `n` bytes, or fail with [`TransportError::Timeout`]
    /// if the read timeout elapses first.
    pub async fn read_exact(&mut self, n: usize) -> Result<Vec<u8>, TransportError> {
        let mut buf = vec![0u8; n];
        match timeout(self.read_timeout, self.stream.read_exact(&mut buf)).await {
            Ok(Ok(_)) => Ok(buf),
            Ok(Err(e)) => Err(TransportError::Io(e)),
            Err(_) => Err(TransportError::Timeout),
        }
    }

    /// Perform the greeting exchange that gates acquisition.
    ///
    /// Reads exactly 5 bytes and requires them to equal `begin`. Anything
    /// else is a [`TransportError::HandshakeMismatch`]; callers decide
    /// whether that is fatal (sweep) or a restart trigger (monitor).
    pub async fn handshake(&mut self) -> Result<(), TransportError> {
        let greeting = self.read_exact(HANDSHAKE_TOKEN.len()).await?;
        if greeting != HANDSHAKE_TOKEN {
            return Err(TransportError::HandshakeMismatch {
                expected: String::from_utf8_lossy(HANDSHAKE_TOKEN).into_owned(),
                actual: String::from_utf8_lossy(&greeting).into_owned(),
            });
        }
        tracing::debug!("handshake complete");
        Ok(())
    }

    /// Switch to newline-framed reads and writes for the acquisition loop.
    pub fn into_lines(self) -> LineStream<T> {
        LineStream {
            framed: Framed::new(self.stream, LinesCodec::new()),
            read_timeout: self.read_timeout,
        }
    }
}

/// Newline-framed view of a session.
pub struct LineStream<T> {
    framed: Framed<T, LinesCodec>,
    read_timeout: Duration,
}

impl<T> LineStream<T>
where
    T: AsyncRead + AsyncWrite + Unpin + Send,
{
    /// Read one line, without its trailing newline.
    ///
    /// A timed-out read surfaces as [`TransportError::Timeout`], never as
    /// an empty string; end of stream is [`TransportError::Closed`].
    /// Cancellation-safe: a partially received line stays buffered.
    pub async fn read_line(&mut self) -> Result<String, TransportError> {
        match timeout(self.read_timeout, self.framed.next()).await {
            Ok(Some(Ok(line))) => Ok(line),
            Ok(Some(Err(e))) => Err(e.into()),
            Ok(None) => Err(TransportError::Closed),
            Err(_) => Err(TransportError::Timeout),
        }
    }

    /// Write one line; a newline terminator is appended on the wire.
    /// No acknowledgement is awaited.
    pub async fn write_line(&mut self, text: &str) -> Result<(), TransportError> {
        self.framed.send(text).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    const TEST_TIMEOUT: Duration = Duration::from_millis(100);

    #[tokio::test]
    async fn test_handshake_accepts_begin() {
        let (host, mut device) = tokio::io::duplex(64);
        device.write_all(b"begin").await.unwrap();

        let mut session = Session::from_stream(host, TEST_TIMEOUT);
        session.handshake().await.unwrap();
    }

    #[tokio::test]
    async fn test_handshake_rejects_other_greeting() {
        let (host, mut device) = tokio::io::duplex(64);
        device.write_all(b"hello").await.unwrap();

        let mut session = Session::from_stream(host, TEST_TIMEOUT);
        match session.handshake().await {
            Err(TransportError::HandshakeMismatch { expected, actual }) => {
                assert_eq!(expected, "begin");
                assert_eq!(actual, "hello");
            }
            other => panic!("expected handshake mismatch, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_handshake_times_out_on_silence() {
        let (host, _device) = tokio::io::duplex(64);
        let mut session = Session::from_stream(host, TEST_TIMEOUT);
        assert!(matches!(
            session.handshake().await,
            Err(TransportError::Timeout)
        ));
    }

    #[tokio::test]
    async fn test_read_line_strips_newline() {
        let (host, mut device) = tokio::io::duplex(64);
        device.write_all(b"1.5 2.5 3.5\n").await.unwrap();

        let mut lines = Session::from_stream(host, TEST_TIMEOUT).into_lines();
        assert_eq!(lines.read_line().await.unwrap(), "1.5 2.5 3.5");
    }

    #[tokio::test]
    async fn test_write_line_appends_newline() {
        let (host, mut device) = tokio::io::duplex(64);
        let mut lines = Session::from_stream(host, TEST_TIMEOUT).into_lines();
        lines.write_line("t20").await.unwrap();

        let mut buf = [0u8; 4];
        device.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"t20\n");
    }

    #[tokio::test]
    async fn test_read_line_reports_closed_stream() {
        let (host, device) = tokio::io::duplex(64);
        drop(device);

        let mut lines = Session::from_stream(host, TEST_TIMEOUT).into_lines();
        assert!(matches!(
            lines.read_line().await,
            Err(TransportError::Closed)
        ));
    }
}
