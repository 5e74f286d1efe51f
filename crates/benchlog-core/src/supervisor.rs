//! Session supervisor
//!
//! Keeps the monitor alive across transport failures: open, handshake,
//! run acquisition, and when the run ends for any reason log a crash
//! timestamp and description, release the transport, and start over.
//!
//! A failure to *open* the port propagates out and ends the process, as
//! does nothing else; restart only applies once a session existed.

use std::future::Future;
use std::time::Duration;

use chrono::Local;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;

use crate::acquisition::run_monitor;
use crate::datalog::LogWriter;
use crate::protocol::{Session, TransportError};

/// Buffered operator commands per session; stdin pacing keeps this small
const COMMAND_CHANNEL_DEPTH: usize = 8;

/// Run monitor sessions forever, restarting on failure.
///
/// `open_session` is called once per session. `attach_relay` receives
/// the fresh command channel sender; the relay it spawns is abandoned
/// (not cancelled) when the session ends. `restart_delay` spaces out
/// reopen attempts so a dead port does not cause a restart storm.
pub async fn run_supervised<T, F, Fut, A>(
    mut open_session: F,
    mut attach_relay: A,
    restart_delay: Duration,
    log: &LogWriter,
) -> Result<(), TransportError>
where
    T: AsyncRead + AsyncWrite + Unpin + Send,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Session<T>, TransportError>>,
    A: FnMut(mpsc::Sender<String>),
{
    loop {
        let mut session = open_session().await?;

        match session.handshake().await {
            Ok(()) => {
                let (tx, rx) = mpsc::channel(COMMAND_CHANNEL_DEPTH);
                attach_relay(tx);
                match run_monitor(session, rx, log).await {
                    Ok(()) => log_crash(&"monitor loop returned"),
                    Err(e) => log_crash(&e),
                }
            }
            // Explicit restart trigger, never a silent hang
            Err(e) => log_crash(&e),
        }

        // Session (and port) released above; pace the retry
        tokio::time::sleep(restart_delay).await;
        tracing::info!("restarting session");
    }
}

/// Crash diagnostics go to the operator console, never to the log file.
fn log_crash(err: &dyn std::fmt::Display) {
    println!("Program crashed at {}.", Local::now().format("%H:%M:%S"));
    println!("{err}");
}
