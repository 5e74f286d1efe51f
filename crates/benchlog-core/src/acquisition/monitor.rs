//! Interactive monitor acquisition
//!
//! Unbounded loop: telemetry lines are parsed and logged; lines starting
//! with `r` are rig status text relayed straight to the operator console.
//! Operator commands arrive over a channel and are written to the rig
//! between reads, so the transport has exactly one owning task.

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;

use super::RunError;
use crate::clock::now_minutes;
use crate::datalog::LogWriter;
use crate::protocol::Session;
use crate::reading::{parse_fields, Reading};

/// Sensor fields expected per monitor telemetry line
const MONITOR_FIELDS: usize = 5;

/// Run the monitor loop until a transport or log failure ends it.
///
/// The caller performs the handshake first; a greeting mismatch should
/// restart the session rather than silently fall through. `commands` is
/// the relay hand-off: each received line is forwarded verbatim to the
/// rig. A closed command channel only disables forwarding; acquisition
/// continues.
pub async fn run_monitor<T>(
    session: Session<T>,
    mut commands: mpsc::Receiver<String>,
    log: &LogWriter,
) -> Result<(), RunError>
where
    T: AsyncRead + AsyncWrite + Unpin + Send,
{
    let mut lines = session.into_lines();
    let mut commands_open = true;

    loop {
        tokio::select! {
            line = lines.read_line() => {
                let line = line?;
                if let Some(status) = line.strip_prefix('r') {
                    // Rig status text: operator console only, never logged
                    println!("{status}");
                } else {
                    let sensors = parse_fields(&line, MONITOR_FIELDS);
                    let reading = Reading::new(now_minutes(), sensors);
                    log.append(&reading).await?;
                }
            }
            command = commands.recv(), if commands_open => {
                match command {
                    Some(command) => lines.write_line(&command).await?,
                    None => {
                        tracing::debug!("command channel closed, forwarding disabled");
                        commands_open = false;
                    }
                }
            }
        }
    }
}
