//! Setpoint sweep acquisition
//!
//! Commands each level in turn, takes a fixed number of reads at each,
//! and logs `[elapsed_minutes, level, s1..s4]` per read. The rig is
//! returned to level 0 on every exit path, including failures.

use chrono::Local;
use tokio::io::{AsyncRead, AsyncWrite};

use super::RunError;
use crate::clock::now_minutes;
use crate::config::SweepConfig;
use crate::datalog::LogWriter;
use crate::protocol::{LineStream, Session};
use crate::reading::{parse_fields, Reading};

/// Sensor fields expected per sweep telemetry line
const SWEEP_FIELDS: usize = 4;

/// Run one full sweep: handshake, then every configured level for
/// `reads_per_level` reads each.
///
/// A handshake mismatch is fatal to the run; the caller decides what to
/// do with the process. The session is consumed and the port released
/// when this returns.
pub async fn run_sweep<T>(
    mut session: Session<T>,
    config: &SweepConfig,
    log: &LogWriter,
) -> Result<(), RunError>
where
    T: AsyncRead + AsyncWrite + Unpin + Send,
{
    session.handshake().await?;

    println!(
        "Experiment beginning at {}",
        Local::now().format("%H:%M:%S")
    );
    println!("Experiment will last {} hours.", config.estimated_hours());

    let mut lines = session.into_lines();
    let result = drive_sweep(&mut lines, config, log).await;

    // Return the rig to its neutral level even after a failure
    if let Err(e) = lines.write_line("t0").await {
        tracing::warn!(error = %e, "failed to reset level after sweep");
    }

    result
}

async fn drive_sweep<T>(
    lines: &mut LineStream<T>,
    config: &SweepConfig,
    log: &LogWriter,
) -> Result<(), RunError>
where
    T: AsyncRead + AsyncWrite + Unpin + Send,
{
    for &level in &config.levels {
        lines.write_line(&format!("t{level}")).await?;
        tracing::info!(level, reads = config.reads_per_level, "sweep segment");

        for _ in 0..config.reads_per_level {
            let line = lines.read_line().await?;
            let sensors = parse_fields(&line, SWEEP_FIELDS);
            let reading = Reading::new(
                now_minutes(),
                std::iter::once(f64::from(level)).chain(sensors),
            );
            log.append(&reading).await?;
        }
    }
    Ok(())
}
