//! Demo Mode - simulated rig for running without hardware
//!
//! Speaks the rig's side of the wire protocol over an in-memory duplex
//! pipe: sends `begin`, emits jittered sensor lines at a fixed rate, and
//! tracks `t<level>` setpoint commands. Drives the `--demo` CLI flag and
//! the end-to-end tests.

use std::io;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream};

/// Simulated rig on one end of a duplex pipe
pub struct DemoDevice {
    /// Sensor fields per telemetry line (4 for sweep, 5 for monitor)
    channels: usize,
    /// Pace of telemetry lines
    interval: Duration,
    /// Whether `t<level>` commands are acknowledged with an `r` status
    /// line. Off for sweep runs, where every line is parsed as data.
    ack_commands: bool,
    /// Current commanded setpoint; sensor baselines track it
    level: f64,
    rng: StdRng,
}

impl DemoDevice {
    /// Create a simulator emitting `channels` sensor fields per line.
    pub fn new(channels: usize, interval: Duration) -> Self {
        Self {
            channels,
            interval,
            ack_commands: false,
            level: 0.0,
            rng: StdRng::from_entropy(),
        }
    }

    /// Acknowledge setpoint commands with an `r`-prefixed status line.
    pub fn ack_commands(mut self) -> Self {
        self.ack_commands = true;
        self
    }

    /// Spawn the device task; returns the host end of the pipe.
    pub fn spawn(mut self) -> DuplexStream {
        let (host, device) = tokio::io::duplex(4096);
        tokio::spawn(async move {
            // Host hanging up is the normal way a demo run ends
            if let Err(e) = self.run(device).await {
                tracing::debug!(error = %e, "demo device stopped");
            }
        });
        host
    }

    async fn run(&mut self, stream: DuplexStream) -> io::Result<()> {
        let (read_half, mut tx) = tokio::io::split(stream);
        tx.write_all(b"begin").await?;

        let mut commands = BufReader::new(read_half).lines();
        let mut ticker = tokio::time::interval(self.interval);
        ticker.tick().await; // first tick completes immediately

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let line = self.telemetry_line();
                    tx.write_all(line.as_bytes()).await?;
                }
                command = commands.next_line() => {
                    match command? {
                        Some(command) => {
                            if let Some(reply) = self.handle_command(&command) {
                                tx.write_all(reply.as_bytes()).await?;
                            }
                        }
                        None => return Ok(()),
                    }
                }
            }
        }
    }

    fn handle_command(&mut self, command: &str) -> Option<String> {
        let ack = match command
            .strip_prefix('t')
            .and_then(|v| v.parse::<f64>().ok())
        {
            Some(level) => {
                self.level = level;
                format!("r level set to {level}\n")
            }
            None => format!("r unknown command: {command}\n"),
        };
        self.ack_commands.then_some(ack)
    }

    fn telemetry_line(&mut self) -> String {
        let fields: Vec<String> = (0..self.channels)
            .map(|i| {
                let baseline = self.level + 10.0 * (i + 1) as f64;
                let jitter: f64 = self.rng.gen_range(-0.5..0.5);
                format!("{:.2}", baseline + jitter)
            })
            .collect();
        format!("{}\n", fields.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Session;

    #[tokio::test]
    async fn test_demo_device_speaks_protocol() {
        let host = DemoDevice::new(5, Duration::from_millis(1))
            .ack_commands()
            .spawn();
        let mut session = Session::from_stream(host, Duration::from_secs(1));
        session.handshake().await.unwrap();

        let mut lines = session.into_lines();
        lines.write_line("t20").await.unwrap();

        // Within a few lines we should see both the ack and telemetry
        let mut saw_ack = false;
        let mut saw_telemetry = false;
        for _ in 0..10 {
            let line = lines.read_line().await.unwrap();
            if line.starts_with('r') {
                saw_ack = true;
            } else if crate::reading::parse_fields(&line, 5)
                .iter()
                .any(|v| *v != 0.0)
            {
                saw_telemetry = true;
            }
            if saw_ack && saw_telemetry {
                break;
            }
        }
        assert!(saw_ack, "no command acknowledgement seen");
        assert!(saw_telemetry, "no telemetry seen");
    }
}
