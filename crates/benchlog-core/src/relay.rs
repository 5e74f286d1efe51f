//! Operator command relay
//!
//! A detached background task that reads one line of operator input at a
//! time and hands it to the acquisition task over a channel. There is no
//! correlation between a sent command and any rig response; `r`-prefixed
//! status lines are the only feedback channel.
//!
//! The task has no lifecycle guarantee: when the session restarts it is
//! abandoned, not cancelled, and it terminates silently the next time it
//! fails to hand off a line (or its input ends).

use std::time::Duration;

use tokio::io::{stdin, AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Spawn a relay reading lines from an arbitrary source.
///
/// After each forwarded line the relay pauses for `pause` to avoid
/// flooding the rig; the pause is politeness, not correctness.
pub fn spawn_relay<R>(source: R, commands: mpsc::Sender<String>, pause: Duration) -> JoinHandle<()>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut input = source.lines();
        loop {
            match input.next_line().await {
                Ok(Some(line)) => {
                    if commands.send(line).await.is_err() {
                        // Session gone; this relay was abandoned
                        break;
                    }
                    tokio::time::sleep(pause).await;
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::debug!(error = %e, "relay input failed");
                    break;
                }
            }
        }
        tracing::debug!("command relay stopped");
    })
}

/// Spawn the stdin relay used by monitor runs.
pub fn spawn_stdin_relay(commands: mpsc::Sender<String>, pause: Duration) -> JoinHandle<()> {
    spawn_relay(BufReader::new(stdin()), commands, pause)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_relay_forwards_lines() {
        let (tx, mut rx) = mpsc::channel(4);
        spawn_relay(&b"start\npump 3\n"[..], tx, Duration::ZERO);

        assert_eq!(rx.recv().await.unwrap(), "start");
        assert_eq!(rx.recv().await.unwrap(), "pump 3");
        // Source exhausted: sender dropped, channel closes
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_relay_exits_when_receiver_dropped() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let handle = spawn_relay(&b"ignored\n"[..], tx, Duration::ZERO);
        handle.await.unwrap();
    }
}
