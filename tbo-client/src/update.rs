//! Long-polling update stream.
//!
//! [`Client::stream_updates`](crate::Client::stream_updates) spawns a task that
//! calls `getUpdates` with an advancing offset and forwards every [`Update`]
//! through a channel. Failures are logged and retried after a short pause.
//!
//! The offset moves past every entry that carries an `update_id`, even one
//! that fails to decode; such updates are logged and dropped.

use std::time::Duration;

use serde_json::Value;
use tbo_types::Deserializable;
use tbo_types::types::Update;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::Client;

/// Pause after a failed `getUpdates` call.
const ERROR_BACKOFF: Duration = Duration::from_secs(1);

/// Asynchronous stream of [`Update`]s.
///
/// Dropping the stream stops the polling task.
pub struct UpdateStream {
    rx:   mpsc::UnboundedReceiver<Update>,
    task: JoinHandle<()>,
}

impl UpdateStream {
    /// Wait for the next update. Returns `None` once polling has stopped.
    pub async fn next(&mut self) -> Option<Update> {
        self.rx.recv().await
    }
}

impl Drop for UpdateStream {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub(crate) fn spawn(client: Client, poll_timeout: Duration) -> UpdateStream {
    let (tx, rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(run_poll_loop(client, poll_timeout, tx));
    UpdateStream { rx, task }
}

async fn run_poll_loop(client: Client, poll_timeout: Duration, tx: mpsc::UnboundedSender<Update>) {
    let timeout = i32::try_from(poll_timeout.as_secs()).unwrap_or(i32::MAX);
    let mut offset: Option<i64> = None;

    while !tx.is_closed() {
        match client.get_updates_raw(offset, None, Some(timeout)).await {
            Ok(batch) => {
                for raw in batch {
                    let Some(id) = raw.get("update_id").and_then(Value::as_i64) else {
                        tracing::warn!("[tbo] Skipping update without an update_id");
                        continue;
                    };
                    offset = Some(id + 1);
                    match Update::from_value(&raw) {
                        Ok(update) => {
                            if tx.send(update).is_err() {
                                return;
                            }
                        }
                        Err(e) => tracing::warn!("[tbo] Skipping update {id}: {e}"),
                    }
                }
            }
            Err(e) => {
                tracing::warn!("[tbo] getUpdates failed: {e}; retrying in {ERROR_BACKOFF:?}");
                sleep(ERROR_BACKOFF).await;
            }
        }
    }
    tracing::debug!("[tbo] Update stream closed");
}
