//! `LISTEN`-based change feed.
//!
//! The migration installs a trigger that runs `pg_notify` with a JSON payload
//! of the form `{"op": "UPDATE", "id": "<uuid>"}` on every row change. A
//! dedicated pooled connection listens on that channel from a blocking task
//! and forwards decoded events into a broadcast channel until the feed is
//! dropped.

use crate::board::{
    domain::TaskId,
    ports::{ChangeEvent, ChangeFeed, ChangeKind, TaskStoreError, TaskStoreResult},
};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use serde::Deserialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::broadcast;

type ListenConnection = PooledConnection<ConnectionManager<PgConnection>>;

/// Buffered notifications before a slow subscriber is told to resync.
const FEED_CAPACITY: usize = 64;

/// Parameters for one listener.
#[derive(Debug, Clone)]
pub(super) struct ListenerSettings {
    pub(super) table: String,
    pub(super) channel: String,
    pub(super) poll_interval: Duration,
}

#[derive(Debug, Deserialize)]
struct NotifyPayload {
    op: String,
    id: Option<uuid::Uuid>,
}

/// Issues `LISTEN` on `connection` and starts forwarding notifications.
pub(super) async fn spawn(
    mut connection: ListenConnection,
    settings: ListenerSettings,
) -> TaskStoreResult<ChangeFeed> {
    let listen_sql = format!("LISTEN {}", quote_identifier(&settings.channel));
    let listening = tokio::task::spawn_blocking(move || {
        connection
            .batch_execute(&listen_sql)
            .map_err(TaskStoreError::persistence)?;
        Ok::<_, TaskStoreError>(connection)
    })
    .await
    .map_err(TaskStoreError::persistence)??;

    let (sender, receiver) = broadcast::channel(FEED_CAPACITY);
    let stopped = Arc::new(AtomicBool::new(false));
    let loop_stopped = Arc::clone(&stopped);
    let poll_interval = settings.poll_interval;
    let channel = settings.channel.clone();

    tokio::task::spawn_blocking(move || {
        forward_notifications(listening, &sender, &loop_stopped, poll_interval);
    });
    tracing::debug!(table = %settings.table, channel = %channel, "listening for task changes");

    Ok(
        ChangeFeed::new(settings.table, receiver).with_teardown(move || {
            stopped.store(true, Ordering::Release);
        }),
    )
}

fn forward_notifications(
    mut connection: ListenConnection,
    sender: &broadcast::Sender<ChangeEvent>,
    stopped: &AtomicBool,
    poll_interval: Duration,
) {
    while !stopped.load(Ordering::Acquire) {
        let mut receivers_gone = false;
        for notification in connection.notifications_iter() {
            match notification {
                Ok(received) => {
                    if sender.send(decode_payload(&received.payload)).is_err() {
                        receivers_gone = true;
                        break;
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %err, "change listener lost its connection");
                    return;
                }
            }
        }
        if receivers_gone {
            break;
        }
        std::thread::sleep(poll_interval);
    }
    unlisten(&mut connection);
}

fn unlisten(connection: &mut ListenConnection) {
    if let Err(err) = connection.batch_execute("UNLISTEN *") {
        tracing::debug!(error = %err, "failed to release change listener");
    }
}

/// Decodes a trigger payload; anything unexpected asks consumers to resync.
pub(super) fn decode_payload(payload: &str) -> ChangeEvent {
    let Ok(decoded) = serde_json::from_str::<NotifyPayload>(payload) else {
        return ChangeEvent::resync();
    };
    let kind = match decoded.op.as_str() {
        "INSERT" => ChangeKind::Insert,
        "UPDATE" => ChangeKind::Update,
        "DELETE" => ChangeKind::Delete,
        _ => return ChangeEvent::resync(),
    };
    ChangeEvent {
        kind,
        task_id: decoded.id.map(TaskId::from_uuid),
    }
}

fn quote_identifier(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}
