//! Change-notification channel.
//!
//! Subscribes to the backend's websocket feed, one topic per watched
//! table. The payload carries no row data and makes no guarantees; the
//! only obligation on receipt is to re-run the fetch-and-aggregate
//! pipeline for the affected screen.

use futures::{SinkExt, StreamExt};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio_tungstenite::{connect_async, tungstenite::Message};

/// A table changed on the backend.
#[derive(Debug, Clone)]
pub struct TableChange {
    pub table: String,
}

/// Websocket subscription client.
pub struct RealtimeClient {
    endpoint: String,
    api_key: String,
    tables: Vec<String>,
    heartbeat: Duration,
    event_tx: broadcast::Sender<TableChange>,
    message_ref: Arc<AtomicU64>,
    running: Arc<AtomicBool>,
}

impl RealtimeClient {
    /// Create a new client watching the given tables.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        tables: Vec<String>,
        heartbeat: Duration,
    ) -> Self {
        let (tx, _) = broadcast::channel(64);

        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            tables,
            heartbeat,
            event_tx: tx,
            message_ref: Arc::new(AtomicU64::new(1)),
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Derive the websocket endpoint from the backend's base URL.
    pub fn endpoint_from_base(base_url: &str) -> String {
        let host = base_url
            .trim_end_matches('/')
            .trim_start_matches("https://")
            .trim_start_matches("http://");
        format!("wss://{}/realtime/v1/websocket", host)
    }

    /// Topic string for a table subscription.
    pub fn topic_for(table: &str) -> String {
        format!("realtime:public:{}", table)
    }

    /// Table name from a topic string, if it is a table topic.
    pub fn table_from_topic(topic: &str) -> Option<&str> {
        topic
            .strip_prefix("realtime:public:")
            .filter(|t| !t.is_empty())
    }

    /// Subscribe to change events.
    pub fn subscribe(&self) -> broadcast::Receiver<TableChange> {
        self.event_tx.subscribe()
    }

    /// Check if the receive loop is running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stop the receive loop.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Connect, join the table topics and spawn the receive loop.
    pub async fn start(&self) -> Result<(), RealtimeError> {
        if self.running.load(Ordering::SeqCst) {
            return Err(RealtimeError::AlreadyRunning);
        }

        let url = format!("{}?apikey={}&vsn=1.0.0", self.endpoint, self.api_key);
        let (ws, _) = connect_async(url.as_str())
            .await
            .map_err(|e| RealtimeError::ConnectFailed(e.to_string()))?;

        let (mut write, mut read) = ws.split();

        // Join one topic per watched table
        for table in &self.tables {
            let join = self.control_message(&Self::topic_for(table), "phx_join");
            write
                .send(Message::Text(join))
                .await
                .map_err(|e| RealtimeError::SendFailed(e.to_string()))?;
            tracing::info!("Subscribed to {} changes", table);
        }

        self.running.store(true, Ordering::SeqCst);

        let event_tx = self.event_tx.clone();
        let running = Arc::clone(&self.running);
        let message_ref = Arc::clone(&self.message_ref);
        let heartbeat = self.heartbeat;

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(heartbeat);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                if !running.load(Ordering::SeqCst) {
                    break;
                }

                tokio::select! {
                    _ = interval.tick() => {
                        let seq = message_ref.fetch_add(1, Ordering::SeqCst);
                        let heartbeat = serde_json::json!({
                            "topic": "phoenix",
                            "event": "heartbeat",
                            "payload": {},
                            "ref": seq.to_string(),
                        })
                        .to_string();

                        if let Err(e) = write.send(Message::Text(heartbeat)).await {
                            tracing::warn!("Realtime heartbeat failed: {}", e);
                            running.store(false, Ordering::SeqCst);
                            break;
                        }
                    }
                    msg = read.next() => {
                        match msg {
                            Some(Ok(Message::Text(text))) => {
                                if let Some(change) = parse_change(&text) {
                                    tracing::debug!("Change on table {}", change.table);
                                    let _ = event_tx.send(change);
                                }
                            }
                            Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => {}
                            Some(Ok(Message::Close(_))) | None => {
                                tracing::warn!("Realtime channel closed by backend");
                                running.store(false, Ordering::SeqCst);
                                break;
                            }
                            Some(Ok(_)) => {}
                            Some(Err(e)) => {
                                tracing::warn!("Realtime receive error: {}", e);
                                running.store(false, Ordering::SeqCst);
                                break;
                            }
                        }
                    }
                }
            }
        });

        Ok(())
    }

    /// Build a control frame for a topic.
    fn control_message(&self, topic: &str, event: &str) -> String {
        let seq = self.message_ref.fetch_add(1, Ordering::SeqCst);
        serde_json::json!({
            "topic": topic,
            "event": event,
            "payload": {},
            "ref": seq.to_string(),
        })
        .to_string()
    }
}

/// Extract a table change from an incoming frame.
///
/// Control replies (`phx_reply`, heartbeats) are ignored; any data event
/// on a table topic counts as a change.
fn parse_change(text: &str) -> Option<TableChange> {
    let value: serde_json::Value = serde_json::from_str(text).ok()?;
    let topic = value.get("topic")?.as_str()?;
    let event = value.get("event")?.as_str()?;

    if event == "phx_reply" || event == "phx_error" || topic == "phoenix" {
        return None;
    }

    RealtimeClient::table_from_topic(topic).map(|table| TableChange {
        table: table.to_string(),
    })
}

/// Realtime channel errors.
#[derive(Debug, thiserror::Error)]
pub enum RealtimeError {
    #[error("Already running")]
    AlreadyRunning,

    #[error("Failed to connect: {0}")]
    ConnectFailed(String),

    #[error("Failed to send: {0}")]
    SendFailed(String),
}
