//! WebSocket implementation of [`LiveFeed`].

use futures::{SinkExt, StreamExt};
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info};

use crate::domain::SystemId;

use super::{LiveFeed, LiveFeedError, SubscriptionMessage};

/// Default live feed endpoint.
const DEFAULT_URI: &str = "wss://passio3.com/";

/// Live feed over a single WebSocket connection.
///
/// Incoming messages are only logged; they are not decoded yet.
#[derive(Debug)]
pub struct WebSocketFeed {
    uri: String,
    reader: Option<JoinHandle<()>>,
}

impl Default for WebSocketFeed {
    fn default() -> Self {
        Self::new(DEFAULT_URI)
    }
}

impl WebSocketFeed {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            reader: None,
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn is_connected(&self) -> bool {
        self.reader.as_ref().is_some_and(|r| !r.is_finished())
    }
}

impl LiveFeed for WebSocketFeed {
    async fn subscribe(&mut self, user_id: SystemId) -> Result<(), LiveFeedError> {
        if self.is_connected() {
            return Err(LiveFeedError::AlreadySubscribed);
        }

        let text = serde_json::to_string(&SubscriptionMessage::location(user_id))?;
        let (mut ws, _) = connect_async(self.uri.as_str()).await?;
        ws.send(Message::Text(text)).await?;
        info!(uri = %self.uri, %user_id, "live feed subscribed");

        let uri = self.uri.clone();
        self.reader = Some(tokio::spawn(async move {
            while let Some(msg) = ws.next().await {
                match msg {
                    Ok(Message::Close(frame)) => {
                        debug!(uri = %uri, ?frame, "live feed closed by server");
                        let _ = ws.close(None).await;
                        break;
                    }
                    Ok(msg) => debug!(uri = %uri, len = msg.len(), "live feed message"),
                    Err(e) => {
                        error!(uri = %uri, error = %e, "live feed error");
                        break;
                    }
                }
            }
        }));

        Ok(())
    }

    fn close(&mut self) {
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
    }
}

impl Drop for WebSocketFeed {
    fn drop(&mut self) {
        self.close();
    }
}
