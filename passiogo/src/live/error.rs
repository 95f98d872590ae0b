//! Live feed error types.

use tokio_tungstenite::tungstenite;

/// Errors from the live feed.
#[derive(Debug, thiserror::Error)]
pub enum LiveFeedError {
    /// WebSocket handshake or transport failed
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    /// Subscription message could not be encoded
    #[error("failed to encode subscription: {0}")]
    Encode(#[from] serde_json::Error),

    /// `subscribe` called on a feed that is already subscribed
    #[error("feed is already subscribed")]
    AlreadySubscribed,
}
