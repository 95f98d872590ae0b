//! Live position feed (not yet supported).
//!
//! PassioGo also pushes vehicle positions over a WebSocket. Only the
//! subscription handshake is implemented: [`WebSocketFeed`] connects, sends
//! one [`SubscriptionMessage`], and then logs whatever arrives. Nothing
//! else in the crate depends on this module; consumers who want positions
//! today should use [`crate::tracker`].

mod error;
mod websocket;

use std::future::Future;

use serde::Serialize;

use crate::domain::SystemId;

pub use error::LiveFeedError;
pub use websocket::WebSocketFeed;

/// Fields requested by a location subscription.
pub const LOCATION_FIELDS: [&str; 6] = [
    "busId",
    "latitude",
    "longitude",
    "course",
    "paxLoad",
    "more",
];

/// First message sent on a live connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionMessage {
    pub subscribe: String,
    pub user_id: Vec<SystemId>,
    pub field: Vec<String>,
}

impl SubscriptionMessage {
    /// Subscribe to vehicle locations for one system.
    pub fn location(user_id: SystemId) -> Self {
        Self {
            subscribe: "location".to_string(),
            user_id: vec![user_id],
            field: LOCATION_FIELDS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// A push channel for live vehicle data.
pub trait LiveFeed {
    /// Open the feed and subscribe to `user_id`'s vehicle locations.
    fn subscribe(
        &mut self,
        user_id: SystemId,
    ) -> impl Future<Output = Result<(), LiveFeedError>> + Send;

    /// Drop the connection, if any.
    fn close(&mut self);
}
