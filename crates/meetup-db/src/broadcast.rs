//! Shared broadcast channel for real-time updates.
//!
//! The web server pushes these to WebSocket clients whenever a task,
//! milestone or event changes, so dashboards can re-fetch progress.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// WebSocket message types for real-time updates.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum WebSocketMessage {
    /// A task's status or blocked flag changed.
    TaskUpdated { event_id: String, task_id: String, status: String },
    /// A milestone was completed, reopened, added or removed.
    MilestoneUpdated { event_id: String, milestone_id: String },
    /// Event details changed or the event was removed.
    EventUpdated { event_id: String },
    /// Request a full board refresh.
    BoardRefresh { event_id: String },
}

/// Type alias for the broadcast sender.
pub type BroadcastSender = broadcast::Sender<WebSocketMessage>;

/// Type alias for the broadcast receiver.
pub type BroadcastReceiver = broadcast::Receiver<WebSocketMessage>;

/// Create a new broadcast channel with default capacity.
pub fn create_broadcast_channel() -> BroadcastSender {
    let (tx, _rx) = broadcast::channel(100);
    tx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_wire_format() {
        let msg = WebSocketMessage::TaskUpdated {
            event_id: "e1".to_string(),
            task_id: "t1".to_string(),
            status: "done".to_string(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "TaskUpdated");
        assert_eq!(json["data"]["status"], "done");
    }
}
