use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One raw notification as delivered by a message source (SMS inbox, push, etc.)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IncomingMessage {
    pub id: String,
    pub sender: String,
    pub body: String,
    /// Milliseconds since the Unix epoch, as reported by the source
    pub timestamp: i64,
}

impl IncomingMessage {
    pub fn new(
        id: impl Into<String>,
        sender: impl Into<String>,
        body: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            id: id.into(),
            sender: sender.into(),
            body: body.into(),
            timestamp,
        }
    }
}
