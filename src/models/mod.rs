pub mod order;
pub mod signal;

pub use order::OrderPayload;
pub use signal::{Signal, SignalError};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyStatus {
    Success,
    Ignored,
    Error,
}

/// Тело ответа вебхука: `{"status": ..., "message": ...}`
#[derive(Debug, Clone, Serialize)]
pub struct WebhookReply {
    pub status: ReplyStatus,
    pub message: String,
}

impl WebhookReply {
    pub fn new(status: ReplyStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}
