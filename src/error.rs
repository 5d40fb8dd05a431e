use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::config::ConfigError;
use crate::execution::ExecutionError;
use crate::models::{ReplyStatus, SignalError, WebhookReply};

/// Ошибки обработки сигнала. Все превращаются в JSON-ответ 500,
/// до транспортного уровня ничего не доходит.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Signal(#[from] SignalError),
    #[error("Execution endpoint error: {0}")]
    Execution(#[from] ExecutionError),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let reply = WebhookReply::new(ReplyStatus::Error, self.to_string());
        (StatusCode::INTERNAL_SERVER_ERROR, Json(reply)).into_response()
    }
}
