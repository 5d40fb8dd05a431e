use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};

use crate::config::ConfigStore;
use crate::error::GatewayError;
use crate::execution::OrderForwarder;
use crate::gates::{GateChain, GateContext, GateOutcome, IgnoreReason};
use crate::models::{OrderPayload, ReplyStatus, Signal, WebhookReply};

pub const INDEX_MESSAGE: &str = "✅ PumpFarm PRO Webhook is running";

#[derive(Clone)]
pub struct AppState {
    pub config_store: Arc<dyn ConfigStore>,
    pub forwarder: Arc<dyn OrderForwarder>,
    pub gates: Arc<GateChain>,
    pub secret_key: Arc<str>,
    /// Источник текущего времени для фильтра торговых часов
    pub clock: fn() -> DateTime<Utc>,
}

impl AppState {
    pub fn new(
        config_store: Arc<dyn ConfigStore>,
        forwarder: Arc<dyn OrderForwarder>,
        secret_key: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            config_store,
            forwarder,
            gates: Arc::new(GateChain::standard()),
            secret_key: secret_key.into(),
            clock: Utc::now,
        }
    }

    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }
}

/// Итог обработки сигнала
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    InvalidSecret,
    Ignored(IgnoreReason),
    Forwarded,
}

impl IntoResponse for Verdict {
    fn into_response(self) -> Response {
        let (code, reply) = match self {
            Verdict::InvalidSecret => (
                StatusCode::FORBIDDEN,
                WebhookReply::new(ReplyStatus::Error, "Invalid secret"),
            ),
            Verdict::Ignored(reason) => (
                StatusCode::OK,
                WebhookReply::new(ReplyStatus::Ignored, reason.message()),
            ),
            // Код ответа исполнителя на ответ вызывающему не влияет
            Verdict::Forwarded => (
                StatusCode::OK,
                WebhookReply::new(ReplyStatus::Success, "Signal forwarded"),
            ),
        };
        (code, Json(reply)).into_response()
    }
}

pub async fn index() -> &'static str {
    INDEX_MESSAGE
}

pub async fn webhook(State(state): State<AppState>, body: Bytes) -> Response {
    let signal = Signal::from_body(&body);
    match process_signal(&state, &signal).await {
        Ok(verdict) => verdict.into_response(),
        Err(err) => {
            log::error!("❌ Ошибка обработки сигнала: {}", err);
            err.into_response()
        }
    }
}

/// Секрет -> фильтры -> ордер -> отправка.
/// Конфигурация читается заново до проверки секрета.
pub async fn process_signal(state: &AppState, signal: &Signal) -> Result<Verdict, GatewayError> {
    let settings = state.config_store.load().await?;

    if !signal.secret_matches(&state.secret_key) {
        log::warn!("⛔️ Неверный секретный ключ");
        return Ok(Verdict::InvalidSecret);
    }

    let pair = signal.pair()?;
    let ctx = GateContext {
        signal,
        pair: &pair,
        settings: &settings,
        now: (state.clock)(),
    };
    if let GateOutcome::Ignore(reason) = state.gates.evaluate(&ctx)? {
        return Ok(Verdict::Ignored(reason));
    }

    let order = OrderPayload::market_buy(pair, &settings)?;
    let downstream_status = state.forwarder.forward(&order).await?;
    log::info!(
        "📤 Сигнал {} отправлен в WunderTrading: {}",
        order.pair,
        downstream_status
    );

    Ok(Verdict::Forwarded)
}
