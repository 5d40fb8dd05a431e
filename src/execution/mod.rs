//! Отправка ордеров на исполнение (WunderTrading webhook)

use async_trait::async_trait;
use reqwest::Client;

use crate::models::OrderPayload;

#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Получатель ордеров. Возвращает HTTP-код ответа исполнителя;
/// ошибкой считается только сбой транспорта.
#[async_trait]
pub trait OrderForwarder: Send + Sync {
    async fn forward(&self, order: &OrderPayload) -> Result<u16, ExecutionError>;
}

/// Один POST без повторов, таймауты по умолчанию у reqwest
pub struct WunderTradingClient {
    client: Client,
    webhook_url: String,
}

impl WunderTradingClient {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        WunderTradingClient {
            client: Client::new(),
            webhook_url: webhook_url.into(),
        }
    }

    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }
}

#[async_trait]
impl OrderForwarder for WunderTradingClient {
    async fn forward(&self, order: &OrderPayload) -> Result<u16, ExecutionError> {
        log::debug!("📨 POST {} {:?}", self.webhook_url, order);
        let response = self.client.post(&self.webhook_url).json(order).send().await?;
        Ok(response.status().as_u16())
    }
}
