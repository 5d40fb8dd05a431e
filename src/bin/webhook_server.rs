//! PumpFarm PRO webhook - приём сигналов пампа и пересылка ордеров в WunderTrading
//! POST /webhook принимает сигнал, GET / отвечает что сервер жив

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use pumpfarm_webhook::api::{create_router, AppState};
use pumpfarm_webhook::config::runner::RunnerConfig;
use pumpfarm_webhook::config::FileConfigStore;
use pumpfarm_webhook::execution::WunderTradingClient;
use pumpfarm_webhook::utils::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let runner = RunnerConfig::parse();
    if runner.uses_default_secret() {
        log::warn!("⚠️  SECRET_KEY не задан, используется значение по умолчанию");
    }

    let config_store = FileConfigStore::new(&runner.config_file);
    let forwarder = WunderTradingClient::new(runner.execution_url.clone());
    log::info!("📝 Конфигурация фильтров: {}", config_store.path().display());
    log::info!("📤 WunderTrading webhook: {}", forwarder.webhook_url());

    let state = AppState::new(
        Arc::new(config_store),
        Arc::new(forwarder),
        runner.secret_key.as_str(),
    );
    let app = create_router(state);

    let addr = runner.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("не удалось занять адрес {}", addr))?;
    log::info!("🚀 Webhook сервер запущен на http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("👋 Сервер остановлен");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("❌ Не удалось установить обработчик Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
