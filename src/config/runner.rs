//! Параметры процесса: адрес, путь к конфигу, секрет и URL WunderTrading.
//! Значения берутся из аргументов командной строки либо из окружения (.env).

use std::path::PathBuf;

use clap::Parser;

/// Заглушка, в реальном развёртывании задаётся через SECRET_KEY
pub const DEFAULT_SECRET_KEY: &str = "123456";

/// Заглушка, в реальном развёртывании задаётся через WUNDERTRADING_WEBHOOK_URL
pub const DEFAULT_EXECUTION_URL: &str = "https://api.wundertrading.com/api/v1/...";

#[derive(Debug, Clone, Parser)]
#[command(name = "webhook_server", about = "PumpFarm PRO signal webhook relay")]
pub struct RunnerConfig {
    /// Адрес для прослушивания
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Файл с фильтрами (.json / .yaml), перечитывается на каждый запрос
    #[arg(long, env = "CONFIG_FILE", default_value = "config.json")]
    pub config_file: PathBuf,

    #[arg(long, env = "SECRET_KEY", default_value = DEFAULT_SECRET_KEY, hide_env_values = true, hide_default_value = true)]
    pub secret_key: String,

    #[arg(long, env = "WUNDERTRADING_WEBHOOK_URL", default_value = DEFAULT_EXECUTION_URL)]
    pub execution_url: String,
}

impl RunnerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}
