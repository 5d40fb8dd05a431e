//! Конфигурация фильтров сигналов
//! Документ перечитывается на каждый запрос, поэтому правки файла
//! применяются без перезапуска сервера.

pub mod runner;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

pub const ALLOWED_SYMBOLS: &str = "ALLOWED_SYMBOLS";
pub const MIN_PRICE_CHANGE_PERCENT: &str = "MIN_PRICE_CHANGE_PERCENT";
pub const MIN_VOLUME_USDT: &str = "MIN_VOLUME_USDT";
pub const USE_TIME_FILTER: &str = "USE_TIME_FILTER";
pub const TRADE_START_HOUR: &str = "TRADE_START_HOUR";
pub const TRADE_END_HOUR: &str = "TRADE_END_HOUR";
pub const LEVERAGE: &str = "LEVERAGE";
pub const TAKE_PROFIT_PERCENT: &str = "TAKE_PROFIT_PERCENT";
pub const STOP_LOSS_PERCENT: &str = "STOP_LOSS_PERCENT";
pub const AMOUNT: &str = "AMOUNT";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing config key: '{0}'")]
    MissingKey(&'static str),
    #[error("Invalid config value for '{key}': expected {expected}, got {value}")]
    InvalidValue {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Снимок конфигурации для одного запроса.
///
/// Значения хранятся как есть. Отсутствие ключа или неподходящий тип
/// становятся ошибкой только когда до ключа доходит соответствующий фильтр.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(rename = "ALLOWED_SYMBOLS", default)]
    pub allowed_symbols: Option<Value>,
    #[serde(rename = "MIN_PRICE_CHANGE_PERCENT", default)]
    pub min_price_change_percent: Option<Value>,
    #[serde(rename = "MIN_VOLUME_USDT", default)]
    pub min_volume_usdt: Option<Value>,
    #[serde(rename = "USE_TIME_FILTER", default)]
    pub use_time_filter: Option<Value>,
    #[serde(rename = "TRADE_START_HOUR", default)]
    pub trade_start_hour: Option<Value>,
    #[serde(rename = "TRADE_END_HOUR", default)]
    pub trade_end_hour: Option<Value>,

    // Параметры ордера передаются как есть, без проверки типа
    #[serde(rename = "LEVERAGE", default)]
    pub leverage: Option<Value>,
    #[serde(rename = "TAKE_PROFIT_PERCENT", default)]
    pub take_profit_percent: Option<Value>,
    #[serde(rename = "STOP_LOSS_PERCENT", default)]
    pub stop_loss_percent: Option<Value>,
    #[serde(rename = "AMOUNT", default)]
    pub amount: Option<Value>,
}

fn require<'a>(value: &'a Option<Value>, key: &'static str) -> Result<&'a Value, ConfigError> {
    value.as_ref().ok_or(ConfigError::MissingKey(key))
}

// Число для сравнения с порогом; true/false считаются как 1/0
fn as_number(key: &'static str, value: &Value) -> Result<f64, ConfigError> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| invalid(key, "number", value)),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        _ => Err(invalid(key, "number", value)),
    }
}

// Истинность значения: 0, "", [] и {} - выключено
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn invalid(key: &'static str, expected: &'static str, value: &Value) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        expected,
        value: value.to_string(),
    }
}

impl Settings {
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Есть ли пара в ALLOWED_SYMBOLS (список строк)
    pub fn allows_symbol(&self, pair: &str) -> Result<bool, ConfigError> {
        match require(&self.allowed_symbols, ALLOWED_SYMBOLS)? {
            Value::Array(symbols) => Ok(symbols.iter().any(|s| s.as_str() == Some(pair))),
            other => Err(invalid(ALLOWED_SYMBOLS, "list of symbols", other)),
        }
    }

    pub fn min_price_change_percent(&self) -> Result<f64, ConfigError> {
        let value = require(&self.min_price_change_percent, MIN_PRICE_CHANGE_PERCENT)?;
        as_number(MIN_PRICE_CHANGE_PERCENT, value)
    }

    pub fn min_volume_usdt(&self) -> Result<f64, ConfigError> {
        let value = require(&self.min_volume_usdt, MIN_VOLUME_USDT)?;
        as_number(MIN_VOLUME_USDT, value)
    }

    pub fn use_time_filter(&self) -> Result<bool, ConfigError> {
        require(&self.use_time_filter, USE_TIME_FILTER).map(is_truthy)
    }

    /// Час начала окна; 6 и 6.0 равнозначны
    pub fn trade_start_hour(&self) -> Result<f64, ConfigError> {
        let value = require(&self.trade_start_hour, TRADE_START_HOUR)?;
        as_number(TRADE_START_HOUR, value)
    }

    pub fn trade_end_hour(&self) -> Result<f64, ConfigError> {
        let value = require(&self.trade_end_hour, TRADE_END_HOUR)?;
        as_number(TRADE_END_HOUR, value)
    }

    pub fn leverage(&self) -> Result<&Value, ConfigError> {
        require(&self.leverage, LEVERAGE)
    }

    pub fn take_profit_percent(&self) -> Result<&Value, ConfigError> {
        require(&self.take_profit_percent, TAKE_PROFIT_PERCENT)
    }

    pub fn stop_loss_percent(&self) -> Result<&Value, ConfigError> {
        require(&self.stop_loss_percent, STOP_LOSS_PERCENT)
    }

    pub fn amount(&self) -> Result<&Value, ConfigError> {
        require(&self.amount, AMOUNT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Формат по расширению файла, JSON если расширение не распознано
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                ConfigFormat::Yaml
            }
            _ => ConfigFormat::Json,
        }
    }

    pub fn parse(self, content: &str) -> Result<Settings, ConfigError> {
        match self {
            ConfigFormat::Json => Settings::from_json(content),
            ConfigFormat::Yaml => Settings::from_yaml(content),
        }
    }
}

/// Источник конфигурации: каждый вызов `load` возвращает свежий снимок
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn load(&self) -> Result<Settings, ConfigError>;
}

/// Конфигурация из файла на диске (JSON или YAML)
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
    format: ConfigFormat,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = ConfigFormat::from_path(&path);
        Self { path, format }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ConfigStore for FileConfigStore {
    async fn load(&self) -> Result<Settings, ConfigError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| ConfigError::Io {
                path: self.path.display().to_string(),
                source,
            })?;
        self.format.parse(&content)
    }
}
