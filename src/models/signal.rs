//! Входящий сигнал от сканера пампов

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SignalError {
    #[error("could not convert {field} to float: {value}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("symbol must be a string, got {0}")]
    InvalidSymbol(String),
}

/// Поля сигнала хранятся в сыром виде и приводятся к типам по мере
/// прохождения фильтров: ошибка в `volume_usdt` не должна мешать
/// отклонить сигнал по символу.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Signal {
    pub secret: Option<Value>,
    pub symbol: Option<Value>,
    pub price_change: Option<Value>,
    pub volume_usdt: Option<Value>,
}

impl Signal {
    /// Тело запроса -> сигнал. Пустое тело, битый JSON или JSON не-объект
    /// дают сигнал без полей.
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(value @ Value::Object(_)) => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    pub fn secret_matches(&self, expected: &str) -> bool {
        matches!(&self.secret, Some(Value::String(secret)) if secret == expected)
    }

    /// Торговая пара в верхнем регистре ("btcusdt" -> "BTCUSDT")
    pub fn pair(&self) -> Result<String, SignalError> {
        match &self.symbol {
            None => Ok(String::new()),
            Some(Value::String(symbol)) => Ok(symbol.to_uppercase()),
            Some(other) => Err(SignalError::InvalidSymbol(other.to_string())),
        }
    }

    pub fn price_change(&self) -> Result<f64, SignalError> {
        parse_amount("price_change", self.price_change.as_ref())
    }

    pub fn volume_usdt(&self) -> Result<f64, SignalError> {
        parse_amount("volume_usdt", self.volume_usdt.as_ref())
    }
}

// Число или строка с числом; отсутствие поля = 0
fn parse_amount(field: &'static str, raw: Option<&Value>) -> Result<f64, SignalError> {
    let invalid = |value: String| SignalError::InvalidNumber { field, value };
    match raw {
        None => Ok(0.0),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| invalid(n.to_string())),
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| invalid(format!("'{}'", s))),
        Some(Value::Bool(b)) => Ok(if *b { 1.0 } else { 0.0 }),
        Some(other) => Err(invalid(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn signal(value: Value) -> Signal {
        Signal::from_body(value.to_string().as_bytes())
    }

    #[test]
    fn test_empty_and_malformed_bodies() {
        assert_eq!(Signal::from_body(b""), Signal::default());
        assert_eq!(Signal::from_body(b"{not json"), Signal::default());
        assert_eq!(Signal::from_body(b"[1, 2, 3]"), Signal::default());
        assert_eq!(Signal::from_body(b"\"BTCUSDT\""), Signal::default());
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let s = signal(json!({"secret": "123456"}));
        assert_eq!(s.pair().unwrap(), "");
        assert_eq!(s.price_change().unwrap(), 0.0);
        assert_eq!(s.volume_usdt().unwrap(), 0.0);
    }

    #[test]
    fn test_secret_comparison() {
        assert!(signal(json!({"secret": "123456"})).secret_matches("123456"));
        assert!(!signal(json!({"secret": "654321"})).secret_matches("123456"));
        assert!(!signal(json!({"secret": 123456})).secret_matches("123456"));
        assert!(!signal(json!({})).secret_matches("123456"));
    }

    #[test]
    fn test_symbol_is_uppercased() {
        assert_eq!(signal(json!({"symbol": "btcusdt"})).pair().unwrap(), "BTCUSDT");
        assert_eq!(signal(json!({"symbol": "EthUsdt"})).pair().unwrap(), "ETHUSDT");
    }

    #[test]
    fn test_non_string_symbol_is_error() {
        let err = signal(json!({"symbol": 42})).pair().unwrap_err();
        assert_eq!(err, SignalError::InvalidSymbol("42".to_string()));
    }

    #[test]
    fn test_numeric_strings_accepted() {
        let s = signal(json!({"price_change": "7.5", "volume_usdt": " 5000 "}));
        assert_eq!(s.price_change().unwrap(), 7.5);
        assert_eq!(s.volume_usdt().unwrap(), 5000.0);

        let s = signal(json!({"price_change": -3, "volume_usdt": 1e6}));
        assert_eq!(s.price_change().unwrap(), -3.0);
        assert_eq!(s.volume_usdt().unwrap(), 1_000_000.0);
    }

    #[test]
    fn test_unparsable_amount_is_error() {
        let err = signal(json!({"price_change": "a lot"})).price_change().unwrap_err();
        assert_eq!(
            err.to_string(),
            "could not convert price_change to float: 'a lot'"
        );
        assert!(signal(json!({"volume_usdt": [1]})).volume_usdt().is_err());
    }

    #[test]
    fn test_unparsable_volume_does_not_affect_other_fields() {
        let s = signal(json!({"symbol": "solusdt", "price_change": 9, "volume_usdt": "n/a"}));
        assert_eq!(s.pair().unwrap(), "SOLUSDT");
        assert_eq!(s.price_change().unwrap(), 9.0);
        assert!(s.volume_usdt().is_err());
    }
}
