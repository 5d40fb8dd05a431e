use serde::Serialize;
use serde_json::Value;

use crate::config::{ConfigError, Settings};

pub const SIDE_BUY: &str = "buy";
pub const ORDER_TYPE_MARKET: &str = "market";

/// Ордер для WunderTrading. Плечо, TP/SL и объём копируются из конфигурации
/// без изменений.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub pair: String,
    pub side: &'static str,
    #[serde(rename = "type")]
    pub order_type: &'static str,
    pub leverage: Value,
    pub take_profit: Value,
    pub stop_loss: Value,
    pub amount: Value,
}

impl OrderPayload {
    pub fn market_buy(pair: String, settings: &Settings) -> Result<Self, ConfigError> {
        Ok(Self {
            pair,
            side: SIDE_BUY,
            order_type: ORDER_TYPE_MARKET,
            leverage: settings.leverage()?.clone(),
            take_profit: settings.take_profit_percent()?.clone(),
            stop_loss: settings.stop_loss_percent()?.clone(),
            amount: settings.amount()?.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_market_buy_wire_format() {
        let settings = Settings::from_json(
            r#"{"LEVERAGE": 10, "TAKE_PROFIT_PERCENT": 3, "STOP_LOSS_PERCENT": 1, "AMOUNT": 100}"#,
        )
        .unwrap();

        let order = OrderPayload::market_buy("BTCUSDT".to_string(), &settings).unwrap();

        assert_eq!(
            serde_json::to_value(&order).unwrap(),
            json!({
                "pair": "BTCUSDT",
                "side": "buy",
                "type": "market",
                "leverage": 10,
                "takeProfit": 3,
                "stopLoss": 1,
                "amount": 100
            })
        );
    }

    #[test]
    fn test_values_pass_through_unvalidated() {
        let settings = Settings::from_json(
            r#"{"LEVERAGE": "20x", "TAKE_PROFIT_PERCENT": 2.5, "STOP_LOSS_PERCENT": -1, "AMOUNT": {"usdt": 15}}"#,
        )
        .unwrap();

        let order = OrderPayload::market_buy("ETHUSDT".to_string(), &settings).unwrap();
        assert_eq!(order.leverage, json!("20x"));
        assert_eq!(order.stop_loss, json!(-1));
        assert_eq!(order.amount, json!({"usdt": 15}));
    }

    #[test]
    fn test_missing_order_parameter() {
        let settings =
            Settings::from_json(r#"{"TAKE_PROFIT_PERCENT": 3, "STOP_LOSS_PERCENT": 1, "AMOUNT": 100}"#)
                .unwrap();

        let err = OrderPayload::market_buy("BTCUSDT".to_string(), &settings).unwrap_err();
        assert_eq!(err.to_string(), "Missing config key: 'LEVERAGE'");
    }
}
