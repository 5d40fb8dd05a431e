// Filter implementations for the signal gate chain
use chrono::Timelike;

use crate::error::GatewayError;
use crate::gates::{Filter, GateContext, GateOutcome, IgnoreReason};

/// Символ должен быть в ALLOWED_SYMBOLS
pub struct SymbolFilter;

impl Filter for SymbolFilter {
    fn name(&self) -> &'static str {
        "symbol"
    }

    fn check(&self, ctx: &GateContext<'_>) -> Result<GateOutcome, GatewayError> {
        if ctx.settings.allows_symbol(ctx.pair)? {
            return Ok(GateOutcome::Pass);
        }
        log::warn!("⛔️ Символ не разрешён: {}", ctx.pair);
        Ok(GateOutcome::Ignore(IgnoreReason::SymbolNotAllowed))
    }
}

pub struct PriceChangeFilter;

impl Filter for PriceChangeFilter {
    fn name(&self) -> &'static str {
        "price_change"
    }

    fn check(&self, ctx: &GateContext<'_>) -> Result<GateOutcome, GatewayError> {
        let price_change = ctx.signal.price_change()?;
        if price_change < ctx.settings.min_price_change_percent()? {
            log::info!("🔁 Недостаточный рост цены: {}%", price_change);
            return Ok(GateOutcome::Ignore(IgnoreReason::PumpTooSmall));
        }
        Ok(GateOutcome::Pass)
    }
}

pub struct VolumeFilter;

impl Filter for VolumeFilter {
    fn name(&self) -> &'static str {
        "volume"
    }

    fn check(&self, ctx: &GateContext<'_>) -> Result<GateOutcome, GatewayError> {
        let volume = ctx.signal.volume_usdt()?;
        if volume < ctx.settings.min_volume_usdt()? {
            log::info!("🔁 Слишком малый объём: {}", volume);
            return Ok(GateOutcome::Ignore(IgnoreReason::VolumeTooLow));
        }
        Ok(GateOutcome::Pass)
    }
}

/// Окно торговли по UTC, обе границы включительно.
/// TRADE_START_HOUR/TRADE_END_HOUR нужны только при USE_TIME_FILTER = true.
pub struct TradingHoursFilter;

impl Filter for TradingHoursFilter {
    fn name(&self) -> &'static str {
        "trading_hours"
    }

    fn check(&self, ctx: &GateContext<'_>) -> Result<GateOutcome, GatewayError> {
        if !ctx.settings.use_time_filter()? {
            return Ok(GateOutcome::Pass);
        }
        let hour = f64::from(ctx.now.hour());
        if hour < ctx.settings.trade_start_hour()? || hour > ctx.settings.trade_end_hour()? {
            log::info!("🕓 Вне торговых часов: {}:00 UTC", hour);
            return Ok(GateOutcome::Ignore(IgnoreReason::OutsideTradingHours));
        }
        Ok(GateOutcome::Pass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::models::Signal;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn hours_settings(start: i64, end: i64) -> Settings {
        Settings {
            use_time_filter: Some(json!(true)),
            trade_start_hour: Some(json!(start)),
            trade_end_hour: Some(json!(end)),
            ..Settings::default()
        }
    }

    fn check_at(settings: &Settings, hour: u32) -> Result<GateOutcome, GatewayError> {
        let signal = Signal::default();
        let ctx = GateContext {
            signal: &signal,
            pair: "BTCUSDT",
            settings,
            now: Utc.with_ymd_and_hms(2024, 5, 1, hour, 59, 59).unwrap(),
        };
        TradingHoursFilter.check(&ctx)
    }

    #[test]
    fn test_window_boundaries() {
        let settings = hours_settings(8, 20);
        let outside = GateOutcome::Ignore(IgnoreReason::OutsideTradingHours);

        assert_eq!(check_at(&settings, 7).unwrap(), outside);
        assert_eq!(check_at(&settings, 8).unwrap(), GateOutcome::Pass);
        // Последний час окна проходит целиком, включая 20:59
        assert_eq!(check_at(&settings, 20).unwrap(), GateOutcome::Pass);
        assert_eq!(check_at(&settings, 21).unwrap(), outside);
    }

    #[test]
    fn test_disabled_filter_ignores_hours() {
        let settings = Settings {
            use_time_filter: Some(json!(false)),
            ..Settings::default()
        };
        // Часы окна не заданы, но при выключенном фильтре они не нужны
        assert_eq!(check_at(&settings, 3).unwrap(), GateOutcome::Pass);
    }

    #[test]
    fn test_use_time_filter_is_required() {
        let err = check_at(&Settings::default(), 3).unwrap_err();
        assert_eq!(err.to_string(), "Missing config key: 'USE_TIME_FILTER'");
    }

    #[test]
    fn test_end_hour_only_needed_after_start() {
        let settings = Settings {
            use_time_filter: Some(json!(true)),
            trade_start_hour: Some(json!(10)),
            ..Settings::default()
        };
        assert_eq!(
            check_at(&settings, 9).unwrap(),
            GateOutcome::Ignore(IgnoreReason::OutsideTradingHours)
        );
        let err = check_at(&settings, 11).unwrap_err();
        assert_eq!(err.to_string(), "Missing config key: 'TRADE_END_HOUR'");
    }

    #[test]
    fn test_symbol_filter_uses_uppercased_pair() {
        let settings = Settings {
            allowed_symbols: Some(json!(["BTCUSDT"])),
            ..Settings::default()
        };
        let signal = Signal::default();
        let ctx = |pair| GateContext {
            signal: &signal,
            pair,
            settings: &settings,
            now: Utc::now(),
        };

        assert_eq!(SymbolFilter.check(&ctx("BTCUSDT")).unwrap(), GateOutcome::Pass);
        assert_eq!(
            SymbolFilter.check(&ctx("btcusdt")).unwrap(),
            GateOutcome::Ignore(IgnoreReason::SymbolNotAllowed)
        );
    }
}
