//! Цепочка фильтров сигнала.
//! Фильтры проверяются строго по порядку, первый отказ останавливает цепочку.

pub mod filters;

use chrono::{DateTime, Utc};

use crate::config::Settings;
use crate::error::GatewayError;
use crate::models::Signal;

pub use filters::{PriceChangeFilter, SymbolFilter, TradingHoursFilter, VolumeFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    SymbolNotAllowed,
    PumpTooSmall,
    VolumeTooLow,
    OutsideTradingHours,
}

impl IgnoreReason {
    pub fn message(&self) -> &'static str {
        match self {
            IgnoreReason::SymbolNotAllowed => "Symbol not allowed",
            IgnoreReason::PumpTooSmall => "Pump too small",
            IgnoreReason::VolumeTooLow => "Volume too low",
            IgnoreReason::OutsideTradingHours => "Outside trading hours",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Pass,
    Ignore(IgnoreReason),
}

/// Всё, что нужно фильтрам для одного сигнала
pub struct GateContext<'a> {
    pub signal: &'a Signal,
    /// Символ сигнала в верхнем регистре
    pub pair: &'a str,
    pub settings: &'a Settings,
    pub now: DateTime<Utc>,
}

pub trait Filter: Send + Sync {
    fn name(&self) -> &'static str;
    fn check(&self, ctx: &GateContext<'_>) -> Result<GateOutcome, GatewayError>;
}

pub struct GateChain {
    filters: Vec<Box<dyn Filter>>,
}

impl GateChain {
    pub fn new() -> Self {
        GateChain {
            filters: Vec::new(),
        }
    }

    /// Символ -> рост цены -> объём -> торговые часы
    pub fn standard() -> Self {
        let mut chain = Self::new();
        chain.add_filter(Box::new(SymbolFilter));
        chain.add_filter(Box::new(PriceChangeFilter));
        chain.add_filter(Box::new(VolumeFilter));
        chain.add_filter(Box::new(TradingHoursFilter));
        chain
    }

    pub fn add_filter(&mut self, filter: Box<dyn Filter>) {
        self.filters.push(filter);
    }

    pub fn evaluate(&self, ctx: &GateContext<'_>) -> Result<GateOutcome, GatewayError> {
        for filter in &self.filters {
            let outcome = filter.check(ctx)?;
            if outcome != GateOutcome::Pass {
                log::debug!("фильтр {} остановил сигнал {}", filter.name(), ctx.pair);
                return Ok(outcome);
            }
        }
        Ok(GateOutcome::Pass)
    }
}

impl Default for GateChain {
    fn default() -> Self {
        Self::standard()
    }
}
