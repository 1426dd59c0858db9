//! IndicatorRow — an OHLCV bar augmented with derived columns.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One fully-populated day of a symbol's enriched series.
///
/// The enrichment engine only emits complete rows: every derived field is a
/// real number, never NaN. Consumers can branch on values without re-checking
/// definedness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,

    pub rsi: f64,
    pub macd_line: f64,
    pub macd_signal: f64,
    pub macd_hist: f64,
    pub volume_avg: f64,
    pub sma_20: f64,
    pub sma_50: f64,
    pub sma_200: f64,
    pub atr: f64,
    pub adx: f64,
    pub plus_di: f64,
    pub minus_di: f64,
}

impl IndicatorRow {
    /// True when every derived field is defined.
    pub fn is_complete(&self) -> bool {
        !(self.open.is_nan()
            || self.high.is_nan()
            || self.low.is_nan()
            || self.close.is_nan()
            || self.rsi.is_nan()
            || self.macd_line.is_nan()
            || self.macd_signal.is_nan()
            || self.macd_hist.is_nan()
            || self.volume_avg.is_nan()
            || self.sma_20.is_nan()
            || self.sma_50.is_nan()
            || self.sma_200.is_nan()
            || self.atr.is_nan()
            || self.adx.is_nan()
            || self.plus_di.is_nan()
            || self.minus_di.is_nan())
    }
}
