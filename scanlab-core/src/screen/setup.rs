//! Setup evaluation — the five-condition momentum/trend conjunction.
//!
//! Evaluated on the latest complete row, with the previous complete row for
//! the day-over-day price confirmation. All-or-nothing: there is no partial
//! match signal.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::screen::IndicatorRow;

/// RSI band, exclusive on both ends.
pub const RSI_LOWER: f64 = 55.0;
pub const RSI_UPPER: f64 = 65.0;

/// A qualifying symbol, one per scan run. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub symbol: String,
    pub date: chrono::NaiveDate,
    pub close: f64,
    pub rsi: f64,
    pub macd_hist: f64,
    pub macd_line: f64,
    pub macd_signal: f64,
    pub volume: u64,
    pub volume_avg: f64,
    pub sma_20: f64,
    pub sma_50: f64,
    pub sma_200: f64,
    pub atr: f64,
    pub scanned_at: NaiveDateTime,
}

/// Evaluate the setup on the latest complete row.
///
/// Conditions (all strict, all required):
/// 1. RSI inside (55, 65)
/// 2. MACD histogram positive
/// 3. MACD line above its signal line
/// 4. Volume above its 20-period average AND close above the previous close
/// 5. Bullish SMA stacking: 20 > 50 > 200
pub fn evaluate_setup(
    symbol: &str,
    latest: &IndicatorRow,
    prev: &IndicatorRow,
    scanned_at: NaiveDateTime,
) -> Option<MatchRecord> {
    let conditions = [
        latest.rsi > RSI_LOWER && latest.rsi < RSI_UPPER,
        latest.macd_hist > 0.0,
        latest.macd_line > latest.macd_signal,
        latest.volume as f64 > latest.volume_avg && latest.close > prev.close,
        latest.sma_20 > latest.sma_50 && latest.sma_50 > latest.sma_200,
    ];

    if !conditions.iter().all(|&c| c) {
        return None;
    }

    Some(MatchRecord {
        symbol: symbol.to_string(),
        date: latest.date,
        close: latest.close,
        rsi: latest.rsi,
        macd_hist: latest.macd_hist,
        macd_line: latest.macd_line,
        macd_signal: latest.macd_signal,
        volume: latest.volume,
        volume_avg: latest.volume_avg,
        sma_20: latest.sma_20,
        sma_50: latest.sma_50,
        sma_200: latest.sma_200,
        atr: latest.atr,
        scanned_at,
    })
}
