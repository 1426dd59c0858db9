//! Indicator enrichment engine.
//!
//! Computes the full derived-column set over a bar series and materializes
//! the rows where everything is defined. Rows inside the longest warm-up
//! window (the 200-period SMA) are never complete, so a series shorter than
//! 200 bars enriches to nothing.

use crate::domain::Bar;
use crate::indicators::sma::rolling_mean_of_series;
use crate::indicators::{Adx, Atr, Indicator, Macd, Rsi, Sma};
use crate::screen::IndicatorRow;

pub const RSI_PERIOD: usize = 14;
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;
pub const VOLUME_AVG_PERIOD: usize = 20;
pub const SMA_SHORT: usize = 20;
pub const SMA_MID: usize = 50;
pub const SMA_LONG: usize = 200;
pub const ATR_PERIOD: usize = 14;
pub const ADX_PERIOD: usize = 14;

/// Enrich a bar series with the screener's derived columns, keeping only
/// complete rows.
///
/// Each indicator is computed once over the whole series; the per-bar zip
/// then drops anything still inside a warm-up window or tainted by NaN
/// input. Returns an empty vec when no row survives.
pub fn enrich(bars: &[Bar]) -> Vec<IndicatorRow> {
    if bars.is_empty() {
        return Vec::new();
    }

    let rsi = Rsi::new(RSI_PERIOD).compute(bars);
    let macd_line = Macd::line(MACD_FAST, MACD_SLOW, MACD_SIGNAL).compute(bars);
    let macd_signal = Macd::signal(MACD_FAST, MACD_SLOW, MACD_SIGNAL).compute(bars);
    let macd_hist = Macd::histogram(MACD_FAST, MACD_SLOW, MACD_SIGNAL).compute(bars);
    let sma_20 = Sma::new(SMA_SHORT).compute(bars);
    let sma_50 = Sma::new(SMA_MID).compute(bars);
    let sma_200 = Sma::new(SMA_LONG).compute(bars);
    let atr = Atr::new(ATR_PERIOD).compute(bars);
    let adx = Adx::adx(ADX_PERIOD).compute(bars);
    let plus_di = Adx::plus_di(ADX_PERIOD).compute(bars);
    let minus_di = Adx::minus_di(ADX_PERIOD).compute(bars);

    let volumes: Vec<f64> = bars.iter().map(|b| b.volume as f64).collect();
    let volume_avg = rolling_mean_of_series(&volumes, VOLUME_AVG_PERIOD);

    let mut rows = Vec::new();
    for (i, bar) in bars.iter().enumerate() {
        let row = IndicatorRow {
            date: bar.date,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
            rsi: rsi[i],
            macd_line: macd_line[i],
            macd_signal: macd_signal[i],
            macd_hist: macd_hist[i],
            volume_avg: volume_avg[i],
            sma_20: sma_20[i],
            sma_50: sma_50[i],
            sma_200: sma_200[i],
            atr: atr[i],
            adx: adx[i],
            plus_di: plus_di[i],
            minus_di: minus_di[i],
        };
        if row.is_complete() {
            rows.push(row);
        }
    }

    rows
}
