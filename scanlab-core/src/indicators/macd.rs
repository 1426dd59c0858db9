//! MACD — Moving Average Convergence Divergence.
//!
//! Line: EMA(close, fast) - EMA(close, slow)
//! Signal: EMA(line, signal period), seeded on the line's first valid window
//! Histogram: line - signal
//! Lookback: slow - 1 for the line, slow + signal - 2 for signal/histogram.
//!
//! Three outputs (separate Indicator instances), following the same
//! one-instance-per-band shape as the other multi-series indicators.

use crate::domain::Bar;
use crate::indicators::ema::{ema_of_series, ema_of_series_skipping_prefix};
use crate::indicators::Indicator;

/// Which MACD series to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdOutput {
    Line,
    Signal,
    Histogram,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    output: MacdOutput,
    name: String,
}

impl Macd {
    pub fn line(fast: usize, slow: usize, signal: usize) -> Self {
        Self::with_output(fast, slow, signal, MacdOutput::Line, "line")
    }

    pub fn signal(fast: usize, slow: usize, signal: usize) -> Self {
        Self::with_output(fast, slow, signal, MacdOutput::Signal, "signal")
    }

    pub fn histogram(fast: usize, slow: usize, signal: usize) -> Self {
        Self::with_output(fast, slow, signal, MacdOutput::Histogram, "hist")
    }

    fn with_output(
        fast: usize,
        slow: usize,
        signal: usize,
        output: MacdOutput,
        tag: &str,
    ) -> Self {
        assert!(fast >= 1 && slow >= 1 && signal >= 1, "MACD periods must be >= 1");
        assert!(fast < slow, "MACD fast period must be shorter than slow");
        Self {
            fast,
            slow,
            signal,
            output,
            name: format!("macd_{tag}_{fast}_{slow}_{signal}"),
        }
    }

    /// Line series: fast EMA minus slow EMA, NaN where either is NaN.
    fn line_series(&self, closes: &[f64]) -> Vec<f64> {
        let fast_ema = ema_of_series(closes, self.fast);
        let slow_ema = ema_of_series(closes, self.slow);
        fast_ema
            .iter()
            .zip(slow_ema.iter())
            .map(|(&f, &s)| {
                if f.is_nan() || s.is_nan() {
                    f64::NAN
                } else {
                    f - s
                }
            })
            .collect()
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.output {
            MacdOutput::Line => self.slow - 1,
            MacdOutput::Signal | MacdOutput::Histogram => self.slow + self.signal - 2,
        }
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let line = self.line_series(&closes);

        match self.output {
            MacdOutput::Line => line,
            MacdOutput::Signal => ema_of_series_skipping_prefix(&line, self.signal),
            MacdOutput::Histogram => {
                let signal = ema_of_series_skipping_prefix(&line, self.signal);
                line.iter()
                    .zip(signal.iter())
                    .map(|(&l, &s)| {
                        if l.is_nan() || s.is_nan() {
                            f64::NAN
                        } else {
                            l - s
                        }
                    })
                    .collect()
            }
        }
    }
}
