//! Data provider trait and structured error types.
//!
//! The DataProvider trait abstracts over the market data source so the scan
//! orchestrator can be exercised against deterministic stubs in tests.

use crate::domain::Bar;
use thiserror::Error;

/// Structured error types for per-symbol fetch failures.
///
/// Every variant is a *per-symbol* failure: the orchestrator records it as a
/// warning and moves on. "No data for this symbol" is not an error — the
/// provider returns `Ok(None)` for that.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider")]
    RateLimited,

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("provider returned HTTP {status} for {symbol}")]
    Status { status: u16, symbol: String },
}

/// Trait for daily-bar data providers.
///
/// `fetch` resolves to one of three outcomes:
/// - `Ok(Some(bars))` — a date-ascending, duplicate-free series
/// - `Ok(None)` — the provider has no data for this symbol (delisted,
///   unknown, or empty history); a normal outcome, not an error
/// - `Err(DataError)` — a per-symbol failure
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the trailing daily OHLCV series for a symbol.
    fn fetch(&self, symbol: &str) -> Result<Option<Vec<Bar>>, DataError>;
}
