//! Scan orchestrator — sequential per-symbol screening with failure isolation.
//!
//! One symbol is processed fully before the next starts: fetch → enrich →
//! evaluate. A failure or empty result for one symbol becomes a warning on
//! the report and never aborts the batch. The report is an explicit return
//! value; nothing is accumulated ambiently.

use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use scanlab_core::data::{DataProvider, Watchlist, WatchlistError};
use scanlab_core::screen::{enrich, evaluate_setup, MatchRecord};

/// Outcome of screening one symbol.
#[derive(Debug, Clone)]
pub enum ScanOutcome {
    /// The latest complete row satisfies the full setup.
    Matched(MatchRecord),
    /// Evaluated cleanly; the conditions did not all hold.
    NoMatch,
    /// Nothing to evaluate: the provider had no data, or too little history
    /// survived enrichment. A normal outcome, surfaced as a warning.
    NoData { reason: String },
    /// Fetch or processing failed for this symbol only.
    Failed { reason: String },
}

/// A per-symbol warning attached to the scan report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanWarning {
    pub symbol: String,
    pub reason: String,
}

/// Result of one scan run.
///
/// `matches` is sorted by RSI descending; the sort is stable, so ties keep
/// the order in which they were accumulated (watchlist order).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanReport {
    pub matches: Vec<MatchRecord>,
    pub warnings: Vec<ScanWarning>,
    pub scanned: usize,
    pub matched: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Progress callbacks for a scan run.
///
/// `on_complete` fires once per symbol with a monotonically increasing
/// `index`; `(index + 1) / total` is the completion fraction.
pub trait ScanProgress: Send {
    /// Called when a symbol's screening starts.
    fn on_start(&self, symbol: &str, index: usize, total: usize);

    /// Called when a symbol's screening completes.
    fn on_complete(&self, symbol: &str, index: usize, total: usize, outcome: &ScanOutcome);

    /// Called once after the last symbol.
    fn on_batch_complete(&self, report: &ScanReport);
}

/// Progress reporter that prints to stdout.
pub struct StdoutProgress;

impl ScanProgress for StdoutProgress {
    fn on_start(&self, symbol: &str, index: usize, total: usize) {
        println!("[{}/{}] Screening {symbol}...", index + 1, total);
    }

    fn on_complete(&self, symbol: &str, index: usize, total: usize, outcome: &ScanOutcome) {
        let pct = 100.0 * (index + 1) as f64 / total as f64;
        match outcome {
            ScanOutcome::Matched(rec) => {
                println!("  MATCH: {symbol} (RSI {:.2}) [{pct:.0}%]", rec.rsi)
            }
            ScanOutcome::NoMatch => println!("  no match: {symbol} [{pct:.0}%]"),
            ScanOutcome::NoData { reason } => println!("  no data: {symbol}: {reason} [{pct:.0}%]"),
            ScanOutcome::Failed { reason } => println!("  FAIL: {symbol}: {reason} [{pct:.0}%]"),
        }
    }

    fn on_batch_complete(&self, report: &ScanReport) {
        println!(
            "\nScan complete: {} screened, {} matched, {} without data, {} failed",
            report.scanned, report.matched, report.skipped, report.failed
        );
    }
}

/// Silent progress reporter for library/test callers.
pub struct NullProgress;

impl ScanProgress for NullProgress {
    fn on_start(&self, _symbol: &str, _index: usize, _total: usize) {}
    fn on_complete(&self, _symbol: &str, _index: usize, _total: usize, _outcome: &ScanOutcome) {}
    fn on_batch_complete(&self, _report: &ScanReport) {}
}

/// Screen a single symbol: fetch → enrich → evaluate.
///
/// Every `DataError` is absorbed here into `ScanOutcome::Failed`; callers
/// never see a `Result`.
pub fn scan_symbol(
    provider: &dyn DataProvider,
    symbol: &str,
    scanned_at: NaiveDateTime,
) -> ScanOutcome {
    let bars = match provider.fetch(symbol) {
        Ok(Some(bars)) => bars,
        Ok(None) => {
            return ScanOutcome::NoData {
                reason: "no data returned by provider".into(),
            }
        }
        Err(e) => {
            return ScanOutcome::Failed {
                reason: e.to_string(),
            }
        }
    };

    let rows = enrich(&bars);
    if rows.len() < 2 {
        // The evaluator needs the latest row and its predecessor.
        return ScanOutcome::NoData {
            reason: format!(
                "insufficient history for indicators ({} bars, {} complete rows)",
                bars.len(),
                rows.len()
            ),
        };
    }

    let latest = &rows[rows.len() - 1];
    let prev = &rows[rows.len() - 2];

    match evaluate_setup(symbol, latest, prev, scanned_at) {
        Some(record) => ScanOutcome::Matched(record),
        None => ScanOutcome::NoMatch,
    }
}

/// Run a full scan over `symbols` in order.
///
/// All records of a run share one `scanned_at` stamp. Matches are sorted by
/// RSI descending before the report is returned.
pub fn run_scan(
    provider: &dyn DataProvider,
    symbols: &[String],
    progress: &dyn ScanProgress,
    scanned_at: NaiveDateTime,
) -> ScanReport {
    let total = symbols.len();
    let mut report = ScanReport::default();

    for (i, symbol) in symbols.iter().enumerate() {
        progress.on_start(symbol, i, total);

        let outcome = scan_symbol(provider, symbol, scanned_at);
        progress.on_complete(symbol, i, total, &outcome);

        report.scanned += 1;
        match outcome {
            ScanOutcome::Matched(record) => {
                report.matched += 1;
                report.matches.push(record);
            }
            ScanOutcome::NoMatch => {}
            ScanOutcome::NoData { reason } => {
                report.skipped += 1;
                report.warnings.push(ScanWarning {
                    symbol: symbol.clone(),
                    reason,
                });
            }
            ScanOutcome::Failed { reason } => {
                report.failed += 1;
                report.warnings.push(ScanWarning {
                    symbol: symbol.clone(),
                    reason,
                });
            }
        }
    }

    // Stable sort: ties stay in accumulation order.
    report
        .matches
        .sort_by(|a, b| b.rsi.partial_cmp(&a.rsi).unwrap_or(std::cmp::Ordering::Equal));

    progress.on_batch_complete(&report);
    report
}

/// Load a watchlist and scan it.
///
/// An input error (unreadable file, malformed CSV, missing symbol column) is
/// fatal and returns before any fetch is attempted.
pub fn scan_watchlist(
    path: &Path,
    provider: &dyn DataProvider,
    progress: &dyn ScanProgress,
    scanned_at: NaiveDateTime,
) -> Result<ScanReport, WatchlistError> {
    let watchlist = Watchlist::from_path(path)?;
    Ok(run_scan(provider, watchlist.symbols(), progress, scanned_at))
}
