//! ScanLab CLI — momentum/trend setup screener over a watchlist.
//!
//! Commands:
//! - `scan` — screen every symbol in a watchlist CSV and report/export matches
//! - `check` — validate a watchlist file and preview its symbols

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scanlab_core::data::{Watchlist, YahooProvider};
use scanlab_core::screen::MatchRecord;
use scanlab_runner::{run_scan, save_matches_csv, save_report_json, ScanReport, StdoutProgress};

#[derive(Parser)]
#[command(
    name = "scanlab",
    about = "ScanLab CLI — daily momentum/trend setup screener"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Screen every symbol in a watchlist CSV against the setup.
    Scan {
        /// Watchlist CSV with a Stock_Code column (e.g., nse500.csv).
        #[arg(long)]
        watchlist: PathBuf,

        /// Exchange suffix appended to each symbol for the data provider.
        #[arg(long, default_value = YahooProvider::NSE_SUFFIX)]
        suffix: String,

        /// Output directory for qualified_stocks.csv and scan_report.json.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,

        /// Print results only; write no artifacts.
        #[arg(long, default_value_t = false)]
        no_export: bool,
    },
    /// Validate a watchlist file and preview its symbols.
    Check {
        /// Watchlist CSV with a Stock_Code column.
        #[arg(long)]
        watchlist: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            watchlist,
            suffix,
            output_dir,
            no_export,
        } => run_scan_cmd(watchlist, suffix, output_dir, no_export),
        Commands::Check { watchlist } => run_check_cmd(watchlist),
    }
}

fn run_scan_cmd(
    watchlist_path: PathBuf,
    suffix: String,
    output_dir: PathBuf,
    no_export: bool,
) -> Result<()> {
    // Input errors are fatal and must precede any fetch.
    let watchlist = Watchlist::from_path(&watchlist_path)
        .with_context(|| format!("invalid watchlist {}", watchlist_path.display()))?;

    if watchlist.is_empty() {
        println!("Watchlist {} has no symbols.", watchlist_path.display());
        return Ok(());
    }

    let provider = YahooProvider::new(suffix);
    let scanned_at = chrono::Local::now().naive_local();

    println!(
        "Screening {} symbols from {}...\n",
        watchlist.len(),
        watchlist_path.display()
    );

    let report = run_scan(&provider, watchlist.symbols(), &StdoutProgress, scanned_at);

    print_warnings(&report);

    if report.matches.is_empty() {
        println!("\nNo symbols matched the setup.");
        return Ok(());
    }

    println!("\nFound {} qualifying symbols:", report.matches.len());
    print_matches(&report.matches);

    if !no_export {
        let csv_path = save_matches_csv(&report.matches, &output_dir)?;
        let json_path = save_report_json(&report, &output_dir)?;
        println!("\nResults saved to: {}", csv_path.display());
        println!("Scan report saved to: {}", json_path.display());
    }

    Ok(())
}

fn run_check_cmd(watchlist_path: PathBuf) -> Result<()> {
    let watchlist = Watchlist::from_path(&watchlist_path)
        .with_context(|| format!("invalid watchlist {}", watchlist_path.display()))?;

    println!("Watchlist: {}", watchlist_path.display());
    println!("Symbols:   {}", watchlist.len());

    let preview: Vec<&str> = watchlist
        .symbols()
        .iter()
        .take(10)
        .map(|s| s.as_str())
        .collect();
    if !preview.is_empty() {
        println!("Preview:   {}", preview.join(", "));
    }
    if watchlist.len() > preview.len() {
        println!("           ... and {} more", watchlist.len() - preview.len());
    }

    Ok(())
}

fn print_warnings(report: &ScanReport) {
    if report.warnings.is_empty() {
        return;
    }
    println!("\nWarnings ({}):", report.warnings.len());
    for w in &report.warnings {
        println!("  {}: {}", w.symbol, w.reason);
    }
}

fn print_matches(matches: &[MatchRecord]) {
    println!();
    println!(
        "{:<12} {:>10} {:>7} {:>10} {:>12} {:>12} {:>10} {:>10} {:>10} {:>8}",
        "Symbol", "Close", "RSI", "MACD Hist", "Volume", "Vol Avg 20", "SMA 20", "SMA 50", "SMA 200", "ATR"
    );
    println!("{}", "-".repeat(110));
    for m in matches {
        println!(
            "{:<12} {:>10.2} {:>7.2} {:>10.5} {:>12} {:>12.0} {:>10.2} {:>10.2} {:>10.2} {:>8.2}",
            m.symbol,
            m.close,
            m.rsi,
            m.macd_hist,
            m.volume,
            m.volume_avg,
            m.sma_20,
            m.sma_50,
            m.sma_200,
            m.atr
        );
    }
}
