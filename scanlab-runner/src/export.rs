//! Result export — CSV match table and JSON scan report.
//!
//! The CSV is the user-facing artifact (`qualified_stocks.csv`): UTF-8,
//! header row named after the MatchRecord fields, one row per qualifying
//! symbol, prices to 2 decimals and MACD columns to 5, volumes as integers.
//! The JSON report is the machine-facing artifact with matches, warnings,
//! and counts.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use scanlab_core::screen::MatchRecord;

use crate::scanner::ScanReport;

/// Export file name offered to the user.
pub const EXPORT_FILE_NAME: &str = "qualified_stocks.csv";

/// JSON scan report artifact name.
pub const REPORT_FILE_NAME: &str = "scan_report.json";

/// Render the match table as a CSV string.
pub fn export_matches_csv(matches: &[MatchRecord]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "symbol",
        "date",
        "close",
        "rsi",
        "macd_hist",
        "macd_line",
        "macd_signal",
        "volume",
        "volume_avg",
        "sma_20",
        "sma_50",
        "sma_200",
        "atr",
        "scanned_at",
    ])?;

    for m in matches {
        wtr.write_record([
            &m.symbol,
            &m.date.to_string(),
            &format!("{:.2}", m.close),
            &format!("{:.2}", m.rsi),
            &format!("{:.5}", m.macd_hist),
            &format!("{:.5}", m.macd_line),
            &format!("{:.5}", m.macd_signal),
            &m.volume.to_string(),
            &format!("{:.0}", m.volume_avg),
            &format!("{:.2}", m.sma_20),
            &format!("{:.2}", m.sma_50),
            &format!("{:.2}", m.sma_200),
            &format!("{:.2}", m.atr),
            &m.scanned_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Write the match table to `<dir>/qualified_stocks.csv`.
pub fn save_matches_csv(matches: &[MatchRecord], dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output dir {}", dir.display()))?;
    let path = dir.join(EXPORT_FILE_NAME);
    let csv = export_matches_csv(matches)?;
    std::fs::write(&path, csv)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

/// Serialize the full scan report to pretty JSON.
pub fn export_report_json(report: &ScanReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize scan report to JSON")
}

/// Write the scan report to `<dir>/scan_report.json`.
pub fn save_report_json(report: &ScanReport, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output dir {}", dir.display()))?;
    let path = dir.join(REPORT_FILE_NAME);
    let json = export_report_json(report)?;
    std::fs::write(&path, json)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_match(symbol: &str, rsi: f64) -> MatchRecord {
        MatchRecord {
            symbol: symbol.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            close: 1234.5,
            rsi,
            macd_hist: 0.01234,
            macd_line: 1.23456,
            macd_signal: 1.22222,
            volume: 1_500_000,
            volume_avg: 1_200_000.0,
            sma_20: 1200.0,
            sma_50: 1150.0,
            sma_200: 1000.0,
            atr: 25.5,
            scanned_at: NaiveDate::from_ymd_opt(2024, 6, 3)
                .unwrap()
                .and_hms_opt(16, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn csv_has_header_and_one_row_per_match() {
        let matches = vec![sample_match("TCS", 60.0), sample_match("INFY", 58.0)];
        let csv = export_matches_csv(&matches).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("symbol,date,close,rsi,macd_hist"));
        assert!(lines[1].starts_with("TCS,2024-06-03,1234.50,60.00,0.01234"));
        assert!(lines[2].starts_with("INFY,"));
    }

    #[test]
    fn csv_empty_matches_is_header_only() {
        let csv = export_matches_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn csv_formats_volume_as_integer() {
        let csv = export_matches_csv(&[sample_match("TCS", 60.0)]).unwrap();
        assert!(csv.contains(",1500000,1200000,"));
    }

    #[test]
    fn json_report_round_trips() {
        let report = ScanReport {
            matches: vec![sample_match("TCS", 60.0)],
            warnings: vec![crate::scanner::ScanWarning {
                symbol: "CCC".into(),
                reason: "no data returned by provider".into(),
            }],
            scanned: 3,
            matched: 1,
            skipped: 1,
            failed: 0,
        };
        let json = export_report_json(&report).unwrap();
        let back: ScanReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.matches.len(), 1);
        assert_eq!(back.warnings[0].symbol, "CCC");
        assert_eq!(back.scanned, 3);
    }

    #[test]
    fn save_writes_named_files() {
        let dir = tempfile::tempdir().unwrap();
        let matches = vec![sample_match("TCS", 60.0)];
        let csv_path = save_matches_csv(&matches, dir.path()).unwrap();
        assert_eq!(csv_path.file_name().unwrap(), EXPORT_FILE_NAME);
        let written = std::fs::read_to_string(&csv_path).unwrap();
        assert!(written.starts_with("symbol,"));

        let report = ScanReport {
            matches,
            ..Default::default()
        };
        let json_path = save_report_json(&report, dir.path()).unwrap();
        assert_eq!(json_path.file_name().unwrap(), REPORT_FILE_NAME);
    }
}
