//! ScanLab Runner — scan orchestration and result export.

pub mod export;
pub mod scanner;

pub use export::{
    export_matches_csv, export_report_json, save_matches_csv, save_report_json, EXPORT_FILE_NAME,
    REPORT_FILE_NAME,
};
pub use scanner::{
    run_scan, scan_symbol, scan_watchlist, NullProgress, ScanOutcome, ScanProgress, ScanReport,
    ScanWarning, StdoutProgress,
};
