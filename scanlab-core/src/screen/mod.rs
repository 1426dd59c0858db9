//! Screening layer — indicator enrichment and setup evaluation.

pub mod engine;
pub mod row;
pub mod setup;

pub use engine::enrich;
pub use row::IndicatorRow;
pub use setup::{evaluate_setup, MatchRecord, RSI_LOWER, RSI_UPPER};
