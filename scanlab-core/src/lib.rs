//! ScanLab Core — domain types, data layer, indicators, setup evaluation.
//!
//! This crate contains everything needed to answer "does this symbol
//! currently satisfy the setup?":
//! - Domain types (daily OHLCV bars)
//! - Data layer (provider trait, Yahoo Finance provider, watchlist reader)
//! - Indicator implementations (RSI, SMA, EMA, MACD, ATR, ADX)
//! - Indicator enrichment engine (complete-row materialization)
//! - Setup evaluator (the five-condition conjunction)

pub mod data;
pub mod domain;
pub mod indicators;
pub mod screen;
