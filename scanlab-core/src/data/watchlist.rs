//! Watchlist input — the ticker source.
//!
//! A watchlist is a comma-delimited table with a `Stock_Code` column
//! (the NSE500 constituents file, typically). Symbols are produced exactly
//! as given: ordering and duplicates preserved, no normalization here —
//! exchange suffixing belongs to the provider.

use std::io::Read;
use std::path::Path;

use thiserror::Error;

use crate::domain::Symbol;

/// Required symbol column in the watchlist header.
pub const SYMBOL_COLUMN: &str = "Stock_Code";

#[derive(Debug, Error)]
pub enum WatchlistError {
    #[error("failed to read watchlist {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse watchlist CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("watchlist is missing required column '{SYMBOL_COLUMN}' (found: {found})")]
    MissingSymbolColumn { found: String },
}

/// An ordered list of symbols to scan.
#[derive(Debug, Clone)]
pub struct Watchlist {
    symbols: Vec<Symbol>,
}

impl Watchlist {
    /// Load a watchlist from a CSV file.
    pub fn from_path(path: &Path) -> Result<Self, WatchlistError> {
        let file = std::fs::File::open(path).map_err(|source| WatchlistError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Parse a watchlist from any CSV reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, WatchlistError> {
        let mut rdr = csv::Reader::from_reader(reader);

        let headers = rdr.headers()?.clone();
        let col = headers
            .iter()
            .position(|h| h == SYMBOL_COLUMN)
            .ok_or_else(|| WatchlistError::MissingSymbolColumn {
                found: headers.iter().collect::<Vec<_>>().join(", "),
            })?;

        let mut symbols = Vec::new();
        for record in rdr.records() {
            let record = record?;
            if let Some(code) = record.get(col) {
                symbols.push(code.to_string());
            }
        }

        Ok(Self { symbols })
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
