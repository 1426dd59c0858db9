//! Data layer — provider abstraction, Yahoo Finance client, watchlist input.

pub mod provider;
pub mod watchlist;
pub mod yahoo;

pub use provider::{DataError, DataProvider};
pub use watchlist::{Watchlist, WatchlistError, SYMBOL_COLUMN};
pub use yahoo::YahooProvider;
