//! Yahoo Finance data provider.
//!
//! Fetches daily OHLCV bars from Yahoo's v8 chart API: one request per
//! symbol, no retries, no pooling contract beyond the blocking client's own.
//! All shape variability in the response (nested arrays, nullable cells) is
//! normalized into flat `Bar`s here and nowhere else.
//!
//! Yahoo Finance has no official API and is subject to unannounced format
//! changes; a shape change surfaces as `DataError::ResponseFormatChanged`
//! for the affected symbol.

use super::provider::{DataError, DataProvider};
use crate::domain::Bar;
use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;

/// Trailing series length, in trading days.
pub const LOOKBACK_BARS: usize = 250;

/// Calendar days requested to cover `LOOKBACK_BARS` trading days.
/// Trading weeks are 5 of 7 days; the extra margin absorbs holidays.
const LOOKBACK_CALENDAR_DAYS: i64 = 380;

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<u64>>,
}

/// Yahoo Finance data provider.
///
/// Appends `suffix` to every symbol before the request (exchange-suffix
/// normalization happens once, here).
pub struct YahooProvider {
    client: reqwest::blocking::Client,
    suffix: String,
}

impl YahooProvider {
    /// National Stock Exchange suffix, the default universe for this screener.
    pub const NSE_SUFFIX: &'static str = ".NS";

    pub fn new(suffix: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            suffix: suffix.into(),
        }
    }

    /// Build the chart API URL for a suffixed ticker.
    fn chart_url(ticker: &str, start: NaiveDate, end: NaiveDate) -> String {
        let start_ts = start.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp();
        let end_ts = end.and_hms_opt(23, 59, 59).unwrap().and_utc().timestamp();
        format!(
            "https://query2.finance.yahoo.com/v8/finance/chart/{ticker}\
             ?period1={start_ts}&period2={end_ts}&interval=1d"
        )
    }

    /// Parse the chart API response into Bars, or `None` when the provider
    /// has nothing for this symbol.
    fn parse_response(
        symbol: &str,
        resp: ChartResponse,
    ) -> Result<Option<Vec<Bar>>, DataError> {
        let result = match (resp.chart.result, resp.chart.error) {
            (Some(result), _) => result,
            // "Not Found" is what Yahoo answers for unknown/delisted symbols.
            (None, Some(err)) if err.code == "Not Found" => return Ok(None),
            (None, Some(err)) => {
                return Err(DataError::ResponseFormatChanged(format!(
                    "{}: {}",
                    err.code, err.description
                )))
            }
            (None, None) => {
                return Err(DataError::ResponseFormatChanged(
                    "empty result with no error".into(),
                ))
            }
        };

        let data = match result.into_iter().next() {
            Some(data) => data,
            None => return Ok(None),
        };

        let timestamps = match data.timestamp {
            Some(ts) if !ts.is_empty() => ts,
            // A known symbol with no history comes back as a result with no
            // timestamps.
            _ => return Ok(None),
        };

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("no quote data".into()))?;

        let n = timestamps.len();
        let mut bars = Vec::with_capacity(n);

        for (i, &ts) in timestamps.iter().enumerate() {
            let date = chrono::DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| {
                    DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
                })?;

            let open = quote.open.get(i).copied().flatten();
            let high = quote.high.get(i).copied().flatten();
            let low = quote.low.get(i).copied().flatten();
            let close = quote.close.get(i).copied().flatten();
            let volume = quote.volume.get(i).copied().flatten();

            // All-null rows are holidays/non-trading days, not data.
            if open.is_none()
                && high.is_none()
                && low.is_none()
                && close.is_none()
                && volume.is_none()
            {
                continue;
            }

            bars.push(Bar {
                symbol: symbol.to_string(),
                date,
                open: open.unwrap_or(f64::NAN),
                high: high.unwrap_or(f64::NAN),
                low: low.unwrap_or(f64::NAN),
                close: close.unwrap_or(f64::NAN),
                volume: volume.unwrap_or(0),
            });
        }

        if bars.is_empty() {
            return Ok(None);
        }

        // Date-ascending, no duplicate dates (first occurrence wins), and
        // only the trailing LOOKBACK_BARS bars.
        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);
        if bars.len() > LOOKBACK_BARS {
            bars.drain(..bars.len() - LOOKBACK_BARS);
        }

        Ok(Some(bars))
    }
}

impl DataProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch(&self, symbol: &str) -> Result<Option<Vec<Bar>>, DataError> {
        let ticker = format!("{symbol}{}", self.suffix);
        let end = chrono::Local::now().date_naive();
        let start = end - chrono::Duration::days(LOOKBACK_CALENDAR_DAYS);
        let url = Self::chart_url(&ticker, start, end);

        let resp = self.client.get(&url).send().map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                DataError::NetworkUnreachable(e.to_string())
            } else {
                DataError::NetworkUnreachable(format!("request failed: {e}"))
            }
        })?;

        let status = resp.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::RateLimited);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            // Chart endpoint 404s for symbols Yahoo has never heard of.
            return Ok(None);
        }

        if !status.is_success() {
            return Err(DataError::Status {
                status: status.as_u16(),
                symbol: symbol.to_string(),
            });
        }

        let chart: ChartResponse = resp.json().map_err(|e| {
            DataError::ResponseFormatChanged(format!("failed to parse response for {symbol}: {e}"))
        })?;

        Self::parse_response(symbol, chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart_json(timestamps: &[i64], closes: &[Option<f64>]) -> String {
        let ts: Vec<String> = timestamps.iter().map(|t| t.to_string()).collect();
        let cell = |v: &Option<f64>| match v {
            Some(x) => format!("{x}"),
            None => "null".to_string(),
        };
        let closes_json: Vec<String> = closes.iter().map(cell).collect();
        let vols: Vec<String> = closes
            .iter()
            .map(|v| match v {
                Some(_) => "1000".to_string(),
                None => "null".to_string(),
            })
            .collect();
        format!(
            r#"{{"chart":{{"result":[{{"timestamp":[{}],
                "indicators":{{"quote":[{{
                    "open":[{closes}],"high":[{closes}],
                    "low":[{closes}],"close":[{closes}],
                    "volume":[{vols}]}}]}}}}],"error":null}}}}"#,
            ts.join(","),
            closes = closes_json.join(","),
            vols = vols.join(","),
        )
    }

    #[test]
    fn parse_flattens_quote_arrays() {
        // 2024-01-02 and 2024-01-03 midday UTC
        let json = chart_json(&[1704189600, 1704276000], &[Some(100.0), Some(101.5)]);
        let resp: ChartResponse = serde_json::from_str(&json).unwrap();
        let bars = YahooProvider::parse_response("TEST", resp).unwrap().unwrap();

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(bars[0].close, 100.0);
        assert_eq!(bars[1].close, 101.5);
        assert_eq!(bars[0].symbol, "TEST");
    }

    #[test]
    fn parse_skips_all_null_rows() {
        let json = chart_json(
            &[1704189600, 1704276000, 1704362400],
            &[Some(100.0), None, Some(102.0)],
        );
        let resp: ChartResponse = serde_json::from_str(&json).unwrap();
        let bars = YahooProvider::parse_response("TEST", resp).unwrap().unwrap();

        // The all-null middle row is a non-trading day.
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].close, 100.0);
        assert_eq!(bars[1].close, 102.0);
    }

    #[test]
    fn parse_sorts_and_dedupes_dates() {
        // Same date twice plus an out-of-order earlier date.
        let json = chart_json(
            &[1704276000, 1704189600, 1704276000],
            &[Some(101.0), Some(100.0), Some(999.0)],
        );
        let resp: ChartResponse = serde_json::from_str(&json).unwrap();
        let bars = YahooProvider::parse_response("TEST", resp).unwrap().unwrap();

        assert_eq!(bars.len(), 2);
        assert!(bars[0].date < bars[1].date);
        // First occurrence of the duplicated date wins.
        assert_eq!(bars[1].close, 101.0);
    }

    #[test]
    fn parse_truncates_to_lookback() {
        let day = 86_400i64;
        let base = 1_500_000_000i64;
        let timestamps: Vec<i64> = (0..300).map(|i| base + i * day).collect();
        let closes: Vec<Option<f64>> = (0..300).map(|i| Some(100.0 + i as f64)).collect();
        let json = chart_json(&timestamps, &closes);
        let resp: ChartResponse = serde_json::from_str(&json).unwrap();
        let bars = YahooProvider::parse_response("TEST", resp).unwrap().unwrap();

        assert_eq!(bars.len(), LOOKBACK_BARS);
        // The trailing window is kept, not the leading one.
        assert_eq!(bars.last().unwrap().close, 100.0 + 299.0);
    }

    #[test]
    fn parse_not_found_is_no_data() {
        let json = r#"{"chart":{"result":null,
            "error":{"code":"Not Found","description":"No data found"}}}"#;
        let resp: ChartResponse = serde_json::from_str(json).unwrap();
        assert!(YahooProvider::parse_response("NOPE", resp)
            .unwrap()
            .is_none());
    }

    #[test]
    fn parse_other_error_is_failure() {
        let json = r#"{"chart":{"result":null,
            "error":{"code":"Internal","description":"boom"}}}"#;
        let resp: ChartResponse = serde_json::from_str(json).unwrap();
        let err = YahooProvider::parse_response("TEST", resp).unwrap_err();
        assert!(matches!(err, DataError::ResponseFormatChanged(_)));
    }

    #[test]
    fn parse_missing_timestamps_is_no_data() {
        let json = r#"{"chart":{"result":[{"timestamp":null,
            "indicators":{"quote":[{"open":[],"high":[],"low":[],"close":[],"volume":[]}]}}],
            "error":null}}"#;
        let resp: ChartResponse = serde_json::from_str(json).unwrap();
        assert!(YahooProvider::parse_response("TEST", resp)
            .unwrap()
            .is_none());
    }

    #[test]
    fn chart_url_includes_ticker_and_interval() {
        let url = YahooProvider::chart_url(
            "RELIANCE.NS",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        );
        assert!(url.contains("/chart/RELIANCE.NS"));
        assert!(url.contains("interval=1d"));
    }
}
