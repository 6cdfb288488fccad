//! The quote source abstraction and an in-memory implementation.

use crate::error::{DataError, Result};
use async_trait::async_trait;
use pegboard_ratios::FundamentalsSnapshot;
use std::collections::HashMap;
use std::path::Path;

/// A provider of per-ticker fundamentals.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Short provider name used in logs.
    fn name(&self) -> &str;

    /// Fetch the fundamentals snapshot for one ticker.
    async fn fetch_snapshot(&self, ticker: &str) -> Result<FundamentalsSnapshot>;

    /// Fetch the provider's raw payload for one ticker, for dumping to disk.
    async fn fetch_raw(&self, ticker: &str) -> Result<serde_json::Value>;
}

/// Normalize and validate a ticker symbol.
///
/// Symbols are upper-cased; letters, digits and `.`, `-`, `^`, `=` are allowed.
pub fn normalize_ticker(ticker: &str) -> Result<String> {
    let trimmed = ticker.trim();
    if trimmed.is_empty() {
        return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
    }
    if trimmed.len() > 16
        || !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='))
    {
        return Err(DataError::InvalidSymbol(trimmed.to_string()));
    }
    Ok(trimmed.to_uppercase())
}

/// Quote source backed by snapshots held in memory.
///
/// Useful for offline runs from a saved snapshot file and for tests.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    snapshots: HashMap<String, FundamentalsSnapshot>,
}

impl InMemorySource {
    /// Create a source from a list of snapshots.
    pub fn new(snapshots: Vec<FundamentalsSnapshot>) -> Self {
        let snapshots = snapshots
            .into_iter()
            .map(|s| (s.ticker.to_uppercase(), s))
            .collect();
        Self { snapshots }
    }

    /// Load snapshots from a JSON file containing an array of snapshots.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let snapshots: Vec<FundamentalsSnapshot> = serde_json::from_str(&content)?;
        Ok(Self::new(snapshots))
    }

    /// Tickers available in this source.
    pub fn tickers(&self) -> Vec<String> {
        let mut tickers: Vec<String> = self.snapshots.keys().cloned().collect();
        tickers.sort();
        tickers
    }

    fn lookup(&self, ticker: &str) -> Result<&FundamentalsSnapshot> {
        let symbol = normalize_ticker(ticker)?;
        self.snapshots
            .get(&symbol)
            .ok_or_else(|| DataError::MissingData {
                symbol,
                reason: "Ticker not present in snapshot set".to_string(),
            })
    }
}

#[async_trait]
impl QuoteSource for InMemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch_snapshot(&self, ticker: &str) -> Result<FundamentalsSnapshot> {
        self.lookup(ticker).cloned()
    }

    async fn fetch_raw(&self, ticker: &str) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self.lookup(ticker)?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("msft", "MSFT")]
    #[case("  brk.b ", "BRK.B")]
    #[case("^GSPC", "^GSPC")]
    #[case("EURUSD=X", "EURUSD=X")]
    fn test_normalize_ticker(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_ticker(input).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("MS FT")]
    #[case("AAPL;DROP")]
    fn test_invalid_ticker(#[case] input: &str) {
        assert!(matches!(
            normalize_ticker(input),
            Err(DataError::InvalidSymbol(_))
        ));
    }

    #[tokio::test]
    async fn test_in_memory_source() {
        let source = InMemorySource::new(vec![
            FundamentalsSnapshot::new("MSFT").with_price(420.0),
            FundamentalsSnapshot::new("googl").with_price(170.0),
        ]);
        assert_eq!(source.tickers(), vec!["GOOGL", "MSFT"]);

        let snapshot = source.fetch_snapshot("googl").await.unwrap();
        assert_eq!(snapshot.current_price, Some(170.0));

        let raw = source.fetch_raw("MSFT").await.unwrap();
        assert_eq!(raw["ticker"], "MSFT");

        let missing = source.fetch_snapshot("NVDA").await;
        assert!(matches!(missing, Err(DataError::MissingData { .. })));
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshots.json");
        let snapshots = vec![FundamentalsSnapshot::new("ADBE").with_trailing_eps_api(12.4)];
        std::fs::write(&path, serde_json::to_string(&snapshots).unwrap()).unwrap();

        let source = InMemorySource::from_json_file(&path).unwrap();
        assert_eq!(source.tickers(), vec!["ADBE"]);
    }
}
