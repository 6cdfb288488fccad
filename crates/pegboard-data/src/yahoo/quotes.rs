//! Latest price lookup through the Yahoo chart API.

use crate::error::{DataError, Result};
use crate::source::normalize_ticker;
use yahoo_finance_api as yahoo;

/// Yahoo Finance quote provider used as the current-price fallback.
pub struct YahooQuoteProvider {
    provider: yahoo::YahooConnector,
}

impl std::fmt::Debug for YahooQuoteProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooQuoteProvider").finish_non_exhaustive()
    }
}

impl YahooQuoteProvider {
    /// Create a new quote provider.
    pub fn new() -> Result<Self> {
        Ok(Self {
            provider: yahoo::YahooConnector::new()?,
        })
    }

    /// Close of the most recent daily bar for `symbol`.
    pub async fn latest_close(&self, symbol: &str) -> Result<f64> {
        let symbol = normalize_ticker(symbol)?;
        let response = self.provider.get_latest_quotes(&symbol, "1d").await?;
        let quote = response.last_quote()?;

        if !quote.close.is_finite() || quote.close <= 0.0 {
            return Err(DataError::MissingData {
                symbol,
                reason: "No usable close in latest quote".to_string(),
            });
        }
        Ok(quote.close)
    }
}
