//! Watchlists of tickers to compare.

use crate::error::{ConfigError, Result};
use pegboard_data::normalize_ticker;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default comparison set.
pub const TECHNOLOGY_TICKERS: &[&str] = &["GOOGL", "MSFT", "ADBE", "NVDA"];

const TECHNOLOGY_TITLE: &str = "Financial Ratios for Technology Companies";

/// An ordered, de-duplicated list of normalized tickers with a title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWatchlist", into = "RawWatchlist")]
pub struct Watchlist {
    title: String,
    tickers: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct RawWatchlist {
    title: String,
    tickers: Vec<String>,
}

impl TryFrom<RawWatchlist> for Watchlist {
    type Error = ConfigError;

    fn try_from(raw: RawWatchlist) -> Result<Self> {
        Self::new(raw.title, raw.tickers)
    }
}

impl From<Watchlist> for RawWatchlist {
    fn from(watchlist: Watchlist) -> Self {
        Self {
            title: watchlist.title,
            tickers: watchlist.tickers,
        }
    }
}

/// Watchlist files may be a full object or a bare ticker array.
#[derive(Deserialize)]
#[serde(untagged)]
enum WatchlistFile {
    Full(Watchlist),
    Tickers(Vec<String>),
}

impl Watchlist {
    /// Create a watchlist, normalizing tickers and dropping repeats.
    ///
    /// Fails on an invalid symbol or an empty list.
    pub fn new<I, S>(title: impl Into<String>, tickers: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for ticker in tickers {
            let symbol = normalize_ticker(ticker.as_ref())
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;
            if !normalized.contains(&symbol) {
                normalized.push(symbol);
            }
        }
        if normalized.is_empty() {
            return Err(ConfigError::Invalid("watchlist has no tickers".to_string()));
        }
        Ok(Self {
            title: title.into(),
            tickers: normalized,
        })
    }

    /// The default technology comparison set.
    pub fn technology() -> Self {
        Self {
            title: TECHNOLOGY_TITLE.to_string(),
            tickers: TECHNOLOGY_TICKERS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Load a watchlist from JSON.
    ///
    /// A bare array of tickers gets a title derived from the file name.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str::<WatchlistFile>(&content)? {
            WatchlistFile::Full(watchlist) => Ok(watchlist),
            WatchlistFile::Tickers(tickers) => {
                let title = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("Watchlist");
                Self::new(title, tickers)
            }
        }
    }

    /// Table title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Tickers in display order.
    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    /// Replace the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

impl Default for Watchlist {
    fn default() -> Self {
        Self::technology()
    }
}
