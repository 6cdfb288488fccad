//! Ticker universes.
//!
//! A [`Watchlist`] is the set of tickers a run compares, together with the
//! title printed above the table.

pub mod watchlist;

pub use watchlist::{TECHNOLOGY_TICKERS, Watchlist};

/// Trait for ticker universes.
pub trait Universe {
    /// Get all symbols in the universe, in display order.
    fn symbols(&self) -> Vec<String>;

    /// Check if a symbol is in the universe.
    fn contains(&self, symbol: &str) -> bool {
        let symbol = symbol.to_uppercase();
        self.symbols().iter().any(|s| *s == symbol)
    }

    /// Get the number of constituents.
    fn size(&self) -> usize {
        self.symbols().len()
    }
}

impl Universe for Watchlist {
    fn symbols(&self) -> Vec<String> {
        self.tickers().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universe_trait() {
        let watchlist = Watchlist::default();

        assert!(watchlist.contains("MSFT"));
        assert!(watchlist.contains("nvda"));
        assert!(!watchlist.contains("NOTREAL"));
        assert_eq!(watchlist.size(), 4);
    }
}
