//! Per-ticker fundamentals snapshot consumed by the ratio engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single EPS figure tied to the end date of the quarter it reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpsObservation {
    /// Quarter-end date.
    pub period_end: NaiveDate,
    /// Earnings per share for the period.
    pub eps: f64,
}

impl EpsObservation {
    /// Create a new observation.
    pub const fn new(period_end: NaiveDate, eps: f64) -> Self {
        Self { period_end, eps }
    }
}

/// Net income for one reported quarter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncomeObservation {
    /// Quarter-end date.
    pub period_end: NaiveDate,
    /// Net income in raw currency units.
    pub net_income: f64,
}

impl IncomeObservation {
    /// Create a new observation.
    pub const fn new(period_end: NaiveDate, net_income: f64) -> Self {
        Self {
            period_end,
            net_income,
        }
    }
}

/// Raw fundamentals for one ticker, as supplied by a quote source.
///
/// Every numeric field is optional because providers routinely omit values.
/// Histories are ordered most-recent-first and are not assumed to be
/// contiguous or complete.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundamentalsSnapshot {
    /// Ticker symbol.
    pub ticker: String,
    /// Current share price.
    pub current_price: Option<f64>,
    /// Provider-reported trailing EPS, used when quarterly history is short.
    pub trailing_eps_api: Option<f64>,
    /// Actual quarterly EPS, most recent first.
    #[serde(default)]
    pub quarterly_eps_history: Vec<EpsObservation>,
    /// Trailing-twelve-month EPS sums spaced one quarter apart, most recent first.
    #[serde(default)]
    pub ttm_eps_history: Vec<EpsObservation>,
    /// Year-over-year revenue growth as a fraction.
    pub revenue_growth: Option<f64>,
    /// Expected earnings growth as a fraction.
    pub earnings_growth: Option<f64>,
    /// Net profit margin as a fraction.
    pub profit_margin: Option<f64>,
    /// Operating cash flow in raw currency units.
    pub operating_cashflow: Option<f64>,
    /// Provider-reported trailing PEG ratio.
    pub trailing_peg_api: Option<f64>,
    /// Provider-reported trailing P/E.
    pub trailing_pe_api: Option<f64>,
    /// Provider-reported forward P/E.
    pub forward_pe_api: Option<f64>,
    /// Provider-reported forward EPS estimate.
    pub forward_eps_api: Option<f64>,
    /// Price to book ratio.
    pub price_to_book: Option<f64>,
    /// Provider-reported year-over-year growth of the latest quarter's earnings, as a fraction.
    #[serde(default)]
    pub earnings_quarterly_growth: Option<f64>,
    /// Quarterly net income, most recent first. Informational only.
    #[serde(default)]
    pub quarterly_net_income: Vec<IncomeObservation>,
}

impl FundamentalsSnapshot {
    /// Create an empty snapshot for a ticker.
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            ..Default::default()
        }
    }

    /// Set the current price.
    pub const fn with_price(mut self, price: f64) -> Self {
        self.current_price = Some(price);
        self
    }

    /// Set the quarterly EPS history (most recent first).
    pub fn with_quarterly_eps(mut self, history: Vec<EpsObservation>) -> Self {
        self.quarterly_eps_history = history;
        self
    }

    /// Set the TTM EPS history (most recent first).
    pub fn with_ttm_eps(mut self, history: Vec<EpsObservation>) -> Self {
        self.ttm_eps_history = history;
        self
    }

    /// Set the provider trailing EPS.
    pub const fn with_trailing_eps_api(mut self, eps: f64) -> Self {
        self.trailing_eps_api = Some(eps);
        self
    }

    /// Number of quarterly EPS observations available.
    pub fn quarters_available(&self) -> usize {
        self.quarterly_eps_history.len()
    }
}
