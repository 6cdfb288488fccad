//! Derived metrics produced by the ratio engine.

use serde::{Deserialize, Serialize};

/// Ratios derived from a [`FundamentalsSnapshot`](crate::FundamentalsSnapshot).
///
/// A `None` field means the value could not be computed from the available
/// inputs (missing data or a zero divisor). It never stands in for zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Trailing-twelve-month EPS.
    pub trailing_eps: Option<f64>,
    /// Projected next-year EPS.
    pub forward_eps: Option<f64>,
    /// Year-over-year growth of TTM EPS, in percent.
    pub trailing_eps_growth_pct: Option<f64>,
    /// Growth from trailing to forward EPS, in percent.
    pub forward_eps_growth_pct: Option<f64>,
    /// Price over trailing EPS.
    pub pe: Option<f64>,
    /// Price over forward EPS.
    pub forward_pe: Option<f64>,
    /// Trailing P/E over trailing EPS growth.
    pub trailing_peg: Option<f64>,
    /// Forward P/E over forward EPS growth.
    pub forward_peg: Option<f64>,
    /// Revenue growth, in percent.
    pub revenue_growth_pct: Option<f64>,
    /// Net profit margin, in percent.
    pub margin_pct: Option<f64>,
    /// Expected earnings growth, in percent.
    pub earnings_growth_pct: Option<f64>,
    /// Trailing P/E over expected earnings growth.
    pub hybrid_peg: Option<f64>,
    /// Price to book ratio.
    pub price_to_book: Option<f64>,
    /// Operating cash flow in billions.
    pub operating_cashflow_billions: Option<f64>,
}

impl DerivedMetrics {
    /// Look up a metric value by its registry name.
    ///
    /// Returns `None` both for unknown names and for absent values.
    pub fn get(&self, name: &str) -> Option<f64> {
        match name {
            "trailing_eps" => self.trailing_eps,
            "forward_eps" => self.forward_eps,
            "trailing_eps_growth_pct" => self.trailing_eps_growth_pct,
            "forward_eps_growth_pct" => self.forward_eps_growth_pct,
            "pe" => self.pe,
            "forward_pe" => self.forward_pe,
            "trailing_peg" => self.trailing_peg,
            "forward_peg" => self.forward_peg,
            "revenue_growth_pct" => self.revenue_growth_pct,
            "margin_pct" => self.margin_pct,
            "earnings_growth_pct" => self.earnings_growth_pct,
            "hybrid_peg" => self.hybrid_peg,
            "price_to_book" => self.price_to_book,
            "operating_cashflow_billions" => self.operating_cashflow_billions,
            _ => None,
        }
    }

    /// Number of metrics that could be computed.
    pub fn populated(&self) -> usize {
        [
            self.trailing_eps,
            self.forward_eps,
            self.trailing_eps_growth_pct,
            self.forward_eps_growth_pct,
            self.pe,
            self.forward_pe,
            self.trailing_peg,
            self.forward_peg,
            self.revenue_growth_pct,
            self.margin_pct,
            self.earnings_growth_pct,
            self.hybrid_peg,
            self.price_to_book,
            self.operating_cashflow_billions,
        ]
        .iter()
        .filter(|v| v.is_some())
        .count()
    }
}
