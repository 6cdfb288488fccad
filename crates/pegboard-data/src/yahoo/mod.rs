//! Yahoo Finance data providers.

pub mod auth;
pub mod fundamentals;
pub mod parse;
pub mod quotes;

pub use fundamentals::{YahooFundamentalsProvider, apply_quarterly_eps};
pub use parse::{
    extract_summary_result, parse_quarterly_eps, parse_quarterly_net_income, parse_quote_summary,
};
pub use quotes::YahooQuoteProvider;
