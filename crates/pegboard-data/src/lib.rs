#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/pegboard/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod dump;
pub mod error;
pub mod rate_limit;
pub mod series;
pub mod source;
pub mod yahoo;

pub use dump::{dump_raw_json, raw_dump_path};
pub use error::{DataError, Result};
pub use pegboard_ratios::{EpsObservation, FundamentalsSnapshot, IncomeObservation};
pub use rate_limit::RateLimiter;
pub use series::rolling_ttm;
pub use source::{InMemorySource, QuoteSource, normalize_ticker};
pub use yahoo::{YahooFundamentalsProvider, YahooQuoteProvider};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
