#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/pegboard/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod universe;

// Re-export main types from sub-crates
pub use pegboard_data as data;
pub use pegboard_output as output;
pub use pegboard_ratios as ratios;

pub use config::AppConfig;
pub use error::{ConfigError, Result};
pub use universe::{Universe, Watchlist};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
