#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/pegboard/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod engine;
pub mod eps;
pub mod growth;
pub mod metrics;
pub mod registry;
pub mod snapshot;
pub mod valuation;

pub use config::{FORWARD_GROWTH_DAMPING, PegDenominator, RatioConfig};
pub use engine::RatioEngine;
pub use eps::{
    compute_forward_eps, compute_forward_eps_growth_pct, compute_trailing_eps,
    compute_trailing_eps_growth,
};
pub use growth::{compute_margin_pct, compute_revenue_growth_pct};
pub use metrics::DerivedMetrics;
pub use snapshot::{EpsObservation, FundamentalsSnapshot, IncomeObservation};
pub use valuation::{compute_forward_pe, compute_forward_peg, compute_pe, compute_trailing_peg};

// Re-export registry types for convenience
pub use registry::{
    MetricCategory, MetricInfo, MetricUnit, available_metrics, get_metric_info,
    metrics_by_category,
};
