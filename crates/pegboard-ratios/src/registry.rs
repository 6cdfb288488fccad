//! Metric Registry
//!
//! Central registry of every derived metric. Reporters use it to label
//! columns and to build legends.

use std::collections::HashMap;

/// Metric categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricCategory {
    /// Per-share earnings figures
    Earnings,
    /// Price multiples (P/E, P/B)
    Valuation,
    /// Growth-adjusted multiples (PEG variants)
    GrowthAdjusted,
    /// Growth rates and margins
    Growth,
    /// Cash flow figures
    CashFlow,
}

/// Display precision class for a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricUnit {
    /// Currency amount per share
    Currency,
    /// Dimensionless multiple
    Ratio,
    /// Percentage
    Percent,
    /// Currency amount in billions
    Billions,
}

impl MetricUnit {
    /// Decimal places used when rendering values of this unit.
    pub const fn precision(self) -> usize {
        match self {
            Self::Percent => 1,
            Self::Currency | Self::Ratio | Self::Billions => 2,
        }
    }
}

/// Metric metadata
#[derive(Debug, Clone)]
pub struct MetricInfo {
    /// Metric name (field name on `DerivedMetrics`)
    pub name: &'static str,
    /// Short column label
    pub label: &'static str,
    /// Metric category
    pub category: MetricCategory,
    /// Display unit
    pub unit: MetricUnit,
    /// Legend text
    pub description: &'static str,
}

/// Get all available metric info
pub fn available_metrics() -> Vec<MetricInfo> {
    vec![
        // Earnings
        MetricInfo {
            name: "trailing_eps",
            label: "TTM EPS",
            category: MetricCategory::Earnings,
            unit: MetricUnit::Currency,
            description: "Trailing twelve-month EPS (sum of the last 4 quarters)",
        },
        MetricInfo {
            name: "forward_eps",
            label: "Fwd EPS",
            category: MetricCategory::Earnings,
            unit: MetricUnit::Currency,
            description: "Projected EPS assuming 80% of current TTM EPS growth continues",
        },
        // Valuation
        MetricInfo {
            name: "pe",
            label: "P/E",
            category: MetricCategory::Valuation,
            unit: MetricUnit::Ratio,
            description: "Price to Earnings ratio",
        },
        MetricInfo {
            name: "forward_pe",
            label: "Fwd P/E",
            category: MetricCategory::Valuation,
            unit: MetricUnit::Ratio,
            description: "Forward Price to Earnings ratio",
        },
        MetricInfo {
            name: "price_to_book",
            label: "P/B",
            category: MetricCategory::Valuation,
            unit: MetricUnit::Ratio,
            description: "Price to Book ratio",
        },
        // Growth-adjusted
        MetricInfo {
            name: "trailing_peg",
            label: "PEG",
            category: MetricCategory::GrowthAdjusted,
            unit: MetricUnit::Ratio,
            description: "Price/Earnings to Growth ratio (trailing)",
        },
        MetricInfo {
            name: "forward_peg",
            label: "Fwd PEG",
            category: MetricCategory::GrowthAdjusted,
            unit: MetricUnit::Ratio,
            description: "Forward P/E to forward EPS growth ratio",
        },
        MetricInfo {
            name: "hybrid_peg",
            label: "PE/FutureG",
            category: MetricCategory::GrowthAdjusted,
            unit: MetricUnit::Ratio,
            description: "Current P/E to Future Growth ratio (hybrid metric)",
        },
        // Growth
        MetricInfo {
            name: "trailing_eps_growth_pct",
            label: "EPS Growth",
            category: MetricCategory::Growth,
            unit: MetricUnit::Percent,
            description: "Year over Year TTM EPS growth",
        },
        MetricInfo {
            name: "forward_eps_growth_pct",
            label: "Fwd EPS Growth",
            category: MetricCategory::Growth,
            unit: MetricUnit::Percent,
            description: "Growth from TTM EPS to forward EPS",
        },
        MetricInfo {
            name: "revenue_growth_pct",
            label: "Rev Growth",
            category: MetricCategory::Growth,
            unit: MetricUnit::Percent,
            description: "Year over Year Revenue Growth",
        },
        MetricInfo {
            name: "earnings_growth_pct",
            label: "E Growth",
            category: MetricCategory::Growth,
            unit: MetricUnit::Percent,
            description: "Expected Earnings Growth",
        },
        MetricInfo {
            name: "margin_pct",
            label: "Margin",
            category: MetricCategory::Growth,
            unit: MetricUnit::Percent,
            description: "Net Profit Margin",
        },
        // Cash flow
        MetricInfo {
            name: "operating_cashflow_billions",
            label: "Cash ($B)",
            category: MetricCategory::CashFlow,
            unit: MetricUnit::Billions,
            description: "Operating Cash Flow in billions",
        },
    ]
}

/// Get metrics by category
pub fn metrics_by_category(category: MetricCategory) -> Vec<MetricInfo> {
    available_metrics()
        .into_iter()
        .filter(|m| m.category == category)
        .collect()
}

/// Get metric info by name
pub fn get_metric_info(name: &str) -> Option<MetricInfo> {
    available_metrics().into_iter().find(|m| m.name == name)
}

/// Get a map of all metrics indexed by name
pub fn metric_map() -> HashMap<&'static str, MetricInfo> {
    available_metrics()
        .into_iter()
        .map(|m| (m.name, m))
        .collect()
}

/// List all metric names
pub fn list_metric_names() -> Vec<&'static str> {
    available_metrics().into_iter().map(|m| m.name).collect()
}

/// Count metrics by category
pub fn count_by_category() -> HashMap<MetricCategory, usize> {
    let mut counts = HashMap::new();
    for metric in available_metrics() {
        *counts.entry(metric.category).or_insert(0) += 1;
    }
    counts
}
