//! Single-ticker inspection report.

use pegboard_ratios::config::TTM_QUARTERS;
use pegboard_ratios::eps::sum_recent_eps;
use pegboard_ratios::{DerivedMetrics, EpsObservation, FundamentalsSnapshot, IncomeObservation};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Quarters of net income shown.
const NET_INCOME_QUARTERS: usize = 8;

/// Detailed view of one ticker: provider values next to computed ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectionReport {
    /// Input snapshot.
    pub snapshot: FundamentalsSnapshot,
    /// Engine output for the snapshot.
    pub metrics: DerivedMetrics,
}

fn fmt_value(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"))
}

fn fmt_percent(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.1}%"))
}

fn push_field(output: &mut String, label: &str, value: String) {
    output.push_str(&format!("{:<28}{}\n", format!("{label}:"), value));
}

fn push_history(output: &mut String, history: &[EpsObservation]) {
    output.push_str(&format!("{:<14}{:>10}\n", "Quarter", "EPS"));
    output.push_str(&"-".repeat(24));
    output.push('\n');
    for obs in history {
        output.push_str(&format!("{:<14}{:>10.2}\n", obs.period_end.to_string(), obs.eps));
    }
}

fn push_net_income(output: &mut String, history: &[IncomeObservation]) {
    output.push_str(&format!("{:<14}{:>16}\n", "Quarter", "Net Income ($B)"));
    output.push_str(&"-".repeat(30));
    output.push('\n');
    for obs in history.iter().take(NET_INCOME_QUARTERS) {
        output.push_str(&format!(
            "{:<14}{:>16.2}\n",
            obs.period_end.to_string(),
            obs.net_income / 1e9
        ));
    }
}

impl InspectionReport {
    /// Create a report from a snapshot and its computed metrics.
    pub const fn new(snapshot: FundamentalsSnapshot, metrics: DerivedMetrics) -> Self {
        Self { snapshot, metrics }
    }

    /// Ticker symbol.
    pub fn ticker(&self) -> &str {
        &self.snapshot.ticker
    }

    /// Sum of the most recent quarters, when at least four are available.
    pub fn computed_ttm_eps(&self) -> Option<f64> {
        sum_recent_eps(&self.snapshot.quarterly_eps_history, TTM_QUARTERS)
    }

    /// Render as plain text sections.
    pub fn to_text(&self) -> String {
        let s = &self.snapshot;
        let m = &self.metrics;
        let mut output = String::new();

        output.push_str(&format!("=== Stock Info for {} ===\n", s.ticker));
        push_field(&mut output, "Current Price", fmt_value(s.current_price));
        push_field(&mut output, "Trailing P/E (provider)", fmt_value(s.trailing_pe_api));
        push_field(&mut output, "Forward P/E (provider)", fmt_value(s.forward_pe_api));
        push_field(&mut output, "Trailing EPS (provider)", fmt_value(s.trailing_eps_api));
        push_field(&mut output, "Forward EPS (provider)", fmt_value(s.forward_eps_api));
        push_field(&mut output, "Price to Book", fmt_value(s.price_to_book));
        output.push('\n');

        output.push_str("=== Growth Metrics ===\n");
        push_field(&mut output, "TTM Revenue Growth", fmt_percent(m.revenue_growth_pct));
        push_field(&mut output, "TTM Earnings Growth", fmt_percent(m.earnings_growth_pct));
        push_field(&mut output, "TTM EPS Growth", fmt_percent(m.trailing_eps_growth_pct));
        push_field(
            &mut output,
            "Quarterly Earnings Growth",
            fmt_percent(s.earnings_quarterly_growth.map(|g| g * 100.0)),
        );
        push_field(&mut output, "Forward EPS Growth", fmt_percent(m.forward_eps_growth_pct));
        push_field(&mut output, "Net Margin", fmt_percent(m.margin_pct));
        output.push('\n');

        output.push_str("=== Recent Quarters EPS ===\n");
        if s.quarterly_eps_history.is_empty() {
            output.push_str("No earnings history data available\n");
        } else {
            output.push_str(&format!(
                "Number of quarters available: {}\n",
                s.quarters_available()
            ));
            push_history(&mut output, &s.quarterly_eps_history);
            output.push('\n');
            push_field(
                &mut output,
                "Calculated TTM EPS",
                fmt_value(self.computed_ttm_eps()),
            );
            push_field(&mut output, "Provider TTM EPS", fmt_value(s.trailing_eps_api));
        }
        output.push('\n');

        if !s.ttm_eps_history.is_empty() {
            output.push_str("=== TTM EPS History ===\n");
            push_history(&mut output, &s.ttm_eps_history);
            output.push('\n');
        }

        output.push_str("=== Historical Quarterly Net Income ===\n");
        if s.quarterly_net_income.is_empty() {
            output.push_str("No net income data available\n");
        } else {
            push_net_income(&mut output, &s.quarterly_net_income);
        }
        output.push('\n');

        output.push_str("=== Computed Ratios ===\n");
        push_field(&mut output, "Trailing EPS", fmt_value(m.trailing_eps));
        push_field(&mut output, "Forward EPS", fmt_value(m.forward_eps));
        push_field(&mut output, "P/E", fmt_value(m.pe));
        push_field(&mut output, "Forward P/E", fmt_value(m.forward_pe));
        push_field(&mut output, "PEG", fmt_value(m.trailing_peg));
        push_field(&mut output, "Forward PEG", fmt_value(m.forward_peg));
        push_field(&mut output, "PE/FutureG", fmt_value(m.hybrid_peg));

        output
    }
}

impl fmt::Display for InspectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pegboard_ratios::RatioEngine;

    fn snapshot() -> FundamentalsSnapshot {
        let quarters = [(2024, 12, 31, 3.23), (2024, 9, 30, 3.30), (2024, 6, 30, 2.95), (2024, 3, 31, 2.94)]
            .iter()
            .map(|&(y, m, d, eps)| EpsObservation::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), eps))
            .collect();
        let mut snapshot = FundamentalsSnapshot::new("MSFT")
            .with_price(415.5)
            .with_quarterly_eps(quarters)
            .with_trailing_eps_api(12.42);
        snapshot.revenue_growth = Some(0.16);
        snapshot.earnings_quarterly_growth = Some(0.104);
        snapshot
    }

    #[test]
    fn test_text_sections() {
        let snapshot = snapshot();
        let metrics = RatioEngine::new().compute(&snapshot);
        let text = InspectionReport::new(snapshot, metrics).to_text();

        assert!(text.starts_with("=== Stock Info for MSFT ===\n"));
        assert!(text.contains("Current Price:              415.50\n"));
        assert!(text.contains("TTM Revenue Growth:         16.0%\n"));
        assert!(text.contains("TTM EPS Growth:             n/a\n"));
        assert!(text.contains("Quarterly Earnings Growth:  10.4%\n"));
        assert!(text.contains("Number of quarters available: 4\n"));
        assert!(text.contains("2024-12-31          3.23\n"));
        assert!(text.contains("Calculated TTM EPS:         12.42\n"));
        assert!(!text.contains("=== TTM EPS History ==="));
        assert!(text.contains(
            "=== Historical Quarterly Net Income ===\nNo net income data available\n"
        ));
    }

    #[test]
    fn test_net_income_section_shows_recent_eight() {
        let mut snapshot = snapshot();
        snapshot.quarterly_net_income = (0..10)
            .map(|i| {
                let date = NaiveDate::from_ymd_opt(2024 - i / 4, 12 - 3 * (i as u32 % 4), 28).unwrap();
                IncomeObservation::new(date, 24_108_000_000.0 - f64::from(i) * 1e9)
            })
            .collect();
        let text = InspectionReport::new(snapshot, DerivedMetrics::default()).to_text();

        assert!(text.contains("Quarter        Net Income ($B)\n"));
        assert!(text.contains("2024-12-28               24.11\n"));
        assert!(text.contains("2023-03-28               17.11\n"));
        assert!(!text.contains("2022-12-28"));
    }

    #[test]
    fn test_computed_ttm_requires_four_quarters() {
        let mut snapshot = snapshot();
        snapshot.quarterly_eps_history.truncate(3);
        let report = InspectionReport::new(snapshot, DerivedMetrics::default());
        assert_eq!(report.computed_ttm_eps(), None);
    }

    #[test]
    fn test_empty_history() {
        let report = InspectionReport::new(FundamentalsSnapshot::new("X"), DerivedMetrics::default());
        assert!(report.to_string().contains("No earnings history data available"));
        assert_eq!(report.ticker(), "X");
    }
}
