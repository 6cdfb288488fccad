//! Ratio engine walkthrough
//!
//! Builds a snapshot by hand, computes every metric, and prints them with
//! their registry labels. A second pass shows the fraction PEG convention.
//!
//! Run with: cargo run --example ratio_engine_demo -p pegboard-ratios

use chrono::NaiveDate;
use pegboard_ratios::{
    EpsObservation, FundamentalsSnapshot, MetricCategory, PegDenominator, RatioConfig,
    RatioEngine, metrics_by_category,
};

fn quarter(year: i32, month: u32, day: u32, eps: f64) -> Option<EpsObservation> {
    NaiveDate::from_ymd_opt(year, month, day).map(|date| EpsObservation::new(date, eps))
}

fn main() {
    println!("Pegboard Ratio Engine Demo");
    println!("==========================\n");

    let quarterly: Vec<EpsObservation> = [
        quarter(2024, 12, 31, 3.23),
        quarter(2024, 9, 30, 3.30),
        quarter(2024, 6, 30, 2.95),
        quarter(2024, 3, 31, 2.94),
    ]
    .into_iter()
    .flatten()
    .collect();
    let ttm: Vec<EpsObservation> = [
        quarter(2024, 12, 31, 12.42),
        quarter(2024, 9, 30, 12.12),
        quarter(2024, 6, 30, 11.80),
        quarter(2024, 3, 31, 11.53),
        quarter(2023, 12, 31, 11.06),
    ]
    .into_iter()
    .flatten()
    .collect();

    let mut snapshot = FundamentalsSnapshot::new("MSFT")
        .with_price(415.5)
        .with_quarterly_eps(quarterly)
        .with_ttm_eps(ttm);
    snapshot.price_to_book = Some(11.8);
    snapshot.revenue_growth = Some(0.16);
    snapshot.profit_margin = Some(0.35);

    let metrics = RatioEngine::new().compute(&snapshot);

    for (category, title) in [
        (MetricCategory::Earnings, "Earnings"),
        (MetricCategory::Valuation, "Valuation"),
        (MetricCategory::GrowthAdjusted, "Growth-adjusted"),
        (MetricCategory::Growth, "Growth"),
        (MetricCategory::CashFlow, "Cash flow"),
    ] {
        println!("{title}");
        println!("{}", "-".repeat(title.len()));
        for info in metrics_by_category(category) {
            let value = metrics
                .get(info.name)
                .map_or_else(|| "n/a".to_string(), |v| format!("{v:.prec$}", prec = info.unit.precision()));
            println!("  {:<16} {:>10}   {}", info.label, value, info.description);
        }
        println!();
    }

    let fraction = RatioEngine::with_config(RatioConfig {
        peg_denominator: PegDenominator::Fraction,
        ..Default::default()
    })
    .compute(&snapshot);
    println!(
        "Trailing PEG: {:?} (percentage) vs {:?} (fraction)",
        metrics.trailing_peg, fraction.trailing_peg
    );
}
