//! Render and export a small comparison batch.

use pegboard_output::{ColumnSet, ComparisonTable, ExportFormat, Exporter, MetricsExport};
use pegboard_ratios::{FundamentalsSnapshot, RatioEngine};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut msft = FundamentalsSnapshot::new("MSFT")
        .with_price(415.5)
        .with_trailing_eps_api(12.42);
    msft.earnings_growth = Some(0.104);
    msft.profit_margin = Some(0.36);

    let mut nvda = FundamentalsSnapshot::new("NVDA")
        .with_price(131.4)
        .with_trailing_eps_api(2.94);
    nvda.earnings_growth = Some(0.82);
    nvda.revenue_growth = Some(0.78);

    let engine = RatioEngine::new();
    let rows: Vec<_> = [msft, nvda]
        .iter()
        .map(|s| (s.ticker.clone(), engine.compute(s)))
        .collect();

    let table = ComparisonTable::new("Demo", ColumnSet::Valuation.columns()).with_rows(rows.clone());
    println!("{table}");

    println!("CSV:");
    println!("{}", MetricsExport::from_rows(&rows).export_to_string(ExportFormat::Csv)?);
    Ok(())
}
