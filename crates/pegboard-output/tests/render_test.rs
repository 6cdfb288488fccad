//! End-to-end rendering of engine output.

use chrono::NaiveDate;
use pegboard_output::{
    ColumnSet, ComparisonTable, ExportFormat, Exporter, InspectionReport, MetricsExport,
    ReportBuilder, metrics_to_dataframe, tickers_sorted_by,
};
use pegboard_ratios::{DerivedMetrics, EpsObservation, FundamentalsSnapshot, RatioEngine};

fn quarters(values: &[f64]) -> Vec<EpsObservation> {
    let start = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    values
        .iter()
        .enumerate()
        .map(|(i, &eps)| EpsObservation::new(start - chrono::Months::new(3 * i as u32), eps))
        .collect()
}

fn batch() -> Vec<(String, DerivedMetrics)> {
    let engine = RatioEngine::new();

    let mut googl = FundamentalsSnapshot::new("GOOGL")
        .with_price(170.0)
        .with_quarterly_eps(quarters(&[2.15, 2.12, 1.89, 1.89]));
    googl.earnings_growth = Some(0.31);
    googl.revenue_growth = Some(0.15);
    googl.profit_margin = Some(0.28);
    googl.operating_cashflow = Some(112_000_000_000.0);

    let nvda = FundamentalsSnapshot::new("NVDA");

    [googl, nvda]
        .iter()
        .map(|s| (s.ticker.clone(), engine.compute(s)))
        .collect()
}

#[test]
fn test_grid_contains_every_row_and_legend() {
    let table = ComparisonTable::new(
        "Financial Ratios for Technology Companies",
        ColumnSet::Valuation.columns(),
    )
    .with_rows(batch());

    let grid = table.to_grid();
    assert!(grid.contains("| GOOGL  |"));
    assert!(grid.contains("| NVDA   |"));
    assert!(grid.contains("Cash ($B)"));
    assert!(grid.contains("112.00"));
    assert!(grid.contains("15.0"));

    let rendered = table.to_string();
    assert!(rendered.starts_with("Financial Ratios for Technology Companies\n"));
    assert!(rendered.contains("PE/FutureG = Current P/E to Future Growth ratio (hybrid metric)"));
}

#[test]
fn test_every_line_of_grid_has_equal_width() {
    let table = ComparisonTable::new("Growth", ColumnSet::Growth.columns()).with_rows(batch());
    let grid = table.to_grid();
    let widths: Vec<usize> = grid.lines().map(|l| l.chars().count()).collect();
    assert!(widths.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_csv_export_matches_rows() {
    let records = MetricsExport::from_rows(&batch());
    let csv = records.export_to_string(ExportFormat::Csv).unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.lines().nth(2).unwrap().starts_with("NVDA,"));
}

#[test]
fn test_dataframe_sort() {
    let df = metrics_to_dataframe(&batch()).unwrap();
    assert_eq!(
        tickers_sorted_by(&df, "pe", true).unwrap(),
        vec!["GOOGL", "NVDA"]
    );
}

#[test]
fn test_inspection_report_json() {
    let snapshot = FundamentalsSnapshot::new("MSFT")
        .with_price(415.5)
        .with_quarterly_eps(quarters(&[3.23, 3.30, 2.95, 2.94]));
    let metrics = RatioEngine::new().compute(&snapshot);
    let inspection = InspectionReport::new(snapshot, metrics);

    let report = ReportBuilder::new()
        .title("MSFT inspection")
        .ticker("MSFT")
        .contents(&inspection)
        .unwrap()
        .build()
        .unwrap();

    let json = report.to_json().unwrap();
    assert!(json.contains("\"quarterly_eps_history\""));
    assert!(json.contains("\"trailing_eps\""));
}
