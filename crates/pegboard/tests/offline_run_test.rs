//! End-to-end run from a config file and saved snapshots, without network.

use pegboard::data::FundamentalsSnapshot;
use pegboard::output::{ColumnSet, ComparisonTable};
use pegboard::ratios::{PegDenominator, RatioEngine};
use pegboard::{AppConfig, ConfigError, Universe};
use rstest::rstest;

fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_partial_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "config.json",
        r#"{
            "watchlist": {"title": "Chips", "tickers": ["nvda", "amd"]},
            "ratios": {"peg_denominator": "fraction"}
        }"#,
    );

    let config = AppConfig::load(&path).unwrap();
    assert_eq!(config.watchlist.title(), "Chips");
    assert_eq!(config.watchlist.symbols(), vec!["NVDA", "AMD"]);
    assert_eq!(config.ratios.peg_denominator, PegDenominator::Fraction);
    assert_eq!(config.ratios.forward_growth_damping, 0.8);
    assert_eq!(config.concurrency, 4);
}

#[rstest]
#[case(r#"{"concurrency": 0}"#)]
#[case(r#"{"ratios": {"forward_growth_damping": -1.0}}"#)]
#[case(r#"{"watchlist": {"title": "x", "tickers": []}}"#)]
fn test_invalid_config_rejected(#[case] content: &str) {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "config.json", content);
    assert!(AppConfig::load(&path).is_err());
}

#[test]
fn test_malformed_json_is_json_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "config.json", "{ not json");
    assert!(matches!(AppConfig::load(&path), Err(ConfigError::Json(_))));
}

#[test]
fn test_snapshots_to_table() {
    let config = AppConfig::default();
    let engine = RatioEngine::with_config(config.ratios.clone());

    let snapshots: Vec<FundamentalsSnapshot> = config
        .watchlist
        .symbols()
        .into_iter()
        .enumerate()
        .map(|(i, ticker)| {
            FundamentalsSnapshot::new(ticker)
                .with_price(100.0)
                .with_trailing_eps_api(4.0 + i as f64)
        })
        .collect();

    let table = ComparisonTable::new(config.watchlist.title(), ColumnSet::Valuation.columns())
        .with_rows(
            snapshots
                .iter()
                .map(|s| (s.ticker.clone(), engine.compute(s))),
        );

    assert_eq!(table.len(), 4);
    let grid = table.to_grid();
    assert!(grid.contains("| GOOGL "));
    assert!(grid.contains("25.00"));
    assert!(grid.contains("14.29"));
    assert!(table.to_string().starts_with(config.watchlist.title()));
}
