//! Yahoo payload parsing against saved fixtures.

use approx::assert_relative_eq;
use chrono::NaiveDate;
use pegboard_data::yahoo::{
    apply_quarterly_eps, extract_summary_result, parse_quarterly_eps, parse_quarterly_net_income,
    parse_quote_summary,
};
use pegboard_data::{DataError, dump_raw_json};
use pegboard_ratios::RatioEngine;

const SUMMARY: &str = include_str!("fixtures/msft_quote_summary.json");
const TIMESERIES: &str = include_str!("fixtures/msft_timeseries.json");
const NOT_FOUND: &str = include_str!("fixtures/not_found.json");

#[test]
fn test_parse_quote_summary_fields() {
    let snapshot = parse_quote_summary("MSFT", SUMMARY).unwrap();

    assert_eq!(snapshot.ticker, "MSFT");
    assert_eq!(snapshot.current_price, Some(415.5));
    assert_eq!(snapshot.trailing_eps_api, Some(12.42));
    assert_eq!(snapshot.forward_eps_api, Some(14.9));
    assert_eq!(snapshot.revenue_growth, Some(0.16));
    assert_eq!(snapshot.earnings_growth, Some(0.104));
    assert_eq!(snapshot.profit_margin, Some(0.35955));
    assert_eq!(snapshot.operating_cashflow, Some(118_548_000_000.0));
    assert_eq!(snapshot.trailing_peg_api, Some(2.1));
    assert_eq!(snapshot.trailing_pe_api, Some(33.45));
    assert_eq!(snapshot.forward_pe_api, Some(27.88));
    assert_eq!(snapshot.price_to_book, Some(10.4));
    assert!(snapshot.ttm_eps_history.is_empty());
}

#[test]
fn test_earnings_history_is_most_recent_first() {
    let snapshot = parse_quote_summary("MSFT", SUMMARY).unwrap();
    let history = &snapshot.quarterly_eps_history;

    assert_eq!(history.len(), 4);
    assert_eq!(
        history[0].period_end,
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
    );
    assert_eq!(history[0].eps, 3.23);
    assert_eq!(
        history[3].period_end,
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
    );
}

#[test]
fn test_parse_timeseries_skips_nulls() {
    let quarters = parse_quarterly_eps(TIMESERIES).unwrap();

    assert_eq!(quarters.len(), 8);
    assert_eq!(
        quarters[0].period_end,
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
    );
    assert_eq!(quarters[7].eps, 2.45);
}

#[test]
fn test_parse_timeseries_net_income() {
    let income = parse_quarterly_net_income(TIMESERIES).unwrap();

    assert_eq!(income.len(), 4);
    assert_eq!(
        income[0].period_end,
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
    );
    assert_eq!(income[0].net_income, 24_108_000_000.0);
    // the EPS series is unaffected by the extra result entry
    assert_eq!(parse_quarterly_eps(TIMESERIES).unwrap().len(), 8);
}

#[test]
fn test_missing_quarter_breaks_ttm_growth() {
    let mut quarters = parse_quarterly_eps(TIMESERIES).unwrap();
    let q2 = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
    quarters.retain(|q| q.period_end != q2);

    let snapshot = apply_quarterly_eps(parse_quote_summary("MSFT", SUMMARY).unwrap(), quarters);
    let ttm_dates: Vec<_> = snapshot
        .ttm_eps_history
        .iter()
        .map(|o| o.period_end.to_string())
        .collect();
    assert_eq!(ttm_dates, vec!["2024-03-31", "2023-12-31"]);

    let metrics = RatioEngine::new().compute(&snapshot);
    assert_eq!(metrics.trailing_eps_growth_pct, None);
    assert_eq!(metrics.trailing_peg, Some(2.1));
}

#[test]
fn test_fixture_snapshot_through_engine() {
    let snapshot = parse_quote_summary("MSFT", SUMMARY).unwrap();
    let snapshot = apply_quarterly_eps(snapshot, parse_quarterly_eps(TIMESERIES).unwrap());

    assert_eq!(snapshot.quarters_available(), 8);
    assert_eq!(snapshot.ttm_eps_history.len(), 5);

    let metrics = RatioEngine::new().compute(&snapshot);
    assert_relative_eq!(metrics.trailing_eps.unwrap(), 12.42, epsilon = 1e-9);
    assert_relative_eq!(
        metrics.trailing_eps_growth_pct.unwrap(),
        12.296564195298384,
        epsilon = 1e-9
    );
    assert_relative_eq!(
        metrics.forward_eps.unwrap(),
        13.641786618444849,
        epsilon = 1e-9
    );
    assert_relative_eq!(metrics.pe.unwrap(), 33.45410628019324, epsilon = 1e-9);
    assert_relative_eq!(
        metrics.trailing_peg.unwrap(),
        2.7206059960215945,
        epsilon = 1e-9
    );
    assert_relative_eq!(metrics.revenue_growth_pct.unwrap(), 16.0, epsilon = 1e-9);
    assert_relative_eq!(metrics.margin_pct.unwrap(), 35.955, epsilon = 1e-9);
}

#[test]
fn test_short_history_uses_provider_fallbacks() {
    // earningsHistory alone gives four quarters and a single TTM point
    let snapshot = apply_quarterly_eps(parse_quote_summary("MSFT", SUMMARY).unwrap(), Vec::new());
    let metrics = RatioEngine::new().compute(&snapshot);

    assert_eq!(metrics.trailing_eps_growth_pct, None);
    assert_eq!(metrics.forward_eps, Some(14.9));
    assert_eq!(metrics.trailing_peg, Some(2.1));
}

#[test]
fn test_not_found_payload() {
    assert!(matches!(
        parse_quote_summary("NOPE", NOT_FOUND),
        Err(DataError::YahooApi(_))
    ));
}

#[test]
fn test_extract_and_dump_summary() {
    let raw = extract_summary_result("MSFT", SUMMARY).unwrap();
    assert_eq!(raw["price"]["regularMarketPrice"]["raw"], 415.5);

    let dir = tempfile::tempdir().unwrap();
    let path = dump_raw_json(dir.path(), "msft", &raw).unwrap();
    assert!(path.ends_with("MSFT_full_info.json"));

    let reloaded: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(reloaded, raw);
}
