//! Parsing of Yahoo Finance `quoteSummary` and fundamentals timeseries payloads.
//!
//! These functions are pure so they can be exercised against saved fixtures.

use crate::error::{DataError, Result};
use crate::series::sort_most_recent_first;
use chrono::{DateTime, NaiveDate};
use pegboard_ratios::{EpsObservation, FundamentalsSnapshot, IncomeObservation};
use serde::{Deserialize, Deserializer};

/// `quoteSummary` modules requested for a snapshot.
pub const SUMMARY_MODULES: &[&str] = &[
    "price",
    "financialData",
    "defaultKeyStatistics",
    "summaryDetail",
    "earningsHistory",
];

/// Timeseries type carrying quarterly diluted EPS.
pub const QUARTERLY_EPS_TYPE: &str = "quarterlyDilutedEPS";

/// Timeseries type carrying quarterly net income.
pub const QUARTERLY_NET_INCOME_TYPE: &str = "quarterlyNetIncome";

/// Yahoo's `{ "raw": 1.23, "fmt": "1.23" }` wrapper.
///
/// Missing, empty and non-finite values all become `None`. Zero is kept.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
struct RawValue {
    #[serde(default, deserialize_with = "lenient_f64")]
    raw: Option<f64>,
}

fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| match v {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.parse::<f64>().ok(),
            _ => None,
        })
        .filter(|v| v.is_finite()))
}

fn raw(value: Option<RawValue>) -> Option<f64> {
    value.and_then(|v| v.raw)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryEnvelope {
    quote_summary: SummaryBody,
}

#[derive(Debug, Deserialize)]
struct SummaryBody {
    #[serde(default)]
    result: Option<Vec<SummaryResult>>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl ApiError {
    fn message(&self) -> String {
        match (&self.code, &self.description) {
            (Some(code), Some(desc)) => format!("{code}: {desc}"),
            (Some(code), None) => code.clone(),
            (None, Some(desc)) => desc.clone(),
            (None, None) => "unknown error".to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryResult {
    #[serde(default)]
    price: Option<PriceModule>,
    #[serde(default)]
    financial_data: Option<FinancialData>,
    #[serde(default)]
    default_key_statistics: Option<KeyStatistics>,
    #[serde(default)]
    summary_detail: Option<SummaryDetail>,
    #[serde(default)]
    earnings_history: Option<EarningsHistory>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceModule {
    #[serde(default)]
    regular_market_price: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FinancialData {
    #[serde(default)]
    current_price: Option<RawValue>,
    #[serde(default)]
    revenue_growth: Option<RawValue>,
    #[serde(default)]
    earnings_growth: Option<RawValue>,
    #[serde(default)]
    profit_margins: Option<RawValue>,
    #[serde(default)]
    operating_cashflow: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeyStatistics {
    #[serde(default)]
    trailing_eps: Option<RawValue>,
    #[serde(default)]
    forward_eps: Option<RawValue>,
    #[serde(default)]
    peg_ratio: Option<RawValue>,
    #[serde(default)]
    price_to_book: Option<RawValue>,
    #[serde(default, rename = "forwardPE")]
    forward_pe: Option<RawValue>,
    #[serde(default)]
    profit_margins: Option<RawValue>,
    #[serde(default)]
    earnings_quarterly_growth: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
struct SummaryDetail {
    #[serde(default, rename = "trailingPE")]
    trailing_pe: Option<RawValue>,
    #[serde(default, rename = "forwardPE")]
    forward_pe: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
struct EarningsHistory {
    #[serde(default)]
    history: Vec<EarningsQuarter>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EarningsQuarter {
    #[serde(default)]
    quarter: Option<RawValue>,
    #[serde(default)]
    eps_actual: Option<RawValue>,
}

fn date_from_unix(secs: f64) -> Option<NaiveDate> {
    DateTime::from_timestamp(secs as i64, 0).map(|dt| dt.date_naive())
}

fn summary_result(ticker: &str, body: &str) -> Result<SummaryResult> {
    let envelope: SummaryEnvelope = serde_json::from_str(body)
        .map_err(|e| DataError::Parse(format!("quoteSummary for {ticker}: {e}")))?;
    if let Some(error) = envelope.quote_summary.error {
        return Err(DataError::YahooApi(format!("{ticker}: {}", error.message())));
    }
    envelope
        .quote_summary
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| DataError::MissingData {
            symbol: ticker.to_string(),
            reason: "quoteSummary returned no result".to_string(),
        })
}

/// Extract the first `quoteSummary.result` entry as untyped JSON for dumping.
pub fn extract_summary_result(ticker: &str, body: &str) -> Result<serde_json::Value> {
    let mut value: serde_json::Value = serde_json::from_str(body)?;
    if let Some(error) = value.pointer("/quoteSummary/error").filter(|e| !e.is_null()) {
        let parsed: ApiError = serde_json::from_value(error.clone())?;
        return Err(DataError::YahooApi(format!("{ticker}: {}", parsed.message())));
    }
    value
        .pointer_mut("/quoteSummary/result/0")
        .map(serde_json::Value::take)
        .ok_or_else(|| DataError::MissingData {
            symbol: ticker.to_string(),
            reason: "quoteSummary returned no result".to_string(),
        })
}

/// Build a snapshot from a `quoteSummary` response body.
///
/// The quarterly EPS history is taken from the `earningsHistory` module and
/// sorted most-recent-first. The TTM history is left empty; it comes from the
/// timeseries endpoint.
pub fn parse_quote_summary(ticker: &str, body: &str) -> Result<FundamentalsSnapshot> {
    let result = summary_result(ticker, body)?;
    let price = result.price.unwrap_or_default();
    let financial = result.financial_data.unwrap_or_default();
    let stats = result.default_key_statistics.unwrap_or_default();
    let detail = result.summary_detail.unwrap_or_default();

    let quarters = result
        .earnings_history
        .unwrap_or_default()
        .history
        .into_iter()
        .filter_map(|q| {
            let period_end = raw(q.quarter).and_then(date_from_unix)?;
            Some(EpsObservation::new(period_end, raw(q.eps_actual)?))
        })
        .collect();

    Ok(FundamentalsSnapshot {
        ticker: ticker.to_string(),
        current_price: raw(price.regular_market_price).or(raw(financial.current_price)),
        trailing_eps_api: raw(stats.trailing_eps),
        quarterly_eps_history: sort_most_recent_first(quarters),
        ttm_eps_history: Vec::new(),
        revenue_growth: raw(financial.revenue_growth),
        earnings_growth: raw(financial.earnings_growth),
        profit_margin: raw(financial.profit_margins).or(raw(stats.profit_margins)),
        operating_cashflow: raw(financial.operating_cashflow),
        trailing_peg_api: raw(stats.peg_ratio),
        trailing_pe_api: raw(detail.trailing_pe),
        forward_pe_api: raw(detail.forward_pe).or(raw(stats.forward_pe)),
        forward_eps_api: raw(stats.forward_eps),
        price_to_book: raw(stats.price_to_book),
        earnings_quarterly_growth: raw(stats.earnings_quarterly_growth),
        quarterly_net_income: Vec::new(),
    })
}

#[derive(Debug, Deserialize)]
struct TimeseriesEnvelope {
    timeseries: TimeseriesBody,
}

#[derive(Debug, Deserialize)]
struct TimeseriesBody {
    #[serde(default)]
    result: Option<Vec<TimeseriesResult>>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct TimeseriesResult {
    #[serde(default, rename = "quarterlyDilutedEPS")]
    quarterly_diluted_eps: Option<Vec<Option<TimeseriesPoint>>>,
    #[serde(default, rename = "quarterlyNetIncome")]
    quarterly_net_income: Option<Vec<Option<TimeseriesPoint>>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimeseriesPoint {
    as_of_date: String,
    #[serde(default)]
    reported_value: Option<RawValue>,
}

fn timeseries_results(body: &str) -> Result<Vec<TimeseriesResult>> {
    let envelope: TimeseriesEnvelope = serde_json::from_str(body)
        .map_err(|e| DataError::Parse(format!("fundamentals timeseries: {e}")))?;
    if let Some(error) = envelope.timeseries.error {
        return Err(DataError::YahooApi(error.message()));
    }
    Ok(envelope.timeseries.result.unwrap_or_default())
}

/// Dated values of one series, skipping nulls and unparseable dates.
fn series_points(
    results: Vec<TimeseriesResult>,
    select: fn(TimeseriesResult) -> Option<Vec<Option<TimeseriesPoint>>>,
) -> impl Iterator<Item = (NaiveDate, f64)> {
    results
        .into_iter()
        .filter_map(select)
        .flatten()
        .flatten()
        .filter_map(|point| {
            let period_end = NaiveDate::parse_from_str(&point.as_of_date, "%Y-%m-%d").ok()?;
            Some((period_end, raw(point.reported_value)?))
        })
}

/// Parse quarterly diluted EPS from a fundamentals timeseries response.
///
/// Null points and points with unparseable dates are skipped. The result is
/// most-recent-first.
pub fn parse_quarterly_eps(body: &str) -> Result<Vec<EpsObservation>> {
    let observations = series_points(timeseries_results(body)?, |r| r.quarterly_diluted_eps)
        .map(|(date, eps)| EpsObservation::new(date, eps))
        .collect();
    Ok(sort_most_recent_first(observations))
}

/// Parse quarterly net income from a fundamentals timeseries response, most recent first.
pub fn parse_quarterly_net_income(body: &str) -> Result<Vec<IncomeObservation>> {
    let mut observations: Vec<IncomeObservation> =
        series_points(timeseries_results(body)?, |r| r.quarterly_net_income)
            .map(|(date, income)| IncomeObservation::new(date, income))
            .collect();
    observations.sort_by(|a, b| b.period_end.cmp(&a.period_end));
    observations.dedup_by_key(|o| o.period_end);
    Ok(observations)
}
