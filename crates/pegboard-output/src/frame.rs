//! Polars views of metric batches.

use pegboard_ratios::{DerivedMetrics, registry::list_metric_names};
use polars::prelude::*;

/// Build a DataFrame with a `ticker` column followed by one column per metric.
///
/// Absent metrics become nulls.
pub fn metrics_to_dataframe(rows: &[(String, DerivedMetrics)]) -> PolarsResult<DataFrame> {
    let tickers: Vec<&str> = rows.iter().map(|(ticker, _)| ticker.as_str()).collect();
    let mut columns: Vec<Column> = vec![Series::new("ticker".into(), tickers).into()];

    for name in list_metric_names() {
        let values: Vec<Option<f64>> = rows.iter().map(|(_, m)| m.get(name)).collect();
        columns.push(Series::new(name.into(), values).into());
    }

    DataFrame::new(columns)
}

/// Tickers ordered by a metric, with absent values last.
pub fn tickers_sorted_by(
    df: &DataFrame,
    metric: &str,
    descending: bool,
) -> PolarsResult<Vec<String>> {
    let sorted = df.sort(
        [metric],
        SortMultipleOptions::default()
            .with_order_descending(descending)
            .with_nulls_last(true)
            .with_maintain_order(true),
    )?;

    Ok(sorted
        .column("ticker")?
        .as_materialized_series()
        .str()?
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect())
}
