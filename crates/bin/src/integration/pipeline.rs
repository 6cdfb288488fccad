//! Fetch-and-compute pipeline for a watchlist.
//!
//! Snapshots are fetched with bounded concurrency, failures are logged and
//! skipped, and results come back in watchlist order.

use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use pegboard_data::{DataError, FundamentalsSnapshot, QuoteSource};
use pegboard_ratios::{DerivedMetrics, RatioEngine};

/// Error type for pipeline operations.
#[derive(Debug, thiserror::Error)]
pub(crate) enum PipelineError {
    /// Every ticker failed to fetch.
    #[error("No data fetched for any of {0} tickers")]
    NoData(usize),
}

/// Result of fetching a watchlist.
#[derive(Debug, Default)]
pub(crate) struct FetchOutcome {
    /// Successful snapshots, in watchlist order.
    pub(crate) snapshots: Vec<FundamentalsSnapshot>,
    /// Tickers that failed, in watchlist order.
    pub(crate) failures: Vec<(String, DataError)>,
}

impl FetchOutcome {
    /// Fail when nothing was fetched.
    pub(crate) fn require_any(self) -> Result<Self, PipelineError> {
        if self.snapshots.is_empty() {
            Err(PipelineError::NoData(self.failures.len()))
        } else {
            Ok(self)
        }
    }
}

/// Fetch snapshots for `tickers` from `source`, at most `concurrency` at a time.
pub(crate) async fn fetch_snapshots(
    source: &dyn QuoteSource,
    tickers: &[String],
    concurrency: usize,
    progress: Option<&ProgressBar>,
) -> FetchOutcome {
    tracing::debug!(
        source = source.name(),
        tickers = tickers.len(),
        concurrency,
        "fetching snapshots"
    );

    let mut results: Vec<(usize, String, Result<FundamentalsSnapshot, DataError>)> =
        stream::iter(tickers.iter().enumerate())
            .map(|(idx, ticker)| async move {
                let result = source.fetch_snapshot(ticker).await;
                (idx, ticker.clone(), result)
            })
            .buffer_unordered(concurrency.max(1))
            .inspect(|(_, ticker, _)| {
                if let Some(pb) = progress {
                    pb.set_message(ticker.clone());
                    pb.inc(1);
                }
            })
            .collect()
            .await;
    results.sort_by_key(|(idx, _, _)| *idx);

    let mut outcome = FetchOutcome::default();
    for (_, ticker, result) in results {
        match result {
            Ok(snapshot) => outcome.snapshots.push(snapshot),
            Err(e) => {
                let warn = || tracing::warn!(ticker = %ticker, error = %e, "skipping ticker");
                match progress {
                    Some(pb) => pb.suspend(warn),
                    None => warn(),
                }
                outcome.failures.push((ticker, e));
            }
        }
    }
    outcome
}

/// Run the engine over each snapshot, pairing results with their ticker.
pub(crate) fn compute_rows(
    engine: &RatioEngine,
    snapshots: &[FundamentalsSnapshot],
) -> Vec<(String, DerivedMetrics)> {
    snapshots
        .iter()
        .map(|s| (s.ticker.clone(), engine.compute(s)))
        .collect()
}

/// Reorder rows to follow `order`; rows not named in `order` are dropped.
pub(crate) fn reorder_rows(
    rows: Vec<(String, DerivedMetrics)>,
    order: &[String],
) -> Vec<(String, DerivedMetrics)> {
    let mut rows: Vec<Option<(String, DerivedMetrics)>> = rows.into_iter().map(Some).collect();
    order
        .iter()
        .filter_map(|ticker| {
            rows.iter_mut()
                .find(|row| row.as_ref().is_some_and(|(t, _)| t == ticker))
                .and_then(Option::take)
        })
        .collect()
}
