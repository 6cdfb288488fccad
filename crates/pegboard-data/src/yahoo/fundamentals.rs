//! Fundamentals fetching from Yahoo Finance.

use super::auth::CrumbSession;
use super::parse::{
    QUARTERLY_EPS_TYPE, QUARTERLY_NET_INCOME_TYPE, SUMMARY_MODULES, extract_summary_result,
    parse_quarterly_eps, parse_quarterly_net_income, parse_quote_summary,
};
use super::quotes::YahooQuoteProvider;
use crate::error::{DataError, Result};
use crate::rate_limit::{DEFAULT_RATE_LIMIT, RateLimiter};
use crate::series::rolling_ttm;
use crate::source::{QuoteSource, normalize_ticker};
use async_trait::async_trait;
use chrono::Utc;
use pegboard_ratios::config::TTM_QUARTERS;
use pegboard_ratios::{EpsObservation, FundamentalsSnapshot, IncomeObservation};
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

const SUMMARY_BASE_URL: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary";
const TIMESERIES_BASE_URL: &str =
    "https://query2.finance.yahoo.com/ws/fundamentals-timeseries/v1/finance/timeseries";
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const RATE_LIMIT_BACKOFF: Duration = Duration::from_secs(5);

/// Lookback for the quarterly EPS timeseries, long enough for two full years of TTM points.
const EPS_LOOKBACK_DAYS: i64 = 365 * 3;

/// Yahoo Finance fundamentals provider.
///
/// Combines the `quoteSummary` modules with the fundamentals timeseries for
/// quarterly diluted EPS. When the summary has no price, the latest daily
/// close from the chart API is used.
pub struct YahooFundamentalsProvider {
    client: reqwest::Client,
    session: CrumbSession,
    rate_limiter: Arc<Mutex<RateLimiter>>,
    quotes: Option<YahooQuoteProvider>,
}

impl std::fmt::Debug for YahooFundamentalsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooFundamentalsProvider")
            .field("session", &self.session)
            .field("price_fallback", &self.quotes.is_some())
            .finish_non_exhaustive()
    }
}

impl YahooFundamentalsProvider {
    /// Create a new provider with the default rate limit.
    pub fn new() -> Result<Self> {
        Self::with_rate_limit(DEFAULT_RATE_LIMIT)
    }

    /// Create a new provider with a custom minimum interval between requests.
    pub fn with_rate_limit(min_interval: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(DataError::Network)?;

        let quotes = match YahooQuoteProvider::new() {
            Ok(quotes) => Some(quotes),
            Err(e) => {
                tracing::warn!(error = %e, "price fallback unavailable");
                None
            }
        };

        Ok(Self {
            client,
            session: CrumbSession::new(),
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(min_interval))),
            quotes,
        })
    }

    /// Disable the chart API price fallback.
    pub fn without_price_fallback(mut self) -> Self {
        self.quotes = None;
        self
    }

    /// GET a Yahoo endpoint with the session crumb, retrying once on 401/429.
    async fn get_text(&self, symbol: &str, url: &str) -> Result<String> {
        let mut retried = false;
        loop {
            self.rate_limiter.lock().await.wait().await;
            let crumb = self.session.crumb(&self.client).await?;

            tracing::debug!(symbol, url, "requesting");
            let response = self
                .client
                .get(url)
                .query(&[("crumb", crumb.as_str())])
                .send()
                .await?;
            let status = response.status();

            if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::TOO_MANY_REQUESTS)
                && !retried
            {
                tracing::debug!(symbol, %status, "request rejected, refreshing crumb");
                self.session.invalidate().await;
                retried = true;
                continue;
            }

            return match status {
                s if s.is_success() => Ok(response.text().await?),
                // quoteSummary reports unknown symbols in a 404 JSON body
                StatusCode::NOT_FOUND => Ok(response.text().await?),
                StatusCode::TOO_MANY_REQUESTS => Err(DataError::RateLimit {
                    retry_after_ms: RATE_LIMIT_BACKOFF.as_millis() as u64,
                }),
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(DataError::Auth(format!(
                    "{status} for {symbol} after crumb refresh"
                ))),
                _ => Err(DataError::Http(format!("{status} from {url}"))),
            };
        }
    }

    async fn fetch_summary_body(&self, symbol: &str) -> Result<String> {
        let url = format!(
            "{SUMMARY_BASE_URL}/{symbol}?modules={}",
            SUMMARY_MODULES.join(",")
        );
        self.get_text(symbol, &url).await
    }

    async fn fetch_timeseries_body(&self, symbol: &str, types: &[&str]) -> Result<String> {
        let period2 = Utc::now().timestamp();
        let period1 = period2 - EPS_LOOKBACK_DAYS * 86_400;
        let url = format!(
            "{TIMESERIES_BASE_URL}/{symbol}?symbol={symbol}&type={}&period1={period1}&period2={period2}",
            types.join(",")
        );
        self.get_text(symbol, &url).await
    }

    /// Fetch quarterly diluted EPS, most recent first.
    pub async fn fetch_quarterly_eps(&self, symbol: &str) -> Result<Vec<EpsObservation>> {
        let symbol = normalize_ticker(symbol)?;
        let body = self
            .fetch_timeseries_body(&symbol, &[QUARTERLY_EPS_TYPE])
            .await?;
        parse_quarterly_eps(&body)
    }

    /// Fetch quarterly diluted EPS and net income in one request.
    pub async fn fetch_quarterly_financials(
        &self,
        symbol: &str,
    ) -> Result<(Vec<EpsObservation>, Vec<IncomeObservation>)> {
        let symbol = normalize_ticker(symbol)?;
        let body = self
            .fetch_timeseries_body(&symbol, &[QUARTERLY_EPS_TYPE, QUARTERLY_NET_INCOME_TYPE])
            .await?;
        Ok((parse_quarterly_eps(&body)?, parse_quarterly_net_income(&body)?))
    }

    /// Fetch the latest close through the chart API.
    pub async fn fetch_latest_price(&self, symbol: &str) -> Result<f64> {
        let quotes = self.quotes.as_ref().ok_or_else(|| DataError::MissingData {
            symbol: symbol.to_string(),
            reason: "price fallback disabled".to_string(),
        })?;
        self.rate_limiter.lock().await.wait().await;
        quotes.latest_close(symbol).await
    }
}

/// Install a quarterly EPS series on a snapshot and derive its TTM history.
///
/// An empty series leaves the snapshot's existing quarterly history in place.
pub fn apply_quarterly_eps(
    mut snapshot: FundamentalsSnapshot,
    quarters: Vec<EpsObservation>,
) -> FundamentalsSnapshot {
    if quarters.len() > snapshot.quarterly_eps_history.len() {
        snapshot.quarterly_eps_history = quarters;
    }
    snapshot.ttm_eps_history = rolling_ttm(&snapshot.quarterly_eps_history, TTM_QUARTERS);
    snapshot
}

#[async_trait]
impl QuoteSource for YahooFundamentalsProvider {
    fn name(&self) -> &str {
        "yahoo"
    }

    async fn fetch_snapshot(&self, ticker: &str) -> Result<FundamentalsSnapshot> {
        let symbol = normalize_ticker(ticker)?;
        let body = self.fetch_summary_body(&symbol).await?;
        let mut snapshot = parse_quote_summary(&symbol, &body)?;

        match self.fetch_quarterly_financials(&symbol).await {
            Ok((quarters, net_income)) => {
                snapshot.quarterly_net_income = net_income;
                snapshot = apply_quarterly_eps(snapshot, quarters);
            }
            Err(e) => {
                tracing::warn!(symbol, error = %e, "quarterly timeseries unavailable");
                snapshot = apply_quarterly_eps(snapshot, Vec::new());
            }
        }

        if snapshot.current_price.is_none() {
            match self.fetch_latest_price(&symbol).await {
                Ok(price) => snapshot.current_price = Some(price),
                Err(e) => tracing::warn!(symbol, error = %e, "no current price"),
            }
        }

        tracing::debug!(
            symbol,
            quarters = snapshot.quarters_available(),
            ttm_points = snapshot.ttm_eps_history.len(),
            "snapshot fetched"
        );
        Ok(snapshot)
    }

    async fn fetch_raw(&self, ticker: &str) -> Result<serde_json::Value> {
        let symbol = normalize_ticker(ticker)?;
        let body = self.fetch_summary_body(&symbol).await?;
        extract_summary_result(&symbol, &body)
    }
}
