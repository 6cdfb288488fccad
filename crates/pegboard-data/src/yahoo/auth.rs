//! Yahoo Finance cookie and crumb session.
//!
//! Yahoo requires a session cookie from `fc.yahoo.com` and a crumb token
//! passed as a query parameter. The cookie lives in the reqwest cookie jar;
//! the crumb is cached here until a request is rejected.

use crate::error::{DataError, Result};
use std::time::Duration;
use tokio::sync::Mutex;

const COOKIE_URL: &str = "https://fc.yahoo.com";
const REFERER: &str = "https://finance.yahoo.com/";
const CRUMB_ENDPOINTS: [&str; 2] = [
    "https://query1.finance.yahoo.com/v1/test/getcrumb",
    "https://query2.finance.yahoo.com/v1/test/getcrumb",
];
const AUTH_TIMEOUT: Duration = Duration::from_secs(10);

/// What a crumb endpoint body turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrumbBody {
    /// A usable crumb token.
    Crumb(String),
    /// Yahoo answered with its rate limit page.
    RateLimited,
    /// An HTML page or otherwise unusable text.
    Invalid,
}

/// Classify a `getcrumb` response body.
pub fn classify_crumb_body(body: &str) -> CrumbBody {
    let body = body.trim();
    if body.contains("<html") || body.contains("<!DOCTYPE") {
        return CrumbBody::Invalid;
    }
    if body.to_lowercase().contains("too many requests") {
        return CrumbBody::RateLimited;
    }
    if !body.is_empty() && body.len() < 100 && !body.contains(char::is_whitespace) {
        return CrumbBody::Crumb(body.to_string());
    }
    CrumbBody::Invalid
}

/// Cached crumb shared by all requests of one provider.
#[derive(Debug, Default)]
pub struct CrumbSession {
    crumb: Mutex<Option<String>>,
}

impl CrumbSession {
    /// Create an empty session; the first request triggers a refresh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached crumb, fetching a fresh one when none is cached.
    ///
    /// The lock is held across the refresh so concurrent callers wait for a
    /// single round trip.
    pub async fn crumb(&self, client: &reqwest::Client) -> Result<String> {
        let mut guard = self.crumb.lock().await;
        if let Some(crumb) = guard.as_ref() {
            return Ok(crumb.clone());
        }
        let crumb = refresh(client).await?;
        *guard = Some(crumb.clone());
        Ok(crumb)
    }

    /// Drop the cached crumb after Yahoo rejected it.
    pub async fn invalidate(&self) {
        tracing::debug!("invalidating Yahoo crumb");
        *self.crumb.lock().await = None;
    }
}

async fn refresh(client: &reqwest::Client) -> Result<String> {
    tracing::debug!("refreshing Yahoo session cookie and crumb");

    // fc.yahoo.com answers 404 but still sets the session cookie.
    client
        .get(COOKIE_URL)
        .header(reqwest::header::REFERER, REFERER)
        .timeout(AUTH_TIMEOUT)
        .send()
        .await
        .map_err(|e| DataError::Auth(format!("failed to fetch Yahoo cookie: {e}")))?;

    for endpoint in CRUMB_ENDPOINTS {
        let response = match client
            .get(endpoint)
            .header(reqwest::header::REFERER, REFERER)
            .timeout(AUTH_TIMEOUT)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                tracing::debug!(endpoint, status = %response.status(), "crumb request rejected");
                continue;
            }
            Err(e) => {
                tracing::debug!(endpoint, error = %e, "crumb request failed");
                continue;
            }
        };

        let body = response.text().await?;
        match classify_crumb_body(&body) {
            CrumbBody::Crumb(crumb) => return Ok(crumb),
            CrumbBody::RateLimited => {
                return Err(DataError::Auth(
                    "Yahoo rate limited while fetching crumb".to_string(),
                ));
            }
            CrumbBody::Invalid => continue,
        }
    }

    Err(DataError::Auth(
        "failed to fetch Yahoo crumb from all endpoints".to_string(),
    ))
}
