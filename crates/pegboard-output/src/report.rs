//! Timestamped JSON reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Required field missing from the builder.
    #[error("Missing report field: {0}")]
    MissingField(&'static str),
}

/// A saved run: what was asked, when, and the resulting payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report title, e.g. the watchlist title or an inspected ticker.
    pub title: String,

    /// Tickers covered by the report.
    pub tickers: Vec<String>,

    /// Report generation timestamp.
    pub timestamp: DateTime<Utc>,

    /// Report contents (JSON format).
    pub contents: serde_json::Value,
}

impl Report {
    /// Create a new report stamped with the current time.
    pub fn new(title: String, tickers: Vec<String>, contents: serde_json::Value) -> Self {
        Self {
            title,
            tickers,
            timestamp: Utc::now(),
            contents,
        }
    }

    /// Convert report to JSON string.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report as pretty JSON.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ReportError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// Builder for creating reports.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    title: Option<String>,
    tickers: Vec<String>,
    contents: Option<serde_json::Value>,
}

impl ReportBuilder {
    /// Create a new report builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add a covered ticker.
    pub fn ticker(mut self, ticker: impl Into<String>) -> Self {
        self.tickers.push(ticker.into());
        self
    }

    /// Set the covered tickers.
    pub fn tickers(mut self, tickers: Vec<String>) -> Self {
        self.tickers = tickers;
        self
    }

    /// Set the report contents from any serializable value.
    pub fn contents<T: Serialize>(mut self, contents: &T) -> Result<Self, ReportError> {
        self.contents = Some(serde_json::to_value(contents)?);
        Ok(self)
    }

    /// Build the report.
    pub fn build(self) -> Result<Report, ReportError> {
        let title = self.title.ok_or(ReportError::MissingField("title"))?;
        Ok(Report::new(
            title,
            self.tickers,
            self.contents.unwrap_or(serde_json::Value::Null),
        ))
    }
}
