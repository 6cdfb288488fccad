//! CSV and JSON export of derived metrics.

use pegboard_ratios::DerivedMetrics;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Writer produced invalid UTF-8.
    #[error("Invalid UTF-8 in output: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }

    /// Infer a format from a file extension. JSON files are pretty-printed.
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::PrettyJson),
            other => Err(ExportError::InvalidFormat(format!(
                "unsupported export extension {:?} for {}",
                other.unwrap_or(""),
                path.display()
            ))),
        }
    }
}

/// One ticker's derived metrics as a flat export record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricsExport {
    /// Ticker symbol.
    pub ticker: String,
    /// Trailing twelve-month EPS.
    pub trailing_eps: Option<f64>,
    /// Projected forward EPS.
    pub forward_eps: Option<f64>,
    /// TTM EPS growth percentage.
    pub trailing_eps_growth_pct: Option<f64>,
    /// Forward EPS growth percentage.
    pub forward_eps_growth_pct: Option<f64>,
    /// Trailing P/E.
    pub pe: Option<f64>,
    /// Forward P/E.
    pub forward_pe: Option<f64>,
    /// Trailing PEG.
    pub trailing_peg: Option<f64>,
    /// Forward PEG.
    pub forward_peg: Option<f64>,
    /// Current P/E over expected earnings growth.
    pub hybrid_peg: Option<f64>,
    /// Revenue growth percentage.
    pub revenue_growth_pct: Option<f64>,
    /// Expected earnings growth percentage.
    pub earnings_growth_pct: Option<f64>,
    /// Net margin percentage.
    pub margin_pct: Option<f64>,
    /// Price to book.
    pub price_to_book: Option<f64>,
    /// Operating cash flow in billions.
    pub operating_cashflow_billions: Option<f64>,
}

impl MetricsExport {
    /// Create an export record for one ticker.
    pub fn new(ticker: impl Into<String>, metrics: &DerivedMetrics) -> Self {
        Self {
            ticker: ticker.into(),
            trailing_eps: metrics.trailing_eps,
            forward_eps: metrics.forward_eps,
            trailing_eps_growth_pct: metrics.trailing_eps_growth_pct,
            forward_eps_growth_pct: metrics.forward_eps_growth_pct,
            pe: metrics.pe,
            forward_pe: metrics.forward_pe,
            trailing_peg: metrics.trailing_peg,
            forward_peg: metrics.forward_peg,
            hybrid_peg: metrics.hybrid_peg,
            revenue_growth_pct: metrics.revenue_growth_pct,
            earnings_growth_pct: metrics.earnings_growth_pct,
            margin_pct: metrics.margin_pct,
            price_to_book: metrics.price_to_book,
            operating_cashflow_billions: metrics.operating_cashflow_billions,
        }
    }

    /// Build records for a batch, keeping order.
    pub fn from_rows(rows: &[(String, DerivedMetrics)]) -> Vec<Self> {
        rows.iter()
            .map(|(ticker, metrics)| Self::new(ticker.as_str(), metrics))
            .collect()
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

fn write_csv<'a>(records: impl IntoIterator<Item = &'a MetricsExport>) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for record in records {
        wtr.serialize(record)?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

impl Exporter for MetricsExport {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => write_csv(std::iter::once(self)),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Exporter for Vec<MetricsExport> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => write_csv(self),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}
