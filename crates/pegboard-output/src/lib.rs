#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/pegboard/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod frame;
pub mod inspect;
pub mod report;
pub mod table;

pub use export::{ExportError, ExportFormat, Exporter, MetricsExport};
pub use frame::{metrics_to_dataframe, tickers_sorted_by};
pub use inspect::InspectionReport;
pub use report::{Report, ReportBuilder, ReportError};
pub use table::{Column, ColumnSet, ComparisonTable, legend_for};
