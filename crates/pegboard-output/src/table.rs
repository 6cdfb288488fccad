//! Comparison tables across tickers.

use pegboard_ratios::{DerivedMetrics, MetricInfo, MetricUnit, get_metric_info};
use std::fmt;

/// A table column backed by a registry metric.
#[derive(Debug, Clone)]
pub struct Column {
    info: MetricInfo,
}

impl Column {
    /// Look up a column by metric name.
    pub fn from_metric(name: &str) -> Option<Self> {
        get_metric_info(name).map(|info| Self { info })
    }

    /// Metric name on `DerivedMetrics`.
    pub const fn name(&self) -> &'static str {
        self.info.name
    }

    /// Header label.
    pub const fn label(&self) -> &'static str {
        self.info.label
    }

    /// Legend text.
    pub const fn description(&self) -> &'static str {
        self.info.description
    }

    /// Display unit.
    pub const fn unit(&self) -> MetricUnit {
        self.info.unit
    }

    /// Format a value for display. Absent values render as an empty cell.
    pub fn format(&self, value: Option<f64>) -> String {
        value.map_or_else(String::new, |v| {
            format!("{:.*}", self.info.unit.precision(), v)
        })
    }
}

/// Predefined column selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnSet {
    /// Valuation overview: multiples, cash flow, growth, margins and PEG variants.
    #[default]
    Valuation,
    /// EPS-centred view: trailing and forward EPS, EPS growth and PEGs.
    Growth,
    /// Every registered metric.
    All,
}

const VALUATION_COLUMNS: &[&str] = &[
    "pe",
    "forward_pe",
    "price_to_book",
    "operating_cashflow_billions",
    "revenue_growth_pct",
    "earnings_growth_pct",
    "margin_pct",
    "trailing_peg",
    "hybrid_peg",
];

const GROWTH_COLUMNS: &[&str] = &[
    "trailing_eps",
    "forward_eps",
    "trailing_eps_growth_pct",
    "forward_eps_growth_pct",
    "pe",
    "forward_pe",
    "trailing_peg",
    "forward_peg",
];

impl ColumnSet {
    /// Parse a column set name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "valuation" | "default" => Some(Self::Valuation),
            "growth" | "eps" => Some(Self::Growth),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    /// Columns in display order.
    pub fn columns(self) -> Vec<Column> {
        match self {
            Self::Valuation => VALUATION_COLUMNS
                .iter()
                .filter_map(|name| Column::from_metric(name))
                .collect(),
            Self::Growth => GROWTH_COLUMNS
                .iter()
                .filter_map(|name| Column::from_metric(name))
                .collect(),
            Self::All => pegboard_ratios::available_metrics()
                .into_iter()
                .map(|info| Column { info })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

/// Per-ticker metrics laid out as a table.
#[derive(Debug, Clone)]
pub struct ComparisonTable {
    title: String,
    columns: Vec<Column>,
    rows: Vec<(String, DerivedMetrics)>,
}

impl ComparisonTable {
    /// Create an empty table.
    pub fn new(title: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            title: title.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row.
    pub fn push_row(&mut self, ticker: impl Into<String>, metrics: DerivedMetrics) {
        self.rows.push((ticker.into(), metrics));
    }

    /// Append rows, keeping their order.
    pub fn with_rows(mut self, rows: impl IntoIterator<Item = (String, DerivedMetrics)>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Table title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Displayed columns.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn headers(&self) -> Vec<&str> {
        std::iter::once("Ticker")
            .chain(self.columns.iter().map(Column::label))
            .collect()
    }

    fn alignments(&self) -> Vec<Align> {
        std::iter::once(Align::Left)
            .chain(self.columns.iter().map(|_| Align::Right))
            .collect()
    }

    fn cells(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|(ticker, metrics)| {
                std::iter::once(ticker.clone())
                    .chain(self.columns.iter().map(|c| c.format(metrics.get(c.name()))))
                    .collect()
            })
            .collect()
    }

    fn widths(headers: &[&str], cells: &[Vec<String>]) -> Vec<usize> {
        headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                cells
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(h.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Render as a boxed grid with `+---+` borders and a `===` header rule.
    pub fn to_grid(&self) -> String {
        let headers = self.headers();
        let aligns = self.alignments();
        let cells = self.cells();
        let widths = Self::widths(&headers, &cells);

        let rule = |fill: char| {
            let mut line = String::from("+");
            for w in &widths {
                line.push_str(&fill.to_string().repeat(w + 2));
                line.push('+');
            }
            line.push('\n');
            line
        };
        let row_line = |row: &[&str]| {
            let mut line = String::from("|");
            for ((cell, w), align) in row.iter().zip(&widths).zip(&aligns) {
                match align {
                    Align::Left => line.push_str(&format!(" {cell:<w$} |")),
                    Align::Right => line.push_str(&format!(" {cell:>w$} |")),
                }
            }
            line.push('\n');
            line
        };

        let mut output = rule('-');
        output.push_str(&row_line(&headers));
        output.push_str(&rule('='));
        for row in &cells {
            let row: Vec<&str> = row.iter().map(String::as_str).collect();
            output.push_str(&row_line(&row));
            output.push_str(&rule('-'));
        }
        output
    }

    /// Render as a Markdown table with a title heading.
    pub fn to_markdown(&self) -> String {
        let headers = self.headers();
        let aligns = self.alignments();
        let mut output = format!("## {}\n\n", self.title);

        output.push_str(&format!("| {} |\n", headers.join(" | ")));
        let rule: Vec<&str> = aligns
            .iter()
            .map(|a| match a {
                Align::Left => ":---",
                Align::Right => "---:",
            })
            .collect();
        output.push_str(&format!("|{}|\n", rule.join("|")));

        for row in self.cells() {
            output.push_str(&format!("| {} |\n", row.join(" | ")));
        }
        output
    }

    /// Legend lines (`label = description`) for the displayed columns.
    pub fn legend(&self) -> String {
        legend_for(&self.columns)
    }
}

/// Legend text for a column list.
pub fn legend_for(columns: &[Column]) -> String {
    let mut output = String::from("Legend:\n");
    for column in columns {
        output.push_str(&format!("{} = {}\n", column.label(), column.description()));
    }
    output
}

impl fmt::Display for ComparisonTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f)?;
        write!(f, "{}", self.to_grid())?;
        writeln!(f)?;
        write!(f, "{}", self.legend())
    }
}
