//! Table formatting utilities for CLI list commands
//!
//! Rows are built from typed [`CellValue`]s and rendered to TSV (padded,
//! colored on a terminal), CSV, Markdown or bare ids.

use console::style;

use crate::cli::helpers::{escape_csv, format_temp, truncate_str};
use crate::cli::OutputFormat;

/// Configuration for table output
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Show summary line after table (e.g., "5 cell(s) found")
    pub show_summary: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { show_summary: true }
    }
}

impl TableConfig {
    /// Create config optimized for piping (no summary)
    pub fn for_pipe() -> Self {
        Self {
            show_summary: false,
        }
    }
}

/// A typed cell value with semantic meaning for formatting
#[derive(Debug, Clone)]
pub enum CellValue {
    /// Record ID (cyan colored)
    Id(String),
    /// Plain text, truncated to the column width
    Text(String),
    /// Geometry / category label
    Type(String),
    /// Yes/no capability flag (yes=green, no=dim)
    Flag(bool),
    /// Temperature in °C
    Temp(f64),
    /// Techniques etc. as comma-separated list
    Tags(Vec<String>),
    /// Contact email ("-" when absent)
    Email(Option<String>),
}

impl CellValue {
    /// Format for TSV output (with colors if terminal)
    pub fn format_tsv(&self, width: usize) -> String {
        match self {
            CellValue::Id(id) => {
                format!("{:<width$}", style(truncate_str(id, width)).cyan(), width = width)
            }
            CellValue::Text(s) | CellValue::Type(s) => {
                let truncated = truncate_str(s, width.saturating_sub(2));
                format!("{:<width$}", truncated, width = width)
            }
            CellValue::Flag(on) => {
                let styled = if *on {
                    style("yes").green()
                } else {
                    style("no").dim()
                };
                format!("{:<width$}", styled, width = width)
            }
            CellValue::Temp(t) => format!("{:>width$}", format_temp(*t), width = width),
            CellValue::Tags(tags) => {
                let joined = tags.join(", ");
                format!(
                    "{:<width$}",
                    truncate_str(&joined, width.saturating_sub(2)),
                    width = width
                )
            }
            CellValue::Email(Some(email)) => {
                format!(
                    "{:<width$}",
                    style(truncate_str(email, width.saturating_sub(2))).blue(),
                    width = width
                )
            }
            CellValue::Email(None) => {
                format!("{:<width$}", "-", width = width)
            }
        }
    }

    /// Format for CSV output (RFC 4180, no colors)
    pub fn format_csv(&self) -> String {
        match self {
            CellValue::Id(s) | CellValue::Text(s) | CellValue::Type(s) => escape_csv(s),
            CellValue::Flag(on) => on.to_string(),
            CellValue::Temp(t) => format!("{}", t),
            CellValue::Tags(tags) => escape_csv(&tags.join(", ")),
            CellValue::Email(email) => email.as_deref().map(escape_csv).unwrap_or_default(),
        }
    }

    /// Format for Markdown output (no colors, escaped pipes)
    pub fn format_md(&self) -> String {
        let raw = match self {
            CellValue::Flag(on) => (if *on { "✓" } else { "" }).to_string(),
            CellValue::Email(Some(email)) => format!("[{0}](mailto:{0})", email),
            CellValue::Email(None) => "-".to_string(),
            other => other.raw(),
        };
        raw.replace('|', "\\|")
    }

    /// Get raw string value (no formatting)
    pub fn raw(&self) -> String {
        match self {
            CellValue::Id(s) | CellValue::Text(s) | CellValue::Type(s) => s.clone(),
            CellValue::Flag(on) => (if *on { "yes" } else { "no" }).to_string(),
            CellValue::Temp(t) => format_temp(*t),
            CellValue::Tags(tags) => tags.join(", "),
            CellValue::Email(email) => email.clone().unwrap_or_default(),
        }
    }

    /// Display width of this cell's content (for dynamic column sizing)
    pub fn display_width(&self) -> usize {
        match self {
            CellValue::Flag(_) => 3,
            CellValue::Email(None) => 1,
            other => other.raw().chars().count(),
        }
    }
}

/// Column definition with header label and width cap
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub key: &'static str,
    pub header: &'static str,
    pub width: usize,
}

impl ColumnDef {
    pub const fn new(key: &'static str, header: &'static str, width: usize) -> Self {
        Self { key, header, width }
    }
}

/// A row of cell values for table output
pub struct TableRow {
    pub id: String,
    pub cells: Vec<(&'static str, CellValue)>,
}

impl TableRow {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            cells: Vec::new(),
        }
    }

    pub fn cell(mut self, key: &'static str, value: CellValue) -> Self {
        self.cells.push((key, value));
        self
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

/// Table formatter that renders rows in various formats
pub struct TableFormatter<'a> {
    columns: &'a [ColumnDef],
    entity_name: &'static str,
    config: TableConfig,
}

impl<'a> TableFormatter<'a> {
    pub fn new(columns: &'a [ColumnDef], entity_name: &'static str) -> Self {
        Self {
            columns,
            entity_name,
            config: TableConfig::default(),
        }
    }

    /// Configure the formatter with custom settings
    pub fn with_config(mut self, config: TableConfig) -> Self {
        self.config = config;
        self
    }

    /// Print rows in the specified format
    pub fn output(&self, rows: &[TableRow], format: OutputFormat) {
        print!("{}", self.render(rows, format));
    }

    /// Render rows in the specified format
    pub fn render(&self, rows: &[TableRow], format: OutputFormat) -> String {
        match format {
            OutputFormat::Csv => self.render_csv(rows),
            OutputFormat::Md => self.render_md(rows),
            OutputFormat::Id => rows.iter().map(|r| format!("{}\n", r.id)).collect(),
            _ => self.render_tsv(rows),
        }
    }

    /// Calculate column widths from content, capped at each column's width
    fn calculate_widths(&self, rows: &[TableRow]) -> Vec<usize> {
        self.columns
            .iter()
            .map(|col| {
                let max_content = rows
                    .iter()
                    .filter_map(|r| r.get(col.key))
                    .map(|v| v.display_width())
                    .max()
                    .unwrap_or(0);
                // +2 for the truncation buffer used by text cells
                col.header
                    .len()
                    .max(max_content.saturating_add(2))
                    .min(col.width)
            })
            .collect()
    }

    fn render_tsv(&self, rows: &[TableRow]) -> String {
        let widths = self.calculate_widths(rows);
        let mut out = String::new();

        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(col, w)| format!("{:<width$}", style(col.header).bold(), width = *w))
            .collect();
        out.push_str(header.join(" ").trim_end());
        out.push('\n');

        let total_width: usize = widths.iter().sum::<usize>() + widths.len().saturating_sub(1);
        out.push_str(&"-".repeat(total_width));
        out.push('\n');

        for row in rows {
            let parts: Vec<String> = self
                .columns
                .iter()
                .zip(&widths)
                .map(|(col, w)| match row.get(col.key) {
                    Some(value) => value.format_tsv(*w),
                    None => format!("{:<width$}", "-", width = *w),
                })
                .collect();
            out.push_str(parts.join(" ").trim_end());
            out.push('\n');
        }

        if self.config.show_summary {
            out.push('\n');
            out.push_str(&format!(
                "{} {}(s) found.\n",
                style(rows.len()).cyan(),
                self.entity_name
            ));
        }

        out
    }

    fn render_csv(&self, rows: &[TableRow]) -> String {
        let mut out = String::new();
        let headers: Vec<&str> = self.columns.iter().map(|c| c.key).collect();
        out.push_str(&headers.join(","));
        out.push('\n');

        for row in rows {
            let values: Vec<String> = self
                .columns
                .iter()
                .map(|col| row.get(col.key).map(|v| v.format_csv()).unwrap_or_default())
                .collect();
            out.push_str(&values.join(","));
            out.push('\n');
        }
        out
    }

    fn render_md(&self, rows: &[TableRow]) -> String {
        let mut out = String::new();
        let headers: Vec<&str> = self.columns.iter().map(|c| c.header).collect();
        out.push_str(&format!("| {} |\n", headers.join(" | ")));

        let separators: Vec<&str> = headers.iter().map(|_| "---").collect();
        out.push_str(&format!("|{}|\n", separators.join("|")));

        for row in rows {
            let values: Vec<String> = self
                .columns
                .iter()
                .map(|col| {
                    row.get(col.key)
                        .map(|v| v.format_md())
                        .unwrap_or_else(|| "-".to_string())
                })
                .collect();
            out.push_str(&format!("| {} |\n", values.join(" | ")));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: &[ColumnDef] = &[
        ColumnDef::new("id", "ID", 12),
        ColumnDef::new("name", "NAME", 20),
        ColumnDef::new("cad", "CAD", 5),
    ];

    fn rows() -> Vec<TableRow> {
        vec![
            TableRow::new("A")
                .cell("id", CellValue::Id("A".into()))
                .cell("name", CellValue::Text("Cell, A".into()))
                .cell("cad", CellValue::Flag(true)),
            TableRow::new("B")
                .cell("id", CellValue::Id("B".into()))
                .cell("name", CellValue::Text("Cell B".into())),
        ]
    }

    #[test]
    fn test_cell_value_text_format() {
        let cell = CellValue::Text("Hello World".to_string());
        assert!(cell.format_tsv(20).contains("Hello World"));
        assert_eq!(cell.format_csv(), "Hello World");
        assert_eq!(cell.format_md(), "Hello World");
    }

    #[test]
    fn test_cell_value_flag() {
        assert_eq!(CellValue::Flag(true).format_csv(), "true");
        assert_eq!(CellValue::Flag(false).raw(), "no");
        assert_eq!(CellValue::Flag(true).format_md(), "✓");
    }

    #[test]
    fn test_cell_value_temp() {
        let cell = CellValue::Temp(150.0);
        assert_eq!(cell.raw(), "150°C");
        assert_eq!(cell.format_csv(), "150");
        assert_eq!(cell.display_width(), 5);
    }

    #[test]
    fn test_cell_value_tags() {
        let cell = CellValue::Tags(vec!["XRD".to_string(), "XAS".to_string()]);
        assert_eq!(cell.format_csv(), "\"XRD, XAS\"");
        assert_eq!(cell.format_md(), "XRD, XAS");
    }

    #[test]
    fn test_cell_value_email() {
        let some = CellValue::Email(Some("a@b.org".to_string()));
        assert_eq!(some.format_md(), "[a@b.org](mailto:a@b.org)");
        let none = CellValue::Email(None);
        assert_eq!(none.format_csv(), "");
        assert_eq!(none.format_md(), "-");
    }

    #[test]
    fn test_cell_value_md_escapes_pipes() {
        let cell = CellValue::Text("a|b|c".to_string());
        assert_eq!(cell.format_md(), "a\\|b\\|c");
    }

    #[test]
    fn test_table_row_builder() {
        let row = TableRow::new("REG-1").cell("name", CellValue::Text("My Cell".to_string()));
        assert_eq!(row.id, "REG-1");
        assert!(row.get("name").is_some());
        assert!(row.get("missing").is_none());
    }

    #[test]
    fn test_render_csv() {
        let out = TableFormatter::new(COLUMNS, "cell").render(&rows(), OutputFormat::Csv);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "id,name,cad");
        assert_eq!(lines[1], "A,\"Cell, A\",true");
        assert_eq!(lines[2], "B,Cell B,");
    }

    #[test]
    fn test_render_md() {
        let out = TableFormatter::new(COLUMNS, "cell").render(&rows(), OutputFormat::Md);
        assert!(out.starts_with("| ID | NAME | CAD |\n|---|---|---|\n"));
        assert!(out.contains("| B | Cell B | - |"));
    }

    #[test]
    fn test_render_ids() {
        let out = TableFormatter::new(COLUMNS, "cell").render(&rows(), OutputFormat::Id);
        assert_eq!(out, "A\nB\n");
    }

    #[test]
    fn test_render_tsv_summary() {
        let formatter = TableFormatter::new(COLUMNS, "cell");
        let out = formatter.render(&rows(), OutputFormat::Tsv);
        assert!(out.contains("Cell B"));
        assert!(out.contains("cell(s) found."));

        let piped = formatter
            .with_config(TableConfig::for_pipe())
            .render(&rows(), OutputFormat::Tsv);
        assert!(!piped.contains("found."));
    }
}
