//! `oreg list` command - Filtered hardware registry table

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::utils::{Context, FilterArgs};
use crate::cli::table::{CellValue, ColumnDef, TableConfig, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::FilterSummary;
use crate::entities::HardwareRecord;

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 16),
    ColumnDef::new("name", "CELL NAME", 32),
    ColumnDef::new("type", "GEOMETRY", 16),
    ColumnDef::new("cad", "DIGITAL TWIN", 12),
    ColumnDef::new("techniques", "TECHNIQUES", 40),
    ColumnDef::new("max_temp", "MAX TEMP", 8),
    ColumnDef::new("contact", "POINT OF CONTACT", 32),
];

fn to_row(record: &HardwareRecord) -> TableRow {
    TableRow::new(record.id.clone())
        .cell("id", CellValue::Id(record.id.clone()))
        .cell("name", CellValue::Text(record.name.clone()))
        .cell("type", CellValue::Type(record.kind.clone()))
        .cell("cad", CellValue::Flag(record.cad_available()))
        .cell("techniques", CellValue::Tags(record.techniques().to_vec()))
        .cell("max_temp", CellValue::Temp(record.max_temp_c()))
        .cell(
            "contact",
            CellValue::Email(record.primary_email().map(str::to_string)),
        )
}

/// Dashboard metrics shown under the table
fn metrics_line(summary: &FilterSummary) -> String {
    format!(
        "Digital Twin Ready: {}  High Temp Capable: {}",
        summary.cad_ready, summary.high_temp
    )
}

pub fn run(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = Context::open(global)?;
    let view = ctx.session.apply(&args.filter.to_criteria());

    if args.count {
        println!("{}", view.len());
        return Ok(());
    }

    let format = ctx.format(global, OutputFormat::Tsv);

    if format == OutputFormat::Json {
        let json = serde_json::json!({
            "summary": view.summary,
            "records": view.records,
        });
        println!("{}", serde_json::to_string_pretty(&json).into_diagnostic()?);
        return Ok(());
    }

    if view.is_empty() && matches!(format, OutputFormat::Tsv | OutputFormat::Auto) {
        if !global.quiet {
            println!("{}", style("No hardware matches the selected filters.").yellow());
        }
        return Ok(());
    }

    let rows: Vec<TableRow> = view.records.iter().map(|r| to_row(r)).collect();
    let config = if global.quiet {
        TableConfig::for_pipe()
    } else {
        TableConfig::default()
    };
    TableFormatter::new(COLUMNS, "cell")
        .with_config(config)
        .output(&rows, format);

    if !global.quiet && matches!(format, OutputFormat::Tsv | OutputFormat::Auto) {
        println!("{}", style(metrics_line(&view.summary)).dim());
    }

    Ok(())
}
