//! `oreg matrix` command - Technique compatibility matrix
//!
//! Rows are the filtered cells, columns every technique in the registry.

use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::commands::utils::{Context, FilterArgs};
use crate::cli::helpers::escape_csv;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::CompatibilityMatrix;

#[derive(clap::Args, Debug)]
pub struct MatrixArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Show a per-technique total row
    #[arg(long)]
    pub totals: bool,
}

fn mark(supported: bool) -> &'static str {
    if supported {
        "✓"
    } else {
        ""
    }
}

fn build_table(matrix: &CompatibilityMatrix, totals: bool) -> tabled::Table {
    let mut builder = Builder::default();

    let mut header = vec!["Cell".to_string()];
    header.extend(matrix.techniques.iter().cloned());
    builder.push_record(header);

    for row in &matrix.rows {
        let mut record = vec![row.name.clone()];
        record.extend(row.cells.iter().map(|&c| mark(c).to_string()));
        builder.push_record(record);
    }

    if totals {
        let mut record = vec!["Total".to_string()];
        record.extend(matrix.column_totals().iter().map(|n| n.to_string()));
        builder.push_record(record);
    }

    builder.build()
}

fn render_csv(matrix: &CompatibilityMatrix) -> String {
    let mut out = String::new();
    let mut header = vec!["id".to_string(), "name".to_string()];
    header.extend(matrix.techniques.iter().map(|t| escape_csv(t)));
    out.push_str(&header.join(","));
    out.push('\n');

    for row in &matrix.rows {
        let mut values = vec![escape_csv(&row.id), escape_csv(&row.name)];
        values.extend(row.cells.iter().map(|c| c.to_string()));
        out.push_str(&values.join(","));
        out.push('\n');
    }
    out
}

pub fn run(args: MatrixArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = Context::open(global)?;
    let view = ctx.session.apply(&args.filter.to_criteria());
    let matrix = ctx.session.matrix(&view);

    match ctx.format(global, OutputFormat::Tsv) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&matrix).into_diagnostic()?);
        }
        OutputFormat::Csv => print!("{}", render_csv(&matrix)),
        OutputFormat::Id => {
            for row in &matrix.rows {
                println!("{}", row.id);
            }
        }
        OutputFormat::Md => {
            if !matrix.is_empty() {
                let mut table = build_table(&matrix, args.totals);
                println!("{}", table.with(Style::markdown()));
            }
        }
        OutputFormat::Tsv | OutputFormat::Auto => {
            if matrix.is_empty() {
                if !global.quiet {
                    println!("{}", style("No hardware matches the selected filters.").yellow());
                }
                return Ok(());
            }
            let mut table = build_table(&matrix, args.totals);
            println!("{}", table.with(Style::rounded()));
        }
    }

    Ok(())
}
