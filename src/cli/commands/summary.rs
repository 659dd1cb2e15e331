//! `oreg summary` command - Dashboard metrics for the filtered set

use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::commands::utils::{Context, FilterArgs};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::FilterSummary;

#[derive(clap::Args, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Metric label/value pairs as shown on the dashboard
fn metrics(summary: &FilterSummary) -> [(&'static str, String); 4] {
    [
        ("Cells Found", summary.total.to_string()),
        ("Digital Twin Ready", summary.cad_ready.to_string()),
        ("High Temp Capable", summary.high_temp.to_string()),
        ("Avg. TRL", "Research".to_string()),
    ]
}

fn render_table(summary: &FilterSummary, style_md: bool) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Metric", "Value"]);
    for (label, value) in metrics(summary) {
        builder.push_record([label.to_string(), value]);
    }
    let mut table = builder.build();
    if style_md {
        table.with(Style::markdown());
    } else {
        table.with(Style::rounded());
    }
    table.to_string()
}

pub fn run(args: SummaryArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = Context::open(global)?;
    let view = ctx.session.apply(&args.filter.to_criteria());

    match ctx.format(global, OutputFormat::Tsv) {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&view.summary).into_diagnostic()?
            );
        }
        OutputFormat::Csv => {
            println!("total,cad_ready,high_temp");
            println!(
                "{},{},{}",
                view.summary.total, view.summary.cad_ready, view.summary.high_temp
            );
        }
        OutputFormat::Md => println!("{}", render_table(&view.summary, true)),
        OutputFormat::Id => {
            for id in view.ids() {
                println!("{}", id);
            }
        }
        OutputFormat::Tsv | OutputFormat::Auto => {
            if !global.quiet {
                println!("{}", style("Operando Sample Environment Library").bold().underlined());
                println!();
            }
            println!("{}", render_table(&view.summary, false));
        }
    }

    Ok(())
}
