//! `oreg export` command - Download the filtered registry as JSON

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::commands::utils::{Context, FilterArgs};
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Output file (default: filtered_cell_registry.json)
    #[arg(long, short = 'o', conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Write the JSON to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}

pub fn run(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = Context::open(global)?;
    let view = ctx.session.apply(&args.filter.to_criteria());
    let artifact = ctx.session.export(&view)?;

    if args.stdout {
        println!("{}", artifact.as_str());
        return Ok(());
    }

    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(&artifact.file_name));
    artifact.write_to(&path)?;

    if !global.quiet {
        println!(
            "{} Exported {} record(s) to {} ({})",
            style("✓").green(),
            style(artifact.count).cyan(),
            style(path.display()).cyan(),
            artifact.mime
        );
    }

    Ok(())
}
