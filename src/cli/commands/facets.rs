//! `oreg facets` command - Values available for filtering

use clap::ValueEnum;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::utils::Context;
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(clap::Args, Debug)]
pub struct FacetsArgs {
    /// Only list one kind of facet
    #[arg(long, short = 'k')]
    pub kind: Option<FacetKind>,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum FacetKind {
    Technique,
    Instrument,
}

pub fn run(args: FacetsArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = Context::open(global)?;
    let registry = ctx.session.registry();

    let sections: Vec<(&str, Vec<String>)> = [
        (FacetKind::Technique, "techniques"),
        (FacetKind::Instrument, "instruments"),
    ]
    .into_iter()
    .filter(|(kind, _)| args.kind.map_or(true, |k| k == *kind))
    .map(|(kind, label)| {
        let values = match kind {
            FacetKind::Technique => registry.techniques(),
            FacetKind::Instrument => registry.instruments(),
        };
        (label, values)
    })
    .collect();

    match ctx.format(global, OutputFormat::Tsv) {
        OutputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = sections
                .into_iter()
                .map(|(label, values)| (label.to_string(), serde_json::json!(values)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&map).into_diagnostic()?);
        }
        OutputFormat::Id | OutputFormat::Csv => {
            for (_, values) in sections {
                for value in values {
                    println!("{}", value);
                }
            }
        }
        _ => {
            let single = sections.len() == 1;
            for (label, values) in sections {
                if !single && !global.quiet {
                    println!("{}", style(label.to_uppercase()).bold());
                }
                for value in values {
                    println!("{}", value);
                }
                if !single {
                    println!();
                }
            }
        }
    }

    Ok(())
}
