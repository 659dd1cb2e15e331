//! `oreg glossary` command - Technique dictionary
//!
//! The glossary is built in, so this command does not need a registry file.

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, Glossary};

#[derive(clap::Args, Debug)]
pub struct GlossaryArgs {
    /// Exact term to define (lists all terms when omitted)
    #[arg(conflicts_with = "partial")]
    pub term: Option<String>,

    /// Annotate a technique label using partial matching
    #[arg(long = "match", short = 'm', value_name = "LABEL")]
    pub partial: Option<String>,
}

pub fn run(args: GlossaryArgs, global: &GlobalOpts) -> Result<()> {
    let glossary = Glossary::builtin();
    let format = global
        .format
        .resolve(Config::load().default_format.as_deref(), OutputFormat::Tsv);

    if let Some(label) = &args.partial {
        let matched = glossary.partial_match(label);
        let definition = glossary.annotate(label);
        if format == OutputFormat::Json {
            let json = serde_json::json!({
                "technique": label,
                "matched_term": matched.map(|(k, _)| k),
                "definition": definition,
            });
            println!("{}", serde_json::to_string_pretty(&json).into_diagnostic()?);
        } else {
            if let Some((term, _)) = matched {
                if !global.quiet {
                    println!("{} {}", style(label).bold(), style(format!("({})", term)).dim());
                }
            }
            println!("{}", definition);
        }
        return Ok(());
    }

    if let Some(term) = &args.term {
        let definition = glossary
            .get(term)
            .ok_or_else(|| miette::miette!("No glossary entry for '{}'", term))?;
        if format == OutputFormat::Json {
            let json = serde_json::json!({ "term": term, "definition": definition });
            println!("{}", serde_json::to_string_pretty(&json).into_diagnostic()?);
        } else {
            println!("{}", definition);
        }
        return Ok(());
    }

    match format {
        OutputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = glossary
                .entries()
                .map(|(k, d)| (k.to_string(), serde_json::Value::String(d.to_string())))
                .collect();
            println!("{}", serde_json::to_string_pretty(&map).into_diagnostic()?);
        }
        OutputFormat::Md => {
            println!("| Term | Definition |");
            println!("|---|---|");
            for term in glossary.sorted_terms() {
                println!("| {} | {} |", term, glossary.get(term).unwrap_or_default());
            }
        }
        _ => {
            for term in glossary.sorted_terms() {
                println!("{}", term);
            }
        }
    }

    Ok(())
}
