//! `oreg compare` command - Side-by-side cell comparison and deep dive

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::utils::{Context, FilterArgs};
use crate::cli::helpers::{format_temp, yes_no};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::DetailCard;

#[derive(clap::Args, Debug)]
pub struct CompareArgs {
    /// Cells to compare, by id or name (max 3; default: first match)
    pub cells: Vec<String>,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Hide the technique definitions
    #[arg(long)]
    pub no_definitions: bool,
}

pub fn run(args: CompareArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = Context::open(global)?;
    let view = ctx.session.apply(&args.filter.to_criteria());
    let cards = ctx.session.compare(&view, &args.cells)?;

    match ctx.format(global, OutputFormat::Tsv) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&cards).into_diagnostic()?);
        }
        OutputFormat::Id => {
            for card in &cards {
                println!("{}", card.id);
            }
        }
        OutputFormat::Md => {
            for card in &cards {
                print!("{}", render_markdown(card, !args.no_definitions));
            }
        }
        _ => {
            if cards.is_empty() {
                if !global.quiet {
                    println!("{}", style("No cells selected for comparison.").yellow());
                }
                return Ok(());
            }
            for card in &cards {
                print_card(card, !args.no_definitions);
            }
        }
    }

    Ok(())
}

fn print_card(card: &DetailCard, definitions: bool) {
    println!("{}", style("─".repeat(60)).dim());
    println!("{}", style(&card.name).yellow().bold());
    println!("{}: {}", style("ID").bold(), style(&card.id).cyan());
    println!("{}: {}", style("Type").bold(), card.kind);
    println!(
        "{}: {} ({})",
        style("Contact").bold(),
        card.contact,
        style(&card.mailto).dim()
    );

    println!();
    println!("{}", style("Key Specifications:").bold());
    println!("  {}: {}", style("Max Temp").dim(), format_temp(card.max_temp_c));
    println!(
        "  {}: {}",
        style("Pressure Control").dim(),
        yes_no(card.pressure_control)
    );
    println!(
        "  {}: {}",
        style("CAD Available").dim(),
        yes_no(card.cad_available)
    );

    if !card.techniques.is_empty() {
        println!();
        println!("{}", style("Supported Techniques:").bold());
        for note in &card.techniques {
            println!("  {} {}", style("•").cyan(), note.technique);
            if definitions {
                println!("    {}", style(&note.definition).dim());
            }
        }
    }

    println!();
    println!("{}", style("The 3Rs Profile:").bold());
    let r3 = &card.limitations_3r;
    for (label, items, color) in [
        ("Reliability", &r3.reliability, console::Color::Red),
        ("Representativeness", &r3.representativeness, console::Color::Yellow),
        ("Reproducibility", &r3.reproducibility, console::Color::Blue),
    ] {
        println!("  {}", style(label).fg(color).bold());
        for item in items {
            println!("    - {}", item);
        }
    }
    println!();
}

fn render_markdown(card: &DetailCard, definitions: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("### {}\n\n", card.name));
    out.push_str(&format!("Type: {}\n\n", card.kind));
    out.push_str(&format!("Contact: [{}]({})\n\n", card.contact, card.mailto));
    out.push_str("**Key Specifications**\n\n");
    out.push_str(&format!("- Max Temp: {}\n", format_temp(card.max_temp_c)));
    out.push_str(&format!(
        "- Pressure Control: {}\n",
        yes_no(card.pressure_control)
    ));
    out.push_str(&format!("- CAD Available: {}\n\n", yes_no(card.cad_available)));

    if !card.techniques.is_empty() {
        out.push_str("**Supported Techniques**\n\n");
        for note in &card.techniques {
            if definitions {
                out.push_str(&format!("- **{}**: {}\n", note.technique, note.definition));
            } else {
                out.push_str(&format!("- {}\n", note.technique));
            }
        }
        out.push('\n');
    }

    out.push_str("#### The 3Rs Profile\n\n");
    let r3 = &card.limitations_3r;
    for (label, items) in [
        ("Reliability", &r3.reliability),
        ("Representativeness", &r3.representativeness),
        ("Reproducibility", &r3.reproducibility),
    ] {
        out.push_str(&format!("**{}**\n\n", label));
        for item in items {
            out.push_str(&format!("- {}\n", item));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Glossary;
    use crate::entities::HardwareRecord;

    fn card() -> DetailCard {
        let record: HardwareRecord = serde_json::from_str(
            r#"{"id": "A", "name": "Cell A", "type": "Coin",
                "compatibility": {"techniques": ["SANS"]},
                "specifications": {"operating_limits": {"max_temp_c": 120, "pressure_control": true}},
                "limitations_3r": {"reproducibility": ["Manual assembly"]}}"#,
        )
        .unwrap();
        DetailCard::new(&record, &Glossary::builtin())
    }

    #[test]
    fn test_markdown_card() {
        let md = render_markdown(&card(), true);
        assert!(md.starts_with("### Cell A\n"));
        assert!(md.contains("- Max Temp: 120°C"));
        assert!(md.contains("- Pressure Control: Yes"));
        assert!(md.contains("- CAD Available: No"));
        assert!(md.contains("- **SANS**: Small Angle Neutron Scattering."));
        assert!(md.contains("[N/A](mailto:N/A)"));
        assert!(md.contains("- Manual assembly"));
    }

    #[test]
    fn test_markdown_card_without_definitions() {
        let md = render_markdown(&card(), false);
        assert!(md.contains("- SANS\n"));
        assert!(!md.contains("Small Angle"));
    }
}
