//! `oreg config` command - Configuration inspection

use clap::Subcommand;
use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::core::config::LOCAL_CONFIG_FILE;
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration values
    Show(ShowArgs),

    /// Show paths to configuration files
    Path,

    /// List all available configuration keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,
}

/// Valid configuration keys
const VALID_KEYS: &[(&str, &str)] = &[
    ("registry", "Path to the registry JSON file"),
    ("export_file", "File name written by `oreg export`"),
    (
        "default_format",
        "Default output format (tsv, json, csv, md, id)",
    ),
];

/// Run a config subcommand
pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args, global),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Keys => run_keys(),
    }
}

fn effective(global: &GlobalOpts) -> Config {
    let mut config = Config::load();
    if let Some(path) = &global.registry {
        config.registry = Some(path.clone());
    }
    config
}

fn get_config_value(config: &Config, key: &str) -> Option<String> {
    match key {
        "registry" => Some(config.registry_path().display().to_string()),
        "export_file" => Some(config.export_file()),
        "default_format" => config.default_format.clone(),
        _ => None,
    }
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let config = effective(global);

    if let Some(key) = &args.key {
        if !VALID_KEYS.iter().any(|(k, _)| *k == key.as_str()) {
            return Err(miette::miette!("Unknown configuration key '{}'", key));
        }
        let value = get_config_value(&config, key)
            .ok_or_else(|| miette::miette!("Key '{}' is not set", key))?;
        println!("{}", value);
        return Ok(());
    }

    if !global.quiet {
        println!("{}", style("Effective Configuration").bold().underlined());
        println!();
    }
    for (key, _) in VALID_KEYS {
        let value = get_config_value(&config, key);
        println!(
            "  {}: {}",
            style(key).cyan(),
            value.as_deref().unwrap_or("(not set)")
        );
    }

    if !global.quiet {
        println!();
        println!("{}", style("Config Sources (in priority order):").dim());
        println!("  1. Command line (--registry)");
        println!("  2. Environment variables (OREG_REGISTRY, OREG_EXPORT_FILE)");
        println!("  3. Local config ({})", LOCAL_CONFIG_FILE);
        println!("  4. Global config (~/.config/oreg/config.yaml)");
    }

    Ok(())
}

fn run_path() -> Result<()> {
    let local = std::env::current_dir()
        .map(|d| d.join(LOCAL_CONFIG_FILE))
        .unwrap_or_else(|_| PathBuf::from(LOCAL_CONFIG_FILE));
    print_path("Local", Some(local));
    print_path("Global", Config::global_config_path());
    Ok(())
}

fn print_path(label: &str, path: Option<PathBuf>) {
    match path {
        Some(p) => {
            let marker = if p.exists() {
                style("(exists)").green()
            } else {
                style("(missing)").dim()
            };
            println!("{}: {} {}", style(label).bold(), p.display(), marker);
        }
        None => println!("{}: {}", style(label).bold(), style("unavailable").dim()),
    }
}

fn run_keys() -> Result<()> {
    for (key, description) in VALID_KEYS {
        println!("{:<16} {}", style(key).cyan(), description);
    }
    Ok(())
}
