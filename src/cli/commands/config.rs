//! `propdesk config` command - Configuration inspection

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::core::workspace::Workspace;
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration values
    Show(ShowArgs),

    /// Show paths to configuration files
    Path,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,
}

/// Valid configuration keys
const VALID_KEYS: &[&str] = &["author", "max_rows", "csv_mode", "preview_rows", "agents"];

pub fn run(cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args),
        ConfigCommands::Path => run_path(),
    }
}

fn run_show(args: ShowArgs) -> Result<()> {
    let workspace = Workspace::discover().ok();
    let config = Config::load(workspace.as_ref());

    if let Some(key) = &args.key {
        let value = get_config_value(&config, key).ok_or_else(|| {
            miette::miette!(
                "Unknown key '{}'. Valid keys: {}",
                key,
                VALID_KEYS.join(", ")
            )
        })?;
        println!("{}", value);
        return Ok(());
    }

    println!("{}", style("Effective Configuration").bold().underlined());
    println!();
    for key in VALID_KEYS {
        let value = get_config_value(&config, key).unwrap_or_default();
        println!("  {:<14} {}", style(key).cyan(), value);
    }

    println!();
    println!("{}", style("Config Sources (in priority order):").dim());
    println!("  {}", style("1. PROPDESK_* environment variables").dim());
    if let Some(ws) = &workspace {
        println!(
            "  {}",
            style(format!("2. {}", ws.config_dir().join("config.yaml").display())).dim()
        );
    }
    if let Some(path) = Config::global_config_path() {
        println!("  {}", style(format!("3. {}", path.display())).dim());
    }
    Ok(())
}

fn run_path() -> Result<()> {
    if let Some(path) = Config::global_config_path() {
        println!("global:    {}", path.display());
    }
    match Workspace::discover() {
        Ok(ws) => println!("workspace: {}", ws.config_dir().join("config.yaml").display()),
        Err(_) => println!("workspace: {}", style("(not in a workspace)").dim()),
    }
    Ok(())
}

fn get_config_value(config: &Config, key: &str) -> Option<String> {
    match key {
        "author" => Some(config.author()),
        "max_rows" => Some(config.max_rows().to_string()),
        "csv_mode" => Some(
            match config.csv_mode() {
                crate::import::CsvMode::Naive => "naive",
                crate::import::CsvMode::Rfc4180 => "rfc4180",
            }
            .to_string(),
        ),
        "preview_rows" => Some(config.preview_rows().to_string()),
        "agents" => Some(config.agents().join(", ")),
        _ => None,
    }
}
