use colored::*;
use eyre::Result;
use std::path::Path;

use crate::cli::{ConfigAction, OutputFormat};
use crate::config::Config;

pub fn run(action: ConfigAction, config: &Config, settings_path: &Path) -> Result<()> {
    match action {
        ConfigAction::Show { format } => show(OutputFormat::resolve(format), config, settings_path),
        ConfigAction::Path => path(settings_path),
    }
}

fn show(format: OutputFormat, config: &Config, settings_path: &Path) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(config)?);
        }
        OutputFormat::Text => {
            println!("{}", "Chai Clone Configuration".bold());
            println!();

            println!("{}:", "paths".cyan());
            println!("  settings: {}", settings_path.display());
            println!();

            println!("{}:", "chat".cyan());
            println!("  typing_delay_ms: {}", config.chat.typing_delay_ms);
            println!("  welcome: {}", config.chat.welcome);
            println!();

            println!("{}: {}", "log_level".cyan(), config.log_level.as_filter());
        }
    }

    Ok(())
}

fn path(settings_path: &Path) -> Result<()> {
    println!("config:   {}", Config::app_dir().join("chaiclone.yaml").display());
    println!("settings: {}", settings_path.display());
    println!("logs:     {}", Config::log_dir().join("chaiclone.log").display());
    Ok(())
}
