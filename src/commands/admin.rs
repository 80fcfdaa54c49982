use chrono::Local;
use colored::*;
use eyre::{Context, Result};
use std::io::{self, BufRead, Write};

use crate::admin::{AdminAction, AdminSession};
use crate::cli::{AdminCommand, OutputFormat};
use crate::settings::SettingsStore;
use crate::ui::{self, Palette};

pub fn run(password: Option<String>, command: AdminCommand, store: &mut SettingsStore) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => prompt_password()?,
    };

    let mut session = AdminSession::unlock(store, &password)?;

    let action = match command {
        AdminCommand::ResetStats => AdminAction::ResetStats,
        AdminCommand::ToggleTheme => AdminAction::ToggleTheme,
        AdminCommand::Rename { name } => AdminAction::Rename(name),
        AdminCommand::Boost => AdminAction::Boost,
        AdminCommand::ResetProgress => AdminAction::ResetProgress,
        AdminCommand::Logs { format } => return logs(OutputFormat::resolve(format), &session),
    };

    session.run(&action)?;

    let (title, body) = action.notice();
    println!("{} {}: {}", "✓".green(), title.bold(), body);
    Ok(())
}

fn logs(format: OutputFormat, session: &AdminSession) -> Result<()> {
    let report = session.system_report(Local::now());

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&report)?),
        OutputFormat::Text => {
            let palette = Palette::new(session.document().theme);
            ui::popup(&palette, "📊 Системные логи", &report.lines().join("\n"));
        }
    }

    Ok(())
}

/// Read the password from one line of stdin
fn prompt_password() -> Result<String> {
    eprint!("Введите пароль: ");
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).context("Failed to read password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
