//! Cloud provider slots
//!
//! These values are stored for a future integration; reply generation never reads them.

use colored::*;
use eyre::{Result, eyre};
use serde::Serialize;

use crate::cli::{CloudAction, OutputFormat};
use crate::settings::{CloudService, SettingsStore};

#[derive(Serialize)]
struct ProviderView<'a> {
    name: &'a str,
    enabled: bool,
    model: Option<&'a str>,
    endpoint: Option<&'a str>,
    api_key: String,
}

pub fn run(action: CloudAction, store: &mut SettingsStore) -> Result<()> {
    match action {
        CloudAction::List { format } => list(OutputFormat::resolve(format), store),
        CloudAction::Enable { provider } => {
            modify(&provider, store, |service| service.enabled = true)?;
            println!("{} {} enabled", "✓".green(), provider.cyan());
            Ok(())
        }
        CloudAction::Disable { provider } => {
            modify(&provider, store, |service| service.enabled = false)?;
            println!("{} {} disabled", "✓".green(), provider.cyan());
            Ok(())
        }
        CloudAction::SetKey { provider, key } => {
            modify(&provider, store, |service| service.api_key = key)?;
            println!("{} API key saved for {}", "✓".green(), provider.cyan());
            Ok(())
        }
        CloudAction::SetModel { provider, model } => {
            modify(&provider, store, |service| service.model = Some(model.clone()))?;
            println!("{} Set {} model = {}", "✓".green(), provider.cyan(), model.green());
            Ok(())
        }
    }
}

fn list(format: OutputFormat, store: &SettingsStore) -> Result<()> {
    let providers: Vec<ProviderView> = store
        .document()
        .cloud_services
        .iter()
        .map(|(name, service)| ProviderView {
            name,
            enabled: service.enabled,
            model: service.model.as_deref(),
            endpoint: service.endpoint.as_deref(),
            api_key: service.masked_key(),
        })
        .collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&providers)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&providers)?),
        OutputFormat::Text => {
            println!("{}", "Облачные сервисы:".bold());
            println!();
            for p in &providers {
                let mark = if p.enabled { "✓".green() } else { "·".dimmed() };
                let detail = p.model.or(p.endpoint).unwrap_or("");
                let key = if p.api_key.is_empty() {
                    "(no key)".dimmed().to_string()
                } else {
                    p.api_key.clone()
                };
                println!("  {} {:12} {:20} {}", mark, p.name.cyan(), detail, key);
            }
        }
    }

    Ok(())
}

fn modify(provider: &str, store: &mut SettingsStore, change: impl FnOnce(&mut CloudService)) -> Result<()> {
    if !store.document().cloud_services.contains_key(provider) {
        return Err(eyre!("Unknown cloud provider: {}", provider));
    }

    store.update(|doc| {
        if let Some(service) = doc.cloud_services.get_mut(provider) {
            change(service);
        }
    })?;

    log::info!("Cloud provider {} updated", provider);
    Ok(())
}
