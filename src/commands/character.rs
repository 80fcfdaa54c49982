use colored::*;
use eyre::Result;

use crate::cli::{CharacterAction, OutputFormat};
use crate::settings::{Personality, SettingsStore, Style};
use crate::ui::Palette;

pub fn run(action: CharacterAction, store: &mut SettingsStore) -> Result<()> {
    match action {
        CharacterAction::Show { format } => show(OutputFormat::resolve(format), store),
        CharacterAction::Set {
            name,
            personality,
            style,
        } => set(name, personality, style, store),
    }
}

fn show(format: OutputFormat, store: &SettingsStore) -> Result<()> {
    let character = &store.document().character;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(character)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(character)?),
        OutputFormat::Text => {
            let palette = Palette::new(store.document().theme);
            println!("{}", palette.heading("⚙️ Персонаж ИИ:"));
            println!("  Имя: {}", character.name);
            println!("  Характер: {}", character.personality);
            println!("  Стиль: {}", character.style);
        }
    }

    Ok(())
}

fn set(
    name: Option<String>,
    personality: Option<String>,
    style: Option<String>,
    store: &mut SettingsStore,
) -> Result<()> {
    let personality = personality.map(|p| Personality::parse_input(&p));
    let style = style.map(|s| Style::parse_input(&s));

    if let Some(Personality::Other(label)) = &personality {
        println!(
            "{} Unknown personality '{}' (known: {}), replies will use the friendly phrases",
            "⚠".yellow(),
            label,
            known_labels(Personality::KNOWN.iter().map(Personality::label))
        );
    }
    if let Some(Style::Other(label)) = &style {
        println!(
            "{} Unknown style '{}' (known: {}), replies will be prefixed with the name",
            "⚠".yellow(),
            label,
            known_labels(Style::KNOWN.iter().map(Style::label))
        );
    }

    store.update(|doc| {
        if let Some(name) = name {
            doc.character.name = name;
        }
        if let Some(personality) = personality {
            doc.character.personality = personality;
        }
        if let Some(style) = style {
            doc.character.style = style;
        }
    })?;

    log::info!("Character updated: {:?}", store.document().character);
    println!("{} Настройки сохранены!", "✓".green());
    Ok(())
}

fn known_labels<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    labels.collect::<Vec<_>>().join(", ")
}
