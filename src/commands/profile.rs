use eyre::Result;
use serde::Serialize;

use crate::cli::{OutputFormat, ProfileAction};
use crate::profile::XP_THRESHOLD;
use crate::settings::SettingsStore;
use crate::ui::{self, Palette};

#[derive(Serialize)]
struct Stats<'a> {
    name: &'a str,
    level: u32,
    xp: i64,
    xp_threshold: i64,
    messages_sent: u64,
    chats_created: u64,
    status: &'a str,
}

pub fn run(action: ProfileAction, store: &SettingsStore) -> Result<()> {
    match action {
        ProfileAction::Show => show(store),
        ProfileAction::Stats { format } => stats(OutputFormat::resolve(format), store),
    }
}

fn show(store: &SettingsStore) -> Result<()> {
    let palette = Palette::new(store.document().theme);
    println!("{}", palette.heading("👤 Мой Профиль"));
    println!();
    for line in ui::profile_card(&palette, &store.document().profile) {
        println!("{}", line);
    }
    Ok(())
}

fn stats(format: OutputFormat, store: &SettingsStore) -> Result<()> {
    let profile = &store.document().profile;
    let stats = Stats {
        name: &profile.name,
        level: profile.level,
        xp: profile.xp,
        xp_threshold: XP_THRESHOLD,
        messages_sent: profile.messages_sent,
        chats_created: profile.chats_created,
        status: &profile.status,
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&stats)?),
        OutputFormat::Text => {
            let palette = Palette::new(store.document().theme);
            println!("{}", palette.heading("📊 Статистика:"));
            println!();
            println!("• Уровень: {}", stats.level);
            println!("• Опыт: {}/{}", stats.xp, stats.xp_threshold);
            println!("• Сообщений отправлено: {}", stats.messages_sent);
            println!("• Чатов создано: {}", stats.chats_created);
            println!("• Статус: {}", stats.status);
        }
    }

    Ok(())
}
