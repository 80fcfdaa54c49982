//! Admin panel
//!
//! Direct mutations of the settings document, unlocked by the shared admin
//! password. The operations bypass profile progression on purpose: a boost
//! leaves XP at the threshold without levelling up.

use chrono::{DateTime, Local};
use eyre::Result;
use serde::Serialize;

use crate::settings::{SettingsDocument, SettingsStore};

/// Application name shown in system reports
pub const APP_NAME: &str = "Chai Clone";

/// Levels granted by a boost
pub const BOOST_LEVELS: u32 = 5;

/// One admin operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAction {
    /// Zero the message and chat counters
    ResetStats,
    ToggleTheme,
    /// Replace the player name; no validation, empty is allowed
    Rename(String),
    /// Five extra levels and XP pinned at the threshold
    Boost,
    /// Back to level 1 with no XP
    ResetProgress,
}

impl AdminAction {
    /// Apply the operation to a document
    pub fn apply(&self, doc: &mut SettingsDocument) {
        match self {
            AdminAction::ResetStats => {
                doc.profile.messages_sent = 0;
                doc.profile.chats_created = 0;
            }
            AdminAction::ToggleTheme => doc.theme = doc.theme.toggled(),
            AdminAction::Rename(name) => doc.profile.name = name.clone(),
            AdminAction::Boost => {
                doc.profile.level = doc.profile.level.saturating_add(BOOST_LEVELS);
                doc.profile.xp = crate::profile::XP_THRESHOLD;
            }
            AdminAction::ResetProgress => {
                doc.profile.level = 1;
                doc.profile.xp = 0;
            }
        }
    }

    /// Title and body of the confirmation shown after the operation
    pub fn notice(&self) -> (&'static str, String) {
        match self {
            AdminAction::ResetStats => ("Успех", "Статистика сброшена!".to_string()),
            AdminAction::ToggleTheme => ("Тема", "Тема изменена!".to_string()),
            AdminAction::Rename(name) => ("Успех", format!("Имя изменено на: {}", name)),
            AdminAction::Boost => ("Буст!", "ИИ ускорен! Уровень повышен!".to_string()),
            AdminAction::ResetProgress => ("Сброс", "Прогресс сброшен!".to_string()),
        }
    }
}

/// Exact comparison against the stored admin password
pub fn verify_password(doc: &SettingsDocument, attempt: &str) -> Result<()> {
    if attempt != doc.admin.password {
        log::warn!("Admin access denied");
        eyre::bail!("Неверный пароль!");
    }
    Ok(())
}

/// An unlocked admin panel over the settings store
pub struct AdminSession<'a> {
    store: &'a mut SettingsStore,
}

impl<'a> AdminSession<'a> {
    /// Unlock the panel; fails without touching the document when the password is wrong
    pub fn unlock(store: &'a mut SettingsStore, password: &str) -> Result<Self> {
        verify_password(store.document(), password)?;
        log::info!("Admin access granted");
        Ok(Self { store })
    }

    /// Apply and persist an operation
    pub fn run(&mut self, action: &AdminAction) -> Result<()> {
        log::info!("Admin action: {:?}", action);
        self.store.update(|doc| action.apply(doc))
    }

    pub fn document(&self) -> &SettingsDocument {
        self.store.document()
    }

    pub fn system_report(&self, now: DateTime<Local>) -> SystemReport {
        SystemReport::new(self.store.document(), now)
    }
}

/// Read-only snapshot shown by the "system logs" panel
#[derive(Debug, Clone, Serialize)]
pub struct SystemReport {
    pub app: String,
    pub user: String,
    pub level: u32,
    pub messages: u64,
    pub theme: String,
    pub character: String,
    pub access_enabled: bool,
    pub status: String,
    pub time: String,
}

impl SystemReport {
    pub fn new(doc: &SettingsDocument, now: DateTime<Local>) -> Self {
        Self {
            app: APP_NAME.to_string(),
            user: doc.profile.name.clone(),
            level: doc.profile.level,
            messages: doc.profile.messages_sent,
            theme: doc.theme.to_string(),
            character: doc.character.name.clone(),
            access_enabled: doc.admin.access_enabled,
            status: "✅ Активно".to_string(),
            time: now.format("%H:%M:%S").to_string(),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("• Приложение: {}", self.app),
            format!("• Пользователь: {}", self.user),
            format!("• Уровень: {}", self.level),
            format!("• Сообщений: {}", self.messages),
            format!("• Тема: {}", self.theme),
            format!("• Персонаж ИИ: {}", self.character),
            format!("• Статус: {}", self.status),
            format!("• Время: {}", self.time),
        ]
    }
}
