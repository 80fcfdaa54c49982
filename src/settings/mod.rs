//! Settings document
//!
//! The single JSON record holding all persisted application state: theme,
//! assistant character, cloud provider slots, the player profile and the
//! admin gate. Keys and enum labels match the files the app has always
//! written, so existing documents load unchanged. Keys this version does not
//! know about are carried along in `extra` and written back on save.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

pub mod store;

pub use store::SettingsStore;

/// Colour theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Dark => write!(f, "dark"),
            Theme::Light => write!(f, "light"),
        }
    }
}

/// Response tone of the assistant.
///
/// Labels that are not recognised are kept in `Other` so they survive a
/// load/save cycle untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Personality {
    #[default]
    Friendly,
    Professional,
    Playful,
    Caring,
    Other(String),
}

impl Personality {
    pub const KNOWN: [Personality; 4] = [
        Personality::Friendly,
        Personality::Professional,
        Personality::Playful,
        Personality::Caring,
    ];

    /// Label as stored in the settings document
    pub fn label(&self) -> &str {
        match self {
            Personality::Friendly => "дружелюбный",
            Personality::Professional => "профессиональный",
            Personality::Playful => "веселый",
            Personality::Caring => "заботливый",
            Personality::Other(label) => label,
        }
    }

    /// Parse a stored label or its English name; anything else is kept as-is
    pub fn parse(s: &str) -> Self {
        match s {
            "дружелюбный" | "friendly" => Personality::Friendly,
            "профессиональный" | "professional" => Personality::Professional,
            "веселый" | "playful" => Personality::Playful,
            "заботливый" | "caring" => Personality::Caring,
            _ => Personality::Other(s.to_string()),
        }
    }

    /// Lenient parse for typed input: ignores case and surrounding whitespace
    pub fn parse_input(s: &str) -> Self {
        match Self::parse(&s.trim().to_lowercase()) {
            Personality::Other(_) => Personality::Other(s.to_string()),
            known => known,
        }
    }
}

impl From<String> for Personality {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<Personality> for String {
    fn from(p: Personality) -> Self {
        match p {
            Personality::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decoration applied to a reply after the phrase is picked
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Style {
    #[default]
    Conversational,
    Formal,
    Creative,
    Other(String),
}

impl Style {
    pub const KNOWN: [Style; 3] = [Style::Conversational, Style::Formal, Style::Creative];

    pub fn label(&self) -> &str {
        match self {
            Style::Conversational => "разговорный",
            Style::Formal => "формальный",
            Style::Creative => "креативный",
            Style::Other(label) => label,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "разговорный" | "conversational" => Style::Conversational,
            "формальный" | "formal" => Style::Formal,
            "креативный" | "creative" => Style::Creative,
            _ => Style::Other(s.to_string()),
        }
    }

    pub fn parse_input(s: &str) -> Self {
        match Self::parse(&s.trim().to_lowercase()) {
            Style::Other(_) => Style::Other(s.to_string()),
            known => known,
        }
    }
}

impl From<String> for Style {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<Style> for String {
    fn from(s: Style) -> Self {
        match s {
            Style::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The assistant persona
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Character {
    pub name: String,
    pub personality: Personality,
    pub style: Style,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Character {
    fn default() -> Self {
        Self {
            name: "Ассистент".to_string(),
            personality: Personality::Friendly,
            style: Style::Conversational,
            extra: Map::new(),
        }
    }
}

/// A cloud provider slot. Stored for later integration; nothing reads it
/// when generating replies.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudService {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    pub api_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CloudService {
    fn with_model(model: &str) -> Self {
        Self {
            model: Some(model.to_string()),
            ..Self::default()
        }
    }

    fn with_endpoint(endpoint: &str) -> Self {
        Self {
            endpoint: Some(endpoint.to_string()),
            ..Self::default()
        }
    }

    /// Credential with everything but the last four characters hidden
    pub fn masked_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.is_empty() {
            return String::new();
        }
        if chars.len() <= 4 {
            return "*".repeat(chars.len());
        }
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{}", "*".repeat(chars.len() - 4), tail)
    }
}

/// Player profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub level: u32,
    /// Intended to stay below the level threshold; admin overrides may push it past
    pub xp: i64,
    pub messages_sent: u64,
    pub chats_created: u64,
    pub avatar: String,
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Игрок".to_string(),
            level: 1,
            xp: 0,
            messages_sent: 0,
            chats_created: 0,
            avatar: "default".to_string(),
            status: "В сети".to_string(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminSettings {
    pub password: String,
    pub access_enabled: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            password: "admin123".to_string(),
            access_enabled: true,
            extra: Map::new(),
        }
    }
}

/// The whole persisted state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsDocument {
    pub theme: Theme,
    #[serde(rename = "ai_character")]
    pub character: Character,
    pub cloud_services: IndexMap<String, CloudService>,
    #[serde(rename = "user_profile")]
    pub profile: Profile,
    pub admin: AdminSettings,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for SettingsDocument {
    fn default() -> Self {
        let mut cloud_services = IndexMap::new();
        cloud_services.insert("openai".to_string(), CloudService::with_model("gpt-3.5-turbo"));
        cloud_services.insert("google_ai".to_string(), CloudService::with_model("gemini-pro"));
        cloud_services.insert("custom_api".to_string(), CloudService::with_endpoint(""));

        Self {
            theme: Theme::Dark,
            character: Character::default(),
            cloud_services,
            profile: Profile::default(),
            admin: AdminSettings::default(),
            extra: Map::new(),
        }
    }
}
