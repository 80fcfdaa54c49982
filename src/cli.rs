use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

impl OutputFormat {
    /// Resolve the effective output format.
    /// If user specified a format, use it.
    /// Otherwise: TTY → Text, non-TTY (pipe) → Json
    pub fn resolve(user_choice: Option<OutputFormat>) -> OutputFormat {
        match user_choice {
            Some(fmt) => fmt,
            None => {
                if std::io::stdout().is_terminal() {
                    OutputFormat::Text
                } else {
                    OutputFormat::Json
                }
            }
        }
    }
}

#[derive(Parser)]
#[command(
    name = "chaiclone",
    about = "Chat with a canned-response AI companion, level up your profile",
    version,
    after_help = "Logs are written to: ~/.local/share/chaiclone/logs/chaiclone.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to chaiclone.yaml config file")]
    pub config: Option<PathBuf>,

    /// Path to the settings document
    #[arg(short, long, global = true, help = "Path to the JSON settings document")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open an interactive chat
    Chat,

    /// Send messages and wait for the replies
    Send {
        /// Messages, answered in order
        #[arg(required = true)]
        messages: Vec<String>,
    },

    /// Show the player profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// View or change the assistant character
    Character {
        #[command(subcommand)]
        action: CharacterAction,
    },

    /// Manage cloud provider slots
    Cloud {
        #[command(subcommand)]
        action: CloudAction,
    },

    /// Toggle between dark and light theme
    Theme,

    /// Password-protected admin operations
    Admin {
        /// Admin password (prompted on stdin when omitted)
        #[arg(long, short = 'p')]
        password: Option<String>,

        #[command(subcommand)]
        action: AdminCommand,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the profile card
    Show,

    /// Show detailed statistics
    Stats {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },
}

#[derive(Subcommand)]
pub enum CharacterAction {
    /// Show the current character
    Show {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Change name, personality or style
    Set {
        /// Display name
        #[arg(long)]
        name: Option<String>,

        /// friendly, professional, playful or caring
        #[arg(long)]
        personality: Option<String>,

        /// conversational, formal or creative
        #[arg(long)]
        style: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum CloudAction {
    /// List provider slots
    List {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Enable a provider
    Enable {
        /// Provider name
        provider: String,
    },

    /// Disable a provider
    Disable {
        /// Provider name
        provider: String,
    },

    /// Store a provider API key
    SetKey {
        /// Provider name
        provider: String,

        /// API key
        key: String,
    },

    /// Set the model a provider would use
    SetModel {
        /// Provider name
        provider: String,

        /// Model identifier
        model: String,
    },
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Reset message and chat counters
    ResetStats,

    /// Toggle the theme
    ToggleTheme,

    /// Change the player name
    Rename {
        /// New name (may be empty)
        name: String,
    },

    /// Add five levels
    Boost,

    /// Reset level and XP
    ResetProgress,

    /// Show the system report
    Logs {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Print where config, settings and logs live
    Path,
}
