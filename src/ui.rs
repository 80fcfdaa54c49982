//! Terminal rendering
//!
//! Message bubbles, notices and the profile card, coloured by the active theme.

use colored::*;
use terminal_size::{Width, terminal_size};

use crate::chat::{Author, ChatMessage};
use crate::profile::XP_THRESHOLD;
use crate::settings::{Profile, Theme};

/// Colours for one theme
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    theme: Theme,
}

impl Palette {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn heading(&self, s: &str) -> ColoredString {
        match self.theme {
            Theme::Dark => s.bright_magenta().bold(),
            Theme::Light => s.magenta().bold(),
        }
    }

    pub fn user(&self, s: &str) -> ColoredString {
        match self.theme {
            Theme::Dark => s.bright_cyan(),
            Theme::Light => s.blue(),
        }
    }

    pub fn assistant(&self, s: &str) -> ColoredString {
        match self.theme {
            Theme::Dark => s.bright_white(),
            Theme::Light => s.black(),
        }
    }

    pub fn notice(&self, s: &str) -> ColoredString {
        match self.theme {
            Theme::Dark => s.bright_yellow().bold(),
            Theme::Light => s.yellow().bold(),
        }
    }

    pub fn muted(&self, s: &str) -> ColoredString {
        s.dimmed()
    }
}

/// Get terminal width, defaulting to 80 if not available
fn get_terminal_width() -> usize {
    terminal_size().map(|(Width(w), _)| w as usize).unwrap_or(80)
}

/// Bubbles take 70% of the terminal
pub fn bubble_width() -> usize {
    (get_terminal_width() * 7 / 10).max(20)
}

/// Wrap text to max_width, returning lines
pub fn wrap_text(s: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![s.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_len = 0;

    for word in s.split_whitespace() {
        let word_len = word.chars().count();

        if current_len == 0 {
            current_line = word.to_string();
            current_len = word_len;
        } else if current_len + 1 + word_len <= max_width {
            current_line.push(' ');
            current_line.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current_line));
            current_line = word.to_string();
            current_len = word_len;
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// A chat bubble: avatar on the first line, continuation lines indented
pub fn render_message(palette: &Palette, message: &ChatMessage, width: usize) -> String {
    let (avatar, indent) = match message.author {
        Author::User => ("👤", ""),
        Author::Assistant => ("🤖", "  "),
    };
    let time = message.sent_at.format("%H:%M").to_string();

    wrap_text(&message.text, width)
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let body = match message.author {
                Author::User => palette.user(line),
                Author::Assistant => palette.assistant(line),
            };
            if i == 0 {
                format!("{}{} {} {}", indent, avatar, body, palette.muted(&time))
            } else {
                format!("{}   {}", indent, body)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Plain-text XP bar
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

/// Print a titled notice box
pub fn popup(palette: &Palette, title: &str, body: &str) {
    println!();
    println!("{}", palette.notice(&format!("┌─ {} ", title)));
    for line in body.lines() {
        println!("{} {}", palette.notice("│"), line);
    }
    println!("{}", palette.notice("└─"));
}

/// Lines of the profile card
pub fn profile_card(palette: &Palette, profile: &Profile) -> Vec<String> {
    vec![
        format!("👤 {}", palette.heading(&profile.name)),
        format!("   {}", palette.muted(&profile.status)),
        format!("   Уровень: {}", profile.level),
        format!("   Сообщений: {}", profile.messages_sent),
        format!(
            "   Прогресс: {} {}/{}",
            progress_bar(profile.progress(), 20),
            profile.xp,
            XP_THRESHOLD
        ),
    ]
}
