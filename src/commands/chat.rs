//! Interactive chat and one-shot sends

use eyre::{Context, Result};
use std::io::{self, IsTerminal, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use crate::chat::{ChatSession, TYPING_INDICATOR};
use crate::config::Config;
use crate::settings::SettingsStore;
use crate::ui::{self, Palette};

const HELP: &str = "/theme - сменить тему\n/profile - профиль\n/quit - выход";

pub fn run(config: &Config, store: &mut SettingsStore) -> Result<()> {
    let mut session = ChatSession::new(Duration::from_millis(config.chat.typing_delay_ms));
    let width = ui::bubble_width();
    let interactive = io::stdout().is_terminal();

    let palette = Palette::new(store.document().theme);
    println!("{}", palette.heading("💬 Chai Clone"));
    println!("{}", palette.muted("/help - команды"));
    println!();

    if config.chat.welcome {
        let greeting = session.greet();
        println!("{}", ui::render_message(&palette, greeting, width));
    }

    let input = spawn_reader();
    let mut show_prompt = true;

    // Each reply keeps its own timer: input is read while earlier replies are still pending
    loop {
        if deliver_due(&mut session, store, width, interactive)? {
            show_prompt = true;
        }

        if show_prompt {
            print!("> ");
            io::stdout().flush()?;
            show_prompt = false;
        }

        let received = match session.next_due() {
            Some(due) => input.recv_timeout(due.saturating_duration_since(Instant::now())),
            None => input.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        let line = match received {
            Ok(line) => line.context("Failed to read input")?,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };
        show_prompt = true;

        match line.trim() {
            "/quit" | "/exit" => break,
            "/help" => {
                println!("{}", HELP);
                continue;
            }
            "/theme" => {
                let theme = store.update(|doc| {
                    doc.theme = doc.theme.toggled();
                    doc.theme
                })?;
                log::info!("Theme switched to {}", theme);
                ui::popup(&Palette::new(theme), "Тема", "Тема изменена!");
                continue;
            }
            "/profile" => {
                let palette = Palette::new(store.document().theme);
                for line in ui::profile_card(&palette, &store.document().profile) {
                    println!("{}", line);
                }
                continue;
            }
            _ => {}
        }

        let palette = Palette::new(store.document().theme);
        if let Some(message) = session.submit(&line, Instant::now()) {
            println!("{}", ui::render_message(&palette, message, width));
            if interactive {
                println!("{}", palette.muted(TYPING_INDICATOR));
            }
        }
    }

    // Replies already typed still arrive after /quit or end of input
    deliver_pending(&mut session, store, width)?;

    log::info!("Chat closed after {} messages", session.transcript().len());
    Ok(())
}

/// Read stdin on its own thread so pending replies can fire while waiting for input
fn spawn_reader() -> Receiver<io::Result<String>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lines() {
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Submit every message up front, then wait for the replies in order
pub fn send(messages: &[String], config: &Config, store: &mut SettingsStore) -> Result<()> {
    let mut session = ChatSession::new(Duration::from_millis(config.chat.typing_delay_ms));
    let width = ui::bubble_width();
    let palette = Palette::new(store.document().theme);

    let now = Instant::now();
    for text in messages {
        if let Some(message) = session.submit(text, now) {
            println!("{}", ui::render_message(&palette, message, width));
        }
    }

    deliver_pending(&mut session, store, width)
}

/// Sleep until each pending reply is due and print it
fn deliver_pending(session: &mut ChatSession, store: &mut SettingsStore, width: usize) -> Result<()> {
    let interactive = io::stdout().is_terminal();

    while let Some(due) = session.next_due() {
        if interactive {
            let palette = Palette::new(store.document().theme);
            print!("{}", palette.muted(TYPING_INDICATOR));
            io::stdout().flush()?;
        }

        let now = Instant::now();
        if due > now {
            thread::sleep(due - now);
        }

        deliver_due(session, store, width, interactive)?;
    }

    Ok(())
}

/// Print every reply that is due now. Returns whether anything was printed.
fn deliver_due(session: &mut ChatSession, store: &mut SettingsStore, width: usize, interactive: bool) -> Result<bool> {
    let deliveries = session.resolve_due(store, Instant::now())?;
    if deliveries.is_empty() {
        return Ok(false);
    }

    if interactive {
        // Clear the prompt or typing indicator line
        print!("\r\x1b[2K");
    }

    for delivery in deliveries {
        let palette = Palette::new(store.document().theme);
        println!("{}", ui::render_message(&palette, &delivery.reply, width));
        if let Some(level_up) = delivery.level_up {
            ui::popup(&palette, level_up.title(), &level_up.message());
        }
    }

    Ok(true)
}
