//! Integration tests for the chaiclone binary
//!
//! Each test runs the binary inside its own temporary directory, so the
//! settings document, config and logs never touch the real home directory.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::time::{Duration, Instant};

use serde_json::Value;
use tempfile::TempDir;

const FRIENDLY_CONVERSATIONAL: [&str; 3] = [
    "Привет! Как твои дела? (неформально)",
    "Отлично! Рад тебя видеть! (неформально)",
    "Как прошел твой день? (неформально)",
];

const PROFESSIONAL_FORMAL: [&str; 3] = [
    "Здравствуйте. Чем могу помочь? (формальный стиль)",
    "Понимаю вашу ситуацию. (формальный стиль)",
    "Готов оказать помощь. (формальный стиль)",
];

/// Helper to get the chaiclone binary path
fn chaiclone_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_chaiclone"))
}

/// A scratch directory with a config that disables the typing delay
fn workspace() -> TempDir {
    workspace_with_delay(0)
}

fn workspace_with_delay(delay_ms: u64) -> TempDir {
    let dir = TempDir::new().unwrap();
    let config = format!("chat:\n  typing_delay_ms: {}\n", delay_ms);
    fs::write(dir.path().join("chaiclone.yaml"), config).unwrap();
    dir
}

fn command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new(chaiclone_binary());
    cmd.current_dir(dir)
        .env("CHAICLONE_DIR", dir)
        .env_remove("CHAICLONE_CONFIG")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .args(args);
    cmd
}

/// Helper to run chaiclone in a workspace
fn run(dir: &Path, args: &[&str]) -> Output {
    command(dir, args).output().expect("Failed to execute chaiclone")
}

/// Helper to run chaiclone with piped stdin
fn run_with_input(dir: &Path, args: &[&str], input: &str) -> Output {
    let mut child = command(dir, args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn chaiclone");
    child.stdin.take().unwrap().write_all(input.as_bytes()).unwrap();
    child.wait_with_output().expect("Failed to wait for chaiclone")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn settings_file(dir: &Path) -> PathBuf {
    dir.join("chaiclone_config.json")
}

fn read_settings(dir: &Path) -> Value {
    let content = fs::read_to_string(settings_file(dir)).expect("settings file missing");
    serde_json::from_str(&content).expect("settings file is not JSON")
}

fn write_settings(dir: &Path, settings: &Value) {
    fs::write(settings_file(dir), serde_json::to_string_pretty(settings).unwrap()).unwrap();
}

#[test]
fn test_fresh_start_writes_defaults() {
    let dir = workspace();
    assert!(!settings_file(dir.path()).exists());

    let output = run(dir.path(), &["profile", "stats", "-o", "json"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stats: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(stats["level"], 1);
    assert_eq!(stats["xp"], 0);

    let settings = read_settings(dir.path());
    assert_eq!(settings["theme"], "dark");
    assert_eq!(settings["user_profile"]["level"], 1);
    assert_eq!(settings["user_profile"]["xp"], 0);
    assert_eq!(settings["ai_character"]["name"], "Ассистент");

    let raw = fs::read_to_string(settings_file(dir.path())).unwrap();
    assert!(raw.contains("Игрок"), "non-ASCII should be written literally");
}

#[test]
fn test_send_replies_and_counts_messages() {
    let dir = workspace();

    let output = run(dir.path(), &["send", "привет", "   ", "как дела?"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let out = stdout(&output);
    let replies = out
        .lines()
        .filter(|line| FRIENDLY_CONVERSATIONAL.iter().any(|r| line.contains(r)))
        .count();
    assert_eq!(replies, 2, "output was:\n{}", out);

    let settings = read_settings(dir.path());
    assert_eq!(settings["user_profile"]["messages_sent"], 2);
    let xp = settings["user_profile"]["xp"].as_i64().unwrap();
    assert!((10..=30).contains(&xp));
}

#[test]
fn test_character_change_affects_replies() {
    let dir = workspace();

    let output = run(
        dir.path(),
        &["character", "set", "--personality", "professional", "--style", "formal"],
    );
    assert!(output.status.success());

    let settings = read_settings(dir.path());
    assert_eq!(settings["ai_character"]["personality"], "профессиональный");
    assert_eq!(settings["ai_character"]["style"], "формальный");

    let out = stdout(&run(dir.path(), &["send", "помоги"]));
    assert!(PROFESSIONAL_FORMAL.iter().any(|r| out.contains(r)), "output was:\n{}", out);
}

#[test]
fn test_unknown_style_prefixes_name() {
    let dir = workspace();
    run(dir.path(), &["profile", "show"]);

    let mut settings = read_settings(dir.path());
    settings["ai_character"]["style"] = Value::from("минималистичный");
    settings["ai_character"]["personality"] = Value::from("загадочный");
    write_settings(dir.path(), &settings);

    let out = stdout(&run(dir.path(), &["send", "эй"]));
    assert!(out.contains("Ассистент: "), "output was:\n{}", out);

    // Unknown labels survive the save that follows the reply
    let settings = read_settings(dir.path());
    assert_eq!(settings["ai_character"]["style"], "минималистичный");
    assert_eq!(settings["ai_character"]["personality"], "загадочный");
}

#[test]
fn test_wrong_admin_password_denied() {
    let dir = workspace();
    run(dir.path(), &["profile", "show"]);
    let before = fs::read_to_string(settings_file(dir.path())).unwrap();

    let output = run(dir.path(), &["admin", "--password", "wrong", "boost"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Неверный пароль!"));

    let after = fs::read_to_string(settings_file(dir.path())).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_admin_boost_does_not_level_up() {
    let dir = workspace();
    run(dir.path(), &["profile", "show"]);

    let mut settings = read_settings(dir.path());
    settings["user_profile"]["level"] = Value::from(3);
    settings["user_profile"]["xp"] = Value::from(40);
    write_settings(dir.path(), &settings);

    let output = run(dir.path(), &["admin", "--password", "admin123", "boost"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let settings = read_settings(dir.path());
    assert_eq!(settings["user_profile"]["level"], 8);
    assert_eq!(settings["user_profile"]["xp"], 100);

    // The next delivered message completes the pending level-up
    run(dir.path(), &["send", "ещё"]);
    let settings = read_settings(dir.path());
    assert_eq!(settings["user_profile"]["level"], 9);
    assert_eq!(settings["user_profile"]["xp"], 0);
}

#[test]
fn test_admin_password_from_stdin() {
    let dir = workspace();

    let output = run_with_input(dir.path(), &["admin", "rename", "Нео"], "admin123\n");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout(&output).contains("Имя изменено на: Нео"));
    assert_eq!(read_settings(dir.path())["user_profile"]["name"], "Нео");
}

#[test]
fn test_admin_reset_actions() {
    let dir = workspace();
    run(dir.path(), &["send", "раз", "два", "три"]);

    let output = run(dir.path(), &["admin", "-p", "admin123", "reset-stats"]);
    assert!(output.status.success());
    assert_eq!(read_settings(dir.path())["user_profile"]["messages_sent"], 0);

    let output = run(dir.path(), &["admin", "-p", "admin123", "reset-progress"]);
    assert!(output.status.success());
    let settings = read_settings(dir.path());
    assert_eq!(settings["user_profile"]["level"], 1);
    assert_eq!(settings["user_profile"]["xp"], 0);
}

#[test]
fn test_admin_logs_report() {
    let dir = workspace();

    let output = run(dir.path(), &["admin", "-p", "admin123", "logs", "-o", "json"]);
    assert!(output.status.success());

    let report: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["app"], "Chai Clone");
    assert_eq!(report["user"], "Игрок");
    assert_eq!(report["theme"], "dark");
}

#[test]
fn test_theme_toggle() {
    let dir = workspace();

    assert!(run(dir.path(), &["theme"]).status.success());
    assert_eq!(read_settings(dir.path())["theme"], "light");

    assert!(run(dir.path(), &["admin", "-p", "admin123", "toggle-theme"]).status.success());
    assert_eq!(read_settings(dir.path())["theme"], "dark");
}

#[test]
fn test_interactive_chat_session() {
    let dir = workspace();

    let output = run_with_input(dir.path(), &["chat"], "\n   \nпривет\n/theme\n/profile\n/quit\nне дойдёт\n");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let out = stdout(&output);
    assert!(out.contains("Привет! Я твой ИИ-помощник."));
    assert!(out.contains("Тема изменена!"));
    assert!(out.contains("Уровень: 1"));

    let settings = read_settings(dir.path());
    assert_eq!(settings["user_profile"]["messages_sent"], 1);
    assert_eq!(settings["theme"], "light");
}

#[test]
fn test_interactive_replies_do_not_queue_delays() {
    let dir = workspace_with_delay(400);

    let started = Instant::now();
    let output = run_with_input(dir.path(), &["chat"], "раз\nдва\nтри\n");
    let elapsed = started.elapsed();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    // Three back-to-back delays would take at least 1200ms
    assert!(elapsed < Duration::from_millis(1100), "chat took {:?}", elapsed);

    let out = stdout(&output);
    let replies = out
        .lines()
        .filter(|line| FRIENDLY_CONVERSATIONAL.iter().any(|r| line.contains(r)))
        .count();
    assert_eq!(replies, 3, "output was:\n{}", out);
    assert_eq!(read_settings(dir.path())["user_profile"]["messages_sent"], 3);
}

#[test]
fn test_case_variant_labels_kept_verbatim() {
    let dir = workspace();
    run(dir.path(), &["profile", "show"]);

    let mut settings = read_settings(dir.path());
    settings["ai_character"]["name"] = Value::from("Бот");
    settings["ai_character"]["personality"] = Value::from("Веселый");
    settings["ai_character"]["style"] = Value::from("Формальный");
    write_settings(dir.path(), &settings);

    let out = stdout(&run(dir.path(), &["send", "привет"]));
    let friendly = ["Привет! Как твои дела?", "Отлично! Рад тебя видеть!", "Как прошел твой день?"];
    assert!(
        friendly.iter().any(|p| out.contains(&format!("Бот: {}", p))),
        "output was:\n{}",
        out
    );
    assert!(!out.contains("(формальный стиль)"));

    let settings = read_settings(dir.path());
    assert_eq!(settings["ai_character"]["personality"], "Веселый");
    assert_eq!(settings["ai_character"]["style"], "Формальный");
}

#[test]
fn test_unknown_keys_survive_save() {
    let dir = workspace();
    run(dir.path(), &["profile", "show"]);

    let mut settings = read_settings(dir.path());
    settings["schema_version"] = Value::from(3);
    settings["user_profile"]["badges"] = serde_json::json!(["первый"]);
    settings["cloud_services"]["openai"]["organization"] = Value::from("acme");
    write_settings(dir.path(), &settings);

    assert!(run(dir.path(), &["send", "привет"]).status.success());

    let settings = read_settings(dir.path());
    assert_eq!(settings["user_profile"]["messages_sent"], 1);
    assert_eq!(settings["schema_version"], 3);
    assert_eq!(settings["user_profile"]["badges"][0], "первый");
    assert_eq!(settings["cloud_services"]["openai"]["organization"], "acme");
}

#[test]
fn test_set_model_unknown_provider_prints_nothing() {
    let dir = workspace();

    let output = run(dir.path(), &["cloud", "set-model", "nonexistent", "gpt-4"]);
    assert!(!output.status.success());
    assert!(!stdout(&output).contains("model"), "stdout: {}", stdout(&output));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown cloud provider"));

    let output = run(dir.path(), &["cloud", "set-model", "openai", "gpt-4"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("gpt-4"));
    assert_eq!(read_settings(dir.path())["cloud_services"]["openai"]["model"], "gpt-4");
}

#[test]
fn test_cloud_provider_settings() {
    let dir = workspace();

    assert!(run(dir.path(), &["cloud", "set-key", "openai", "sk-test-9876"]).status.success());
    assert!(run(dir.path(), &["cloud", "enable", "openai"]).status.success());
    assert!(!run(dir.path(), &["cloud", "enable", "nonexistent"]).status.success());

    let settings = read_settings(dir.path());
    assert_eq!(settings["cloud_services"]["openai"]["enabled"], true);
    assert_eq!(settings["cloud_services"]["openai"]["api_key"], "sk-test-9876");

    let out = stdout(&run(dir.path(), &["cloud", "list", "-o", "json"]));
    let providers: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(providers[0]["name"], "openai");
    assert_eq!(providers[0]["api_key"], "********9876");
    assert!(!out.contains("sk-test"));
}

#[test]
fn test_malformed_settings_is_fatal() {
    let dir = workspace();
    fs::write(settings_file(dir.path()), "{ \"theme\": ").unwrap();

    let output = run(dir.path(), &["profile", "show"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to parse settings file"));

    // The broken file is left as it was
    assert_eq!(fs::read_to_string(settings_file(dir.path())).unwrap(), "{ \"theme\": ");
}

#[test]
fn test_settings_flag_overrides_path() {
    let dir = workspace();
    let custom = dir.path().join("profiles").join("alt.json");

    let output = run(dir.path(), &["--settings", custom.to_str().unwrap(), "theme"]);
    assert!(output.status.success());
    assert!(custom.exists());
    assert!(!settings_file(dir.path()).exists());
}
