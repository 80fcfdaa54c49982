//! Canned reply generation
//!
//! Replies come from a fixed phrase table keyed by personality. The user's
//! message is not inspected: every reply is a random phrase from the
//! character's list, decorated according to its style.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::settings::{Character, Personality, Style};

const FRIENDLY: [&str; 3] = ["Привет! Как твои дела?", "Отлично! Рад тебя видеть!", "Как прошел твой день?"];

const PROFESSIONAL: [&str; 3] = [
    "Здравствуйте. Чем могу помочь?",
    "Понимаю вашу ситуацию.",
    "Готов оказать помощь.",
];

const PLAYFUL: [&str; 3] = ["Йоу! Как сам? 😎", "Опа, новое сообщение! 🎉", "Хей! Давай пообщаемся! 🚀"];

const CARING: [&str; 3] = [
    "Привет, дорогой! Как ты себя чувствуешь?",
    "Все будет хорошо, я с тобой 💖",
    "Береги себя!",
];

/// Phrases a personality draws from
pub fn candidates(personality: &Personality) -> &'static [&'static str; 3] {
    match personality {
        Personality::Professional => &PROFESSIONAL,
        Personality::Playful => &PLAYFUL,
        Personality::Caring => &CARING,
        // Unrecognised personalities talk like the friendly one
        Personality::Friendly | Personality::Other(_) => &FRIENDLY,
    }
}

/// Decorate a picked phrase according to the character's style
pub fn apply_style(base: &str, character: &Character) -> String {
    match &character.style {
        Style::Formal => format!("{} (формальный стиль)", base),
        Style::Conversational => format!("{} (неформально)", base),
        Style::Creative => format!("🎨 {} 🎭", base),
        Style::Other(_) => format!("{}: {}", character.name, base),
    }
}

/// Produce a reply for `character`
pub fn respond(message: &str, character: &Character) -> String {
    respond_with(&mut rand::thread_rng(), message, character)
}

/// Same as [`respond`] with a caller-supplied random source
pub fn respond_with<R: Rng + ?Sized>(rng: &mut R, _message: &str, character: &Character) -> String {
    let phrases = candidates(&character.personality);
    let base = phrases.choose(rng).copied().unwrap_or(phrases[0]);
    apply_style(base, character)
}
