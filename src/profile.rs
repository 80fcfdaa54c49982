//! Profile progression
//!
//! Every delivered reply earns the player 5 to 15 XP. Reaching the threshold
//! bumps the level and resets XP to zero.

use rand::Rng;
use std::ops::RangeInclusive;

use crate::settings::Profile;

/// XP needed for the next level
pub const XP_THRESHOLD: i64 = 100;

/// XP granted per delivered message
pub const XP_GAIN: RangeInclusive<i64> = 5..=15;

/// Raised when a message pushes the player to a new level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub level: u32,
}

impl LevelUp {
    pub fn title(&self) -> &'static str {
        "Уровень повышен!"
    }

    pub fn message(&self) -> String {
        format!("Теперь у тебя {} уровень!", self.level)
    }
}

impl Profile {
    /// Count a delivered message with a random XP gain
    pub fn record_message(&mut self) -> Option<LevelUp> {
        let gain = rand::thread_rng().gen_range(XP_GAIN);
        self.record_message_with_gain(gain)
    }

    /// Count a delivered message with an explicit XP gain
    pub fn record_message_with_gain(&mut self, gain: i64) -> Option<LevelUp> {
        self.messages_sent += 1;
        self.xp = self.xp.saturating_add(gain);

        if self.xp >= XP_THRESHOLD {
            self.level = self.level.saturating_add(1);
            self.xp = 0;
            log::info!("Level up: {} reached level {}", self.name, self.level);
            return Some(LevelUp { level: self.level });
        }

        None
    }

    /// XP as a fraction of the threshold, clamped to [0, 1]
    pub fn progress(&self) -> f64 {
        (self.xp as f64 / XP_THRESHOLD as f64).clamp(0.0, 1.0)
    }
}
