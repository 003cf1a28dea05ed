use crate::screen::{Notice, Screen};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pacing knobs for the scripted animations and settle delays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacingConfig {
    pub scan_step: Duration,
    pub scan_settle: Duration,
    pub reveal_step: Duration,
    pub confirm_delay: Duration,
    pub unlock_delay: Duration,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            scan_step: Duration::from_millis(800),
            scan_settle: Duration::from_secs(1),
            reveal_step: Duration::from_secs(1),
            confirm_delay: Duration::from_secs(1),
            unlock_delay: Duration::from_secs(2),
        }
    }
}

impl PacingConfig {
    /// No waits at all (`--no-pacing`).
    pub fn instant() -> Self {
        Self {
            scan_step: Duration::ZERO,
            scan_settle: Duration::ZERO,
            reveal_step: Duration::ZERO,
            confirm_delay: Duration::ZERO,
            unlock_delay: Duration::ZERO,
        }
    }

    /// Delay between passing a gate and showing the next stage.
    pub fn settle_after(&self, left: Stage) -> Duration {
        match left {
            Stage::Challenge => self.confirm_delay,
            Stage::Riddle => self.unlock_delay,
            _ => Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub pacing: PacingConfig,
    pub seed: Option<u64>,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Stage {
    #[default]
    Landing,
    Challenge,
    Connectivity,
    Reveal,
    Riddle,
    Finale,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Landing,
        Stage::Challenge,
        Stage::Connectivity,
        Stage::Reveal,
        Stage::Riddle,
        Stage::Finale,
    ];

    pub fn index(self) -> u8 {
        match self {
            Stage::Landing => 0,
            Stage::Challenge => 1,
            Stage::Connectivity => 2,
            Stage::Reveal => 3,
            Stage::Riddle => 4,
            Stage::Finale => 5,
        }
    }

    /// The only way a stage ever changes. `None` at the terminal stage.
    pub fn next(self) -> Option<Stage> {
        Stage::ALL.get(usize::from(self.index()) + 1).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Landing => "landing",
            Stage::Challenge => "challenge",
            Stage::Connectivity => "connectivity",
            Stage::Reveal => "reveal",
            Stage::Riddle => "riddle",
            Stage::Finale => "finale",
        }
    }
}

/// Arithmetic check drawn once per session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Captcha {
    pub answer: u8,
    pub question: String,
}

impl Captcha {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let a: u8 = rng.gen_range(1..=10);
        let b: u8 = rng.gen_range(1..=10);
        Self {
            answer: a + b,
            question: format!("{a} + {b}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub stage: Stage,
    pub captcha: Option<Captcha>,
    pub server_checked: bool,
}

/// A numeric answer already clamped to the field's [0,100] range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guess(u8);

impl Guess {
    pub const MIN: i64 = 0;
    pub const MAX: i64 = 100;

    pub fn clamped(v: i64) -> Self {
        Self(v.clamp(Self::MIN, Self::MAX) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// Free text after trimming and lower-casing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiddleAnswer(String);

impl RiddleAnswer {
    pub fn normalize(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated user actions accepted by the stage controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Begin,
    Verify(Guess),
    Retrieve,
    Read,
    Answer(RiddleAnswer),
    Accept,
    Ponder,
}

/// Events emitted by the controller task and consumed by UI/CLI layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Full recomputed view of the current stage.
    Screen(Box<Screen>),
    /// Inline message attached to the screen currently shown.
    Feedback(Notice),
    Finished,
}
