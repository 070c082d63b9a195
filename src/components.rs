#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow sign loss / truncation when clamping the score back to u32: the
    // value is floored at zero before the cast
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation
)]

use bevy_ecs::prelude::*;

use crate::catalog::ItemKind;
use crate::game::{
    POINTS_PER_LEVEL, REACTION_DISPLAY_TICKS, SESSION_SECONDS, SPAWN_CADENCE_START,
};

/// One of the three discrete horizontal positions shared by falling items
/// and the catcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    Left,
    Center,
    Right,
}

impl Lane {
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Lane::Left => 0,
            Lane::Center => 1,
            Lane::Right => 2,
        }
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Lane::Left),
            1 => Some(Lane::Center),
            2 => Some(Lane::Right),
            _ => None,
        }
    }

    /// Uniform random lane from the injected PRNG.
    #[must_use]
    pub fn draw(rng: &mut fastrand::Rng) -> Self {
        Self::from_index(rng.usize(0..crate::game::LANE_COUNT)).unwrap_or(Lane::Center)
    }
}

/// A live falling item. Spawned by the spawner, despawned on catch or when
/// it leaves the playfield; the position is only mutated by the physics step.
#[derive(Component, Debug, Clone, Copy)]
pub struct FallingItem {
    pub y: f32,
    pub lane: Lane,
    /// Per-tick descent distance, fixed from the level at spawn time.
    pub speed: f32,
    pub kind: ItemKind,
}

/// The player-controlled catcher. Only accepted input commands move it.
#[derive(Resource, Debug, Clone, Copy)]
pub struct Catcher {
    pub lane: Lane,
}

impl Default for Catcher {
    fn default() -> Self {
        Self { lane: Lane::Center }
    }
}

/// Mutable per-session state: score, derived difficulty, countdown, and the
/// tick counter that paces spawning.
#[derive(Resource, Debug, Clone)]
pub struct SessionState {
    pub score: u32,
    pub level: u32,
    pub time_remaining: u32,
    pub active: bool,
    pub spawn_cadence: u32,
    pub tick_count: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            time_remaining: SESSION_SECONDS,
            active: false,
            spawn_cadence: SPAWN_CADENCE_START,
            tick_count: 0,
        }
    }
}

impl SessionState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Applies a catch's score delta, clamped at a floor of zero. A penalty
    /// can never drive the score negative.
    pub fn apply_score(&mut self, kind: ItemKind) {
        let raw = i64::from(self.score) + i64::from(kind.score_delta());
        self.score = raw.max(0) as u32;
    }

    /// Level derived purely from the current score: `score / 1000 + 1`.
    ///
    /// Recomputed fresh every tick, so a penalty that drops the score below
    /// a threshold demotes the level. That is intentional: difficulty eases
    /// back off after a costly mistake.
    #[must_use]
    pub fn level_for_score(&self) -> u32 {
        self.score / POINTS_PER_LEVEL + 1
    }
}

/// Polarity of a reaction message: catching food is good, catching a
/// penalty item is bad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionPolarity {
    Good,
    Bad,
}

/// A short-lived on-screen reaction to a catch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionEvent {
    pub text: &'static str,
    pub polarity: ReactionPolarity,
}

impl ReactionEvent {
    #[must_use]
    pub fn good() -> Self {
        Self {
            text: "Yum!",
            polarity: ReactionPolarity::Good,
        }
    }

    #[must_use]
    pub fn bad() -> Self {
        Self {
            text: "Yuck!",
            polarity: ReactionPolarity::Bad,
        }
    }

    #[must_use]
    pub fn for_kind(kind: ItemKind) -> Self {
        if kind.is_penalty() {
            Self::bad()
        } else {
            Self::good()
        }
    }
}

/// The reaction display slot. Each catch overwrites the slot and re-arms the
/// display deadline; the deadline is counted down in sim ticks by the
/// scheduler rather than by a cancel-and-restart wall-clock timer, so
/// overlapping catches can never race the auto-clear.
#[derive(Resource, Debug, Clone, Default)]
pub struct Reaction {
    pub event: Option<ReactionEvent>,
    pub ticks_left: u32,
}

impl Reaction {
    pub fn trigger(&mut self, event: ReactionEvent) {
        self.event = Some(event);
        self.ticks_left = REACTION_DISPLAY_TICKS;
    }

    /// Counts the display deadline down one tick. Returns true on the tick
    /// the message expires and is cleared.
    pub fn tick(&mut self) -> bool {
        if self.event.is_none() {
            return false;
        }
        self.ticks_left = self.ticks_left.saturating_sub(1);
        if self.ticks_left == 0 {
            self.event = None;
            true
        } else {
            false
        }
    }
}

/// The session's random source. Injected so spawn and lane draws are
/// reproducible under a fixed seed.
#[derive(Resource, Debug, Clone)]
pub struct GameRng(pub fastrand::Rng);

impl GameRng {
    #[must_use]
    pub fn new() -> Self {
        Self(fastrand::Rng::new())
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new()
    }
}
