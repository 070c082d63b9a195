#![warn(clippy::all, clippy::pedantic)]

// Playfield geometry (logical units, mapped to terminal cells by the UI)
pub const LANE_COUNT: usize = 3;
pub const SPAWN_Y: f32 = -50.0; // items start above the visible playfield
pub const CATCH_BAND_START: f32 = 420.0; // catch window lower bound (exclusive)
pub const CATCH_BAND_END: f32 = 480.0; // catch window upper bound (exclusive)
pub const OFF_SCREEN_Y: f32 = 500.0; // past this an uncaught item counts as a miss

// Falling speed (logical units per tick)
pub const BASE_SPEED: f32 = 1.0;
pub const SPEED_PER_LEVEL: f32 = 0.5;

// Session timing
pub const SESSION_SECONDS: u32 = 15;

// Scoring and difficulty
pub const POINTS_PER_LEVEL: u32 = 1000;
pub const SPAWN_CADENCE_START: u32 = 60; // ticks between spawns at session start
pub const SPAWN_CADENCE_STEP: u32 = 5;
pub const MIN_SPAWN_CADENCE: u32 = 20;

// Reaction message display time, in sim ticks (~0.5s at 60 Hz)
pub const REACTION_DISPLAY_TICKS: u32 = 30;

/// Ticks between spawns for a given level: `max(20, 60 - level * 5)`.
///
/// Strictly decreasing with level until it hits the floor at level 8.
#[must_use]
pub fn spawn_cadence_for_level(level: u32) -> u32 {
    SPAWN_CADENCE_START
        .saturating_sub(level.saturating_mul(SPAWN_CADENCE_STEP))
        .max(MIN_SPAWN_CADENCE)
}

/// Descent speed for an item spawned at the given level.
///
/// Fixed at spawn time; later level changes do not retroactively change
/// items already in flight.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn item_speed_for_level(level: u32) -> f32 {
    BASE_SPEED + level as f32 * SPEED_PER_LEVEL
}
