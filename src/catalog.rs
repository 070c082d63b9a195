#![warn(clippy::all, clippy::pedantic)]

//! The fixed table of item kinds and their weighted random draw.

/// One of the four item kinds that can fall through the lanes.
///
/// The set is fixed for a session: three vegetables worth points and one
/// penalty item that costs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Carrot,
    Cucumber,
    Tomato,
    Pancake,
}

/// Sum of all spawn weights (4 + 3 + 2 + 2).
pub const WEIGHT_TOTAL: u32 = 11;

impl ItemKind {
    pub const ALL: [ItemKind; 4] = [
        ItemKind::Carrot,
        ItemKind::Cucumber,
        ItemKind::Tomato,
        ItemKind::Pancake,
    ];

    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            ItemKind::Carrot => "🥕",
            ItemKind::Cucumber => "🥒",
            ItemKind::Tomato => "🍅",
            ItemKind::Pancake => "🥞",
        }
    }

    /// Signed score change applied when this kind is caught.
    #[must_use]
    pub fn score_delta(self) -> i32 {
        match self {
            ItemKind::Carrot => 100,
            ItemKind::Cucumber => 200,
            ItemKind::Tomato => 300,
            ItemKind::Pancake => -500,
        }
    }

    /// Penalty kinds are hazards the player should let pass.
    #[must_use]
    pub fn is_penalty(self) -> bool {
        matches!(self, ItemKind::Pancake)
    }

    /// Relative spawn weight; probability of a kind is weight / 11.
    #[must_use]
    pub fn weight(self) -> u32 {
        match self {
            ItemKind::Carrot => 4,
            ItemKind::Cucumber => 3,
            ItemKind::Tomato => 2,
            ItemKind::Pancake => 2,
        }
    }

    /// Maps a uniform roll in `0..WEIGHT_TOTAL` onto a kind via the
    /// cumulative weight thresholds 4, 7, 9, 11.
    #[must_use]
    pub fn from_roll(roll: u32) -> Self {
        debug_assert!(roll < WEIGHT_TOTAL);
        let mut threshold = 0;
        for kind in ItemKind::ALL {
            threshold += kind.weight();
            if roll < threshold {
                return kind;
            }
        }
        // Unreachable for rolls in range; the last kind absorbs the rest.
        ItemKind::Pancake
    }

    /// Weighted random draw from the injected PRNG.
    #[must_use]
    pub fn draw(rng: &mut fastrand::Rng) -> Self {
        Self::from_roll(rng.u32(0..WEIGHT_TOTAL))
    }
}
