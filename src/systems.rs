#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use log::{debug, trace};

use crate::catalog::ItemKind;
use crate::components::{Catcher, FallingItem, GameRng, Reaction, ReactionEvent, SessionState};
use crate::game::{
    CATCH_BAND_END, CATCH_BAND_START, OFF_SCREEN_Y, SPAWN_Y, item_speed_for_level,
    spawn_cadence_for_level,
};

/// What happened to an item during one physics pass. Consumed by the session
/// to drive the render sink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemEvent {
    Moved { entity: Entity, y: f32 },
    Caught { entity: Entity, kind: ItemKind },
    Missed { entity: Entity },
}

/// Spawns one falling item: weighted-random kind, uniform-random lane, start
/// position above the viewport, and a descent speed fixed from the session's
/// current level.
pub fn spawn_item(world: &mut World) -> Entity {
    let level = world.resource::<SessionState>().level;
    let (kind, lane) = {
        let mut rng = world.resource_mut::<GameRng>();
        (ItemKind::draw(&mut rng.0), crate::components::Lane::draw(&mut rng.0))
    };

    let item = FallingItem {
        y: SPAWN_Y,
        lane,
        speed: item_speed_for_level(level),
        kind,
    };

    debug!(
        "Spawning {:?} in lane {:?} at speed {}",
        kind, lane, item.speed
    );

    world.spawn(item).id()
}

/// Advances every live item by its speed and resolves catches and misses.
///
/// An item whose new position lies inside the catch band is caught iff its
/// lane matches the catcher's lane; caught items score and raise a reaction.
/// Items past the off-screen threshold are removed with no score effect,
/// penalty items included. Each removal happens at most once, and removing
/// one item never skips the evaluation of another: all items are advanced
/// and classified first, despawns happen after the pass.
pub fn physics_system(world: &mut World) -> Vec<ItemEvent> {
    let catcher_lane = world.resource::<Catcher>().lane;

    let mut events = Vec::new();
    let mut caught: Vec<(Entity, ItemKind)> = Vec::new();
    let mut missed: Vec<Entity> = Vec::new();

    let mut items = world.query::<(Entity, &mut FallingItem)>();
    for (entity, mut item) in items.iter_mut(world) {
        item.y += item.speed;

        let in_band = item.y > CATCH_BAND_START && item.y < CATCH_BAND_END;
        if in_band && item.lane == catcher_lane {
            caught.push((entity, item.kind));
        } else if item.y > OFF_SCREEN_Y {
            missed.push(entity);
        } else {
            events.push(ItemEvent::Moved { entity, y: item.y });
        }
    }

    for (entity, kind) in caught {
        {
            let mut state = world.resource_mut::<SessionState>();
            state.apply_score(kind);
            debug!("Caught {:?}, score now {}", kind, state.score);
        }
        world
            .resource_mut::<Reaction>()
            .trigger(ReactionEvent::for_kind(kind));
        world.despawn(entity);
        events.push(ItemEvent::Caught { entity, kind });
    }

    for entity in missed {
        trace!("Item {entity:?} left the playfield uncaught");
        world.despawn(entity);
        events.push(ItemEvent::Missed { entity });
    }

    events
}

/// Recomputes the level from the current score and refreshes the spawn
/// cadence whenever the level changed, in either direction. Returns true on
/// a change so the session can push a display update.
pub fn difficulty_system(world: &mut World) -> bool {
    let mut state = world.resource_mut::<SessionState>();
    let new_level = state.level_for_score();
    if new_level == state.level {
        return false;
    }

    debug!(
        "Level {} -> {} at score {}",
        state.level, new_level, state.score
    );
    state.level = new_level;
    state.spawn_cadence = spawn_cadence_for_level(new_level);
    true
}

/// Counts down the reaction display deadline. Returns true on the tick the
/// message auto-clears.
pub fn reaction_system(world: &mut World) -> bool {
    world.resource_mut::<Reaction>().tick()
}
