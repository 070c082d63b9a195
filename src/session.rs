#![warn(clippy::all, clippy::pedantic)]

//! The session state machine: owns the world, drives the tick sequence, and
//! narrates state changes to the render sink.

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::{Catcher, FallingItem, GameRng, Lane, Reaction, SessionState};
use crate::render::{NullSink, RenderSink};
use crate::systems::{ItemEvent, difficulty_system, physics_system, reaction_system, spawn_item};

/// Invoked exactly once per completed session with (final score, final level).
pub type SessionEndCallback = Box<dyn FnMut(u32, u32)>;

/// A playable session. Idle until [`start`](GameSession::start), Active until
/// the countdown runs out or [`stop`](GameSession::stop), then Idle again and
/// reusable. There is no pause state.
///
/// All mutation goes through `&mut self`, so the no-concurrent-mutation
/// contract between the tick driver, the countdown driver, and input
/// commands is enforced by the type system: whoever drives this session
/// serializes access by construction.
pub struct GameSession {
    pub world: World,
    sink: Box<dyn RenderSink>,
    on_session_end: Option<SessionEndCallback>,
}

impl GameSession {
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(GameRng::new())
    }

    /// A session with a seeded PRNG, for reproducible spawn sequences.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(GameRng::with_seed(seed))
    }

    fn with_rng(rng: GameRng) -> Self {
        let mut world = World::new();
        world.insert_resource(SessionState::default());
        world.insert_resource(Catcher::default());
        world.insert_resource(Reaction::default());
        world.insert_resource(rng);

        Self {
            world,
            sink: Box::new(NullSink),
            on_session_end: None,
        }
    }

    pub fn set_render_sink(&mut self, sink: Box<dyn RenderSink>) {
        self.sink = sink;
    }

    /// Registers the end-of-session notification. Register before `start`;
    /// a later registration replaces the previous callback.
    pub fn set_on_session_end(&mut self, callback: impl FnMut(u32, u32) + 'static) {
        self.on_session_end = Some(Box::new(callback));
    }

    /// Begins a session: resets all state, clears leftover items, recenters
    /// the catcher, and transitions Idle -> Active. No-op while Active.
    pub fn start(&mut self) {
        if self.is_active() {
            return;
        }
        info!("Starting session");

        let stale: Vec<Entity> = self
            .world
            .query_filtered::<Entity, With<FallingItem>>()
            .iter(&self.world)
            .collect();
        for entity in stale {
            self.world.despawn(entity);
            self.sink.remove_item(entity);
        }

        {
            let mut state = self.world.resource_mut::<SessionState>();
            state.reset();
            state.active = true;
        }
        *self.world.resource_mut::<Catcher>() = Catcher::default();
        *self.world.resource_mut::<Reaction>() = Reaction::default();

        self.sink.set_catcher_position(Lane::Center);
        self.sink.clear_reaction();
        self.push_display();
    }

    /// One pass of the game loop: spawn on cadence, advance physics, expire
    /// the reaction display, recompute difficulty. No-op unless Active.
    pub fn tick(&mut self) {
        if !self.is_active() {
            return;
        }

        let should_spawn = {
            let mut state = self.world.resource_mut::<SessionState>();
            state.tick_count += 1;
            state.tick_count % u64::from(state.spawn_cadence) == 0
        };
        if should_spawn {
            let entity = spawn_item(&mut self.world);
            if let Some(item) = self.world.get::<FallingItem>(entity) {
                self.sink.create_item(entity, item.kind.icon(), item.lane, item.y);
            }
        }

        let mut caught_any = false;
        for event in physics_system(&mut self.world) {
            match event {
                ItemEvent::Moved { entity, y } => self.sink.update_item_position(entity, y),
                ItemEvent::Caught { entity, .. } => {
                    self.sink.remove_item(entity);
                    caught_any = true;
                }
                ItemEvent::Missed { entity } => self.sink.remove_item(entity),
            }
        }
        if caught_any {
            if let Some(event) = self.world.resource::<Reaction>().event {
                self.sink.set_reaction(event.text, event.polarity);
            }
            self.push_display();
        }

        if reaction_system(&mut self.world) {
            self.sink.clear_reaction();
        }

        if difficulty_system(&mut self.world) {
            self.push_display();
        }
    }

    /// One second elapsed on the countdown. Driven at 1 Hz by the frontend,
    /// independently of the sim tick rate. Ends the session at zero. No-op
    /// unless Active.
    pub fn clock_tick(&mut self) {
        if !self.is_active() {
            return;
        }

        let remaining = {
            let mut state = self.world.resource_mut::<SessionState>();
            state.time_remaining = state.time_remaining.saturating_sub(1);
            state.time_remaining
        };
        debug!("Countdown: {remaining}s remaining");
        self.push_display();

        if remaining == 0 {
            self.stop();
        }
    }

    /// A discrete lane command from the input source. Idempotent for the
    /// current lane; no-op unless Active. Takes effect immediately, before
    /// the next physics pass reads the catcher lane.
    pub fn on_input_command(&mut self, lane: Lane) {
        if !self.is_active() {
            return;
        }
        {
            let mut catcher = self.world.resource_mut::<Catcher>();
            if catcher.lane == lane {
                return;
            }
            catcher.lane = lane;
        }
        debug!("Catcher moved to {lane:?}");
        self.sink.set_catcher_position(lane);
    }

    /// Ends the session and fires the end-of-session notification exactly
    /// once with the final score and level. No-op unless Active.
    pub fn stop(&mut self) {
        let (score, level) = {
            let mut state = self.world.resource_mut::<SessionState>();
            if !state.active {
                return;
            }
            state.active = false;
            (state.score, state.level)
        };
        info!("Session ended: score {score}, level {level}");

        if let Some(on_end) = self.on_session_end.as_mut() {
            on_end(score, level);
        }
    }

    fn push_display(&mut self) {
        let (score, time, level) = {
            let state = self.world.resource::<SessionState>();
            (state.score, state.time_remaining, state.level)
        };
        self.sink.set_display(score, time, level);
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.world.resource::<SessionState>().active
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.world.resource::<SessionState>().score
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.world.resource::<SessionState>().level
    }

    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        self.world.resource::<SessionState>().time_remaining
    }

    #[must_use]
    pub fn catcher_lane(&self) -> Lane {
        self.world.resource::<Catcher>().lane
    }

    /// Snapshot of the live items, for immediate-mode frontends.
    pub fn live_items(&mut self) -> Vec<FallingItem> {
        self.world
            .query::<&FallingItem>()
            .iter(&self.world)
            .copied()
            .collect()
    }

    /// The reaction currently on display, if any.
    #[must_use]
    pub fn current_reaction(&self) -> Option<crate::components::ReactionEvent> {
        self.world.resource::<Reaction>().event
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
