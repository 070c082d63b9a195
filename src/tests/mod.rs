#![warn(clippy::all, clippy::pedantic)]

pub mod session_tests;

// Import test utilities
#[cfg(test)]
pub mod test_utils {
    use std::cell::RefCell;
    use std::rc::Rc;

    use bevy_ecs::prelude::*;

    use crate::catalog::ItemKind;
    use crate::components::{
        Catcher, FallingItem, GameRng, Lane, Reaction, ReactionPolarity, SessionState,
    };
    use crate::render::RenderSink;
    use crate::session::GameSession;

    // Helper function to create a bare world with the standard resources
    #[must_use]
    pub fn create_test_world() -> World {
        let mut world = World::new();
        world.insert_resource(SessionState::default());
        world.insert_resource(Catcher::default());
        world.insert_resource(Reaction::default());
        world.insert_resource(GameRng::with_seed(7));
        world
    }

    // Helper function to create a seeded session that is already running
    #[must_use]
    pub fn started_session() -> GameSession {
        let mut session = GameSession::with_seed(42);
        session.start();
        session
    }

    // Places an item one physics step above the middle of the catch band, so
    // the next tick resolves it against the catcher
    pub fn inject_item(session: &mut GameSession, kind: ItemKind, lane: Lane) -> Entity {
        inject_item_into(&mut session.world, kind, lane)
    }

    pub fn inject_item_into(world: &mut World, kind: ItemKind, lane: Lane) -> Entity {
        world
            .spawn(FallingItem {
                y: 430.0,
                lane,
                speed: 1.0,
                kind,
            })
            .id()
    }

    // A render sink that records every call, for asserting what the session
    // pushed to the presentation layer
    #[derive(Debug, Default)]
    pub struct SinkLog {
        pub created: usize,
        pub removed: usize,
        pub position_updates: usize,
        pub catcher_moves: Vec<Lane>,
        pub reactions: Vec<(&'static str, ReactionPolarity)>,
        pub reaction_clears: usize,
        pub displays: Vec<(u32, u32, u32)>,
    }

    pub struct RecordingSink(pub Rc<RefCell<SinkLog>>);

    impl RenderSink for RecordingSink {
        fn create_item(&mut self, _id: Entity, _icon: &'static str, _lane: Lane, _y: f32) {
            self.0.borrow_mut().created += 1;
        }

        fn update_item_position(&mut self, _id: Entity, _y: f32) {
            self.0.borrow_mut().position_updates += 1;
        }

        fn remove_item(&mut self, _id: Entity) {
            self.0.borrow_mut().removed += 1;
        }

        fn set_catcher_position(&mut self, lane: Lane) {
            self.0.borrow_mut().catcher_moves.push(lane);
        }

        fn set_reaction(&mut self, text: &'static str, polarity: ReactionPolarity) {
            self.0.borrow_mut().reactions.push((text, polarity));
        }

        fn clear_reaction(&mut self) {
            self.0.borrow_mut().reaction_clears += 1;
        }

        fn set_display(&mut self, score: u32, time_remaining: u32, level: u32) {
            self.0.borrow_mut().displays.push((score, time_remaining, level));
        }
    }

    // Attaches a recording sink to a session and returns the shared log
    pub fn attach_recording_sink(session: &mut GameSession) -> Rc<RefCell<SinkLog>> {
        let log = Rc::new(RefCell::new(SinkLog::default()));
        session.set_render_sink(Box::new(RecordingSink(Rc::clone(&log))));
        log
    }
}
