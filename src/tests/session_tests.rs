#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::catalog::ItemKind;
    use crate::components::{Lane, SessionState};
    use crate::game::{REACTION_DISPLAY_TICKS, SESSION_SECONDS, SPAWN_CADENCE_START};
    use crate::input;
    use crate::session::GameSession;
    use crate::tests::test_utils::{attach_recording_sink, inject_item, started_session};

    fn end_recorder(session: &mut GameSession) -> Rc<RefCell<Vec<(u32, u32)>>> {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let writer = Rc::clone(&calls);
        session.set_on_session_end(move |score, level| {
            writer.borrow_mut().push((score, level));
        });
        calls
    }

    #[test]
    fn test_start_resets_session() {
        let mut session = GameSession::with_seed(1);
        assert!(!session.is_active());

        session.start();

        assert!(session.is_active());
        assert_eq!(session.score(), 0);
        assert_eq!(session.level(), 1);
        assert_eq!(session.time_remaining(), SESSION_SECONDS);
        assert_eq!(session.catcher_lane(), Lane::Center);
        assert!(session.live_items().is_empty());
    }

    #[test]
    fn test_start_while_active_is_noop() {
        let mut session = started_session();
        session.world.resource_mut::<SessionState>().score = 500;

        session.start();

        // A second start must not reset anything mid-session
        assert_eq!(session.score(), 500);
        assert!(session.is_active());
    }

    #[test]
    fn test_start_clears_leftover_items() {
        let mut session = started_session();
        inject_item(&mut session, ItemKind::Carrot, Lane::Left);
        session.stop();

        session.start();
        assert!(session.live_items().is_empty());
    }

    #[test]
    fn test_stop_while_idle_is_noop() {
        let mut session = GameSession::with_seed(1);
        let calls = end_recorder(&mut session);

        session.stop();

        assert!(calls.borrow().is_empty());
        assert!(!session.is_active());
    }

    #[test]
    fn test_stop_fires_end_notification_once() {
        let mut session = started_session();
        let calls = end_recorder(&mut session);

        inject_item(&mut session, ItemKind::Carrot, Lane::Center);
        session.tick();

        session.stop();
        session.stop();

        assert_eq!(*calls.borrow(), vec![(100, 1)]);
    }

    #[test]
    fn test_tick_while_idle_is_noop() {
        let mut session = GameSession::with_seed(1);
        session.tick();
        assert!(session.live_items().is_empty());
        assert_eq!(session.world.resource::<SessionState>().tick_count, 0);
    }

    #[test]
    fn test_items_spawn_on_cadence() {
        let mut session = started_session();

        for _ in 0..SPAWN_CADENCE_START - 1 {
            session.tick();
        }
        assert!(session.live_items().is_empty());

        session.tick();
        assert_eq!(session.live_items().len(), 1);
    }

    #[test]
    fn test_input_command_moves_catcher() {
        let mut session = started_session();
        session.on_input_command(Lane::Left);
        assert_eq!(session.catcher_lane(), Lane::Left);
    }

    #[test]
    fn test_input_command_is_idempotent() {
        let mut session = GameSession::with_seed(1);
        let log = attach_recording_sink(&mut session);
        session.start();

        let moves_after_start = log.borrow().catcher_moves.len();

        session.on_input_command(Lane::Left);
        session.on_input_command(Lane::Left);

        // One lane change, and the repeat command pushes nothing
        assert_eq!(session.catcher_lane(), Lane::Left);
        assert_eq!(log.borrow().catcher_moves.len(), moves_after_start + 1);
    }

    #[test]
    fn test_input_command_while_idle_is_noop() {
        let mut session = GameSession::with_seed(1);
        session.on_input_command(Lane::Right);
        assert_eq!(session.catcher_lane(), Lane::Center);
    }

    #[test]
    fn test_clock_tick_counts_down() {
        let mut session = started_session();
        session.clock_tick();
        assert_eq!(session.time_remaining(), SESSION_SECONDS - 1);
    }

    #[test]
    fn test_countdown_ends_session() {
        // Scenario: a full 15-second countdown with no skipped seconds
        let mut session = started_session();
        let calls = end_recorder(&mut session);

        inject_item(&mut session, ItemKind::Cucumber, Lane::Center);
        session.tick();

        for _ in 0..SESSION_SECONDS - 1 {
            session.clock_tick();
            assert!(session.is_active());
        }
        session.clock_tick();

        assert!(!session.is_active());
        assert_eq!(*calls.borrow(), vec![(200, 1)]);

        // The ended session is inert: further clock ticks change nothing
        session.clock_tick();
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn test_scenario_three_small_catches() {
        // Three +100 catches: score 300, still level 1, cadence untouched
        let mut session = started_session();

        for _ in 0..3 {
            inject_item(&mut session, ItemKind::Carrot, Lane::Center);
            session.tick();
        }

        assert_eq!(session.score(), 300);
        assert_eq!(session.level(), 1);
        assert_eq!(
            session.world.resource::<SessionState>().spawn_cadence,
            SPAWN_CADENCE_START
        );
    }

    #[test]
    fn test_scenario_level_up_at_threshold() {
        // From 900, a +300 catch crosses 1000: level 2, cadence 50
        let mut session = started_session();
        session.world.resource_mut::<SessionState>().score = 900;

        inject_item(&mut session, ItemKind::Tomato, Lane::Center);
        session.tick();

        assert_eq!(session.score(), 1200);
        assert_eq!(session.level(), 2);
        assert_eq!(session.world.resource::<SessionState>().spawn_cadence, 50);
    }

    #[test]
    fn test_scenario_penalty_demotes_level() {
        // From 1200 at level 2, a penalty drops the score to 700: the level
        // recomputes down to 1 and the cadence eases back to 55
        let mut session = started_session();
        {
            let mut state = session.world.resource_mut::<SessionState>();
            state.score = 1200;
            state.level = 2;
            state.spawn_cadence = 50;
        }

        inject_item(&mut session, ItemKind::Pancake, Lane::Center);
        session.tick();

        assert_eq!(session.score(), 700);
        assert_eq!(session.level(), 1);
        assert_eq!(session.world.resource::<SessionState>().spawn_cadence, 55);
    }

    #[test]
    fn test_score_never_negative() {
        let mut session = started_session();

        for _ in 0..4 {
            inject_item(&mut session, ItemKind::Pancake, Lane::Center);
            session.tick();
            assert_eq!(session.score(), 0);
        }
    }

    #[test]
    fn test_reaction_shown_then_auto_cleared() {
        let mut session = started_session();

        inject_item(&mut session, ItemKind::Carrot, Lane::Center);
        session.tick();
        assert!(session.current_reaction().is_some());

        for _ in 0..REACTION_DISPLAY_TICKS {
            session.tick();
        }
        assert!(session.current_reaction().is_none());
    }

    #[test]
    fn test_catch_pushes_reaction_and_display_to_sink() {
        let mut session = GameSession::with_seed(1);
        let log = attach_recording_sink(&mut session);
        session.start();

        inject_item(&mut session, ItemKind::Pancake, Lane::Center);
        session.tick();

        let log = log.borrow();
        assert_eq!(log.reactions.last().map(|(text, _)| *text), Some("Yuck!"));
        assert_eq!(log.removed, 1);
        assert_eq!(log.displays.last(), Some(&(0, SESSION_SECONDS, 1)));
    }

    #[test]
    fn test_command_drain_applies_last_write() {
        let mut session = started_session();
        let (sender, receiver) = input::command_channel();

        sender.try_send(Lane::Left).unwrap();
        sender.try_send(Lane::Right).unwrap();
        input::drain_commands(&receiver, &mut session);

        assert_eq!(session.catcher_lane(), Lane::Right);
    }

    #[test]
    fn test_session_is_reusable_after_end() {
        let mut session = started_session();
        session.world.resource_mut::<SessionState>().score = 800;
        session.stop();

        session.start();
        assert!(session.is_active());
        assert_eq!(session.score(), 0);
        assert_eq!(session.time_remaining(), SESSION_SECONDS);
    }
}
