//! Property tests for grid movement.

use proptest::prelude::*;
use shooter_core::prelude::*;
use shooter_test_utils::fixtures::{self, PLAYER_ID};
use shooter_test_utils::strategies::{arb_direction_sequence, arb_point};

proptest! {
    #[test]
    fn actor_never_enters_a_wall(moves in arb_direction_sequence(64)) {
        let engine = Engine::new(fixtures::idle_arena()).unwrap();
        let map = engine.map().clone();
        let mut previous = engine.actor(PLAYER_ID).unwrap().position;

        for direction in moves {
            engine.apply(&Action::move_actor(PLAYER_ID, direction));
            let current = engine.actor(PLAYER_ID).unwrap().position;

            prop_assert!(!map.is_wall(current));
            // Either the step committed or the actor stayed put.
            prop_assert!(current == previous || current == previous.step(direction));
            previous = current;
        }
    }

    #[test]
    fn bot_moves_respect_walls(moves in arb_direction_sequence(64)) {
        let engine = Engine::new(fixtures::idle_arena()).unwrap();
        let map = engine.map().clone();

        for bot in engine.bots() {
            for &direction in &moves {
                let before = engine.bot(bot.id).unwrap().position;
                engine.apply(&Action::move_bot(bot.id, direction));
                let after = engine.bot(bot.id).unwrap().position;

                prop_assert!(!map.is_wall(after));
                let target = before.step(direction);
                if map.is_wall(target) {
                    prop_assert_eq!(after, before);
                } else {
                    prop_assert_eq!(after, target);
                }
            }
        }
    }

    #[test]
    fn element_at_agrees_with_is_wall(p in arb_point(6)) {
        let map = fixtures::arena();
        prop_assert_eq!(map.is_wall(p), map.element_at(p) == MapElement::Wall);
    }

    #[test]
    fn every_moving_step_changes_one_axis_by_one(p in arb_point(100)) {
        for direction in Direction::HEADINGS {
            let next = p.step(direction);
            prop_assert_eq!((next.x - p.x).abs() + (next.y - p.y).abs(), 1);
        }
        prop_assert_eq!(p.step(Direction::None), p);
    }
}
