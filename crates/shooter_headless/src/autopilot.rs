//! Scripted player for headless matches.
//!
//! Each turn the autopilot fires at the nearest bot it has a clear shot at.
//! With nothing in sight it steps in a random open direction.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use shooter_core::prelude::*;

/// Simple shoot-on-sight player.
#[derive(Debug)]
pub struct Autopilot {
    actor_id: EntityId,
    rng: StdRng,
}

impl Autopilot {
    /// Drive `actor_id`. A seed makes the wandering reproducible.
    #[must_use]
    pub fn new(actor_id: EntityId, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ actor_id),
            None => StdRng::from_entropy(),
        };
        Self { actor_id, rng }
    }

    /// The actor this autopilot controls.
    #[must_use]
    pub const fn actor_id(&self) -> EntityId {
        self.actor_id
    }

    /// Decide this turn's action, if any.
    ///
    /// A fire decision creates the projectile record right away; the
    /// returned action must be queued for it to launch.
    pub fn plan(&mut self, engine: &Engine) -> Option<Action> {
        let actor = engine.actor(self.actor_id)?;
        if !actor.is_alive() {
            return None;
        }

        let target = engine
            .bots()
            .into_iter()
            .filter_map(|bot| {
                let heading = heading_towards(actor.position, bot.position)?;
                clear_line(engine.map(), actor.position, bot.position)
                    .then(|| (distance(actor.position, bot.position), heading))
            })
            .min_by_key(|(dist, _)| *dist);

        if let Some((_, heading)) = target {
            tracing::trace!(actor_id = self.actor_id, ?heading, "Autopilot firing");
            return engine.player_fire(self.actor_id, heading);
        }

        let open: Vec<Direction> = Direction::HEADINGS
            .into_iter()
            .filter(|d| !engine.map().is_wall(actor.position.step(*d)))
            .collect();
        let direction = open.choose(&mut self.rng).copied()?;
        Some(Action::move_actor(self.actor_id, direction))
    }
}

/// Heading from `from` to `to` if they share a row or column.
pub(crate) fn heading_towards(from: Point, to: Point) -> Option<Direction> {
    if from == to {
        return None;
    }
    match (to.x - from.x, to.y - from.y) {
        (0, dy) if dy < 0 => Some(Direction::Up),
        (0, _) => Some(Direction::Down),
        (dx, 0) if dx < 0 => Some(Direction::Left),
        (_, 0) => Some(Direction::Right),
        _ => None,
    }
}

/// Whether a projectile fired from `from` reaches `to` without meeting a wall.
pub(crate) fn clear_line(map: &GameMap, from: Point, to: Point) -> bool {
    let Some(heading) = heading_towards(from, to) else {
        return false;
    };
    let mut cursor = from.step(heading);
    while cursor != to {
        if map.is_wall(cursor) {
            return false;
        }
        cursor = cursor.step(heading);
    }
    true
}

fn distance(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}
