//! Collision and scoring rules.
//!
//! Projectiles only hurt the opposing side: player shots hit bots, bot shots
//! hit actors. At most one entity is affected per check, the one with the
//! lowest ID among those standing on the cell.

use crate::engine::{Engine, EngineState};
use crate::entities::{EntityId, Origin};
use crate::point::Point;

/// Points granted to each live actor by [`Engine::award_points`].
pub const POINTS_PER_AWARD: i64 = 10;

impl Engine {
    /// Resolve a projectile arriving at `position`.
    ///
    /// Returns `true` if an entity was hit, in which case the projectile
    /// should be destroyed.
    pub fn resolve_collision(&self, position: Point, origin: Origin) -> bool {
        match origin {
            Origin::Player => self.hit_bot(position),
            Origin::Bot => self.hit_actor(position),
            Origin::Unknown => false,
        }
    }

    fn hit_bot(&self, position: Point) -> bool {
        let Some(target) = self
            .bots
            .iter()
            .filter(|bot| bot.position == position)
            .map(|bot| bot.id)
            .min()
        else {
            return false;
        };

        // Decrement in place, delete after the guard is released.
        let destroyed = match self.bots.get_mut(&target) {
            Some(mut bot) => {
                bot.life -= 1;
                !bot.is_alive()
            }
            // Removed concurrently between scan and hit.
            None => return false,
        };

        if destroyed && self.bots.remove(&target).is_some() {
            tracing::debug!(bot_id = target, "Bot destroyed");

            let mut state = self.state.write();
            if !state.level_complete && self.bots.is_empty() {
                state.level_complete = true;
                state.round_winner = round_winner(&state);
                tracing::info!(winner = ?state.round_winner, "Level complete");
            }
        }

        true
    }

    fn hit_actor(&self, position: Point) -> bool {
        let mut state = self.state.write();

        // BTreeMap iterates in ascending ID order.
        let Some(actor) = state
            .actors
            .values_mut()
            .find(|actor| actor.position == position)
        else {
            return false;
        };

        actor.life -= 1;
        let (actor_id, life) = (actor.id, actor.life);
        tracing::debug!(actor_id, life, "Actor hit");

        if life <= 0 && !state.game_over {
            state.game_over = true;
            tracing::info!(actor_id, "Game over");
        }

        true
    }

    /// Grant [`POINTS_PER_AWARD`] to every actor with life left.
    ///
    /// Never called automatically; callers decide when a round is scored.
    pub fn award_points(&self) {
        let mut state = self.state.write();
        let EngineState { actors, scores, .. } = &mut *state;
        for actor in actors.values().filter(|a| a.is_alive()) {
            *scores.entry(actor.id).or_insert(0) += POINTS_PER_AWARD;
        }
    }
}

/// Highest score wins; ties go to the lowest actor ID.
fn round_winner(state: &EngineState) -> Option<EntityId> {
    state
        .actors
        .keys()
        .copied()
        .max_by(|a, b| {
            let score_a = state.scores.get(a).copied().unwrap_or(0);
            let score_b = state.scores.get(b).copied().unwrap_or(0);
            score_a.cmp(&score_b).then(b.cmp(a))
        })
}
