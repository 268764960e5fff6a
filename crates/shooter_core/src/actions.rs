//! Action protocol.
//!
//! Every state change that goes through the queue is an [`Action`]. The
//! engine's consumer task applies actions one at a time, in arrival order,
//! while holding the exclusive state lock.
//!
//! Actions that reference an entity which no longer exists are silent
//! no-ops: the entity may have been removed between enqueue and apply.

use std::sync::Arc;

use tokio::time::{self, Instant};

use crate::engine::{Engine, EngineState};
use crate::entities::{EntityId, Projectile};
use crate::point::Direction;

/// A queued command representing one state mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Step a player actor one cell.
    Move {
        /// Actor to move.
        actor_id: EntityId,
        /// Step direction.
        direction: Direction,
        /// When the action was issued.
        created_at: Instant,
    },
    /// Step a bot one cell.
    BotMove {
        /// Bot to move.
        bot_id: EntityId,
        /// Step direction.
        direction: Direction,
        /// When the action was issued.
        created_at: Instant,
    },
    /// Launch an existing projectile record along `direction`.
    FireProjectile {
        /// Projectile to launch.
        projectile_id: EntityId,
        /// Travel direction.
        direction: Direction,
        /// When the action was issued.
        created_at: Instant,
    },
}

impl Action {
    /// Build a [`Action::Move`] stamped with the current time.
    #[must_use]
    pub fn move_actor(actor_id: EntityId, direction: Direction) -> Self {
        Self::Move {
            actor_id,
            direction,
            created_at: Instant::now(),
        }
    }

    /// Build a [`Action::BotMove`] stamped with the current time.
    #[must_use]
    pub fn move_bot(bot_id: EntityId, direction: Direction) -> Self {
        Self::BotMove {
            bot_id,
            direction,
            created_at: Instant::now(),
        }
    }

    /// Build a [`Action::FireProjectile`] stamped with the current time.
    #[must_use]
    pub fn fire(projectile_id: EntityId, direction: Direction) -> Self {
        Self::FireProjectile {
            projectile_id,
            direction,
            created_at: Instant::now(),
        }
    }

    /// ID of the entity this action targets.
    #[must_use]
    pub const fn target(&self) -> EntityId {
        match *self {
            Self::Move { actor_id, .. } => actor_id,
            Self::BotMove { bot_id, .. } => bot_id,
            Self::FireProjectile { projectile_id, .. } => projectile_id,
        }
    }

    /// Direction carried by the action.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        match *self {
            Self::Move { direction, .. }
            | Self::BotMove { direction, .. }
            | Self::FireProjectile { direction, .. } => direction,
        }
    }

    /// When the action was issued.
    #[must_use]
    pub const fn created_at(&self) -> Instant {
        match *self {
            Self::Move { created_at, .. }
            | Self::BotMove { created_at, .. }
            | Self::FireProjectile { created_at, .. } => created_at,
        }
    }

    /// Apply the action. The caller holds the exclusive state lock.
    pub fn apply(&self, engine: &Arc<Engine>, state: &mut EngineState) {
        match *self {
            Self::Move {
                actor_id,
                direction,
                ..
            } => {
                let Some(actor) = state.actors.get_mut(&actor_id) else {
                    tracing::trace!(actor_id, "Move for unknown actor ignored");
                    return;
                };
                let next = actor.position.step(direction);
                if !engine.map().is_wall(next) {
                    actor.position = next;
                }
            }
            Self::BotMove {
                bot_id, direction, ..
            } => {
                let Some(mut bot) = engine.bots.get_mut(&bot_id) else {
                    tracing::trace!(bot_id, "Move for dead bot ignored");
                    return;
                };
                let next = bot.position.step(direction);
                if !engine.map().is_wall(next) {
                    bot.position = next;
                }
            }
            Self::FireProjectile {
                projectile_id,
                direction,
                ..
            } => launch(engine, projectile_id, direction),
        }
    }
}

/// Hand a projectile to its own travel task.
fn launch(engine: &Arc<Engine>, projectile_id: EntityId, direction: Direction) {
    if !direction.is_moving() {
        // A projectile that never moves can never collide.
        engine.projectiles.remove(&projectile_id);
        return;
    }

    let projectile = {
        let Some(mut record) = engine.projectiles.get_mut(&projectile_id) else {
            tracing::trace!(projectile_id, "Fire for unknown projectile ignored");
            return;
        };
        record.direction = direction;
        *record
    };

    tokio::spawn(travel(Arc::clone(engine), projectile));
}

/// Advance one projectile every tick until it hits something.
///
/// Order per tick: step, wall check, entity check, then record the new
/// position. The task also stops if its record disappears from the table.
async fn travel(engine: Arc<Engine>, mut projectile: Projectile) {
    let period = engine.timings.projectile_tick();
    let mut ticker = time::interval_at(Instant::now() + period, period);

    loop {
        ticker.tick().await;

        if !engine.projectiles.contains_key(&projectile.id) {
            return;
        }

        projectile.position = projectile.position.step(projectile.direction);

        if engine.map().is_wall(projectile.position) {
            engine.projectiles.remove(&projectile.id);
            tracing::debug!(
                id = projectile.id,
                position = ?projectile.position,
                "Projectile hit wall"
            );
            return;
        }

        if engine.resolve_collision(projectile.position, projectile.origin) {
            engine.projectiles.remove(&projectile.id);
            tracing::debug!(
                id = projectile.id,
                position = ?projectile.position,
                "Projectile hit target"
            );
            return;
        }

        match engine.projectiles.get_mut(&projectile.id) {
            Some(mut record) => record.position = projectile.position,
            None => return,
        }
    }
}
