//! Bot behaviour loops.
//!
//! Each bot with a non-idle strategy gets one or two background tasks that
//! emit actions on a timer. A task checks that its bot is still in the live
//! table at the top of every iteration and returns as soon as it is gone;
//! there is no separate cancellation signal.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval};

use crate::actions::Action;
use crate::engine::Engine;
use crate::entities::{Bot, EntityId, Origin};
use crate::point::Direction;

/// Fixed behaviour policy of a bot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BotStrategy {
    /// Never acts.
    #[default]
    Idle,
    /// Wanders in random directions.
    Patrol,
    /// Stands still and shoots in random directions.
    Fire,
    /// Wanders and shoots on independent timers.
    PatrolAndFire,
}

impl BotStrategy {
    /// Whether this strategy issues movement.
    #[must_use]
    pub const fn moves(self) -> bool {
        matches!(self, Self::Patrol | Self::PatrolAndFire)
    }

    /// Whether this strategy fires projectiles.
    #[must_use]
    pub const fn fires(self) -> bool {
        matches!(self, Self::Fire | Self::PatrolAndFire)
    }
}

const PATROL_SALT: u64 = 0x5041_5452;
const FIRE_SALT: u64 = 0x4649_5245;

/// Spawn the behaviour tasks for `bot`. Idle bots get none.
pub(crate) fn spawn_behaviour(engine: &Arc<Engine>, bot: &Bot) -> Vec<JoinHandle<()>> {
    let timings = engine.timings;
    let mut tasks = Vec::with_capacity(2);

    let (patrol_period, fire_period) = match bot.strategy {
        BotStrategy::Idle => (None, None),
        BotStrategy::Patrol => (Some(timings.patrol()), None),
        BotStrategy::Fire => (None, Some(timings.fire())),
        BotStrategy::PatrolAndFire => (
            Some(timings.combined_patrol()),
            Some(timings.combined_fire()),
        ),
    };

    if let Some(period) = patrol_period {
        let rng = engine.task_rng(bot.id, PATROL_SALT);
        tasks.push(tokio::spawn(patrol_loop(
            Arc::clone(engine),
            bot.id,
            period,
            rng,
        )));
    }
    if let Some(period) = fire_period {
        let rng = engine.task_rng(bot.id, FIRE_SALT);
        tasks.push(tokio::spawn(fire_loop(Arc::clone(engine), bot.id, period, rng)));
    }

    tracing::debug!(
        bot_id = bot.id,
        strategy = ?bot.strategy,
        tasks = tasks.len(),
        "Bot behaviour started"
    );
    tasks
}

fn ticker(period: Duration) -> Interval {
    time::interval_at(Instant::now() + period, period)
}

/// Queue a random one-cell move every `period`.
async fn patrol_loop(engine: Arc<Engine>, bot_id: EntityId, period: Duration, mut rng: StdRng) {
    let mut ticker = ticker(period);
    loop {
        if !engine.is_bot_alive(bot_id) {
            tracing::debug!(bot_id, "Patrol loop stopped");
            return;
        }
        ticker.tick().await;

        let direction = Direction::random(&mut rng);
        if engine.enqueue(Action::move_bot(bot_id, direction)).await.is_err() {
            return;
        }
    }
}

/// Fire a projectile from the bot's current cell every `period`.
async fn fire_loop(engine: Arc<Engine>, bot_id: EntityId, period: Duration, mut rng: StdRng) {
    let mut ticker = ticker(period);
    loop {
        if !engine.is_bot_alive(bot_id) {
            tracing::debug!(bot_id, "Fire loop stopped");
            return;
        }
        ticker.tick().await;

        let Some(bot) = engine.bot(bot_id) else {
            tracing::debug!(bot_id, "Fire loop stopped");
            return;
        };
        // A "stay" draw is queued too; applying it discards the projectile.
        let direction = Direction::random(&mut rng);
        let projectile_id = engine.spawn_projectile(bot.position, direction, Origin::Bot);
        if engine.enqueue(Action::fire(projectile_id, direction)).await.is_err() {
            engine.projectiles.remove(&projectile_id);
            return;
        }
    }
}
