//! Engine core and scheduler.
//!
//! The [`Engine`] is the aggregate root of a match. It owns:
//!
//! - the immutable [`GameMap`] and its cached element index,
//! - [`EngineState`] (actors, scores, terminal flags) behind one
//!   reader/writer lock,
//! - the live bot and projectile tables as concurrent maps, and
//! - the bounded action queue.
//!
//! # Concurrency
//!
//! Two tiers of mutation exist side by side:
//!
//! 1. **Queue-mediated**: actor and bot moves are [`Action`]s. A single
//!    consumer task pops them in arrival order and applies each one while
//!    holding the [`EngineState`] write lock. Renderers take the read lock.
//! 2. **Direct**: bot strategy tasks and projectile travel tasks touch the
//!    bot/projectile tables through the tables' own synchronization.
//!
//! The state lock is never held across an `.await`. Code that holds the
//! state lock may lock bot table shards, never the other way around.
//!
//! # Example
//!
//! ```
//! use shooter_core::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> shooter_core::error::Result<()> {
//! let map = GameMap::parse("█████\n█   █\n█ S █\n█████")?;
//! let config = EngineConfig::new(map)
//!     .with_actors(vec![Actor::new(1, "P1", Point::new(-1, -1))])
//!     .with_bots(vec![BotStrategy::Idle]);
//!
//! let engine = Engine::new(config)?;
//! engine.start()?;
//! engine.enqueue(Action::move_actor(1, Direction::Right)).await?;
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::{Mutex, RwLock, RwLockReadGuard};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;

use crate::actions::Action;
use crate::config::{EngineConfig, Timings};
use crate::entities::{Actor, Bot, EntityId, Origin, Projectile};
use crate::error::{Result, ShooterError};
use crate::map::{GameMap, MapElement, MapElements};
use crate::point::{Direction, Point};
use crate::strategy;

/// Default number of pending actions the queue holds before producers wait.
pub const ACTION_QUEUE_CAPACITY: usize = 100;

/// Where the match stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchState {
    /// Gameplay in progress.
    Running,
    /// Every bot has been destroyed.
    LevelComplete,
    /// An actor ran out of life.
    GameOver,
}

/// Engine-owned state guarded by the engine's reader/writer lock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineState {
    /// Live player actors.
    pub actors: BTreeMap<EntityId, Actor>,
    /// Score per actor.
    pub scores: BTreeMap<EntityId, i64>,
    /// Set once when the last bot dies.
    pub level_complete: bool,
    /// Set once when any actor's life drops to zero.
    pub game_over: bool,
    /// Actor credited with the round, recorded at level completion.
    pub round_winner: Option<EntityId>,
}

impl EngineState {
    /// Current match state. Game over wins if both flags are set.
    #[must_use]
    pub fn match_state(&self) -> MatchState {
        if self.game_over {
            MatchState::GameOver
        } else if self.level_complete {
            MatchState::LevelComplete
        } else {
            MatchState::Running
        }
    }
}

/// Point-in-time copy of everything a renderer needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Actors sorted by ID.
    pub actors: Vec<Actor>,
    /// Live bots sorted by ID.
    pub bots: Vec<Bot>,
    /// In-flight projectiles sorted by ID.
    pub projectiles: Vec<Projectile>,
    /// Score per actor.
    pub scores: BTreeMap<EntityId, i64>,
    /// Level complete flag.
    pub level_complete: bool,
    /// Game over flag.
    pub game_over: bool,
    /// Round winner, if decided.
    pub round_winner: Option<EntityId>,
    /// Derived match state.
    pub state: MatchState,
}

/// The authoritative game engine.
///
/// Always handled through an [`Arc`]; background tasks keep their own clone.
pub struct Engine {
    map: GameMap,
    elements: MapElements,
    pub(crate) state: RwLock<EngineState>,
    pub(crate) bots: DashMap<EntityId, Bot>,
    pub(crate) projectiles: DashMap<EntityId, Projectile>,
    next_id: AtomicU64,
    pub(crate) timings: Timings,
    seed: Option<u64>,
    sender: mpsc::Sender<Action>,
    pub(crate) receiver: Mutex<Option<mpsc::Receiver<Action>>>,
}

impl Engine {
    /// Build an engine from a configuration.
    ///
    /// Spawns one bot per map spawn point, pairing spawn points (row-major
    /// order) with the configured strategies by index.
    ///
    /// # Errors
    ///
    /// [`ShooterError::BotCountMismatch`] if the strategy list length differs
    /// from the spawn point count, [`ShooterError::DuplicateActor`] if two
    /// actors share an ID, [`ShooterError::InvalidTiming`] if a timer period
    /// is out of range.
    pub fn new(config: EngineConfig) -> Result<Arc<Self>> {
        let EngineConfig {
            map,
            actors,
            bots: strategies,
            timings,
            seed,
            queue_capacity,
        } = config;

        timings.validate()?;

        let elements = map.elements_by_kind();
        let spawn_points = elements.get(MapElement::Spawn);
        if spawn_points.len() != strategies.len() {
            return Err(ShooterError::BotCountMismatch {
                expected: spawn_points.len(),
                received: strategies.len(),
            });
        }

        let mut state = EngineState::default();
        for actor in actors {
            if state.actors.contains_key(&actor.id) {
                return Err(ShooterError::DuplicateActor(actor.id));
            }
            state.scores.insert(actor.id, 0);
            state.actors.insert(actor.id, actor);
        }

        // Engine-allocated IDs start above every caller-supplied actor ID.
        let first_id = state.actors.keys().next_back().map_or(1, |max| max + 1);
        let next_id = AtomicU64::new(first_id);

        let bots = DashMap::new();
        for (position, strategy) in spawn_points.iter().zip(strategies) {
            let id = next_id.fetch_add(1, Ordering::Relaxed);
            bots.insert(id, Bot::new(id, *position, strategy));
        }

        let (sender, receiver) = mpsc::channel(queue_capacity.max(1));

        tracing::info!(
            actors = state.actors.len(),
            bots = bots.len(),
            "Engine initialized"
        );

        Ok(Arc::new(Self {
            map,
            elements,
            state: RwLock::new(state),
            bots,
            projectiles: DashMap::new(),
            next_id,
            timings,
            seed,
            sender,
            receiver: Mutex::new(Some(receiver)),
        }))
    }

    /// Launch the action consumer and one behaviour task per bot strategy.
    ///
    /// Must be called from within a tokio runtime. Returns the consumer's
    /// handle; the consumer runs until the runtime shuts down.
    ///
    /// # Errors
    ///
    /// [`ShooterError::AlreadyStarted`] on a second call.
    pub fn start(self: &Arc<Self>) -> Result<JoinHandle<()>> {
        let receiver = self
            .receiver
            .lock()
            .take()
            .ok_or(ShooterError::AlreadyStarted)?;

        let consumer = tokio::spawn(Arc::clone(self).run_action_loop(receiver));

        let mut tasks = 0;
        for bot in self.bots() {
            tasks += strategy::spawn_behaviour(self, &bot).len();
        }
        tracing::info!(bot_tasks = tasks, "Engine started");

        Ok(consumer)
    }

    /// Single consumer: applies actions strictly in dequeue order.
    async fn run_action_loop(self: Arc<Self>, mut receiver: mpsc::Receiver<Action>) {
        while let Some(action) = receiver.recv().await {
            self.apply(&action);
        }
        tracing::debug!("Action queue closed, consumer exiting");
    }

    /// Apply one action immediately under the exclusive state lock.
    ///
    /// This is what the consumer task does for every dequeued action.
    pub fn apply(self: &Arc<Self>, action: &Action) {
        let mut state = self.state.write();
        tracing::trace!(?action, "Applying action");
        action.apply(self, &mut state);
    }

    // ------------------------------------------------------------------
    // Action ingestion
    // ------------------------------------------------------------------

    /// Queue an action, waiting while the queue is full.
    ///
    /// # Errors
    ///
    /// [`ShooterError::QueueClosed`] if the queue can no longer accept work.
    pub async fn enqueue(&self, action: Action) -> Result<()> {
        self.sender
            .send(action)
            .await
            .map_err(|_| ShooterError::QueueClosed)
    }

    /// Queue an action without waiting.
    ///
    /// # Errors
    ///
    /// [`ShooterError::QueueFull`] when at capacity; the action is dropped.
    pub fn try_enqueue(&self, action: Action) -> Result<()> {
        self.sender.try_send(action).map_err(|e| match e {
            TrySendError::Full(_) => ShooterError::QueueFull,
            TrySendError::Closed(_) => ShooterError::QueueClosed,
        })
    }

    /// Queue an action from a thread outside the async runtime, blocking
    /// while the queue is full.
    ///
    /// Panics if called from within an async context, like
    /// [`mpsc::Sender::blocking_send`].
    pub fn blocking_enqueue(&self, action: Action) -> Result<()> {
        self.sender
            .blocking_send(action)
            .map_err(|_| ShooterError::QueueClosed)
    }

    /// A producer handle for the action queue.
    #[must_use]
    pub fn sender(&self) -> mpsc::Sender<Action> {
        self.sender.clone()
    }

    // ------------------------------------------------------------------
    // Projectiles
    // ------------------------------------------------------------------

    /// Insert a projectile record and return its ID.
    ///
    /// The projectile does not move until a matching
    /// [`Action::FireProjectile`] is applied.
    pub fn spawn_projectile(
        &self,
        position: Point,
        direction: Direction,
        origin: Origin,
    ) -> EntityId {
        let id = self.allocate_id();
        self.projectiles.insert(
            id,
            Projectile {
                id,
                position,
                direction,
                origin,
            },
        );
        id
    }

    /// Create a player projectile at the actor's position and build the
    /// action that launches it. `None` if the actor does not exist.
    pub fn player_fire(&self, actor_id: EntityId, direction: Direction) -> Option<Action> {
        let position = self.state.read().actors.get(&actor_id)?.position;
        let id = self.spawn_projectile(position, direction, Origin::Player);
        Some(Action::fire(id, direction))
    }

    // ------------------------------------------------------------------
    // Read surface
    // ------------------------------------------------------------------

    /// Shared read access to actors, scores and flags.
    pub fn state(&self) -> RwLockReadGuard<'_, EngineState> {
        self.state.read()
    }

    /// Current match state.
    #[must_use]
    pub fn match_state(&self) -> MatchState {
        self.state.read().match_state()
    }

    /// The playing grid.
    #[must_use]
    pub fn map(&self) -> &GameMap {
        &self.map
    }

    /// Cached element index of the playing grid.
    #[must_use]
    pub fn elements(&self) -> &MapElements {
        &self.elements
    }

    /// Copy of one actor.
    #[must_use]
    pub fn actor(&self, id: EntityId) -> Option<Actor> {
        self.state.read().actors.get(&id).cloned()
    }

    /// Copy of one live bot.
    #[must_use]
    pub fn bot(&self, id: EntityId) -> Option<Bot> {
        self.bots.get(&id).map(|b| *b)
    }

    /// Whether the bot is still in the live table.
    #[must_use]
    pub fn is_bot_alive(&self, id: EntityId) -> bool {
        self.bots.contains_key(&id)
    }

    /// Live bots sorted by ID.
    #[must_use]
    pub fn bots(&self) -> Vec<Bot> {
        let mut bots: Vec<Bot> = self.bots.iter().map(|b| *b).collect();
        bots.sort_unstable_by_key(|b| b.id);
        bots
    }

    /// Number of live bots.
    #[must_use]
    pub fn bot_count(&self) -> usize {
        self.bots.len()
    }

    /// Copy of one in-flight projectile.
    #[must_use]
    pub fn projectile(&self, id: EntityId) -> Option<Projectile> {
        self.projectiles.get(&id).map(|p| *p)
    }

    /// In-flight projectiles sorted by ID.
    #[must_use]
    pub fn projectiles(&self) -> Vec<Projectile> {
        let mut projectiles: Vec<Projectile> = self.projectiles.iter().map(|p| *p).collect();
        projectiles.sort_unstable_by_key(|p| p.id);
        projectiles
    }

    /// Consistent copy of all renderable state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let state = self.state.read();
        Snapshot {
            actors: state.actors.values().cloned().collect(),
            bots: self.bots(),
            projectiles: self.projectiles(),
            scores: state.scores.clone(),
            level_complete: state.level_complete,
            game_over: state.game_over,
            round_winner: state.round_winner,
            state: state.match_state(),
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn allocate_id(&self) -> EntityId {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// RNG for one behaviour task. Seeded configs give reproducible bots.
    pub(crate) fn task_rng(&self, bot_id: EntityId, salt: u64) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(
                seed ^ bot_id.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ salt,
            ),
            None => StdRng::from_entropy(),
        }
    }
}
