//! Simulation orchestrator - the single writer of all game state
//!
//! [`Simulation`] owns the chunk map, drop pool, worker roster, player
//! avatar and economy. External collaborators (renderer, input, UI,
//! persistence) read through the accessors and mutate only through the
//! command entry points; every per-frame mutation happens inside
//! [`Simulation::advance`].

pub mod effects;
pub mod player;
pub mod snapshot;
pub mod tick;

use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::types::{TreeId, Vec2, WorkerId};
use crate::economy::{self, Counters, UpgradeLevels, UpgradeStat};
use crate::simulation::effects::EffectPool;
use crate::simulation::player::Player;
use crate::simulation::tick::{Actor, SimEvent};
use crate::workers::{Worker, WorkerRole};
use crate::world::chunks::ChunkStore;
use crate::world::drops::DropPool;
use ahash::AHashMap;

/// The whole game simulation. One per session; construct, then drive with
/// [`Simulation::advance`] once per frame.
pub struct Simulation {
    pub(crate) config: SimulationConfig,
    pub(crate) chunks: ChunkStore,
    pub(crate) drops: DropPool,
    pub(crate) effects: EffectPool,
    pub(crate) workers: Vec<Worker>,
    pub(crate) player: Player,
    pub(crate) levels: UpgradeLevels,
    pub(crate) counters: Counters,
    /// Saved respawn timers waiting for their chunk to load
    pub(crate) pending_overrides: AHashMap<TreeId, f32>,
    /// Monotonic worker id allocator, owned here rather than in any
    /// module-level state
    pub(crate) next_worker_id: u32,
    pub(crate) chop_requested: bool,
    /// Events produced by command entry points between frames, drained
    /// into the next `advance` result
    pub(crate) queued_events: Vec<SimEvent>,
    pub(crate) tick_count: u64,
}

impl Simulation {
    pub fn new(world_seed: u64) -> Self {
        Self::with_config(SimulationConfig::default(), world_seed)
    }

    pub fn with_config(config: SimulationConfig, world_seed: u64) -> Self {
        let mut counters = Counters::default();
        counters.currency = config.starting_currency;
        let player = Player::new(config.base_position);
        let mut sim = Self {
            chunks: ChunkStore::new(world_seed),
            drops: DropPool::new(),
            effects: EffectPool::new(),
            workers: Vec::new(),
            player,
            levels: UpgradeLevels::default(),
            counters,
            pending_overrides: AHashMap::new(),
            next_worker_id: 0,
            chop_requested: false,
            queued_events: Vec::new(),
            tick_count: 0,
            config,
        };
        // load the starting neighborhood so the first frame has a world
        let _ = sim.chunks.ensure_visible(sim.player.position, &sim.config);
        sim
    }

    // === read surface for rendering/UI collaborators ===

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn chunks(&self) -> &ChunkStore {
        &self.chunks
    }

    pub fn drops(&self) -> &DropPool {
        &self.drops
    }

    pub fn effects(&self) -> &EffectPool {
        &self.effects
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    /// Mutable economy access for scenario setup and debug tooling.
    pub fn counters_mut(&mut self) -> &mut Counters {
        &mut self.counters
    }

    pub fn levels(&self) -> &UpgradeLevels {
        &self.levels
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // === command entry points ===

    /// Point the player avatar; zero stops it. Called by the input
    /// collaborator whenever held keys change.
    pub fn set_player_direction(&mut self, direction: Vec2) {
        self.player.move_dir = direction;
    }

    /// Request a chop; resolved during the player phase of the next
    /// frame, gated by the swing cooldown.
    pub fn request_player_chop(&mut self) {
        self.chop_requested = true;
    }

    /// Sell everything the player carries, if standing at the sell point.
    /// Returns the currency earned (0 away from the stall or when
    /// carrying nothing).
    pub fn sell_at_point(&mut self) -> u64 {
        if self.player.carried == 0 {
            return 0;
        }
        let dist = self.player.position.distance(&self.config.base_position);
        if dist > self.config.sell_radius {
            return 0;
        }
        let units = self.player.carried;
        let earned = units as u64 * self.config.wood_price;
        self.counters.earn(earned);
        self.player.carried = 0;
        self.effects
            .spawn_text(self.player.position, format!("+{earned}"));
        self.queued_events.push(SimEvent::WoodSold {
            by: Actor::Player,
            units,
            earned,
        });
        tracing::debug!(units, earned, "player sold wood");
        earned
    }

    /// Buy the next level of an upgrade stat. Returns the new level.
    pub fn purchase_upgrade(&mut self, stat: UpgradeStat) -> Result<u32> {
        let cost = self.levels.next_cost(stat);
        self.counters.spend(cost)?;
        let level = self.levels.raise(stat);
        self.queued_events.push(SimEvent::UpgradePurchased {
            stat,
            level,
            cost,
        });
        tracing::debug!(?stat, level, cost, "upgrade purchased");
        Ok(level)
    }

    /// Hire a new worker of the given role. Cost follows the role's hire
    /// table indexed by how many of that role are already owned.
    pub fn hire_worker(&mut self, role: WorkerRole) -> Result<WorkerId> {
        let owned = self
            .workers
            .iter()
            .filter(|w| w.role_kind() == role)
            .count();
        let cost = economy::hire_cost(role, owned);
        self.counters.spend(cost)?;

        let id = WorkerId(self.next_worker_id);
        self.next_worker_id += 1;
        let stamina =
            self.config.base_max_stamina * self.levels.multiplier(UpgradeStat::WorkDuration);
        self.workers
            .push(Worker::new(id, role, self.config.rest_position, stamina));
        self.queued_events.push(SimEvent::WorkerHired {
            worker: id,
            role,
            cost,
        });
        tracing::debug!(?role, ?id, cost, "worker hired");
        Ok(id)
    }
}
