//! Save/restore of session state
//!
//! A snapshot records the coarse economic and agent state plus the
//! respawn timers of currently-dead trees. World geometry is never
//! stored; restoring regenerates it from the world seed and replays the
//! dead-tree overrides as their chunks load.

use crate::core::error::{Result, SimError};
use crate::core::types::{TreeId, Vec2, WorkerId};
use crate::economy::{Counters, UpgradeLevels, UpgradeStat};
use crate::simulation::Simulation;
use crate::workers::{RoleState, Worker};
use crate::world::chunks::ChunkStore;
use serde::{Deserialize, Serialize};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub position: Vec2,
    pub carried: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerRecord {
    pub id: WorkerId,
    pub position: Vec2,
    pub stamina: f32,
    pub rest_timer: f32,
    pub role: RoleState,
}

/// A dead tree's remaining respawn time, keyed by its deterministic id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeOverride {
    pub id: TreeId,
    pub respawn_timer: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveSnapshot {
    pub version: u32,
    pub world_seed: u64,
    pub counters: Counters,
    pub levels: UpgradeLevels,
    pub player: PlayerRecord,
    pub workers: Vec<WorkerRecord>,
    pub tree_overrides: Vec<TreeOverride>,
}

impl SaveSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: SaveSnapshot = serde_json::from_str(json)?;
        match snapshot.version {
            SNAPSHOT_VERSION => Ok(snapshot),
            other => Err(SimError::UnsupportedSnapshotVersion(other)),
        }
    }
}

impl Simulation {
    /// Capture the current session as a snapshot.
    pub fn snapshot(&self) -> SaveSnapshot {
        let mut tree_overrides: Vec<TreeOverride> = self
            .chunks
            .iter_trees()
            .filter(|t| t.dead)
            .map(|t| TreeOverride {
                id: t.id,
                respawn_timer: t.respawn_timer,
            })
            .collect();
        // overrides whose chunk was evicted before they could land are
        // still live state and must survive the save
        for (&id, &respawn_timer) in &self.pending_overrides {
            tree_overrides.push(TreeOverride { id, respawn_timer });
        }

        SaveSnapshot {
            version: SNAPSHOT_VERSION,
            world_seed: self.chunks.world_seed(),
            counters: self.counters.clone(),
            levels: self.levels.clone(),
            player: PlayerRecord {
                position: self.player.position,
                carried: self.player.carried,
            },
            workers: self
                .workers
                .iter()
                .map(|w| WorkerRecord {
                    id: w.id,
                    position: w.position,
                    stamina: w.stamina,
                    rest_timer: w.rest_timer,
                    role: w.role.clone(),
                })
                .collect(),
            tree_overrides,
        }
    }

    /// Replace the session state with a snapshot's.
    ///
    /// Untrusted fields are clamped rather than rejected: levels below 1
    /// come up to 1, stamina and carried wood come down to the effective
    /// caps implied by the restored levels. The chunk store is rebuilt
    /// from scratch even when the seed matches the running session, so
    /// that dead trees the snapshot does not mention come back alive and
    /// its overrides land on the regenerated chunks. Overrides for chunks
    /// outside the restored view stay pending until those chunks load.
    pub fn restore(&mut self, snapshot: &SaveSnapshot) {
        self.chunks = ChunkStore::new(snapshot.world_seed);

        self.counters = snapshot.counters.clone();
        self.levels = snapshot.levels.clone();
        self.levels.sanitize();

        self.player.position = snapshot.player.position;
        self.player.velocity = Vec2::default();
        self.player.move_dir = Vec2::default();
        self.player.swing_cooldown = 0.0;
        let capacity = (self.config.player_base_capacity as f32
            * self.levels.multiplier(UpgradeStat::CarryCapacity))
        .floor() as u32;
        self.player.carried = snapshot.player.carried.min(capacity);

        let max_stamina =
            self.config.base_max_stamina * self.levels.multiplier(UpgradeStat::WorkDuration);
        self.workers = snapshot
            .workers
            .iter()
            .map(|record| Worker {
                id: record.id,
                position: record.position,
                velocity: Vec2::default(),
                facing: Default::default(),
                stamina: record.stamina.clamp(0.0, max_stamina),
                rest_timer: record.rest_timer.max(0.0),
                role: record.role.clone(),
            })
            .collect();
        self.next_worker_id = self
            .workers
            .iter()
            .map(|w| w.id.0 + 1)
            .max()
            .unwrap_or(0);

        self.drops = Default::default();
        self.effects.clear();
        self.chop_requested = false;
        self.queued_events.clear();
        self.tick_count = 0;

        self.pending_overrides.clear();
        for over in &snapshot.tree_overrides {
            self.pending_overrides
                .insert(over.id, over.respawn_timer.max(0.0));
        }

        // regenerate the neighborhood and land overrides on loaded chunks
        let maintenance = self
            .chunks
            .ensure_visible(self.player.position, &self.config);
        for coord in maintenance.loaded {
            self.apply_pending_overrides(coord);
        }

        tracing::debug!(
            seed = snapshot.world_seed,
            workers = self.workers.len(),
            overrides = self.pending_overrides.len(),
            "session restored"
        );
    }
}
