//! Per-frame advance - orchestrates simulation phases in fixed order
//!
//! One external clock driver calls [`Simulation::advance`] once per frame
//! with the elapsed delta. Phases always run in the same order:
//! chunk maintenance -> tree aging -> player action resolution -> worker
//! updates -> ephemeral decay. Everything is synchronous and sequential;
//! collaborators read state between frames, never during one.

use crate::core::types::{ChunkCoord, DropId, TreeId, Vec2, WorkerId};
use crate::economy::UpgradeStat;
use crate::simulation::player;
use crate::simulation::Simulation;
use crate::workers::{update_workers, WorkerContext, WorkerRole};

/// Who performed an economy-visible action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Player,
    Worker(WorkerId),
}

/// Events generated during a simulation frame, for the UI action log
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    /// A chunk entered the visible radius and was generated
    ChunkLoaded { coord: ChunkCoord },
    /// A chunk left the retention radius and was deleted
    ChunkEvicted { coord: ChunkCoord },
    /// A tree's health reached zero
    TreeFelled { tree: TreeId, by: Actor, amount: u32 },
    /// Wood appeared on the ground where a tree fell
    DropSpawned {
        drop: DropId,
        position: Vec2,
        amount: u32,
    },
    /// A collector transferred wood out of a drop
    DropCollected {
        drop: DropId,
        worker: WorkerId,
        amount: u32,
    },
    /// The player walked over a drop and vacuumed it up
    DropPickedUp { drop: DropId, amount: u32 },
    /// A drop despawned unclaimed
    DropExpired { drop: DropId },
    /// Carried wood was converted to currency at the sell point
    WoodSold { by: Actor, units: u32, earned: u64 },
    /// A new worker joined the roster
    WorkerHired {
        worker: WorkerId,
        role: WorkerRole,
        cost: u64,
    },
    /// An upgrade level was bought
    UpgradePurchased {
        stat: UpgradeStat,
        level: u32,
        cost: u64,
    },
    /// A worker reached the rest hut and lay down
    WorkerStartedResting { worker: WorkerId },
    /// A worker finished its rest cycle
    WorkerWoke { worker: WorkerId },
}

impl Simulation {
    /// Advance the simulation by one frame.
    ///
    /// `dt` is clamped to `config.max_frame_delta` so a stalled frame
    /// cannot teleport movers or skip whole respawn windows. Returns the
    /// events of this frame, including any queued by command entry points
    /// since the previous one.
    pub fn advance(&mut self, dt: f32) -> Vec<SimEvent> {
        let dt = dt.clamp(0.0, self.config.max_frame_delta);
        let mut events = std::mem::take(&mut self.queued_events);

        // 1. chunk maintenance around the viewer
        let maintenance = self.chunks.ensure_visible(self.player.position, &self.config);
        for coord in maintenance.loaded {
            self.apply_pending_overrides(coord);
            events.push(SimEvent::ChunkLoaded { coord });
        }
        for coord in maintenance.evicted {
            events.push(SimEvent::ChunkEvicted { coord });
        }

        // 2. tree aging
        self.chunks.tick_respawns(dt);

        // 3. player action resolution
        let chop_requested = std::mem::take(&mut self.chop_requested);
        let mut ctx = WorkerContext {
            config: &self.config,
            levels: &self.levels,
            chunks: &mut self.chunks,
            drops: &mut self.drops,
            counters: &mut self.counters,
            effects: &mut self.effects,
            events: &mut events,
            dt,
        };
        player::update_player(&mut self.player, chop_requested, &mut ctx);

        // 4. worker updates
        update_workers(&mut self.workers, &mut ctx);

        // 5. ephemeral decay
        for drop in self.drops.tick(dt) {
            events.push(SimEvent::DropExpired { drop });
        }
        self.effects.tick(dt);

        self.tick_count += 1;
        events
    }

    /// Reapply saved lifecycle state onto a freshly generated chunk.
    ///
    /// Generation is deterministic but respawn timers are not derivable
    /// from the seed, so restored saves park them here until the owning
    /// chunk loads.
    pub(crate) fn apply_pending_overrides(&mut self, coord: ChunkCoord) {
        if self.pending_overrides.is_empty() {
            return;
        }
        let Some(chunk) = self.chunks.get(coord) else {
            return;
        };
        let ids: Vec<TreeId> = chunk
            .trees
            .iter()
            .map(|t| t.id)
            .filter(|id| self.pending_overrides.contains_key(id))
            .collect();
        for id in ids {
            let Some(seconds) = self.pending_overrides.remove(&id) else {
                continue;
            };
            if seconds <= 0.0 {
                continue;
            }
            if let Some(tree) = self.chunks.tree_mut(id) {
                tree.health = 0.0;
                tree.dead = true;
                tree.respawn_timer = seconds;
            }
        }
    }
}
