//! Wood drops - time-limited piles of harvested wood on the ground

use crate::core::types::{DropId, Vec2};
use serde::{Deserialize, Serialize};

/// A pickup-able pile of wood left where a tree fell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WoodDrop {
    pub id: DropId,
    pub position: Vec2,
    /// Wood units remaining; the pool removes the drop when this hits 0
    pub amount: u32,
    /// Seconds until the drop despawns unclaimed
    pub lifetime: f32,
    /// Cosmetic bob animation phase, advanced every tick
    pub bob_phase: f32,
}

/// Pool of live wood drops with monotonic id allocation.
///
/// The id counter lives here, owned by the simulation that owns the pool -
/// never module-level state.
#[derive(Debug, Default)]
pub struct DropPool {
    drops: Vec<WoodDrop>,
    next_id: u64,
}

impl DropPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, position: Vec2, amount: u32, lifetime: f32) -> DropId {
        let id = DropId(self.next_id);
        self.next_id += 1;
        self.drops.push(WoodDrop {
            id,
            position,
            amount,
            lifetime,
            // stagger bobbing so simultaneous drops don't move in lockstep
            bob_phase: (id.0 % 7) as f32 * 0.9,
        });
        id
    }

    /// Advance lifetimes and bob phases; returns the ids that expired
    pub fn tick(&mut self, dt: f32) -> Vec<DropId> {
        let mut expired = Vec::new();
        for drop in &mut self.drops {
            drop.lifetime -= dt;
            drop.bob_phase += dt;
            if drop.lifetime <= 0.0 {
                expired.push(drop.id);
            }
        }
        self.drops.retain(|d| d.lifetime > 0.0);
        expired
    }

    pub fn get(&self, id: DropId) -> Option<&WoodDrop> {
        self.drops.iter().find(|d| d.id == id)
    }

    /// Take up to `want` units from a drop, removing it when emptied.
    /// Returns the amount actually transferred (0 for a stale id).
    pub fn take_from(&mut self, id: DropId, want: u32) -> u32 {
        let Some(index) = self.drops.iter().position(|d| d.id == id) else {
            return 0;
        };
        let taken = self.drops[index].amount.min(want);
        self.drops[index].amount -= taken;
        if self.drops[index].amount == 0 {
            let _ = self.drops.swap_remove(index);
        }
        taken
    }

    pub fn iter(&self) -> impl Iterator<Item = &WoodDrop> {
        self.drops.iter()
    }

    pub fn len(&self) -> usize {
        self.drops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }

    /// Nearest drop with wood remaining within `radius` that the filter
    /// accepts
    pub fn nearest<F>(&self, from: Vec2, radius: f32, accept: F) -> Option<DropId>
    where
        F: Fn(DropId) -> bool,
    {
        let radius_sq = radius * radius;
        let mut best: Option<(DropId, f32)> = None;
        for drop in &self.drops {
            if drop.amount == 0 || !accept(drop.id) {
                continue;
            }
            let dist_sq = from.distance_squared(&drop.position);
            if dist_sq > radius_sq {
                continue;
            }
            if best.map_or(true, |(_, d)| dist_sq < d) {
                best = Some((drop.id, dist_sq));
            }
        }
        best.map(|(id, _)| id)
    }
}
