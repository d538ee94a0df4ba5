//! Tree species and the health/respawn lifecycle

use crate::core::types::{TreeId, Vec2};
use serde::{Deserialize, Serialize};

/// Tree species, fixing base health, wood yield, collision radius and
/// rarity. Rarer species are tougher and yield more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Oak,
    Birch,
    Pine,
    Elder,
}

impl Species {
    pub const ALL: [Species; 4] = [Species::Oak, Species::Birch, Species::Pine, Species::Elder];

    /// Health a freshly grown tree starts with
    pub fn base_health(self) -> f32 {
        match self {
            Species::Oak => 5.0,
            Species::Birch => 3.0,
            Species::Pine => 8.0,
            Species::Elder => 20.0,
        }
    }

    /// Wood units dropped when the tree is felled
    pub fn wood_yield(self) -> u32 {
        match self {
            Species::Oak => 3,
            Species::Birch => 2,
            Species::Pine => 5,
            Species::Elder => 12,
        }
    }

    /// Trunk collision disc radius in world units
    pub fn collision_radius(self) -> f32 {
        match self {
            Species::Oak => 14.0,
            Species::Birch => 10.0,
            Species::Pine => 16.0,
            Species::Elder => 22.0,
        }
    }

    /// Relative rarity weight used by generation's cumulative table
    pub fn rarity_weight(self) -> f32 {
        match self {
            Species::Oak => 0.45,
            Species::Birch => 0.30,
            Species::Pine => 0.20,
            Species::Elder => 0.05,
        }
    }

    /// Number of cosmetic sprite variants per species
    pub fn variant_count(self) -> u8 {
        match self {
            Species::Oak => 3,
            Species::Birch => 2,
            Species::Pine => 3,
            Species::Elder => 1,
        }
    }
}

/// A single tree within a chunk.
///
/// Invariant: dead implies `health == 0.0` and `respawn_timer >= 0.0`;
/// alive implies `0.0 < health <= max_health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub id: TreeId,
    pub position: Vec2,
    pub species: Species,
    /// Cosmetic sprite variant index, below `species.variant_count()`
    pub variant: u8,
    pub health: f32,
    pub max_health: f32,
    pub dead: bool,
    /// Seconds until a dead tree regrows; 0 while alive
    pub respawn_timer: f32,
}

impl Tree {
    pub fn new(id: TreeId, position: Vec2, species: Species, variant: u8) -> Self {
        let health = species.base_health();
        Self {
            id,
            position,
            species,
            variant,
            health,
            max_health: health,
            dead: false,
            respawn_timer: 0.0,
        }
    }

    /// Apply chop damage. Returns true exactly when this call killed the
    /// tree; the caller spawns the wood drop and credits counters off that
    /// signal. Damaging a dead tree is a no-op.
    pub fn damage(&mut self, amount: f32, respawn_seconds: f32) -> bool {
        if self.dead {
            return false;
        }
        self.health -= amount;
        if self.health <= 0.0 {
            self.health = 0.0;
            self.dead = true;
            self.respawn_timer = respawn_seconds;
            return true;
        }
        false
    }

    /// Count down the respawn timer; revives at full health when it runs
    /// out. Live trees are untouched.
    pub fn tick_respawn(&mut self, dt: f32) {
        if !self.dead {
            return;
        }
        self.respawn_timer -= dt;
        if self.respawn_timer <= 0.0 {
            self.dead = false;
            self.health = self.max_health;
            self.respawn_timer = 0.0;
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.dead
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ChunkCoord;

    fn oak() -> Tree {
        Tree::new(
            TreeId::new(ChunkCoord::new(0, 0), 0),
            Vec2::new(10.0, 20.0),
            Species::Oak,
            0,
        )
    }

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut tree = oak();
        let killed = tree.damage(1000.0, 30.0);
        assert!(killed);
        assert_eq!(tree.health, 0.0);
        assert!(tree.dead);
        assert_eq!(tree.respawn_timer, 30.0);
    }

    #[test]
    fn test_exactly_one_call_reports_the_kill() {
        let mut tree = oak();
        // Oak has 5 health; five 1-power swings
        for _ in 0..4 {
            assert!(!tree.damage(1.0, 30.0));
            assert!(tree.is_alive());
        }
        assert!(tree.damage(1.0, 30.0));
        assert!(tree.dead);
        // further damage is a no-op returning false
        assert!(!tree.damage(1.0, 30.0));
        assert_eq!(tree.health, 0.0);
    }

    #[test]
    fn test_respawn_requires_full_duration() {
        let mut tree = oak();
        let _ = tree.damage(10.0, 30.0);

        tree.tick_respawn(29.9);
        assert!(tree.dead, "must not revive early");

        tree.tick_respawn(0.2);
        assert!(tree.is_alive());
        assert_eq!(tree.health, tree.max_health);
        assert_eq!(tree.respawn_timer, 0.0);
    }

    #[test]
    fn test_tick_respawn_ignores_live_trees() {
        let mut tree = oak();
        tree.health = 2.0;
        tree.tick_respawn(100.0);
        assert_eq!(tree.health, 2.0);
        assert!(tree.is_alive());
    }

    #[test]
    fn test_rarity_weights_sum_to_one() {
        let total: f32 = Species::ALL.iter().map(|s| s.rarity_weight()).sum();
        assert!((total - 1.0).abs() < 1e-6);
    }
}
