//! Simulation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other. Values can be overridden from a
//! TOML tuning file without recompiling; missing fields keep their defaults.

use crate::core::types::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in world units reserved for static structures.
///
/// Chunk generation rejects any tree position falling inside a clear zone,
/// keeping the base area (rest hut, sell stall) free of trunks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClearZone {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ClearZone {
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= self.x
            && pos.x <= self.x + self.width
            && pos.y >= self.y
            && pos.y <= self.y + self.height
    }
}

/// Configuration for the simulation systems
///
/// These values have been tuned to produce good pacing for the early game.
/// Changing them affects balance, not correctness: structural contracts
/// (curve shapes, phase ordering, determinism) live in code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === WORLD LAYOUT ===
    /// Side length of one square chunk (world units)
    ///
    /// Larger chunks mean fewer map entries but coarser load/evict
    /// granularity around the viewer.
    pub chunk_size: f32,

    /// How many chunks in each direction stay loaded around the viewer
    pub render_distance: i32,

    /// Extra chunk radius retained beyond render distance before eviction
    ///
    /// The hysteresis band prevents load/evict thrash when the viewer
    /// oscillates across a chunk boundary.
    pub retention_buffer: i32,

    /// Rectangles no tree may occupy, in world units
    pub clear_zones: Vec<ClearZone>,

    /// Where collectors sell and the player's sell stall stands
    pub base_position: Vec2,

    /// Where workers go to recover stamina
    pub rest_position: Vec2,

    // === GENERATION ===
    /// Minimum trees attempted per chunk (inclusive)
    pub min_trees_per_chunk: u32,

    /// Maximum trees attempted per chunk (inclusive)
    pub max_trees_per_chunk: u32,

    /// Placement attempts allowed per target tree before giving up
    ///
    /// At 4x, a chunk wanting 10 trees samples at most 40 positions. Dense
    /// clear zones can therefore produce fewer trees than the target; that
    /// is the contract, not a failure.
    pub placement_retry_factor: u32,

    /// Extra spacing added to each collision radius when testing
    /// tree/tree overlap during placement (world units)
    pub tree_padding: f32,

    // === TREE LIFECYCLE ===
    /// Seconds a felled tree stays down before regrowing at full health
    pub tree_respawn_seconds: f32,

    // === WOOD DROPS ===
    /// Seconds before an unclaimed drop despawns
    pub drop_lifetime_seconds: f32,

    /// Distance at which the player vacuums up drops (world units)
    pub pickup_radius: f32,

    /// Currency paid per unit of wood at the sell point
    pub wood_price: u64,

    /// Distance from the base position that counts as "at the sell point"
    pub sell_radius: f32,

    // === WORKERS ===
    /// Distance within which workers count as "arrived" at a target
    pub arrive_radius: f32,

    /// How far a chopper scans for live unclaimed trees
    pub chopper_search_radius: f32,

    /// How far a collector scans for unclaimed drops
    ///
    /// Wider than the chopper radius: drops appear wherever choppers kill,
    /// so collectors must range further to keep up.
    pub collector_search_radius: f32,

    /// Seconds between successive chopper swings
    pub worker_swing_seconds: f32,

    /// Damage per swing at worker-power level 1
    pub chopper_base_power: f32,

    /// Worker travel speed at worker-speed level 1 (units/second)
    pub worker_base_speed: f32,

    /// Collector carry capacity at carry-capacity level 1 (wood units)
    pub collector_base_capacity: u32,

    /// Worker stamina pool at work-duration level 1
    pub base_max_stamina: f32,

    /// Stamina spent per successful chopper swing
    pub swing_stamina_cost: f32,

    /// Stamina spent per unit of wood a collector picks up
    pub carry_stamina_cost: f32,

    /// Stamina recovered per second of rest at rest-speed level 1
    pub base_rest_rate: f32,

    /// Minimum seconds a worker stays at the rest hut, before the
    /// rest-speed multiplier is applied
    pub base_rest_seconds: f32,

    /// Collision disc radius for workers and the player (world units)
    pub body_radius: f32,

    // === PLAYER ===
    /// Player travel speed at move-speed level 1 (units/second)
    pub player_base_speed: f32,

    /// Player damage per chop at axe-power level 1
    pub player_base_power: f32,

    /// Maximum distance from the player to a tree it can chop
    pub player_reach: f32,

    /// Player carry capacity at carry-capacity level 1 (wood units)
    pub player_base_capacity: u32,

    /// Seconds between player chops at chop-speed level 1
    pub player_swing_seconds: f32,

    // === TICK ===
    /// Ceiling applied to the per-frame delta (seconds)
    ///
    /// A stalled frame otherwise arrives with a huge dt and teleports
    /// every mover through trees and targets.
    pub max_frame_delta: f32,

    /// Currency balance a fresh simulation starts with
    pub starting_currency: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            chunk_size: 800.0,
            render_distance: 1,
            retention_buffer: 1,
            clear_zones: vec![ClearZone {
                x: -160.0,
                y: -120.0,
                width: 320.0,
                height: 240.0,
            }],
            base_position: Vec2::new(80.0, 0.0),
            rest_position: Vec2::new(-80.0, 0.0),
            min_trees_per_chunk: 6,
            max_trees_per_chunk: 14,
            placement_retry_factor: 4,
            tree_padding: 6.0,
            tree_respawn_seconds: 30.0,
            drop_lifetime_seconds: 45.0,
            pickup_radius: 20.0,
            wood_price: 5,
            sell_radius: 40.0,
            arrive_radius: 12.0,
            chopper_search_radius: 600.0,
            collector_search_radius: 900.0,
            worker_swing_seconds: 1.2,
            chopper_base_power: 1.0,
            worker_base_speed: 90.0,
            collector_base_capacity: 10,
            base_max_stamina: 100.0,
            swing_stamina_cost: 4.0,
            carry_stamina_cost: 1.5,
            base_rest_rate: 10.0,
            base_rest_seconds: 6.0,
            body_radius: 10.0,
            player_base_speed: 140.0,
            player_base_power: 1.0,
            player_reach: 48.0,
            player_base_capacity: 10,
            player_swing_seconds: 0.5,
            max_frame_delta: 0.1,
            starting_currency: 0,
        }
    }
}

impl SimulationConfig {
    /// Parse a TOML tuning overlay; unspecified fields keep their defaults
    pub fn from_toml_str(content: &str) -> crate::core::error::Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| crate::core::error::SimError::ConfigError(e.to_string()))?;
        Ok(config)
    }
}
