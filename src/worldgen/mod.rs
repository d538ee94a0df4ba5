//! Deterministic chunk generation
//!
//! `generate_chunk` is a pure function of (chunk coordinate, world seed,
//! config): the same triple always yields bit-identical tree placement.
//! Chunks can therefore be evicted and regenerated at will without
//! persisting their layout; only lifecycle state (respawn timers) needs
//! saving, and that is keyed by slot-stable [`TreeId`]s.

pub mod prng;

use crate::core::config::SimulationConfig;
use crate::core::types::{ChunkCoord, TreeId, Vec2};
use crate::world::chunks::Chunk;
use crate::world::trees::{Species, Tree};
use prng::ChunkRng;

/// Multiply-xor-shift finalizer (the murmur3 constants); diffuses chunk
/// coordinates so neighboring chunks get unrelated streams.
fn mix(mut h: u64) -> u64 {
    h ^= h >> 33;
    h = h.wrapping_mul(0xff51_afd7_ed55_8ccd);
    h ^= h >> 33;
    h = h.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    h ^= h >> 33;
    h
}

/// Per-chunk seed from the coordinate pair and the world seed
fn chunk_seed(coord: ChunkCoord, world_seed: u64) -> u64 {
    let x = coord.cx as i64 as u64;
    let y = coord.cy as i64 as u64;
    mix(world_seed
        ^ x.wrapping_mul(0x9e37_79b9_7f4a_7c15)
        ^ y.wrapping_mul(0xc2b2_ae3d_27d4_eb4f))
}

/// Cumulative-weight species pick; rarer species occupy smaller bands
fn pick_species(rng: &mut ChunkRng) -> Species {
    let roll = rng.next();
    let mut cumulative = 0.0;
    for species in Species::ALL {
        cumulative += species.rarity_weight();
        if roll < cumulative {
            return species;
        }
    }
    // float rounding can leave the cumulative sum a hair under 1.0
    Species::Elder
}

/// Generate the forest for one chunk.
///
/// Placement is rejection sampling with a bounded retry budget
/// (`placement_retry_factor` attempts per target tree): a candidate is
/// dropped if it falls inside a configured clear zone or if its padded
/// collision disc overlaps an already-accepted tree. Exhausting the budget
/// returns fewer trees than the target; generation never loops unbounded.
///
/// The returned tree list is sorted y-ascending, which rendering relies on
/// for draw order. Slot ids are assigned in acceptance order before the
/// sort, so they are stable regardless of the final ordering.
pub fn generate_chunk(coord: ChunkCoord, world_seed: u64, config: &SimulationConfig) -> Chunk {
    let mut rng = ChunkRng::new(chunk_seed(coord, world_seed));

    let target = rng.range_u32(config.min_trees_per_chunk, config.max_trees_per_chunk);
    let budget = target * config.placement_retry_factor;

    let origin_x = coord.cx as f32 * config.chunk_size;
    let origin_y = coord.cy as f32 * config.chunk_size;

    let mut trees: Vec<Tree> = Vec::with_capacity(target as usize);

    for _ in 0..budget {
        if trees.len() >= target as usize {
            break;
        }

        let position = Vec2::new(
            rng.range(origin_x, origin_x + config.chunk_size),
            rng.range(origin_y, origin_y + config.chunk_size),
        );
        let species = pick_species(&mut rng);
        let variant = rng.range_u32(0, species.variant_count() as u32 - 1) as u8;

        if config.clear_zones.iter().any(|z| z.contains(position)) {
            continue;
        }

        // both discs are padded, so the enforced gap is the sum of the
        // two padded radii
        let radius = species.collision_radius() + config.tree_padding;
        let overlaps = trees.iter().any(|other| {
            let min_gap = radius + other.species.collision_radius() + config.tree_padding;
            position.distance_squared(&other.position) < min_gap * min_gap
        });
        if overlaps {
            continue;
        }

        let slot = trees.len() as u16;
        trees.push(Tree::new(
            TreeId::new(coord, slot),
            position,
            species,
            variant,
        ));
    }

    trees.sort_by(|a, b| {
        a.position
            .y
            .partial_cmp(&b.position.y)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Chunk::new(coord, trees)
}
