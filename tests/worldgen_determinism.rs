//! Property tests for chunk generation
//!
//! Generation must be a pure function of (seed, coordinate, config):
//! regenerating a chunk yields identical trees, and no two trees in a
//! chunk may overlap once padded by their collision radii.

use proptest::prelude::*;
use timberline::core::config::SimulationConfig;
use timberline::core::types::ChunkCoord;
use timberline::worldgen::generate_chunk;

proptest! {
    #[test]
    fn regeneration_is_identical(seed in any::<u64>(), cx in -50i32..50, cy in -50i32..50) {
        let config = SimulationConfig::default();
        let coord = ChunkCoord::new(cx, cy);
        let a = generate_chunk(coord, seed, &config);
        let b = generate_chunk(coord, seed, &config);

        prop_assert_eq!(a.trees.len(), b.trees.len());
        for (ta, tb) in a.trees.iter().zip(&b.trees) {
            prop_assert_eq!(ta.id, tb.id);
            prop_assert_eq!(ta.species, tb.species);
            prop_assert_eq!(ta.variant, tb.variant);
            prop_assert!((ta.position.x - tb.position.x).abs() < f32::EPSILON);
            prop_assert!((ta.position.y - tb.position.y).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn trees_never_overlap(seed in any::<u64>(), cx in -50i32..50, cy in -50i32..50) {
        let config = SimulationConfig::default();
        let coord = ChunkCoord::new(cx, cy);
        let chunk = generate_chunk(coord, seed, &config);

        for (i, a) in chunk.trees.iter().enumerate() {
            for b in &chunk.trees[i + 1..] {
                // each disc carries its own padding
                let min = a.species.collision_radius()
                    + b.species.collision_radius()
                    + 2.0 * config.tree_padding;
                let dist = a.position.distance(&b.position);
                prop_assert!(
                    dist >= min - 1e-3,
                    "trees {:?} and {:?} are {} apart, need {}",
                    a.id, b.id, dist, min
                );
            }
        }
    }

    #[test]
    fn tree_count_stays_in_bounds(seed in any::<u64>(), cx in -50i32..50, cy in -50i32..50) {
        let config = SimulationConfig::default();
        let chunk = generate_chunk(ChunkCoord::new(cx, cy), seed, &config);
        // overlap and clear-zone rejection may undershoot the target but
        // never exceed it
        prop_assert!(chunk.trees.len() <= config.max_trees_per_chunk as usize);
    }

    #[test]
    fn seeds_diverge(cx in -50i32..50, cy in -50i32..50) {
        let config = SimulationConfig::default();
        let coord = ChunkCoord::new(cx, cy);
        let a = generate_chunk(coord, 1, &config);
        let b = generate_chunk(coord, 2, &config);
        let same = a.trees.len() == b.trees.len()
            && a.trees
                .iter()
                .zip(&b.trees)
                .all(|(x, y)| x.position.distance(&y.position) < f32::EPSILON);
        prop_assert!(!same, "different world seeds produced an identical chunk");
    }
}
