//! Chunk store - loads, retains and evicts forest chunks around the viewer

use crate::core::config::SimulationConfig;
use crate::core::types::{ChunkCoord, TreeId, Vec2};
use crate::world::trees::Tree;
use crate::worldgen::generate_chunk;
use ahash::AHashMap;

/// A fixed-size square tile of world space and its generated trees.
///
/// Trees are kept sorted y-ascending; rendering composites them in list
/// order. Lookups go by id, not index - the sort order is independent of
/// slot assignment.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub coord: ChunkCoord,
    pub trees: Vec<Tree>,
}

impl Chunk {
    pub fn new(coord: ChunkCoord, trees: Vec<Tree>) -> Self {
        Self { coord, trees }
    }

    pub fn tree(&self, id: TreeId) -> Option<&Tree> {
        self.trees.iter().find(|t| t.id == id)
    }

    pub fn tree_mut(&mut self, id: TreeId) -> Option<&mut Tree> {
        self.trees.iter_mut().find(|t| t.id == id)
    }
}

/// Result of one chunk maintenance pass
#[derive(Debug, Default)]
pub struct ChunkMaintenance {
    pub loaded: Vec<ChunkCoord>,
    pub evicted: Vec<ChunkCoord>,
}

/// Mapping of chunk coordinate to generated chunk.
///
/// Chunks within `render_distance` of the viewer are generated on demand;
/// chunks beyond `render_distance + retention_buffer` are deleted outright.
/// Regeneration is deterministic, so eviction loses nothing but lifecycle
/// state - which the snapshot layer reapplies when needed.
pub struct ChunkStore {
    chunks: AHashMap<ChunkCoord, Chunk>,
    world_seed: u64,
}

impl ChunkStore {
    pub fn new(world_seed: u64) -> Self {
        Self {
            chunks: AHashMap::new(),
            world_seed,
        }
    }

    pub fn world_seed(&self) -> u64 {
        self.world_seed
    }

    /// Load every chunk within render distance of the viewer and evict
    /// everything outside the retention radius.
    pub fn ensure_visible(
        &mut self,
        viewer: Vec2,
        config: &SimulationConfig,
    ) -> ChunkMaintenance {
        let center = ChunkCoord::containing(viewer, config.chunk_size);
        let mut result = ChunkMaintenance::default();

        for dy in -config.render_distance..=config.render_distance {
            for dx in -config.render_distance..=config.render_distance {
                let coord = ChunkCoord::new(center.cx + dx, center.cy + dy);
                if !self.chunks.contains_key(&coord) {
                    let chunk = generate_chunk(coord, self.world_seed, config);
                    tracing::debug!(?coord, trees = chunk.trees.len(), "loaded chunk");
                    let _ = self.chunks.insert(coord, chunk);
                    result.loaded.push(coord);
                }
            }
        }

        let retain_radius = config.render_distance + config.retention_buffer;
        let evicted: Vec<ChunkCoord> = self
            .chunks
            .keys()
            .filter(|c| c.chebyshev_distance(&center) > retain_radius)
            .copied()
            .collect();
        for coord in &evicted {
            let _ = self.chunks.remove(coord);
            tracing::debug!(?coord, "evicted chunk");
        }
        result.evicted = evicted;

        result
    }

    pub fn get(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    pub fn loaded_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn iter_chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    pub fn iter_trees(&self) -> impl Iterator<Item = &Tree> {
        self.chunks.values().flat_map(|c| c.trees.iter())
    }

    pub fn iter_trees_mut(&mut self) -> impl Iterator<Item = &mut Tree> {
        self.chunks.values_mut().flat_map(|c| c.trees.iter_mut())
    }

    pub fn tree(&self, id: TreeId) -> Option<&Tree> {
        self.chunks.get(&id.chunk).and_then(|c| c.tree(id))
    }

    pub fn tree_mut(&mut self, id: TreeId) -> Option<&mut Tree> {
        self.chunks.get_mut(&id.chunk).and_then(|c| c.tree_mut(id))
    }

    /// Count down respawn timers on every loaded dead tree
    pub fn tick_respawns(&mut self, dt: f32) {
        for tree in self.iter_trees_mut() {
            tree.tick_respawn(dt);
        }
    }

    /// Nearest live tree within `radius` of `from` that the filter accepts.
    ///
    /// Linear scan over loaded trees; at render-distance scale that is a
    /// few dozen entries. Ties resolve to whichever scans first.
    pub fn nearest_live_tree<F>(&self, from: Vec2, radius: f32, accept: F) -> Option<TreeId>
    where
        F: Fn(TreeId) -> bool,
    {
        let radius_sq = radius * radius;
        let mut best: Option<(TreeId, f32)> = None;
        for tree in self.iter_trees() {
            if !tree.is_alive() || !accept(tree.id) {
                continue;
            }
            let dist_sq = from.distance_squared(&tree.position);
            if dist_sq > radius_sq {
                continue;
            }
            if best.map_or(true, |(_, d)| dist_sq < d) {
                best = Some((tree.id, dist_sq));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Collision standoff enforced at `pos`: the largest trunk-plus-body
    /// gap of any live tree whose disc covers a body standing there, zero
    /// in open ground. Arrival checks add this so a target sitting on a
    /// trunk stays reachable despite push-out.
    pub fn standoff_at(&self, pos: Vec2, body_radius: f32) -> f32 {
        let mut standoff = 0.0f32;
        for tree in self.iter_trees() {
            if !tree.is_alive() {
                continue;
            }
            let min_gap = tree.species.collision_radius() + body_radius;
            if pos.distance_squared(&tree.position) < min_gap * min_gap {
                standoff = standoff.max(min_gap);
            }
        }
        standoff
    }

    /// Positional correction against tree trunks: any mover whose disc
    /// overlaps a live tree's disc is pushed straight away from the trunk
    /// center by the overlap amount. Not a force model - just a correction
    /// applied after movement integration each tick.
    pub fn push_out_of_trees(&self, position: &mut Vec2, body_radius: f32) {
        for tree in self.iter_trees() {
            if !tree.is_alive() {
                continue;
            }
            let min_gap = tree.species.collision_radius() + body_radius;
            let dist_sq = position.distance_squared(&tree.position);
            if dist_sq >= min_gap * min_gap {
                continue;
            }
            let dist = dist_sq.sqrt();
            let away = if dist > 0.0001 {
                (*position - tree.position) * (1.0 / dist)
            } else {
                Vec2::new(1.0, 0.0)
            };
            *position += away * (min_gap - dist);
        }
    }
}
