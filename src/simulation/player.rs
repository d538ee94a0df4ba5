//! Player avatar - externally steered, simulation-resolved
//!
//! The input collaborator only sets a desired movement direction and
//! requests chops; everything that mutates world state (damage, pickup,
//! selling) resolves inside the simulation's player phase so the frame's
//! phase ordering holds.

use crate::core::types::{Facing, Vec2};
use crate::economy::UpgradeStat;
use crate::simulation::tick::{Actor, SimEvent};
use crate::workers::WorkerContext;

/// The player's avatar state
#[derive(Debug, Clone)]
pub struct Player {
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing: Facing,
    /// Wood picked up from drops, bounded by effective carry capacity
    pub carried: u32,
    /// Desired movement direction from the input collaborator; normalized
    /// before use, zero when no key is held
    pub move_dir: Vec2,
    /// Seconds until the next chop may land
    pub swing_cooldown: f32,
}

impl Player {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::default(),
            facing: Facing::default(),
            carried: 0,
            move_dir: Vec2::default(),
            swing_cooldown: 0.0,
        }
    }
}

/// Effective player carry capacity under the shared capacity upgrade
pub fn effective_capacity(ctx: &WorkerContext) -> u32 {
    (ctx.config.player_base_capacity as f32 * ctx.levels.multiplier(UpgradeStat::CarryCapacity))
        .floor() as u32
}

/// One player phase: movement integration, chop resolution, drop pickup
pub fn update_player(player: &mut Player, chop_requested: bool, ctx: &mut WorkerContext) {
    let speed =
        ctx.config.player_base_speed * ctx.levels.multiplier(UpgradeStat::MoveSpeed);

    player.velocity = player.move_dir.normalize() * speed;
    player.position += player.velocity * ctx.dt;
    player.facing = player.facing.from_dx(player.velocity.x);
    ctx.chunks
        .push_out_of_trees(&mut player.position, ctx.config.body_radius);

    player.swing_cooldown = (player.swing_cooldown - ctx.dt).max(0.0);
    if chop_requested && player.swing_cooldown <= 0.0 {
        resolve_chop(player, ctx);
    }

    pickup_nearby_drops(player, ctx);
}

/// Swing at the nearest live tree in reach; a miss still ends the attempt
fn resolve_chop(player: &mut Player, ctx: &mut WorkerContext) {
    let target = ctx
        .chunks
        .nearest_live_tree(player.position, ctx.config.player_reach, |_| true);
    let Some(tree_id) = target else {
        return;
    };

    player.swing_cooldown = ctx.config.player_swing_seconds
        / ctx.levels.multiplier(UpgradeStat::ChopSpeed);

    let power = ctx.config.player_base_power * ctx.levels.multiplier(UpgradeStat::AxePower);
    let respawn = ctx.config.tree_respawn_seconds;
    let Some(tree) = ctx.chunks.tree_mut(tree_id) else {
        return;
    };
    let killed = tree.damage(power, respawn);
    let tree_pos = tree.position;
    ctx.effects.spawn_chop_burst(tree_pos);
    if killed {
        let amount = tree.species.wood_yield();
        let drop = ctx
            .drops
            .spawn(tree_pos, amount, ctx.config.drop_lifetime_seconds);
        ctx.counters.total_wood_chopped += amount as u64;
        ctx.events.push(SimEvent::TreeFelled {
            tree: tree_id,
            by: Actor::Player,
            amount,
        });
        ctx.events.push(SimEvent::DropSpawned {
            drop,
            position: tree_pos,
            amount,
        });
    }
}

/// Vacuum drops within pickup radius into the player's carry, up to
/// effective capacity
fn pickup_nearby_drops(player: &mut Player, ctx: &mut WorkerContext) {
    let capacity = effective_capacity(ctx);
    loop {
        let space = capacity.saturating_sub(player.carried);
        if space == 0 {
            return;
        }
        let Some(drop_id) =
            ctx.drops
                .nearest(player.position, ctx.config.pickup_radius, |_| true)
        else {
            return;
        };
        let taken = ctx.drops.take_from(drop_id, space);
        if taken == 0 {
            return;
        }
        player.carried += taken;
        ctx.events.push(SimEvent::DropPickedUp {
            drop: drop_id,
            amount: taken,
        });
    }
}
