//! Economy model - upgrade curves, hire costs and cumulative counters
//!
//! Costs come from explicit hand-tuned tables; past the table's end every
//! further level doubles the last entry. Effective stats compound
//! geometrically: `base * growth^(level - 1)` with a per-stat growth
//! factor. Both curve shapes are balance contracts; the literal numbers
//! are tunable.

use crate::core::error::{Result, SimError};
use crate::workers::WorkerRole;
use serde::{Deserialize, Serialize};

/// Upgradeable stats. The first four apply to the player avatar; the rest
/// are shared by every hired worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeStat {
    AxePower,
    MoveSpeed,
    ChopSpeed,
    CarryCapacity,
    RestSpeed,
    WorkDuration,
    WorkerSpeed,
    WorkerPower,
}

impl UpgradeStat {
    pub const ALL: [UpgradeStat; 8] = [
        UpgradeStat::AxePower,
        UpgradeStat::MoveSpeed,
        UpgradeStat::ChopSpeed,
        UpgradeStat::CarryCapacity,
        UpgradeStat::RestSpeed,
        UpgradeStat::WorkDuration,
        UpgradeStat::WorkerSpeed,
        UpgradeStat::WorkerPower,
    ];

    /// Hand-tuned cost table; index 0 is the cost of leaving level 1
    fn cost_table(self) -> &'static [u64] {
        match self {
            UpgradeStat::AxePower => &[50, 150, 400, 1000, 2500],
            UpgradeStat::MoveSpeed => &[40, 120, 300, 750],
            UpgradeStat::ChopSpeed => &[60, 180, 450, 1100],
            UpgradeStat::CarryCapacity => &[50, 150, 400],
            UpgradeStat::RestSpeed => &[80, 200, 500],
            UpgradeStat::WorkDuration => &[80, 200, 500],
            UpgradeStat::WorkerSpeed => &[100, 250, 600],
            UpgradeStat::WorkerPower => &[120, 300, 750],
        }
    }

    /// Per-level compounding growth factor for the effective stat
    pub fn growth_factor(self) -> f32 {
        match self {
            UpgradeStat::AxePower => 1.4,
            UpgradeStat::MoveSpeed => 1.2,
            UpgradeStat::ChopSpeed => 1.15,
            UpgradeStat::CarryCapacity => 1.5,
            UpgradeStat::RestSpeed => 1.3,
            UpgradeStat::WorkDuration => 1.25,
            UpgradeStat::WorkerSpeed => 1.2,
            UpgradeStat::WorkerPower => 1.35,
        }
    }
}

/// Table lookup with doubling extrapolation past the end:
/// `cost(i) = table[last] * 2^(i - len + 1)` for `i >= len`.
pub fn extrapolated_cost(table: &[u64], index: usize) -> u64 {
    if let Some(&cost) = table.get(index) {
        return cost;
    }
    let last = table[table.len() - 1];
    let doublings = (index - table.len() + 1) as u32;
    last.saturating_mul(2u64.saturating_pow(doublings))
}

/// Cost of raising `stat` given the 0-based level index (`level - 1`)
pub fn upgrade_cost(stat: UpgradeStat, level_index: usize) -> u64 {
    extrapolated_cost(stat.cost_table(), level_index)
}

/// Cost of hiring the next worker of a role, given how many are owned
pub fn hire_cost(role: WorkerRole, owned: usize) -> u64 {
    let table: &[u64] = match role {
        WorkerRole::Chopper => &[100, 250, 600, 1500, 4000],
        WorkerRole::Collector => &[80, 200, 500, 1200, 3000],
    };
    extrapolated_cost(table, owned)
}

/// Compounding multiplier for a stat at the given 1-indexed level
pub fn multiplier(stat: UpgradeStat, level: u32) -> f32 {
    stat.growth_factor().powi(level.max(1) as i32 - 1)
}

/// Current level per upgradeable stat. Levels are 1-indexed, start at 1,
/// and only ever go up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeLevels {
    pub axe_power: u32,
    pub move_speed: u32,
    pub chop_speed: u32,
    pub carry_capacity: u32,
    pub rest_speed: u32,
    pub work_duration: u32,
    pub worker_speed: u32,
    pub worker_power: u32,
}

impl Default for UpgradeLevels {
    fn default() -> Self {
        Self {
            axe_power: 1,
            move_speed: 1,
            chop_speed: 1,
            carry_capacity: 1,
            rest_speed: 1,
            work_duration: 1,
            worker_speed: 1,
            worker_power: 1,
        }
    }
}

impl UpgradeLevels {
    pub fn get(&self, stat: UpgradeStat) -> u32 {
        match stat {
            UpgradeStat::AxePower => self.axe_power,
            UpgradeStat::MoveSpeed => self.move_speed,
            UpgradeStat::ChopSpeed => self.chop_speed,
            UpgradeStat::CarryCapacity => self.carry_capacity,
            UpgradeStat::RestSpeed => self.rest_speed,
            UpgradeStat::WorkDuration => self.work_duration,
            UpgradeStat::WorkerSpeed => self.worker_speed,
            UpgradeStat::WorkerPower => self.worker_power,
        }
    }

    fn slot(&mut self, stat: UpgradeStat) -> &mut u32 {
        match stat {
            UpgradeStat::AxePower => &mut self.axe_power,
            UpgradeStat::MoveSpeed => &mut self.move_speed,
            UpgradeStat::ChopSpeed => &mut self.chop_speed,
            UpgradeStat::CarryCapacity => &mut self.carry_capacity,
            UpgradeStat::RestSpeed => &mut self.rest_speed,
            UpgradeStat::WorkDuration => &mut self.work_duration,
            UpgradeStat::WorkerSpeed => &mut self.worker_speed,
            UpgradeStat::WorkerPower => &mut self.worker_power,
        }
    }

    /// Raise the stat one level, returning the new level
    pub fn raise(&mut self, stat: UpgradeStat) -> u32 {
        let slot = self.slot(stat);
        *slot += 1;
        *slot
    }

    /// Effective multiplier for the stat at its current level
    pub fn multiplier(&self, stat: UpgradeStat) -> f32 {
        multiplier(stat, self.get(stat))
    }

    /// Cost of the next level of the stat
    pub fn next_cost(&self, stat: UpgradeStat) -> u64 {
        upgrade_cost(stat, self.get(stat) as usize - 1)
    }

    /// Clamp every level to at least 1; restored saves may carry zeros
    pub fn sanitize(&mut self) {
        for stat in UpgradeStat::ALL {
            let slot = self.slot(stat);
            *slot = (*slot).max(1);
        }
    }
}

/// Economy accumulators. All monotonically non-decreasing except the
/// currency balance, which also drops on spend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Counters {
    pub currency: u64,
    pub total_wood_chopped: u64,
    pub total_currency_earned: u64,
}

impl Counters {
    /// Credit a sale: balance and the lifetime-earned counter both rise
    pub fn earn(&mut self, amount: u64) {
        self.currency += amount;
        self.total_currency_earned += amount;
    }

    /// Deduct a purchase, refusing rather than underflowing
    pub fn spend(&mut self, amount: u64) -> Result<()> {
        if self.currency < amount {
            return Err(SimError::InsufficientFunds {
                needed: amount,
                available: self.currency,
            });
        }
        self.currency -= amount;
        Ok(())
    }
}
