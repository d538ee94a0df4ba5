//! Timberline - Incremental Lumberjack Simulation Core

pub mod core;
pub mod economy;
pub mod simulation;
pub mod workers;
pub mod world;
pub mod worldgen;
