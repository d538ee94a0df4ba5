//! Timberline - Headless Runner
//!
//! Drives the simulation at a fixed 60 Hz step for a requested number of
//! ticks, optionally pre-hiring workers and seeding currency, then prints
//! a summary. Useful for balance exploration and soak testing without a
//! renderer attached.

use clap::Parser;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use timberline::core::error::Result;
use timberline::economy::UpgradeStat;
use timberline::simulation::Simulation;
use timberline::workers::WorkerRole;

#[derive(Parser, Debug)]
#[command(name = "timberline", about = "Headless forest-harvest simulation runner")]
struct Args {
    /// World seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Number of 60 Hz ticks to run
    #[arg(long, default_value_t = 3600)]
    ticks: u64,

    /// Choppers to hire before the run starts
    #[arg(long, default_value_t = 1)]
    choppers: usize,

    /// Collectors to hire before the run starts
    #[arg(long, default_value_t = 1)]
    collectors: usize,

    /// Starting currency granted before hiring
    #[arg(long, default_value_t = 10_000)]
    grant: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("timberline=debug")
        .init();

    let args = Args::parse();
    let seed = args
        .seed
        .unwrap_or_else(|| ChaCha8Rng::from_entropy().gen());
    tracing::info!(seed, ticks = args.ticks, "starting headless run");

    let mut sim = Simulation::new(seed);
    sim.counters_mut().earn(args.grant);
    for _ in 0..args.choppers {
        let _ = sim.hire_worker(WorkerRole::Chopper)?;
    }
    for _ in 0..args.collectors {
        let _ = sim.hire_worker(WorkerRole::Collector)?;
    }

    const DT: f32 = 1.0 / 60.0;
    let mut felled = 0u64;
    let mut sold = 0u64;
    for _ in 0..args.ticks {
        for event in sim.advance(DT) {
            match event {
                timberline::simulation::tick::SimEvent::TreeFelled { .. } => felled += 1,
                timberline::simulation::tick::SimEvent::WoodSold { earned, .. } => sold += earned,
                _ => {}
            }
        }
    }

    let counters = sim.counters();
    println!("=== run summary ===");
    println!("seed:             {seed}");
    println!("ticks:            {}", sim.tick_count());
    println!("trees felled:     {felled}");
    println!("wood chopped:     {}", counters.total_wood_chopped);
    println!("currency earned:  {}", counters.total_currency_earned);
    println!("currency sold:    {sold}");
    println!("currency held:    {}", counters.currency);
    println!("loaded chunks:    {}", sim.chunks().loaded_count());
    println!("drops on ground:  {}", sim.drops().len());
    println!(
        "axe power level:  {}",
        sim.levels().get(UpgradeStat::AxePower)
    );

    Ok(())
}
