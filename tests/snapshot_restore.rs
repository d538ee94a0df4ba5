//! End-to-end save/load: play a session, snapshot it through JSON, load
//! it into a fresh simulation and keep playing.

use timberline::simulation::snapshot::SaveSnapshot;
use timberline::simulation::tick::SimEvent;
use timberline::simulation::Simulation;
use timberline::workers::WorkerRole;

const DT: f32 = 1.0 / 60.0;

/// Run until a chopper fells a tree, returning the felled tree's id.
fn play_until_first_fell(sim: &mut Simulation) -> timberline::core::types::TreeId {
    for _ in 0..12_000 {
        for event in sim.advance(DT) {
            if let SimEvent::TreeFelled { tree, .. } = event {
                return tree;
            }
        }
    }
    panic!("no tree felled in 200s of play");
}

#[test]
fn test_session_survives_save_and_load() {
    let mut sim = Simulation::new(1234);
    sim.counters_mut().earn(10_000);
    sim.hire_worker(WorkerRole::Chopper).unwrap();
    let felled = play_until_first_fell(&mut sim);

    let json = sim.snapshot().to_json().unwrap();
    let snapshot = SaveSnapshot::from_json(&json).unwrap();

    // load into a session that was started on a different seed
    let mut loaded = Simulation::new(0);
    loaded.restore(&snapshot);

    assert_eq!(loaded.chunks().world_seed(), 1234);
    assert_eq!(loaded.workers().len(), 1);
    assert_eq!(loaded.counters().currency, sim.counters().currency);

    let tree = loaded
        .chunks()
        .tree(felled)
        .expect("felled tree's chunk is within the restored view");
    assert!(tree.dead, "felled tree must come back dead");
    assert!(tree.respawn_timer > 0.0);
}

#[test]
fn test_restored_dead_tree_eventually_regrows() {
    let mut sim = Simulation::new(1234);
    sim.counters_mut().earn(10_000);
    sim.hire_worker(WorkerRole::Chopper).unwrap();
    let felled = play_until_first_fell(&mut sim);

    let snapshot = sim.snapshot();
    let mut loaded = Simulation::new(1234);
    loaded.restore(&snapshot);

    // respawn window plus slack
    let ticks = (loaded.config().tree_respawn_seconds / DT) as u64 + 600;
    let mut regrown = false;
    for _ in 0..ticks {
        loaded.advance(DT);
        if loaded.chunks().tree(felled).map(|t| !t.dead).unwrap_or(false) {
            regrown = true;
            break;
        }
    }
    assert!(regrown, "dead tree never regrew after restore");
}
