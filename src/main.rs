//! Headless demo: an enemy roams a small node graph, then chases and corners
//! a scripted player

use prowler::prelude::*;

/// HUD stand-in that logs what a real widget would draw
struct LogHud;

impl HealthDisplay for LogHud {
    fn set_health_percent(&mut self, percent: f32) {
        log::info!("health bar at {:.0}%", percent * 100.0);
    }

    fn on_death(&mut self) {
        log::info!("game over");
    }
}

/// A ring of six nodes with one shortcut across the middle
fn yard_snapshot() -> GraphSnapshot {
    let mut snapshot = GraphSnapshot::new("demo yard");
    snapshot.add_node(Vec3::new(0.0, 0.0, 0.0), vec![1, 5]);
    snapshot.add_node(Vec3::new(12.0, 0.0, 0.0), vec![0, 2]);
    snapshot.add_node(Vec3::new(18.0, 0.0, 8.0), vec![1, 3, 5]);
    snapshot.add_node(Vec3::new(12.0, 0.0, 16.0), vec![2, 4]);
    snapshot.add_node(Vec3::new(0.0, 0.0, 16.0), vec![3, 5]);
    snapshot.add_node(Vec3::new(-6.0, 0.0, 8.0), vec![4, 0, 2]);
    snapshot
}

fn main() {
    env_logger::init();

    let snapshot = yard_snapshot();
    let mut graph = NavGraph::new();
    graph.populate(&snapshot);
    log::info!("graph ready: {} nodes", graph.len());

    let config = EnemyConfig::default().with_level(14);
    let mut enemy = Enemy::with_seed(Vec3::new(0.0, 0.0, 0.0), config, 7);

    let mut player_health = Health::new(100.0);
    let mut hud = LogHud;
    let player = Vec3::new(12.0, 0.0, 16.0);

    // Fixed-timestep loop; the player steps into view after 30 seconds.
    let dt = 1.0 / 60.0;
    for frame in 0u32..3600 {
        let seen = (frame > 1800 && !player_health.is_dead()).then_some(player);

        if let Some(damage) = enemy.update(&graph, seen, dt) {
            player_health.apply_damage(damage, &mut hud);
        }

        if frame % 300 == 0 {
            log::info!(
                "t={:5.1}s state={} pos=({:.1}, {:.1}) waypoints left={}",
                frame as f32 * dt,
                enemy.state_name(),
                enemy.position.x,
                enemy.position.z,
                enemy.path().len(),
            );
        }

        if player_health.is_dead() {
            log::info!("the player was caught, ending the run");
            break;
        }
    }
}
