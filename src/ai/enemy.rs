//! Enemy agent: free-roam and pursuit over the navigation graph
//!
//! The agent walks random node paths while unaware of a target and the
//! shortest node path toward it once one is sensed. Perception itself lives
//! outside this module; each tick receives the sensed target position, if
//! any. All cooldowns are explicit per-tick countdowns rather than deferred
//! callbacks.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ai::fsm::{State, StateMachine, Transition};
use crate::ai::steering::{Arrive, Seek, Steering};
use crate::nav::{NavGraph, Path, path_between, random_path};

/// Speed factor while roaming between random nodes
const ROAM_SPEED: f32 = 0.25;
/// Speed factor while pursuing a target
const CHASE_SPEED: f32 = 1.0;

/// Tunables for an enemy agent
#[derive(Debug, Clone)]
pub struct EnemyConfig {
    /// How eager the agent is to move: 0 never moves, 20 moves every chance
    pub level: u32,
    /// Seconds between automatic level increases
    pub level_up_interval: f32,
    /// Raise the level as time passes
    pub level_grows_over_time: bool,
    /// Raise the level each time a chase ends with the target escaping
    pub level_grows_on_escape: bool,
    /// Let the level raise movement speed and shorten idle waits
    pub level_scales_speed: bool,
    /// Let the level extend the attack reach
    pub level_scales_attack_range: bool,
    /// Reach within which the agent can strike
    pub attack_range: f32,
    /// Damage dealt per strike
    pub attack_damage: f32,
    /// Seconds between strikes
    pub attack_cooldown: f32,
    /// Distance at which a waypoint counts as reached
    pub arrival_radius: f32,
    /// Longest idle wait between roams, in seconds
    pub max_wait: f32,
    /// Walking speed at full factor, in units per second
    pub move_speed: f32,
    /// Steering acceleration budget
    pub max_acceleration: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            level: 5,
            level_up_interval: 10.0,
            level_grows_over_time: false,
            level_grows_on_escape: false,
            level_scales_speed: false,
            level_scales_attack_range: false,
            attack_range: 3.0,
            attack_damage: 10.0,
            attack_cooldown: 1.0,
            arrival_radius: 1.5,
            max_wait: 5.0,
            move_speed: 6.0,
            max_acceleration: 20.0,
        }
    }
}

impl EnemyConfig {
    /// Set the activity level
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    /// Set the attack reach
    pub fn with_attack_range(mut self, range: f32) -> Self {
        self.attack_range = range;
        self
    }

    /// Set the walking speed
    pub fn with_move_speed(mut self, speed: f32) -> Self {
        self.move_speed = speed;
        self
    }

    /// Set the longest idle wait between roams
    pub fn with_max_wait(mut self, seconds: f32) -> Self {
        self.max_wait = seconds;
        self
    }
}

/// What a state asks the agent to do about its route
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PathRequest {
    /// Keep the current route
    #[default]
    Keep,
    /// Plot a route to a random node
    Wander,
    /// Plot a route toward a world position
    To(Vec3),
}

/// Per-tick data shared between the agent and its states
#[derive(Debug, Default)]
pub struct EnemyContext {
    /// Seconds since the previous tick
    pub dt: f32,
    /// The agent's current position
    pub position: Vec3,
    /// Sensed target position, `None` while out of sight
    pub target: Option<Vec3>,
    /// Whether the current route has no waypoints left
    pub path_exhausted: bool,
    /// The agent's current activity level
    pub level: u32,
    /// The agent's tunables
    pub config: EnemyConfig,
    /// Uniform sample in 0..1 for this tick's activity roll
    pub roll_activity: f32,
    /// Uniform sample in 0..1 for this tick's wait duration
    pub roll_wait: f32,
    /// Output: movement speed factor chosen by the state
    pub speed_factor: f32,
    /// Output: route request for the agent to resolve
    pub request: PathRequest,
    /// Output: drop the current route immediately
    pub discard_path: bool,
    /// Output: damage dealt this tick
    pub strike: Option<f32>,
    /// Output: a chase just ended with the target getting away
    pub escaped: bool,
}

impl EnemyContext {
    /// Reach of a strike, extended by level when configured
    #[must_use]
    pub fn attack_reach(&self) -> f32 {
        let mut reach = self.config.attack_range;
        if self.config.level_scales_attack_range {
            reach += self.level as f32 * 0.05;
        }
        reach
    }

    /// Longest idle wait, shortened by level when configured
    #[must_use]
    pub fn roam_wait_limit(&self) -> f32 {
        let mut limit = self.config.max_wait;
        if self.config.level_scales_speed {
            limit = (limit - 0.1 * self.level as f32).max(0.1);
        }
        limit
    }
}

/// Roaming between random nodes, idling in between
#[derive(Debug, Default)]
pub struct FreeRoam {
    /// Seconds of idling left before the next outing is considered
    wait_remaining: f32,
    /// A roam route is currently being walked
    traveling: bool,
}

impl State<EnemyContext> for FreeRoam {
    fn name(&self) -> &'static str {
        "FreeRoam"
    }

    fn update(&mut self, ctx: &mut EnemyContext) -> Transition<EnemyContext> {
        ctx.speed_factor = ROAM_SPEED;

        // A level-zero agent never reacts, it only stands its post.
        if ctx.target.is_some() && ctx.level > 0 {
            ctx.discard_path = true;
            return Transition::to(Chase);
        }

        if self.wait_remaining > 0.0 {
            self.wait_remaining -= ctx.dt;
            return Transition::None;
        }

        if !ctx.path_exhausted {
            self.traveling = true;
            return Transition::None;
        }

        if self.traveling {
            // Just reached the roam destination; idle before the next outing.
            self.traveling = false;
            self.wait_remaining = ctx.roll_wait * ctx.roam_wait_limit();
            return Transition::None;
        }

        // Rested and idle: roll against the level to decide whether to head
        // out. Level 20 always passes, level 0 never does.
        let roll = 1.0 + ctx.roll_activity * 19.0;
        if ctx.level > 0 && roll <= ctx.level as f32 {
            ctx.request = PathRequest::Wander;
            self.traveling = true;
        } else {
            self.wait_remaining = ctx.roll_wait * ctx.roam_wait_limit();
        }

        Transition::None
    }
}

/// Pursuing a sensed target along the shortest node path
#[derive(Debug, Default)]
pub struct Chase;

impl State<EnemyContext> for Chase {
    fn name(&self) -> &'static str {
        "Chase"
    }

    fn update(&mut self, ctx: &mut EnemyContext) -> Transition<EnemyContext> {
        ctx.speed_factor = CHASE_SPEED;

        let Some(target) = ctx.target else {
            ctx.escaped = true;
            return Transition::to(FreeRoam::default());
        };

        if ctx.path_exhausted {
            ctx.request = PathRequest::To(target);
        }

        if ctx.position.distance(target) <= ctx.attack_reach() {
            return Transition::to(Attack::default());
        }

        Transition::None
    }
}

/// Close enough to strike; keeps pressing toward the target between blows
#[derive(Debug, Default)]
pub struct Attack {
    /// Seconds until the next strike is ready
    cooldown: f32,
}

impl State<EnemyContext> for Attack {
    fn name(&self) -> &'static str {
        "Attack"
    }

    fn update(&mut self, ctx: &mut EnemyContext) -> Transition<EnemyContext> {
        ctx.speed_factor = CHASE_SPEED;

        let Some(target) = ctx.target else {
            ctx.escaped = true;
            return Transition::to(FreeRoam::default());
        };

        if ctx.position.distance(target) > ctx.attack_reach() {
            return Transition::to(Chase);
        }

        if ctx.path_exhausted {
            ctx.request = PathRequest::To(target);
        }

        self.cooldown -= ctx.dt;
        if self.cooldown <= 0.0 {
            ctx.strike = Some(ctx.config.attack_damage);
            self.cooldown = ctx.config.attack_cooldown;
        }

        Transition::None
    }
}

/// An enemy agent moving through the world along graph paths
#[derive(Debug)]
pub struct Enemy {
    /// Current world position
    pub position: Vec3,
    velocity: Vec3,
    config: EnemyConfig,
    level: u32,
    path: Path,
    fsm: StateMachine<EnemyContext>,
    rng: StdRng,
    level_timer: f32,
}

impl Enemy {
    /// Create an agent at a position
    #[must_use]
    pub fn new(position: Vec3, config: EnemyConfig) -> Self {
        Self::with_rng(position, config, StdRng::from_entropy())
    }

    /// Create an agent with a fixed random seed
    #[must_use]
    pub fn with_seed(position: Vec3, config: EnemyConfig, seed: u64) -> Self {
        Self::with_rng(position, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(position: Vec3, config: EnemyConfig, rng: StdRng) -> Self {
        let level = config.level;
        Self {
            position,
            velocity: Vec3::ZERO,
            config,
            level,
            path: Path::default(),
            fsm: StateMachine::new(FreeRoam::default()),
            rng,
            level_timer: 0.0,
        }
    }

    /// Current activity level
    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Name of the active behavior state
    #[must_use]
    pub fn state_name(&self) -> &'static str {
        self.fsm.current_state_name()
    }

    /// The route currently being walked
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Advance one tick.
    ///
    /// `target` is the sensed target position, if visible. The graph is only
    /// borrowed for this call; routes are resolved and stored as positions.
    /// Returns the damage dealt this tick, if a strike landed.
    pub fn update(&mut self, graph: &NavGraph, target: Option<Vec3>, dt: f32) -> Option<f32> {
        self.grow_level(dt);

        let mut ctx = EnemyContext {
            dt,
            position: self.position,
            target,
            path_exhausted: self.path.is_empty(),
            level: self.level,
            config: self.config.clone(),
            roll_activity: self.rng.gen_range(0.0..1.0),
            roll_wait: self.rng.gen_range(0.0..1.0),
            ..Default::default()
        };

        self.fsm.update(&mut ctx);

        if ctx.escaped && self.config.level_grows_on_escape {
            self.level += 1;
            log::debug!("target escaped, level raised to {}", self.level);
        }

        if ctx.discard_path {
            self.path.clear();
        }

        match ctx.request {
            PathRequest::Keep => {}
            PathRequest::Wander => {
                self.path = random_path(graph, &mut self.rng, self.position);
            }
            PathRequest::To(goal) => {
                self.path = path_between(graph, self.position, goal);
            }
        }

        self.follow_path(ctx.speed_factor, dt);
        ctx.strike
    }

    fn grow_level(&mut self, dt: f32) {
        self.level_timer += dt;
        if self.level_timer > self.config.level_up_interval {
            if self.config.level_grows_over_time {
                self.level += 1;
                log::debug!("level raised to {} over time", self.level);
            }
            self.level_timer = 0.0;
        }
    }

    /// Steer toward the active waypoint and pop it once inside the arrival
    /// radius. The waypoint nearest the agent is at the back of the path.
    fn follow_path(&mut self, speed_factor: f32, dt: f32) {
        let Some(waypoint) = self.path.next_waypoint() else {
            self.velocity = Vec3::ZERO;
            return;
        };

        let mut factor = speed_factor;
        if self.config.level_scales_speed {
            factor += self.level as f32 / 100.0;
        }
        let max_speed = self.config.move_speed * factor;

        // Brake into the final waypoint, plain seek for the ones before it.
        let acceleration = if self.path.len() == 1 {
            Arrive::new(waypoint, self.config.max_acceleration, max_speed)
                .accelerate(self.position, self.velocity)
        } else {
            Seek::new(waypoint, self.config.max_acceleration)
                .accelerate(self.position, self.velocity)
        };

        self.velocity += acceleration * dt;
        let speed = self.velocity.length();
        if speed > max_speed {
            self.velocity = self.velocity / speed * max_speed;
        }
        self.position += self.velocity * dt;

        if self.position.distance(waypoint) < self.config.arrival_radius {
            self.path.advance();
            if self.path.is_empty() {
                log::debug!("destination reached");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::GraphSnapshot;

    /// Three nodes in a line, linked both ways: A(0) - B(10) - C(20)
    fn line_graph() -> NavGraph {
        let mut snapshot = GraphSnapshot::new("line");
        snapshot.add_node(Vec3::new(0.0, 0.0, 0.0), vec![1]);
        snapshot.add_node(Vec3::new(10.0, 0.0, 0.0), vec![0, 2]);
        snapshot.add_node(Vec3::new(20.0, 0.0, 0.0), vec![1]);

        let mut graph = NavGraph::new();
        graph.populate(&snapshot);
        graph
    }

    #[test]
    fn test_roam_switches_to_chase_on_sight() {
        let graph = line_graph();
        let mut enemy = Enemy::with_seed(Vec3::ZERO, EnemyConfig::default(), 1);

        assert_eq!(enemy.state_name(), "FreeRoam");
        enemy.update(&graph, Some(Vec3::new(20.0, 0.0, 0.0)), 0.1);
        assert_eq!(enemy.state_name(), "Chase");
    }

    #[test]
    fn test_level_zero_ignores_the_target() {
        let graph = line_graph();
        let config = EnemyConfig::default().with_level(0);
        let mut enemy = Enemy::with_seed(Vec3::ZERO, config, 1);

        for _ in 0..100 {
            enemy.update(&graph, Some(Vec3::new(20.0, 0.0, 0.0)), 0.1);
        }

        assert_eq!(enemy.state_name(), "FreeRoam");
        assert_eq!(enemy.position, Vec3::ZERO);
    }

    #[test]
    fn test_chase_plots_a_route_and_closes_in() {
        let graph = line_graph();
        let mut enemy = Enemy::with_seed(Vec3::ZERO, EnemyConfig::default(), 1);
        let target = Vec3::new(20.0, 0.0, 0.0);

        enemy.update(&graph, Some(target), 0.1);
        enemy.update(&graph, Some(target), 0.1);
        assert!(!enemy.path().is_empty());

        let start_distance = enemy.position.distance(target);
        for _ in 0..50 {
            enemy.update(&graph, Some(target), 0.1);
        }
        assert!(enemy.position.distance(target) < start_distance);
    }

    #[test]
    fn test_losing_the_target_returns_to_roam() {
        let graph = line_graph();
        let mut enemy = Enemy::with_seed(Vec3::ZERO, EnemyConfig::default(), 1);

        enemy.update(&graph, Some(Vec3::new(20.0, 0.0, 0.0)), 0.1);
        assert_eq!(enemy.state_name(), "Chase");

        enemy.update(&graph, None, 0.1);
        assert_eq!(enemy.state_name(), "FreeRoam");
    }

    #[test]
    fn test_escape_raises_the_level_when_configured() {
        let graph = line_graph();
        let config = EnemyConfig {
            level_grows_on_escape: true,
            ..Default::default()
        };
        let mut enemy = Enemy::with_seed(Vec3::ZERO, config, 1);
        let before = enemy.level();

        enemy.update(&graph, Some(Vec3::new(20.0, 0.0, 0.0)), 0.1);
        enemy.update(&graph, None, 0.1);

        assert_eq!(enemy.level(), before + 1);
    }

    #[test]
    fn test_strikes_land_within_reach() {
        let graph = line_graph();
        let mut enemy = Enemy::with_seed(Vec3::ZERO, EnemyConfig::default(), 1);
        let target = Vec3::new(1.0, 0.0, 0.0);

        // FreeRoam -> Chase -> Attack, then the first strike lands.
        let mut struck = None;
        for _ in 0..5 {
            if let Some(damage) = enemy.update(&graph, Some(target), 0.1) {
                struck = Some(damage);
                break;
            }
        }

        assert_eq!(enemy.state_name(), "Attack");
        assert_eq!(struck, Some(10.0));
    }

    #[test]
    fn test_strike_cadence_respects_the_cooldown() {
        let graph = line_graph();
        let mut enemy = Enemy::with_seed(Vec3::ZERO, EnemyConfig::default(), 1);
        let target = Vec3::new(1.0, 0.0, 0.0);

        // Drive to the first strike.
        while enemy.update(&graph, Some(target), 0.1).is_none() {}

        // Immediately after a strike the cooldown blocks the next one.
        assert!(enemy.update(&graph, Some(target), 0.1).is_none());

        // A full cooldown later the agent strikes again.
        let mut landed = false;
        for _ in 0..12 {
            if enemy.update(&graph, Some(target), 0.1).is_some() {
                landed = true;
                break;
            }
        }
        assert!(landed);
    }

    #[test]
    fn test_high_level_agent_roams_on_its_own() {
        let graph = line_graph();
        let config = EnemyConfig::default().with_level(20);
        let mut enemy = Enemy::with_seed(Vec3::ZERO, config, 7);

        // Level 20 passes every activity roll, so the agent keeps picking
        // random destinations; over this horizon it must leave its post.
        let mut moved = false;
        for _ in 0..2000 {
            enemy.update(&graph, None, 0.05);
            if enemy.position.distance(Vec3::ZERO) > 1.0 {
                moved = true;
                break;
            }
        }
        assert!(moved);
    }

    #[test]
    fn test_empty_graph_leaves_the_agent_standing() {
        let graph = NavGraph::new();
        let config = EnemyConfig::default().with_level(20);
        let mut enemy = Enemy::with_seed(Vec3::ZERO, config, 7);

        for _ in 0..200 {
            enemy.update(&graph, None, 0.05);
        }
        assert_eq!(enemy.position, Vec3::ZERO);
    }

    #[test]
    fn test_level_grows_over_time_when_configured() {
        let graph = line_graph();
        let config = EnemyConfig {
            level_grows_over_time: true,
            level_up_interval: 1.0,
            ..Default::default()
        };
        let mut enemy = Enemy::with_seed(Vec3::ZERO, config, 1);
        let before = enemy.level();

        enemy.update(&graph, None, 0.6);
        enemy.update(&graph, None, 0.6);

        assert_eq!(enemy.level(), before + 1);
    }
}
