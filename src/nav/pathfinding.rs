//! A* shortest paths over the navigation graph
//!
//! Resolves world positions to graph nodes and searches the directed node
//! links for the cheapest chain between them. Every failure mode (empty
//! graph, unreachable goal, dangling links) surfaces as an empty path, never
//! as an error the caller has to unwind.

use glam::Vec3;
use rand::Rng;
use rustc_hash::FxHashMap;

use crate::nav::graph::{NavGraph, NodeId};

/// An ordered sequence of waypoints produced by a search.
///
/// Waypoints are stored goal-first: the last element is the node nearest the
/// start. Followers peek [`next_waypoint`](Self::next_waypoint) and
/// [`advance`](Self::advance) past each point as it is reached, so the
/// active waypoint is always at the back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    waypoints: Vec<Vec3>,
}

impl Path {
    /// Check if there are no waypoints left
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Number of waypoints left
    #[must_use]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// All remaining waypoints, goal-first
    #[must_use]
    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    /// The waypoint to head for next
    #[must_use]
    pub fn next_waypoint(&self) -> Option<Vec3> {
        self.waypoints.last().copied()
    }

    /// Drop the active waypoint, returning it
    pub fn advance(&mut self) -> Option<Vec3> {
        self.waypoints.pop()
    }

    /// Discard all remaining waypoints
    pub fn clear(&mut self) {
        self.waypoints.clear();
    }

    /// Summed length of the remaining legs
    #[must_use]
    pub fn total_length(&self) -> f32 {
        let mut length = 0.0;
        for i in 1..self.waypoints.len() {
            length += self.waypoints[i].distance(self.waypoints[i - 1]);
        }
        length
    }
}

/// Shortest path between the nodes nearest to two world positions.
///
/// Returns an empty path when the graph has no nodes or no chain of links
/// connects the endpoints; callers treat that as "nowhere to go this cycle".
#[must_use]
pub fn path_between(graph: &NavGraph, start: Vec3, goal: Vec3) -> Path {
    let (Ok(start_node), Ok(goal_node)) = (graph.nearest(start), graph.nearest(goal)) else {
        log::error!("cannot resolve path endpoints: the navigation graph is empty");
        return Path::default();
    };
    search(graph, start_node, goal_node)
}

/// Shortest path from a world position to a uniformly random node.
///
/// Same empty-path policy as [`path_between`].
#[must_use]
pub fn random_path(graph: &NavGraph, rng: &mut impl Rng, start: Vec3) -> Path {
    let (Ok(start_node), Ok(goal_node)) = (graph.nearest(start), graph.random_node(rng)) else {
        log::error!("cannot pick a roam destination: the navigation graph is empty");
        return Path::default();
    };
    search(graph, start_node, goal_node)
}

/// A* over the directed node links.
///
/// The open set is a plain vector scanned linearly for the lowest f-score;
/// on a tie the earliest entry keeps the slot. That is fine for the node
/// counts designers place by hand, and the fixed scan order keeps results
/// deterministic.
fn search(graph: &NavGraph, start: NodeId, goal: NodeId) -> Path {
    let Some(start_position) = graph.position(start) else {
        return Path::default();
    };
    let Some(goal_position) = graph.position(goal) else {
        return Path::default();
    };

    let mut open_set = vec![start];
    let mut g_scores: FxHashMap<NodeId, f32> = FxHashMap::default();
    let mut h_scores: FxHashMap<NodeId, f32> = FxHashMap::default();
    let mut came_from: FxHashMap<NodeId, Option<NodeId>> = FxHashMap::default();

    g_scores.insert(start, 0.0);
    h_scores.insert(start, start_position.distance(goal_position));
    came_from.insert(start, None);

    while !open_set.is_empty() {
        // Every node in the open set already has its scores recorded, so
        // indexing the maps here cannot miss.
        let mut best = 0;
        for i in 1..open_set.len() {
            if g_scores[&open_set[i]] + h_scores[&open_set[i]]
                < g_scores[&open_set[best]] + h_scores[&open_set[best]]
            {
                best = i;
            }
        }
        let current = open_set.remove(best);

        if current == goal {
            log::debug!("path found from {start} to {goal}");
            return reconstruct(graph, &came_from, goal);
        }

        let Some(node) = graph.node(current) else {
            continue;
        };
        let current_position = node.position;

        for &neighbor in &node.adjacent {
            // Links to nodes that no longer resolve are skipped, not fatal.
            let Some(neighbor_position) = graph.position(neighbor) else {
                continue;
            };

            let tentative = g_scores[&current] + current_position.distance(neighbor_position);

            if !g_scores.contains_key(&neighbor) {
                g_scores.insert(neighbor, f32::MAX);
                h_scores.insert(neighbor, neighbor_position.distance(goal_position));
                came_from.insert(neighbor, None);
            }

            // A strict improvement is required, so a zero-length link back to
            // the same node can never re-open it.
            if tentative < g_scores[&neighbor] {
                came_from.insert(neighbor, Some(current));
                g_scores.insert(neighbor, tentative);
                if !open_set.contains(&neighbor) {
                    open_set.push(neighbor);
                }
            }
        }
    }

    // Open set exhausted: the goal is unreachable from the start node.
    Path::default()
}

/// Walk the predecessor map backward from the goal, emitting each node's
/// position until the start node's sentinel predecessor.
///
/// The result runs goal to start, with the start node's own position as the
/// final element; see the ordering contract on [`Path`].
fn reconstruct(graph: &NavGraph, came_from: &FxHashMap<NodeId, Option<NodeId>>, goal: NodeId) -> Path {
    let mut waypoints = Vec::new();

    let mut next = Some(goal);
    while let Some(id) = next {
        if let Some(position) = graph.position(id) {
            waypoints.push(position);
        }
        next = came_from.get(&id).copied().flatten();
    }

    Path { waypoints }
}
