//! Navigation node graph
//!
//! A static arena of designer-placed waypoint nodes with directed links,
//! plus the spatial queries used to resolve world positions to nodes.

use glam::Vec3;
use rand::Rng;
use smallvec::SmallVec;

use crate::nav::snapshot::GraphSnapshot;

/// Stable handle to a node in a [`NavGraph`].
///
/// Ids are arena indices and stay valid until the next [`NavGraph::populate`]
/// call, which replaces the arena wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Index into the graph's node arena
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single navigation node
#[derive(Debug, Clone)]
pub struct NavNode {
    /// Position in world space
    pub position: Vec3,
    /// Nodes reachable directly from this one. Links are one-way; travel in
    /// the other direction requires a matching link on the other node.
    pub adjacent: SmallVec<[NodeId; 4]>,
}

/// Errors from graph queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    /// No nodes are registered
    EmptyGraph,
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyGraph => write!(f, "the navigation graph has no nodes"),
        }
    }
}

impl std::error::Error for GraphError {}

/// The collection of all navigation nodes in the world.
///
/// Built once per session from a [`GraphSnapshot`] and read-only afterwards.
/// Links store [`NodeId`]s rather than references, so removed or out-of-range
/// targets resolve to `None` instead of dangling.
#[derive(Debug, Clone, Default)]
pub struct NavGraph {
    nodes: Vec<NavNode>,
}

impl NavGraph {
    /// Create an empty graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the node arena from a world snapshot.
    ///
    /// Replaces any prior contents; `NodeId`s handed out before this call no
    /// longer refer to the same nodes.
    pub fn populate(&mut self, snapshot: &GraphSnapshot) {
        self.nodes = snapshot
            .nodes
            .iter()
            .map(|spec| NavNode {
                position: spec.position,
                adjacent: spec.adjacent.iter().map(|&index| NodeId(index)).collect(),
            })
            .collect();
        log::debug!("navigation graph populated with {} nodes", self.nodes.len());
    }

    /// Number of nodes in the graph
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the graph has no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node, `None` if the id does not resolve
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&NavNode> {
        self.nodes.get(id.index())
    }

    /// Look up a node's world position, `None` if the id does not resolve
    #[must_use]
    pub fn position(&self, id: NodeId) -> Option<Vec3> {
        self.node(id).map(|node| node.position)
    }

    /// Iterate over every node id in the graph
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    /// The node closest to a world position.
    ///
    /// Linear scan; on a distance tie the node encountered first wins.
    pub fn nearest(&self, point: Vec3) -> Result<NodeId, GraphError> {
        if self.nodes.is_empty() {
            return Err(GraphError::EmptyGraph);
        }

        let mut best = NodeId(0);
        let mut best_distance = f32::MAX;
        for (index, node) in self.nodes.iter().enumerate() {
            let distance = point.distance(node.position);
            if distance < best_distance {
                best_distance = distance;
                best = NodeId(index as u32);
            }
        }
        Ok(best)
    }

    /// The node farthest from a world position.
    ///
    /// Same scan and tie handling as [`nearest`](Self::nearest).
    pub fn farthest(&self, point: Vec3) -> Result<NodeId, GraphError> {
        if self.nodes.is_empty() {
            return Err(GraphError::EmptyGraph);
        }

        let mut best = NodeId(0);
        let mut best_distance = -1.0;
        for (index, node) in self.nodes.iter().enumerate() {
            let distance = point.distance(node.position);
            if distance > best_distance {
                best_distance = distance;
                best = NodeId(index as u32);
            }
        }
        Ok(best)
    }

    /// A uniformly random node
    pub fn random_node(&self, rng: &mut impl Rng) -> Result<NodeId, GraphError> {
        if self.nodes.is_empty() {
            return Err(GraphError::EmptyGraph);
        }
        Ok(NodeId(rng.gen_range(0..self.nodes.len()) as u32))
    }

    /// Check whether two nodes link to each other in both directions
    #[must_use]
    pub fn is_two_way(&self, from: NodeId, to: NodeId) -> bool {
        let forward = self
            .node(from)
            .is_some_and(|node| node.adjacent.contains(&to));
        let back = self
            .node(to)
            .is_some_and(|node| node.adjacent.contains(&from));
        forward && back
    }
}
