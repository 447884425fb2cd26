//! Road network representation.
//!
//! # Data layout
//!
//! Nodes live in a slot table indexed directly by `NodeId`: node `n` occupies
//! `slots[n]`, and ids that were never added are empty slots.  Each occupied
//! slot holds the node's zone tag and its adjacency list.
//!
//! ```text
//! slots: [ Some{zone: 1, roads: [1:5, 2:10]}, Some{..}, None, Some{..} ]
//!            NodeId(0)                        NodeId(1)  gap   NodeId(3)
//! ```
//!
//! The network is undirected: every road is stored in both endpoints'
//! adjacency lists with the same weight.  Nodes are never removed.
//!
//! Because the table grows to the largest id, ids are capped by an id limit
//! ([`RoadNetwork::DEFAULT_ID_LIMIT`] unless set with
//! [`RoadNetwork::with_id_limit`]).  An id at or above the limit is rejected
//! with `NodeIdTooLarge` instead of allocating.
//!
//! # Sharing
//!
//! Once populated, wrap the network with [`RoadNetwork::into_shared`].  The
//! resulting [`SharedNetwork`] takes a read lock per query and a write lock
//! per structural change, so mutation never interleaves with a running
//! shortest-path computation.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use rd_core::{Distance, NodeId, ZoneId};

use crate::router::{HeapDijkstra, PathFinder, ShortestPaths};
use crate::{NetworkError, NetworkResult};

/// A network shared between the dispatch engine and whoever built it.
pub type SharedNetwork = Arc<RwLock<RoadNetwork>>;

// ── Road ──────────────────────────────────────────────────────────────────────

/// One half of an undirected road: the neighbor it leads to and its weight.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Road {
    pub to:     NodeId,
    /// Strictly positive.
    pub weight: u64,
}

// ── NodeSlot ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
struct NodeSlot {
    zone:  Option<ZoneId>,
    roads: Vec<Road>,
}

impl NodeSlot {
    fn road_to(&self, to: NodeId) -> Option<&Road> {
        self.roads.iter().find(|r| r.to == to)
    }
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Undirected, weighted, zoned road graph.
#[derive(Clone, Debug)]
pub struct RoadNetwork {
    slots:      Vec<Option<NodeSlot>>,
    node_count: usize,
    edge_count: usize,
    id_limit:   u32,
}

impl Default for RoadNetwork {
    fn default() -> Self {
        Self {
            slots:      Vec::new(),
            node_count: 0,
            edge_count: 0,
            id_limit:   Self::DEFAULT_ID_LIMIT,
        }
    }
}

impl RoadNetwork {
    /// Node ids must stay below this unless [`with_id_limit`](Self::with_id_limit)
    /// says otherwise.
    pub const DEFAULT_ID_LIMIT: u32 = 1 << 24;

    pub fn new() -> Self {
        Self::default()
    }

    /// Accept node ids `0..limit`.
    pub fn with_id_limit(mut self, limit: u32) -> Self {
        self.id_limit = limit;
        self
    }

    pub fn id_limit(&self) -> u32 {
        self.id_limit
    }

    /// Pre-size the slot table for ids `0..max_nodes`.
    pub fn with_capacity(max_nodes: usize) -> Self {
        Self {
            slots: Vec::with_capacity(max_nodes),
            ..Self::default()
        }
    }

    /// Wrap in an `Arc<RwLock<_>>` for sharing with a dispatch engine.
    pub fn into_shared(self) -> SharedNetwork {
        Arc::new(RwLock::new(self))
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Create an isolated node with no zone.
    ///
    /// # Errors
    ///
    /// - `DuplicateNode` if `id` exists.
    /// - `NodeIdTooLarge` if `id` is not below [`id_limit`](Self::id_limit).
    pub fn add_node(&mut self, id: NodeId) -> NetworkResult<()> {
        if self.contains(id) {
            return Err(NetworkError::DuplicateNode(id));
        }
        if id.0 >= self.id_limit {
            return Err(NetworkError::NodeIdTooLarge { id, limit: self.id_limit });
        }
        if id.index() >= self.slots.len() {
            self.slots.resize_with(id.index() + 1, || None);
        }
        self.slots[id.index()] = Some(NodeSlot::default());
        self.node_count += 1;
        debug!(node = id.0, "node added");
        Ok(())
    }

    /// Add an undirected road between `from` and `to`.
    ///
    /// Checks, in order: both endpoints exist, `from != to`, `weight > 0`,
    /// and no road already joins the pair.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: i64) -> NetworkResult<()> {
        if !self.contains(from) {
            return Err(NetworkError::UnknownNode(from));
        }
        if !self.contains(to) {
            return Err(NetworkError::UnknownNode(to));
        }
        if from == to {
            return Err(NetworkError::SelfLoop(from));
        }
        if weight <= 0 {
            return Err(NetworkError::NonPositiveWeight { from, to, weight });
        }
        if self.direct_distance(from, to).is_some() {
            return Err(NetworkError::DuplicateEdge { from, to });
        }

        let weight = weight as u64;
        // Both slots were checked above.
        if let Some(slot) = self.slot_mut(from) {
            slot.roads.push(Road { to, weight });
        }
        if let Some(slot) = self.slot_mut(to) {
            slot.roads.push(Road { to: from, weight });
        }
        self.edge_count += 1;
        debug!(from = from.0, to = to.0, weight, "road added");
        Ok(())
    }

    /// Overwrite the zone tag of `id`.  No history is kept.
    pub fn set_zone(&mut self, id: NodeId, zone: i32) -> NetworkResult<()> {
        let Some(slot) = self.slot_mut(id) else {
            return Err(NetworkError::UnknownNode(id));
        };
        let Ok(zone_id) = ZoneId::try_from(zone as i64) else {
            return Err(NetworkError::NegativeZone { node: id, zone });
        };
        slot.zone = Some(zone_id);
        debug!(node = id.0, zone, "zone assigned");
        Ok(())
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of undirected roads (each counted once).
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    /// One past the largest slot index.  Shortest-path tables are this long.
    #[inline]
    pub fn id_bound(&self) -> usize {
        self.slots.len()
    }

    // ── Node queries ──────────────────────────────────────────────────────

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.slot(id).is_some()
    }

    /// Zone of `id`; `None` if the node is unknown or has no zone yet.
    pub fn zone(&self, id: NodeId) -> Option<ZoneId> {
        self.slot(id).and_then(|s| s.zone)
    }

    /// All nodes tagged with `zone`, in ascending id order.
    pub fn nodes_in_zone(&self, zone: ZoneId) -> Vec<NodeId> {
        self.iter_slots()
            .filter(|(_, s)| s.zone == Some(zone))
            .map(|(id, _)| id)
            .collect()
    }

    /// Every known node id, ascending.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.iter_slots().map(|(id, _)| id)
    }

    /// Outgoing roads of `id` in insertion order.  Empty for unknown nodes.
    #[inline]
    pub fn neighbors(&self, id: NodeId) -> &[Road] {
        self.slot(id).map_or(&[], |s| s.roads.as_slice())
    }

    /// Weight of the direct road between `from` and `to`, if one exists.
    pub fn direct_distance(&self, from: NodeId, to: NodeId) -> Option<u64> {
        self.slot(from).and_then(|s| s.road_to(to)).map(|r| r.weight)
    }

    // ── Shortest paths (default Dijkstra) ─────────────────────────────────

    /// Single-source shortest paths from `source` using [`HeapDijkstra`].
    pub fn shortest_paths(&self, source: NodeId) -> NetworkResult<ShortestPaths> {
        HeapDijkstra.shortest_paths(self, source)
    }

    /// Shortest distance from `a` to `b`.  `Unreachable` if either node is
    /// unknown or no path joins them.
    pub fn distance_between(&self, a: NodeId, b: NodeId) -> Distance {
        HeapDijkstra.distance_between(self, a, b)
    }

    /// Node sequence of a shortest path from `a` to `b`, endpoints included.
    /// Empty if either node is unknown or no path joins them.
    pub fn path_between(&self, a: NodeId, b: NodeId) -> Vec<NodeId> {
        HeapDijkstra.path_between(self, a, b)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    #[inline]
    fn slot(&self, id: NodeId) -> Option<&NodeSlot> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    #[inline]
    fn slot_mut(&mut self, id: NodeId) -> Option<&mut NodeSlot> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    fn iter_slots(&self) -> impl Iterator<Item = (NodeId, &NodeSlot)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|s| (NodeId(i as u32), s)))
    }
}
