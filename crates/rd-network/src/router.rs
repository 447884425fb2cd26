//! Shortest-path trait, result table, and two Dijkstra implementations.
//!
//! # Pluggability
//!
//! `rd-dispatch` queries distances through the [`PathFinder`] trait, so an
//! application can swap the algorithm without touching the engine.  Two
//! implementations ship here:
//!
//! | Type           | Selection step            | Cost            |
//! |----------------|---------------------------|-----------------|
//! | `HeapDijkstra` | binary heap (default)     | O((V+E) log V)  |
//! | `ScanDijkstra` | linear scan of all slots  | O(V²)           |
//!
//! Both report identical distances for the same network.
//!
//! # Tie-breaking
//!
//! Results are deterministic for a fixed network.  When several shortest
//! paths have the same length, *which* predecessor is recorded is not
//! specified and may differ between the two implementations; only the
//! distances are guaranteed to agree.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rd_core::{Distance, NodeId};

use crate::network::RoadNetwork;
use crate::{NetworkError, NetworkResult};

// ── ShortestPaths ─────────────────────────────────────────────────────────────

/// Distances and predecessors from one source to every node.
///
/// Tables are indexed by `NodeId` and span [`RoadNetwork::id_bound`] slots;
/// ids outside that range, and ids of nodes that do not exist, report
/// `Unreachable`.
#[derive(Clone, Debug)]
pub struct ShortestPaths {
    source: NodeId,
    dist:   Vec<Distance>,
    prev:   Vec<Option<NodeId>>,
}

impl ShortestPaths {
    /// Fresh table with only the source reached (distance 0).
    fn seeded(source: NodeId, len: usize) -> Self {
        let mut dist = vec![Distance::Unreachable; len];
        dist[source.index()] = Distance::ZERO;
        Self { source, dist, prev: vec![None; len] }
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Shortest distance from the source to `node`.
    #[inline]
    pub fn distance_to(&self, node: NodeId) -> Distance {
        self.dist.get(node.index()).copied().unwrap_or(Distance::Unreachable)
    }

    /// Previous node on the recorded shortest path to `node`.  `None` for the
    /// source itself and for unreached nodes.
    #[inline]
    pub fn predecessor(&self, node: NodeId) -> Option<NodeId> {
        self.prev.get(node.index()).copied().flatten()
    }

    /// Node sequence from the source to `destination`, both included.
    pub fn path_to(&self, destination: NodeId) -> NetworkResult<Vec<NodeId>> {
        if !self.distance_to(destination).is_reachable() {
            return Err(NetworkError::NoPath { from: self.source, to: destination });
        }
        let mut path = vec![destination];
        let mut cur  = destination;
        while let Some(p) = self.predecessor(cur) {
            path.push(p);
            cur = p;
        }
        path.reverse();
        Ok(path)
    }

    /// Every reached node with its distance, ascending by id.
    pub fn reachable(&self) -> impl Iterator<Item = (NodeId, u64)> + '_ {
        self.dist
            .iter()
            .enumerate()
            .filter_map(|(i, d)| d.value().map(|d| (NodeId(i as u32), d)))
    }

    /// Relax the road `from -> to` of length `weight`.  Returns `true` when
    /// `to` improved.
    #[inline]
    fn relax(&mut self, from: NodeId, to: NodeId, weight: u64) -> bool {
        let candidate = self.dist[from.index()].add_weight(weight);
        if candidate < self.dist[to.index()] {
            self.dist[to.index()] = candidate;
            self.prev[to.index()] = Some(from);
            true
        } else {
            false
        }
    }
}

// ── PathFinder trait ──────────────────────────────────────────────────────────

/// Pluggable single-source shortest-path engine.
///
/// Implementations must be `Send + Sync` so a dispatch engine holding one
/// can be shared across threads.
pub trait PathFinder: Send + Sync {
    /// Compute distances and predecessors from `source` to every node.
    ///
    /// Fails with [`NetworkError::UnknownNode`] if `source` is absent.
    fn shortest_paths(&self, network: &RoadNetwork, source: NodeId) -> NetworkResult<ShortestPaths>;

    /// Shortest distance from `a` to `b`; `Unreachable` for unknown nodes.
    fn distance_between(&self, network: &RoadNetwork, a: NodeId, b: NodeId) -> Distance {
        match self.shortest_paths(network, a) {
            Ok(paths) => paths.distance_to(b),
            Err(_)    => Distance::Unreachable,
        }
    }

    /// Shortest path from `a` to `b`; empty for unknown nodes or no path.
    fn path_between(&self, network: &RoadNetwork, a: NodeId, b: NodeId) -> Vec<NodeId> {
        self.shortest_paths(network, a)
            .and_then(|paths| paths.path_to(b))
            .unwrap_or_default()
    }
}

// ── HeapDijkstra ──────────────────────────────────────────────────────────────

/// Dijkstra with a binary min-heap keyed by `(distance, NodeId)`.
///
/// Stale heap entries are skipped on pop; the loop ends when the heap runs
/// dry, i.e. when no unvisited node has a finite tentative distance.
#[derive(Copy, Clone, Debug, Default)]
pub struct HeapDijkstra;

impl PathFinder for HeapDijkstra {
    fn shortest_paths(&self, network: &RoadNetwork, source: NodeId) -> NetworkResult<ShortestPaths> {
        if !network.contains(source) {
            return Err(NetworkError::UnknownNode(source));
        }

        let mut paths   = ShortestPaths::seeded(source, network.id_bound());
        let mut visited = vec![false; network.id_bound()];

        // Reverse turns the max-heap into a min-heap.  NodeId as secondary
        // key keeps pop order deterministic.
        let mut heap: BinaryHeap<Reverse<(u64, NodeId)>> = BinaryHeap::new();
        heap.push(Reverse((0, source)));

        while let Some(Reverse((_, node))) = heap.pop() {
            if visited[node.index()] {
                continue;
            }
            visited[node.index()] = true;

            for road in network.neighbors(node) {
                if visited[road.to.index()] {
                    continue;
                }
                if paths.relax(node, road.to, road.weight) {
                    if let Distance::Reachable(d) = paths.distance_to(road.to) {
                        heap.push(Reverse((d, road.to)));
                    }
                }
            }
        }

        Ok(paths)
    }
}

// ── ScanDijkstra ──────────────────────────────────────────────────────────────

/// Textbook Dijkstra: each round scans every slot for the unvisited node with
/// the smallest finite distance (lowest id on ties).
///
/// Adequate for small cities; mainly useful as a cross-check for
/// [`HeapDijkstra`].
#[derive(Copy, Clone, Debug, Default)]
pub struct ScanDijkstra;

impl PathFinder for ScanDijkstra {
    fn shortest_paths(&self, network: &RoadNetwork, source: NodeId) -> NetworkResult<ShortestPaths> {
        if !network.contains(source) {
            return Err(NetworkError::UnknownNode(source));
        }

        let n = network.id_bound();
        let mut paths   = ShortestPaths::seeded(source, n);
        let mut visited = vec![false; n];

        loop {
            let mut current: Option<(u64, usize)> = None;
            for (i, seen) in visited.iter().enumerate() {
                if *seen {
                    continue;
                }
                if let Distance::Reachable(d) = paths.dist[i] {
                    if current.is_none_or(|(best, _)| d < best) {
                        current = Some((d, i));
                    }
                }
            }
            let Some((_, i)) = current else { break };

            visited[i] = true;
            let node = NodeId(i as u32);
            for road in network.neighbors(node) {
                if !visited[road.to.index()] {
                    paths.relax(node, road.to, road.weight);
                }
            }
        }

        Ok(paths)
    }
}
