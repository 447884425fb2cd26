//! Unit tests for rd-network.
//!
//! All tests use hand-crafted networks; the loader tests write their CSV to
//! a temp dir.

#[cfg(test)]
mod helpers {
    use rd_core::NodeId;
    use crate::RoadNetwork;

    /// Six-node, three-zone city.
    ///
    /// ```text
    ///   0 --5-- 1
    ///   |       |
    ///  10       3
    ///   |       |
    ///   2 --7-- 3 --4-- 4 --6-- 5
    /// ```
    ///
    /// Zones: {0,1} → 1, {2,3} → 2, {4,5} → 3.
    /// Shortest 0→5 is 0→1→3→4→5 = 18.
    pub fn city() -> RoadNetwork {
        let mut net = RoadNetwork::new();
        for i in 0..6 {
            net.add_node(NodeId(i)).unwrap();
        }
        for (a, b, w) in [(0, 1, 5), (0, 2, 10), (1, 3, 3), (2, 3, 7), (3, 4, 4), (4, 5, 6)] {
            net.add_edge(NodeId(a), NodeId(b), w).unwrap();
        }
        for (n, z) in [(0, 1), (1, 1), (2, 2), (3, 2), (4, 3), (5, 3)] {
            net.set_zone(NodeId(n), z).unwrap();
        }
        net
    }

    /// Sum of road weights along `path`.  Panics if a hop has no road.
    pub fn path_weight(net: &RoadNetwork, path: &[NodeId]) -> u64 {
        path.windows(2)
            .map(|w| net.direct_distance(w[0], w[1]).expect("hop without a road"))
            .sum()
    }
}

// ── Construction & validation ─────────────────────────────────────────────────

#[cfg(test)]
mod construction {
    use rd_core::NodeId;
    use crate::{NetworkError, RoadNetwork};

    #[test]
    fn empty_network() {
        let net = RoadNetwork::new();
        assert_eq!(net.node_count(), 0);
        assert_eq!(net.edge_count(), 0);
        assert!(net.is_empty());
    }

    #[test]
    fn new_node_is_isolated_and_unzoned() {
        let mut net = RoadNetwork::new();
        net.add_node(NodeId(3)).unwrap();
        assert!(net.contains(NodeId(3)));
        assert!(net.neighbors(NodeId(3)).is_empty());
        assert_eq!(net.zone(NodeId(3)), None);
    }

    #[test]
    fn sparse_ids_leave_gaps() {
        let mut net = RoadNetwork::new();
        net.add_node(NodeId(7)).unwrap();
        assert_eq!(net.node_count(), 1);
        assert_eq!(net.id_bound(), 8);
        assert!(!net.contains(NodeId(0)));
        assert_eq!(net.node_ids().collect::<Vec<_>>(), vec![NodeId(7)]);
    }

    #[test]
    fn duplicate_node_rejected() {
        let mut net = RoadNetwork::new();
        net.add_node(NodeId(0)).unwrap();
        let err = net.add_node(NodeId(0)).unwrap_err();
        assert!(matches!(err, NetworkError::DuplicateNode(NodeId(0))));
        assert_eq!(net.node_count(), 1);
    }

    #[test]
    fn huge_id_rejected_without_growing() {
        let mut net = RoadNetwork::new();
        let err = net.add_node(NodeId(u32::MAX)).unwrap_err();
        assert!(matches!(
            err,
            NetworkError::NodeIdTooLarge { id: NodeId(u32::MAX), limit: RoadNetwork::DEFAULT_ID_LIMIT }
        ));
        assert_eq!(net.node_count(), 0);
        assert_eq!(net.id_bound(), 0);
    }

    #[test]
    fn custom_id_limit() {
        let mut net = RoadNetwork::new().with_id_limit(10);
        assert_eq!(net.id_limit(), 10);
        net.add_node(NodeId(9)).unwrap();
        assert!(matches!(
            net.add_node(NodeId(10)),
            Err(NetworkError::NodeIdTooLarge { id: NodeId(10), limit: 10 })
        ));
        assert_eq!(net.id_bound(), 10);
    }

    #[test]
    fn edge_is_symmetric() {
        let mut net = RoadNetwork::new();
        net.add_node(NodeId(0)).unwrap();
        net.add_node(NodeId(1)).unwrap();
        net.add_edge(NodeId(0), NodeId(1), 9).unwrap();
        assert_eq!(net.direct_distance(NodeId(0), NodeId(1)), Some(9));
        assert_eq!(net.direct_distance(NodeId(1), NodeId(0)), Some(9));
        assert_eq!(net.edge_count(), 1);
    }

    #[test]
    fn edge_to_unknown_node_rejected() {
        let mut net = RoadNetwork::new();
        net.add_node(NodeId(0)).unwrap();
        let err = net.add_edge(NodeId(0), NodeId(4), 1).unwrap_err();
        assert!(matches!(err, NetworkError::UnknownNode(NodeId(4))));
        let err = net.add_edge(NodeId(4), NodeId(0), 1).unwrap_err();
        assert!(matches!(err, NetworkError::UnknownNode(NodeId(4))));
    }

    #[test]
    fn self_loop_rejected() {
        let mut net = RoadNetwork::new();
        net.add_node(NodeId(0)).unwrap();
        let err = net.add_edge(NodeId(0), NodeId(0), 1).unwrap_err();
        assert!(matches!(err, NetworkError::SelfLoop(NodeId(0))));
    }

    #[test]
    fn non_positive_weight_rejected() {
        let mut net = RoadNetwork::new();
        net.add_node(NodeId(0)).unwrap();
        net.add_node(NodeId(1)).unwrap();
        for w in [0, -3] {
            let err = net.add_edge(NodeId(0), NodeId(1), w).unwrap_err();
            assert!(matches!(err, NetworkError::NonPositiveWeight { weight, .. } if weight == w));
        }
        assert_eq!(net.edge_count(), 0);
    }

    #[test]
    fn duplicate_edge_rejected_in_either_direction() {
        let mut net = RoadNetwork::new();
        net.add_node(NodeId(0)).unwrap();
        net.add_node(NodeId(1)).unwrap();
        net.add_edge(NodeId(0), NodeId(1), 2).unwrap();
        assert!(matches!(
            net.add_edge(NodeId(0), NodeId(1), 4),
            Err(NetworkError::DuplicateEdge { .. })
        ));
        assert!(matches!(
            net.add_edge(NodeId(1), NodeId(0), 4),
            Err(NetworkError::DuplicateEdge { .. })
        ));
        assert_eq!(net.direct_distance(NodeId(0), NodeId(1)), Some(2));
    }

    #[test]
    fn neighbors_in_insertion_order() {
        let net = super::helpers::city();
        let to: Vec<_> = net.neighbors(NodeId(3)).iter().map(|r| r.to).collect();
        assert_eq!(to, vec![NodeId(1), NodeId(2), NodeId(4)]);
        assert!(net.neighbors(NodeId(99)).is_empty());
    }
}

// ── Zones ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod zones {
    use rd_core::{NodeId, ZoneId};
    use crate::{NetworkError, RoadNetwork};

    #[test]
    fn set_and_overwrite_zone() {
        let mut net = RoadNetwork::new();
        net.add_node(NodeId(0)).unwrap();
        net.set_zone(NodeId(0), 4).unwrap();
        assert_eq!(net.zone(NodeId(0)), Some(ZoneId(4)));
        net.set_zone(NodeId(0), 2).unwrap();
        assert_eq!(net.zone(NodeId(0)), Some(ZoneId(2)));
    }

    #[test]
    fn zone_on_unknown_node_rejected() {
        let mut net = RoadNetwork::new();
        let err = net.set_zone(NodeId(1), 1).unwrap_err();
        assert!(matches!(err, NetworkError::UnknownNode(NodeId(1))));
    }

    #[test]
    fn negative_zone_rejected_and_state_kept() {
        let mut net = RoadNetwork::new();
        net.add_node(NodeId(0)).unwrap();
        net.set_zone(NodeId(0), 2).unwrap();
        let err = net.set_zone(NodeId(0), -1).unwrap_err();
        assert!(matches!(err, NetworkError::NegativeZone { zone: -1, .. }));
        assert_eq!(net.zone(NodeId(0)), Some(ZoneId(2)));
    }

    #[test]
    fn nodes_in_zone_ascending() {
        let net = super::helpers::city();
        assert_eq!(net.nodes_in_zone(ZoneId(2)), vec![NodeId(2), NodeId(3)]);
        assert!(net.nodes_in_zone(ZoneId(9)).is_empty());
    }
}

// ── Dijkstra routing ──────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use rd_core::{Distance, NodeId};
    use crate::{HeapDijkstra, NetworkError, PathFinder, RoadNetwork, ScanDijkstra};

    #[test]
    fn city_distance_and_path() {
        let net = super::helpers::city();
        assert_eq!(net.distance_between(NodeId(0), NodeId(5)), Distance::Reachable(18));
        assert_eq!(
            net.path_between(NodeId(0), NodeId(5)),
            vec![NodeId(0), NodeId(1), NodeId(3), NodeId(4), NodeId(5)]
        );
    }

    #[test]
    fn source_distance_is_zero_with_trivial_path() {
        let net = super::helpers::city();
        let paths = net.shortest_paths(NodeId(2)).unwrap();
        assert_eq!(paths.source(), NodeId(2));
        assert_eq!(paths.distance_to(NodeId(2)), Distance::ZERO);
        assert_eq!(paths.predecessor(NodeId(2)), None);
        assert_eq!(paths.path_to(NodeId(2)).unwrap(), vec![NodeId(2)]);
    }

    #[test]
    fn all_distances_from_corner() {
        let net = super::helpers::city();
        let paths = net.shortest_paths(NodeId(0)).unwrap();
        let got: Vec<_> = paths.reachable().collect();
        assert_eq!(
            got,
            vec![
                (NodeId(0), 0),
                (NodeId(1), 5),
                (NodeId(2), 10),
                (NodeId(3), 8),
                (NodeId(4), 12),
                (NodeId(5), 18),
            ]
        );
    }

    #[test]
    fn unknown_source_rejected() {
        let net = super::helpers::city();
        assert!(matches!(
            net.shortest_paths(NodeId(42)),
            Err(NetworkError::UnknownNode(NodeId(42)))
        ));
        assert!(matches!(
            ScanDijkstra.shortest_paths(&net, NodeId(42)),
            Err(NetworkError::UnknownNode(NodeId(42)))
        ));
    }

    #[test]
    fn unknown_endpoints_report_unreachable() {
        let net = super::helpers::city();
        assert_eq!(net.distance_between(NodeId(42), NodeId(0)), Distance::Unreachable);
        assert_eq!(net.distance_between(NodeId(0), NodeId(42)), Distance::Unreachable);
        assert!(net.path_between(NodeId(0), NodeId(42)).is_empty());
    }

    #[test]
    fn disconnected_nodes_have_no_path() {
        let mut net = RoadNetwork::new();
        net.add_node(NodeId(0)).unwrap();
        net.add_node(NodeId(1)).unwrap();
        let paths = net.shortest_paths(NodeId(0)).unwrap();
        assert_eq!(paths.distance_to(NodeId(1)), Distance::Unreachable);
        assert_eq!(paths.predecessor(NodeId(1)), None);
        assert!(matches!(
            paths.path_to(NodeId(1)),
            Err(NetworkError::NoPath { from: NodeId(0), to: NodeId(1) })
        ));
        assert!(net.path_between(NodeId(0), NodeId(1)).is_empty());
    }

    #[test]
    fn new_road_shortens_route() {
        let mut net = super::helpers::city();
        assert_eq!(net.distance_between(NodeId(0), NodeId(4)), Distance::Reachable(12));
        net.add_edge(NodeId(0), NodeId(4), 2).unwrap();
        assert_eq!(net.distance_between(NodeId(0), NodeId(4)), Distance::Reachable(2));
        assert_eq!(net.distance_between(NodeId(0), NodeId(5)), Distance::Reachable(8));
    }

    #[test]
    fn scan_matches_heap_on_city() {
        let net = super::helpers::city();
        for s in net.node_ids() {
            let heap = HeapDijkstra.shortest_paths(&net, s).unwrap();
            let scan = ScanDijkstra.shortest_paths(&net, s).unwrap();
            for d in net.node_ids() {
                assert_eq!(heap.distance_to(d), scan.distance_to(d), "{s} -> {d}");
            }
        }
    }

    #[test]
    fn equal_length_paths_are_both_valid() {
        // Diamond: 0-1-3 and 0-2-3 both cost 4.
        let mut net = RoadNetwork::new();
        for i in 0..4 {
            net.add_node(NodeId(i)).unwrap();
        }
        net.add_edge(NodeId(0), NodeId(1), 2).unwrap();
        net.add_edge(NodeId(0), NodeId(2), 2).unwrap();
        net.add_edge(NodeId(1), NodeId(3), 2).unwrap();
        net.add_edge(NodeId(2), NodeId(3), 2).unwrap();

        for finder in [&HeapDijkstra as &dyn PathFinder, &ScanDijkstra] {
            let path = finder.path_between(&net, NodeId(0), NodeId(3));
            assert_eq!(path.len(), 3);
            assert_eq!(super::helpers::path_weight(&net, &path), 4);
        }
        // Same network state, same answer.
        assert_eq!(
            net.path_between(NodeId(0), NodeId(3)),
            net.path_between(NodeId(0), NodeId(3))
        );
    }

    #[test]
    fn shared_network_reads_through_lock() {
        let shared = super::helpers::city().into_shared();
        assert_eq!(shared.read().distance_between(NodeId(0), NodeId(5)), Distance::Reachable(18));
        shared.write().add_edge(NodeId(0), NodeId(5), 1).unwrap();
        assert_eq!(shared.read().distance_between(NodeId(0), NodeId(5)), Distance::Reachable(1));
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use rd_core::{Distance, NodeId, ZoneId};
    use crate::{
        load_roads_csv, load_roads_reader, load_zones_csv, load_zones_reader, NetworkError,
        RoadNetwork,
    };

    const ROADS: &str = "from,to,weight\n0,1,5\n0,2,10\n1,3,3\n2,3,7\n3,4,4\n4,5,6\n";
    const ZONES: &str = "node,zone\n0,1\n1,1\n2,2\n3,2\n4,3\n5,3\n";

    #[test]
    fn roads_create_missing_nodes() {
        let mut net = RoadNetwork::new();
        let added = load_roads_reader(&mut net, Cursor::new(ROADS)).unwrap();
        assert_eq!(added, 6);
        assert_eq!(net.node_count(), 6);
        assert_eq!(net.distance_between(NodeId(0), NodeId(5)), Distance::Reachable(18));
    }

    #[test]
    fn road_with_huge_node_id_rejected() {
        let mut net = RoadNetwork::new();
        let csv = "from,to,weight\n0,4294967295,5\n";
        assert!(matches!(
            load_roads_reader(&mut net, Cursor::new(csv)),
            Err(NetworkError::NodeIdTooLarge { id: NodeId(u32::MAX), .. })
        ));
        assert_eq!(net.id_bound(), 1);
    }

    #[test]
    fn zones_applied() {
        let mut net = RoadNetwork::new();
        load_roads_reader(&mut net, Cursor::new(ROADS)).unwrap();
        let tagged = load_zones_reader(&mut net, Cursor::new(ZONES)).unwrap();
        assert_eq!(tagged, 6);
        assert_eq!(net.zone(NodeId(4)), Some(ZoneId(3)));
    }

    #[test]
    fn malformed_row_is_parse_error() {
        let mut net = RoadNetwork::new();
        let err = load_roads_reader(&mut net, Cursor::new("from,to,weight\n0,x,5\n")).unwrap_err();
        assert!(matches!(err, NetworkError::Parse(_)));
    }

    #[test]
    fn invalid_row_surfaces_validation_error() {
        let mut net = RoadNetwork::new();
        let err = load_roads_reader(&mut net, Cursor::new("from,to,weight\n0,1,5\n1,1,2\n"))
            .unwrap_err();
        assert!(matches!(err, NetworkError::SelfLoop(NodeId(1))));
        // The first row stays applied.
        assert_eq!(net.edge_count(), 1);
    }

    #[test]
    fn zone_for_missing_node_rejected() {
        let mut net = RoadNetwork::new();
        let err = load_zones_reader(&mut net, Cursor::new("node,zone\n3,1\n")).unwrap_err();
        assert!(matches!(err, NetworkError::UnknownNode(NodeId(3))));
    }

    #[test]
    fn load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let roads = dir.path().join("roads.csv");
        let zones = dir.path().join("zones.csv");
        std::fs::write(&roads, ROADS).unwrap();
        std::fs::write(&zones, ZONES).unwrap();

        let mut net = RoadNetwork::new();
        load_roads_csv(&mut net, &roads).unwrap();
        load_zones_csv(&mut net, &zones).unwrap();
        assert_eq!(net.nodes_in_zone(ZoneId(1)), vec![NodeId(0), NodeId(1)]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut net = RoadNetwork::new();
        let err = load_roads_csv(&mut net, &dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, NetworkError::Io(_)));
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use rd_core::{Distance, NodeId};
    use crate::{HeapDijkstra, PathFinder, RoadNetwork, ScanDijkstra};

    /// Random network of up to 12 nodes.  Invalid roads (self-loops,
    /// duplicates) are skipped, mirroring what a caller would see.
    fn arb_network() -> impl Strategy<Value = RoadNetwork> {
        (1u32..12).prop_flat_map(|n| {
            prop::collection::vec((0..n, 0..n, 1i64..50), 0..30).prop_map(move |roads| {
                let mut net = RoadNetwork::new();
                for i in 0..n {
                    net.add_node(NodeId(i)).unwrap();
                }
                for (a, b, w) in roads {
                    let _ = net.add_edge(NodeId(a), NodeId(b), w);
                }
                net
            })
        })
    }

    proptest! {
        #[test]
        fn distance_to_source_is_zero(net in arb_network()) {
            for s in net.node_ids() {
                let paths = net.shortest_paths(s).unwrap();
                prop_assert_eq!(paths.distance_to(s), Distance::ZERO);
            }
        }

        #[test]
        fn path_weight_equals_distance(net in arb_network()) {
            for s in net.node_ids() {
                let paths = net.shortest_paths(s).unwrap();
                for d in net.node_ids() {
                    match paths.distance_to(d) {
                        Distance::Reachable(len) => {
                            let path = paths.path_to(d).unwrap();
                            prop_assert_eq!(path.first().copied(), Some(s));
                            prop_assert_eq!(path.last().copied(), Some(d));
                            prop_assert_eq!(super::helpers::path_weight(&net, &path), len);
                        }
                        Distance::Unreachable => {
                            prop_assert!(paths.path_to(d).is_err());
                        }
                    }
                }
            }
        }

        #[test]
        fn distances_are_symmetric(net in arb_network()) {
            for a in net.node_ids() {
                for b in net.node_ids() {
                    prop_assert_eq!(net.distance_between(a, b), net.distance_between(b, a));
                }
            }
        }

        #[test]
        fn heap_and_scan_agree(net in arb_network()) {
            for s in net.node_ids() {
                let heap = HeapDijkstra.shortest_paths(&net, s).unwrap();
                let scan = ScanDijkstra.shortest_paths(&net, s).unwrap();
                for d in net.node_ids() {
                    prop_assert_eq!(heap.distance_to(d), scan.distance_to(d));
                }
            }
        }

        #[test]
        fn new_road_bounds_distance(
            mut net in arb_network(),
            a in 0u32..12,
            b in 0u32..12,
            w in 1i64..50,
        ) {
            let (a, b) = (NodeId(a), NodeId(b));
            if net.add_edge(a, b, w).is_ok() {
                prop_assert!(net.distance_between(a, b) <= Distance::Reachable(w as u64));
                // Triangle inequality holds through the new road.
                for c in net.node_ids() {
                    let via = net.distance_between(c, a).add_weight(w as u64);
                    prop_assert!(net.distance_between(c, b) <= via);
                }
            }
        }
    }
}
