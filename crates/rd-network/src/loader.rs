//! CSV road and zone loaders.
//!
//! # CSV formats
//!
//! Roads, one undirected road per row:
//!
//! ```csv
//! from,to,weight
//! 0,1,5
//! 0,2,10
//! ```
//!
//! Endpoints that are not in the network yet are created on the fly, so a
//! road file alone is enough to build a connected city.
//!
//! Zones, one node per row:
//!
//! ```csv
//! node,zone
//! 0,1
//! 1,1
//! ```
//!
//! A row that fails validation (self-loop, duplicate road, negative zone, …)
//! aborts the load with the matching [`NetworkError`]; rows before it stay
//! applied.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use rd_core::NodeId;

use crate::{NetworkError, NetworkResult, RoadNetwork};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RoadRecord {
    from:   u32,
    to:     u32,
    weight: i64,
}

#[derive(Deserialize)]
struct ZoneRecord {
    node: u32,
    zone: i32,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load roads from a CSV file into `network`.  Returns the number of roads
/// added.
pub fn load_roads_csv(network: &mut RoadNetwork, path: &Path) -> NetworkResult<usize> {
    let file = std::fs::File::open(path)?;
    load_roads_reader(network, file)
}

/// Like [`load_roads_csv`] but accepts any `Read` source.
pub fn load_roads_reader<R: Read>(network: &mut RoadNetwork, reader: R) -> NetworkResult<usize> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut added = 0;

    for result in csv_reader.deserialize::<RoadRecord>() {
        let row = result.map_err(|e| NetworkError::Parse(e.to_string()))?;
        let (from, to) = (NodeId(row.from), NodeId(row.to));
        for id in [from, to] {
            if !network.contains(id) {
                network.add_node(id)?;
            }
        }
        network.add_edge(from, to, row.weight)?;
        added += 1;
    }

    Ok(added)
}

/// Load zone tags from a CSV file.  Returns the number of nodes tagged.
pub fn load_zones_csv(network: &mut RoadNetwork, path: &Path) -> NetworkResult<usize> {
    let file = std::fs::File::open(path)?;
    load_zones_reader(network, file)
}

/// Like [`load_zones_csv`] but accepts any `Read` source.
pub fn load_zones_reader<R: Read>(network: &mut RoadNetwork, reader: R) -> NetworkResult<usize> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut tagged = 0;

    for result in csv_reader.deserialize::<ZoneRecord>() {
        let row = result.map_err(|e| NetworkError::Parse(e.to_string()))?;
        network.set_zone(NodeId(row.node), row.zone)?;
        tagged += 1;
    }

    Ok(tagged)
}
