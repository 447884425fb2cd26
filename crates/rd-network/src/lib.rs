//! `rd-network` — zoned road network and shortest paths.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`network`] | `RoadNetwork` (slot table + adjacency), `Road`, `SharedNetwork` |
//! | [`router`]  | `PathFinder` trait, `ShortestPaths`, `HeapDijkstra`, `ScanDijkstra` |
//! | [`loader`]  | `load_roads_reader`, `load_zones_reader` (CSV)              |
//! | [`error`]   | `NetworkError`, `NetworkResult<T>`                          |

pub mod error;
pub mod loader;
pub mod network;
pub mod router;

#[cfg(test)]
mod tests;

pub use error::{NetworkError, NetworkResult};
pub use loader::{load_roads_csv, load_roads_reader, load_zones_csv, load_zones_reader};
pub use network::{Road, RoadNetwork, SharedNetwork};
pub use router::{HeapDijkstra, PathFinder, ScanDijkstra, ShortestPaths};
