//! `rd-core` — foundational types for the ride-dispatch core.
//!
//! This crate is a dependency of every other `rd-*` crate.  It has no `rd-*`
//! dependencies and a single required external one (`thiserror`), plus
//! optional `serde`.
//!
//! # What lives here
//!
//! | Module         | Contents                                              |
//! |----------------|-------------------------------------------------------|
//! | [`ids`]        | `NodeId`, `ZoneId`, `DriverId`, `RiderId`, `TripId`   |
//! | [`distance`]   | `Distance` (`Reachable(u64)` / `Unreachable`)         |
//! | [`config`]     | `DispatchConfig`, `Tariff`                            |
//! | [`error`]      | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod distance;
pub mod error;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{DispatchConfig, Tariff};
pub use distance::Distance;
pub use error::{CoreError, CoreResult};
pub use ids::{DriverId, NodeId, RiderId, TripId, ZoneId};
