//! `rd-dispatch` — riders, drivers, trips, and the greedy dispatch engine.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`driver`]   | `Driver`, `DriverStatus`                                 |
//! | [`rider`]    | `Rider`                                                  |
//! | [`trip`]     | `Trip`, `TripState` (lifecycle state machine + fare)      |
//! | [`store`]    | `Registry` owning all entity records                     |
//! | [`engine`]   | `DispatchEngine`, `DispatchStatus`                       |
//! | [`shared`]   | `SharedDispatch` (thread-safe handle)                    |
//! | [`observer`] | `DispatchObserver`, `NoopObserver`                       |
//! | [`error`]    | `DispatchError`, `TripError`, `DispatchResult<T>`        |
//!
//! # Quick start
//!
//! ```rust,ignore
//! let mut city = RoadNetwork::new();
//! // … add nodes, roads, zones …
//! let mut engine = DispatchEngine::new(city.into_shared(), DispatchConfig::default())?;
//! engine.register_driver(Driver::new(DriverId(101), NodeId(0), ZoneId(1)))?;
//! let trip = engine.request_trip(Rider::new(RiderId(500), NodeId(1), NodeId(5)))?;
//! assert_eq!(trip.state(), TripState::Ongoing);
//! ```
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on records and `DispatchStatus`.   |

pub mod driver;
pub mod engine;
pub mod error;
pub mod observer;
pub mod rider;
pub mod shared;
pub mod store;
pub mod trip;


pub use driver::{Driver, DriverStatus};
pub use engine::{DispatchEngine, DispatchStatus};
pub use error::{DispatchError, DispatchResult, TripError};
pub use observer::{DispatchObserver, NoopObserver};
pub use rider::Rider;
pub use shared::SharedDispatch;
pub use store::Registry;
pub use trip::{Trip, TripState};
