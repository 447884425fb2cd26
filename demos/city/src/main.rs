//! city — ride dispatch over a six-node, three-zone toy city.
//!
//! Registers three drivers, replays a seeded stream of ride requests, and
//! completes or cancels each trip.  Lifecycle events go to `tracing`; set
//! `RUST_LOG=debug` to see the engine's own diagnostics as well.

mod network;

use anyhow::Result;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rd_core::{DispatchConfig, DriverId, NodeId, RiderId, TripId, ZoneId};
use rd_dispatch::{
    DispatchEngine, DispatchObserver, Driver, DriverStatus, Rider, Trip, TripState,
};

use network::{build_city, NODE_COUNT};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:          u64 = 42;
const REQUESTS:      u32 = 12;
const FIRST_RIDER:   u32 = 500;
const COMPLETE_RATE: f64 = 0.8; // the rest are cancelled mid-trip

const CONFIG_JSON: &str = r#"{
    "same_zone_bonus": -10,
    "cross_zone_penalty": 20,
    "first_trip_id": 1000,
    "tariff": { "base_fare": 50.0, "rate_per_unit": 10.0 }
}"#;

/// `(id, node, zone)`.
const FLEET: [(u32, u32, u32); 3] = [(101, 0, 1), (102, 2, 2), (103, 4, 3)];

// ── Observer ──────────────────────────────────────────────────────────────────

/// Logs trip and driver lifecycle at `info`.
struct TraceObserver;

impl DispatchObserver for TraceObserver {
    fn on_driver_registered(&mut self, driver: &Driver) {
        info!(driver = %driver.id, location = %driver.location, zone = %driver.zone, "driver online");
    }

    fn on_trip_opened(&mut self, trip: &Trip) {
        info!(
            trip    = %trip.id(),
            rider   = %trip.rider(),
            pickup  = %trip.pickup(),
            dropoff = %trip.dropoff(),
            fare    = trip.fare(),
            "trip requested"
        );
    }

    fn on_trip_transition(&mut self, trip: TripId, from: TripState, to: TripState) {
        info!(trip = %trip, %from, %to, "trip state");
    }

    fn on_driver_moved(&mut self, driver: DriverId, from: NodeId, to: NodeId) {
        info!(driver = %driver, %from, %to, "driver dropped off rider");
    }

    fn on_driver_status(&mut self, driver: DriverId, from: DriverStatus, to: DriverStatus) {
        info!(driver = %driver, %from, %to, "driver status");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 1. Road network.
    let city = build_city()?;
    info!(nodes = city.node_count(), roads = city.edge_count(), "city loaded");

    // 2. Engine.
    let config: DispatchConfig = serde_json::from_str(CONFIG_JSON)?;
    let mut engine = DispatchEngine::new(city.into_shared(), config)?;
    engine.subscribe(Box::new(TraceObserver));

    // 3. Drivers.
    for (id, node, zone) in FLEET {
        engine.register_driver(Driver::new(DriverId(id), NodeId(node), ZoneId(zone)))?;
    }

    // 4. Replay requests.  Each trip is finished before the next request, so
    //    drivers are recycled across the run.
    let mut rng = SmallRng::seed_from_u64(SEED);
    let mut revenue = 0.0;
    let mut unserved = 0;

    for i in 0..REQUESTS {
        let rider = Rider::new(
            RiderId(FIRST_RIDER + i % 4),
            NodeId(rng.gen_range(0..NODE_COUNT)),
            NodeId(rng.gen_range(0..NODE_COUNT)),
        );

        let (id, state, fare) = match engine.request_trip(rider) {
            Ok(trip) => (trip.id(), trip.state(), trip.fare()),
            Err(e) => {
                info!(error = %e, "request rejected");
                continue;
            }
        };

        match state {
            TripState::Ongoing if rng.gen_bool(COMPLETE_RATE) => {
                let route = engine.trip_route(id)?;
                info!(trip = %id, hops = route.len().saturating_sub(1), "route");
                engine.complete_trip(id)?;
                revenue += fare;
            }
            TripState::Requested => {
                unserved += 1;
                engine.cancel_trip(id)?;
            }
            _ => engine.cancel_trip(id)?,
        }
    }

    // 5. Summary.
    let status = engine.status();
    info!(%status, "dispatch finished");
    let completed = engine
        .registry()
        .trips()
        .filter(|t| t.state() == TripState::Completed)
        .count();

    println!();
    println!("Trips completed : {completed} / {}", status.total_trips);
    println!("Unserved        : {unserved}");
    println!("Revenue         : {revenue:.2}");
    println!();
    println!("{:<8} {:<10} {:<6}", "Driver", "Status", "Node");
    println!("{}", "-".repeat(26));
    for (id, _, _) in FLEET {
        if let Some(d) = engine.driver(DriverId(id)) {
            println!("{:<8} {:<10} {:<6}", id, d.status.as_str(), d.location.0);
        }
    }

    Ok(())
}
