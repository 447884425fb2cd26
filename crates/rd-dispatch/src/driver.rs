//! Driver record.

use std::fmt;

use rd_core::{DriverId, NodeId, ZoneId};

/// Availability of a driver.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DriverStatus {
    /// Free to take a new trip.
    #[default]
    Available,
    /// Matched to a trip, on the way to the pickup.
    Assigned,
    /// Carrying a rider.
    OnTrip,
    /// Registered but not accepting trips.
    Offline,
}

impl DriverStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DriverStatus::Available => "AVAILABLE",
            DriverStatus::Assigned  => "ASSIGNED",
            DriverStatus::OnTrip    => "ON_TRIP",
            DriverStatus::Offline   => "OFFLINE",
        }
    }
}

impl fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A driver as registered with the engine.
///
/// Once registered, `location` and `status` change only through engine
/// operations; the engine hands out shared references only.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Driver {
    pub id:       DriverId,
    /// Node the driver is currently at.
    pub location: NodeId,
    /// Zone the driver operates in.  Compared against the pickup node's zone
    /// when scoring.
    pub zone:     ZoneId,
    pub status:   DriverStatus,
}

impl Driver {
    /// A new, available driver.
    pub fn new(id: DriverId, location: NodeId, zone: ZoneId) -> Self {
        Self { id, location, zone, status: DriverStatus::Available }
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.status == DriverStatus::Available
    }

    /// Set the status and return the previous one.
    pub(crate) fn set_status(&mut self, status: DriverStatus) -> DriverStatus {
        std::mem::replace(&mut self.status, status)
    }

    /// Move to `node` and return the previous location.
    pub(crate) fn move_to(&mut self, node: NodeId) -> NodeId {
        std::mem::replace(&mut self.location, node)
    }
}
