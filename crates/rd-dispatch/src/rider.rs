//! Rider record.

use rd_core::{NodeId, RiderId};

use crate::{DispatchError, DispatchResult};

/// A rider and the trip they want.
///
/// `pickup`/`dropoff` describe the current request.  While a trip is active
/// the engine refuses a new request from the same rider, so the locations of
/// an in-progress trip cannot be swapped out from under it.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rider {
    pub id:      RiderId,
    pub pickup:  NodeId,
    pub dropoff: NodeId,
    active_trip: bool,
}

impl Rider {
    pub fn new(id: RiderId, pickup: NodeId, dropoff: NodeId) -> Self {
        Self { id, pickup, dropoff, active_trip: false }
    }

    #[inline]
    pub fn has_active_trip(&self) -> bool {
        self.active_trip
    }

    /// Reject a request while a trip is still in progress.
    pub fn validate_request(&self) -> DispatchResult<()> {
        if self.active_trip {
            return Err(DispatchError::RiderBusy(self.id));
        }
        Ok(())
    }

    pub(crate) fn set_active_trip(&mut self, active: bool) {
        self.active_trip = active;
    }
}
