//! Dispatch configuration: zone scoring weights, trip numbering, and fares.

use crate::{CoreError, CoreResult, TripId};

// ── Tariff ────────────────────────────────────────────────────────────────────

/// Linear fare model: `base_fare + distance * rate_per_unit`.
///
/// The fare is informational.  It is not reduced when a trip is cancelled.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tariff {
    /// Flat charge applied to every trip.  Default: 50.0.
    pub base_fare: f64,
    /// Charge per unit of route distance.  Default: 10.0.
    pub rate_per_unit: f64,
}

impl Tariff {
    pub const DEFAULT_BASE_FARE: f64 = 50.0;
    pub const DEFAULT_RATE_PER_UNIT: f64 = 10.0;

    /// Fare for a route of `distance` units.
    #[inline]
    pub fn fare(&self, distance: u64) -> f64 {
        self.base_fare + distance as f64 * self.rate_per_unit
    }
}

impl Default for Tariff {
    fn default() -> Self {
        Self {
            base_fare:     Self::DEFAULT_BASE_FARE,
            rate_per_unit: Self::DEFAULT_RATE_PER_UNIT,
        }
    }
}

// ── DispatchConfig ────────────────────────────────────────────────────────────

/// Tunables for the dispatch engine.
///
/// Typically built with `Default` and adjusted field-by-field, or loaded from
/// a JSON/TOML file by the application (with the `serde` feature).
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DispatchConfig {
    /// Added to a driver's pickup distance when the driver's zone matches the
    /// pickup node's zone.  Must be `<= 0`.  Default: -10.
    pub same_zone_bonus: i64,

    /// Added to a driver's pickup distance otherwise.  Must be `>= 0`.
    /// Default: +20.
    pub cross_zone_penalty: i64,

    /// Identifier given to the first trip; later trips count up from here.
    /// Default: 1000.
    pub first_trip_id: TripId,

    /// Fare model stamped onto every new trip.
    pub tariff: Tariff,
}

impl DispatchConfig {
    pub const DEFAULT_SAME_ZONE_BONUS: i64 = -10;
    pub const DEFAULT_CROSS_ZONE_PENALTY: i64 = 20;
    pub const DEFAULT_FIRST_TRIP_ID: TripId = TripId(1000);

    /// Check the sign constraints on the scoring weights and that the tariff
    /// is finite and non-negative.
    pub fn validate(&self) -> CoreResult<()> {
        if self.same_zone_bonus > 0 {
            return Err(CoreError::Config(format!(
                "same_zone_bonus must be <= 0, got {}",
                self.same_zone_bonus
            )));
        }
        if self.cross_zone_penalty < 0 {
            return Err(CoreError::Config(format!(
                "cross_zone_penalty must be >= 0, got {}",
                self.cross_zone_penalty
            )));
        }
        for (name, v) in [
            ("tariff.base_fare",     self.tariff.base_fare),
            ("tariff.rate_per_unit", self.tariff.rate_per_unit),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(CoreError::Config(format!(
                    "{name} must be finite and >= 0, got {v}"
                )));
            }
        }
        Ok(())
    }

    /// Zone adjustment for a driver whose zone does (or does not) match the
    /// pickup zone.
    #[inline]
    pub fn zone_adjustment(&self, same_zone: bool) -> i64 {
        if same_zone { self.same_zone_bonus } else { self.cross_zone_penalty }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            same_zone_bonus:    Self::DEFAULT_SAME_ZONE_BONUS,
            cross_zone_penalty: Self::DEFAULT_CROSS_ZONE_PENALTY,
            first_trip_id:      Self::DEFAULT_FIRST_TRIP_ID,
            tariff:             Tariff::default(),
        }
    }
}
