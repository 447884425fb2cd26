//! Strongly typed identifier wrappers.
//!
//! Every identifier in the dispatch core is an opaque non-negative integer.
//! Nodes, drivers, and riders are numbered by the caller; trips are numbered
//! by the engine.  All IDs are `Copy + Ord + Hash` so they can be used as map
//! keys and sorted collection elements without ceremony.
//!
//! Absence is spelled `Option<ZoneId>` / `Option<DriverId>`; no ID type has a
//! sentinel value.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// The identifier that follows this one, or `None` at the top of
            /// the range.
            #[inline]
            pub fn next(self) -> Option<$name> {
                self.0.checked_add(1).map($name)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }

        /// Rejects negative values.
        impl TryFrom<i64> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: i64) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// A location in the road network.  Doubles as the node's slot index.
    pub struct NodeId(u32);
}

typed_id! {
    /// A coarse partition tag on a node, used to bias dispatch scoring.
    pub struct ZoneId(u32);
}

typed_id! {
    /// A registered driver.
    pub struct DriverId(u32);
}

typed_id! {
    /// A rider requesting trips.
    pub struct RiderId(u32);
}

typed_id! {
    /// A trip record, assigned monotonically by the dispatch engine.
    pub struct TripId(u32);
}
