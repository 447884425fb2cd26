//! Shortest-path distance with an explicit "unreachable" case.
//!
//! A max-integer "infinity" overflows as soon as a zone penalty is added to
//! it.  `Distance` keeps the two cases apart so arithmetic only ever happens
//! on real values.

use std::cmp::Ordering;
use std::fmt;

/// Result of a shortest-distance query.
///
/// Ordering: every `Reachable` value is smaller than `Unreachable`, and
/// reachable values compare by their length.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Distance {
    Reachable(u64),
    Unreachable,
}

impl Distance {
    pub const ZERO: Distance = Distance::Reachable(0);

    #[inline]
    pub fn is_reachable(self) -> bool {
        matches!(self, Distance::Reachable(_))
    }

    /// The length, or `None` when unreachable.
    #[inline]
    pub fn value(self) -> Option<u64> {
        match self {
            Distance::Reachable(d) => Some(d),
            Distance::Unreachable  => None,
        }
    }

    /// Extend a reachable distance by one edge.  Saturates at `u64::MAX`;
    /// `Unreachable` stays unreachable.
    #[inline]
    pub fn add_weight(self, weight: u64) -> Distance {
        match self {
            Distance::Reachable(d) => Distance::Reachable(d.saturating_add(weight)),
            Distance::Unreachable  => Distance::Unreachable,
        }
    }
}

impl Default for Distance {
    /// Unvisited nodes start out unreachable.
    fn default() -> Self {
        Distance::Unreachable
    }
}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Distance {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Distance::Reachable(a), Distance::Reachable(b)) => a.cmp(b),
            (Distance::Reachable(_), Distance::Unreachable)  => Ordering::Less,
            (Distance::Unreachable,  Distance::Reachable(_)) => Ordering::Greater,
            (Distance::Unreachable,  Distance::Unreachable)  => Ordering::Equal,
        }
    }
}

impl From<Option<u64>> for Distance {
    fn from(v: Option<u64>) -> Self {
        v.map_or(Distance::Unreachable, Distance::Reachable)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Reachable(d) => write!(f, "{d}"),
            Distance::Unreachable  => f.write_str("unreachable"),
        }
    }
}
