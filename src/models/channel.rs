//! Pivot and support/resistance channel entities.

use serde::{Deserialize, Serialize};

/// Kind of local price extremum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PivotKind {
    High,
    Low,
}

/// A local extremum in a price series relative to a symmetric neighborhood.
///
/// Recomputed fresh on every evaluation; `index` is the position in the
/// candle window it was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PivotPoint {
    pub index: usize,
    pub price: f64,
    pub kind: PivotKind,
}

/// A price interval clustering multiple pivots.
///
/// Strength = 20 per absorbed pivot, plus one per recent candle whose
/// high or low falls inside the interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub low: f64,
    pub high: f64,
    pub strength: u32,
}

impl Channel {
    /// Whether `price` lies inside the channel interval (bounds inclusive).
    pub fn contains(&self, price: f64) -> bool {
        price >= self.low && price <= self.high
    }

    /// Whether two channel intervals intersect.
    pub fn overlaps(&self, other: &Channel) -> bool {
        self.low <= other.high && self.high >= other.low
    }
}

/// Selected channels partitioned against the current close price.
///
/// `supports` and `resistances` keep the builder's strength-descending
/// order. When several channels contain the price, only the first found
/// is retained as `occupied`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifiedZones {
    pub occupied: Option<Channel>,
    pub supports: Vec<Channel>,
    pub resistances: Vec<Channel>,
}
