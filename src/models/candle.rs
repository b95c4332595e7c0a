use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single OHLCV candle.
///
/// Candle series handed to the engine are expected to be gap-free and
/// strictly increasing by timestamp, one candle per fixed interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Midpoint of the candle's traded range.
    pub fn mid(&self) -> f64 {
        (self.high + self.low) / 2.0
    }
}

/// Whether timestamps are strictly increasing.
///
/// Violations indicate a broken upstream feed, not a market condition,
/// so the engine treats them as contract faults rather than results.
pub fn is_strictly_ordered(candles: &[Candle]) -> bool {
    candles
        .windows(2)
        .all(|pair| pair[0].timestamp < pair[1].timestamp)
}
