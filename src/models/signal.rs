//! Signal entities emitted by the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::channel::Channel;

/// Trade direction of an emitted signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalDirection {
    Buy,
    Sell,
}

impl fmt::Display for SignalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalDirection::Buy => write!(f, "BUY"),
            SignalDirection::Sell => write!(f, "SELL"),
        }
    }
}

/// Which rule path produced a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RulePath {
    /// Oscillator extremes confirmed by a channel touch.
    ZoneTouch,
    /// Oscillator extremes confirmed by a flow divergence.
    FlowDivergence,
}

impl RulePath {
    /// Short tag used in the deterministic signal identifier.
    pub fn tag(&self) -> &'static str {
        match self {
            RulePath::ZoneTouch => "ZONE",
            RulePath::FlowDivergence => "CVD",
        }
    }
}

/// Evaluation timeframe. Primary is the coarser interval (e.g. 1h),
/// secondary the finer one (e.g. 15m).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Primary,
    Secondary,
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timeframe::Primary => write!(f, "primary"),
            Timeframe::Secondary => write!(f, "secondary"),
        }
    }
}

/// Direction of a price-vs-flow divergence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DivergenceDirection {
    Bullish,
    Bearish,
}

/// A two-point divergence between price pivots and the cumulative flow,
/// transient to a single evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivergenceEvent {
    pub direction: DivergenceDirection,
    pub prev_index: usize,
    pub curr_index: usize,
    pub prev_price: f64,
    pub curr_price: f64,
    pub prev_flow: f64,
    pub curr_flow: f64,
}

/// Oscillator %K readings backing a signal, one per timeframe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OscillatorReadings {
    pub primary: f64,
    pub secondary: f64,
}

/// The sole externally visible artifact of an evaluation.
///
/// Carries enough context for an external dedup/notification layer to
/// act without re-deriving anything: the stable `id` is a pure function
/// of instrument, candle timestamp, direction and rule path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    pub id: String,
    pub instrument: String,
    pub direction: SignalDirection,
    pub path: RulePath,
    /// Timestamp of the candle that produced the signal.
    pub timestamp: DateTime<Utc>,
    /// Wall-clock time the signal was confirmed.
    pub confirmed_at: DateTime<Utc>,
    pub price: f64,
    /// Timeframes whose zone-touch or divergence test validated the
    /// direction. Never empty.
    pub timeframes: Vec<Timeframe>,
    pub oscillator: OscillatorReadings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divergence: Option<DivergenceEvent>,
}

impl Signal {
    /// Deterministic identifier an external store can dedup on.
    pub fn derive_id(
        instrument: &str,
        timestamp: DateTime<Utc>,
        direction: SignalDirection,
        path: RulePath,
    ) -> String {
        format!(
            "{}_{}_{}_{}",
            instrument,
            timestamp.format("%Y%m%d%H%M"),
            direction,
            path.tag()
        )
    }
}
