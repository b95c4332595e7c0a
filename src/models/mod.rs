//! Shared data models spanning the engine layers.

pub mod candle;
pub mod channel;
pub mod signal;

pub use candle::Candle;
pub use channel::{Channel, ClassifiedZones, PivotKind, PivotPoint};
pub use signal::{
    DivergenceDirection, DivergenceEvent, OscillatorReadings, RulePath, Signal, SignalDirection,
    Timeframe,
};
