//! Market structure indicators: pivots, channels, zone classification.

pub mod channels;
pub mod pivots;
pub mod zones;

pub use channels::ChannelBuilder;
pub use pivots::find_pivots;
pub use zones::{classify_zones, touching_resistance, touching_support};
