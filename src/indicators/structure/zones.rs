//! Zone classification and candle touch tests.

use crate::models::{Candle, Channel, ClassifiedZones};

/// Partition selected channels against the current close price.
///
/// Channels are scanned in the builder's strength-descending order; the
/// first one containing the price becomes `occupied` and later
/// containing channels are dropped. Channels entirely below the price
/// become supports, entirely above resistances.
pub fn classify_zones(channels: &[Channel], price: f64) -> ClassifiedZones {
    let mut zones = ClassifiedZones::default();

    for channel in channels {
        if channel.contains(price) {
            if zones.occupied.is_none() {
                zones.occupied = Some(channel.clone());
            }
        } else if channel.high < price {
            zones.supports.push(channel.clone());
        } else if channel.low > price {
            zones.resistances.push(channel.clone());
        }
    }

    zones
}

/// Whether the candle touches a support zone in a bullish context.
///
/// A candle touches `[z.low, z.high]` when it closes above the zone low
/// while its low reaches into the zone. The occupied zone only counts
/// when the close sits in its lower half. Returns the matched zone.
pub fn touching_support(zones: &ClassifiedZones, candle: &Candle) -> Option<Channel> {
    for zone in &zones.supports {
        if candle.close > zone.low && candle.low <= zone.high {
            return Some(zone.clone());
        }
    }

    if let Some(zone) = &zones.occupied {
        let nearer_low = candle.close - zone.low < zone.high - candle.close;
        if nearer_low && candle.close > zone.low && candle.low <= zone.high {
            return Some(zone.clone());
        }
    }

    None
}

/// Whether the candle touches a resistance zone in a bearish context.
///
/// Mirror of [`touching_support`]: the candle closes below the zone
/// high while its high reaches into the zone; the occupied zone only
/// counts when the close sits in its upper half.
pub fn touching_resistance(zones: &ClassifiedZones, candle: &Candle) -> Option<Channel> {
    for zone in &zones.resistances {
        if candle.close < zone.high && candle.high >= zone.low {
            return Some(zone.clone());
        }
    }

    if let Some(zone) = &zones.occupied {
        let nearer_high = zone.high - candle.close < candle.close - zone.low;
        if nearer_high && candle.close < zone.high && candle.high >= zone.low {
            return Some(zone.clone());
        }
    }

    None
}
