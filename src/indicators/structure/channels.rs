//! Support/resistance channel construction.
//!
//! Pivots inside the lookback window are clustered with a
//! seed-and-absorb pass bounded by a maximum channel width, scored by
//! pivot count and historical touch frequency, then greedily selected
//! strongest-first with overlapping candidates eliminated.

use crate::config::ChannelConfig;
use crate::indicators::error::IndicatorError;
use crate::indicators::structure::pivots::find_pivots;
use crate::models::{Candle, Channel, PivotKind, PivotPoint};

pub struct ChannelBuilder {
    config: ChannelConfig,
}

impl ChannelBuilder {
    pub fn new(config: ChannelConfig) -> Self {
        Self { config }
    }

    /// Build the selected channel set, strongest first.
    ///
    /// `Err(InsufficientData)` marks an indeterminate result (window too
    /// short, or fewer than two pivots to cluster); `Ok(vec![])` means
    /// the data was evaluable but no candidate met the strength floor.
    pub fn build(&self, candles: &[Candle]) -> Result<Vec<Channel>, IndicatorError> {
        let need = 2 * self.config.pivot_half_window + 1;
        if candles.len() < need {
            return Err(IndicatorError::InsufficientData {
                have: candles.len(),
                need,
            });
        }

        let pivots = self.recent_pivots(candles);
        if pivots.len() < 2 {
            return Err(IndicatorError::InsufficientData {
                have: pivots.len(),
                need: 2,
            });
        }

        let max_width = self.max_channel_width(candles);
        let mut candidates = self.cluster(&pivots, candles, max_width);

        // Stable sort keeps the most-recent-seed order among equal
        // strengths, which makes the selection reproducible.
        candidates.sort_by(|a, b| b.strength.cmp(&a.strength));

        let mut selected: Vec<Channel> = Vec::new();
        for candidate in candidates {
            if selected.len() >= self.config.max_channels {
                break;
            }
            if !selected.iter().any(|chosen| candidate.overlaps(chosen)) {
                selected.push(candidate);
            }
        }

        Ok(selected)
    }

    /// Pivot highs and lows restricted to the trailing lookback window,
    /// most recent first.
    fn recent_pivots(&self, candles: &[Candle]) -> Vec<PivotPoint> {
        let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
        let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();
        let half = self.config.pivot_half_window;
        let strict = self.config.strict_pivots;

        let lookback_start = candles.len().saturating_sub(self.config.lookback);

        let mut pivots: Vec<PivotPoint> = find_pivots(&highs, half, PivotKind::High, strict)
            .into_iter()
            .chain(find_pivots(&lows, half, PivotKind::Low, strict))
            .filter(|p| p.index >= lookback_start)
            .collect();

        pivots.sort_by(|a, b| b.index.cmp(&a.index));
        pivots
    }

    fn max_channel_width(&self, candles: &[Candle]) -> f64 {
        let start = candles.len().saturating_sub(self.config.reference_window);
        let reference = &candles[start..];
        let highest = reference.iter().map(|c| c.high).fold(f64::MIN, f64::max);
        let lowest = reference.iter().map(|c| c.low).fold(f64::MAX, f64::min);
        (highest - lowest) * self.config.width_percent / 100.0
    }

    /// Seed a candidate channel from every pivot, absorb whatever fits
    /// inside the width cap, then add touch strength and apply the
    /// strength floor.
    fn cluster(&self, pivots: &[PivotPoint], candles: &[Candle], max_width: f64) -> Vec<Channel> {
        let mut candidates = Vec::new();

        for seed in pivots {
            let mut lo = seed.price;
            let mut hi = seed.price;
            let mut absorbed: u32 = 0;

            for other in pivots {
                let price = other.price;
                let width = if price <= hi {
                    (hi - price).max(price - lo)
                } else {
                    price - lo
                };

                if width <= max_width {
                    lo = lo.min(price);
                    hi = hi.max(price);
                    absorbed += 1;
                }
            }

            let mut strength = absorbed * 20;
            strength += self.touch_count(candles, lo, hi);

            if strength >= self.config.min_strength * 20 {
                candidates.push(Channel {
                    low: lo,
                    high: hi,
                    strength,
                });
            }
        }

        candidates
    }

    /// Candles in the trailing lookback whose high or low falls inside
    /// the interval.
    fn touch_count(&self, candles: &[Candle], lo: f64, hi: f64) -> u32 {
        let start = candles.len().saturating_sub(self.config.lookback);
        candles[start..]
            .iter()
            .filter(|c| {
                (c.high >= lo && c.high <= hi) || (c.low >= lo && c.low <= hi)
            })
            .count() as u32
    }
}
