//! Cumulative volume-delta flow and two-point divergence detection.
//!
//! The per-candle delta splits volume into buying and selling pressure
//! by where the close sits in the candle's range; the accumulated flow
//! series is compared against price pivots filtered by an EMA(50) trend
//! baseline. A bearish divergence is price making a higher high while
//! positive flow weakens; bullish mirrors with lower lows and negative
//! flow strengthening.

use crate::config::{FlowConfig, FlowMode};
use crate::indicators::error::IndicatorError;
use crate::indicators::structure::pivots::find_pivots;
use crate::indicators::trend::ema::{close_ema_series, ema_series};
use crate::models::{Candle, DivergenceDirection, DivergenceEvent, PivotKind, PivotPoint};

/// Minimum candle count the detector will evaluate.
pub const MIN_CANDLES: usize = 100;

/// Span of the trend baseline separating bullish from bearish contexts.
const TREND_BASELINE_SPAN: usize = 50;

/// Per-candle volume delta: buying volume minus selling volume, with
/// the close's position in the range as the split. Zero for a
/// zero-range candle.
pub fn flow_delta(candle: &Candle) -> f64 {
    let range = candle.high - candle.low;
    if range == 0.0 {
        return 0.0;
    }
    let buying = candle.volume * (candle.close - candle.low) / range;
    let selling = candle.volume * (candle.high - candle.close) / range;
    buying - selling
}

/// Accumulated flow series aligned with the candle window.
///
/// Periodic mode is a trailing sum over `flow_period` (undefined during
/// warmup); Ema mode is defined from the first candle.
pub fn cumulative_flow(candles: &[Candle], config: &FlowConfig) -> Vec<Option<f64>> {
    let deltas: Vec<f64> = candles.iter().map(flow_delta).collect();

    match config.mode {
        FlowMode::Ema => ema_series(&deltas, config.flow_period)
            .into_iter()
            .map(Some)
            .collect(),
        FlowMode::Periodic => {
            let period = config.flow_period;
            let mut out = vec![None; deltas.len()];
            if period == 0 {
                return out;
            }
            for i in (period - 1)..deltas.len() {
                let sum: f64 = deltas[i + 1 - period..=i].iter().sum();
                out[i] = Some(sum);
            }
            out
        }
    }
}

pub struct FlowDivergenceDetector {
    config: FlowConfig,
}

impl FlowDivergenceDetector {
    pub fn new(config: FlowConfig) -> Self {
        Self { config }
    }

    /// Detect at most one divergence on the window.
    ///
    /// Bearish is checked before bullish; the first match wins. Fewer
    /// than two qualifying pivots, out-of-range pivot spacing, or
    /// mismatched flow signs all yield `Ok(None)`.
    pub fn detect(&self, candles: &[Candle]) -> Result<Option<DivergenceEvent>, IndicatorError> {
        if candles.len() < MIN_CANDLES {
            return Err(IndicatorError::InsufficientData {
                have: candles.len(),
                need: MIN_CANDLES,
            });
        }

        let flow = cumulative_flow(candles, &self.config);
        let baseline = close_ema_series(candles, TREND_BASELINE_SPAN);

        if let Some(event) =
            self.check_direction(candles, &flow, &baseline, DivergenceDirection::Bearish)
        {
            return Ok(Some(event));
        }

        Ok(self.check_direction(candles, &flow, &baseline, DivergenceDirection::Bullish))
    }

    fn check_direction(
        &self,
        candles: &[Candle],
        flow: &[Option<f64>],
        baseline: &[f64],
        direction: DivergenceDirection,
    ) -> Option<DivergenceEvent> {
        let pivots = self.qualifying_pivots(candles, baseline, direction);
        if pivots.len() < 2 {
            return None;
        }

        let prev = &pivots[pivots.len() - 2];
        let curr = &pivots[pivots.len() - 1];

        let spacing = curr.index - prev.index;
        if spacing < self.config.min_pivot_spacing || spacing >= self.config.max_pivot_spacing {
            return None;
        }

        let prev_flow = flow.get(prev.index).copied().flatten()?;
        let curr_flow = flow.get(curr.index).copied().flatten()?;

        let diverges = match direction {
            DivergenceDirection::Bearish => {
                curr.price > prev.price
                    && curr_flow < prev_flow
                    && curr_flow > 0.0
                    && prev_flow > 0.0
            }
            DivergenceDirection::Bullish => {
                curr.price < prev.price
                    && curr_flow > prev_flow
                    && curr_flow < 0.0
                    && prev_flow < 0.0
            }
        };

        if !diverges {
            return None;
        }

        Some(DivergenceEvent {
            direction,
            prev_index: prev.index,
            curr_index: curr.index,
            prev_price: prev.price,
            curr_price: curr.price,
            prev_flow,
            curr_flow,
        })
    }

    /// Price pivots in the recent scan window, trend-filtered: highs in
    /// an uptrend for bearish candidates, lows in a downtrend for
    /// bullish ones. Chronological order.
    fn qualifying_pivots(
        &self,
        candles: &[Candle],
        baseline: &[f64],
        direction: DivergenceDirection,
    ) -> Vec<PivotPoint> {
        let n = self.config.fractal_period;
        let scan_start = candles
            .len()
            .saturating_sub(self.config.max_pivot_spacing)
            .max(n);

        let (series, kind): (Vec<f64>, PivotKind) = match direction {
            DivergenceDirection::Bearish => {
                (candles.iter().map(|c| c.high).collect(), PivotKind::High)
            }
            DivergenceDirection::Bullish => {
                (candles.iter().map(|c| c.low).collect(), PivotKind::Low)
            }
        };

        find_pivots(&series, n, kind, true)
            .into_iter()
            .filter(|p| p.index >= scan_start)
            .filter(|p| match direction {
                DivergenceDirection::Bearish => candles[p.index].close > baseline[p.index],
                DivergenceDirection::Bullish => candles[p.index].close < baseline[p.index],
            })
            .collect()
    }
}
