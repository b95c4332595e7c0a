//! Stochastic oscillator (%K/%D)
//!
//! Raw %K = 100 * (close - lowest low) / (highest high - lowest low)
//! over the trailing `k_period` candles; %K is the SMA of the raw value
//! over `k_smooth`, %D the SMA of %K over `d_smooth`.

use crate::config::StochasticConfig;
use crate::models::Candle;

/// %K and %D series aligned with the input window. Positions without
/// enough trailing history are `None` and must not be evaluated.
#[derive(Debug, Clone)]
pub struct StochasticSeries {
    pub k: Vec<Option<f64>>,
    pub d: Vec<Option<f64>>,
}

impl StochasticSeries {
    /// Most recent %K reading, if the window is warm.
    pub fn latest_k(&self) -> Option<f64> {
        self.k.last().copied().flatten()
    }

    /// %K at a specific candle index.
    pub fn k_at(&self, index: usize) -> Option<f64> {
        self.k.get(index).copied().flatten()
    }
}

/// Calculate the stochastic oscillator over a candle window.
///
/// A flat lookback window (highest high == lowest low) yields the
/// neutral raw value 50 rather than failing. Once warm, both lines are
/// bounded to [0, 100].
pub fn calculate_stochastic(candles: &[Candle], config: &StochasticConfig) -> StochasticSeries {
    let raw = raw_k(candles, config.k_period);
    let k = sma(&raw, config.k_smooth);
    let d = sma(&k, config.d_smooth);
    StochasticSeries { k, d }
}

fn raw_k(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    let mut raw = vec![None; candles.len()];
    if period == 0 {
        return raw;
    }

    for i in (period - 1)..candles.len() {
        let window = &candles[i + 1 - period..=i];
        let highest = window.iter().map(|c| c.high).fold(f64::MIN, f64::max);
        let lowest = window.iter().map(|c| c.low).fold(f64::MAX, f64::min);

        let value = if highest == lowest {
            50.0
        } else {
            100.0 * (candles[i].close - lowest) / (highest - lowest)
        };
        raw[i] = Some(value);
    }

    raw
}

/// Simple moving average over an optional series; a window containing
/// any undefined position stays undefined.
fn sma(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 {
        return out;
    }

    for i in (window - 1)..values.len() {
        let slice = &values[i + 1 - window..=i];
        if slice.iter().all(|v| v.is_some()) {
            let sum: f64 = slice.iter().flatten().sum();
            out[i] = Some(sum / window as f64);
        }
    }

    out
}
