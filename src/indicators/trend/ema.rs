//! EMA (Exponential Moving Average) series

use crate::models::Candle;

/// Exponential moving average with span-style smoothing
/// (alpha = 2 / (span + 1)), seeded with the first value.
///
/// Defined from the first element; early values simply carry less
/// smoothing, matching the divergence detector's trend-baseline use.
pub fn ema_series(values: &[f64], span: usize) -> Vec<f64> {
    if values.is_empty() || span == 0 {
        return Vec::new();
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut current = values[0];
    out.push(current);

    for &value in &values[1..] {
        current = alpha * value + (1.0 - alpha) * current;
        out.push(current);
    }

    out
}

/// EMA of closing prices.
pub fn close_ema_series(candles: &[Candle], span: usize) -> Vec<f64> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    ema_series(&closes, span)
}
