//! Unit tests for the flow divergence detector

use revertix::config::{FlowConfig, FlowMode};
use revertix::indicators::flow::divergence::{cumulative_flow, flow_delta};
use revertix::indicators::flow::FlowDivergenceDetector;
use revertix::indicators::IndicatorError;
use revertix::models::{Candle, DivergenceDirection};

use crate::common_candles::{flat_candles, hourly_candle};

#[test]
fn test_flow_delta_split() {
    // Close at the high: all volume reads as buying.
    let bought = hourly_candle(0, 105.0, 110.0, 100.0, 110.0, 50.0);
    assert_eq!(flow_delta(&bought), 50.0);

    // Close at the low: all volume reads as selling.
    let sold = hourly_candle(1, 105.0, 110.0, 100.0, 100.0, 50.0);
    assert_eq!(flow_delta(&sold), -50.0);

    // Close mid-range balances out.
    let balanced = hourly_candle(2, 105.0, 110.0, 100.0, 105.0, 50.0);
    assert_eq!(flow_delta(&balanced), 0.0);

    // Zero-range candle resolves to zero rather than dividing by zero.
    let flat = hourly_candle(3, 100.0, 100.0, 100.0, 100.0, 50.0);
    assert_eq!(flow_delta(&flat), 0.0);
}

#[test]
fn test_periodic_flow_warmup() {
    let candles: Vec<Candle> = (0..6)
        .map(|i| {
            let c = 100.0 + i as f64;
            hourly_candle(i, c - 0.5, c, c - 1.0, c, 10.0)
        })
        .collect();
    let config = FlowConfig {
        mode: FlowMode::Periodic,
        flow_period: 4,
        ..FlowConfig::default()
    };
    let flow = cumulative_flow(&candles, &config);

    assert!(flow[2].is_none());
    // Close pinned to the high: each delta is +volume.
    assert_eq!(flow[3], Some(40.0));
    assert_eq!(flow[5], Some(40.0));
}

#[test]
fn test_ema_flow_defined_from_start() {
    let candles = flat_candles(10, 100.0);
    let flow = cumulative_flow(&candles, &FlowConfig::default());
    assert!(flow.iter().all(|f| f == &Some(0.0)));
}

/// Downtrend with sell-pressure candles (close at the low) and two
/// pivot lows `spacing` candles apart near the end. Volume collapses
/// between the pivots so the flow recovers toward zero while price
/// makes a lower low: a bullish divergence.
fn bullish_divergence_candles(len: usize, spacing: usize) -> Vec<Candle> {
    let curr_pivot = len - 6;
    let prev_pivot = curr_pivot - spacing;
    (0..len)
        .map(|i| {
            let mut c = 200.0 - 0.1 * i as f64;
            if i == prev_pivot {
                c -= 5.0;
            }
            if i == curr_pivot {
                c -= 8.0;
            }
            let volume = if i < prev_pivot + 2 { 1000.0 } else { 10.0 };
            hourly_candle(i, c + 0.5, c + 1.0, c, c, volume)
        })
        .collect()
}

#[test]
fn test_bullish_divergence_detected() {
    let detector = FlowDivergenceDetector::new(FlowConfig::default());
    let candles = bullish_divergence_candles(120, 8);
    let event = detector.detect(&candles).unwrap().expect("divergence");

    assert_eq!(event.direction, DivergenceDirection::Bullish);
    assert_eq!(event.curr_index - event.prev_index, 8);
    assert!(event.curr_price < event.prev_price);
    assert!(event.prev_flow < 0.0 && event.curr_flow < 0.0);
    assert!(event.curr_flow > event.prev_flow);
}

#[test]
fn test_pivots_too_close_rejected() {
    let detector = FlowDivergenceDetector::new(FlowConfig::default());
    let candles = bullish_divergence_candles(120, 3);
    assert_eq!(detector.detect(&candles).unwrap(), None);
}

#[test]
fn test_rising_price_and_flow_never_bearish() {
    // Buy-pressure uptrend with two higher pivot highs and steady
    // volume: flow keeps strengthening, so no bearish divergence.
    let candles: Vec<Candle> = (0..120)
        .map(|i| {
            let mut c = 100.0 + 0.1 * i as f64;
            if i == 106 {
                c += 5.0;
            }
            if i == 114 {
                c += 8.0;
            }
            hourly_candle(i, c - 0.5, c, c - 1.0, c, 1000.0)
        })
        .collect();

    let detector = FlowDivergenceDetector::new(FlowConfig::default());
    assert_eq!(detector.detect(&candles).unwrap(), None);
}

#[test]
fn test_insufficient_history() {
    let detector = FlowDivergenceDetector::new(FlowConfig::default());
    let candles = flat_candles(50, 100.0);
    assert!(matches!(
        detector.detect(&candles),
        Err(IndicatorError::InsufficientData { have: 50, need: 100 })
    ));
}

#[test]
fn test_flat_history_no_divergence() {
    let detector = FlowDivergenceDetector::new(FlowConfig::default());
    let candles = flat_candles(150, 100.0);
    assert_eq!(detector.detect(&candles).unwrap(), None);
}
