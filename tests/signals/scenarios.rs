//! End-to-end evaluation scenarios for the signal engine

use revertix::config::{ChannelConfig, ScannerConfig, StochasticConfig};
use revertix::models::{Candle, RulePath, SignalDirection, Timeframe};
use revertix::signals::SignalEngine;

use crate::common_candles::{flat_candles, hourly_candle, quarter_candle};

/// Tight indicator windows so short synthetic series produce defined
/// readings; thresholds and rule paths stay at production defaults.
fn test_config() -> ScannerConfig {
    let channel_config = ChannelConfig {
        pivot_half_window: 2,
        width_percent: 5.0,
        lookback: 100,
        min_strength: 1,
        max_channels: 6,
        reference_window: 300,
        strict_pivots: true,
    };
    ScannerConfig {
        stochastic: StochasticConfig {
            k_period: 2,
            k_smooth: 1,
            d_smooth: 1,
        },
        primary_channels: channel_config.clone(),
        secondary_channels: channel_config,
        ..ScannerConfig::default()
    }
}

/// 500 rising hourly candles closing on their highs, with pivot highs
/// at indices 486 and 494 (8 candles apart, higher price) and a volume
/// collapse in between so the positive flow weakens: a bearish
/// divergence while the oscillator reads overbought.
fn divergent_primary_series() -> Vec<Candle> {
    (0..500)
        .map(|i| {
            let mut c = 100.0 + 0.1 * i as f64;
            if i == 486 {
                c += 5.0;
            }
            if i == 494 {
                c += 8.0;
            }
            let volume = if i < 488 { 1000.0 } else { 1.0 };
            hourly_candle(i, c - 0.5, c, c - 1.0, c, volume)
        })
        .collect()
}

/// 300 rising 15m candles covering the tail of the primary window,
/// also closing on their highs (overbought, no pivots).
fn rising_secondary_series() -> Vec<Candle> {
    (0..300)
        .map(|j| {
            let c = 100.0 + 0.05 * j as f64;
            quarter_candle(j, 425 * 60, c - 0.3, c, c - 0.5, c, 500.0)
        })
        .collect()
}

#[test]
fn test_scenario_divergence_sell() {
    let engine = SignalEngine::new(test_config());
    let primary = divergent_primary_series();
    let secondary = rising_secondary_series();

    let signals = engine.evaluate("BTCUSDT", &primary, &secondary);
    assert_eq!(signals.len(), 1);

    let signal = &signals[0];
    assert_eq!(signal.direction, SignalDirection::Sell);
    assert_eq!(signal.path, RulePath::FlowDivergence);
    assert_eq!(signal.timeframes, vec![Timeframe::Primary]);
    assert_eq!(signal.instrument, "BTCUSDT");
    assert_eq!(signal.timestamp, primary[494].timestamp);
    assert!((signal.price - primary[494].close).abs() < 1e-9);
    assert!(signal.oscillator.primary > 75.0);
    assert!(signal.oscillator.secondary > 75.0);

    let event = signal.divergence.as_ref().expect("divergence evidence");
    assert!(event.prev_flow > 0.0 && event.curr_flow > 0.0);
    assert!(event.curr_flow < event.prev_flow);
    assert!(event.curr_price > event.prev_price);

    assert!(signal.id.ends_with("_SELL_CVD"));
}

#[test]
fn test_scenario_neutral_oscillator_no_signal() {
    let engine = SignalEngine::new(test_config());
    // Flat candles read a neutral 50 on every timeframe.
    let primary = flat_candles(120, 100.0);
    let secondary: Vec<Candle> = (0..120)
        .map(|j| quarter_candle(j, 0, 100.0, 100.0, 100.0, 100.0, 100.0))
        .collect();

    let signals = engine.evaluate("ETHUSDT", &primary, &secondary);
    assert!(signals.is_empty());
}

/// 120 hourly candles ranging at 110 with three pivot lows at 100, then
/// a drop whose final candle dips into the support zone while closing
/// above its lower bound, with the oscillator oversold.
fn support_touch_primary_series() -> Vec<Candle> {
    (0..120)
        .map(|i| match i {
            20 | 40 | 60 => hourly_candle(i, 110.0, 111.0, 100.0, 105.0, 1000.0),
            118 => hourly_candle(i, 103.0, 104.0, 101.0, 101.5, 1000.0),
            119 => hourly_candle(i, 101.0, 101.0, 99.5, 100.3, 1000.0),
            _ => hourly_candle(i, 110.0, 111.0, 109.5, 110.0, 1000.0),
        })
        .collect()
}

/// Downward-drifting 15m candles (no pivots) ending oversold.
fn oversold_secondary_series() -> Vec<Candle> {
    (0..80)
        .map(|j| match j {
            78 => quarter_candle(j, 100 * 60, 122.3, 122.6, 121.9, 122.0, 500.0),
            79 => quarter_candle(j, 100 * 60, 122.0, 122.0, 121.0, 121.1, 500.0),
            _ => {
                let c = 130.0 - 0.1 * j as f64;
                quarter_candle(j, 100 * 60, c + 0.3, c + 0.5, c - 0.5, c, 500.0)
            }
        })
        .collect()
}

#[test]
fn test_scenario_support_touch_buy() {
    let engine = SignalEngine::new(test_config());
    let primary = support_touch_primary_series();
    let secondary = oversold_secondary_series();

    let signals = engine.evaluate("SOLUSDT", &primary, &secondary);
    assert_eq!(signals.len(), 1);

    let signal = &signals[0];
    assert_eq!(signal.direction, SignalDirection::Buy);
    assert_eq!(signal.path, RulePath::ZoneTouch);
    assert_eq!(signal.timeframes, vec![Timeframe::Primary]);
    assert!(signal.oscillator.primary < 25.0);
    assert!(signal.oscillator.secondary < 25.0);
    assert!((signal.price - 100.3).abs() < 1e-9);

    let zone = signal.zone.as_ref().expect("zone evidence");
    assert_eq!(zone.low, 100.0);
    assert_eq!(zone.high, 100.0);

    assert!(signal.id.ends_with("_BUY_ZONE"));
}

#[test]
fn test_disabled_paths_emit_nothing() {
    let mut config = test_config();
    config.zone_path_enabled = false;
    config.divergence_path_enabled = false;
    let engine = SignalEngine::new(config);

    let signals = engine.evaluate(
        "BTCUSDT",
        &divergent_primary_series(),
        &rising_secondary_series(),
    );
    assert!(signals.is_empty());
}

#[test]
fn test_empty_windows_no_signal() {
    let engine = SignalEngine::new(test_config());
    let signals = engine.evaluate("BTCUSDT", &[], &[]);
    assert!(signals.is_empty());
}

#[test]
fn test_deterministic_across_evaluations() {
    let engine = SignalEngine::new(test_config());
    let primary = divergent_primary_series();
    let secondary = rising_secondary_series();

    let first = engine.evaluate("BTCUSDT", &primary, &secondary);
    let second = engine.evaluate("BTCUSDT", &primary, &secondary);

    assert_eq!(first.len(), second.len());
    assert_eq!(first[0].id, second[0].id);
    assert_eq!(first[0].timeframes, second[0].timeframes);
    assert_eq!(first[0].divergence, second[0].divergence);
}
