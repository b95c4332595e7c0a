//! Signal fusion engine.
//!
//! Fuses the stochastic oscillator with either a channel touch (zone
//! path) or a flow divergence (divergence path) across the primary and
//! secondary timeframes. Each enabled path emits at most one signal per
//! evaluation; the paths are independent and may both fire in the same
//! tick. The evaluation is pure: it recomputes every indicator from the
//! candle windows and holds no state between calls.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::config::ScannerConfig;
use crate::indicators::momentum::stochastic::{calculate_stochastic, StochasticSeries};
use crate::indicators::structure::{
    classify_zones, touching_resistance, touching_support, ChannelBuilder,
};
use crate::indicators::flow::FlowDivergenceDetector;
use crate::models::candle::is_strictly_ordered;
use crate::models::{
    Candle, Channel, DivergenceDirection, OscillatorReadings, RulePath, Signal, SignalDirection,
    Timeframe,
};

pub struct SignalEngine {
    config: ScannerConfig,
}

impl SignalEngine {
    pub fn new(config: ScannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Evaluate both rule paths for one instrument.
    ///
    /// Returns zero, one, or two signals (at most one per enabled
    /// path). Insufficient data on any indicator degrades to "no
    /// signal" for the affected path; only a malformed candle ordering
    /// is a contract fault.
    pub fn evaluate(
        &self,
        instrument: &str,
        primary: &[Candle],
        secondary: &[Candle],
    ) -> Vec<Signal> {
        assert!(
            is_strictly_ordered(primary) && is_strictly_ordered(secondary),
            "candle windows must be strictly ordered by timestamp"
        );

        let stoch_primary = calculate_stochastic(primary, &self.config.stochastic);
        let stoch_secondary = calculate_stochastic(secondary, &self.config.stochastic);

        let mut signals = Vec::new();

        if self.config.zone_path_enabled {
            if let Some(signal) =
                self.zone_signal(instrument, primary, secondary, &stoch_primary, &stoch_secondary)
            {
                signals.push(signal);
            }
        }

        if self.config.divergence_path_enabled {
            if let Some(signal) =
                self.divergence_signal(instrument, primary, secondary, &stoch_primary, &stoch_secondary)
            {
                signals.push(signal);
            }
        }

        signals
    }

    /// Zone path: oscillator extremes on both timeframes, confirmed by
    /// a channel touch on at least one of them.
    fn zone_signal(
        &self,
        instrument: &str,
        primary: &[Candle],
        secondary: &[Candle],
        stoch_primary: &StochasticSeries,
        stoch_secondary: &StochasticSeries,
    ) -> Option<Signal> {
        let k_primary = stoch_primary.latest_k()?;
        let k_secondary = stoch_secondary.latest_k()?;
        let direction = self.candidate_direction(k_primary, k_secondary)?;

        let last_primary = primary.last()?;

        let mut timeframes = Vec::new();
        let mut primary_zone = None;
        let mut secondary_zone = None;

        match self.timeframe_touch(primary, &self.config.primary_channels, direction, 1) {
            Ok(Some(zone)) => {
                timeframes.push(Timeframe::Primary);
                primary_zone = Some(zone);
            }
            Ok(None) => {}
            Err(err) => {
                debug!(instrument, timeframe = %Timeframe::Primary, error = %err, "zone path: timeframe not evaluable");
            }
        }

        match self.timeframe_touch(
            secondary,
            &self.config.secondary_channels,
            direction,
            self.config.secondary_window,
        ) {
            Ok(Some(zone)) => {
                // Secondary leads in the reported set, matching the
                // notification ordering downstream consumers expect.
                timeframes.insert(0, Timeframe::Secondary);
                secondary_zone = Some(zone);
            }
            Ok(None) => {}
            Err(err) => {
                debug!(instrument, timeframe = %Timeframe::Secondary, error = %err, "zone path: timeframe not evaluable");
            }
        }

        if timeframes.is_empty() {
            return None;
        }

        let signal = self.build_signal(
            instrument,
            direction,
            RulePath::ZoneTouch,
            last_primary.timestamp,
            last_primary.close,
            timeframes,
            OscillatorReadings {
                primary: k_primary,
                secondary: k_secondary,
            },
            primary_zone.or(secondary_zone),
            None,
        );
        Some(signal)
    }

    /// Divergence path: a flow divergence on the primary timeframe
    /// substitutes for the zone confirmation, with oscillator readings
    /// taken at the divergence pivot.
    fn divergence_signal(
        &self,
        instrument: &str,
        primary: &[Candle],
        secondary: &[Candle],
        stoch_primary: &StochasticSeries,
        stoch_secondary: &StochasticSeries,
    ) -> Option<Signal> {
        let detector = FlowDivergenceDetector::new(self.config.flow.clone());
        let event = match detector.detect(primary) {
            Ok(Some(event)) => event,
            Ok(None) => return None,
            Err(err) => {
                debug!(instrument, error = %err, "divergence path: not evaluable");
                return None;
            }
        };

        let pivot_candle = primary.get(event.curr_index)?;
        let k_primary = stoch_primary.k_at(event.curr_index)?;
        let secondary_index = nearest_index(secondary, pivot_candle.timestamp)?;
        let k_secondary = stoch_secondary.k_at(secondary_index)?;

        let direction = self.candidate_direction(k_primary, k_secondary)?;
        let consistent = matches!(
            (event.direction, direction),
            (DivergenceDirection::Bullish, SignalDirection::Buy)
                | (DivergenceDirection::Bearish, SignalDirection::Sell)
        );
        if !consistent {
            return None;
        }

        let signal = self.build_signal(
            instrument,
            direction,
            RulePath::FlowDivergence,
            pivot_candle.timestamp,
            pivot_candle.close,
            vec![Timeframe::Primary],
            OscillatorReadings {
                primary: k_primary,
                secondary: k_secondary,
            },
            None,
            Some(event),
        );
        Some(signal)
    }

    fn candidate_direction(&self, k_primary: f64, k_secondary: f64) -> Option<SignalDirection> {
        let thresholds = &self.config.thresholds;
        if k_primary < thresholds.buy_below && k_secondary < thresholds.buy_below {
            Some(SignalDirection::Buy)
        } else if k_primary > thresholds.sell_above && k_secondary > thresholds.sell_above {
            Some(SignalDirection::Sell)
        } else {
            None
        }
    }

    /// Build and classify channels for one timeframe, then touch-test
    /// its trailing `window` candles against the direction's zones.
    fn timeframe_touch(
        &self,
        candles: &[Candle],
        channel_config: &crate::config::ChannelConfig,
        direction: SignalDirection,
        window: usize,
    ) -> Result<Option<Channel>, crate::indicators::IndicatorError> {
        let builder = ChannelBuilder::new(channel_config.clone());
        let channels = builder.build(candles)?;

        let close = match candles.last() {
            Some(candle) => candle.close,
            None => return Ok(None),
        };
        let zones = classify_zones(&channels, close);

        let start = candles.len().saturating_sub(window);
        for candle in &candles[start..] {
            let touched = match direction {
                SignalDirection::Buy => touching_support(&zones, candle),
                SignalDirection::Sell => touching_resistance(&zones, candle),
            };
            if touched.is_some() {
                return Ok(touched);
            }
        }

        Ok(None)
    }

    #[allow(clippy::too_many_arguments)]
    fn build_signal(
        &self,
        instrument: &str,
        direction: SignalDirection,
        path: RulePath,
        timestamp: DateTime<Utc>,
        price: f64,
        timeframes: Vec<Timeframe>,
        oscillator: OscillatorReadings,
        zone: Option<Channel>,
        divergence: Option<crate::models::DivergenceEvent>,
    ) -> Signal {
        let signal = Signal {
            id: Signal::derive_id(instrument, timestamp, direction, path),
            instrument: instrument.to_string(),
            direction,
            path,
            timestamp,
            confirmed_at: Utc::now(),
            price,
            timeframes,
            oscillator,
            zone,
            divergence,
        };
        info!(
            id = %signal.id,
            direction = %signal.direction,
            price = signal.price,
            "signal emitted"
        );
        signal
    }
}

/// Index of the candle whose timestamp is nearest to `target`.
fn nearest_index(candles: &[Candle], target: DateTime<Utc>) -> Option<usize> {
    if candles.is_empty() {
        return None;
    }

    let after = candles.partition_point(|c| c.timestamp <= target);
    if after == 0 {
        return Some(0);
    }
    if after == candles.len() {
        return Some(candles.len() - 1);
    }

    let before_gap = target - candles[after - 1].timestamp;
    let after_gap = candles[after].timestamp - target;
    if after_gap < before_gap {
        Some(after)
    } else {
        Some(after - 1)
    }
}
