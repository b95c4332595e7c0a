//! Scan driver joining a candle source to the signal engine.

use tracing::{debug, warn};

use crate::config::ScannerConfig;
use crate::models::{Candle, Signal};
use crate::services::CandleSource;
use crate::signals::engine::SignalEngine;

/// Evaluates one instrument per call against a [`CandleSource`].
///
/// A source error or a short fetch degrades to "no signals for this
/// evaluation"; the caller's loop over other instruments is unaffected.
pub struct SignalScanner<S: CandleSource> {
    source: S,
    engine: SignalEngine,
}

impl<S: CandleSource> SignalScanner<S> {
    pub fn new(source: S, config: ScannerConfig) -> Self {
        Self {
            source,
            engine: SignalEngine::new(config),
        }
    }

    /// Fetch both timeframes and evaluate all enabled rule paths.
    pub fn scan(&self, instrument: &str) -> Vec<Signal> {
        let config = self.engine.config();

        let primary = match self.fetch(instrument, &config.primary_interval, config.primary_limit)
        {
            Some(candles) => candles,
            None => return Vec::new(),
        };
        let secondary =
            match self.fetch(instrument, &config.secondary_interval, config.secondary_limit) {
                Some(candles) => candles,
                None => return Vec::new(),
            };

        self.engine.evaluate(instrument, &primary, &secondary)
    }

    fn fetch(&self, instrument: &str, interval: &str, limit: usize) -> Option<Vec<Candle>> {
        match self.source.candles(instrument, interval, limit) {
            Ok(candles) => {
                if candles.len() < limit {
                    debug!(
                        instrument,
                        interval,
                        have = candles.len(),
                        requested = limit,
                        "source returned fewer candles than requested"
                    );
                }
                Some(candles)
            }
            Err(err) => {
                warn!(instrument, interval, error = %err, "candle fetch failed, skipping evaluation");
                None
            }
        }
    }
}
