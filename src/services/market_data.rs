//! Market data provider interface for data source integration.

use crate::models::Candle;

/// Candle-source collaborator the scanner pulls from.
///
/// Implementations wrap an exchange client outside the core. Both a
/// returned error and a shorter-than-requested series are treated by
/// the scanner as insufficient data for the evaluation, never a crash.
pub trait CandleSource {
    /// Get historical candles for an instrument, oldest first.
    fn candles(
        &self,
        instrument: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, Box<dyn std::error::Error>>;
}

pub struct PlaceholderCandleSource;

impl CandleSource for PlaceholderCandleSource {
    fn candles(
        &self,
        _instrument: &str,
        _interval: &str,
        _limit: usize,
    ) -> Result<Vec<Candle>, Box<dyn std::error::Error>> {
        Ok(Vec::new())
    }
}
