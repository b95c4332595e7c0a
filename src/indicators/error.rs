//! Indicator error taxonomy.
//!
//! Only "not evaluable" conditions become errors. Degenerate inputs
//! (flat windows) resolve to neutral values inside the indicator, and
//! "nothing qualified" is an empty or `None` result, never an error.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    /// Fewer candles than the component's minimum window. Callers
    /// evaluating many instruments skip these without failing the batch.
    #[error("insufficient data: have {have} candles, need {need}")]
    InsufficientData { have: usize, need: usize },
}
