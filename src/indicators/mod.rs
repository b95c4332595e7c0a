//! Indicator computations, organized by category.

pub mod error;

pub mod flow;
pub mod momentum;
pub mod structure;
pub mod trend;

pub use error::IndicatorError;
