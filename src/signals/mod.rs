//! Signal evaluation interfaces.

pub mod engine;
pub mod scanner;

pub use engine::SignalEngine;
pub use scanner::SignalScanner;
