pub mod divergence;

pub use divergence::FlowDivergenceDetector;
