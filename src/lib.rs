//! Revertix - deterministic reversal-signal engine for OHLCV candle series.
//!
//! Given a primary (coarse) and secondary (fine) candle window for an
//! instrument, the engine decides whether the latest state constitutes a
//! qualifying reversal signal via two independent rule paths:
//!
//! 1. Stochastic extremes on both timeframes, confirmed by a price-action
//!    touch of a support/resistance channel.
//! 2. Stochastic extremes at the moment of a cumulative-volume-delta
//!    divergence on the primary timeframe.
//!
//! The engine is pure and synchronous: the same candle windows and
//! configuration always produce the same signals. Data retrieval, signal
//! persistence and notification delivery live behind the collaborator
//! seams in [`services`].

pub mod config;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod services;
pub mod signals;
