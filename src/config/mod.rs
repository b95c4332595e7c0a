//! Engine configuration.
//!
//! All thresholds and periods are externally supplied; the engine never
//! hardcodes them. `Default` carries the production parameter set, and
//! [`ScannerConfig::from_env`] layers `.env`/environment overrides on
//! top for the knobs operators actually tune.

use serde::{Deserialize, Serialize};

/// Stochastic oscillator parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StochasticConfig {
    /// %K lookback length.
    pub k_period: usize,
    /// SMA smoothing applied to the raw %K.
    pub k_smooth: usize,
    /// SMA smoothing producing the %D signal line.
    pub d_smooth: usize,
}

impl Default for StochasticConfig {
    fn default() -> Self {
        Self {
            k_period: 16,
            k_smooth: 16,
            d_smooth: 8,
        }
    }
}

/// How the per-candle volume delta is accumulated into the flow series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowMode {
    /// Trailing sum over `flow_period` candles.
    Periodic,
    /// Exponential moving average with span `flow_period`.
    Ema,
}

/// Flow divergence detector parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowConfig {
    /// Pivot half-window used for divergence fractals.
    pub fractal_period: usize,
    /// Accumulation period of the flow series.
    pub flow_period: usize,
    pub mode: FlowMode,
    /// Minimum candle separation between the two pivots; anything
    /// closer is adjacent noise.
    pub min_pivot_spacing: usize,
    /// Separation at or beyond which a divergence is stale. Also bounds
    /// how far back pivots are searched.
    pub max_pivot_spacing: usize,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            fractal_period: 2,
            flow_period: 24,
            mode: FlowMode::Ema,
            min_pivot_spacing: 5,
            max_pivot_spacing: 30,
        }
    }
}

/// Support/resistance channel builder parameters, one set per timeframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Pivot half-window.
    pub pivot_half_window: usize,
    /// Maximum channel width as a percent of the reference price range.
    pub width_percent: f64,
    /// Trailing candle window pivots and touches are drawn from.
    pub lookback: usize,
    /// Candidates below `min_strength * 20` are discarded.
    pub min_strength: u32,
    /// Upper bound on the selected channel set.
    pub max_channels: usize,
    /// Longer window the maximum width is referenced against.
    pub reference_window: usize,
    /// Strict (`>`/`<`) pivot comparison; lenient allows ties.
    pub strict_pivots: bool,
}

impl ChannelConfig {
    /// Production defaults for the primary (1h) timeframe.
    pub fn primary_default() -> Self {
        Self {
            pivot_half_window: 10,
            width_percent: 5.0,
            lookback: 290,
            min_strength: 1,
            max_channels: 6,
            reference_window: 300,
            strict_pivots: true,
        }
    }

    /// Production defaults for the secondary (15m) timeframe: tighter
    /// pivots, narrower channels, shorter lookback.
    pub fn secondary_default() -> Self {
        Self {
            pivot_half_window: 5,
            width_percent: 3.0,
            lookback: 200,
            min_strength: 1,
            max_channels: 6,
            reference_window: 300,
            strict_pivots: true,
        }
    }
}

/// Oscillator thresholds gating the candidate direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalThresholds {
    /// Both timeframe readings below this qualify a Buy candidate.
    pub buy_below: f64,
    /// Both timeframe readings above this qualify a Sell candidate.
    pub sell_above: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            buy_below: 25.0,
            sell_above: 75.0,
        }
    }
}

/// Full engine configuration for one instrument scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScannerConfig {
    pub stochastic: StochasticConfig,
    pub flow: FlowConfig,
    pub primary_channels: ChannelConfig,
    pub secondary_channels: ChannelConfig,
    pub thresholds: SignalThresholds,
    /// Exchange interval labels used when fetching candles.
    pub primary_interval: String,
    pub secondary_interval: String,
    /// Candle counts requested per timeframe.
    pub primary_limit: usize,
    pub secondary_limit: usize,
    /// How many trailing secondary candles fall inside the still-open
    /// primary candle.
    pub secondary_window: usize,
    pub zone_path_enabled: bool,
    pub divergence_path_enabled: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            stochastic: StochasticConfig::default(),
            flow: FlowConfig::default(),
            primary_channels: ChannelConfig::primary_default(),
            secondary_channels: ChannelConfig::secondary_default(),
            thresholds: SignalThresholds::default(),
            primary_interval: "1h".to_string(),
            secondary_interval: "15m".to_string(),
            primary_limit: 500,
            secondary_limit: 300,
            secondary_window: 4,
            zone_path_enabled: true,
            divergence_path_enabled: true,
        }
    }
}

impl ScannerConfig {
    /// Defaults overridden by environment variables (loaded from `.env`
    /// when present). Unset or unparsable variables keep the default.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let mut config = Self::default();

        if let Some(value) = env_parse("REVERTIX_BUY_THRESHOLD") {
            config.thresholds.buy_below = value;
        }
        if let Some(value) = env_parse("REVERTIX_SELL_THRESHOLD") {
            config.thresholds.sell_above = value;
        }
        if let Some(value) = env_parse("REVERTIX_STOCH_K_PERIOD") {
            config.stochastic.k_period = value;
        }
        if let Some(value) = env_parse("REVERTIX_STOCH_K_SMOOTH") {
            config.stochastic.k_smooth = value;
        }
        if let Some(value) = env_parse("REVERTIX_STOCH_D_SMOOTH") {
            config.stochastic.d_smooth = value;
        }
        if let Some(value) = env_parse("REVERTIX_ZONE_PATH_ENABLED") {
            config.zone_path_enabled = value;
        }
        if let Some(value) = env_parse("REVERTIX_DIVERGENCE_PATH_ENABLED") {
            config.divergence_path_enabled = value;
        }

        config
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|raw| raw.parse().ok())
}

/// Deployment environment, used to pick the log formatter.
pub fn get_environment() -> String {
    std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string())
}
