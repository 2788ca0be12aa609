//! Configuration system for the prefetch engine.
//!
//! This module defines all configuration structures and enums used to
//! parameterize the engine. It provides:
//! 1. **Defaults:** Baseline tuning constants for both predictors.
//! 2. **Structures:** Hierarchical config for predictor selection, the
//!    adaptive controller, and the history-buffer detector.
//! 3. **Validation:** Semantic checks over degree bounds, thresholds, and
//!    table geometry, surfaced as [`ConfigError`].
//!
//! Configuration is supplied via JSON from the embedding simulator or use
//! `Config::default()` for the reference tuning.

use serde::Deserialize;
use thiserror::Error;

/// Default configuration constants for the engine.
///
/// These values define the baseline tuning when not explicitly overridden
/// by the host's configuration.
mod defaults {
    /// Lower bound on the adaptive prefetch degree.
    pub const MIN_DEGREE: usize = 1;

    /// Upper bound on the adaptive prefetch degree.
    pub const MAX_DEGREE: usize = 8;

    /// Initial adaptive prefetch degree (mid-range start).
    pub const INITIAL_DEGREE: usize = 2;

    /// Prefetch-history table capacity for usefulness attribution.
    pub const PREFETCH_HISTORY_SIZE: usize = 1024;

    /// Accuracy above which the adaptive degree is raised.
    pub const ACCURACY_THRESHOLD_HIGH: f64 = 0.6;

    /// Accuracy below which the adaptive degree is lowered.
    pub const ACCURACY_THRESHOLD_LOW: f64 = 0.2;

    /// Accesses between degree re-evaluations.
    pub const ADJUSTMENT_PERIOD: u64 = 1000;

    /// Index-table capacity (distinct instructions tracked).
    pub const INDEX_TABLE_SIZE: usize = 256;

    /// Global history buffer capacity (circular).
    pub const GHB_SIZE: usize = 256;

    /// Pattern repetitions issued per triggering access.
    pub const GHB_DEGREE: usize = 4;

    /// Minimum collected deltas before pattern search runs.
    pub const DELTA_THRESHOLD: usize = 2;
}

/// Predictor implementation selector.
///
/// Chooses which predictor the factory constructs for a cache level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum PredictorKind {
    /// No prefetching enabled.
    #[default]
    None,
    /// Adaptive next-N-line predictor.
    ///
    /// Prefetches the next `degree` sequential blocks on demand misses,
    /// widening or narrowing `degree` from measured accuracy.
    #[serde(alias = "Adaptive")]
    AdaptiveNextLine,
    /// Global-history-buffer pattern predictor.
    ///
    /// Reconstructs per-instruction delta chains and chains prefetches
    /// along detected repeating patterns.
    #[serde(alias = "GHB")]
    Ghb,
}

/// Root configuration structure for the engine.
///
/// # Examples
///
/// Deserializing from JSON (typical embedding-simulator usage):
///
/// ```
/// use pfsim_core::config::{Config, PredictorKind};
///
/// let json = r#"{
///     "predictor": "GHB",
///     "ghb": {
///         "ghb_size": 512,
///         "degree": 2
///     }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.predictor, PredictorKind::Ghb);
/// assert_eq!(config.ghb.ghb_size, 512);
/// assert_eq!(config.ghb.delta_threshold, 2);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Which predictor to construct.
    #[serde(default)]
    pub predictor: PredictorKind,

    /// Adaptive next-N-line predictor tuning.
    #[serde(default)]
    pub adaptive: AdaptiveConfig,

    /// History-buffer predictor tuning.
    #[serde(default)]
    pub ghb: GhbConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            predictor: PredictorKind::default(),
            adaptive: AdaptiveConfig::default(),
            ghb: GhbConfig::default(),
        }
    }
}

impl Config {
    /// Deserializes and validates a configuration from JSON.
    ///
    /// # Arguments
    ///
    /// * `json` - A JSON object; absent fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed JSON and
    /// [`ConfigError::Invalid`] when a semantic check fails.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Runs the semantic checks over every section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.adaptive.validate()?;
        self.ghb.validate()
    }
}

/// Adaptive next-N-line predictor configuration.
///
/// Bounds and thresholds for the hysteresis degree controller, plus the
/// geometry of the prefetch-history table used for usefulness attribution.
#[derive(Debug, Clone, Deserialize)]
pub struct AdaptiveConfig {
    /// Lower bound on the prefetch degree
    #[serde(default = "AdaptiveConfig::default_min_degree")]
    pub min_degree: usize,

    /// Upper bound on the prefetch degree
    #[serde(default = "AdaptiveConfig::default_max_degree")]
    pub max_degree: usize,

    /// Degree at construction (clamped into `[min_degree, max_degree]`)
    #[serde(default = "AdaptiveConfig::default_initial_degree")]
    pub initial_degree: usize,

    /// Prefetch-history table capacity
    #[serde(default = "AdaptiveConfig::default_history_size")]
    pub history_size: usize,

    /// Accuracy above which the degree is raised
    #[serde(default = "AdaptiveConfig::default_high_threshold")]
    pub high_threshold: f64,

    /// Accuracy below which the degree is lowered
    #[serde(default = "AdaptiveConfig::default_low_threshold")]
    pub low_threshold: f64,

    /// Accesses between degree re-evaluations
    #[serde(default = "AdaptiveConfig::default_adjustment_period")]
    pub adjustment_period: u64,
}

impl AdaptiveConfig {
    /// Returns the default lower degree bound.
    fn default_min_degree() -> usize {
        defaults::MIN_DEGREE
    }

    /// Returns the default upper degree bound.
    fn default_max_degree() -> usize {
        defaults::MAX_DEGREE
    }

    /// Returns the default initial degree.
    fn default_initial_degree() -> usize {
        defaults::INITIAL_DEGREE
    }

    /// Returns the default prefetch-history capacity.
    fn default_history_size() -> usize {
        defaults::PREFETCH_HISTORY_SIZE
    }

    /// Returns the default raise threshold.
    fn default_high_threshold() -> f64 {
        defaults::ACCURACY_THRESHOLD_HIGH
    }

    /// Returns the default lower threshold.
    fn default_low_threshold() -> f64 {
        defaults::ACCURACY_THRESHOLD_LOW
    }

    /// Returns the default re-evaluation period.
    fn default_adjustment_period() -> u64 {
        defaults::ADJUSTMENT_PERIOD
    }

    /// Checks degree bounds, thresholds, and table geometry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_degree == 0 {
            return Err(ConfigError::Invalid(
                "adaptive.min_degree must be at least 1".into(),
            ));
        }
        if self.max_degree < self.min_degree {
            return Err(ConfigError::Invalid(
                "adaptive.max_degree must be >= adaptive.min_degree".into(),
            ));
        }
        if self.low_threshold >= self.high_threshold {
            return Err(ConfigError::Invalid(
                "adaptive accuracy thresholds must leave a dead band (low < high)".into(),
            ));
        }
        if self.history_size == 0 {
            return Err(ConfigError::Invalid(
                "adaptive.history_size must be nonzero".into(),
            ));
        }
        if self.adjustment_period == 0 {
            return Err(ConfigError::Invalid(
                "adaptive.adjustment_period must be nonzero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        Self {
            min_degree: defaults::MIN_DEGREE,
            max_degree: defaults::MAX_DEGREE,
            initial_degree: defaults::INITIAL_DEGREE,
            history_size: defaults::PREFETCH_HISTORY_SIZE,
            high_threshold: defaults::ACCURACY_THRESHOLD_HIGH,
            low_threshold: defaults::ACCURACY_THRESHOLD_LOW,
            adjustment_period: defaults::ADJUSTMENT_PERIOD,
        }
    }
}

/// History-buffer predictor configuration.
///
/// Geometry of the circular buffer and index table, plus the pattern
/// detector's issue width and minimum-history threshold.
#[derive(Debug, Clone, Deserialize)]
pub struct GhbConfig {
    /// Index-table capacity (distinct instructions tracked)
    #[serde(default = "GhbConfig::default_index_table_size")]
    pub index_table_size: usize,

    /// Circular buffer capacity
    #[serde(default = "GhbConfig::default_ghb_size")]
    pub ghb_size: usize,

    /// Pattern repetitions issued per triggering access
    #[serde(default = "GhbConfig::default_degree")]
    pub degree: usize,

    /// Minimum collected deltas before the pattern search runs
    #[serde(default = "GhbConfig::default_delta_threshold")]
    pub delta_threshold: usize,
}

impl GhbConfig {
    /// Returns the default index-table capacity.
    fn default_index_table_size() -> usize {
        defaults::INDEX_TABLE_SIZE
    }

    /// Returns the default buffer capacity.
    fn default_ghb_size() -> usize {
        defaults::GHB_SIZE
    }

    /// Returns the default issue width.
    fn default_degree() -> usize {
        defaults::GHB_DEGREE
    }

    /// Returns the default minimum-history threshold.
    fn default_delta_threshold() -> usize {
        defaults::DELTA_THRESHOLD
    }

    /// Checks table geometry and detector thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.index_table_size == 0 {
            return Err(ConfigError::Invalid(
                "ghb.index_table_size must be nonzero".into(),
            ));
        }
        if self.ghb_size == 0 {
            return Err(ConfigError::Invalid("ghb.ghb_size must be nonzero".into()));
        }
        if self.degree == 0 {
            return Err(ConfigError::Invalid("ghb.degree must be at least 1".into()));
        }
        if self.delta_threshold < 2 {
            return Err(ConfigError::Invalid(
                "ghb.delta_threshold must be at least 2".into(),
            ));
        }
        Ok(())
    }
}

impl Default for GhbConfig {
    fn default() -> Self {
        Self {
            index_table_size: defaults::INDEX_TABLE_SIZE,
            ghb_size: defaults::GHB_SIZE,
            degree: defaults::GHB_DEGREE,
            delta_threshold: defaults::DELTA_THRESHOLD,
        }
    }
}

/// Errors surfaced while ingesting a configuration.
///
/// The predictive logic itself has no failure modes; configuration intake
/// is the engine's only fallible surface.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration JSON did not parse.
    #[error("failed to parse configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A semantic check failed.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
