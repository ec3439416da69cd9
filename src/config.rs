use std::path::Path;

use serde::Deserialize;

use crate::environment::AltitudeModel;
use crate::error::{CalcError, Result};
use crate::lie::OfflineModel;
use crate::penalty::PenaltyTableSet;
use crate::suggest::RetryPolicy;

/// Engine tuning: which formula revision to use for each competing model,
/// plus the search tolerances.
///
/// Every field has a default so a config file only needs the keys it changes:
///
/// ```toml
/// offline_model = "tangent"
/// altitude_model = "one_percent"
///
/// [search]
/// acceptable_miss_m = 4.0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub offline_model: OfflineModel,
    pub altitude_model: AltitudeModel,
    pub penalty_tables: PenaltyTableSet,
    pub retry_policy: RetryPolicy,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Miss (m) above which the adjacent club is tried.
    pub acceptable_miss_m: f64,
    /// Miss (m) at which speed sampling stops early.
    pub perfect_match_m: f64,
    /// Skip a sample whose miss exceeds this multiple of the best miss.
    pub prune_factor: f64,
    /// Speed windows (mph) at or below this width get 3 samples instead of 4.
    pub narrow_window_mph: f64,
    /// Fractional widening of each club's carry range during club guessing.
    pub envelope_widening: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            acceptable_miss_m: 5.0,
            perfect_match_m: 2.5,
            prune_factor: 1.5,
            narrow_window_mph: 5.0,
            envelope_widening: 0.10,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| CalcError::Config {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CalcError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content, path)?;
        log::info!(
            "[CONFIG] Loaded {} (offline={:?}, altitude={:?}, tables={:?}, retry={:?})",
            path.display(),
            config.offline_model,
            config.altitude_model,
            config.penalty_tables,
            config.retry_policy
        );
        Ok(config)
    }
}
