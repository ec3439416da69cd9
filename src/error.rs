use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the carry calculator and shot suggestion engine.
#[derive(Debug, Error)]
pub enum CalcError {
    #[error("unknown material '{0}'")]
    UnknownMaterial(String),

    #[error("unknown club '{0}'")]
    UnknownClub(String),

    #[error("invalid {field} ({value}): {reason}")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: String,
    },

    #[error("no trajectory data near {ball_speed:.1} mph / {spin:.0} rpm / {vla:.1} deg")]
    NoData { ball_speed: f64, spin: f64, vla: f64 },

    #[error("no suitable club for a {target_carry:.1} m carry")]
    NoSuitableClub { target_carry: f64 },

    #[error("no valid trajectories found for club {club}")]
    NoValidTrajectory { club: String },

    #[error("trajectory dataset {} contains no samples", path.display())]
    EmptyDataset { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed trajectory dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl CalcError {
    pub(crate) fn invalid(field: &'static str, value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            value,
            reason: reason.into(),
        }
    }

    /// True for misses the search loop may skip over (lookup found nothing).
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData { .. } | Self::NoValidTrajectory { .. })
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;

/// Reject NaN and infinities.
pub(crate) fn require_finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::invalid(field, value, "must be a finite number"))
    }
}

/// Reject values outside `[min, max]`.
pub(crate) fn require_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<f64> {
    require_finite(field, value)?;
    if value < min || value > max {
        return Err(CalcError::invalid(
            field,
            value,
            format!("must be within {min}-{max}"),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_check_rejects_nan_and_out_of_range() {
        assert!(require_range("spin", f64::NAN, 200.0, 12000.0).is_err());
        assert!(require_range("spin", 150.0, 200.0, 12000.0).is_err());
        assert_eq!(require_range("spin", 200.0, 200.0, 12000.0).unwrap(), 200.0);
        assert_eq!(require_range("spin", 12000.0, 200.0, 12000.0).unwrap(), 12000.0);
    }

    #[test]
    fn messages_name_the_field() {
        let err = require_range("speed", 500.0, 2.0, 200.0).unwrap_err();
        assert_eq!(err.to_string(), "invalid speed (500): must be within 2-200");
    }
}
