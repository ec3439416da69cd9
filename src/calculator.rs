use crate::config::EngineConfig;
use crate::environment::LaunchProfile;
use crate::error::{require_finite, require_range, CalcError, Result};
use crate::lie::modified_lie_vla;
use crate::penalty::{find_material, PenaltyModel};
use crate::shot::{CalculateCarryResponse, ShotRequest, ShotResult};
use crate::trajectory::{TrajectoryLookup, TrajectoryMatch};

// Physical ranges accepted for raw launch numbers
pub const SPEED_RANGE: (f64, f64) = (2.0, 200.0); // mph
pub const SPIN_RANGE: (f64, f64) = (200.0, 12000.0); // rpm
pub const VLA_RANGE: (f64, f64) = (4.0, 50.0); // degrees

/// Evaluates shots against a trajectory store (measured dataset or synthetic).
pub struct ShotCalculator<T: TrajectoryLookup> {
    store: T,
    penalties: PenaltyModel,
    config: EngineConfig,
}

impl<T: TrajectoryLookup> ShotCalculator<T> {
    pub fn new(store: T) -> Self {
        Self::with_config(store, EngineConfig::default())
    }

    pub fn with_config(store: T, config: EngineConfig) -> Self {
        Self {
            store,
            penalties: PenaltyModel::new(config.penalty_tables),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &T {
        &self.store
    }

    pub(crate) fn penalties(&self) -> &PenaltyModel {
        &self.penalties
    }

    /// Apply lie penalties, slope, and environment to one launch. `Ok(None)`
    /// when the store has no trajectory for the adjusted launch.
    pub fn resolve(&self, request: &ShotRequest) -> Result<Option<ShotResult>> {
        require_finite("speed", request.speed)?;
        require_finite("spin", request.spin)?;
        require_finite("vla", request.vla)?;
        require_finite("up_down_lie", request.up_down_lie)?;
        require_finite("right_left_lie", request.right_left_lie)?;
        require_finite("elevation", request.elevation)?;
        require_finite("altitude", request.altitude)?;

        let material = find_material(&request.material)?;
        let penalties = self
            .penalties
            .penalty_for(material, request.speed, request.vla);

        let adjusted_speed = request.speed * penalties.speed;
        let adjusted_spin = request.spin * penalties.spin;
        let adjusted_vla = modified_lie_vla(request.vla * penalties.vla, request.up_down_lie);

        let Some(found) = self
            .store
            .find_closest_trajectory(adjusted_speed, adjusted_spin, adjusted_vla)
        else {
            log::debug!(
                "[RESOLVE] No trajectory for {:.1} mph / {:.0} rpm / {:.1} deg",
                adjusted_speed,
                adjusted_spin,
                adjusted_vla
            );
            return Ok(None);
        };

        let launch = LaunchProfile {
            speed: adjusted_speed,
            spin: adjusted_spin,
            vla: adjusted_vla,
        };
        let env_carry = request
            .conditions()
            .apply(self.config.altitude_model, found.carry, &launch);
        let offline_deviation =
            self.config
                .offline_model
                .offline_deviation(adjusted_vla, request.right_left_lie, env_carry);

        log::debug!(
            "[RESOLVE] {} {:.1} mph -> {:.1} mph / {:.0} rpm / {:.1} deg, carry {:.1} m, env {:.1} m, offline {:.1} m",
            material.name,
            request.speed,
            adjusted_speed,
            adjusted_spin,
            adjusted_vla,
            found.carry,
            env_carry,
            offline_deviation
        );

        Ok(Some(ShotResult {
            request: request.clone(),
            adjusted_speed,
            adjusted_spin,
            adjusted_vla,
            carry: found.carry,
            env_carry,
            offline_deviation,
            penalties,
        }))
    }

    /// Full carry report for measured launch numbers.
    pub fn calculate_carry(&self, request: &ShotRequest) -> Result<CalculateCarryResponse> {
        validate_launch(request.speed, request.spin, request.vla)?;

        let result = self.resolve(request)?.ok_or(CalcError::NoData {
            ball_speed: request.speed,
            spin: request.spin,
            vla: request.vla,
        })?;
        let carry_raw = self
            .store
            .find_closest_trajectory(request.speed, request.spin, request.vla)
            .map_or(0.0, |m| m.carry);

        Ok(CalculateCarryResponse {
            material: request.material.clone(),
            raw_speed: request.speed,
            raw_spin: request.spin,
            raw_vla: request.vla,
            carry_raw,
            carry_modified: result.carry,
            env_carry: result.env_carry,
            offline_deviation: result.offline_deviation,
            speed_modified: result.adjusted_speed,
            spin_modified: result.adjusted_spin,
            vla_modified: result.adjusted_vla,
            speed_penalty: result.penalties.speed,
            spin_penalty: result.penalties.spin,
            vla_penalty: result.penalties.vla,
        })
    }

    /// Raw store match, no penalties or environment.
    pub fn lookup(&self, ball_speed: f64, spin: f64, vla: f64) -> Result<TrajectoryMatch> {
        validate_launch(ball_speed, spin, vla)?;
        self.store
            .find_closest_trajectory(ball_speed, spin, vla)
            .ok_or(CalcError::NoData {
                ball_speed,
                spin,
                vla,
            })
    }
}

fn validate_launch(speed: f64, spin: f64, vla: f64) -> Result<()> {
    require_range("speed", speed, SPEED_RANGE.0, SPEED_RANGE.1)?;
    require_range("spin", spin, SPIN_RANGE.0, SPIN_RANGE.1)?;
    require_range("vla", vla, VLA_RANGE.0, VLA_RANGE.1)?;
    Ok(())
}
