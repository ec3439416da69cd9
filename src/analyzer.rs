use rayon::prelude::*;

use crate::calculator::ShotCalculator;
use crate::clubs::{find_club, ClubEnvelope};
use crate::error::{CalcError, Result};
use crate::penalty::find_material;
use crate::shot::{AnalyzeRequest, ShotAnalysis, ShotIncrementResult, ShotRequest};
use crate::trajectory::TrajectoryLookup;

/// Upper bound on power levels in one sweep.
pub const MAX_INCREMENTS: usize = 1000;

impl<T: TrajectoryLookup> ShotCalculator<T> {
    /// Sweep a club from its minimum to its maximum ball speed in evenly
    /// spaced power levels. Levels are independent and evaluated in parallel.
    pub fn analyze(&self, request: &AnalyzeRequest) -> Result<ShotAnalysis> {
        if request.increments < 2 {
            return Err(CalcError::invalid(
                "increments",
                request.increments as f64,
                "need at least 2 power levels",
            ));
        }
        if request.increments > MAX_INCREMENTS {
            return Err(CalcError::invalid(
                "increments",
                request.increments as f64,
                format!("at most {MAX_INCREMENTS} power levels"),
            ));
        }
        let (_, club) = find_club(&request.club)?;
        find_material(&request.material)?;

        let count = request.increments;
        let steps = (count - 1) as f64;
        let results = (0..count)
            .into_par_iter()
            .map(|i| self.analyze_level(request, club, i as f64 / steps))
            .collect::<Result<Vec<_>>>()?;

        let missing = results.iter().filter(|r| r.is_none()).count();
        log::info!(
            "[ANALYZE] {} on {}: {} power levels ({} without data)",
            club.name,
            request.material,
            count,
            missing
        );

        Ok(ShotAnalysis {
            request: request.clone(),
            results,
        })
    }

    fn analyze_level(
        &self,
        request: &AnalyzeRequest,
        club: &ClubEnvelope,
        power: f64,
    ) -> Result<Option<ShotIncrementResult>> {
        let speed = club.speed_min + club.speed_range() * power;
        let spin = club.avg_spin();
        let vla = club.avg_vla();
        let shot = ShotRequest::new(request.material.clone(), speed, spin, vla)
            .with_lie(request.up_down_lie, request.right_left_lie)
            .with_conditions(request.elevation, request.altitude);

        let Some(result) = self.resolve(&shot)? else {
            log::debug!("[ANALYZE] {} @ {:.1} mph: no data", club.name, speed);
            return Ok(None);
        };
        let raw_carry = self
            .store()
            .find_closest_trajectory(speed, spin, vla)
            .map_or(0.0, |m| m.carry);

        Ok(Some(ShotIncrementResult {
            power,
            ball_speed: speed,
            spin,
            vla,
            raw_carry,
            estimated_carry: result.carry,
            env_carry: result.env_carry,
            offline_deviation: result.offline_deviation,
            modifiers: result.penalties,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::SyntheticGrid;
    use crate::trajectory::TrajectoryTable;

    fn calculator() -> ShotCalculator<TrajectoryTable> {
        ShotCalculator::new(TrajectoryTable::from_samples(
            SyntheticGrid::default().generate(),
        ))
    }

    fn request(club: &str, material: &str, increments: usize) -> AnalyzeRequest {
        AnalyzeRequest {
            club: club.to_string(),
            material: material.to_string(),
            up_down_lie: 0.0,
            right_left_lie: 0.0,
            elevation: 0.0,
            altitude: 0.0,
            increments,
        }
    }

    #[test]
    fn sweeps_the_club_speed_range() {
        let calc = calculator();
        let analysis = calc.analyze(&request("7 Iron", "fairway", 5)).unwrap();
        let levels: Vec<_> = analysis.results.iter().map(|r| r.clone().unwrap()).collect();

        assert_eq!(levels.len(), 5);
        assert_eq!(levels[0].power, 0.0);
        assert_eq!(levels[2].power, 0.5);
        assert_eq!(levels[4].power, 1.0);
        assert_eq!(levels[0].ball_speed, 116.0);
        assert_eq!(levels[4].ball_speed, 127.0);
        for level in &levels {
            assert_eq!(level.spin, 6250.0);
            assert_eq!(level.vla, 19.0);
            // clean lie, flat ground
            assert_eq!(level.raw_carry, level.estimated_carry);
        }
        for pair in levels.windows(2) {
            assert!(pair[1].env_carry >= pair[0].env_carry);
        }
    }

    #[test]
    fn many_levels_keep_their_order() {
        let calc = calculator();
        let analysis = calc.analyze(&request("Driver", "fairway", 41)).unwrap();
        assert_eq!(analysis.results.len(), 41);
        for (i, level) in analysis.results.iter().enumerate() {
            let level = level.as_ref().unwrap();
            assert!((level.power - i as f64 / 40.0).abs() < 1e-12, "level {i}");
        }
    }

    #[test]
    fn lie_penalties_show_up_as_modifiers() {
        let calc = calculator();
        let analysis = calc.analyze(&request("PW", "sand", 3)).unwrap();
        for level in analysis.results.iter().flatten() {
            assert!(level.modifiers.speed < 1.0);
            assert!(level.estimated_carry < level.raw_carry);
        }
    }

    #[test]
    fn empty_store_yields_gaps() {
        let calc = ShotCalculator::new(TrajectoryTable::default());
        let analysis = calc.analyze(&request("7 Iron", "fairway", 3)).unwrap();
        assert_eq!(analysis.results, vec![None, None, None]);
    }

    #[test]
    fn rejects_bad_requests() {
        let calc = calculator();
        assert!(matches!(
            calc.analyze(&request("7 Iron", "fairway", 1)),
            Err(CalcError::InvalidInput { field: "increments", .. })
        ));
        assert!(matches!(
            calc.analyze(&request("7 Iron", "fairway", MAX_INCREMENTS + 1)),
            Err(CalcError::InvalidInput { field: "increments", .. })
        ));
        assert!(matches!(
            calc.analyze(&request("7 Iron", "fairway", usize::MAX)),
            Err(CalcError::InvalidInput { field: "increments", .. })
        ));
        assert!(matches!(
            calc.analyze(&request("11 Iron", "fairway", 5)),
            Err(CalcError::UnknownClub(_))
        ));
        assert!(matches!(
            calc.analyze(&request("7 Iron", "lava", 5)),
            Err(CalcError::UnknownMaterial(_))
        ));
    }
}
