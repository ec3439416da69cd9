//! Club and launch search for a target carry.
//!
//! The search guesses a club from its carry envelope, samples a handful of
//! ball speeds across that club's speed window, and falls back to the
//! neighbouring club when the best sample still misses by too much.

use serde::{Deserialize, Serialize};

use crate::calculator::ShotCalculator;
use crate::clubs::{ClubEnvelope, CLUBS};
use crate::config::SearchConfig;
use crate::environment::LaunchProfile;
use crate::error::{require_finite, CalcError, Result};
use crate::penalty::find_material;
use crate::shot::{ShotResult, ShotSuggestion, SuggestRequest};
use crate::trajectory::TrajectoryLookup;

/// When the neighbouring club's result replaces the guessed club's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetryPolicy {
    /// New miss must be under 80% of the old one.
    #[default]
    Significant,
    AnyImprovement,
}

impl RetryPolicy {
    pub fn prefers(self, candidate_miss: f64, current_miss: f64) -> bool {
        match self {
            RetryPolicy::Significant => candidate_miss < current_miss * 0.8,
            RetryPolicy::AnyImprovement => candidate_miss < current_miss,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClubGuess {
    pub index: usize,
    pub club: &'static ClubEnvelope,
    /// Flat, sea-level carry the environment calls for.
    pub needed_carry: f64,
}

/// Ball speeds to try across `[low, high]`: both ends plus the middle for a
/// narrow window, both ends plus the thirds otherwise.
pub fn sample_speeds(low: f64, high: f64, narrow_window: f64) -> Vec<f64> {
    let width = high - low;
    if width <= narrow_window {
        vec![low, (low + high) / 2.0, high]
    } else {
        vec![low, low + width * 0.33, low + width * 0.66, high]
    }
}

/// Closest candidate to `target`, taken in order. Stops at the first one
/// within `perfect_match_m`; a candidate missing by more than `prune_factor`
/// times the best miss so far is skipped.
pub fn pick_closest(
    target: f64,
    candidates: impl IntoIterator<Item = ShotResult>,
    search: &SearchConfig,
) -> Option<(ShotResult, f64)> {
    let mut best: Option<(ShotResult, f64)> = None;
    for result in candidates {
        let miss = (target - result.env_carry).abs();
        if miss <= search.perfect_match_m {
            return Some((result, miss));
        }
        if let Some(best_miss) = best.as_ref().map(|(_, m)| *m) {
            if miss > best_miss * search.prune_factor {
                log::debug!("[SUGGEST] Pruned {:.1} m miss (best {:.1} m)", miss, best_miss);
                continue;
            }
            if miss >= best_miss {
                continue;
            }
        }
        best = Some((result, miss));
    }
    best
}

impl<T: TrajectoryLookup> ShotCalculator<T> {
    /// Club whose lie-adjusted carry envelope best fits the target.
    pub fn guess_club(&self, request: &SuggestRequest) -> Result<ClubGuess> {
        let material = find_material(&request.material)?;
        let needed_carry = request.conditions().needed_carry(
            self.config().altitude_model,
            request.target_carry,
            &LaunchProfile::GENERIC,
        );
        let widening = self.config().search.envelope_widening;

        let mut best: Option<(usize, f64)> = None;
        for (index, club) in CLUBS.iter().enumerate() {
            let avg_vla = club.avg_vla();
            let min_carry = club.carry_min
                * self
                    .penalties()
                    .speed_penalty(material.name, club.speed_min, avg_vla)?;
            let max_carry = club.carry_max
                * self
                    .penalties()
                    .speed_penalty(material.name, club.speed_max, avg_vla)?;

            let lower = min_carry * (1.0 - widening);
            let upper = max_carry * (1.0 + widening);
            if needed_carry < lower || needed_carry > upper {
                continue;
            }

            let distance = (needed_carry - (min_carry + max_carry) / 2.0).abs();
            if best.map_or(true, |(_, best_distance)| distance < best_distance) {
                best = Some((index, distance));
            }
        }

        let (index, _) = best.ok_or(CalcError::NoSuitableClub {
            target_carry: request.target_carry,
        })?;
        let club = &CLUBS[index];
        log::info!(
            "[SUGGEST] Target {:.1} m needs {:.1} m flat carry from {} -> {}",
            request.target_carry,
            needed_carry,
            material.name,
            club.name
        );
        Ok(ClubGuess {
            index,
            club,
            needed_carry,
        })
    }

    /// Best launch for one club, before the final carry correction.
    pub fn try_club(
        &self,
        club: &'static ClubEnvelope,
        request: &SuggestRequest,
    ) -> Result<ShotSuggestion> {
        let search = &self.config().search;
        let target = request.target_carry;
        let spin = club.avg_spin();
        let vla = club.avg_vla();

        // Stretch the speed window for targets outside the club's usual carry
        let ratio = target / club.carry_midpoint();
        let low = club.speed_min * ratio.min(1.0);
        let high = club.speed_max * ratio.max(1.0);

        let mut candidates = Vec::with_capacity(4);
        for speed in sample_speeds(low, high, search.narrow_window_mph) {
            match self.resolve(&request.shot(speed, spin, vla))? {
                Some(result) => {
                    log::debug!(
                        "[SUGGEST] {} @ {:.1} mph -> {:.1} m (miss {:.1} m)",
                        club.name,
                        speed,
                        result.env_carry,
                        (target - result.env_carry).abs()
                    );
                    candidates.push(result);
                }
                None => log::debug!("[SUGGEST] {} @ {:.1} mph: no data", club.name, speed),
            }
        }

        let best = pick_closest(target, candidates, search);
        let (result, _) = best.ok_or_else(|| CalcError::NoValidTrajectory {
            club: club.name.to_string(),
        })?;
        let raw = self
            .store()
            .find_closest_trajectory(result.request.speed, spin, vla)
            .ok_or_else(|| CalcError::NoValidTrajectory {
                club: club.name.to_string(),
            })?;

        Ok(ShotSuggestion {
            club_name: club.name,
            ball_speed: result.adjusted_speed,
            raw_ball_speed: result.request.speed,
            spin: result.adjusted_spin,
            raw_spin: spin,
            vla: result.adjusted_vla,
            raw_vla: vla,
            raw_carry: raw.carry,
            estimated_carry: result.env_carry,
            offline_aim_adjustment: -result.offline_deviation,
        })
    }

    /// Club and launch that lands `target_carry` from the given lie.
    pub fn suggest(&self, request: &SuggestRequest) -> Result<ShotSuggestion> {
        require_finite("target_carry", request.target_carry)?;
        if request.target_carry <= 0.0 {
            return Err(CalcError::invalid(
                "target_carry",
                request.target_carry,
                "must be positive",
            ));
        }
        require_finite("altitude", request.altitude)?;
        if request.altitude < 0.0 {
            return Err(CalcError::invalid(
                "altitude",
                request.altitude,
                "must not be negative",
            ));
        }
        require_finite("elevation", request.elevation)?;
        require_finite("up_down_lie", request.up_down_lie)?;
        require_finite("right_left_lie", request.right_left_lie)?;

        let target = request.target_carry;
        let guess = self.guess_club(request)?;
        let mut best = self.try_club(guess.club, request)?;
        let miss = (best.estimated_carry - target).abs();

        if miss > self.config().search.acceptable_miss_m {
            let alternative = if best.estimated_carry < target {
                guess.index.checked_sub(1)
            } else {
                Some(guess.index + 1).filter(|&i| i < CLUBS.len())
            };

            if let Some(index) = alternative {
                let club = &CLUBS[index];
                log::info!(
                    "[SUGGEST] {} misses by {:.1} m, trying {}",
                    guess.club.name,
                    miss,
                    club.name
                );
                match self.try_club(club, request) {
                    Ok(candidate) => {
                        let candidate_miss = (candidate.estimated_carry - target).abs();
                        if self.config().retry_policy.prefers(candidate_miss, miss) {
                            log::info!(
                                "[SUGGEST] Using {} (miss {:.1} m)",
                                club.name,
                                candidate_miss
                            );
                            best = candidate;
                        }
                    }
                    Err(e) if e.is_no_data() => {
                        log::debug!("[SUGGEST] {} not usable: {}", club.name, e);
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        Ok(correct_to_target(best, target))
    }
}

/// Shift the raw carry by the remaining miss, scaled back through the lie's
/// speed loss, and report the target itself as the estimate.
fn correct_to_target(mut suggestion: ShotSuggestion, target: f64) -> ShotSuggestion {
    let diff = target - suggestion.estimated_carry;
    let ratio = suggestion.ball_speed / suggestion.raw_ball_speed;
    let ratio = if ratio.is_finite() && ratio > 0.0 { ratio } else { 1.0 };
    suggestion.raw_carry += diff / ratio;
    suggestion.estimated_carry = target;
    suggestion
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clubs::find_club;
    use crate::config::EngineConfig;
    use crate::penalty::PenaltyFactors;
    use crate::shot::ShotRequest;
    use crate::synthetic::SyntheticGrid;
    use crate::trajectory::{TrajectoryMatch, TrajectoryTable};

    fn calculator() -> ShotCalculator<TrajectoryTable> {
        ShotCalculator::new(TrajectoryTable::from_samples(
            SyntheticGrid::default().generate(),
        ))
    }

    fn club_index(name: &str) -> usize {
        find_club(name).unwrap().0
    }

    #[test]
    fn retry_policies() {
        assert!(RetryPolicy::Significant.prefers(3.0, 6.0));
        assert!(!RetryPolicy::Significant.prefers(5.0, 6.0));
        assert!(RetryPolicy::AnyImprovement.prefers(5.0, 6.0));
        assert!(!RetryPolicy::AnyImprovement.prefers(6.0, 6.0));
    }

    #[test]
    fn speed_samples() {
        assert_eq!(sample_speeds(100.0, 104.0, 5.0), vec![100.0, 102.0, 104.0]);
        assert_eq!(sample_speeds(100.0, 105.0, 5.0).len(), 3);
        let wide = sample_speeds(100.0, 200.0, 5.0);
        assert_eq!(wide.len(), 4);
        assert_eq!(wide[0], 100.0);
        assert!((wide[1] - 133.0).abs() < 1e-9);
        assert!((wide[2] - 166.0).abs() < 1e-9);
        assert_eq!(wide[3], 200.0);
    }

    #[test]
    fn guesses_seven_iron_for_150() {
        let calc = calculator();
        let guess = calc.guess_club(&SuggestRequest::new(150.0, "fairway")).unwrap();
        assert_eq!(guess.club.name, "7 Iron");
        assert_eq!(guess.index, 6);
        assert_eq!(guess.needed_carry, 150.0);
    }

    #[test]
    fn altitude_lowers_needed_carry() {
        let calc = calculator();
        let guess = calc
            .guess_club(&SuggestRequest::new(150.0, "fairway").with_conditions(0.0, 5000.0))
            .unwrap();
        assert!((guess.needed_carry - 150.0 / 1.075).abs() < 1e-9);
    }

    #[test]
    fn suggests_a_mid_iron_for_150_on_fairway() {
        let calc = calculator();
        let suggestion = calc.suggest(&SuggestRequest::new(150.0, "fairway")).unwrap();
        assert!(
            ["6 Iron", "7 Iron", "8 Iron"].contains(&suggestion.club_name),
            "got {}",
            suggestion.club_name
        );
        assert_eq!(suggestion.estimated_carry, 150.0);
        assert_eq!(suggestion.raw_spin, 6250.0);
        assert_eq!(suggestion.raw_vla, 19.0);
        // fairway is penalty free
        assert_eq!(suggestion.ball_speed, suggestion.raw_ball_speed);
        assert!((suggestion.raw_carry - 150.0).abs() < 1e-9, "got {}", suggestion.raw_carry);
    }

    #[test]
    fn club_midpoints_converge_on_the_same_or_adjacent_club() {
        let calc = calculator();
        for (index, club) in CLUBS.iter().enumerate() {
            let target = club.carry_midpoint();
            let suggestion = calc.suggest(&SuggestRequest::new(target, "fairway")).unwrap();
            let picked = club_index(suggestion.club_name);
            assert!(
                picked.abs_diff(index) <= 1,
                "{} m: expected near {}, got {}",
                target,
                club.name,
                suggestion.club_name
            );
            assert_eq!(suggestion.estimated_carry, target);
        }
    }

    #[test]
    fn large_miss_moves_to_the_neighbouring_club() {
        let calc = calculator();
        let request = SuggestRequest::new(200.0, "fairway");
        let guess = calc.guess_club(&request).unwrap();
        assert_eq!(guess.club.name, "3 Hybrid");

        let guessed = calc.try_club(guess.club, &request).unwrap();
        assert!((guessed.estimated_carry - 200.0).abs() > 5.0);

        let suggestion = calc.suggest(&request).unwrap();
        assert_eq!(suggestion.club_name, "3 Iron");
    }

    #[test]
    fn aim_adjustment_opposes_the_lie() {
        let calc = calculator();
        let right = calc
            .suggest(&SuggestRequest::new(150.0, "fairway").with_lie(0.0, 5.0))
            .unwrap();
        assert!(right.offline_aim_adjustment < 0.0);
        let left = calc
            .suggest(&SuggestRequest::new(150.0, "fairway").with_lie(0.0, -5.0))
            .unwrap();
        assert!(left.offline_aim_adjustment > 0.0);
    }

    #[test]
    fn rough_lie_reports_penalised_speed() {
        let calc = calculator();
        let suggestion = calc.suggest(&SuggestRequest::new(100.0, "rough")).unwrap();
        assert!(suggestion.ball_speed < suggestion.raw_ball_speed);
        assert_eq!(suggestion.estimated_carry, 100.0);
    }

    #[test]
    fn out_of_range_targets_have_no_club() {
        let calc = calculator();
        for target in [10.0, 500.0] {
            assert!(
                matches!(
                    calc.suggest(&SuggestRequest::new(target, "fairway")),
                    Err(CalcError::NoSuitableClub { .. })
                ),
                "{target} m"
            );
        }
    }

    #[test]
    fn invalid_requests_are_rejected() {
        let calc = calculator();
        assert!(matches!(
            calc.suggest(&SuggestRequest::new(150.0, "lava")),
            Err(CalcError::UnknownMaterial(_))
        ));
        assert!(matches!(
            calc.suggest(&SuggestRequest::new(0.0, "fairway")),
            Err(CalcError::InvalidInput { field: "target_carry", .. })
        ));
        assert!(matches!(
            calc.suggest(&SuggestRequest::new(150.0, "fairway").with_conditions(0.0, -10.0)),
            Err(CalcError::InvalidInput { field: "altitude", .. })
        ));
        assert!(matches!(
            calc.suggest(&SuggestRequest::new(f64::NAN, "fairway")),
            Err(CalcError::InvalidInput { .. })
        ));
    }

    #[test]
    fn empty_store_has_no_valid_trajectory() {
        let calc = ShotCalculator::new(TrajectoryTable::default());
        assert!(matches!(
            calc.suggest(&SuggestRequest::new(150.0, "fairway")),
            Err(CalcError::NoValidTrajectory { .. })
        ));
    }

    #[test]
    fn any_improvement_policy_is_honoured() {
        let config = EngineConfig {
            retry_policy: RetryPolicy::AnyImprovement,
            ..EngineConfig::default()
        };
        let calc = ShotCalculator::with_config(
            TrajectoryTable::from_samples(SyntheticGrid::default().generate()),
            config,
        );
        let suggestion = calc.suggest(&SuggestRequest::new(200.0, "fairway")).unwrap();
        assert_eq!(suggestion.club_name, "3 Iron");
    }

    #[test]
    fn correction_scales_through_speed_loss() {
        let suggestion = ShotSuggestion {
            club_name: "7 Iron",
            ball_speed: 90.0,
            raw_ball_speed: 100.0,
            spin: 6000.0,
            raw_spin: 6250.0,
            vla: 19.0,
            raw_vla: 19.0,
            raw_carry: 140.0,
            estimated_carry: 146.0,
            offline_aim_adjustment: 0.0,
        };
        let corrected = correct_to_target(suggestion, 150.0);
        assert_eq!(corrected.estimated_carry, 150.0);
        assert!((corrected.raw_carry - (140.0 + 4.0 / 0.9)).abs() < 1e-9);
    }

    fn landing_at(env_carry: f64) -> ShotResult {
        ShotResult {
            request: ShotRequest::new("fairway", 120.0, 6250.0, 19.0),
            adjusted_speed: 120.0,
            adjusted_spin: 6250.0,
            adjusted_vla: 19.0,
            carry: env_carry,
            env_carry,
            offline_deviation: 0.0,
            penalties: PenaltyFactors::NONE,
        }
    }

    fn closest_miss(carries: &[f64]) -> Option<f64> {
        let search = SearchConfig::default();
        pick_closest(150.0, carries.iter().map(|&c| landing_at(c)), &search)
            .map(|(result, miss)| {
                assert_eq!((150.0 - result.env_carry).abs(), miss);
                miss
            })
    }

    #[test]
    fn closest_stops_at_a_near_perfect_sample() {
        // 148 is within 2.5 m, so 149 is never looked at
        assert_eq!(closest_miss(&[140.0, 148.0, 149.0]), Some(2.0));
        assert_eq!(closest_miss(&[152.5, 150.0]), Some(2.5));
    }

    #[test]
    fn closest_keeps_looking_past_a_far_miss() {
        // 170 misses by 5x the best, later samples still count
        assert_eq!(closest_miss(&[146.0, 170.0, 153.0]), Some(3.0));
        assert_eq!(closest_miss(&[146.0, 157.0, 159.0]), Some(4.0));
        assert_eq!(closest_miss(&[160.0, 156.0, 130.0, 154.0]), Some(4.0));
        assert_eq!(closest_miss(&[]), None);
    }

    #[test]
    fn concrete_driver_finds_the_fast_end() {
        // concrete's speed loss varies across the window, so carry is not
        // monotonic in ball speed here
        let calc = calculator();
        let driver = find_club("Driver").unwrap().1;
        let suggestion = calc
            .try_club(driver, &SuggestRequest::new(159.0, "concrete"))
            .unwrap();
        assert_eq!(suggestion.raw_ball_speed, 170.0);
        assert!(
            (suggestion.estimated_carry - 159.0).abs() < 2.5,
            "got {}",
            suggestion.estimated_carry
        );
    }

    #[test]
    fn uphill_target_takes_at_least_as_much_club() {
        let calc = calculator();
        let flat = calc.suggest(&SuggestRequest::new(150.0, "fairway")).unwrap();
        let uphill = calc
            .suggest(&SuggestRequest::new(150.0, "fairway").with_conditions(20.0, 0.0))
            .unwrap();
        assert!(
            club_index(uphill.club_name) <= club_index(flat.club_name),
            "uphill {} vs flat {}",
            uphill.club_name,
            flat.club_name
        );
        assert_eq!(uphill.estimated_carry, 150.0);
    }

    /// Store that only answers for one back spin.
    struct SingleSpin {
        table: TrajectoryTable,
        spin: f64,
    }

    impl TrajectoryLookup for SingleSpin {
        fn find_closest_trajectory(
            &self,
            ball_speed: f64,
            spin: f64,
            vla: f64,
        ) -> Option<TrajectoryMatch> {
            if (spin - self.spin).abs() > 1.0 {
                return None;
            }
            self.table.find_closest_trajectory(ball_speed, spin, vla)
        }
    }

    #[test]
    fn neighbour_without_data_keeps_the_guess() {
        let hybrid = find_club("3 Hybrid").unwrap().1;
        let calc = ShotCalculator::new(SingleSpin {
            table: TrajectoryTable::from_samples(SyntheticGrid::default().generate()),
            spin: hybrid.avg_spin(),
        });
        let request = SuggestRequest::new(200.0, "fairway");
        assert!(matches!(
            calc.try_club(find_club("3 Iron").unwrap().1, &request),
            Err(CalcError::NoValidTrajectory { .. })
        ));

        let suggestion = calc.suggest(&request).unwrap();
        assert_eq!(suggestion.club_name, "3 Hybrid");
        assert_eq!(suggestion.estimated_carry, 200.0);
    }
}
