//! Measured trajectory samples and the nearest-match carry lookup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::penalty::lerp;

/// Spin difference (rpm) that scores the same as one unit of VLA difference
/// scaled by `VLA_WEIGHT`.
const SPIN_WEIGHT: f64 = 200.0;
const VLA_WEIGHT: f64 = 2.0;

/// One measured flight. Column names follow the launch-monitor CSV export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    #[serde(rename = "BallSpeed")]
    pub ball_speed: f64, // mph
    #[serde(rename = "VLA")]
    pub vla: f64,
    #[serde(rename = "HLA", default)]
    pub hla: f64,
    #[serde(rename = "BackSpin")]
    pub back_spin: f64,
    #[serde(rename = "SpinAxis", default)]
    pub spin_axis: f64,
    #[serde(rename = "Carry")]
    pub carry: f64, // meters
    #[serde(rename = "Offline", default)]
    pub offline: f64,
}

impl TrajectorySample {
    fn is_finite(&self) -> bool {
        [self.ball_speed, self.vla, self.back_spin, self.carry]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// Result of a lookup. Only `ball_speed` and `carry` reflect the queried
/// speed; the other fields come from the matched sample unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectoryMatch {
    pub ball_speed: f64,
    pub vla: f64,
    pub back_spin: f64,
    pub carry: f64,
    pub offline: f64,
    pub hla: f64,
    pub spin_axis: f64,
}

impl TrajectoryMatch {
    fn from_sample(sample: &TrajectorySample) -> Self {
        Self {
            ball_speed: sample.ball_speed,
            vla: sample.vla,
            back_spin: sample.back_spin,
            carry: sample.carry,
            offline: sample.offline,
            hla: sample.hla,
            spin_axis: sample.spin_axis,
        }
    }
}

/// Read-only carry lookup shared by every evaluation.
pub trait TrajectoryLookup: Send + Sync {
    /// Nearest `(back_spin, vla)` pair, then carry interpolated on ball speed.
    /// `None` when the store has nothing to match against.
    fn find_closest_trajectory(&self, ball_speed: f64, spin: f64, vla: f64)
        -> Option<TrajectoryMatch>;
}

/// Min/max of each launch dimension across the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coverage {
    pub ball_speed: (f64, f64),
    pub back_spin: (f64, f64),
    pub vla: (f64, f64),
}

/// Every sample sharing one `(back_spin, vla)` pair, sorted by ball speed.
#[derive(Debug, Clone)]
struct SpinVlaBucket {
    back_spin: f64,
    vla: f64,
    samples: Vec<TrajectorySample>,
}

impl SpinVlaBucket {
    fn match_score(&self, spin: f64, vla: f64) -> f64 {
        (self.back_spin - spin).abs() / SPIN_WEIGHT + (self.vla - vla).abs() / VLA_WEIGHT
    }

    fn interpolate(&self, ball_speed: f64) -> Option<TrajectoryMatch> {
        let below_end = self.samples.partition_point(|s| s.ball_speed <= ball_speed);
        let above_start = self.samples.partition_point(|s| s.ball_speed < ball_speed);
        let below = below_end.checked_sub(1).map(|i| &self.samples[i]);
        let above = self.samples.get(above_start);

        match (below, above) {
            (Some(below), Some(above)) => {
                let width = above.ball_speed - below.ball_speed;
                let carry = if width == 0.0 {
                    below.carry
                } else {
                    lerp(below.carry, above.carry, (ball_speed - below.ball_speed) / width)
                };
                Some(TrajectoryMatch {
                    ball_speed,
                    carry,
                    ..TrajectoryMatch::from_sample(below)
                })
            }
            (Some(only), None) | (None, Some(only)) => Some(TrajectoryMatch::from_sample(only)),
            (None, None) => None,
        }
    }
}

/// In-memory trajectory store, loaded once and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct TrajectoryTable {
    buckets: Vec<SpinVlaBucket>,
    len: usize,
}

impl TrajectoryTable {
    /// Group samples by `(back_spin, vla)`. Pairs keep first-seen order so
    /// ties in the match score resolve to the earliest pair in the dataset.
    pub fn from_samples<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = TrajectorySample>,
    {
        let mut index: HashMap<(u64, u64), usize> = HashMap::new();
        let mut buckets: Vec<SpinVlaBucket> = Vec::new();
        let mut len = 0;
        let mut skipped = 0;

        for sample in samples {
            if !sample.is_finite() {
                skipped += 1;
                continue;
            }
            // +0.0 folds -0.0 into 0.0 so both land in the same bucket
            let key = ((sample.back_spin + 0.0).to_bits(), (sample.vla + 0.0).to_bits());
            let slot = *index.entry(key).or_insert_with(|| {
                buckets.push(SpinVlaBucket {
                    back_spin: sample.back_spin,
                    vla: sample.vla,
                    samples: Vec::new(),
                });
                buckets.len() - 1
            });
            buckets[slot].samples.push(sample);
            len += 1;
        }

        for bucket in &mut buckets {
            bucket
                .samples
                .sort_by(|a, b| a.ball_speed.total_cmp(&b.ball_speed));
        }

        if skipped > 0 {
            log::warn!("[DATASET] Skipped {} samples with non-numeric launch data", skipped);
        }

        Self { buckets, len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct `(back_spin, vla)` pairs.
    pub fn pair_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn coverage(&self) -> Option<Coverage> {
        let mut samples = self.buckets.iter().flat_map(|b| b.samples.iter());
        let first = samples.next()?;
        let init = Coverage {
            ball_speed: (first.ball_speed, first.ball_speed),
            back_spin: (first.back_spin, first.back_spin),
            vla: (first.vla, first.vla),
        };
        Some(samples.fold(init, |c, s| Coverage {
            ball_speed: (c.ball_speed.0.min(s.ball_speed), c.ball_speed.1.max(s.ball_speed)),
            back_spin: (c.back_spin.0.min(s.back_spin), c.back_spin.1.max(s.back_spin)),
            vla: (c.vla.0.min(s.vla), c.vla.1.max(s.vla)),
        }))
    }

    fn nearest_bucket(&self, spin: f64, vla: f64) -> Option<&SpinVlaBucket> {
        let mut best: Option<(&SpinVlaBucket, f64)> = None;
        for bucket in &self.buckets {
            let score = bucket.match_score(spin, vla);
            if best.map_or(true, |(_, best_score)| score < best_score) {
                best = Some((bucket, score));
            }
        }
        best.map(|(bucket, _)| bucket)
    }
}

impl TrajectoryLookup for TrajectoryTable {
    fn find_closest_trajectory(
        &self,
        ball_speed: f64,
        spin: f64,
        vla: f64,
    ) -> Option<TrajectoryMatch> {
        let bucket = self.nearest_bucket(spin, vla)?;
        let found = bucket.interpolate(ball_speed);
        if let Some(ref m) = found {
            log::debug!(
                "[LOOKUP] {:.1} mph / {:.0} rpm / {:.1} deg -> pair ({:.0} rpm, {:.1} deg), carry {:.1} m",
                ball_speed,
                spin,
                vla,
                m.back_spin,
                m.vla,
                m.carry
            );
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(ball_speed: f64, back_spin: f64, vla: f64, carry: f64) -> TrajectorySample {
        TrajectorySample {
            ball_speed,
            vla,
            hla: 0.5,
            back_spin,
            spin_axis: 0.0,
            carry,
            offline: 1.5,
        }
    }

    fn fixture() -> TrajectoryTable {
        TrajectoryTable::from_samples(vec![
            sample(140.0, 3000.0, 12.0, 205.0),
            sample(100.0, 3000.0, 12.0, 150.0),
            sample(120.0, 3000.0, 12.0, 180.0),
            sample(80.0, 6000.0, 20.0, 95.0),
            sample(100.0, 6000.0, 20.0, 120.0),
            sample(120.0, 6000.0, 20.0, 142.0),
        ])
    }

    #[test]
    fn groups_by_spin_and_vla() {
        let table = fixture();
        assert_eq!(table.len(), 6);
        assert_eq!(table.pair_count(), 2);
        let coverage = table.coverage().unwrap();
        assert_eq!(coverage.ball_speed, (80.0, 140.0));
        assert_eq!(coverage.back_spin, (3000.0, 6000.0));
        assert_eq!(coverage.vla, (12.0, 20.0));
    }

    #[test]
    fn exact_speed_returns_stored_carry() {
        let table = fixture();
        for (speed, carry) in [(100.0, 150.0), (120.0, 180.0), (140.0, 205.0)] {
            let m = table.find_closest_trajectory(speed, 3100.0, 12.5).unwrap();
            assert_eq!(m.carry, carry);
            assert_eq!(m.ball_speed, speed);
        }
    }

    #[test]
    fn interpolates_between_brackets() {
        let table = fixture();
        let m = table.find_closest_trajectory(110.0, 3000.0, 12.0).unwrap();
        assert!((m.carry - 165.0).abs() < 1e-9, "got {}", m.carry);
        assert_eq!(m.ball_speed, 110.0);
        assert_eq!(m.back_spin, 3000.0);
        assert_eq!(m.vla, 12.0);
        assert_eq!(m.offline, 1.5);
        assert_eq!(m.hla, 0.5);
    }

    #[test]
    fn carry_is_monotonic_in_speed() {
        let table = fixture();
        let mut last = f64::MIN;
        for step in 0..=120 {
            let speed = 70.0 + step as f64 * 0.5;
            let carry = table.find_closest_trajectory(speed, 5800.0, 19.0).unwrap().carry;
            assert!(carry >= last, "carry dropped at {speed} mph");
            last = carry;
        }
    }

    #[test]
    fn one_sided_bracket_is_returned_unmodified() {
        let table = fixture();
        let slow = table.find_closest_trajectory(60.0, 6000.0, 20.0).unwrap();
        assert_eq!((slow.ball_speed, slow.carry), (80.0, 95.0));
        let fast = table.find_closest_trajectory(180.0, 6000.0, 20.0).unwrap();
        assert_eq!((fast.ball_speed, fast.carry), (120.0, 142.0));
    }

    #[test]
    fn spin_and_vla_are_weighted_differently() {
        // (3000, 12) scores 10 + 0, (6000, 20) scores 5 + 4
        let table = fixture();
        let m = table.find_closest_trajectory(100.0, 5000.0, 12.0).unwrap();
        assert_eq!(m.back_spin, 6000.0);
        // (3000, 12) scores 5 + 2, (6000, 20) scores 10 + 2
        let m = table.find_closest_trajectory(100.0, 4000.0, 16.0).unwrap();
        assert_eq!(m.back_spin, 3000.0);
    }

    #[test]
    fn score_ties_go_to_the_first_pair() {
        let table = fixture();
        // 4500 rpm / 16 deg is score 9.5 from both pairs
        let m = table.find_closest_trajectory(100.0, 4500.0, 16.0).unwrap();
        assert_eq!(m.back_spin, 3000.0);
    }

    #[test]
    fn duplicate_speeds_do_not_divide_by_zero() {
        let table = TrajectoryTable::from_samples(vec![
            sample(100.0, 3000.0, 12.0, 150.0),
            sample(100.0, 3000.0, 12.0, 150.0),
        ]);
        let m = table.find_closest_trajectory(100.0, 3000.0, 12.0).unwrap();
        assert_eq!(m.carry, 150.0);
    }

    #[test]
    fn empty_store_has_no_match() {
        let table = TrajectoryTable::default();
        assert!(table.is_empty());
        assert!(table.coverage().is_none());
        assert!(table.find_closest_trajectory(120.0, 5000.0, 18.0).is_none());
    }

    #[test]
    fn non_finite_samples_are_skipped() {
        let table = TrajectoryTable::from_samples(vec![
            sample(f64::NAN, 3000.0, 12.0, 150.0),
            sample(100.0, 3000.0, 12.0, 150.0),
        ]);
        assert_eq!(table.len(), 1);
    }
}
