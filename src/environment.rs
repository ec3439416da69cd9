//! Altitude and elevation-difference distance modifiers.

use serde::{Deserialize, Serialize};

/// Altitude scaling revision. Both scale linearly per 500 ft above sea level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AltitudeModel {
    /// 0.75% per 500 ft.
    #[default]
    Tuned,
    /// 1% per 500 ft.
    OnePercent,
}

impl AltitudeModel {
    pub fn per_500_ft(self) -> f64 {
        match self {
            AltitudeModel::Tuned => 0.0075,
            AltitudeModel::OnePercent => 0.01,
        }
    }

    /// Multiplier on carry for a shot played at `altitude_ft`.
    pub fn factor(self, altitude_ft: f64) -> f64 {
        1.0 + (altitude_ft / 500.0) * self.per_500_ft()
    }
}

/// Launch conditions used to classify a shot for the elevation model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LaunchProfile {
    pub speed: f64,
    pub spin: f64,
    pub vla: f64,
}

impl LaunchProfile {
    /// Stand-in mid-iron launch used before the actual club is known.
    pub const GENERIC: LaunchProfile = LaunchProfile {
        speed: 120.0,
        spin: 5800.0,
        vla: 18.0,
    };
}

/// Elevation sensitivity for one family of launches, steep downhill first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchType {
    pub name: &'static str,
    pub vla_range: (f64, f64),
    pub spin_range: (f64, f64),
    /// Bands: <=-25, <=-15, <=-5, <=5, <=15, <=25, >25 meters.
    pub elevation_multipliers: [f64; 7],
}

impl LaunchType {
    fn matches(&self, spin: f64, vla: f64) -> bool {
        (self.vla_range.0..=self.vla_range.1).contains(&vla)
            && (self.spin_range.0..=self.spin_range.1).contains(&spin)
    }

    fn multiplier(&self, elevation_diff_m: f64) -> f64 {
        let band = ELEVATION_BANDS
            .iter()
            .position(|&upper| elevation_diff_m <= upper)
            .unwrap_or(ELEVATION_BANDS.len());
        self.elevation_multipliers[band]
    }
}

const ELEVATION_BANDS: [f64; 6] = [-25.0, -15.0, -5.0, 5.0, 15.0, 25.0];

const MID_IRONS: usize = 4;

pub static LAUNCH_TYPES: [LaunchType; 9] = [
    LaunchType {
        name: "Low Spin Driver",
        vla_range: (0.0, 20.0),
        spin_range: (0.0, 2000.0),
        elevation_multipliers: [1.5, 1.3, 1.2, 1.0, 1.2, 1.5, 1.8],
    },
    LaunchType {
        name: "Medium Spin Driver",
        vla_range: (0.0, 20.0),
        spin_range: (2000.0, 2600.0),
        elevation_multipliers: [1.45, 1.35, 1.15, 1.0, 1.15, 1.45, 1.65],
    },
    LaunchType {
        name: "High Spin Woods/Hybrids",
        vla_range: (0.0, 22.0),
        spin_range: (2600.0, 3500.0),
        elevation_multipliers: [1.4, 1.3, 1.15, 1.0, 1.2, 1.4, 1.6],
    },
    LaunchType {
        name: "Low/Mid Irons",
        vla_range: (8.0, 22.0),
        spin_range: (3500.0, 5000.0),
        elevation_multipliers: [1.4, 1.15, 1.05, 1.0, 1.05, 1.15, 1.25],
    },
    LaunchType {
        name: "Mid Irons",
        vla_range: (14.0, 23.0),
        spin_range: (4500.0, 5800.0),
        elevation_multipliers: [1.4, 1.1, 1.05, 1.0, 1.05, 1.15, 1.3],
    },
    LaunchType {
        name: "Mid/High Irons",
        vla_range: (14.0, 23.0),
        spin_range: (5800.0, 7500.0),
        elevation_multipliers: [1.08, 1.05, 1.01, 1.0, 1.01, 1.07, 1.1],
    },
    LaunchType {
        name: "High Irons",
        vla_range: (16.0, 30.0),
        spin_range: (6000.0, 9000.0),
        elevation_multipliers: [0.95, 0.98, 0.99, 1.0, 1.0, 1.1, 1.2],
    },
    LaunchType {
        name: "Wedges",
        vla_range: (21.0, 70.0),
        spin_range: (9000.0, 10000.0),
        elevation_multipliers: [0.9, 0.95, 0.98, 1.0, 0.98, 0.95, 0.9],
    },
    LaunchType {
        name: "High Loft Wedges",
        vla_range: (22.0, 70.0),
        spin_range: (10000.0, 99999.0),
        elevation_multipliers: [0.8, 0.9, 0.95, 1.0, 0.95, 0.9, 0.8],
    },
];

/// First launch type whose ranges contain the launch, else Mid Irons.
pub fn classify_launch(spin: f64, vla: f64) -> &'static LaunchType {
    LAUNCH_TYPES
        .iter()
        .find(|lt| lt.matches(spin, vla))
        .unwrap_or(&LAUNCH_TYPES[MID_IRONS])
}

/// Full elevation effect at 200 m and beyond, 70% of it for very short shots.
pub fn elevation_distance_scale(target_distance_m: f64) -> f64 {
    0.7 + (target_distance_m / 200.0).min(1.0) * 0.3
}

/// Distance (m) to add to the carry for a target `elevation_diff_m` above
/// (positive) or below (negative) the ball.
pub fn elevation_distance_modifier(
    target_distance_m: f64,
    elevation_diff_m: f64,
    launch: &LaunchProfile,
) -> f64 {
    let launch_type = classify_launch(launch.spin, launch.vla);
    let multiplier = launch_type.multiplier(elevation_diff_m);
    let scale = elevation_distance_scale(target_distance_m);
    log::debug!(
        "[ENV] {} elevation {:.1} m -> multiplier {:.2}, scale {:.2}",
        launch_type.name,
        elevation_diff_m,
        multiplier,
        scale
    );
    -elevation_diff_m * multiplier * scale
}

/// Environment conditions shared by every evaluation in a request.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Conditions {
    pub elevation_m: f64,
    pub altitude_ft: f64,
}

impl Conditions {
    /// Carry after elevation and altitude, given the store's base carry.
    pub fn apply(&self, model: AltitudeModel, carry: f64, launch: &LaunchProfile) -> f64 {
        let elevation = elevation_distance_modifier(carry, self.elevation_m, launch);
        (carry + elevation) * model.factor(self.altitude_ft)
    }

    /// Inverse of [`Conditions::apply`]: the flat, sea-level carry needed to
    /// land at `target`. The elevation term is evaluated at the target
    /// distance, so the inversion is approximate.
    pub fn needed_carry(&self, model: AltitudeModel, target: f64, launch: &LaunchProfile) -> f64 {
        let elevation = elevation_distance_modifier(target, self.elevation_m, launch);
        (target - elevation) / model.factor(self.altitude_ft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn altitude_models() {
        assert_eq!(AltitudeModel::Tuned.factor(0.0), 1.0);
        assert!((AltitudeModel::Tuned.factor(5000.0) - 1.075).abs() < 1e-12);
        assert!((AltitudeModel::OnePercent.factor(5000.0) - 1.10).abs() < 1e-12);
    }

    #[test]
    fn classification_picks_first_match_and_defaults_to_mid_irons() {
        assert_eq!(classify_launch(1800.0, 12.0).name, "Low Spin Driver");
        // 2000 rpm sits on both driver ranges; the first one wins
        assert_eq!(classify_launch(2000.0, 12.0).name, "Low Spin Driver");
        assert_eq!(classify_launch(5800.0, 18.0).name, "Mid Irons");
        assert_eq!(classify_launch(9500.0, 26.0).name, "Wedges");
        assert_eq!(classify_launch(11000.0, 29.0).name, "High Loft Wedges");
        // high VLA with driver spin fits nothing
        assert_eq!(classify_launch(1500.0, 40.0).name, "Mid Irons");
    }

    #[test]
    fn elevation_bands() {
        let driver = &LAUNCH_TYPES[0];
        assert_eq!(driver.multiplier(-30.0), 1.5);
        assert_eq!(driver.multiplier(-25.0), 1.5);
        assert_eq!(driver.multiplier(-20.0), 1.3);
        assert_eq!(driver.multiplier(0.0), 1.0);
        assert_eq!(driver.multiplier(5.0), 1.0);
        assert_eq!(driver.multiplier(10.0), 1.2);
        assert_eq!(driver.multiplier(25.0), 1.5);
        assert_eq!(driver.multiplier(25.1), 1.8);
    }

    #[test]
    fn uphill_shortens_and_downhill_lengthens() {
        let launch = LaunchProfile::GENERIC;
        let up = elevation_distance_modifier(200.0, 10.0, &launch);
        let down = elevation_distance_modifier(200.0, -10.0, &launch);
        assert!((up - -10.5).abs() < 1e-9, "got {up}");
        assert!((down - 10.5).abs() < 1e-9, "got {down}");
    }

    #[test]
    fn short_shots_are_damped() {
        assert_eq!(elevation_distance_scale(0.0), 0.7);
        assert!((elevation_distance_scale(100.0) - 0.85).abs() < 1e-12);
        assert_eq!(elevation_distance_scale(400.0), 1.0);
    }

    #[test]
    fn needed_carry_inverts_flat_conditions_exactly() {
        let conditions = Conditions {
            elevation_m: 0.0,
            altitude_ft: 2500.0,
        };
        let launch = LaunchProfile::GENERIC;
        let model = AltitudeModel::Tuned;
        let needed = conditions.needed_carry(model, 150.0, &launch);
        let landed = conditions.apply(model, needed, &launch);
        assert!((landed - 150.0).abs() < 1e-9, "got {landed}");
        assert!(needed < 150.0);
    }
}
