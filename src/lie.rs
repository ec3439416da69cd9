//! Sloped-lie corrections.
//!
//! An up/down lie tilts the launch: uphill lies add loft, downhill lies take
//! it away. The effect fades as launch angle rises. A right/left lie (ball
//! above or below the feet) pushes the ball off line.

use serde::{Deserialize, Serialize};

/// VLA change per degree of up/down lie, indexed by `floor(vla / 5)`.
const VLA_LIE_FACTOR: [f64; 10] = [1.0, 1.0, 0.7, 0.6, 0.55, 0.5, 0.45, 0.4, 0.3, 0.2];

/// Horizontal launch change per degree of right/left lie, same indexing.
const HLA_LIE_FACTOR: [f64; 10] = [0.5, 0.5, 0.45, 0.4, 0.35, 0.3, 0.2, 0.1, 0.1, 0.05];

fn lie_bucket(vla: f64) -> usize {
    let index = (vla / 5.0).floor();
    if index.is_nan() || index < 0.0 {
        0
    } else {
        (index as usize).min(VLA_LIE_FACTOR.len() - 1)
    }
}

pub fn vla_lie_factor(vla: f64) -> f64 {
    VLA_LIE_FACTOR[lie_bucket(vla)]
}

pub fn hla_lie_factor(vla: f64) -> f64 {
    HLA_LIE_FACTOR[lie_bucket(vla)]
}

/// Launch angle after an up/down lie. Positive `lie_degrees` is uphill.
pub fn modified_lie_vla(vla: f64, lie_degrees: f64) -> f64 {
    vla + vla_lie_factor(vla) * lie_degrees
}

/// Effective horizontal launch angle produced by a right/left lie.
pub fn modified_lie_hla(vla: f64, lie_degrees: f64) -> f64 {
    hla_lie_factor(vla) * lie_degrees
}

/// How a right/left lie turns into lateral deviation at landing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfflineModel {
    /// `carry * tan(hla_lie_factor(vla) * lie)`, rounded to 0.1 m.
    Tangent,
    /// `carry * sin(lie) * clamp(0.95 - (vla - 10) * 0.55 / 35, 0.4, 0.95)`.
    #[default]
    Sine,
}

impl OfflineModel {
    /// Lateral deviation in meters; positive is right of the target line.
    pub fn offline_deviation(self, vla: f64, lie_degrees: f64, carry_m: f64) -> f64 {
        match self {
            OfflineModel::Tangent => {
                let angle = modified_lie_hla(vla, lie_degrees).to_radians();
                (carry_m * angle.tan() * 10.0).round() / 10.0
            }
            OfflineModel::Sine => {
                let base = carry_m * lie_degrees.to_radians().sin();
                let damping = (0.95 - (vla - 10.0) * (0.55 / 35.0)).clamp(0.4, 0.95);
                base * damping
            }
        }
    }
}
