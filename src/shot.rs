use serde::{Deserialize, Serialize};

use crate::environment::Conditions;
use crate::penalty::PenaltyFactors;

/// Raw launch parameters plus the lie and course conditions they were hit in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotRequest {
    pub material: String,
    pub speed: f64,          // mph
    pub spin: f64,           // rpm
    pub vla: f64,            // degrees
    pub up_down_lie: f64,    // degrees, positive is uphill
    pub right_left_lie: f64, // degrees, positive pushes the ball right
    pub elevation: f64,      // meters, target above (+) or below (-) the ball
    pub altitude: f64,       // feet above sea level
}

impl ShotRequest {
    /// Flat lie at sea level.
    pub fn new(material: impl Into<String>, speed: f64, spin: f64, vla: f64) -> Self {
        Self {
            material: material.into(),
            speed,
            spin,
            vla,
            up_down_lie: 0.0,
            right_left_lie: 0.0,
            elevation: 0.0,
            altitude: 0.0,
        }
    }

    pub fn with_lie(mut self, up_down: f64, right_left: f64) -> Self {
        self.up_down_lie = up_down;
        self.right_left_lie = right_left;
        self
    }

    pub fn with_conditions(mut self, elevation: f64, altitude: f64) -> Self {
        self.elevation = elevation;
        self.altitude = altitude;
        self
    }

    pub fn conditions(&self) -> Conditions {
        Conditions {
            elevation_m: self.elevation,
            altitude_ft: self.altitude,
        }
    }
}

/// Outcome of evaluating one [`ShotRequest`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShotResult {
    #[serde(flatten)]
    pub request: ShotRequest,
    pub adjusted_speed: f64,
    pub adjusted_spin: f64,
    /// After the material penalty and the up/down lie.
    pub adjusted_vla: f64,
    /// Store carry for the adjusted launch, before environment.
    pub carry: f64,
    pub env_carry: f64,
    pub offline_deviation: f64,
    pub penalties: PenaltyFactors,
}

/// Everything the carry calculator reports for one set of launch numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculateCarryResponse {
    pub material: String,
    pub raw_speed: f64,
    pub raw_spin: f64,
    pub raw_vla: f64,
    /// Store carry for the unpenalised launch.
    pub carry_raw: f64,
    pub carry_modified: f64,
    pub env_carry: f64,
    pub offline_deviation: f64,
    pub speed_modified: f64,
    pub spin_modified: f64,
    pub vla_modified: f64,
    pub speed_penalty: f64,
    pub spin_penalty: f64,
    pub vla_penalty: f64,
}

/// Inputs to the club suggestion search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestRequest {
    pub target_carry: f64, // meters
    pub material: String,
    pub up_down_lie: f64,
    pub right_left_lie: f64,
    pub elevation: f64,
    pub altitude: f64,
}

impl SuggestRequest {
    pub fn new(target_carry: f64, material: impl Into<String>) -> Self {
        Self {
            target_carry,
            material: material.into(),
            up_down_lie: 0.0,
            right_left_lie: 0.0,
            elevation: 0.0,
            altitude: 0.0,
        }
    }

    pub fn with_lie(mut self, up_down: f64, right_left: f64) -> Self {
        self.up_down_lie = up_down;
        self.right_left_lie = right_left;
        self
    }

    pub fn with_conditions(mut self, elevation: f64, altitude: f64) -> Self {
        self.elevation = elevation;
        self.altitude = altitude;
        self
    }

    pub fn conditions(&self) -> Conditions {
        Conditions {
            elevation_m: self.elevation,
            altitude_ft: self.altitude,
        }
    }

    pub(crate) fn shot(&self, speed: f64, spin: f64, vla: f64) -> ShotRequest {
        ShotRequest::new(self.material.clone(), speed, spin, vla)
            .with_lie(self.up_down_lie, self.right_left_lie)
            .with_conditions(self.elevation, self.altitude)
    }
}

/// Club and launch that carries the requested distance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShotSuggestion {
    pub club_name: &'static str,
    /// Speed after the lie penalty.
    pub ball_speed: f64,
    pub raw_ball_speed: f64,
    pub spin: f64,
    pub raw_spin: f64,
    pub vla: f64,
    pub raw_vla: f64,
    /// Store carry for the raw launch, shifted by the final correction.
    pub raw_carry: f64,
    pub estimated_carry: f64,
    /// Meters; positive means aim right, negative aim left.
    pub offline_aim_adjustment: f64,
}

/// Inputs to a power sweep over one club.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub club: String,
    pub material: String,
    pub up_down_lie: f64,
    pub right_left_lie: f64,
    pub elevation: f64,
    pub altitude: f64,
    pub increments: usize,
}

/// One power level of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShotIncrementResult {
    /// 0.0 at the club's minimum speed, 1.0 at its maximum.
    pub power: f64,
    pub ball_speed: f64,
    pub spin: f64,
    pub vla: f64,
    pub raw_carry: f64,
    pub estimated_carry: f64,
    pub env_carry: f64,
    pub offline_deviation: f64,
    pub modifiers: PenaltyFactors,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShotAnalysis {
    pub request: AnalyzeRequest,
    /// `None` where the store had no data for that power level.
    pub results: Vec<Option<ShotIncrementResult>>,
}
