//! Ground-interaction penalties.
//!
//! Each material owns a segment of six shared multiplier tables. Speed tables
//! are sampled every 10 mph over 0..=150 (16 entries per material) and VLA
//! tables every 5 degrees over 0..=45 (10 entries per material). A penalty
//! factor is the product of the speed-indexed and the VLA-indexed multiplier.

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, Result};

const SPEED_TABLE_LEN: usize = 80;
const VLA_TABLE_LEN: usize = 50;

const SPEED_STEP: f64 = 10.0;
const SPEED_MAX: f64 = 150.0;
const SPEED_LAST_BUCKET: usize = 15;

const VLA_STEP: f64 = 5.0;
const VLA_MAX: f64 = 45.0;
const VLA_LAST_BUCKET: usize = 9;

/// Which revision of the speed/spin tables to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyTableSet {
    #[default]
    Legacy,
    Revised,
}

#[derive(Debug)]
struct PenaltyTables {
    speed_to_speed: &'static [f64; SPEED_TABLE_LEN],
    speed_to_spin: &'static [f64; SPEED_TABLE_LEN],
    speed_to_vla: &'static [f64; SPEED_TABLE_LEN],
    vla_to_speed: &'static [f64; VLA_TABLE_LEN],
    vla_to_spin: &'static [f64; VLA_TABLE_LEN],
    vla_to_vla: &'static [f64; VLA_TABLE_LEN],
}

static LEGACY_TABLES: PenaltyTables = PenaltyTables {
    speed_to_speed: &LEGACY_SPEED_TO_SPEED,
    speed_to_spin: &LEGACY_SPEED_TO_SPIN,
    speed_to_vla: &SPEED_TO_VLA,
    vla_to_speed: &LEGACY_VLA_TO_SPEED,
    vla_to_spin: &LEGACY_VLA_TO_SPIN,
    vla_to_vla: &VLA_TO_VLA,
};

static REVISED_TABLES: PenaltyTables = PenaltyTables {
    speed_to_speed: &REVISED_SPEED_TO_SPEED,
    speed_to_spin: &REVISED_SPEED_TO_SPIN,
    speed_to_vla: &SPEED_TO_VLA,
    vla_to_speed: &REVISED_VLA_TO_SPEED,
    vla_to_spin: &REVISED_VLA_TO_SPIN,
    vla_to_vla: &VLA_TO_VLA,
};

impl PenaltyTableSet {
    fn tables(self) -> &'static PenaltyTables {
        match self {
            PenaltyTableSet::Legacy => &LEGACY_TABLES,
            PenaltyTableSet::Revised => &REVISED_TABLES,
        }
    }
}

/// A ground surface and its segment offsets into the penalty tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MaterialProfile {
    pub name: &'static str,
    pub speed_offset: usize,
    pub vla_offset: usize,
}

impl MaterialProfile {
    const fn new(name: &'static str, speed_offset: usize, vla_offset: usize) -> Self {
        Self {
            name,
            speed_offset,
            vla_offset,
        }
    }

    /// Fairway and tee lies are struck clean and never penalised.
    pub fn is_clean_lie(&self) -> bool {
        matches!(self.name, "fairway" | "tee")
    }
}

pub const MATERIALS: &[MaterialProfile] = &[
    MaterialProfile::new("semirough", 32, 20),
    MaterialProfile::new("fairway", 48, 47),
    MaterialProfile::new("tee", 48, 47),
    MaterialProfile::new("rough", 0, 0),
    MaterialProfile::new("earth", 0, 0),
    MaterialProfile::new("pinestraw", 0, 0),
    MaterialProfile::new("leaves", 0, 0),
    MaterialProfile::new("deeprough", 16, 10),
    MaterialProfile::new("concrete", 48, 30),
    MaterialProfile::new("stone", 48, 30),
    MaterialProfile::new("sand", 64, 40),
];

/// Look up a material by its canonical name (ASCII case-insensitive, no
/// partial matches).
pub fn find_material(name: &str) -> Result<&'static MaterialProfile> {
    let name = name.trim();
    MATERIALS
        .iter()
        .find(|m| m.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| CalcError::UnknownMaterial(name.to_string()))
}

/// Multipliers applied to raw speed, spin and VLA.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PenaltyFactors {
    pub speed: f64,
    pub spin: f64,
    pub vla: f64,
}

impl PenaltyFactors {
    pub const NONE: PenaltyFactors = PenaltyFactors {
        speed: 1.0,
        spin: 1.0,
        vla: 1.0,
    };
}

#[derive(Debug, Clone, Copy)]
pub struct PenaltyModel {
    tables: &'static PenaltyTables,
}

impl Default for PenaltyModel {
    fn default() -> Self {
        Self::new(PenaltyTableSet::default())
    }
}

impl PenaltyModel {
    pub fn new(table_set: PenaltyTableSet) -> Self {
        Self {
            tables: table_set.tables(),
        }
    }

    pub fn penalty(&self, material: &str, speed: f64, vla: f64) -> Result<PenaltyFactors> {
        let profile = find_material(material)?;
        Ok(self.penalty_for(profile, speed, vla))
    }

    /// Speed factor only; used when ranking club envelopes.
    pub fn speed_penalty(&self, material: &str, speed: f64, vla: f64) -> Result<f64> {
        let profile = find_material(material)?;
        if profile.is_clean_lie() {
            return Ok(1.0);
        }
        let t = self.tables;
        Ok(speed_multiplier(t.speed_to_speed, profile.speed_offset, speed)
            * vla_multiplier(t.vla_to_speed, profile.vla_offset, vla))
    }

    pub fn penalty_for(&self, profile: &MaterialProfile, speed: f64, vla: f64) -> PenaltyFactors {
        if profile.is_clean_lie() {
            return PenaltyFactors::NONE;
        }

        let t = self.tables;
        let (so, vo) = (profile.speed_offset, profile.vla_offset);
        let factors = PenaltyFactors {
            speed: speed_multiplier(t.speed_to_speed, so, speed)
                * vla_multiplier(t.vla_to_speed, vo, vla),
            spin: speed_multiplier(t.speed_to_spin, so, speed)
                * vla_multiplier(t.vla_to_spin, vo, vla),
            vla: speed_multiplier(t.speed_to_vla, so, speed) * vla_multiplier(t.vla_to_vla, vo, vla),
        };
        log::debug!(
            "[PENALTY] {} @ {:.1} mph / {:.1} deg -> speed {:.3}, spin {:.3}, vla {:.3}",
            profile.name,
            speed,
            vla,
            factors.speed,
            factors.spin,
            factors.vla
        );
        factors
    }
}

fn speed_multiplier(table: &[f64], offset: usize, speed: f64) -> f64 {
    segment_lerp(table, offset, speed, SPEED_STEP, SPEED_MAX, SPEED_LAST_BUCKET)
}

fn vla_multiplier(table: &[f64], offset: usize, vla: f64) -> f64 {
    segment_lerp(table, offset, vla, VLA_STEP, VLA_MAX, VLA_LAST_BUCKET)
}

/// Piecewise-linear lookup inside one material's table segment. Inputs are
/// clamped to `[0, max]`; the last bucket is returned as-is, never
/// extrapolated.
fn segment_lerp(table: &[f64], offset: usize, value: f64, step: f64, max: f64, last: usize) -> f64 {
    let value = value.clamp(0.0, max);
    let index = (value / step).floor() as usize;
    if index < last {
        lerp(table[offset + index], table[offset + index + 1], (value % step) / step)
    } else {
        table[offset + last]
    }
}

/// Linear interpolation with `amount` clamped to `[0, 1]`.
pub(crate) fn lerp(start: f64, end: f64, amount: f64) -> f64 {
    start + (end - start) * amount.clamp(0.0, 1.0)
}

const LEGACY_SPEED_TO_SPEED: [f64; SPEED_TABLE_LEN] = [
    0.98, 0.98, 0.98, 0.97, 0.97, 0.96, 0.96, 0.95,
    0.95, 0.94, 0.94, 0.94, 0.94, 0.94, 0.94, 0.94,
    0.97, 0.94, 0.91, 0.88, 0.87, 0.86, 0.86, 0.86,
    0.86, 0.86, 0.86, 0.86, 0.86, 0.84, 0.82, 0.8,
    0.985, 0.985, 0.985, 0.985, 0.985, 0.985, 0.985, 0.985,
    0.985, 0.985, 0.985, 0.985, 0.985, 0.985, 0.985, 0.985,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 1.0, 1.0, 1.0, 0.98, 0.96, 0.9, 0.6,
    0.7, 0.72, 0.75, 0.78, 0.83, 0.88, 0.9, 0.92,
    0.93, 0.93, 0.93, 0.93, 0.93, 0.93, 0.93, 0.93,
];

const REVISED_SPEED_TO_SPEED: [f64; SPEED_TABLE_LEN] = [
    0.98, 0.98, 0.98, 0.97, 0.97, 0.96, 0.96, 0.95,
    0.95, 0.94, 0.94, 0.94, 0.94, 0.94, 0.94, 0.94,
    0.97, 0.94, 0.92, 0.9, 0.88, 0.86, 0.86, 0.86,
    0.86, 0.86, 0.86, 0.86, 0.86, 0.84, 0.82, 0.8,
    0.985, 0.985, 0.985, 0.985, 0.985, 0.985, 0.985, 0.985,
    0.985, 0.985, 0.985, 0.985, 0.985, 0.985, 0.985, 0.985,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    0.75, 0.78, 0.82, 0.84, 0.86, 0.88, 0.9, 0.92,
    0.93, 0.93, 0.93, 0.93, 0.93, 0.93, 0.93, 0.93,
];

const LEGACY_SPEED_TO_SPIN: [f64; SPEED_TABLE_LEN] = [
    0.6, 0.63, 0.67, 0.7, 0.73, 0.77, 0.8, 0.85,
    0.85, 0.85, 0.85, 0.85, 0.85, 0.85, 0.85, 0.85,
    0.6, 0.61, 0.65, 0.69, 0.7, 0.74, 0.76, 0.76,
    0.76, 0.76, 0.76, 0.76, 0.76, 0.76, 0.76, 0.76,
    0.95, 0.95, 0.95, 0.95, 0.95, 0.95, 0.95, 0.95,
    0.95, 0.95, 0.95, 0.95, 0.95, 0.95, 0.95, 0.95,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    0.5, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0, 1.0,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
];

const REVISED_SPEED_TO_SPIN: [f64; SPEED_TABLE_LEN] = [
    0.6, 0.63, 0.67, 0.7, 0.73, 0.77, 0.8, 0.85,
    0.85, 0.85, 0.85, 0.85, 0.85, 0.85, 0.85, 0.85,
    0.6, 0.61, 0.65, 0.69, 0.7, 0.74, 0.76, 0.76,
    0.76, 0.76, 0.76, 0.76, 0.76, 0.76, 0.76, 0.76,
    0.95, 0.95, 0.95, 0.95, 0.95, 0.95, 0.95, 0.95,
    0.95, 0.95, 0.95, 0.95, 0.95, 0.95, 0.95, 0.95,
    0.95, 0.95, 0.95, 0.95, 0.95, 0.95, 0.95, 0.95,
    0.95, 0.95, 0.95, 0.95, 0.95, 0.95, 0.95, 0.95,
    0.5, 0.525, 0.55, 0.6, 0.75, 0.825, 0.9, 0.975,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
];

const SPEED_TO_VLA: [f64; SPEED_TABLE_LEN] = [
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
];

const LEGACY_VLA_TO_SPEED: [f64; VLA_TABLE_LEN] = [
    0.95, 0.95, 0.98, 1.0, 1.0, 1.0, 0.98, 0.98, 0.95, 0.9,
    0.91, 0.91, 0.91, 0.92, 0.92, 0.93, 0.94, 0.94, 0.94, 0.94,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.95, 0.95, 0.95,
];

const REVISED_VLA_TO_SPEED: [f64; VLA_TABLE_LEN] = [
    0.93, 0.935, 0.94, 0.945, 0.95, 0.955, 0.96, 0.965, 0.97, 0.98,
    0.9, 0.905, 0.91, 0.915, 0.92, 0.925, 0.93, 0.935, 0.94, 0.945,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.95, 0.95, 0.95,
];

const LEGACY_VLA_TO_SPIN: [f64; VLA_TABLE_LEN] = [
    0.9, 0.95, 0.95, 0.95, 0.9, 0.9, 0.9, 0.9, 0.9, 0.9,
    0.65, 0.68, 0.74, 0.74, 0.7, 0.7, 0.7, 0.7, 0.7, 0.7,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
];

const REVISED_VLA_TO_SPIN: [f64; VLA_TABLE_LEN] = [
    0.9, 0.91, 0.915, 0.92, 0.925, 0.93, 0.935, 0.94, 0.945, 0.95,
    0.65, 0.68, 0.74, 0.74, 0.7, 0.7, 0.7, 0.7, 0.7, 0.7,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
];

const VLA_TO_VLA: [f64; VLA_TABLE_LEN] = [
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 0.98, 0.98, 0.98, 0.98, 0.98, 0.98, 0.98, 0.98, 0.98,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
];
