use serde::Serialize;

use crate::error::{CalcError, Result};

/// Plausible launch and carry ranges for one club (mph, rpm, degrees, meters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClubEnvelope {
    pub name: &'static str,
    pub spin_min: f64,
    pub spin_max: f64,
    pub speed_min: f64,
    pub speed_max: f64,
    pub vla_min: f64,
    pub vla_max: f64,
    pub carry_min: f64,
    pub carry_max: f64,
}

impl ClubEnvelope {
    pub fn avg_spin(&self) -> f64 {
        (self.spin_min + self.spin_max) / 2.0
    }

    pub fn avg_vla(&self) -> f64 {
        (self.vla_min + self.vla_max) / 2.0
    }

    pub fn carry_midpoint(&self) -> f64 {
        (self.carry_min + self.carry_max) / 2.0
    }

    pub fn speed_range(&self) -> f64 {
        self.speed_max - self.speed_min
    }
}

/// Longest club first.
pub static CLUBS: [ClubEnvelope; 14] = [
    ClubEnvelope {
        name: "Driver",
        spin_min: 1400.0,
        spin_max: 3800.0,
        speed_min: 153.0,
        speed_max: 170.0,
        vla_min: 11.0,
        vla_max: 18.0,
        carry_min: 225.0,
        carry_max: 275.0,
    },
    ClubEnvelope {
        name: "3 Wood",
        spin_min: 1800.0,
        spin_max: 4200.0,
        speed_min: 145.0,
        speed_max: 157.0,
        vla_min: 10.0,
        vla_max: 15.0,
        carry_min: 205.0,
        carry_max: 235.0,
    },
    ClubEnvelope {
        name: "3 Hybrid",
        spin_min: 2000.0,
        spin_max: 4500.0,
        speed_min: 134.0,
        speed_max: 149.0,
        vla_min: 12.0,
        vla_max: 18.0,
        carry_min: 185.0,
        carry_max: 215.0,
    },
    ClubEnvelope {
        name: "3 Iron",
        spin_min: 3500.0,
        spin_max: 4800.0,
        speed_min: 132.0,
        speed_max: 143.0,
        vla_min: 13.0,
        vla_max: 18.0,
        carry_min: 180.0,
        carry_max: 205.0,
    },
    ClubEnvelope {
        name: "5 Iron",
        spin_min: 4000.0,
        spin_max: 5700.0,
        speed_min: 128.0,
        speed_max: 137.0,
        vla_min: 15.0,
        vla_max: 18.0,
        carry_min: 165.0,
        carry_max: 185.0,
    },
    ClubEnvelope {
        name: "6 Iron",
        spin_min: 4600.0,
        spin_max: 6500.0,
        speed_min: 120.0,
        speed_max: 133.0,
        vla_min: 15.0,
        vla_max: 21.0,
        carry_min: 158.0,
        carry_max: 175.0,
    },
    ClubEnvelope {
        name: "7 Iron",
        spin_min: 5000.0,
        spin_max: 7500.0,
        speed_min: 116.0,
        speed_max: 127.0,
        vla_min: 16.0,
        vla_max: 22.0,
        carry_min: 145.0,
        carry_max: 165.0,
    },
    ClubEnvelope {
        name: "8 Iron",
        spin_min: 6300.0,
        spin_max: 8500.0,
        speed_min: 110.0,
        speed_max: 120.0,
        vla_min: 17.0,
        vla_max: 23.0,
        carry_min: 130.0,
        carry_max: 149.0,
    },
    ClubEnvelope {
        name: "9 Iron",
        spin_min: 7300.0,
        spin_max: 9500.0,
        speed_min: 102.0,
        speed_max: 114.0,
        vla_min: 20.0,
        vla_max: 25.0,
        carry_min: 118.0,
        carry_max: 138.0,
    },
    ClubEnvelope {
        name: "PW",
        spin_min: 8000.0,
        spin_max: 10500.0,
        speed_min: 95.0,
        speed_max: 106.0,
        vla_min: 21.0,
        vla_max: 27.0,
        carry_min: 105.0,
        carry_max: 128.0,
    },
    ClubEnvelope {
        name: "48°",
        spin_min: 8500.0,
        spin_max: 10500.0,
        speed_min: 93.0,
        speed_max: 102.0,
        vla_min: 23.0,
        vla_max: 28.0,
        carry_min: 98.0,
        carry_max: 115.0,
    },
    ClubEnvelope {
        name: "50°",
        spin_min: 8700.0,
        spin_max: 11200.0,
        speed_min: 86.0,
        speed_max: 94.0,
        vla_min: 24.0,
        vla_max: 29.0,
        carry_min: 90.0,
        carry_max: 110.0,
    },
    ClubEnvelope {
        name: "54°",
        spin_min: 9800.0,
        spin_max: 11500.0,
        speed_min: 50.0,
        speed_max: 90.0,
        vla_min: 27.0,
        vla_max: 31.0,
        carry_min: 50.0,
        carry_max: 96.0,
    },
    ClubEnvelope {
        name: "60°",
        spin_min: 9800.0,
        spin_max: 12000.0,
        speed_min: 30.0,
        speed_max: 80.0,
        vla_min: 27.0,
        vla_max: 31.0,
        carry_min: 30.0,
        carry_max: 82.0,
    },
];

/// Exact name match, ignoring ASCII case.
pub fn find_club(name: &str) -> Result<(usize, &'static ClubEnvelope)> {
    let name = name.trim();
    CLUBS
        .iter()
        .enumerate()
        .find(|(_, club)| club.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| CalcError::UnknownClub(name.to_string()))
}
