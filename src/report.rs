use anyhow::Result;
use serde::Serialize;

use gsp_calc::clubs::ClubEnvelope;
use gsp_calc::penalty::MaterialProfile;
use gsp_calc::{CalculateCarryResponse, ShotAnalysis, ShotSuggestion, TrajectoryMatch};

fn rule() {
    println!("{}", "-".repeat(40));
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_carry(carry: &CalculateCarryResponse) {
    println!();
    rule();
    println!("  Material:     {}", carry.material);
    println!(
        "  Launch:       {:.1} mph / {:.0} rpm / {:.1} deg",
        carry.raw_speed, carry.raw_spin, carry.raw_vla
    );
    println!(
        "  Adjusted:     {:.1} mph / {:.0} rpm / {:.1} deg",
        carry.speed_modified, carry.spin_modified, carry.vla_modified
    );
    println!(
        "  Penalties:    speed {:.3}, spin {:.3}, vla {:.3}",
        carry.speed_penalty, carry.spin_penalty, carry.vla_penalty
    );
    println!("  Raw Carry:    {:.1} m", carry.carry_raw);
    println!("  Lie Carry:    {:.1} m", carry.carry_modified);
    println!("  Est. Carry:   {:.1} m", carry.env_carry);
    println!("  Offline:      {:+.1} m", carry.offline_deviation);
    rule();
    println!();
}

pub fn print_suggestion(target: f64, suggestion: &ShotSuggestion) {
    println!();
    rule();
    println!("  Target:       {:.1} m", target);
    println!("  Club:         {}", suggestion.club_name);
    println!(
        "  Ball Speed:   {:.1} mph (swing {:.1} mph)",
        suggestion.ball_speed, suggestion.raw_ball_speed
    );
    println!(
        "  Spin:         {:.0} rpm (nominal {:.0} rpm)",
        suggestion.spin, suggestion.raw_spin
    );
    println!(
        "  VLA:          {:.1} deg (nominal {:.1} deg)",
        suggestion.vla, suggestion.raw_vla
    );
    println!("  Raw Carry:    {:.1} m", suggestion.raw_carry);
    println!("  Est. Carry:   {:.1} m", suggestion.estimated_carry);
    let aim = suggestion.offline_aim_adjustment;
    if aim.abs() < 0.05 {
        println!("  Aim:          straight");
    } else {
        let side = if aim > 0.0 { "right" } else { "left" };
        println!("  Aim:          {:.1} m {}", aim.abs(), side);
    }
    rule();
    println!();
}

pub fn print_analysis(analysis: &ShotAnalysis) {
    println!();
    rule();
    println!(
        "  {} from {} ({} levels)",
        analysis.request.club, analysis.request.material, analysis.request.increments
    );
    rule();
    println!("  Power   Speed    Raw   Carry     Env  Offline");
    for level in &analysis.results {
        match level {
            Some(l) => println!(
                "  {:>4.0}%  {:>5.1}  {:>5.1}  {:>6.1}  {:>6.1}  {:>+7.1}",
                l.power * 100.0,
                l.ball_speed,
                l.raw_carry,
                l.estimated_carry,
                l.env_carry,
                l.offline_deviation
            ),
            None => println!("  (no trajectory data)"),
        }
    }
    rule();
    println!();
}

pub fn print_lookup(found: &TrajectoryMatch) {
    println!();
    rule();
    println!("  Ball Speed:   {:.1} mph", found.ball_speed);
    println!("  Matched Spin: {:.0} rpm", found.back_spin);
    println!("  Matched VLA:  {:.1} deg", found.vla);
    println!("  Carry:        {:.1} m", found.carry);
    println!("  Offline:      {:+.1} m", found.offline);
    rule();
    println!();
}

pub fn print_clubs(clubs: &[ClubEnvelope]) {
    rule();
    println!("  Club       Speed mph   Spin rpm     VLA    Carry m");
    for club in clubs {
        println!(
            "  {:<9} {:>4.0}-{:<4.0}  {:>5.0}-{:<5.0}  {:>2.0}-{:<2.0}  {:>3.0}-{:<3.0}",
            club.name,
            club.speed_min,
            club.speed_max,
            club.spin_min,
            club.spin_max,
            club.vla_min,
            club.vla_max,
            club.carry_min,
            club.carry_max
        );
    }
    rule();
}

pub fn print_materials(materials: &[MaterialProfile]) {
    rule();
    for material in materials {
        if material.is_clean_lie() {
            println!("  {:<10} (no penalty)", material.name);
        } else {
            println!("  {}", material.name);
        }
    }
    rule();
}
