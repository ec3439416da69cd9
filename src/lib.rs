//! Golf shot carry calculator and club suggestion engine.
//!
//! Carry comes from a table of measured trajectories. Lie material, sloped
//! lies, elevation difference and altitude adjust the launch and the landing
//! distance; the suggestion search runs the same pipeline in reverse to pick
//! a club and ball speed for a target carry.

pub mod analyzer;
pub mod calculator;
pub mod clubs;
pub mod config;
pub mod dataset;
pub mod environment;
pub mod error;
pub mod lie;
pub mod penalty;
pub mod shot;
pub mod suggest;
pub mod synthetic;
pub mod trajectory;

pub use calculator::ShotCalculator;
pub use config::{EngineConfig, SearchConfig};
pub use error::{CalcError, Result};
pub use shot::{
    AnalyzeRequest, CalculateCarryResponse, ShotAnalysis, ShotIncrementResult, ShotRequest,
    ShotResult, ShotSuggestion, SuggestRequest,
};
pub use trajectory::{TrajectoryLookup, TrajectoryMatch, TrajectorySample, TrajectoryTable};
