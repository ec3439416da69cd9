mod report;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use gsp_calc::clubs::CLUBS;
use gsp_calc::dataset::{find_dataset, load_csv, write_csv, DATA_PATH_ENV};
use gsp_calc::penalty::MATERIALS;
use gsp_calc::synthetic::SyntheticGrid;
use gsp_calc::{
    AnalyzeRequest, EngineConfig, ShotCalculator, ShotRequest, SuggestRequest, TrajectoryTable,
};

#[derive(Parser, Debug)]
#[command(name = "gsp-calc")]
#[command(about = "Golf shot carry calculator and club suggestion engine", long_about = None)]
struct Args {
    /// Trajectory dataset CSV (default: $GSP_TRAJECTORY_DATA, then data/trajectories.csv)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Use a generated synthetic dataset instead of a CSV file
    #[arg(long, global = true)]
    synthetic: bool,

    /// Seed for the synthetic dataset
    #[arg(long, default_value = "42", global = true)]
    seed: u64,

    /// Engine config file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct LieArgs {
    /// Ground material (see `materials`)
    #[arg(short, long, default_value = "fairway")]
    material: String,

    /// Up/down lie in degrees, positive is uphill
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    up_down_lie: f64,

    /// Right/left lie in degrees, positive pushes the ball right
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    right_left_lie: f64,

    /// Target elevation relative to the ball in meters
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    elevation: f64,

    /// Altitude above sea level in feet
    #[arg(long, default_value_t = 0.0)]
    altitude: f64,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Carry for measured launch numbers
    Carry {
        /// Ball speed (mph)
        #[arg(long)]
        speed: f64,
        /// Back spin (rpm)
        #[arg(long)]
        spin: f64,
        /// Vertical launch angle (degrees)
        #[arg(long)]
        vla: f64,
        #[command(flatten)]
        lie: LieArgs,
    },
    /// Club and launch for a target carry
    Suggest {
        /// Target carry (meters)
        target: f64,
        #[command(flatten)]
        lie: LieArgs,
    },
    /// Carry across a club's speed range
    Analyze {
        /// Club name, e.g. "7 Iron"
        club: String,
        /// Number of power levels from minimum to maximum speed
        #[arg(short, long, default_value_t = 10)]
        increments: usize,
        #[command(flatten)]
        lie: LieArgs,
    },
    /// Raw dataset match for launch numbers
    Lookup {
        #[arg(long)]
        speed: f64,
        #[arg(long)]
        spin: f64,
        #[arg(long)]
        vla: f64,
    },
    /// List the club catalog
    Clubs,
    /// List the known ground materials
    Materials,
    /// Write a synthetic dataset CSV
    Generate {
        /// Output file
        #[arg(short, long, default_value = "data/trajectories.csv")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EngineConfig::from_toml_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    match &args.command {
        Command::Clubs => {
            if args.json {
                return report::print_json(&CLUBS);
            }
            report::print_clubs(&CLUBS);
        }
        Command::Materials => {
            if args.json {
                return report::print_json(&MATERIALS);
            }
            report::print_materials(MATERIALS);
        }
        Command::Generate { out } => generate(out, args.seed)?,
        Command::Carry {
            speed,
            spin,
            vla,
            lie,
        } => {
            let calc = ShotCalculator::with_config(open_store(&args)?, config);
            let request = ShotRequest::new(lie.material.clone(), *speed, *spin, *vla)
                .with_lie(lie.up_down_lie, lie.right_left_lie)
                .with_conditions(lie.elevation, lie.altitude);
            let carry = calc
                .calculate_carry(&request)
                .context("Carry calculation failed")?;
            if args.json {
                return report::print_json(&carry);
            }
            report::print_carry(&carry);
        }
        Command::Suggest { target, lie } => {
            let calc = ShotCalculator::with_config(open_store(&args)?, config);
            let request = SuggestRequest::new(*target, lie.material.clone())
                .with_lie(lie.up_down_lie, lie.right_left_lie)
                .with_conditions(lie.elevation, lie.altitude);
            let suggestion = calc
                .suggest(&request)
                .with_context(|| format!("No shot suggestion for {:.1} m", target))?;
            if args.json {
                return report::print_json(&suggestion);
            }
            report::print_suggestion(*target, &suggestion);
        }
        Command::Analyze {
            club,
            increments,
            lie,
        } => {
            let calc = ShotCalculator::with_config(open_store(&args)?, config);
            let request = AnalyzeRequest {
                club: club.clone(),
                material: lie.material.clone(),
                up_down_lie: lie.up_down_lie,
                right_left_lie: lie.right_left_lie,
                elevation: lie.elevation,
                altitude: lie.altitude,
                increments: *increments,
            };
            let analysis = calc
                .analyze(&request)
                .with_context(|| format!("Analysis of {} failed", club))?;
            if args.json {
                return report::print_json(&analysis);
            }
            report::print_analysis(&analysis);
        }
        Command::Lookup { speed, spin, vla } => {
            let calc = ShotCalculator::with_config(open_store(&args)?, config);
            let found = calc.lookup(*speed, *spin, *vla).context("Lookup failed")?;
            if args.json {
                return report::print_json(&found);
            }
            report::print_lookup(&found);
        }
    }

    Ok(())
}

fn open_store(args: &Args) -> Result<TrajectoryTable> {
    if args.synthetic {
        let samples = SyntheticGrid::default().with_seed(args.seed).generate();
        return Ok(TrajectoryTable::from_samples(samples));
    }

    let path = find_dataset(args.data.as_deref()).with_context(|| {
        format!(
            "No trajectory dataset found; pass --data, set {}, or use --synthetic",
            DATA_PATH_ENV
        )
    })?;
    load_csv(&path).with_context(|| format!("Failed to load trajectory dataset {}", path.display()))
}

fn generate(out: &Path, seed: u64) -> Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let samples = SyntheticGrid::default().with_seed(seed).generate();
    write_csv(out, &samples)?;
    println!("Wrote {} samples to {}", samples.len(), out.display());
    Ok(())
}
