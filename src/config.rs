use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Deserialize;

use crate::error::AppError;
use crate::schedule::GridSize;

/// Floor monitor duty scheduler
#[derive(Debug, Parser)]
#[command(name = "floor-monitor-scheduler", version, about)]
pub struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a schedule from a names file
    Generate(GenerateArgs),

    /// Start the web server
    Web {
        #[arg(short, long, env = "SCHEDULER_PORT", default_value_t = 8080)]
        port: u16,
    },
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Names file: .txt with one name per line, or the first column of a .csv/.xlsx/.xls
    #[arg(short, long)]
    pub names: PathBuf,

    #[arg(long, default_value_t = 4)]
    pub floors: usize,

    #[arg(long, default_value_t = 5)]
    pub days: usize,

    #[arg(long, default_value_t = 1)]
    pub people_per_floor: usize,

    /// Schedule people more than once when there aren't enough names
    #[arg(long)]
    pub allow_reuse: bool,

    /// Seed for a reproducible schedule
    #[arg(long)]
    pub seed: Option<u64>,

    /// Save the schedule (.csv, .xlsx, .txt or .json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl GenerateArgs {
    pub fn request(&self) -> ScheduleRequest {
        ScheduleRequest {
            floors: self.floors,
            days: self.days,
            people_per_floor: self.people_per_floor,
            allow_reuse: self.allow_reuse,
            seed: self.seed,
        }
    }
}

/// Largest grid a single request may ask for (floors × days)
pub const MAX_SLOTS: usize = 5_000;

/// Largest number of placements (slots × people per floor) per request
pub const MAX_PLACEMENTS: usize = 50_000;

/// Largest roster accepted for one request
pub const MAX_NAMES: usize = 10_000;

/// Everything needed to generate a schedule apart from the names themselves
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScheduleRequest {
    pub floors: usize,
    pub days: usize,
    pub people_per_floor: usize,
    #[serde(default)]
    pub allow_reuse: bool,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for ScheduleRequest {
    fn default() -> Self {
        ScheduleRequest {
            floors: 4,
            days: 5,
            people_per_floor: 1,
            allow_reuse: false,
            seed: None,
        }
    }
}

impl ScheduleRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.floors < 1 || self.days < 1 || self.people_per_floor < 1 {
            return Err(AppError::InvalidInput("All numbers must be positive.".to_string()));
        }
        let grid = self.grid();
        if grid.slot_count() > MAX_SLOTS || grid.total_needed() > MAX_PLACEMENTS {
            return Err(AppError::InvalidInput(format!(
                "Schedule too large: at most {} slots and {} placements are allowed.",
                MAX_SLOTS, MAX_PLACEMENTS
            )));
        }
        Ok(())
    }

    pub fn grid(&self) -> GridSize {
        GridSize::new(self.floors, self.days, self.people_per_floor)
    }

    pub fn total_needed(&self) -> usize {
        self.grid().total_needed()
    }

    pub fn rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_form() {
        let cli =
            Cli::try_parse_from(["floor-monitor-scheduler", "generate", "--names", "names.txt"])
                .unwrap();
        match cli.command {
            Commands::Generate(args) => {
                let request = args.request();
                assert_eq!(request, ScheduleRequest::default());
                assert_eq!(request.total_needed(), 20);
                assert!(args.output.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_generate_flags() {
        let cli = Cli::try_parse_from([
            "floor-monitor-scheduler",
            "-v",
            "generate",
            "--names",
            "names.csv",
            "--floors",
            "2",
            "--days",
            "3",
            "--people-per-floor",
            "2",
            "--allow-reuse",
            "--seed",
            "42",
            "--output",
            "out.csv",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        let request = args.request();
        assert_eq!(request.grid(), GridSize::new(2, 3, 2));
        assert!(request.allow_reuse);
        assert_eq!(request.seed, Some(42));
    }

    #[test]
    fn test_validate_rejects_zero() {
        let request = ScheduleRequest { people_per_floor: 0, ..ScheduleRequest::default() };
        assert!(matches!(request.validate(), Err(AppError::InvalidInput(_))));
        assert!(ScheduleRequest::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_oversized_grid() {
        let huge = ScheduleRequest {
            floors: usize::MAX,
            days: usize::MAX,
            allow_reuse: true,
            ..ScheduleRequest::default()
        };
        assert!(matches!(huge.validate(), Err(AppError::InvalidInput(_))));

        let too_many_slots =
            ScheduleRequest { floors: 1000, days: 1000, ..ScheduleRequest::default() };
        assert!(too_many_slots.validate().is_err());

        let too_many_people = ScheduleRequest {
            floors: 10,
            days: 10,
            people_per_floor: MAX_PLACEMENTS,
            ..ScheduleRequest::default()
        };
        assert!(too_many_people.validate().is_err());

        let at_limit = ScheduleRequest { floors: 50, days: 100, ..ScheduleRequest::default() };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn test_request_from_json_defaults() {
        let request: ScheduleRequest =
            serde_json::from_str(r#"{"floors": 2, "days": 1, "people_per_floor": 1}"#).unwrap();
        assert!(!request.allow_reuse);
        assert_eq!(request.seed, None);
    }
}
