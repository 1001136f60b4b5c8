//! CLI module for herdcycle
//!
//! Provides the command-line interface using clap.

pub mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::schemas::{AnimalId, Biometrics, Breed};

/// Herdcycle - Track the reproductive cycle of a dairy herd
#[derive(Parser, Debug)]
#[command(name = "herdcycle")]
#[command(version)]
#[command(about = "Track estrus predictions, inseminations and pregnancies of a dairy herd")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress info-level output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Preview operations without executing them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Override the working directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Acting user recorded in the logs
    #[arg(long, global = true, env = "HERDCYCLE_USER")]
    pub user: Option<String>,
}

/// Biometric inputs for a prediction
#[derive(Args, Debug, Clone)]
pub struct BiometricsArgs {
    /// Animal name
    #[arg(long)]
    pub name: String,

    /// Physical activity (steps/day)
    #[arg(long)]
    pub activity: u32,

    /// Body temperature in °C
    #[arg(long)]
    pub temperature: f64,

    /// Days since the last calving
    #[arg(long)]
    pub days_postpartum: u32,

    /// Body condition score (1-5)
    #[arg(long)]
    pub body_condition: f64,

    /// Breed code (SIB, MAM, TAI, CRI, CEB, CRU, CHA, HOL)
    #[arg(long)]
    pub breed: Breed,

    /// The previous calving was assisted
    #[arg(long)]
    pub assisted_birth: bool,
}

impl From<BiometricsArgs> for Biometrics {
    fn from(args: BiometricsArgs) -> Self {
        Biometrics {
            name: args.name,
            activity: args.activity,
            temperature: args.temperature,
            days_postpartum: args.days_postpartum,
            body_condition: args.body_condition,
            breed: args.breed,
            assisted_birth: args.assisted_birth,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a herd in the current directory
    Init {
        /// Overwrite config.json even if .herdcycle already exists
        #[arg(long)]
        force: bool,
    },

    /// Score a new animal and add it to the herd
    Predict {
        #[command(flatten)]
        biometrics: BiometricsArgs,
    },

    /// Rescore an animal that has not been inseminated
    Reevaluate {
        /// Animal ID
        id: AnimalId,

        #[command(flatten)]
        biometrics: BiometricsArgs,
    },

    /// List animals in a view
    List {
        /// View (all, estrus, inseminated, pregnant)
        #[arg(long, default_value = "all")]
        view: String,

        /// Case-insensitive name filter
        #[arg(long)]
        name: Option<String>,

        /// Sort key (name, scored_at, score, activity, temperature, ...)
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending
        #[arg(long)]
        desc: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show details of a specific animal
    Show {
        /// Animal ID
        id: AnimalId,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record an insemination
    Inseminate {
        /// Animal ID
        id: AnimalId,
    },

    /// Confirm a pregnancy
    Pregnant {
        /// Animal ID
        id: AnimalId,
    },

    /// Failed pregnancy check: back to inseminated
    Revert {
        /// Animal ID
        id: AnimalId,
    },

    /// Remove an animal from the herd
    Delete {
        /// Animal ID
        id: AnimalId,
    },

    /// Show herd counts and mean score
    Summary {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export reports (all reports when none is named)
    Export {
        /// Report keys (usuarios, vacas_general, vacas_celo, vacas_gestantes, vacas_inseminadas)
        reports: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_predict() {
        let cli = Cli::try_parse_from([
            "herdcycle",
            "predict",
            "--name",
            "Estrella",
            "--activity",
            "610",
            "--temperature",
            "38.2",
            "--days-postpartum",
            "48",
            "--body-condition",
            "2.75",
            "--breed",
            "hol",
            "--assisted-birth",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Predict { biometrics }) => {
                let biometrics = Biometrics::from(biometrics);
                assert_eq!(biometrics.breed, Breed::Holstein);
                assert!(biometrics.assisted_birth);
                assert_eq!(biometrics.temperature, 38.2);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_list_defaults() {
        let cli = Cli::try_parse_from(["herdcycle", "--quiet", "list", "--desc"]).unwrap();
        assert!(cli.quiet);
        match cli.command {
            Some(Commands::List { view, desc, json, .. }) => {
                assert_eq!(view, "all");
                assert!(desc);
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_bad_id() {
        assert!(Cli::try_parse_from(["herdcycle", "inseminate", "cow-7"]).is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_breed() {
        let result = Cli::try_parse_from([
            "herdcycle",
            "predict",
            "--name",
            "X",
            "--activity",
            "1",
            "--temperature",
            "38",
            "--days-postpartum",
            "1",
            "--body-condition",
            "3",
            "--breed",
            "JER",
        ]);
        assert!(result.is_err());
    }
}
