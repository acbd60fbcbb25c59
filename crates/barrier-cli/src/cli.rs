use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Evaluate one-sided moving harmonic barriers on particle snapshots.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute per-particle barrier forces, energies and virials at a given step.
    Evaluate(EvaluateArgs),
    /// Show the barrier geometry, interface bounds and per-type boundary ranges.
    Describe(DescribeArgs),
}

/// Arguments for the `evaluate` subcommand.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Path to the barrier definition in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Path to the particle snapshot (CSV with a `type,x,y,z` header).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub particles: PathBuf,

    /// Simulation step at which the interface is evaluated.
    #[arg(short, long, default_value_t = 0, value_name = "STEP")]
    pub step: u64,

    /// Write the per-particle report here instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print the total energy, net force and virial of the pass.
    #[arg(long)]
    pub summary: bool,
}

/// Arguments for the `describe` subcommand.
#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Path to the barrier definition in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Steps at which to print the interface value, comma-separated.
    #[arg(long, value_name = "STEP,...", value_delimiter = ',')]
    pub steps: Vec<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn evaluate_parses_step_and_paths() {
        let cli = Cli::try_parse_from([
            "barrier",
            "-vv",
            "evaluate",
            "--config",
            "barrier.toml",
            "--particles",
            "snap.csv",
            "--step",
            "3",
            "--summary",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Evaluate(args) => {
                assert_eq!(args.config, PathBuf::from("barrier.toml"));
                assert_eq!(args.particles, PathBuf::from("snap.csv"));
                assert_eq!(args.step, 3);
                assert!(args.summary);
                assert!(args.output.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn describe_splits_step_list() {
        let cli =
            Cli::try_parse_from(["barrier", "describe", "-c", "b.toml", "--steps", "0,1,2,10"])
                .unwrap();
        match cli.command {
            Commands::Describe(args) => assert_eq!(args.steps, vec![0, 1, 2, 10]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["barrier", "-q", "-v", "describe", "-c", "b.toml"]);
        assert!(result.is_err());
    }
}
