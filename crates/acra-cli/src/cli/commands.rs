use super::CliError;
use super::helpers::write_stdout_document;
use acra_core::common::constants::DEFAULT_SOLVER_PROGRAM;
use acra_core::modules::angles::{AngleDocument, generate_mu0};
use acra_core::modules::batch::{BatchOptions, BatchRunnerConfig, run_batch_from_config};
use acra_core::modules::serialization::ResultDocument;
use std::path::PathBuf;
use tracing::debug;

#[derive(clap::Args)]
pub(super) struct RunArgs {
    /// Namelist template rendered once per case
    #[arg(value_name = "NAMELIST")]
    namelist: PathBuf,

    /// Input document holding mu0 and optional optical thickness profiles
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Solver executable, invoked with the rendered namelist path
    #[arg(long, default_value = DEFAULT_SOLVER_PROGRAM)]
    solver: PathBuf,

    /// Vertical level count the optical thickness profiles must match
    #[arg(long, value_name = "N")]
    levels: Option<usize>,
}

#[derive(clap::Args)]
pub(super) struct GenArgs {
    /// First zenith angle in degrees
    #[arg(allow_negative_numbers = true)]
    start: f64,

    /// Last zenith angle in degrees
    #[arg(allow_negative_numbers = true)]
    stop: f64,

    /// Step between zenith angles in degrees
    #[arg(allow_negative_numbers = true)]
    interval: f64,
}

impl RunArgs {
    fn into_config(self) -> BatchRunnerConfig {
        BatchRunnerConfig {
            namelist_path: self.namelist,
            input_path: self.input,
            solver_program: self.solver,
            options: BatchOptions {
                expected_levels: self.levels,
            },
        }
    }
}

pub(super) fn run_batch_command(args: RunArgs) -> Result<i32, CliError> {
    let config = args.into_config();
    debug!(
        namelist = %config.namelist_path.display(),
        input = %config.input_path.display(),
        solver = %config.solver_program.display(),
        levels = ?config.options.expected_levels,
        "resolved batch configuration"
    );
    let result = run_batch_from_config(&config).map_err(CliError::Compute)?;
    write_stdout_document(&ResultDocument::from_batch(&result))?;
    Ok(0)
}

pub(super) fn run_gen_command(args: GenArgs) -> Result<i32, CliError> {
    let mu0 = generate_mu0(args.start, args.stop, args.interval).map_err(CliError::Compute)?;
    write_stdout_document(&AngleDocument { mu0 })?;
    Ok(0)
}
