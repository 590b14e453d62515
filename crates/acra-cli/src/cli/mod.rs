mod commands;
mod helpers;

use acra_core::domain::AcraError;
use clap::Parser;

pub fn run_from_env() -> i32 {
    helpers::init_tracing();
    let args = std::env::args().collect::<Vec<_>>();

    match parse_and_dispatch(args) {
        Ok(code) => code,
        Err(error) => {
            let diagnostic = error.as_acra_error();
            eprintln!("{}", diagnostic.diagnostic_line());
            if let Some(summary_line) = diagnostic.fatal_exit_line() {
                eprintln!("{}", summary_line);
            }
            diagnostic.exit_code()
        }
    }
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => dispatch_parsed(cli.command),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "acra2-batch",
    version,
    about = "Batch driver for the ACRANEB2 single-column shortwave solver"
)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Run the solver for every mu0 case and print the result document
    Run(commands::RunArgs),
    /// Print an input document of mu0 values for a zenith-angle range
    Gen(commands::GenArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Run(args) => commands::run_batch_command(args),
        CliCommand::Gen(args) => commands::run_gen_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(AcraError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_acra_error(&self) -> AcraError {
        match self {
            Self::Usage(message) => {
                AcraError::input_validation("INPUT.CLI_USAGE", message.trim_end().to_string())
            }
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => AcraError::internal("SYS.CLI", format!("{error:#}")),
        }
    }
}
