mod model;
mod parser;

pub use model::{SOLVER_COLUMN_COUNT, SolverColumn, SolverTable};
pub use parser::parse_solver_output;

use crate::common::constants::DEFAULT_SOLVER_PROGRAM;
use crate::domain::{AcraError, AcraResult};
use crate::modules::traits::SolverExecutor;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::NamedTempFile;
use tracing::debug;

/// Runs the solver executable as a child process, one namelist file per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSolver {
    program: PathBuf,
}

impl ProcessSolver {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, namelist_path: &Path) -> AcraResult<String> {
        debug!(
            program = %self.program.display(),
            namelist = %namelist_path.display(),
            "invoking solver"
        );
        let output = Command::new(&self.program)
            .arg(namelist_path)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| {
                AcraError::solver_failure(
                    "RUN.SOLVER_SPAWN",
                    format!("failed to execute '{}': {}", self.program.display(), source),
                )
            })?;

        if !output.status.success() {
            let status_text = output.status.code().map_or_else(
                || "was terminated by signal".to_string(),
                |code| format!("failed with code {}", code),
            );
            return Err(AcraError::solver_failure(
                "RUN.SOLVER_FAILURE",
                format!("{} {}", self.program.display(), status_text),
            ));
        }

        String::from_utf8(output.stdout).map_err(|source| {
            AcraError::parse(
                "PARSE.SOLVER_ENCODING",
                format!("solver output is not valid UTF-8: {}", source),
            )
        })
    }
}

impl Default for ProcessSolver {
    fn default() -> Self {
        Self::new(DEFAULT_SOLVER_PROGRAM)
    }
}

impl SolverExecutor for ProcessSolver {
    fn execute(&self, namelist: &str) -> AcraResult<SolverTable> {
        // Removed on drop, whichever way this call returns.
        let namelist_file = write_namelist(namelist)?;
        let output = self.run(namelist_file.path())?;
        parse_solver_output(&output)
    }
}

fn write_namelist(namelist: &str) -> AcraResult<NamedTempFile> {
    let io_error = |source: std::io::Error| {
        AcraError::config_io(
            "IO.NAMELIST_WRITE",
            format!("failed to write transient namelist: {}", source),
        )
    };

    let mut file = tempfile::Builder::new()
        .prefix("acra2-")
        .suffix(".nml")
        .tempfile()
        .map_err(io_error)?;
    file.write_all(namelist.as_bytes()).map_err(io_error)?;
    file.flush().map_err(io_error)?;
    Ok(file)
}
