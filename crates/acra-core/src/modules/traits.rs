use crate::domain::AcraResult;
use crate::modules::solver::SolverTable;

/// Runs the radiative-transfer solver once for a rendered namelist.
pub trait SolverExecutor {
    fn execute(&self, namelist: &str) -> AcraResult<SolverTable>;
}

impl<T> SolverExecutor for &T
where
    T: SolverExecutor + ?Sized,
{
    fn execute(&self, namelist: &str) -> AcraResult<SolverTable> {
        (**self).execute(namelist)
    }
}
