pub mod angles;
pub mod batch;
pub mod input;
pub mod serialization;
pub mod solver;
pub mod template;

mod traits;

pub use traits::SolverExecutor;
