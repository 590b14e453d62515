//! Physical constants and fixed conventions of the ACRANEB2 shortwave scheme.
//!
//! Reference: Masek J. 2013, single interval shortwave radiation scheme with
//! parametrized optical saturation and spectral overlaps.

/// Ratio of Earth radius to atmospheric scale height, `a/H`.
pub const A_H: f64 = 1.0 / 0.001_324_f64;

/// Solver executable used when the command line does not name one.
pub const DEFAULT_SOLVER_PROGRAM: &str = "./acra2";

/// Lines of solver output starting with this character are ignored.
pub const SOLVER_COMMENT_MARKER: char = '#';
