pub mod errors;

pub use errors::{AcraError, AcraErrorCategory, AcraResult, ParserResult};

use std::fmt::{Display, Formatter};

/// Validated pipeline input: one solver case per `mu0` entry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchInput {
    pub mu0: Vec<f64>,
    pub forcing: ForcingMode,
}

impl BatchInput {
    pub fn new(mu0: Vec<f64>, forcing: ForcingMode) -> Self {
        Self { mu0, forcing }
    }

    pub fn case_count(&self) -> usize {
        self.mu0.len()
    }
}

/// Whether externally supplied optical-thickness profiles override the
/// solver's own. Both profiles are indexed by case.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ForcingMode {
    #[default]
    Disabled,
    Enabled {
        downward: Vec<Vec<f64>>,
        upward: Vec<Vec<f64>>,
    },
}

impl ForcingMode {
    pub fn case(&self, case: usize) -> Option<CaseForcing<'_>> {
        match self {
            Self::Disabled => None,
            Self::Enabled { downward, upward } => Some(CaseForcing {
                downward: downward.get(case)?,
                upward: upward.get(case)?,
            }),
        }
    }
}

impl Display for ForcingMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disabled => f.write_str("disabled"),
            Self::Enabled { .. } => f.write_str("enabled"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaseForcing<'a> {
    pub downward: &'a [f64],
    pub upward: &'a [f64],
}
