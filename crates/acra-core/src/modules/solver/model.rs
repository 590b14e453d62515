pub const SOLVER_COLUMN_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverColumn {
    Pressure,
    HeatingRateShortwave,
    HeatingRateLongwave,
    OpticalThicknessDownward,
    /// Still carries the `1 / (2 mu0')` normalisation applied before solving.
    OpticalThicknessUpward,
}

impl SolverColumn {
    pub const fn index(self) -> usize {
        match self {
            Self::Pressure => 0,
            Self::HeatingRateShortwave => 1,
            Self::HeatingRateLongwave => 2,
            Self::OpticalThicknessDownward => 3,
            Self::OpticalThicknessUpward => 4,
        }
    }
}

/// One solver run: a row per vertical level.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SolverTable {
    rows: Vec<[f64; SOLVER_COLUMN_COUNT]>,
}

impl SolverTable {
    pub fn new(rows: Vec<[f64; SOLVER_COLUMN_COUNT]>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[[f64; SOLVER_COLUMN_COUNT]] {
        &self.rows
    }

    pub fn level_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column(&self, column: SolverColumn) -> Vec<f64> {
        self.rows.iter().map(|row| row[column.index()]).collect()
    }
}
