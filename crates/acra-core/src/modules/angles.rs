use crate::domain::{AcraError, AcraResult};
use serde::{Deserialize, Serialize};

/// Upper bound on generated cases; far beyond any useful angular resolution.
pub const MAX_ANGLE_COUNT: usize = 1 << 20;

/// Input document consumed by the batch runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleDocument {
    pub mu0: Vec<f64>,
}

/// Cosines of zenith angles `start, start + interval, ...` in degrees, up to
/// and including `stop` when it falls on the grid.
pub fn generate_mu0(start: f64, stop: f64, interval: f64) -> AcraResult<Vec<f64>> {
    if ![start, stop, interval].iter().all(|value| value.is_finite()) {
        return Err(AcraError::input_validation(
            "INPUT.ANGLE_RANGE",
            format!(
                "angles must be finite (start={}, stop={}, interval={})",
                start, stop, interval
            ),
        ));
    }
    if interval == 0.0 {
        return Err(AcraError::input_validation(
            "INPUT.ANGLE_INTERVAL",
            "angle interval must be nonzero",
        ));
    }

    let span = ((stop + interval - start) / interval).ceil();
    if !span.is_finite() || span > MAX_ANGLE_COUNT as f64 {
        return Err(AcraError::input_validation(
            "INPUT.ANGLE_RANGE",
            format!(
                "range {}..{} in steps of {} exceeds {} angles",
                start, stop, interval, MAX_ANGLE_COUNT
            ),
        ));
    }
    let count = if span > 0.0 { span as usize } else { 0 };
    Ok((0..count)
        .map(|step| (start + step as f64 * interval).to_radians().cos())
        .collect())
}
