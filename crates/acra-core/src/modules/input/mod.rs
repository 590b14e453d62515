use crate::domain::{AcraError, AcraResult, BatchInput, ForcingMode};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct InputDocument {
    mu0: Vec<f64>,
    #[serde(default)]
    optical_thickness_downward: Option<Vec<Vec<f64>>>,
    #[serde(default)]
    optical_thickness_upward: Option<Vec<Vec<f64>>>,
}

pub fn load_input_document(path: &Path) -> AcraResult<BatchInput> {
    let source = fs::read_to_string(path).map_err(|source| {
        AcraError::config_io(
            "IO.INPUT_READ",
            format!("{}: {}", path.display(), source),
        )
    })?;
    parse_input_document(&source).map_err(|error| {
        AcraError::new(
            error.category(),
            error.placeholder(),
            format!("{}: {}", path.display(), error.message()),
        )
    })
}

pub fn parse_input_document(source: &str) -> AcraResult<BatchInput> {
    let document: InputDocument = serde_json::from_str(source).map_err(|source| {
        AcraError::input_validation(
            "INPUT.DOCUMENT_SYNTAX",
            format!("invalid input document: {}", source),
        )
    })?;

    validate_mu0(&document.mu0)?;
    let forcing = forcing_mode(
        document.mu0.len(),
        document.optical_thickness_downward,
        document.optical_thickness_upward,
    )?;
    Ok(BatchInput::new(document.mu0, forcing))
}

fn validate_mu0(mu0: &[f64]) -> AcraResult<()> {
    if let Some((case, value)) = mu0
        .iter()
        .enumerate()
        .find(|(_, value)| !(value.is_finite() && **value > 0.0 && **value <= 1.0))
    {
        return Err(AcraError::input_validation(
            "INPUT.MU0_RANGE",
            format!(
                "mu0[{}] = {} is outside (0, 1]; only daytime sun angles are supported",
                case, value
            ),
        ));
    }
    Ok(())
}

fn forcing_mode(
    case_count: usize,
    downward: Option<Vec<Vec<f64>>>,
    upward: Option<Vec<Vec<f64>>>,
) -> AcraResult<ForcingMode> {
    match (downward, upward) {
        (None, None) => Ok(ForcingMode::Disabled),
        (Some(downward), Some(upward)) => {
            for (name, profiles) in [
                ("optical_thickness_downward", &downward),
                ("optical_thickness_upward", &upward),
            ] {
                if profiles.len() != case_count {
                    return Err(AcraError::input_validation(
                        "INPUT.FORCING_SHAPE",
                        format!(
                            "'{}' has {} cases but 'mu0' has {}",
                            name,
                            profiles.len(),
                            case_count
                        ),
                    ));
                }
            }
            Ok(ForcingMode::Enabled { downward, upward })
        }
        (Some(_), None) | (None, Some(_)) => Err(AcraError::input_validation(
            "INPUT.FORCING_PAIR",
            "'optical_thickness_downward' and 'optical_thickness_upward' must be given together",
        )),
    }
}
