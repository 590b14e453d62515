use crate::domain::{AcraError, AcraResult};
use std::collections::BTreeMap;

/// A substitution value in the solver's namelist grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateValue {
    /// Renders as a namelist null value, which the solver reads as "not provided".
    Absent,
    Bool(bool),
    Integer(i64),
    Real(f64),
    RealArray(Vec<f64>),
    /// Already formatted namelist text, emitted verbatim.
    Text(String),
}

impl TemplateValue {
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Absent => false,
            Self::Bool(value) => *value,
            Self::Integer(value) => *value != 0,
            Self::Real(value) => *value != 0.0,
            Self::RealArray(values) => !values.is_empty(),
            Self::Text(text) => !text.is_empty(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Absent => "absent value",
            Self::Bool(_) => "logical",
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
            Self::RealArray(_) => "real array",
            Self::Text(_) => "text",
        }
    }

    pub fn render(&self, name: &str) -> AcraResult<String> {
        match self {
            Self::Absent => Ok(String::new()),
            Self::Bool(true) => Ok(".TRUE.".to_string()),
            Self::Bool(false) => Ok(".FALSE.".to_string()),
            Self::Integer(value) => Ok(value.to_string()),
            Self::Real(value) => format_real(*value).ok_or_else(|| non_finite(name, *value)),
            Self::RealArray(values) => format_reals(name, values).map(|rendered| rendered.join(", ")),
            Self::Text(text) => Ok(text.clone()),
        }
    }
}

pub(super) fn format_reals(name: &str, values: &[f64]) -> AcraResult<Vec<String>> {
    values
        .iter()
        .map(|value| format_real(*value).ok_or_else(|| non_finite(name, *value)))
        .collect()
}

/// Shortest decimal that reads back to the same `f64`.
pub fn format_real(value: f64) -> Option<String> {
    value.is_finite().then(|| format!("{:?}", value))
}

fn non_finite(name: &str, value: f64) -> AcraError {
    AcraError::template_render(
        "TEMPLATE.NON_FINITE",
        format!("'{}' contains non-finite value {}", name, value),
    )
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TemplateContext {
    values: BTreeMap<String, TemplateValue>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: TemplateValue) -> &mut Self {
        self.values.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&TemplateValue> {
        self.values.get(name)
    }
}
