use std::fmt::{Display, Formatter};

pub type AcraResult<T> = Result<T, AcraError>;
pub type ParserResult<T> = AcraResult<T>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AcraErrorCategory {
    Success,
    InputValidationError,
    ConfigIoError,
    TemplateRenderError,
    SolverFailure,
    ParseError,
    InternalError,
}

impl AcraErrorCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::InputValidationError => "InputValidationError",
            Self::ConfigIoError => "ConfigIoError",
            Self::TemplateRenderError => "TemplateRenderError",
            Self::SolverFailure => "SolverFailure",
            Self::ParseError => "ParseError",
            Self::InternalError => "InternalError",
        }
    }

    /// Every failure aborts the batch with the same process status.
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            _ => 1,
        }
    }

    pub const fn is_fatal(self) -> bool {
        !matches!(self, Self::Success)
    }
}

impl Display for AcraErrorCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{category} [{placeholder}] {message}")]
pub struct AcraError {
    category: AcraErrorCategory,
    placeholder: &'static str,
    message: String,
}

impl AcraError {
    pub fn new(
        category: AcraErrorCategory,
        placeholder: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            placeholder,
            message: message.into(),
        }
    }

    pub fn input_validation(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(
            AcraErrorCategory::InputValidationError,
            placeholder,
            message,
        )
    }

    pub fn config_io(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(AcraErrorCategory::ConfigIoError, placeholder, message)
    }

    pub fn template_render(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(AcraErrorCategory::TemplateRenderError, placeholder, message)
    }

    pub fn solver_failure(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(AcraErrorCategory::SolverFailure, placeholder, message)
    }

    pub fn parse(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(AcraErrorCategory::ParseError, placeholder, message)
    }

    pub fn internal(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(AcraErrorCategory::InternalError, placeholder, message)
    }

    pub const fn category(&self) -> AcraErrorCategory {
        self.category
    }

    pub const fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    /// Prefixes the message with the batch case it originated from.
    pub fn for_case(self, case: usize) -> Self {
        Self {
            message: format!("case {}: {}", case, self.message),
            ..self
        }
    }

    pub fn diagnostic_line(&self) -> String {
        let severity = if self.category.is_fatal() {
            "ERROR"
        } else {
            "INFO"
        };
        format!("{}: [{}] {}", severity, self.placeholder, self.message)
    }

    pub fn fatal_exit_line(&self) -> Option<String> {
        self.category
            .is_fatal()
            .then(|| format!("FATAL EXIT CODE: {}", self.exit_code()))
    }
}
