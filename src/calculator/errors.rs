use crate::symbolic::parse_expr::ParseExprError;
use crate::symbolic::symbolic_lambdify::LambdifyError;
use thiserror::Error;

/// Every failure a calculator operation can report to the user.
#[derive(Debug, Error)]
pub enum CalcError {
    #[error("{0}")]
    MissingInput(String),
    #[error("Invalid assignment format: '{0}'. Must contain '='.")]
    InvalidAssignment(String),
    #[error("Invalid variable name: '{0}'. Name must be one or more letters.")]
    InvalidVariableName(String),
    #[error("Value for variable '{name}' is not a valid number: '{value}'")]
    InvalidNumber { name: String, value: String },
    #[error("Parsing Error: {0}")]
    ParseError(#[from] ParseExprError),
    #[error("{0}")]
    NoSolution(String),
    #[error("{0}")]
    EvaluationError(String),
    #[error("rendering failed: {0}")]
    Render(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<LambdifyError> for CalcError {
    fn from(err: LambdifyError) -> Self {
        CalcError::EvaluationError(err.to_string())
    }
}

impl CalcError {
    /// Input problems the user should fix before retrying; reported as warnings, not errors.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, CalcError::MissingInput(_))
    }
}
