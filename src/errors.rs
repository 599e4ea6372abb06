use thiserror::Error;
use uuid::Uuid;

pub type TemplateResult<T> = Result<T, TemplateError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    #[error("template {0} not found")]
    NotFound(Uuid),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("invalid template: {}", .0.join("; "))]
    Invalid(Vec<String>),

    #[error("api error: {0}")]
    Api(String),

    #[error("api returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("circuit breaker is open for {0}")]
    CircuitOpen(String),
}

impl TemplateError {
    pub fn is_transient(&self) -> bool {
        matches!(self, TemplateError::Transport(_))
    }
}
