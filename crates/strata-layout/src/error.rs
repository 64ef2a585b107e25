#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("layout invariant violated: {message}")]
    InvariantViolation { message: String },
}

impl LayoutError {
    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LayoutError>;
