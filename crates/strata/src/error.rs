use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Which kind of graph element an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Vertex,
    Edge,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Vertex => f.write_str("vertex"),
            ElementKind::Edge => f.write_str("edge"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A handle that does not belong to this graph, or points past its elements.
    #[error("invalid {kind} reference (index {index})")]
    InvalidReference { kind: ElementKind, index: usize },

    #[error("duplicate {kind} id {id:?}")]
    DuplicateId { kind: ElementKind, id: String },

    #[error("type mismatch: expected {expected} graph, found {found} graph")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("DOT parse error at {line}:{column}: {message}")]
    DotParse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error(transparent)]
    LayoutInvariantViolation(#[from] strata_layout::LayoutError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
