use thiserror::Error;

/// The broad class of an [`Error`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A parameter or input is out of range for the requested operation.
    InvalidArgument,
    /// A search was attempted before any successful training call.
    NotTrained,
}

/// Errors returned by [`DrusillaSelect`](crate::DrusillaSelect).
///
/// Every error is raised by a precondition check before any state is mutated
/// or any distance is computed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid value of {name}; must be greater than 0")]
    ZeroParameter { name: &'static str },

    #[error(
        "l * m = {requested} exceeds the {available} points in the reference set; \
         choose smaller values"
    )]
    TooManyCandidates { requested: usize, available: usize },

    #[error(
        "requested k = {k} is greater than the {candidates} points in the candidate set; \
         increase l or m"
    )]
    TooManyNeighbors { k: usize, candidates: usize },

    #[error("expected points of dimension {expected}, got {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("reference set contains a non-finite value in column {column}")]
    NonFinite { column: usize },

    #[error("candidate set not initialized; call train() first")]
    NotTrained,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotTrained => ErrorKind::NotTrained,
            _ => ErrorKind::InvalidArgument,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
