use std::{
    error,
    fmt::{self, Display},
    io,
};

/// The result type used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can abort a model, training or intake operation.
///
/// Numeric divergence is deliberately absent: a NaN loss is reported through
/// `Score::is_diverged()` instead of an error.
#[derive(Debug)]
pub enum Error {
    /// A size sequence with fewer than two layers, or a layer of size zero.
    InvalidLayerSizes { got: Vec<usize> },
    ShapeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    UnknownOptimizer(String),
    InvalidConfig(String),
    EmptyDataset,
    EmptyBatch,
    InvalidIdx(String),
    Io(io::Error),
    Json(serde_json::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidLayerSizes { got } => write!(
                f,
                "a model needs at least two non-zero layer sizes, got {got:?}"
            ),
            Error::ShapeMismatch {
                what,
                got,
                expected,
            } => write!(f, "shape mismatch in {what}: got {got}, expected {expected}"),
            Error::UnknownOptimizer(tag) => write!(
                f,
                "unknown optimizer '{tag}', expected one of: sgd, minibatch-sgd, nesterov"
            ),
            Error::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Error::EmptyDataset => write!(f, "the dataset contains no samples"),
            Error::EmptyBatch => write!(f, "cannot average the gradient of an empty batch"),
            Error::InvalidIdx(msg) => write!(f, "invalid IDX data: {msg}"),
            Error::Io(e) => write!(f, "io error: {e}"),
            Error::Json(e) => write!(f, "json error: {e}"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}
