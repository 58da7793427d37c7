use thiserror::Error;

/// Status code reported for a successful call through the flat-buffer API.
pub const STATUS_SUCCESS: i32 = 0;
/// Status code for caller-contract violations.
pub const STATUS_INVALID_ARGUMENT: i32 = 1;
/// Status code for execution-runtime failures.
pub const STATUS_RUNTIME: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    Runtime,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{what}: size mismatch: expected {expected} elements, got {actual}")]
    SizeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("{what}: shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("{what} must be non-negative, got {value}")]
    NegativeDimension { what: &'static str, value: i64 },
    #[error("{what} must be non-zero")]
    EmptyDimension { what: &'static str },
    #[error("shape element count overflows usize")]
    ShapeOverflow,
    #[error("failed to build execution stream: {0}")]
    Stream(#[from] rayon::ThreadPoolBuildError),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Stream(_) => ErrorKind::Runtime,
            _ => ErrorKind::InvalidArgument,
        }
    }

    /// Integer status for callers of the flat-buffer API. Never zero.
    pub fn status_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::InvalidArgument => STATUS_INVALID_ARGUMENT,
            ErrorKind::Runtime => STATUS_RUNTIME,
        }
    }
}

pub fn check_dim(what: &'static str, expected: usize, actual: usize) -> Result<(), Error> {
    if expected != actual {
        return Err(Error::ShapeMismatch {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}
