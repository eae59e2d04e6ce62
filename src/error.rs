//! Error types.
//!
//! The decoder and binner return [`DistError`], a closed taxonomy the caller can
//! match on. The binary wraps everything in [`AppError`], which only carries a
//! message and the process exit code.

use thiserror::Error;

/// Why a payload was rejected before any value was decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatReason {
    /// Buffer shorter than the header or than the declared record count needs.
    Truncated { expected: usize, actual: usize },
    /// Bytes left over after the declared records.
    TrailingBytes { expected: usize, actual: usize },
}

impl std::fmt::Display for FormatReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatReason::Truncated { expected, actual } => {
                write!(f, "truncated payload (expected {expected} bytes, got {actual})")
            }
            FormatReason::TrailingBytes { expected, actual } => {
                write!(f, "payload length mismatch (expected {expected} bytes, got {actual})")
            }
        }
    }
}

/// Why a structurally valid payload still violates the numeric invariants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidationReason {
    EmptyDistribution,
    NegativeMass { index: usize, mass: f64 },
    NonFinite { index: usize },
    NonFiniteParticle,
    MassInvariant { total: f64 },
}

impl std::fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationReason::EmptyDistribution => write!(f, "empty distribution"),
            ValidationReason::NegativeMass { index, mass } => {
                write!(f, "negative probability {mass} in record {index}")
            }
            ValidationReason::NonFinite { index } => {
                write!(f, "non-numeric position or probability in record {index}")
            }
            ValidationReason::NonFiniteParticle => write!(f, "particle value is NaN"),
            ValidationReason::MassInvariant { total } => {
                write!(f, "mass invariant violated (total mass {total})")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistError {
    #[error("format error: {0}")]
    Format(FormatReason),

    #[error("validation error: {0}")]
    Validation(ValidationReason),

    #[error("degenerate input: no finite probability mass to bin")]
    DegenerateInput,

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl DistError {
    pub fn configuration(message: impl Into<String>) -> Self {
        DistError::Configuration(message.into())
    }

    /// Process exit code used when this error ends a `dhist` run.
    pub fn exit_code(&self) -> u8 {
        match self {
            DistError::Configuration(_) => 2,
            DistError::Format(_) | DistError::Validation(_) => 3,
            DistError::DegenerateInput => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, DistError>;

/// Error surfaced by the `dhist` binary.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<DistError> for AppError {
    fn from(err: DistError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
