//! Error types for QUBO construction and the temporal tracker

/// Malformed caller input. Raised before any state is touched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{name} matrix is empty")]
    Empty { name: &'static str },

    #[error("{name} matrix must be square, got {rows}x{cols}")]
    NotSquare {
        name: &'static str,
        rows: usize,
        cols: usize,
    },

    #[error("{name} matrix has ragged rows: row {row} has {len} entries, expected {expected}")]
    RaggedRows {
        name: &'static str,
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("flow ({flow}x{flow}) and distance ({dist}x{dist}) matrices must have the same dimensions")]
    ShapeMismatch { flow: usize, dist: usize },

    #[error("{name}[{row}, {col}] is not finite")]
    NonFinite {
        name: &'static str,
        row: usize,
        col: usize,
    },

    #[error("{name}[{row}, {col}] = {value} is negative")]
    Negative {
        name: &'static str,
        row: usize,
        col: usize,
        value: f64,
    },

    #[error("group cut {cut} must satisfy 0 < cut < {size}")]
    GroupCutOutOfRange { cut: usize, size: usize },

    #[error("penalty {0} must be finite and positive")]
    InvalidPenalty(f64),

    #[error("penalty overflowed: cost sum or relocation surcharge is not finite")]
    PenaltyOverflow,

    #[error("shot count must be positive")]
    InvalidShots,

    #[error("facility {facility} mapped to location {location}, outside 0..{size}")]
    LocationOutOfRange {
        facility: usize,
        location: usize,
        size: usize,
    },

    #[error("sample has {actual} bits, expected {expected}")]
    SampleLength { expected: usize, actual: usize },
}

/// Operation invoked in the wrong lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("tracker is already initialized, use evolve() instead")]
    AlreadyInitialized,

    #[error("tracker is not initialized, call initialize() first")]
    NotInitialized,
}

#[derive(Debug, thiserror::Error)]
pub enum QapError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    State(#[from] StateError),

    /// Failure reported by the sampler, passed through untouched.
    #[error(transparent)]
    Sampler(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, QapError>;
