use thiserror::Error;

/// Errors returned by the clustering core, the loader, and the renderers.
#[derive(Debug, Error)]
pub enum Error {
    /// Input catalog is empty.
    #[error("empty input")]
    EmptyInput,

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Requested cluster count is zero or exceeds the number of points.
    #[error("insufficient data: requested {requested} clusters, but catalog has {available} points")]
    InsufficientData {
        /// Requested number of clusters.
        requested: usize,
        /// Number of points available.
        available: usize,
    },

    /// Points being compared or aggregated have different dimensionality.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimensionality.
        expected: usize,
        /// Found dimensionality.
        found: usize,
    },

    /// A record in the input text could not be turned into a point.
    #[error("parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number; the header is line 1.
        line: u64,
        /// What was wrong with the record.
        message: String,
    },

    /// A partition refers to an identifier the catalog does not hold.
    #[error("unknown point identifier {0}")]
    UnknownIdentifier(usize),

    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed delimited text.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
