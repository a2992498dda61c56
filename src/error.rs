use crate::MAX_BASIS_LEN;

/// Errors surfaced by engine construction and queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MsmError {
    /// The basis is longer than the engine supports.
    #[error("basis length {0} exceeds the maximum of {MAX_BASIS_LEN}")]
    TooManyPoints(usize),

    /// Window width outside the accepted set.
    #[error("unsupported window width {0}")]
    InvalidWindow(usize),

    /// A query supplied more scalars than there are basis points.
    #[error("got {got} scalars for a basis of length {basis}")]
    TooManyScalars {
        /// Number of scalars supplied.
        got: usize,
        /// Length of the fixed basis.
        basis: usize,
    },
}
