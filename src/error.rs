//! Error types for the levwave crate.

/// Engine-specific error types.
///
/// All variants are precondition violations surfaced to the caller; the
/// engine makes no state change when returning one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Sequence lengths are zero or not multiples of the tile size.
    ///
    /// Hosts pad to a multiple of the tile size (see
    /// [`padded_length`](crate::utils::padded_length)) or fall back to a
    /// plain row DP for unaligned inputs.
    #[error("sequence lengths {len1} and {len2} must be positive multiples of the tile size {tile}")]
    BadShape {
        len1: usize,
        len2: usize,
        tile: usize,
    },

    /// `compute` received sequences whose lengths do not match the pair
    /// declared to `init` (in either order).
    #[error("sequence lengths {got1} and {got2} do not match the initialized pair ({expected_shorter}, {expected_longer})")]
    LengthMismatch {
        got1: usize,
        got2: usize,
        expected_shorter: usize,
        expected_longer: usize,
    },

    /// `compute` called before `init`.
    #[error("compute called before init")]
    NotInitialized,
}

/// Convenience result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
