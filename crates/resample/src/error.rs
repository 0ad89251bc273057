//! Error types for the dust-resample crate.

/// Error type for all fallible operations in the dust-resample crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResampleError {
    /// Returned when the weight vector is empty.
    #[error("Weights cannot be empty.")]
    EmptyWeights,

    /// Returned when a weight is negative or non-finite, or all weights are zero.
    #[error("Weights must be finite and non-negative with a positive sum, but sum to {sum}.")]
    InvalidWeights {
        /// Sum of the supplied weights.
        sum: f64,
    },
}
