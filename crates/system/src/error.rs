//! Error types for the dust-system crate.

use dust_pack::PackError;
use dust_state::StateError;

/// Error returned by model code implementing [`Generator`](crate::Generator).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeneratorError {
    /// Returned when a parameter value cannot be used by the model.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a probability distribution cannot be built from the
    /// current state or parameters.
    #[error("cannot build {distribution} distribution: {reason}")]
    Distribution {
        /// Distribution family, e.g. "binomial".
        distribution: &'static str,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a state buffer is shorter than the model needs.
    #[error("State must have length of at least {required}, but has length {given}.")]
    StateTooShort {
        /// Minimum length needed.
        required: usize,
        /// Actual length.
        given: usize,
    },
}

/// Error type for all fallible operations in the dust-system crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SystemError {
    /// Returned when the generator fails for one particle.
    #[error("generator failed for group {group}, particle {particle}: {source}")]
    Generator {
        /// Group index.
        group: usize,
        /// Particle index.
        particle: usize,
        /// The generator's error.
        #[source]
        source: GeneratorError,
    },

    /// Returned when asked to run backwards in time.
    #[error("Cannot run to requested time {requested}, which is less than current time {current}.")]
    TimeBeforeCurrent {
        /// Requested end time.
        requested: f64,
        /// Current system time.
        current: f64,
    },

    /// Returned when a simulation time lies before the current time.
    #[error("Times must be greater than or equal to {current}, but found {found}.")]
    TimeTooEarly {
        /// Current system time.
        current: f64,
        /// First offending time.
        found: f64,
    },

    /// Returned when a requested time is NaN or infinite.
    #[error("Requested time must be finite, but is {time}.")]
    NonFiniteTime {
        /// The offending time.
        time: f64,
    },

    /// Returned when simulation times are not strictly increasing.
    #[error("Times must be ordered with no duplicates.")]
    UnorderedTimes,

    /// Returned when per-group data does not have one entry per group.
    #[error("Expected data to have same length as groups.")]
    DataLengthMismatch,

    /// Returned when new shared parameters do not have one entry per group.
    #[error("Expected {expected} shared parameter sets, one per group, but given {given}.")]
    SharedLengthMismatch {
        /// Number of groups.
        expected: usize,
        /// Number of parameter sets supplied.
        given: usize,
    },

    /// Returned when updated parameters would change the state layout.
    #[error(
        "Updated parameters for group {group} would change the state length from {expected} to {given}."
    )]
    StateLengthChanged {
        /// Group whose new parameters are rejected.
        group: usize,
        /// Current state length.
        expected: usize,
        /// State length implied by the new parameters.
        given: usize,
    },

    /// Returned when updated parameters keep the state length but change its
    /// names or shapes.
    #[error("Updated parameters for group {group} would change the state layout.")]
    StateLayoutChanged {
        /// Group whose new parameters are rejected.
        group: usize,
    },

    /// Returned when a zero-every rule has a non-positive or non-finite period.
    #[error("Zero-every frequency must be finite and positive, but is {frequency}.")]
    InvalidZeroEvery {
        /// The offending frequency.
        frequency: f64,
    },

    #[error(transparent)]
    Pack(#[from] PackError),

    #[error(transparent)]
    State(#[from] StateError),
}
