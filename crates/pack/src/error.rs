//! Error types for the dust-pack crate.

/// Error type for all fallible operations in the dust-pack crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PackError {
    /// Returned when a packer is built from a shape with no entries.
    #[error(
        "Trying to generate an empty packer. You have not provided any entries in 'shape', \
         which implies generating from a zero-length parameter vector."
    )]
    EmptyPacker,

    /// Returned when a dimension of a named value is zero.
    #[error(
        "All dimension values must be at least 1, but this is not the case for {name}, \
         whose value is {shape:?}."
    )]
    InvalidDimension {
        /// Name of the offending value.
        name: String,
        /// The full declared shape of that value.
        shape: Vec<usize>,
    },

    /// Returned when the same name appears more than once in a shape.
    #[error("Names must be distinct, but {name} appears more than once.")]
    DuplicateName {
        /// The repeated name.
        name: String,
    },

    /// Returned when an input buffer does not have the packed length.
    #[error("Incorrect length input; expected {expected} but given {given}.")]
    IncorrectLength {
        /// Length required by the packer.
        expected: usize,
        /// Length supplied by the caller.
        given: usize,
    },

    /// Returned when a value required for packing is absent.
    #[error("Missing value for {name}.")]
    MissingValue {
        /// Name of the absent value.
        name: String,
    },

    /// Returned when a value supplied for packing has the wrong shape.
    #[error("Value {name} should have shape {expected:?} but has shape {given:?}.")]
    ShapeMismatch {
        /// Name of the value.
        name: String,
        /// Declared shape.
        expected: Vec<usize>,
        /// Supplied shape.
        given: Vec<usize>,
    },
}
