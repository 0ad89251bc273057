//! Error types for the dust-state crate.

/// Error type for all fallible operations in the dust-state crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// Returned when an index lies outside its valid range.
    #[error("{name} should be an integer between {min} and {max}, but is {value}.")]
    IndexOutOfRange {
        /// Human-readable name of the index.
        name: String,
        /// Smallest valid value.
        min: usize,
        /// Largest valid value.
        max: usize,
        /// The value supplied.
        value: usize,
    },

    /// Returned when a count is below its minimum.
    #[error("{name} should be an integer greater than or equal to {min}, but is {value}.")]
    NotAtLeast {
        /// Human-readable name of the count.
        name: String,
        /// Smallest valid value.
        min: usize,
        /// The value supplied.
        value: usize,
    },

    /// Returned when an index list is not strictly increasing.
    #[error("{name} indices must be ordered with no duplicates")]
    UnorderedIndices {
        /// Which kind of index ("Group", "Particle", "State Element").
        name: String,
    },

    /// Returned when nested input values do not match the selected indices.
    #[error(
        "{name} should have length {expected} but was {given}{}",
        format_path(.path)
    )]
    NestedLengthMismatch {
        /// Which nesting level is wrong.
        name: String,
        /// Required length at that level.
        expected: usize,
        /// Supplied length at that level.
        given: usize,
        /// Position of the offending list in the outer levels; empty for the outermost.
        path: Vec<usize>,
    },

    /// Returned when a particle state vector has the wrong length.
    #[error("Particle state array must be of length {expected}.")]
    ParticleLength {
        /// Number of state elements per particle.
        expected: usize,
    },

    /// Returned when a reordering descriptor has the wrong shape.
    #[error("Unexpected reordering shape. Expected {expected:?} but got {given:?}.")]
    ReorderShape {
        /// `[n_groups, n_particles]`.
        expected: Vec<usize>,
        /// Shape supplied.
        given: Vec<usize>,
    },

    /// Returned when a row of recorded values has the wrong length.
    #[error("Values array must be of length {expected}, but is {given}.")]
    ValuesLength {
        /// Required length.
        expected: usize,
        /// Supplied length.
        given: usize,
    },
}

fn format_path(path: &[usize]) -> String {
    if path.is_empty() {
        return String::new();
    }
    let joined: Vec<String> = path.iter().map(usize::to_string).collect();
    format!(" at index {}", joined.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_index_out_of_range() {
        let e = StateError::IndexOutOfRange {
            name: "Reordering index".to_string(),
            min: 0,
            max: 2,
            value: 20,
        };
        assert_eq!(
            e.to_string(),
            "Reordering index should be an integer between 0 and 2, but is 20."
        );
    }

    #[test]
    fn display_not_at_least() {
        let e = StateError::NotAtLeast {
            name: "nGroups".to_string(),
            min: 1,
            value: 0,
        };
        assert_eq!(
            e.to_string(),
            "nGroups should be an integer greater than or equal to 1, but is 0."
        );
    }

    #[test]
    fn display_unordered_indices() {
        let e = StateError::UnorderedIndices {
            name: "TEST".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "TEST indices must be ordered with no duplicates"
        );
    }

    #[test]
    fn display_nested_length_top_level() {
        let e = StateError::NestedLengthMismatch {
            name: "Groups".to_string(),
            expected: 3,
            given: 2,
            path: vec![],
        };
        assert_eq!(e.to_string(), "Groups should have length 3 but was 2");
    }

    #[test]
    fn display_nested_length_with_path() {
        let e = StateError::NestedLengthMismatch {
            name: "State Elements".to_string(),
            expected: 5,
            given: 4,
            path: vec![0, 0],
        };
        assert_eq!(
            e.to_string(),
            "State Elements should have length 5 but was 4 at index 0,0"
        );
    }

    #[test]
    fn display_particle_length() {
        let e = StateError::ParticleLength { expected: 4 };
        assert_eq!(e.to_string(), "Particle state array must be of length 4.");
    }

    #[test]
    fn display_reorder_shape() {
        let e = StateError::ReorderShape {
            expected: vec![2, 3],
            given: vec![2, 2],
        };
        assert_eq!(
            e.to_string(),
            "Unexpected reordering shape. Expected [2, 3] but got [2, 2]."
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<StateError>();
    }
}
