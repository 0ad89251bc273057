//! Index and count validation shared by the state containers.
//!
//! Every check produces an error naming the offending quantity, its valid
//! range and the value supplied.

use crate::error::StateError;

/// Checks that `value` lies in `0..len`.
///
/// `len` must be at least 1; the containers guarantee this at construction.
pub fn check_index(name: &str, value: usize, len: usize) -> Result<usize, StateError> {
    if value >= len {
        return Err(StateError::IndexOutOfRange {
            name: name.to_string(),
            min: 0,
            max: len.saturating_sub(1),
            value,
        });
    }
    Ok(value)
}

/// Checks that a count is at least `min`.
pub fn check_at_least(name: &str, value: usize, min: usize) -> Result<usize, StateError> {
    if value < min {
        return Err(StateError::NotAtLeast {
            name: name.to_string(),
            min,
            value,
        });
    }
    Ok(value)
}

/// Resolves an optional index selection against a dimension of size `len`.
///
/// An empty slice selects every index in order. Otherwise the indices must be
/// strictly increasing and each must lie in `0..len`. `name` is the kind of
/// index ("Group", "Particle", "State Element") and is used in messages as
/// "`{name} indices ...`" and "`{name} index ...`".
pub fn resolve_indices(
    name: &str,
    indices: &[usize],
    len: usize,
) -> Result<Vec<usize>, StateError> {
    if indices.is_empty() {
        return Ok((0..len).collect());
    }
    if indices.windows(2).any(|w| w[0] >= w[1]) {
        return Err(StateError::UnorderedIndices {
            name: name.to_string(),
        });
    }
    let index_name = format!("{name} index");
    for &i in indices {
        check_index(&index_name, i, len)?;
    }
    Ok(indices.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_in_range() {
        assert_eq!(check_index("iGroup", 1, 2), Ok(1));
        let err = check_index("iGroup", 3, 2).unwrap_err();
        assert_eq!(
            err.to_string(),
            "iGroup should be an integer between 0 and 1, but is 3."
        );
    }

    #[test]
    fn at_least() {
        assert_eq!(check_at_least("nParticles", 1, 1), Ok(1));
        assert!(check_at_least("nParticles", 0, 1).is_err());
    }

    #[test]
    fn empty_selection_is_everything() {
        assert_eq!(resolve_indices("Group", &[], 3).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn ordered_selection_is_kept() {
        assert_eq!(resolve_indices("Group", &[0, 2], 3).unwrap(), vec![0, 2]);
    }

    #[test]
    fn duplicates_are_rejected() {
        let err = resolve_indices("TEST", &[1, 1], 3).unwrap_err();
        assert_eq!(
            err.to_string(),
            "TEST indices must be ordered with no duplicates"
        );
    }

    #[test]
    fn unordered_indices_are_rejected() {
        assert!(matches!(
            resolve_indices("TEST", &[2, 0], 3),
            Err(StateError::UnorderedIndices { .. })
        ));
    }

    #[test]
    fn out_of_range_selection_names_the_index() {
        let err = resolve_indices("Group", &[0, 5], 2).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Group index should be an integer between 0 and 1, but is 5."
        );
    }
}
