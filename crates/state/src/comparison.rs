//! Per-particle comparison values.

use ndarray::{Array2, ArrayView1, ArrayView2};

use crate::check::{check_at_least, check_index};
use crate::error::StateError;

/// Dense `[group, particle]` store of scalar comparison values, typically
/// log-likelihoods of observed data given each particle's state.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemDataComparison {
    values: Array2<f64>,
}

impl SystemDataComparison {
    /// Creates a zero-filled store.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::NotAtLeast`] if either dimension is zero.
    pub fn new(n_groups: usize, n_particles: usize) -> Result<Self, StateError> {
        check_at_least("nGroups", n_groups, 1)?;
        check_at_least("nParticles", n_particles, 1)?;
        Ok(Self {
            values: Array2::zeros((n_groups, n_particles)),
        })
    }

    /// Number of groups.
    pub fn n_groups(&self) -> usize {
        self.values.nrows()
    }

    /// Number of particles per group.
    pub fn n_particles(&self) -> usize {
        self.values.ncols()
    }

    /// Stores the value for one particle.
    pub fn set_value(
        &mut self,
        group: usize,
        particle: usize,
        value: f64,
    ) -> Result<(), StateError> {
        self.check(group, particle)?;
        self.values[[group, particle]] = value;
        Ok(())
    }

    /// Reads the value for one particle.
    pub fn value(&self, group: usize, particle: usize) -> Result<f64, StateError> {
        self.check(group, particle)?;
        Ok(self.values[[group, particle]])
    }

    /// All values of one group, one per particle.
    pub fn group_values(&self, group: usize) -> Result<ArrayView1<'_, f64>, StateError> {
        check_index("iGroup", group, self.n_groups())?;
        Ok(self.values.row(group))
    }

    /// The full `[group, particle]` array.
    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    fn check(&self, group: usize, particle: usize) -> Result<(), StateError> {
        check_index("iGroup", group, self.n_groups())?;
        check_index("iParticle", particle, self.n_particles())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get() {
        let mut c = SystemDataComparison::new(2, 3).unwrap();
        c.set_value(1, 2, -4.5).unwrap();
        c.set_value(0, 0, 1.25).unwrap();
        assert_eq!(c.value(1, 2).unwrap(), -4.5);
        assert_eq!(c.value(0, 1).unwrap(), 0.0);
        assert_eq!(c.group_values(0).unwrap().to_vec(), vec![1.25, 0.0, 0.0]);
        assert_eq!(c.values().shape(), &[2, 3]);
    }

    #[test]
    fn bounds_are_checked() {
        let mut c = SystemDataComparison::new(2, 3).unwrap();
        assert_eq!(
            c.set_value(3, 0, 1.0).unwrap_err().to_string(),
            "iGroup should be an integer between 0 and 1, but is 3."
        );
        assert_eq!(
            c.value(0, 3).unwrap_err().to_string(),
            "iParticle should be an integer between 0 and 2, but is 3."
        );
        assert!(c.group_values(2).is_err());
    }

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(
            SystemDataComparison::new(2, 0).unwrap_err().to_string(),
            "nParticles should be an integer greater than or equal to 1, but is 0."
        );
    }
}
