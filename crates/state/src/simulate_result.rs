//! Recorded trajectories from a multi-time simulation.

use ndarray::{Array4, ArrayView1, ArrayView4, s};

use crate::check::{check_at_least, check_index};
use crate::error::StateError;

/// Dense `[group, particle, state element, time]` store of recorded values.
///
/// Dimensions are fixed at construction; every accessor bounds-checks its
/// indices.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemSimulateResult {
    values: Array4<f64>,
}

impl SystemSimulateResult {
    /// Creates a zero-filled result.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::NotAtLeast`] if any dimension is zero.
    pub fn new(
        n_groups: usize,
        n_particles: usize,
        n_state_elements: usize,
        n_times: usize,
    ) -> Result<Self, StateError> {
        check_at_least("nGroups", n_groups, 1)?;
        check_at_least("nParticles", n_particles, 1)?;
        check_at_least("nStateElements", n_state_elements, 1)?;
        check_at_least("nTimes", n_times, 1)?;
        Ok(Self {
            values: Array4::zeros((n_groups, n_particles, n_state_elements, n_times)),
        })
    }

    pub fn n_groups(&self) -> usize {
        self.values.shape()[0]
    }

    pub fn n_particles(&self) -> usize {
        self.values.shape()[1]
    }

    pub fn n_state_elements(&self) -> usize {
        self.values.shape()[2]
    }

    pub fn n_times(&self) -> usize {
        self.values.shape()[3]
    }

    /// Records the selected state of one particle at one time index.
    ///
    /// # Errors
    ///
    /// - [`StateError::IndexOutOfRange`] for a bad group, particle or time index.
    /// - [`StateError::ValuesLength`] if `values` is not `n_state_elements` long.
    pub fn set_values_for_time(
        &mut self,
        group: usize,
        particle: usize,
        time: usize,
        values: &[f64],
    ) -> Result<(), StateError> {
        self.check_particle(group, particle)?;
        check_index("Time index", time, self.n_times())?;
        if values.len() != self.n_state_elements() {
            return Err(StateError::ValuesLength {
                expected: self.n_state_elements(),
                given: values.len(),
            });
        }
        let mut slot = self.values.slice_mut(s![group, particle, .., time]);
        for (dst, &v) in slot.iter_mut().zip(values) {
            *dst = v;
        }
        Ok(())
    }

    /// Selected state of one particle at one time index.
    pub fn values_for_time(
        &self,
        group: usize,
        particle: usize,
        time: usize,
    ) -> Result<ArrayView1<'_, f64>, StateError> {
        self.check_particle(group, particle)?;
        check_index("Time index", time, self.n_times())?;
        Ok(self.values.slice(s![group, particle, .., time]))
    }

    /// One state element of one particle across all times.
    pub fn state_element(
        &self,
        group: usize,
        particle: usize,
        state_element: usize,
    ) -> Result<ArrayView1<'_, f64>, StateError> {
        self.check_particle(group, particle)?;
        check_index("State element index", state_element, self.n_state_elements())?;
        Ok(self.values.slice(s![group, particle, state_element, ..]))
    }

    /// The full `[group, particle, state element, time]` array.
    pub fn values(&self) -> ArrayView4<'_, f64> {
        self.values.view()
    }

    fn check_particle(&self, group: usize, particle: usize) -> Result<(), StateError> {
        check_index("Group index", group, self.n_groups())?;
        check_index("Particle index", particle, self.n_particles())?;
        Ok(())
    }
}
