//! Dense storage for the state of every particle in every group.

use ndarray::{Array3, ArrayView2};

use crate::check::{check_at_least, check_index, resolve_indices};
use crate::error::StateError;

/// Nested `[group][particle][element]` values for [`SystemState::set_state`].
pub type SystemSubState = Vec<Vec<Vec<f64>>>;

/// State of `n_groups × n_particles` particles, each a vector of
/// `n_state_elements` values.
///
/// Values live in one flat row-major buffer. A second buffer of the same
/// size receives staged writes ([`reorder`](Self::reorder),
/// [`update_staged`](Self::update_staged)); the two are swapped when a batch
/// completes.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemState {
    state: Vec<f64>,
    scratch: Vec<f64>,
    n_groups: usize,
    n_particles: usize,
    n_state_elements: usize,
}

impl SystemState {
    /// Creates a zero-filled state.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::NotAtLeast`] if any dimension is zero.
    pub fn new(
        n_groups: usize,
        n_particles: usize,
        n_state_elements: usize,
    ) -> Result<Self, StateError> {
        check_at_least("nGroups", n_groups, 1)?;
        check_at_least("nParticles", n_particles, 1)?;
        check_at_least("nStateElements", n_state_elements, 1)?;
        let len = n_groups * n_particles * n_state_elements;
        Ok(Self {
            state: vec![0.0; len],
            scratch: vec![0.0; len],
            n_groups,
            n_particles,
            n_state_elements,
        })
    }

    /// Number of groups.
    pub fn n_groups(&self) -> usize {
        self.n_groups
    }

    /// Number of particles per group.
    pub fn n_particles(&self) -> usize {
        self.n_particles
    }

    /// Number of state elements per particle.
    pub fn n_state_elements(&self) -> usize {
        self.n_state_elements
    }

    /// The whole state as a flat `[group, particle, element]` slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.state
    }

    /// An owned `[group, particle, element]` copy of the state.
    pub fn to_array(&self) -> Array3<f64> {
        let n_el = self.n_state_elements;
        let n_p = self.n_particles;
        Array3::from_shape_fn((self.n_groups, n_p, n_el), |(g, p, e)| {
            self.state[(g * n_p + p) * n_el + e]
        })
    }

    /// All particles of one group, contiguous.
    pub fn group(&self, group: usize) -> Result<&[f64], StateError> {
        check_index("Group index", group, self.n_groups)?;
        let len = self.n_particles * self.n_state_elements;
        Ok(&self.state[group * len..(group + 1) * len])
    }

    /// Read-only view of one particle.
    pub fn particle(&self, group: usize, particle: usize) -> Result<&[f64], StateError> {
        let range = self.particle_range(group, particle)?;
        Ok(&self.state[range])
    }

    /// Mutable view of one particle.
    pub fn particle_mut(
        &mut self,
        group: usize,
        particle: usize,
    ) -> Result<&mut [f64], StateError> {
        let range = self.particle_range(group, particle)?;
        Ok(&mut self.state[range])
    }

    /// Overwrites one particle.
    ///
    /// # Errors
    ///
    /// - [`StateError::IndexOutOfRange`] for a bad group or particle index.
    /// - [`StateError::ParticleLength`] if `values` is not `n_state_elements` long.
    pub fn set_particle(
        &mut self,
        group: usize,
        particle: usize,
        values: &[f64],
    ) -> Result<(), StateError> {
        let range = self.particle_range(group, particle)?;
        if values.len() != self.n_state_elements {
            return Err(StateError::ParticleLength {
                expected: self.n_state_elements,
            });
        }
        self.state[range].copy_from_slice(values);
        Ok(())
    }

    /// Writes a structured subset of the state.
    ///
    /// Each index list selects along one dimension; an empty list selects all
    /// of it. `values` must be nested exactly as the selection implies:
    /// `values[i][j][k]` is written to
    /// `(group_indices[i], particle_indices[j], state_element_indices[k])`.
    /// Everything is validated before the first write.
    ///
    /// # Errors
    ///
    /// - [`StateError::UnorderedIndices`] if a list is not strictly increasing.
    /// - [`StateError::IndexOutOfRange`] if a listed index is out of bounds.
    /// - [`StateError::NestedLengthMismatch`] if `values` has the wrong shape.
    pub fn set_state(
        &mut self,
        values: &SystemSubState,
        group_indices: &[usize],
        particle_indices: &[usize],
        state_element_indices: &[usize],
    ) -> Result<(), StateError> {
        let groups = resolve_indices("Group", group_indices, self.n_groups)?;
        let particles = resolve_indices("Particle", particle_indices, self.n_particles)?;
        let elements = resolve_indices(
            "State Element",
            state_element_indices,
            self.n_state_elements,
        )?;

        check_nested_len("Groups", groups.len(), values.len(), &[])?;
        for (i, group_values) in values.iter().enumerate() {
            check_nested_len("Particles", particles.len(), group_values.len(), &[i])?;
            for (j, particle_values) in group_values.iter().enumerate() {
                check_nested_len("State Elements", elements.len(), particle_values.len(), &[i, j])?;
            }
        }

        for (&g, group_values) in groups.iter().zip(values) {
            for (&p, particle_values) in particles.iter().zip(group_values) {
                let offset = self.offset(g, p);
                for (&e, &v) in elements.iter().zip(particle_values) {
                    self.state[offset + e] = v;
                }
            }
        }
        Ok(())
    }

    /// Replaces each group's particles with a selection of its current ones.
    ///
    /// `reordering[[g, p]]` is the old index of the particle that lands at
    /// position `p` of group `g`. Indices may repeat or be omitted.
    ///
    /// # Errors
    ///
    /// - [`StateError::ReorderShape`] if the shape is not `[n_groups, n_particles]`.
    /// - [`StateError::IndexOutOfRange`] for an entry `>= n_particles`.
    pub fn reorder(&mut self, reordering: ArrayView2<'_, usize>) -> Result<(), StateError> {
        let expected = [self.n_groups, self.n_particles];
        if reordering.shape() != expected {
            return Err(StateError::ReorderShape {
                expected: expected.to_vec(),
                given: reordering.shape().to_vec(),
            });
        }
        for &idx in reordering.iter() {
            check_index("Reordering index", idx, self.n_particles)?;
        }

        let n_el = self.n_state_elements;
        for ((g, p), &from) in reordering.indexed_iter() {
            let dst = self.offset(g, p);
            let src = self.offset(g, from);
            self.scratch[dst..dst + n_el].copy_from_slice(&self.state[src..src + n_el]);
        }
        std::mem::swap(&mut self.state, &mut self.scratch);
        Ok(())
    }

    /// Computes a new value for every particle, committing only if all succeed.
    ///
    /// `f(group, particle, current, next)` is called in group-major,
    /// particle-minor order. `next` starts as a copy of `current`. If every
    /// call returns `Ok`, the staged values replace the state; on the first
    /// error the state is left untouched and the error is returned.
    pub fn update_staged<E, F>(&mut self, mut f: F) -> Result<(), E>
    where
        F: FnMut(usize, usize, &[f64], &mut [f64]) -> Result<(), E>,
    {
        let n_el = self.n_state_elements;
        let n_p = self.n_particles;
        let particles = self
            .state
            .chunks_exact(n_el)
            .zip(self.scratch.chunks_exact_mut(n_el));
        for (i, (current, next)) in particles.enumerate() {
            next.copy_from_slice(current);
            f(i / n_p, i % n_p, current, next)?;
        }
        std::mem::swap(&mut self.state, &mut self.scratch);
        Ok(())
    }

    fn offset(&self, group: usize, particle: usize) -> usize {
        (group * self.n_particles + particle) * self.n_state_elements
    }

    fn particle_range(
        &self,
        group: usize,
        particle: usize,
    ) -> Result<std::ops::Range<usize>, StateError> {
        check_index("Group index", group, self.n_groups)?;
        check_index("Particle index", particle, self.n_particles)?;
        let start = self.offset(group, particle);
        Ok(start..start + self.n_state_elements)
    }
}

fn check_nested_len(
    name: &str,
    expected: usize,
    given: usize,
    path: &[usize],
) -> Result<(), StateError> {
    if expected != given {
        return Err(StateError::NestedLengthMismatch {
            name: name.to_string(),
            expected,
            given,
            path: path.to_vec(),
        });
    }
    Ok(())
}
