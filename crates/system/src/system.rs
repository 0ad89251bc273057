//! The discrete-time particle system.

use std::fmt;

use dust_pack::Packer;
use dust_state::{
    SystemDataComparison, SystemSimulateResult, SystemState, SystemSubState, resolve_indices,
};
use ndarray::ArrayView2;
use rand::Rng;
use tracing::{debug, trace};

use crate::compare::DataPoints;
use crate::error::SystemError;
use crate::generator::{ComparableGenerator, Generator, ZeroEvery};
use crate::times::{check_times, float_is_divisible_by, n_steps};

/// Drives a [`Generator`] over `n_groups × n_particles` particles.
///
/// Each group has its own `Shared` parameters and `Internal` cache. All
/// particles in all groups share one random source, consumed in group-major,
/// particle-minor, step-minor order.
///
/// Batch operations ([`set_state_initial`](Self::set_state_initial),
/// [`advance_to`](Self::advance_to), [`simulate`](Self::simulate),
/// [`update_shared`](Self::update_shared)) are all-or-nothing: if the
/// generator fails for any particle, no state, time or parameter changes
/// are kept. Random draws made before the failure are not rolled back.
///
/// # Example
///
/// ```
/// use dust_models::{DiscreteWalk, WalkShared};
/// use dust_system::System;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let shared = vec![WalkShared { n: 3, sd: 1.0 }];
/// let rng = StdRng::seed_from_u64(42);
/// let mut sys = System::new(DiscreteWalk, shared, 0.0, 1.0, 10, rng).unwrap();
/// sys.set_state_initial().unwrap();
/// sys.advance_to(5.0).unwrap();
/// assert_eq!(sys.time(), 5.0);
/// ```
pub struct System<G: Generator, R> {
    generator: G,
    shared: Vec<G::Shared>,
    internal: Vec<G::Internal>,
    zero_every: Vec<Vec<ZeroEvery>>,
    state_packer: Packer,
    state: SystemState,
    time: f64,
    dt: f64,
    rng: R,
}

impl<G, R> fmt::Debug for System<G, R>
where
    G: Generator,
    G::Shared: fmt::Debug,
    G::Internal: fmt::Debug,
    R: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("System")
            .field("shared", &self.shared)
            .field("internal", &self.internal)
            .field("zero_every", &self.zero_every)
            .field("state_packer", &self.state_packer)
            .field("state", &self.state)
            .field("time", &self.time)
            .field("dt", &self.dt)
            .field("rng", &self.rng)
            .finish_non_exhaustive()
    }
}

impl<G: Generator, R: Rng> System<G, R> {
    /// Builds a system with zero-filled state.
    ///
    /// The state layout comes from `generator.packing_state(&shared[0])`.
    ///
    /// # Errors
    ///
    /// - [`SystemError::State`] if `n_particles` is 0 or `shared` is empty,
    ///   or a zero-every index is outside the state.
    /// - [`SystemError::Pack`] if the generator reports an invalid layout.
    /// - [`SystemError::InvalidZeroEvery`] for a non-positive period.
    pub fn new(
        generator: G,
        shared: Vec<G::Shared>,
        time: f64,
        dt: f64,
        n_particles: usize,
        rng: R,
    ) -> Result<Self, SystemError> {
        dust_state::check_at_least("Number of particles", n_particles, 1)?;
        dust_state::check_at_least("Number of groups", shared.len(), 1)?;

        let state_packer = generator.packing_state(&shared[0])?;
        let n_state = state_packer.len();
        let zero_every = shared
            .iter()
            .map(|s| resolve_zero_every(&generator, s, n_state))
            .collect::<Result<Vec<_>, _>>()?;
        let internal = shared.iter().map(|s| generator.internal(s)).collect();
        let state = SystemState::new(shared.len(), n_particles, n_state)?;

        debug!(
            n_groups = shared.len(),
            n_particles,
            n_state,
            time,
            dt,
            "created system"
        );
        Ok(Self {
            generator,
            shared,
            internal,
            zero_every,
            state_packer,
            state,
            time,
            dt,
            rng,
        })
    }

    /// Current model time.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Moves the clock without touching the state.
    pub fn set_time(&mut self, time: f64) {
        self.time = time;
    }

    /// Step size.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn state(&self) -> &SystemState {
        &self.state
    }

    /// Layout of each particle's state.
    pub fn state_packer(&self) -> &Packer {
        &self.state_packer
    }

    pub fn shared(&self) -> &[G::Shared] {
        &self.shared
    }

    pub fn internal(&self) -> &[G::Internal] {
        &self.internal
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn n_groups(&self) -> usize {
        self.shared.len()
    }

    pub fn n_particles(&self) -> usize {
        self.state.n_particles()
    }

    /// The random source, e.g. for drawing resampling offsets between steps.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Sets every particle to the generator's initial state at the current time.
    pub fn set_state_initial(&mut self) -> Result<(), SystemError> {
        let Self {
            generator,
            shared,
            internal,
            state,
            rng,
            time,
            ..
        } = self;
        let time = *time;
        state.update_staged(|g, p, _, next| {
            generator
                .initial(time, &shared[g], &internal[g], next, &mut *rng)
                .map_err(|source| SystemError::Generator {
                    group: g,
                    particle: p,
                    source,
                })
        })?;
        debug!(time, "initialised state");
        Ok(())
    }

    /// Writes a structured subset of the state. See [`SystemState::set_state`].
    pub fn set_state(
        &mut self,
        values: &SystemSubState,
        group_indices: &[usize],
        particle_indices: &[usize],
        state_element_indices: &[usize],
    ) -> Result<(), SystemError> {
        self.state
            .set_state(values, group_indices, particle_indices, state_element_indices)?;
        Ok(())
    }

    /// Replaces each group's particles with a selection of its current ones.
    /// See [`SystemState::reorder`].
    pub fn reorder(&mut self, reordering: ArrayView2<'_, usize>) -> Result<(), SystemError> {
        self.state.reorder(reordering)?;
        trace!(time = self.time, "reordered particles");
        Ok(())
    }

    /// Runs every particle forward to `time`.
    ///
    /// Takes `ceil((time - self.time()) / dt)` steps; no steps if `dt` is not
    /// positive and finite. The clock is set to `time` on success.
    ///
    /// # Errors
    ///
    /// - [`SystemError::NonFiniteTime`] if `time` is NaN or infinite.
    /// - [`SystemError::TimeBeforeCurrent`] if `time` is before the current time.
    /// - [`SystemError::Generator`] if an update fails; nothing is committed.
    pub fn advance_to(&mut self, time: f64) -> Result<(), SystemError> {
        if !time.is_finite() {
            return Err(SystemError::NonFiniteTime { time });
        }
        if !(time >= self.time) {
            return Err(SystemError::TimeBeforeCurrent {
                requested: time,
                current: self.time,
            });
        }
        let steps = n_steps(self.time, time, self.dt);

        let Self {
            generator,
            shared,
            internal,
            zero_every,
            state,
            rng,
            time: start,
            dt,
            ..
        } = self;
        let (start, dt) = (*start, *dt);
        let n_state = state.n_state_elements();
        let mut current = vec![0.0; n_state];
        let mut next = vec![0.0; n_state];

        state.update_staged(|g, p, from, to| {
            current.copy_from_slice(from);
            let mut t = start;
            for _ in 0..steps {
                for rule in &zero_every[g] {
                    if float_is_divisible_by(t, rule.frequency) {
                        for &i in &rule.indices {
                            current[i] = 0.0;
                        }
                    }
                }
                next.copy_from_slice(&current);
                generator
                    .update(t, dt, &current, &shared[g], &internal[g], &mut next, &mut *rng)
                    .map_err(|source| SystemError::Generator {
                        group: g,
                        particle: p,
                        source,
                    })?;
                std::mem::swap(&mut current, &mut next);
                t += dt;
            }
            to.copy_from_slice(&current);
            Ok::<(), SystemError>(())
        })?;

        debug!(
            from = start,
            to = time,
            n_steps = steps,
            n_groups = self.shared.len(),
            n_particles = self.state.n_particles(),
            "advanced system"
        );
        self.time = time;
        Ok(())
    }

    /// Advances through each of `times`, recording the selected state elements.
    ///
    /// `state_element_indices` must be strictly increasing; empty selects all.
    /// The result has shape `[n_groups, n_particles, n_selected, times.len()]`.
    /// On error the system is left as it was after the last completed time.
    ///
    /// # Errors
    ///
    /// - [`SystemError::TimeTooEarly`] if any time precedes the current time.
    /// - [`SystemError::UnorderedTimes`] if times are not strictly increasing.
    /// - [`StateError`](dust_state::StateError) for bad element indices or an empty `times`.
    pub fn simulate(
        &mut self,
        times: &[f64],
        state_element_indices: &[usize],
    ) -> Result<SystemSimulateResult, SystemError> {
        check_times(times, self.time)?;
        let elements = resolve_indices(
            "State Element",
            state_element_indices,
            self.state.n_state_elements(),
        )?;
        let mut result = SystemSimulateResult::new(
            self.n_groups(),
            self.n_particles(),
            elements.len(),
            times.len(),
        )?;

        let mut row = vec![0.0; elements.len()];
        for (t, &time) in times.iter().enumerate() {
            self.advance_to(time)?;
            for g in 0..self.n_groups() {
                for p in 0..self.n_particles() {
                    let particle = self.state.particle(g, p)?;
                    for (dst, &e) in row.iter_mut().zip(&elements) {
                        *dst = particle[e];
                    }
                    result.set_values_for_time(g, p, t, &row)?;
                }
            }
        }
        debug!(
            n_times = times.len(),
            n_selected = elements.len(),
            "simulated system"
        );
        Ok(result)
    }

    /// Replaces every group's parameters and recomputes its cache.
    ///
    /// For each group, `generator.update_shared(&mut shared[g], &new_shared[g])`
    /// is applied to a copy. The change is committed only if every group keeps
    /// the current state layout and has valid zero-every rules.
    ///
    /// # Errors
    ///
    /// - [`SystemError::SharedLengthMismatch`] unless there is one entry per group.
    /// - [`SystemError::StateLengthChanged`] if a group's layout would change size.
    /// - [`SystemError::StateLayoutChanged`] if it keeps its size but changes
    ///   names or shapes.
    pub fn update_shared(&mut self, new_shared: &[G::Shared]) -> Result<(), SystemError> {
        if new_shared.len() != self.shared.len() {
            return Err(SystemError::SharedLengthMismatch {
                expected: self.shared.len(),
                given: new_shared.len(),
            });
        }

        let n_state = self.state_packer.len();
        let mut shared = self.shared.clone();
        let mut zero_every = Vec::with_capacity(shared.len());
        for (g, (current, new)) in shared.iter_mut().zip(new_shared).enumerate() {
            self.generator.update_shared(current, new);
            let packer = self.generator.packing_state(current)?;
            if packer.len() != n_state {
                return Err(SystemError::StateLengthChanged {
                    group: g,
                    expected: n_state,
                    given: packer.len(),
                });
            }
            if packer != self.state_packer {
                return Err(SystemError::StateLayoutChanged { group: g });
            }
            zero_every.push(resolve_zero_every(&self.generator, current, n_state)?);
        }

        self.internal = shared.iter().map(|s| self.generator.internal(s)).collect();
        self.zero_every = zero_every;
        self.shared = shared;
        trace!(n_groups = self.shared.len(), "updated shared parameters");
        Ok(())
    }
}

impl<G: ComparableGenerator, R: Rng> System<G, R> {
    /// Scores every particle's current state against observations.
    ///
    /// `data` is either one observation for all groups or one per group.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::DataLengthMismatch`] if per-group data does not
    /// have one entry per group (a single entry is used for every group).
    pub fn compare_data<'a>(
        &mut self,
        data: impl Into<DataPoints<'a, G::Data>>,
    ) -> Result<SystemDataComparison, SystemError>
    where
        G::Data: 'a,
    {
        let data = data.into().check(self.n_groups())?;
        let mut result = SystemDataComparison::new(self.n_groups(), self.n_particles())?;
        for g in 0..self.n_groups() {
            let data_g = data.for_group(g);
            for p in 0..self.n_particles() {
                let value = self.generator.compare_data(
                    self.time,
                    self.state.particle(g, p)?,
                    data_g,
                    &self.shared[g],
                    &self.internal[g],
                    &mut self.rng,
                );
                result.set_value(g, p, value)?;
            }
        }
        debug!(
            time = self.time,
            n_groups = self.n_groups(),
            n_particles = self.n_particles(),
            "compared data"
        );
        Ok(result)
    }
}

fn resolve_zero_every<G: Generator>(
    generator: &G,
    shared: &G::Shared,
    n_state: usize,
) -> Result<Vec<ZeroEvery>, SystemError> {
    let rules = generator.zero_every(shared);
    for rule in &rules {
        if !(rule.frequency.is_finite() && rule.frequency > 0.0) {
            return Err(SystemError::InvalidZeroEvery {
                frequency: rule.frequency,
            });
        }
        for &i in &rule.indices {
            dust_state::check_index("Zero-every index", i, n_state)
                .map_err(SystemError::from)?;
        }
    }
    Ok(rules)
}
