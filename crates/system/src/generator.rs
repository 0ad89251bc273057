//! Model capability traits.

use dust_pack::{PackError, Packer};
use rand::Rng;

use crate::error::GeneratorError;

/// Periodic reset of some state elements.
///
/// Before every update whose start time is a multiple of `frequency`, the
/// elements at `indices` are set to zero. Used for counters such as daily
/// incidence.
#[derive(Debug, Clone, PartialEq)]
pub struct ZeroEvery {
    /// Period, in model time units.
    pub frequency: f64,
    /// State element indices to zero.
    pub indices: Vec<usize>,
}

impl ZeroEvery {
    pub fn new(frequency: f64, indices: Vec<usize>) -> Self {
        Self { frequency, indices }
    }
}

/// A discrete-time stochastic model.
///
/// A generator holds no per-particle data. Everything it needs arrives as
/// arguments: the group's `Shared` parameters, the group's `Internal` cache
/// (derived once from `Shared` by [`internal`](Self::internal)), the
/// particle's state and a random source.
///
/// Calls are made in group-major, particle-minor order, so the sequence of
/// random draws is reproducible for a seeded rng.
pub trait Generator {
    /// Per-group model parameters.
    type Shared: Clone;
    /// Per-group cache derived from [`Shared`](Self::Shared).
    type Internal;

    /// Writes the initial state of one particle into `state_next`.
    ///
    /// `state_next` holds the particle's previous values on entry.
    fn initial<R: Rng + ?Sized>(
        &self,
        time: f64,
        shared: &Self::Shared,
        internal: &Self::Internal,
        state_next: &mut [f64],
        rng: &mut R,
    ) -> Result<(), GeneratorError>;

    /// Advances one particle from `time` to `time + dt`.
    ///
    /// Reads `state` and writes the complete new state into `state_next`.
    #[allow(clippy::too_many_arguments)]
    fn update<R: Rng + ?Sized>(
        &self,
        time: f64,
        dt: f64,
        state: &[f64],
        shared: &Self::Shared,
        internal: &Self::Internal,
        state_next: &mut [f64],
        rng: &mut R,
    ) -> Result<(), GeneratorError>;

    /// Derives the group cache from its parameters.
    fn internal(&self, shared: &Self::Shared) -> Self::Internal;

    /// Layout of the particle state for the given parameters.
    fn packing_state(&self, shared: &Self::Shared) -> Result<Packer, PackError>;

    /// Applies new parameters to a group. Defaults to replacing them.
    fn update_shared(&self, shared: &mut Self::Shared, new_shared: &Self::Shared) {
        *shared = new_shared.clone();
    }

    /// Periodic resets for the given parameters. Defaults to none.
    fn zero_every(&self, _shared: &Self::Shared) -> Vec<ZeroEvery> {
        Vec::new()
    }
}

/// A generator that can score a particle's state against observed data.
pub trait ComparableGenerator: Generator {
    /// One observation.
    type Data;

    /// Log-likelihood of `data` given the particle's `state` at `time`.
    fn compare_data<R: Rng + ?Sized>(
        &self,
        time: f64,
        state: &[f64],
        data: &Self::Data,
        shared: &Self::Shared,
        internal: &Self::Internal,
        rng: &mut R,
    ) -> f64;
}
