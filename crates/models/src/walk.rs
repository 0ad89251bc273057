//! Gaussian random walk.

use dust_pack::{PackError, Packer};
use dust_system::{Generator, GeneratorError};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Parameters of one random-walk group.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkShared {
    /// Number of independent walkers per particle.
    pub n: usize,
    /// Standard deviation of each step.
    pub sd: f64,
}

/// `n` independent walkers per particle, each starting at the initial time
/// and moving by `Normal(0, sd)` per step.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscreteWalk;

impl Generator for DiscreteWalk {
    type Shared = WalkShared;
    type Internal = ();

    fn initial<R: Rng + ?Sized>(
        &self,
        time: f64,
        shared: &WalkShared,
        _internal: &(),
        state_next: &mut [f64],
        _rng: &mut R,
    ) -> Result<(), GeneratorError> {
        check_len(state_next, shared)?;
        state_next[..shared.n].fill(time);
        Ok(())
    }

    fn update<R: Rng + ?Sized>(
        &self,
        _time: f64,
        _dt: f64,
        state: &[f64],
        shared: &WalkShared,
        _internal: &(),
        state_next: &mut [f64],
        rng: &mut R,
    ) -> Result<(), GeneratorError> {
        check_len(state, shared)?;
        check_len(state_next, shared)?;
        if !(shared.sd >= 0.0) {
            return Err(GeneratorError::InvalidParameter {
                name: "sd".to_string(),
                reason: format!("must be non-negative, but is {}", shared.sd),
            });
        }
        for (next, &x) in state_next.iter_mut().zip(state).take(shared.n) {
            let step = Normal::new(x, shared.sd).map_err(|e| GeneratorError::Distribution {
                distribution: "normal",
                reason: e.to_string(),
            })?;
            *next = step.sample(rng);
        }
        Ok(())
    }

    fn internal(&self, _shared: &WalkShared) {}

    fn packing_state(&self, shared: &WalkShared) -> Result<Packer, PackError> {
        Packer::new([("values", vec![shared.n])])
    }
}

fn check_len(state: &[f64], shared: &WalkShared) -> Result<(), GeneratorError> {
    if state.len() < shared.n {
        return Err(GeneratorError::StateTooShort {
            required: shared.n,
            given: state.len(),
        });
    }
    Ok(())
}
