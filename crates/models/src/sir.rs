//! Discrete-time stochastic SIR model.

use dust_pack::{PackError, Packer};
use dust_system::{ComparableGenerator, Generator, GeneratorError, ZeroEvery};
use rand::Rng;
use rand_distr::{Binomial, Distribution};

use crate::density::poisson_log_density;

// Positions in the packed state.
pub const S: usize = 0;
pub const I: usize = 1;
pub const R: usize = 2;
pub const CASES_CUMUL: usize = 3;
pub const CASES_INC: usize = 4;

/// Parameters of one SIR group.
#[derive(Debug, Clone, PartialEq)]
pub struct SirShared {
    /// Population size.
    pub n: f64,
    /// Initially infected.
    pub i0: f64,
    /// Transmission rate.
    pub beta: f64,
    /// Recovery rate.
    pub gamma: f64,
    /// Period after which the incidence counter is reset, if any.
    pub incidence_period: Option<f64>,
}

impl SirShared {
    pub fn new(n: f64, i0: f64, beta: f64, gamma: f64) -> Self {
        Self {
            n,
            i0,
            beta,
            gamma,
            incidence_period: None,
        }
    }

    /// Resets the incidence counter every `period` time units.
    pub fn with_incidence_period(mut self, period: f64) -> Self {
        self.incidence_period = Some(period);
        self
    }
}

/// One observation of the number currently infected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SirData {
    pub prevalence: f64,
}

/// Chain-binomial SIR with cumulative and incidence case counters.
///
/// State: `[S, I, R, cases_cumul, cases_inc]`. Each step draws
///
/// ```text
/// n_SI ~ Binomial(S, 1 - exp(-beta * I / N * dt))
/// n_IR ~ Binomial(I, 1 - exp(-gamma * dt))
/// ```
///
/// in that order.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscreteSir;

impl Generator for DiscreteSir {
    type Shared = SirShared;
    type Internal = ();

    fn initial<Rn: Rng + ?Sized>(
        &self,
        _time: f64,
        shared: &SirShared,
        _internal: &(),
        state_next: &mut [f64],
        _rng: &mut Rn,
    ) -> Result<(), GeneratorError> {
        check_len(state_next.len())?;
        state_next[S] = shared.n - shared.i0;
        state_next[I] = shared.i0;
        state_next[R] = 0.0;
        state_next[CASES_CUMUL] = 0.0;
        state_next[CASES_INC] = 0.0;
        Ok(())
    }

    fn update<Rn: Rng + ?Sized>(
        &self,
        _time: f64,
        dt: f64,
        state: &[f64],
        shared: &SirShared,
        _internal: &(),
        state_next: &mut [f64],
        rng: &mut Rn,
    ) -> Result<(), GeneratorError> {
        check_len(state.len())?;
        check_len(state_next.len())?;
        let (s, i, r) = (state[S], state[I], state[R]);
        let p_si = 1.0 - (-shared.beta * i / shared.n * dt).exp();
        let p_ir = 1.0 - (-shared.gamma * dt).exp();
        let n_si = binomial(s, p_si, rng)?;
        let n_ir = binomial(i, p_ir, rng)?;
        state_next[S] = s - n_si;
        state_next[I] = i + n_si - n_ir;
        state_next[R] = r + n_ir;
        state_next[CASES_CUMUL] = state[CASES_CUMUL] + n_si;
        state_next[CASES_INC] = state[CASES_INC] + n_si;
        Ok(())
    }

    fn internal(&self, _shared: &SirShared) {}

    fn packing_state(&self, _shared: &SirShared) -> Result<Packer, PackError> {
        Packer::new([
            ("S", vec![]),
            ("I", vec![]),
            ("R", vec![]),
            ("cases_cumul", vec![]),
            ("cases_inc", vec![]),
        ])
    }

    fn zero_every(&self, shared: &SirShared) -> Vec<ZeroEvery> {
        shared
            .incidence_period
            .map(|period| vec![ZeroEvery::new(period, vec![CASES_INC])])
            .unwrap_or_default()
    }
}

impl ComparableGenerator for DiscreteSir {
    type Data = SirData;

    fn compare_data<Rn: Rng + ?Sized>(
        &self,
        _time: f64,
        state: &[f64],
        data: &SirData,
        _shared: &SirShared,
        _internal: &(),
        _rng: &mut Rn,
    ) -> f64 {
        poisson_log_density(data.prevalence, state[I])
    }
}

fn check_len(given: usize) -> Result<(), GeneratorError> {
    if given < 5 {
        return Err(GeneratorError::StateTooShort { required: 5, given });
    }
    Ok(())
}

fn binomial<Rn: Rng + ?Sized>(n: f64, p: f64, rng: &mut Rn) -> Result<f64, GeneratorError> {
    if !(n.is_finite() && n >= 0.0) {
        return Err(GeneratorError::Distribution {
            distribution: "binomial",
            reason: format!("size must be a non-negative count, but is {n}"),
        });
    }
    let dist = Binomial::new(n.round() as u64, p).map_err(|e| GeneratorError::Distribution {
        distribution: "binomial",
        reason: format!("{e} (p = {p})"),
    })?;
    Ok(dist.sample(rng) as f64)
}
