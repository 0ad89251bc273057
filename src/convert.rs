//! Pure conversion functions: TOML config structs -> crate API types.

use anyhow::{Result, bail};
use rand::SeedableRng;
use rand::rngs::StdRng;

use dust_models::{SirData, SirShared};

use crate::config::*;

/// Observations at one time, one entry per group or a single shared entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub time: f64,
    pub data: Vec<SirData>,
}

/// Converts the `[model]` section into per-group SIR parameters.
pub fn build_shared(model: &ModelToml) -> Result<Vec<SirShared>> {
    if model.groups.is_empty() {
        bail!("no model groups: add at least one [[model.groups]] entry");
    }
    model
        .groups
        .iter()
        .enumerate()
        .map(|(i, g)| build_group(i, g))
        .collect()
}

fn build_group(index: usize, g: &GroupToml) -> Result<SirShared> {
    if !(g.n > 0.0) {
        bail!("group {index}: n must be positive, got {}", g.n);
    }
    if !(0.0..=g.n).contains(&g.i0) {
        bail!("group {index}: i0 must be between 0 and n ({}), got {}", g.n, g.i0);
    }
    if !(g.beta >= 0.0) || !(g.gamma >= 0.0) {
        bail!(
            "group {index}: beta and gamma must be non-negative, got beta={} gamma={}",
            g.beta,
            g.gamma
        );
    }
    let shared = SirShared::new(g.n, g.i0, g.beta, g.gamma);
    match g.incidence_period {
        Some(p) if !(p > 0.0) => bail!("group {index}: incidence_period must be positive, got {p}"),
        Some(p) => Ok(shared.with_incidence_period(p)),
        None => Ok(shared),
    }
}

/// Checks the `[run]` section.
pub fn validate_run(run: &RunToml) -> Result<()> {
    if !(run.dt > 0.0) || !run.dt.is_finite() {
        bail!("run.dt must be positive and finite, got {}", run.dt);
    }
    if run.n_particles == 0 {
        bail!("run.n_particles must be at least 1");
    }
    if !run.time.is_finite() {
        bail!("run.time must be finite, got {}", run.time);
    }
    Ok(())
}

/// Converts `[[data]]` entries into observations.
///
/// Times must be strictly increasing and each prevalence must be a single
/// value or have one value per group.
pub fn build_observations(data: &[DataToml], n_groups: usize) -> Result<Vec<Observation>> {
    if data.windows(2).any(|w| !(w[0].time < w[1].time)) {
        bail!("data times must be strictly increasing");
    }
    data.iter()
        .map(|d| {
            let values = match &d.prevalence {
                PrevalenceToml::Shared(v) => vec![*v],
                PrevalenceToml::PerGroup(v) if v.len() == n_groups => v.clone(),
                PrevalenceToml::PerGroup(v) => bail!(
                    "data at time {}: expected 1 or {n_groups} prevalence values, got {}",
                    d.time,
                    v.len()
                ),
            };
            Ok(Observation {
                time: d.time,
                data: values
                    .into_iter()
                    .map(|prevalence| SirData { prevalence })
                    .collect(),
            })
        })
        .collect()
}

/// Seeded rng when a seed is given, otherwise seeded from the OS.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}
