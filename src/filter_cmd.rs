//! Filter command: bootstrap particle filter for the SIR model.

use anyhow::{Context, Result, bail};
use ndarray::Array2;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, info_span};

use dust_models::DiscreteSir;
use dust_resample::resample_groups;
use dust_system::System;

use crate::cli::FilterArgs;
use crate::convert::Observation;
use crate::{config, convert, output};

#[derive(Debug, Serialize)]
struct FilterOutput {
    /// Log-likelihood per group.
    log_likelihood: Vec<f64>,
    /// Sum over groups.
    total: f64,
}

/// Run the particle filter pipeline.
pub fn run(args: FilterArgs) -> Result<()> {
    let _cmd = info_span!("filter").entered();
    let config = config::load(&args.config)?;
    let shared = convert::build_shared(&config.model)?;
    convert::validate_run(&config.run)?;
    let observations = convert::build_observations(&config.data, shared.len())?;
    if observations.is_empty() {
        bail!("no observations: add at least one [[data]] entry");
    }

    let rng = convert::make_rng(args.seed.or(config.seed));
    let mut system = System::new(
        DiscreteSir,
        shared,
        config.run.time,
        config.run.dt,
        config.run.n_particles,
        rng,
    )
    .context("failed to build system")?;
    system
        .set_state_initial()
        .context("failed to initialise particles")?;

    info!(
        n_groups = system.n_groups(),
        n_particles = system.n_particles(),
        n_data = observations.len(),
        "running particle filter"
    );
    let log_likelihood = run_filter(&mut system, &observations)?;
    let total: f64 = log_likelihood.iter().sum();
    info!(total, "filter complete");

    output::write_json(
        &FilterOutput {
            log_likelihood,
            total,
        },
        args.output.as_deref(),
    )
}

/// Runs the bootstrap filter over `observations`, returning the
/// log-likelihood of each group.
///
/// At each observation the particles are advanced, scored, and resampled in
/// proportion to their likelihood. The per-step contribution of a group is
/// the log of the mean particle likelihood.
pub fn run_filter<R: Rng>(
    system: &mut System<DiscreteSir, R>,
    observations: &[Observation],
) -> Result<Vec<f64>> {
    let mut log_likelihood = vec![0.0; system.n_groups()];
    let n_particles = system.n_particles() as f64;

    for obs in observations {
        system
            .advance_to(obs.time)
            .with_context(|| format!("failed to advance to time {}", obs.time))?;
        let comparison = system
            .compare_data(&obs.data)
            .with_context(|| format!("failed to compare data at time {}", obs.time))?;

        let values = comparison.values();
        let mut weights = Array2::<f64>::zeros(values.raw_dim());
        for (group, row) in values.outer_iter().enumerate() {
            let max = row.fold(f64::NEG_INFINITY, |acc, &x| acc.max(x));
            if max == f64::NEG_INFINITY {
                bail!(
                    "every particle in group {group} is impossible given the data at time {}",
                    obs.time
                );
            }
            let w = row.mapv(|x| (x - max).exp());
            log_likelihood[group] += max + (w.sum() / n_particles).ln();
            weights.row_mut(group).assign(&w);
        }

        let index = resample_groups(weights.view(), system.rng_mut())
            .with_context(|| format!("failed to resample at time {}", obs.time))?;
        system.reorder(index.view())?;
        debug!(time = obs.time, ?log_likelihood, "filtered observation");
    }
    Ok(log_likelihood)
}
