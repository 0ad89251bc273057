//! Simulate command: run the SIR model and summarise particle means.

use anyhow::{Context, Result, bail};
use ndarray::Axis;
use serde::Serialize;
use tracing::{info, info_span};

use dust_models::DiscreteSir;
use dust_state::SystemSimulateResult;
use dust_system::System;

use crate::cli::SimulateArgs;
use crate::{config, convert, output};

#[derive(Debug, Serialize)]
struct SimulateOutput {
    times: Vec<f64>,
    state_elements: Vec<String>,
    groups: Vec<GroupMeans>,
}

/// Particle means for one group, indexed `[time][state element]`.
#[derive(Debug, Serialize)]
struct GroupMeans {
    group: usize,
    mean: Vec<Vec<f64>>,
}

/// Run the simulation pipeline.
pub fn run(args: SimulateArgs) -> Result<()> {
    let _cmd = info_span!("simulate").entered();
    let config = config::load(&args.config)?;
    let shared = convert::build_shared(&config.model)?;
    convert::validate_run(&config.run)?;
    let times = &config.run.times;
    if times.is_empty() {
        bail!("no output times: set [run].times in config");
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
    info!(
        n_groups = system.n_groups(),
        n_particles = system.n_particles(),
        n_times = times.len(),
        "system built"
    );

    system
        .set_state_initial()
        .context("failed to initialise particles")?;
    let result = system.simulate(times, &[]).context("simulation failed")?;
    info!(time = system.time(), "simulation complete");

    let out = SimulateOutput {
        times: times.clone(),
        state_elements: system.state_packer().names().map(str::to_string).collect(),
        groups: particle_means(&result)
            .into_iter()
            .enumerate()
            .map(|(group, mean)| GroupMeans { group, mean })
            .collect(),
    };
    output::write_json(&out, args.output.as_deref())
}

/// Mean over particles, indexed `[group][time][state element]`.
fn particle_means(result: &SystemSimulateResult) -> Vec<Vec<Vec<f64>>> {
    let n_particles = result.n_particles() as f64;
    result
        .values()
        .outer_iter()
        .map(|group| {
            // [element, time] after summing out particles.
            let mean = group.sum_axis(Axis(0)) / n_particles;
            mean.columns()
                .into_iter()
                .map(|at_time| at_time.to_vec())
                .collect()
        })
        .collect()
}
