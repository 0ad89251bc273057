//! Integration tests running the discrete SIR model through a System.

use approx::assert_abs_diff_eq;
use dust_models::{DiscreteSir, SirData, SirShared, poisson_log_density};
use dust_system::{DataPoints, Generator, System, SystemError};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn shared() -> Vec<SirShared> {
    vec![
        SirShared::new(1e6, 1.0, 4.0, 2.0),
        SirShared::new(2e6, 2.0, 8.0, 4.0),
    ]
}

fn create_system(seed: u64) -> System<DiscreteSir, StdRng> {
    System::new(DiscreteSir, shared(), 5.0, 0.5, 3, StdRng::seed_from_u64(seed)).unwrap()
}

fn group_particles(sys: &System<DiscreteSir, StdRng>, group: usize) -> Vec<Vec<f64>> {
    (0..sys.n_particles())
        .map(|p| sys.state().particle(group, p).unwrap().to_vec())
        .collect()
}

#[test]
fn system_is_sized_from_the_model() {
    let sys = create_system(1);
    assert_eq!(sys.n_groups(), 2);
    assert_eq!(sys.n_particles(), 3);
    assert_eq!(sys.state_packer().len(), 5);
    assert_eq!(sys.state().n_state_elements(), 5);
    assert_eq!(sys.shared(), shared().as_slice());
    assert_eq!(sys.internal(), &[(), ()]);
}

#[test]
fn initial_state_per_group() {
    let mut sys = create_system(1);
    sys.set_state_initial().unwrap();
    for particle in group_particles(&sys, 0) {
        assert_eq!(particle, vec![999_999.0, 1.0, 0.0, 0.0, 0.0]);
    }
    for particle in group_particles(&sys, 1) {
        assert_eq!(particle, vec![1_999_998.0, 2.0, 0.0, 0.0, 0.0]);
    }
}

/// Running from t = 5 to t = 6 with dt = 0.5 matches two manual updates per
/// particle, drawn from an identically seeded rng in group-major order.
#[test]
fn advance_matches_manual_replay() {
    let mut sys = create_system(42);
    sys.set_state_initial().unwrap();
    sys.advance_to(6.0).unwrap();
    assert_eq!(sys.time(), 6.0);

    let mut rng = StdRng::seed_from_u64(42);
    for (g, params) in shared().iter().enumerate() {
        for p in 0..3 {
            let start = [params.n - params.i0, params.i0, 0.0, 0.0, 0.0];
            let mut step1 = [0.0; 5];
            let mut step2 = [0.0; 5];
            DiscreteSir
                .update(5.0, 0.5, &start, params, &(), &mut step1, &mut rng)
                .unwrap();
            DiscreteSir
                .update(5.5, 0.5, &step1, params, &(), &mut step2, &mut rng)
                .unwrap();
            assert_eq!(sys.state().particle(g, p).unwrap(), &step2);
        }
    }
}

#[test]
fn same_seed_same_trajectory() {
    let run = |seed| {
        let mut sys = create_system(seed);
        sys.set_state_initial().unwrap();
        sys.advance_to(10.0).unwrap();
        sys.state().as_slice().to_vec()
    };
    assert_eq!(run(7), run(7));
}

#[test]
fn advance_into_the_past_is_rejected() {
    let mut sys = create_system(1);
    sys.set_state_initial().unwrap();
    assert_eq!(
        sys.advance_to(1.0).unwrap_err().to_string(),
        "Cannot run to requested time 1, which is less than current time 5."
    );
}

#[test]
fn compare_initial_state_to_prevalence() {
    let mut sys = create_system(1);
    sys.set_state_initial().unwrap();
    let data = SirData { prevalence: 2.0 };
    let result = sys.compare_data(DataPoints::Shared(&data)).unwrap();

    for p in 0..3 {
        assert_abs_diff_eq!(
            result.value(0, p).unwrap(),
            poisson_log_density(2.0, 1.0),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            result.value(1, p).unwrap(),
            poisson_log_density(2.0, 2.0),
            epsilon = 1e-12
        );
    }
}

#[test]
fn compare_per_group_data() {
    let mut sys = create_system(1);
    sys.set_state_initial().unwrap();
    let data = vec![SirData { prevalence: 3.0 }, SirData { prevalence: 4.0 }];
    let result = sys.compare_data(&data).unwrap();
    assert_abs_diff_eq!(
        result.value(1, 2).unwrap(),
        poisson_log_density(4.0, 2.0),
        epsilon = 1e-12
    );

    let too_many = vec![SirData { prevalence: 1.0 }; 3];
    assert_eq!(
        sys.compare_data(&too_many).unwrap_err(),
        SystemError::DataLengthMismatch
    );
}

#[test]
fn simulate_records_every_time() {
    let mut sys = create_system(3);
    sys.set_state_initial().unwrap();
    let times: Vec<f64> = (5..=10).map(f64::from).collect();
    let result = sys.simulate(&times, &[0, 1, 2]).unwrap();
    assert_eq!(result.values().shape(), &[2, 3, 3, 6]);

    for g in 0..2 {
        let total = shared()[g].n;
        for p in 0..3 {
            for t in 0..times.len() {
                let sir = result.values_for_time(g, p, t).unwrap();
                assert_eq!(sir.sum(), total);
            }
            let recovered = result.state_element(g, p, 2).unwrap();
            assert!(recovered.windows(2).into_iter().all(|w| w[0] <= w[1]));
        }
    }
    assert_eq!(sys.time(), 10.0);
}

#[test]
fn incidence_resets_each_period() {
    let params = vec![SirShared::new(1e4, 100.0, 3.0, 1.0).with_incidence_period(1.0)];
    let mut sys = System::new(DiscreteSir, params, 0.0, 0.25, 5, StdRng::seed_from_u64(9)).unwrap();
    sys.set_state_initial().unwrap();

    let mut previous_cumulative = vec![0.0; 5];
    for day in 1..=5 {
        sys.advance_to(f64::from(day)).unwrap();
        for (p, prev) in previous_cumulative.iter_mut().enumerate() {
            let state = sys.state().particle(0, p).unwrap();
            // Incidence covers only the latest day.
            assert_eq!(state[4], state[3] - *prev);
            *prev = state[3];
        }
    }
}

#[test]
fn update_shared_keeps_state_layout() {
    let mut sys = create_system(1);
    let new = vec![
        SirShared::new(5e5, 10.0, 1.0, 1.0),
        SirShared::new(5e5, 20.0, 1.0, 1.0),
    ];
    sys.update_shared(&new).unwrap();
    sys.set_state_initial().unwrap();
    assert_eq!(sys.state().particle(1, 0).unwrap(), &[499_980.0, 20.0, 0.0, 0.0, 0.0]);
}
