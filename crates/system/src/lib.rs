//! Generator traits and the discrete-time particle system.
//!
//! A model is written once as a [`Generator`]: how to initialise one
//! particle, how to advance it by one step, and how its state is laid out.
//! A [`System`] then runs that model over many particles in many groups,
//! each group with its own parameters.
//!
//! # Quick start
//!
//! ```
//! use dust_models::{DiscreteSir, SirData, SirShared};
//! use dust_system::{DataPoints, System};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let shared = vec![SirShared::new(1000.0, 10.0, 0.4, 0.1)];
//! let rng = StdRng::seed_from_u64(1);
//! let mut sys = System::new(DiscreteSir, shared, 0.0, 0.25, 100, rng).unwrap();
//! sys.set_state_initial().unwrap();
//! sys.advance_to(4.0).unwrap();
//!
//! let ll = sys.compare_data(DataPoints::Shared(&SirData { prevalence: 12.0 })).unwrap();
//! assert_eq!(ll.values().shape(), &[1, 100]);
//! ```
//!
//! # Architecture
//!
//! ```text
//! System::advance_to()
//!   ├─ n_steps()                      (times.rs)
//!   └─ SystemState::update_staged()   (dust-state)
//!        └─ per particle, per step
//!             ├─ zero-every resets    (times.rs)
//!             └─ Generator::update()  (generator.rs)
//! ```
//!
//! Every batch is staged and committed only if the generator succeeds for
//! all particles.

mod compare;
mod error;
mod generator;
mod system;
mod times;

pub use compare::DataPoints;
pub use error::{GeneratorError, SystemError};
pub use generator::{ComparableGenerator, Generator, ZeroEvery};
pub use system::System;
pub use times::{ZERO_EVERY_TOLERANCE, float_is_divisible_by};
