//! Dense particle state storage and result containers.
//!
//! | Type | Shape | Role |
//! |------|-------|------|
//! | [`SystemState`] | `[group, particle, element]` | Current state of every particle |
//! | [`SystemDataComparison`] | `[group, particle]` | Comparison (log-likelihood) values |
//! | [`SystemSimulateResult`] | `[group, particle, element, time]` | Recorded trajectories |
//!
//! All three validate every index and report the valid range in the error.
//!
//! # Quick start
//!
//! ```
//! use dust_state::SystemState;
//! use ndarray::array;
//!
//! let mut state = SystemState::new(1, 3, 2).unwrap();
//! state.set_particle(0, 0, &[1.0, 2.0]).unwrap();
//! state.set_particle(0, 1, &[3.0, 4.0]).unwrap();
//!
//! // Keep particle 1 twice and particle 0 once.
//! state.reorder(array![[1, 1, 0]].view()).unwrap();
//! assert_eq!(state.particle(0, 0).unwrap(), &[3.0, 4.0]);
//! assert_eq!(state.particle(0, 2).unwrap(), &[1.0, 2.0]);
//! ```

mod check;
mod comparison;
mod error;
mod simulate_result;
mod state;

pub use check::{check_at_least, check_index, resolve_indices};
pub use comparison::SystemDataComparison;
pub use error::StateError;
pub use simulate_result::SystemSimulateResult;
pub use state::{SystemState, SystemSubState};
