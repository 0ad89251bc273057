//! Reference generators for the dust particle system.
//!
//! | Model | State | Comparable |
//! |-------|-------|------------|
//! | [`DiscreteSir`] | `[S, I, R, cases_cumul, cases_inc]` | Poisson on prevalence |
//! | [`DiscreteWalk`] | `values[n]` | No |

mod density;
mod sir;
mod walk;

pub use density::poisson_log_density;
pub use sir::{DiscreteSir, SirData, SirShared};
pub use walk::{DiscreteWalk, WalkShared};
