//! Systematic resampling of particle weights.
//!
//! [`resample`] turns one weight vector and one uniform draw into a
//! non-decreasing list of selected indices in O(n). [`resample_groups`] does
//! the same for every row of a `[group, particle]` weight matrix and returns
//! a reorder descriptor.
//!
//! # Quick start
//!
//! ```
//! use dust_resample::resample_groups;
//! use ndarray::array;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let weights = array![[0.1, 0.7, 0.2], [1.0, 1.0, 1.0]];
//! let mut rng = StdRng::seed_from_u64(42);
//! let reordering = resample_groups(weights.view(), &mut rng).unwrap();
//! assert_eq!(reordering.shape(), &[2, 3]);
//! assert_eq!(reordering.row(1).to_vec(), vec![0, 1, 2]);
//! ```

mod error;
mod systematic;

pub use error::ResampleError;
pub use systematic::{resample, resample_groups};
