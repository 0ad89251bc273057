//! Named, shaped views over flat numeric buffers.
//!
//! A [`Packer`] is built from an ordered list of `(name, dims)` pairs. It
//! assigns each name a contiguous block in a flat `f64` buffer (row-major
//! within the block) and converts between that buffer and a name-addressed
//! [`Unpacked`] mapping.
//!
//! # Quick start
//!
//! ```
//! use dust_pack::{Packer, UnpackedValue};
//!
//! let packer = Packer::new([
//!     ("S", vec![]),
//!     ("I", vec![]),
//!     ("age", vec![2, 3]),
//! ])
//! .unwrap();
//! assert_eq!(packer.len(), 8);
//!
//! let x: Vec<f64> = (0..8).map(f64::from).collect();
//! let values = packer.unpack_array(&x).unwrap();
//! assert_eq!(values.get("I").and_then(UnpackedValue::as_scalar), Some(1.0));
//! assert_eq!(values.get("age").unwrap().shape(), &[2, 3]);
//!
//! assert_eq!(packer.pack(&values).unwrap(), x);
//! ```
//!
//! # Residual dimensions
//!
//! [`Packer::unpack_with_residual`] and [`Packer::unpack_ndarray`] treat the
//! first axis of a larger array as the packed axis, so a `[len, n_particles]`
//! matrix unpacks into per-name arrays of shape `[...dims, n_particles]`.

mod error;
mod packer;
mod unpacked;

pub use error::PackError;
pub use packer::{IndexRange, Packer};
pub use unpacked::{Unpacked, UnpackedValue};
