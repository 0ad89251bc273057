//! Mapping between named, shaped values and a flat buffer.

use std::ops::Range;

use ndarray::{ArrayD, ArrayViewD, IxDyn};

use crate::error::PackError;
use crate::unpacked::Unpacked;

/// Location of one named value inside the packed buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRange {
    /// Offset of the first element.
    pub start: usize,
    /// Number of elements.
    pub length: usize,
}

impl IndexRange {
    /// The half-open range `start..start + length`.
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.length
    }
}

#[derive(Debug, Clone, PartialEq)]
struct PackedValue {
    name: String,
    shape: Vec<usize>,
    index: IndexRange,
}

impl PackedValue {
    fn is_scalar(&self) -> bool {
        self.shape.is_empty()
    }
}

/// Named, shaped layout of a flat `f64` buffer.
///
/// Built once from an ordered list of `(name, dims)` pairs, where empty
/// `dims` declares a scalar. Values are laid out contiguously in declaration
/// order, each in row-major order.
///
/// # Example
///
/// ```
/// use dust_pack::Packer;
///
/// let packer = Packer::new([("a", vec![]), ("X", vec![3])]).unwrap();
/// assert_eq!(packer.len(), 4);
///
/// let unpacked = packer.unpack_array(&[1.0, 10.0, 20.0, 30.0]).unwrap();
/// assert_eq!(unpacked.get("a").unwrap().as_scalar(), Some(1.0));
/// assert_eq!(unpacked.get("X").unwrap().shape(), &[3]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Packer {
    values: Vec<PackedValue>,
    len: usize,
}

impl Packer {
    /// Builds a packer from an ordered shape.
    ///
    /// # Errors
    ///
    /// - [`PackError::InvalidDimension`] if any dimension is zero.
    /// - [`PackError::DuplicateName`] if a name appears twice.
    /// - [`PackError::EmptyPacker`] if the shape has no entries.
    pub fn new<I, S>(shape: I) -> Result<Self, PackError>
    where
        I: IntoIterator<Item = (S, Vec<usize>)>,
        S: Into<String>,
    {
        let mut values: Vec<PackedValue> = Vec::new();
        let mut len = 0;
        for (name, dims) in shape {
            let name = name.into();
            if dims.contains(&0) {
                return Err(PackError::InvalidDimension { name, shape: dims });
            }
            if values.iter().any(|v| v.name == name) {
                return Err(PackError::DuplicateName { name });
            }
            let length: usize = dims.iter().product();
            values.push(PackedValue {
                name,
                shape: dims,
                index: IndexRange { start: len, length },
            });
            len += length;
        }

        if len == 0 {
            return Err(PackError::EmptyPacker);
        }
        Ok(Self { values, len })
    }

    /// Total number of flat values.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: construction rejects empty layouts.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Value names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|v| v.name.as_str())
    }

    /// Declared shape of a named value.
    pub fn shape_of(&self, name: &str) -> Option<&[usize]> {
        self.find(name).map(|v| v.shape.as_slice())
    }

    /// Location of a named value in the flat buffer.
    pub fn index_of(&self, name: &str) -> Option<IndexRange> {
        self.find(name).map(|v| v.index)
    }

    /// Unpacks a flat vector of exactly [`len`](Self::len) values.
    ///
    /// Scalars come back as [`UnpackedValue::Scalar`](crate::UnpackedValue::Scalar),
    /// everything else as an array with the declared shape.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::IncorrectLength`] if `x.len() != self.len()`.
    pub fn unpack_array(&self, x: &[f64]) -> Result<Unpacked, PackError> {
        if x.len() != self.len {
            return Err(PackError::IncorrectLength {
                expected: self.len,
                given: x.len(),
            });
        }

        let mut result = Unpacked::new();
        for value in &self.values {
            let range = value.index.range();
            if value.is_scalar() {
                result.insert(value.name.as_str(), x[range.start]);
            } else {
                let array = shaped(&value.name, &value.shape, x[range].to_vec())?;
                result.insert(value.name.as_str(), array);
            }
        }
        Ok(result)
    }

    /// Unpacks a row-major buffer of shape `[len, ...residual]`.
    ///
    /// Each named value is the contiguous block of rows it occupies along
    /// the packed axis, returned with shape `[...declared, ...residual]`
    /// (scalars drop their own, empty, shape). With empty `residual` this is
    /// [`unpack_array`](Self::unpack_array).
    ///
    /// # Errors
    ///
    /// Returns [`PackError::IncorrectLength`] if `x.len()` is not
    /// `len * product(residual)`.
    pub fn unpack_with_residual(
        &self,
        x: &[f64],
        residual: &[usize],
    ) -> Result<Unpacked, PackError> {
        if residual.is_empty() {
            return self.unpack_array(x);
        }
        let stride: usize = residual.iter().product();
        let expected = self.len * stride;
        if x.len() != expected {
            return Err(PackError::IncorrectLength {
                expected,
                given: x.len(),
            });
        }

        let mut result = Unpacked::new();
        for value in &self.values {
            let begin = value.index.start * stride;
            let end = begin + value.index.length * stride;
            let mut shape = value.shape.clone();
            shape.extend_from_slice(residual);
            let array = shaped(&value.name, &shape, x[begin..end].to_vec())?;
            result.insert(value.name.as_str(), array);
        }
        Ok(result)
    }

    /// Unpacks an n-dimensional array whose first axis is the packed axis.
    ///
    /// One-dimensional input behaves exactly like
    /// [`unpack_array`](Self::unpack_array).
    ///
    /// # Errors
    ///
    /// Returns [`PackError::IncorrectLength`] if the first axis does not
    /// have length [`len`](Self::len).
    pub fn unpack_ndarray(&self, x: ArrayViewD<'_, f64>) -> Result<Unpacked, PackError> {
        let (leading, residual) = match x.shape().split_first() {
            Some((&leading, residual)) => (leading, residual),
            None => (1, &[][..]),
        };
        if leading != self.len {
            return Err(PackError::IncorrectLength {
                expected: self.len,
                given: leading,
            });
        }
        let flat: Vec<f64> = x.iter().copied().collect();
        self.unpack_with_residual(&flat, residual)
    }

    /// Packs named values back into a flat vector, in declaration order.
    ///
    /// Extra names in `values` are ignored.
    ///
    /// # Errors
    ///
    /// - [`PackError::MissingValue`] if a declared name is absent.
    /// - [`PackError::ShapeMismatch`] if a value's shape differs from the declared one.
    pub fn pack(&self, values: &Unpacked) -> Result<Vec<f64>, PackError> {
        let mut out = Vec::with_capacity(self.len);
        for value in &self.values {
            let given = values.get(&value.name).ok_or_else(|| PackError::MissingValue {
                name: value.name.clone(),
            })?;
            if given.shape() != value.shape.as_slice() {
                return Err(PackError::ShapeMismatch {
                    name: value.name.clone(),
                    expected: value.shape.clone(),
                    given: given.shape().to_vec(),
                });
            }
            given.extend_into(&mut out);
        }
        Ok(out)
    }

    fn find(&self, name: &str) -> Option<&PackedValue> {
        self.values.iter().find(|v| v.name == name)
    }
}

fn shaped(name: &str, shape: &[usize], values: Vec<f64>) -> Result<ArrayD<f64>, PackError> {
    let given = values.len();
    ArrayD::from_shape_vec(IxDyn(shape), values).map_err(|_| PackError::ShapeMismatch {
        name: name.to_string(),
        expected: shape.to_vec(),
        given: vec![given],
    })
}
