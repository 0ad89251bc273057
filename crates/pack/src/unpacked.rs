//! Output types for unpacking a flat buffer.

use ndarray::ArrayD;

/// A single unpacked value: a scalar, or an array of the declared shape.
#[derive(Debug, Clone, PartialEq)]
pub enum UnpackedValue {
    /// A value declared with an empty shape.
    Scalar(f64),
    /// A value declared with one or more dimensions, or any value unpacked
    /// with residual dimensions.
    Array(ArrayD<f64>),
}

impl UnpackedValue {
    /// Returns the scalar, if this is one.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            Self::Array(_) => None,
        }
    }

    /// Returns the array, if this is one.
    pub fn as_array(&self) -> Option<&ArrayD<f64>> {
        match self {
            Self::Scalar(_) => None,
            Self::Array(a) => Some(a),
        }
    }

    /// Shape of the value; empty for scalars.
    pub fn shape(&self) -> &[usize] {
        match self {
            Self::Scalar(_) => &[],
            Self::Array(a) => a.shape(),
        }
    }

    /// Number of flat values held.
    pub fn len(&self) -> usize {
        match self {
            Self::Scalar(_) => 1,
            Self::Array(a) => a.len(),
        }
    }

    /// Returns `true` if the value holds no numbers (an array with a zero-length axis).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends the values in row-major order.
    pub(crate) fn extend_into(&self, out: &mut Vec<f64>) {
        match self {
            Self::Scalar(v) => out.push(*v),
            Self::Array(a) => out.extend(a.iter().copied()),
        }
    }
}

impl From<f64> for UnpackedValue {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<ArrayD<f64>> for UnpackedValue {
    fn from(value: ArrayD<f64>) -> Self {
        Self::Array(value)
    }
}

/// Ordered mapping from value name to unpacked value.
///
/// Iteration order is the order in which names were declared in the packer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Unpacked {
    entries: Vec<(String, UnpackedValue)>,
}

impl Unpacked {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, replacing any existing value with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<UnpackedValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Looks up a value by name.
    pub fn get(&self, name: &str) -> Option<&UnpackedValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Iterates over `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &UnpackedValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of named values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no named values.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
