//! Data arguments for comparison.

use crate::error::SystemError;

/// Observations passed to [`System::compare_data`](crate::System::compare_data).
#[derive(Debug)]
pub enum DataPoints<'a, D> {
    /// One observation used for every group.
    Shared(&'a D),
    /// One observation per group. A single-element slice is used for every group.
    PerGroup(&'a [D]),
}

impl<D> Clone for DataPoints<'_, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for DataPoints<'_, D> {}

impl<'a, D> DataPoints<'a, D> {
    /// Checks the data against the number of groups.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::DataLengthMismatch`] if a multi-element
    /// `PerGroup` slice does not have `n_groups` entries, or if it is empty.
    pub fn check(self, n_groups: usize) -> Result<Self, SystemError> {
        match self {
            Self::PerGroup([single]) => Ok(Self::Shared(single)),
            Self::PerGroup(data) if data.len() != n_groups => Err(SystemError::DataLengthMismatch),
            other => Ok(other),
        }
    }

    /// The observation for `group`. Only valid after [`check`](Self::check).
    pub(crate) fn for_group(&self, group: usize) -> &'a D {
        match *self {
            Self::Shared(d) => d,
            Self::PerGroup(data) => &data[group],
        }
    }
}

impl<'a, D> From<&'a [D]> for DataPoints<'a, D> {
    fn from(data: &'a [D]) -> Self {
        Self::PerGroup(data)
    }
}

impl<'a, D> From<&'a Vec<D>> for DataPoints<'a, D> {
    fn from(data: &'a Vec<D>) -> Self {
        Self::PerGroup(data.as_slice())
    }
}
