//! Aggregation container for multiple `SynthError` values.

use std::{error::Error, fmt};

use super::SynthError;

/// Collection of [`SynthError`]s produced by a single validation pass.
///
/// # Examples
///
/// ```
/// use construct_synth::SynthError;
/// let e = SynthError::aggregate(vec![
///     SynthError::UnknownNode(7.into()),
///     SynthError::InvalidId { id: String::new(), reason: "empty".into() },
/// ]);
/// if let SynthError::Aggregate(agg) = e {
///     assert_eq!(agg.len(), 2);
/// }
/// ```
#[derive(Debug, Default)]
pub struct AggregatedErrors(Vec<SynthError>);

impl AggregatedErrors {
    /// Create a new aggregation from a vector of errors.
    #[must_use]
    pub const fn new(errors: Vec<SynthError>) -> Self {
        Self(errors)
    }

    /// Iterate over the contained errors.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> impl Iterator<Item = &SynthError> {
        self.0.iter()
    }

    /// Number of errors in the aggregation.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the aggregation holds no errors.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {e}", i + 1)?;
        }
        Ok(())
    }
}

impl Error for AggregatedErrors {}

impl<'a> IntoIterator for &'a AggregatedErrors {
    type Item = &'a SynthError;
    type IntoIter = std::slice::Iter<'a, SynthError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for AggregatedErrors {
    type Item = SynthError;
    type IntoIter = std::vec::IntoIter<SynthError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
