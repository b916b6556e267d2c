//! Constructors and aggregation helpers for `SynthError`.

use camino::Utf8Path;

use super::{AggregatedErrors, SynthError};
use crate::tree::{ConstructKind, ConstructPath};

impl SynthError {
    /// Tries to build a [`SynthError`] from an iterator of errors.
    ///
    /// The iterator is consumed eagerly. It returns:
    /// * `None` when no errors are supplied;
    /// * the inner error when exactly one error is supplied; and
    /// * [`Self::Aggregate`] combining every error for two or more inputs.
    #[must_use]
    pub fn try_aggregate<I>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        let mut collected: Vec<Self> = errors.into_iter().collect();
        match collected.len() {
            0 => None,
            1 => collected.pop(),
            _ => Some(Self::Aggregate(Box::new(AggregatedErrors::new(collected)))),
        }
    }

    /// Build a [`SynthError`] from at least one error.
    ///
    /// # Panics
    ///
    /// Panics if `errors` is empty. Use [`SynthError::try_aggregate`] to avoid
    /// panicking when the error list may be empty.
    #[must_use]
    #[track_caller]
    pub fn aggregate<I>(errors: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::try_aggregate(errors).map_or_else(
            || panic!("aggregate requires at least one error"),
            |err| err,
        )
    }

    /// Construct an [`SynthError::InvalidNesting`] for a rejected attach.
    #[must_use]
    pub fn invalid_nesting(
        path: ConstructPath,
        kind: ConstructKind,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidNesting {
            path,
            kind,
            reason: reason.into(),
        }
    }

    /// Construct an [`SynthError::Io`] error for `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use construct_synth::SynthError;
    /// let io = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
    /// let e = SynthError::io(Utf8Path::new("cdktf.out"), io);
    /// assert!(matches!(e, SynthError::Io { .. }));
    /// ```
    #[must_use]
    pub fn io(path: &Utf8Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns `true` when the error reports a structural problem in the tree
    /// rather than a failure of an external collaborator.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::DuplicateId { .. }
                | Self::InvalidId { .. }
                | Self::InvalidNesting { .. }
                | Self::DuplicateResource { .. }
                | Self::UnknownNode(_)
        )
    }
}

impl From<figment::Error> for SynthError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}
