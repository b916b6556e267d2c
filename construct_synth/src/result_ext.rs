//! Extensions for mapping foreign errors to `SynthResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| SynthError::…(e))` patterns
//! when converting external error types into the crate's `SynthResult<T>`
//! alias.
//!
//! # Examples
//!
//! ```
//! use construct_synth::{SynthResult, SynthResultExt};
//!
//! fn render() -> SynthResult<String> {
//!     // serde_json::Error implements Into<SynthError>
//!     serde_json::to_string(&42).into_synth()
//! }
//! ```

use crate::{SynthError, SynthResult};

/// Generic extension for mapping any `Result<T, E>` with `E: Into<SynthError>`
/// into a `SynthResult<T>`.
pub trait SynthResultExt<T, E> {
    /// Convert `Result<T, E>` into `SynthResult<T>` using `Into<SynthError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into [`SynthError`].
    fn into_synth(self) -> SynthResult<T>;
}

impl<T, E> SynthResultExt<T, E> for Result<T, E>
where
    E: Into<SynthError>,
{
    fn into_synth(self) -> SynthResult<T> {
        self.map_err(Into::into)
    }
}
