//! Running configuration tests inside a `figment::Jail`.
//!
//! The jail gives each closure a fresh working directory and restores any
//! environment variables it sets, which is what configuration-layering tests
//! need to exercise `construct_synth.toml` and `CONSTRUCT_SYNTH_*` overrides.

use anyhow::{Result, anyhow};

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// # Errors
///
/// Returns an error if the jail cannot be set up or the closure fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        output = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Converts any displayable error into a [`figment::Error`], for use with `?`
/// inside jail closures.
#[expect(
    clippy::needless_pass_by_value,
    reason = "callers usually own the error they are converting"
)]
pub fn figment_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}
