//! Application-wide settings owned by the construct tree.
//!
//! Settings are layered with `figment`, lowest precedence first: built-in
//! defaults, `construct_synth.toml` in the working directory, then
//! environment variables prefixed with `CONSTRUCT_SYNTH_`.

use camino::Utf8PathBuf;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::{SynthOptions, SynthResult, SynthResultExt};

/// Configuration file read by [`AppConfig::load`].
pub const CONFIG_FILE_NAME: &str = "construct_synth.toml";
/// Prefix of the environment variables read by [`AppConfig::load`].
pub const CONFIG_ENV_PREFIX: &str = "CONSTRUCT_SYNTH_";

/// Settings shared by every construct of an app.
///
/// ```
/// use construct_synth::AppConfig;
/// let config = AppConfig::default();
/// assert_eq!(config.outdir, "cdktf.out");
/// assert!(!config.emit_metadata);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory receiving the synthesized artefacts.
    pub outdir: Utf8PathBuf,
    /// Emit `//` metadata blocks into the documents.
    pub emit_metadata: bool,
    /// Pretty-print documents when writing them.
    pub pretty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            outdir: Utf8PathBuf::from("cdktf.out"),
            emit_metadata: false,
            pretty: true,
        }
    }
}

impl AppConfig {
    /// Figment holding the standard layers.
    #[must_use]
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE_NAME))
            .merge(Env::prefixed(CONFIG_ENV_PREFIX))
    }

    /// Load the configuration from the standard layers.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SynthError::Config`] when a layer cannot be parsed
    /// or holds a value of the wrong type.
    pub fn load() -> SynthResult<Self> {
        Self::load_from(Self::figment())
    }

    /// Load the configuration from a caller-built figment.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SynthError::Config`] when extraction fails.
    pub fn load_from(figment: Figment) -> SynthResult<Self> {
        let config: Self = figment.extract().into_synth()?;
        tracing::debug!(
            outdir = %config.outdir,
            emit_metadata = config.emit_metadata,
            "loaded configuration"
        );
        Ok(config)
    }

    /// Synthesis switches derived from this configuration.
    #[must_use]
    pub fn synth_options(&self) -> SynthOptions {
        SynthOptions::from(self)
    }
}
