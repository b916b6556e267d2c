//! Index of the synthesized stacks, written next to their documents.

use camino::{Utf8Path, Utf8PathBuf};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::synthesizer::Synthesis;

/// File name of the manifest below the output directory.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";
/// Directory below the output directory holding one folder per stack.
pub const STACKS_DIR: &str = "stacks";
/// File name of each stack document.
pub const STACK_FILE_NAME: &str = "cdk.tf.json";

/// Manifest entry describing one synthesized stack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackManifest {
    /// Stack id.
    pub name: String,
    /// Construct path of the stack.
    pub construct_path: String,
    /// Directory of the stack, relative to the output directory.
    pub working_directory: Utf8PathBuf,
    /// Document path, relative to the output directory.
    pub synthesized_stack_path: Utf8PathBuf,
}

impl StackManifest {
    /// Entry for `stack_id` using the standard output layout.
    #[must_use]
    pub fn for_stack(stack_id: &str) -> Self {
        let working_directory = Utf8Path::new(STACKS_DIR).join(stack_id);
        let synthesized_stack_path = working_directory.join(STACK_FILE_NAME);
        Self {
            name: stack_id.to_owned(),
            construct_path: stack_id.to_owned(),
            working_directory,
            synthesized_stack_path,
        }
    }
}

/// Manifest of one synthesis run.
///
/// ```
/// use construct_synth::Manifest;
/// let manifest = Manifest::new(["network", "app"]);
/// let json = serde_json::to_value(&manifest)?;
/// assert_eq!(json["stacks"]["app"]["synthesizedStackPath"], "stacks/app/cdk.tf.json");
/// # Ok::<_, serde_json::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Manifest {
    /// Version of the crate that produced the manifest.
    pub version: String,
    /// Stack entries in stack creation order, serialised keyed by name.
    #[serde(serialize_with = "stacks_by_name")]
    pub stacks: Vec<StackManifest>,
}

impl Manifest {
    /// Manifest listing `stack_ids` in the given order.
    #[must_use]
    pub fn new<'a>(stack_ids: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_owned(),
            stacks: stack_ids.into_iter().map(StackManifest::for_stack).collect(),
        }
    }

    /// Manifest for every stack of `synthesis`.
    #[must_use]
    pub fn for_synthesis(synthesis: &Synthesis) -> Self {
        Self::new(synthesis.stack_ids())
    }

    /// Entry of `stack_id`.
    #[must_use]
    pub fn stack(&self, stack_id: &str) -> Option<&StackManifest> {
        self.stacks.iter().find(|entry| entry.name == stack_id)
    }
}

fn stacks_by_name<S: Serializer>(stacks: &[StackManifest], serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(stacks.len()))?;
    for entry in stacks {
        map.serialize_entry(&entry.name, entry)?;
    }
    map.end()
}
