use serde::{Deserialize, Serialize};

use crate::{
    error::ProteoformResult,
    lookup::{ModificationLookup, Resolution},
    sequence::{Descriptor, DescriptorKey},
};

/// A lookup that ignores all descriptors with one of the given keys, and leaves all others unresolved
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct IgnoreKeyLookup {
    keys: Vec<DescriptorKey>,
}

impl IgnoreKeyLookup {
    /// Ignore these keys
    pub fn new(keys: impl IntoIterator<Item = DescriptorKey>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// The ignored keys
    pub fn keys(&self) -> &[DescriptorKey] {
        &self.keys
    }
}

impl ModificationLookup for IgnoreKeyLookup {
    fn resolve_descriptor(&self, descriptor: &Descriptor) -> ProteoformResult<Resolution> {
        Ok(if self.keys.contains(&descriptor.key()) {
            tracing::trace!(%descriptor, "Ignoring descriptor");
            Resolution::Ignored
        } else {
            Resolution::Unresolved
        })
    }
}
