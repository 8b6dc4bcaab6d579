use crate::{
    error::ProteoformResult,
    lookup::{ModificationLookup, Resolution},
    sequence::Descriptor,
};

/// An ordered chain of lookups. For every descriptor the lookups are tried in order, the first
/// lookup that resolves it or fails on it decides the outcome. A lookup that ignores the
/// descriptor does not stop the chain, but if no later lookup resolves it the descriptor is
/// ignored. Only if all lookups leave the descriptor unresolved the composite leaves it
/// unresolved as well.
#[derive(Debug, Default)]
pub struct CompositeLookup {
    lookups: Vec<Box<dyn ModificationLookup>>,
}

impl CompositeLookup {
    /// Create a chain from the given lookups, in order of priority
    pub fn new(lookups: Vec<Box<dyn ModificationLookup>>) -> Self {
        Self { lookups }
    }

    /// Add a lookup at the end of the chain
    #[must_use]
    pub fn with(mut self, lookup: impl ModificationLookup + 'static) -> Self {
        self.lookups.push(Box::new(lookup));
        self
    }

    /// The number of lookups in the chain
    pub fn len(&self) -> usize {
        self.lookups.len()
    }

    /// Check if the chain is empty
    pub fn is_empty(&self) -> bool {
        self.lookups.is_empty()
    }
}

impl ModificationLookup for CompositeLookup {
    fn resolve_descriptor(&self, descriptor: &Descriptor) -> ProteoformResult<Resolution> {
        let mut outcome = Resolution::Unresolved;
        for lookup in &self.lookups {
            match lookup.resolve_descriptor(descriptor)? {
                Resolution::Unresolved => (),
                Resolution::Ignored => outcome = Resolution::Ignored,
                resolved @ Resolution::Resolved(_) => return Ok(resolved),
            }
        }
        Ok(outcome)
    }
}

#[cfg(test)]
#[expect(clippy::missing_panics_doc)]
mod tests {
    use std::sync::Arc;

    use context_error::FullErrorContent;

    use super::CompositeLookup;
    use crate::{
        ProteoformError,
        lookup::{
            IgnoreKeyLookup, MassLookup, ModificationLookup, NamedVocabularyLookup, Resolution,
            Vocabulary, VocabularyEntry,
        },
        sequence::{Descriptor, DescriptorKey, EvidenceType},
    };

    #[test]
    fn disjoint_ignores() {
        let lookup = CompositeLookup::new(vec![
            Box::new(IgnoreKeyLookup::new([DescriptorKey::Info])),
            Box::new(IgnoreKeyLookup::new([DescriptorKey::Observed])),
        ]);
        assert_eq!(lookup.len(), 2);
        assert_eq!(
            lookup
                .resolve(&[
                    Descriptor::keyed(DescriptorKey::Info, "text"),
                    Descriptor::keyed(DescriptorKey::Observed, "+15.995"),
                ])
                .unwrap(),
            Resolution::Ignored
        );
        assert_eq!(
            lookup
                .resolve(&[Descriptor::keyed(DescriptorKey::Mass, "+15.995")])
                .unwrap(),
            Resolution::Unresolved
        );
    }

    #[test]
    fn resolved_wins_over_ignored() {
        let lookup = CompositeLookup::default()
            .with(IgnoreKeyLookup::new([DescriptorKey::Mass]))
            .with(MassLookup);
        assert!(matches!(
            lookup
                .resolve_descriptor(&Descriptor::keyed(DescriptorKey::Mass, "+15.995"))
                .unwrap(),
            Resolution::Resolved(_)
        ));
        assert!(matches!(
            lookup
                .resolve(&[Descriptor::keyed(DescriptorKey::Mass, "+15.995")])
                .unwrap(),
            Resolution::Resolved(_)
        ));
        assert_eq!(
            lookup
                .resolve_descriptor(&Descriptor::keyed(DescriptorKey::Info, "text"))
                .unwrap(),
            Resolution::Unresolved
        );
        let lookup = CompositeLookup::default()
            .with(IgnoreKeyLookup::new([DescriptorKey::Info]))
            .with(MassLookup);
        assert_eq!(
            lookup
                .resolve_descriptor(&Descriptor::keyed(DescriptorKey::Info, "text"))
                .unwrap(),
            Resolution::Ignored
        );
        let lookup = CompositeLookup::default()
            .with(MassLookup)
            .with(IgnoreKeyLookup::new([DescriptorKey::Mass]));
        assert!(matches!(
            lookup
                .resolve_descriptor(&Descriptor::keyed(DescriptorKey::Mass, "+15.995"))
                .unwrap(),
            Resolution::Resolved(_)
        ));
    }

    #[test]
    fn hard_failure_is_not_delegated() {
        let vocabulary = Arc::new(
            Vocabulary::new(EvidenceType::Unimod, [VocabularyEntry::new(
                "Oxidation",
                "35",
                "O1",
            )])
            .unwrap(),
        );
        let lookup = CompositeLookup::default()
            .with(NamedVocabularyLookup::new(vocabulary.clone()).as_default())
            .with(IgnoreKeyLookup::new([DescriptorKey::Name]));
        let error = lookup
            .resolve_descriptor(&Descriptor::name(EvidenceType::None, "Oxidatoin"))
            .unwrap_err();
        assert_eq!(error.get_kind(), ProteoformError::LookupError);
        let lookup = CompositeLookup::default()
            .with(IgnoreKeyLookup::new([DescriptorKey::Name]))
            .with(NamedVocabularyLookup::new(vocabulary).as_default());
        let error = lookup
            .resolve_descriptor(&Descriptor::name(EvidenceType::None, "Oxidatoin"))
            .unwrap_err();
        assert_eq!(error.get_kind(), ProteoformError::LookupError);
        assert!(CompositeLookup::default().is_empty());
    }
}
