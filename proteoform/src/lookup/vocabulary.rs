//! Controlled vocabularies and the lookups that resolve names and accessions in them

use std::{path::Path, sync::Arc};

use context_error::{BoxedError, Context, CreateError};
use serde::{Deserialize, Serialize};

use crate::{
    chemistry::MolecularFormula,
    error::{ProteoformError, ProteoformResult},
    lookup::{ModificationDelta, ModificationLookup, Resolution},
    sequence::{Descriptor, DescriptorKey, EvidenceType},
};

/// A single modification in a vocabulary, as read from a vocabulary file. The formula is written
/// in ProForma formula notation.
/// ```json
/// {"name": "Oxidation", "accession": "UNIMOD:35", "formula": "O1"}
/// ```
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct VocabularyEntry {
    /// The modification name
    pub name: String,
    /// The accession, with or without vocabulary prefix
    pub accession: String,
    /// The formula in ProForma notation
    pub formula: String,
}

impl VocabularyEntry {
    /// Create a new entry
    pub fn new(
        name: impl Into<String>,
        accession: impl Into<String>,
        formula: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            accession: accession.into(),
            formula: formula.into(),
        }
    }
}

impl From<&(&str, &str, &str)> for VocabularyEntry {
    fn from(value: &(&str, &str, &str)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

/// An immutable name and accession table for one vocabulary
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Vocabulary {
    evidence: EvidenceType,
    /// (name, normalised accession, formula)
    entries: Vec<(Box<str>, Box<str>, MolecularFormula)>,
}

impl Vocabulary {
    /// Build a vocabulary from the given entries.
    /// # Errors
    /// A [`ProteoformError::InvalidVocabulary`] if any formula is invalid, or if a name or accession
    /// is used twice.
    pub fn new(
        evidence: EvidenceType,
        entries: impl IntoIterator<Item = VocabularyEntry>,
    ) -> ProteoformResult<Self> {
        let mut result = Self {
            evidence,
            entries: Vec::new(),
        };
        for entry in entries {
            let formula = MolecularFormula::pro_forma(&entry.formula).map_err(|err| {
                BoxedError::new(
                    ProteoformError::InvalidVocabulary,
                    "Invalid vocabulary entry",
                    format!("The formula for '{}' is invalid", entry.name),
                    Context::show(entry.formula.clone()),
                )
                .add_underlying_errors(vec![err])
            })?;
            let accession = normalise_accession(evidence, &entry.accession);
            if result.find_name(&entry.name).is_some() {
                return Err(BoxedError::new(
                    ProteoformError::InvalidVocabulary,
                    "Invalid vocabulary entry",
                    format!("The name is defined multiple times in {evidence}"),
                    Context::show(entry.name),
                ));
            }
            if result.find_accession(&accession).is_some() {
                return Err(BoxedError::new(
                    ProteoformError::InvalidVocabulary,
                    "Invalid vocabulary entry",
                    format!("The accession is defined multiple times in {evidence}"),
                    Context::show(entry.accession),
                ));
            }
            result
                .entries
                .push((entry.name.into_boxed_str(), accession.into_boxed_str(), formula));
        }
        tracing::debug!(%evidence, entries = result.entries.len(), "Built vocabulary");
        Ok(result)
    }

    /// Build a vocabulary from a JSON list of [`VocabularyEntry`].
    /// # Errors
    /// A [`ProteoformError::InvalidVocabulary`] if the JSON is invalid, or see [`Self::new`].
    pub fn from_json(evidence: EvidenceType, json: &str) -> ProteoformResult<Self> {
        let entries: Vec<VocabularyEntry> = serde_json::from_str(json).map_err(|err| {
            BoxedError::new(
                ProteoformError::InvalidVocabulary,
                "Invalid vocabulary file",
                err.to_string(),
                Context::show(
                    json.lines()
                        .nth(err.line().saturating_sub(1))
                        .unwrap_or_default()
                        .to_string(),
                ),
            )
        })?;
        Self::new(evidence, entries)
    }

    /// Build a vocabulary from a JSON file holding a list of [`VocabularyEntry`].
    /// # Errors
    /// A [`ProteoformError::InvalidVocabulary`] if the file could not be read, or see [`Self::from_json`].
    pub fn from_json_file(evidence: EvidenceType, path: impl AsRef<Path>) -> ProteoformResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|err| {
            BoxedError::new(
                ProteoformError::InvalidVocabulary,
                "Could not read vocabulary file",
                err.to_string(),
                Context::show(path.to_string_lossy().to_string()),
            )
        })?;
        Self::from_json(evidence, &json)
    }

    /// The vocabulary
    pub const fn evidence(&self) -> EvidenceType {
        self.evidence
    }

    /// The number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the formula for a name (case insensitive)
    pub fn find_name(&self, name: &str) -> Option<&MolecularFormula> {
        self.entries
            .iter()
            .find(|(n, _, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, _, f)| f)
    }

    /// Find the formula for an accession, the accession is normalised before lookup
    pub fn find_accession(&self, accession: &str) -> Option<&MolecularFormula> {
        let accession = normalise_accession(self.evidence, accession);
        self.entries
            .iter()
            .find(|(_, a, _)| a.eq_ignore_ascii_case(&accession))
            .map(|(_, _, f)| f)
    }

    /// Get the closest similar names in this vocabulary
    pub fn similar_names(&self, name: &str) -> Vec<String> {
        let options: Vec<&str> = self.entries.iter().map(|(n, _, _)| n.as_ref()).collect();
        similar::get_close_matches(name, &options, 3, 0.7)
            .iter()
            .map(|o| {
                self.evidence
                    .char()
                    .map_or_else(|| (*o).to_string(), |c| format!("{c}:{o}"))
            })
            .collect()
    }
}

/// Normalise an accession: strip the vocabulary prefix (`UNIMOD:35` to `35`) and leading zeros of
/// fully numeric accessions (`00046` to `46`).
fn normalise_accession(evidence: EvidenceType, accession: &str) -> String {
    let accession = accession.trim();
    let accession = evidence
        .accession_prefix()
        .and_then(|prefix| {
            accession
                .split_once(':')
                .filter(|(p, _)| p.eq_ignore_ascii_case(prefix))
                .map(|(_, rest)| rest)
        })
        .unwrap_or(accession);
    if !accession.is_empty() && accession.bytes().all(|b| b.is_ascii_digit()) {
        let trimmed = accession.trim_start_matches('0');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        accession.to_string()
    }
}

/// Resolves modification names in one vocabulary
#[derive(Clone, Debug)]
pub struct NamedVocabularyLookup {
    vocabulary: Arc<Vocabulary>,
    is_default: bool,
}

impl NamedVocabularyLookup {
    /// Resolve names with this vocabulary's evidence type
    pub const fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self {
            vocabulary,
            is_default: false,
        }
    }

    /// Also claim names without evidence type (`Oxidation` instead of `U:Oxidation`)
    #[must_use]
    pub const fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// The vocabulary used
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    fn claims(&self, descriptor: &Descriptor) -> bool {
        descriptor.key() == DescriptorKey::Name
            && (descriptor.evidence() == self.vocabulary.evidence
                || (self.is_default && descriptor.evidence() == EvidenceType::None))
    }
}

impl ModificationLookup for NamedVocabularyLookup {
    fn resolve_descriptor(&self, descriptor: &Descriptor) -> ProteoformResult<Resolution> {
        if !self.claims(descriptor) {
            return Ok(Resolution::Unresolved);
        }
        self.vocabulary
            .find_name(descriptor.value())
            .map(|formula| {
                Resolution::Resolved(ModificationDelta::new(formula.clone(), descriptor.clone()))
            })
            .ok_or_else(|| {
                BoxedError::new(
                    ProteoformError::LookupError,
                    "Invalid modification",
                    format!(
                        "The provided name does not exist in {}",
                        self.vocabulary.evidence
                    ),
                    Context::show(descriptor.value().to_string()),
                )
                .suggestions(self.vocabulary.similar_names(descriptor.value()))
            })
    }
}

/// Resolves accessions in one vocabulary
#[derive(Clone, Debug)]
pub struct EvidenceLookup {
    vocabulary: Arc<Vocabulary>,
}

impl EvidenceLookup {
    /// Resolve accessions with this vocabulary's evidence type
    pub const fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self { vocabulary }
    }

    /// The vocabulary used
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Identifiers are claimed if they have this vocabulary's evidence type, or no evidence type
    /// but this vocabulary's accession prefix (`UNIMOD:35`).
    fn claims(&self, descriptor: &Descriptor) -> bool {
        descriptor.key() == DescriptorKey::Identifier
            && (descriptor.evidence() == self.vocabulary.evidence
                || (descriptor.evidence() == EvidenceType::None
                    && self.vocabulary.evidence.accession_prefix().is_some_and(|prefix| {
                        descriptor
                            .value()
                            .split_once(':')
                            .is_some_and(|(p, _)| p.eq_ignore_ascii_case(prefix))
                    })))
    }
}

impl ModificationLookup for EvidenceLookup {
    fn resolve_descriptor(&self, descriptor: &Descriptor) -> ProteoformResult<Resolution> {
        if !self.claims(descriptor) {
            return Ok(Resolution::Unresolved);
        }
        self.vocabulary
            .find_accession(descriptor.value())
            .map(|formula| {
                Resolution::Resolved(ModificationDelta::new(formula.clone(), descriptor.clone()))
            })
            .ok_or_else(|| {
                BoxedError::new(
                    ProteoformError::LookupError,
                    "Invalid modification",
                    format!(
                        "The provided accession does not exist in {}",
                        self.vocabulary.evidence
                    ),
                    Context::show(descriptor.value().to_string()),
                )
            })
    }
}

#[cfg(test)]
#[expect(clippy::missing_panics_doc)]
mod tests {
    use std::sync::Arc;

    use context_error::FullErrorContent;

    use super::{EvidenceLookup, NamedVocabularyLookup, Vocabulary, normalise_accession};
    use crate::{
        ProteoformError,
        lookup::{ModificationLookup, Resolution, VocabularyEntry},
        molecular_formula,
        sequence::{Descriptor, DescriptorKey, EvidenceType},
    };

    fn unimod() -> Arc<Vocabulary> {
        Arc::new(
            Vocabulary::new(EvidenceType::Unimod, [
                VocabularyEntry::new("Oxidation", "UNIMOD:35", "O1"),
                VocabularyEntry::new("Phospho", "21", "H1O3P1"),
            ])
            .unwrap(),
        )
    }

    fn resolved_formula(resolution: Resolution) -> crate::chemistry::MolecularFormula {
        match resolution {
            Resolution::Resolved(delta) => delta.formula().clone(),
            other => panic!("Expected a resolved delta, got {other:?}"),
        }
    }

    #[test]
    fn accessions() {
        assert_eq!(normalise_accession(EvidenceType::Unimod, "UNIMOD:35"), "35");
        assert_eq!(normalise_accession(EvidenceType::Unimod, "unimod:35"), "35");
        assert_eq!(normalise_accession(EvidenceType::Unimod, "35"), "35");
        assert_eq!(normalise_accession(EvidenceType::Resid, "RESID:AA0038"), "AA0038");
        assert_eq!(normalise_accession(EvidenceType::PsiMod, "MOD:00046"), "46");
        assert_eq!(normalise_accession(EvidenceType::PsiMod, "00046"), "46");
        assert_eq!(normalise_accession(EvidenceType::PsiMod, "000"), "0");
        assert_eq!(normalise_accession(EvidenceType::Unimod, "UNIMOé"), "UNIMOé");
        assert_eq!(normalise_accession(EvidenceType::Unimod, "UNIMOé:35"), "UNIMOé:35");
        assert_eq!(normalise_accession(EvidenceType::Resid, "éé:1"), "éé:1");
    }

    #[test]
    fn non_ascii_accession() {
        let lookup = EvidenceLookup::new(unimod());
        let error = lookup
            .resolve_descriptor(&Descriptor::identifier(EvidenceType::Unimod, "UNIMOé"))
            .unwrap_err();
        assert_eq!(error.get_kind(), ProteoformError::LookupError);
        let error = crate::lookup::standard_lookup()
            .resolve(&[Descriptor::identifier(EvidenceType::Unimod, "UNIMOé")])
            .unwrap_err();
        assert_eq!(error.get_kind(), ProteoformError::LookupError);
    }

    #[test]
    fn named() {
        let lookup = NamedVocabularyLookup::new(unimod());
        assert_eq!(
            resolved_formula(
                lookup
                    .resolve_descriptor(&Descriptor::name(EvidenceType::Unimod, "oxidation"))
                    .unwrap()
            ),
            molecular_formula!(O 1)
        );
        assert_eq!(
            lookup
                .resolve_descriptor(&Descriptor::name(EvidenceType::None, "Oxidation"))
                .unwrap(),
            Resolution::Unresolved
        );
        assert_eq!(
            lookup
                .resolve_descriptor(&Descriptor::name(EvidenceType::Resid, "Oxidation"))
                .unwrap(),
            Resolution::Unresolved
        );
        let lookup = lookup.as_default();
        assert_eq!(
            resolved_formula(
                lookup
                    .resolve_descriptor(&Descriptor::name(EvidenceType::None, "Phospho"))
                    .unwrap()
            ),
            molecular_formula!(H 1 O 3 P 1)
        );
    }

    #[test]
    fn unknown_name_is_a_hard_error() {
        let error = NamedVocabularyLookup::new(unimod())
            .resolve_descriptor(&Descriptor::name(EvidenceType::Unimod, "Oxidatoin"))
            .unwrap_err();
        assert_eq!(error.get_kind(), ProteoformError::LookupError);
    }

    #[test]
    fn evidence() {
        let lookup = EvidenceLookup::new(unimod());
        for accession in ["35", "UNIMOD:35", "0035"] {
            assert_eq!(
                resolved_formula(
                    lookup
                        .resolve_descriptor(&Descriptor::identifier(
                            EvidenceType::Unimod,
                            accession
                        ))
                        .unwrap()
                ),
                molecular_formula!(O 1)
            );
        }
        assert_eq!(
            resolved_formula(
                lookup
                    .resolve_descriptor(&Descriptor::identifier(EvidenceType::None, "UNIMOD:21"))
                    .unwrap()
            ),
            molecular_formula!(H 1 O 3 P 1)
        );
        assert_eq!(
            lookup
                .resolve_descriptor(&Descriptor::identifier(EvidenceType::Resid, "AA0038"))
                .unwrap(),
            Resolution::Unresolved
        );
        assert_eq!(
            lookup
                .resolve_descriptor(&Descriptor::keyed(DescriptorKey::Mass, "+15.995"))
                .unwrap(),
            Resolution::Unresolved
        );
        assert_eq!(
            lookup
                .resolve_descriptor(&Descriptor::identifier(EvidenceType::Unimod, "9999"))
                .unwrap_err()
                .get_kind(),
            ProteoformError::LookupError
        );
    }

    #[test]
    fn json() {
        let vocabulary = Vocabulary::from_json(
            EvidenceType::Resid,
            r#"[
                {"name": "O-phospho-L-serine", "accession": "RESID:AA0037", "formula": "H1O3P1"},
                {"name": "N-acetyl-L-alanine", "accession": "AA0041", "formula": "C2H2O1"}
            ]"#,
        )
        .unwrap();
        assert_eq!(vocabulary.len(), 2);
        assert_eq!(
            vocabulary.find_accession("AA0041"),
            Some(&molecular_formula!(C 2 H 2 O 1))
        );
        assert_eq!(
            vocabulary.find_name("o-phospho-l-serine"),
            Some(&molecular_formula!(H 1 O 3 P 1))
        );
    }

    #[test]
    fn invalid_vocabularies() {
        assert_eq!(
            Vocabulary::from_json(EvidenceType::Unimod, "[{\"name\": 1}]")
                .unwrap_err()
                .get_kind(),
            ProteoformError::InvalidVocabulary
        );
        assert_eq!(
            Vocabulary::new(EvidenceType::Unimod, [VocabularyEntry::new("A", "1", "Xx")])
                .unwrap_err()
                .get_kind(),
            ProteoformError::InvalidVocabulary
        );
        assert_eq!(
            Vocabulary::new(EvidenceType::Unimod, [
                VocabularyEntry::new("A", "1", "O1"),
                VocabularyEntry::new("a", "2", "O2"),
            ])
            .unwrap_err()
            .get_kind(),
            ProteoformError::InvalidVocabulary
        );
        assert_eq!(
            Vocabulary::new(EvidenceType::Unimod, [
                VocabularyEntry::new("A", "1", "O1"),
                VocabularyEntry::new("B", "UNIMOD:01", "O2"),
            ])
            .unwrap_err()
            .get_kind(),
            ProteoformError::InvalidVocabulary
        );
        assert!(Vocabulary::from_json_file(EvidenceType::Unimod, "/does/not/exist.json").is_err());
    }
}
