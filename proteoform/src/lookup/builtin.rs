//! A small built in starter set of common modifications

use std::sync::{Arc, LazyLock};

use crate::{
    lookup::{
        CompositeLookup, EvidenceLookup, FormulaLookup, IgnoreKeyLookup, MassLookup,
        NamedVocabularyLookup, Vocabulary, VocabularyEntry,
    },
    sequence::{DescriptorKey, EvidenceType},
};

const UNIMOD_ENTRIES: &[(&str, &str, &str)] = &[
    ("Acetyl", "1", "H2C2O1"),
    ("Amidated", "2", "H1N1O-1"),
    ("Carbamidomethyl", "4", "H3C2N1O1"),
    ("Deamidated", "7", "H-1N-1O1"),
    ("Phospho", "21", "H1O3P1"),
    ("Methyl", "34", "H2C1"),
    ("Oxidation", "35", "O1"),
    ("Dimethyl", "36", "H4C2"),
    ("Trimethyl", "37", "H6C3"),
    ("Formyl", "122", "C1O1"),
];

const RESID_ENTRIES: &[(&str, &str, &str)] = &[
    ("O-phospho-L-serine", "AA0037", "H1O3P1"),
    ("O-phospho-L-threonine", "AA0038", "H1O3P1"),
    ("O4'-phospho-L-tyrosine", "AA0039", "H1O3P1"),
    ("N-acetyl-L-alanine", "AA0041", "C2H2O1"),
];

const PSI_MOD_ENTRIES: &[(&str, &str, &str)] = &[
    ("O-phospho-L-serine", "00046", "H1O3P1"),
    ("O-phospho-L-threonine", "00047", "H1O3P1"),
    ("O4'-phospho-L-tyrosine", "00048", "H1O3P1"),
    ("L-methionine sulfoxide", "00719", "O1"),
    ("acetylated residue", "00394", "C2H2O1"),
];

fn build(evidence: EvidenceType, entries: &[(&str, &str, &str)]) -> Arc<Vocabulary> {
    Arc::new(
        Vocabulary::new(evidence, entries.iter().map(VocabularyEntry::from))
            .expect("Built in vocabulary is invalid"),
    )
}

static UNIMOD: LazyLock<Arc<Vocabulary>> =
    LazyLock::new(|| build(EvidenceType::Unimod, UNIMOD_ENTRIES));
static RESID: LazyLock<Arc<Vocabulary>> =
    LazyLock::new(|| build(EvidenceType::Resid, RESID_ENTRIES));
static PSI_MOD: LazyLock<Arc<Vocabulary>> =
    LazyLock::new(|| build(EvidenceType::PsiMod, PSI_MOD_ENTRIES));

/// The built in Unimod starter vocabulary
/// # Panics
/// If the built in data is invalid, which is checked by the tests.
pub fn unimod() -> Arc<Vocabulary> {
    UNIMOD.clone()
}

/// The built in RESID starter vocabulary
/// # Panics
/// If the built in data is invalid, which is checked by the tests.
pub fn resid() -> Arc<Vocabulary> {
    RESID.clone()
}

/// The built in PSI-MOD starter vocabulary
/// # Panics
/// If the built in data is invalid, which is checked by the tests.
pub fn psi_mod() -> Arc<Vocabulary> {
    PSI_MOD.clone()
}

/// A ready to use lookup chain over the built in vocabularies. In order it ignores `Info:`
/// descriptors, parses `Formula:` and mass descriptors, and resolves names and accessions in
/// Unimod (also the default for names without prefix), RESID, and PSI-MOD.
/// # Panics
/// If the built in data is invalid, which is checked by the tests.
pub fn standard_lookup() -> CompositeLookup {
    CompositeLookup::default()
        .with(IgnoreKeyLookup::new([DescriptorKey::Info]))
        .with(FormulaLookup)
        .with(MassLookup)
        .with(NamedVocabularyLookup::new(unimod()).as_default())
        .with(EvidenceLookup::new(unimod()))
        .with(NamedVocabularyLookup::new(resid()))
        .with(EvidenceLookup::new(resid()))
        .with(NamedVocabularyLookup::new(psi_mod()))
        .with(EvidenceLookup::new(psi_mod()))
}
