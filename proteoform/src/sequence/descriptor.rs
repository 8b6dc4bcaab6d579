use serde::{Deserialize, Serialize};

/// The key of a descriptor, determines how the value of the descriptor should be interpreted
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum DescriptorKey {
    /// No key given, the value is most likely a bare mass shift (`+15.995`)
    #[default]
    None,
    /// A modification name in a controlled vocabulary (`Oxidation`, `U:Oxidation`)
    Name,
    /// An accession in a controlled vocabulary (`UNIMOD:35`, `RESID:AA0038`)
    Identifier,
    /// A mass shift (`Mass:+15.995`)
    Mass,
    /// A molecular formula (`Formula:O1`)
    Formula,
    /// A glycan composition (`Glycan:HexNAc1Hex2`)
    Glycan,
    /// A free text comment, never carries chemical information (`Info:text`)
    Info,
    /// An observed mass (`Obs:+15.995`)
    Observed,
}

impl DescriptorKey {
    /// The prefix used when writing a descriptor with this key, `None` for keys without prefix
    pub const fn prefix(self) -> Option<&'static str> {
        match self {
            Self::None | Self::Name | Self::Identifier => None,
            Self::Mass => Some("Mass"),
            Self::Formula => Some("Formula"),
            Self::Glycan => Some("Glycan"),
            Self::Info => Some("Info"),
            Self::Observed => Some("Obs"),
        }
    }
}

impl std::fmt::Display for DescriptorKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::None => "None",
                Self::Name => "Name",
                Self::Identifier => "Identifier",
                Self::Mass => "Mass",
                Self::Formula => "Formula",
                Self::Glycan => "Glycan",
                Self::Info => "Info",
                Self::Observed => "Observed",
            }
        )
    }
}

/// The vocabulary that a descriptor value belongs to
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum EvidenceType {
    /// No vocabulary specified
    #[default]
    None,
    /// Unimod
    Unimod,
    /// PSI-MOD
    PsiMod,
    /// RESID
    Resid,
    /// XL-MOD
    XlMod,
    /// GNOme
    Gnome,
    /// Brno nomenclature for histone modifications
    Brno,
    /// A user defined vocabulary
    Custom,
}

impl EvidenceType {
    /// Get the prefix character for the vocabulary, used in front of names (`U:Oxidation`)
    pub const fn char(self) -> Option<char> {
        match self {
            Self::None => None,
            Self::Unimod => Some('U'),
            Self::PsiMod => Some('M'),
            Self::Resid => Some('R'),
            Self::XlMod => Some('X'),
            Self::Gnome => Some('G'),
            Self::Brno => Some('B'),
            Self::Custom => Some('C'),
        }
    }

    /// Get the accession prefix for the vocabulary, used in front of identifiers (`UNIMOD:35`)
    pub const fn accession_prefix(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Unimod => Some("UNIMOD"),
            Self::PsiMod => Some("MOD"),
            Self::Resid => Some("RESID"),
            Self::XlMod => Some("XLMOD"),
            Self::Gnome => Some("GNO"),
            Self::Brno => Some("BRNO"),
            Self::Custom => Some("CUSTOM"),
        }
    }
}

impl std::fmt::Display for EvidenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::None => "None",
                Self::Unimod => "Unimod",
                Self::PsiMod => "PSI-MOD",
                Self::Resid => "RESID",
                Self::XlMod => "XL-MOD",
                Self::Gnome => "GNOme",
                Self::Brno => "Brno",
                Self::Custom => "Custom",
            }
        )
    }
}

/// A single piece of evidence about a modification, a key and vocabulary with an opaque value
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Descriptor {
    key: DescriptorKey,
    evidence: EvidenceType,
    value: Box<str>,
}

impl Descriptor {
    /// Create a new descriptor from all its parts
    pub fn new(key: DescriptorKey, evidence: EvidenceType, value: impl Into<Box<str>>) -> Self {
        Self {
            key,
            evidence,
            value: value.into(),
        }
    }

    /// A named modification in the given vocabulary (`EvidenceType::None` for an unprefixed name)
    pub fn name(evidence: EvidenceType, name: impl Into<Box<str>>) -> Self {
        Self::new(DescriptorKey::Name, evidence, name)
    }

    /// An accession in the given vocabulary
    pub fn identifier(evidence: EvidenceType, accession: impl Into<Box<str>>) -> Self {
        Self::new(DescriptorKey::Identifier, evidence, accession)
    }

    /// A key and value pair without vocabulary
    pub fn keyed(key: DescriptorKey, value: impl Into<Box<str>>) -> Self {
        Self::new(key, EvidenceType::None, value)
    }

    /// The key
    pub const fn key(&self) -> DescriptorKey {
        self.key
    }

    /// The vocabulary
    pub const fn evidence(&self) -> EvidenceType {
        self.evidence
    }

    /// The raw value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Check if a set of descriptors only describes an unidentified modification. This is the case
    /// if the set is exactly one descriptor with key [`DescriptorKey::Mass`] or
    /// [`DescriptorKey::None`]. Any other set is treated as identified.
    pub fn is_ambiguous_set(descriptors: &[Self]) -> bool {
        matches!(descriptors, [single] if matches!(single.key, DescriptorKey::Mass | DescriptorKey::None))
    }
}

impl std::fmt::Display for Descriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.key, self.evidence) {
            (DescriptorKey::Identifier, evidence) => match evidence.accession_prefix() {
                Some(prefix)
                    if !self
                        .value
                        .get(..prefix.len() + 1)
                        .is_some_and(|p| p.eq_ignore_ascii_case(&format!("{prefix}:"))) =>
                {
                    write!(f, "{prefix}:{}", self.value)
                }
                _ => write!(f, "{}", self.value),
            },
            (DescriptorKey::Name, evidence) => match evidence.char() {
                Some(c) => write!(f, "{c}:{}", self.value),
                None => write!(f, "{}", self.value),
            },
            (key, _) => match key.prefix() {
                Some(prefix) => write!(f, "{prefix}:{}", self.value),
                None => write!(f, "{}", self.value),
            },
        }
    }
}

#[cfg(test)]
#[expect(clippy::missing_panics_doc)]
mod tests {
    use super::{Descriptor, DescriptorKey, EvidenceType};

    #[test]
    fn ambiguous_sets() {
        assert!(Descriptor::is_ambiguous_set(&[Descriptor::keyed(
            DescriptorKey::Mass,
            "+15.995"
        )]));
        assert!(Descriptor::is_ambiguous_set(&[Descriptor::keyed(
            DescriptorKey::None,
            "+15.995"
        )]));
        assert!(!Descriptor::is_ambiguous_set(&[Descriptor::name(
            EvidenceType::Unimod,
            "Oxidation"
        )]));
        assert!(!Descriptor::is_ambiguous_set(&[Descriptor::identifier(
            EvidenceType::Resid,
            "AA0038"
        )]));
        assert!(!Descriptor::is_ambiguous_set(&[
            Descriptor::keyed(DescriptorKey::Mass, "+15.995"),
            Descriptor::keyed(DescriptorKey::Mass, "+15.995"),
        ]));
        assert!(!Descriptor::is_ambiguous_set(&[]));
    }

    #[test]
    fn display() {
        assert_eq!(
            Descriptor::name(EvidenceType::None, "Oxidation").to_string(),
            "Oxidation"
        );
        assert_eq!(
            Descriptor::name(EvidenceType::Unimod, "Oxidation").to_string(),
            "U:Oxidation"
        );
        assert_eq!(
            Descriptor::identifier(EvidenceType::Unimod, "35").to_string(),
            "UNIMOD:35"
        );
        assert_eq!(
            Descriptor::identifier(EvidenceType::Resid, "RESID:AA0038").to_string(),
            "RESID:AA0038"
        );
        assert_eq!(
            Descriptor::keyed(DescriptorKey::Mass, "+15.995").to_string(),
            "Mass:+15.995"
        );
        assert_eq!(
            Descriptor::keyed(DescriptorKey::Formula, "O1").to_string(),
            "Formula:O1"
        );
        assert_eq!(
            Descriptor::keyed(DescriptorKey::Info, "text").to_string(),
            "Info:text"
        );
        assert_eq!(
            Descriptor::keyed(DescriptorKey::None, "+15.995").to_string(),
            "+15.995"
        );
    }
}
