use serde::{Deserialize, Serialize};

use crate::{chemistry::MolecularFormula, molecular_formula};

/// An amino acid, including the ambiguity codes that can occur in a proteoform sequence
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[allow(missing_docs)]
pub enum AminoAcid {
    Alanine,
    Arginine,
    Asparagine,
    AsparticAcid,
    Cysteine,
    Glutamine,
    GlutamicAcid,
    Glycine,
    Histidine,
    Isoleucine,
    Leucine,
    Lysine,
    Methionine,
    Phenylalanine,
    Proline,
    Pyrrolysine,
    Selenocysteine,
    Serine,
    Threonine,
    Tryptophan,
    Tyrosine,
    Valine,
    /// B: asparagine or aspartic acid
    AmbiguousAsparagine,
    /// J: leucine or isoleucine
    AmbiguousLeucine,
    /// Z: glutamine or glutamic acid
    AmbiguousGlutamine,
    /// X: any amino acid
    Unknown,
}

impl AminoAcid {
    /// The residue formula of this amino acid, `None` for B, Z, and X which do not have a single
    /// defined composition. J has the same composition as both options so it is defined.
    pub fn formula(self) -> Option<MolecularFormula> {
        Some(match self {
            Self::Alanine => molecular_formula!(H 5 C 3 O 1 N 1),
            Self::Arginine => molecular_formula!(H 12 C 6 O 1 N 4),
            Self::Asparagine => molecular_formula!(H 6 C 4 O 2 N 2),
            Self::AsparticAcid => molecular_formula!(H 5 C 4 O 3 N 1),
            Self::Cysteine => molecular_formula!(H 5 C 3 O 1 N 1 S 1),
            Self::Glutamine => molecular_formula!(H 8 C 5 O 2 N 2),
            Self::GlutamicAcid => molecular_formula!(H 7 C 5 O 3 N 1),
            Self::Glycine => molecular_formula!(H 3 C 2 O 1 N 1),
            Self::Histidine => molecular_formula!(H 7 C 6 O 1 N 3),
            Self::AmbiguousLeucine | Self::Isoleucine | Self::Leucine => {
                molecular_formula!(H 11 C 6 O 1 N 1)
            }
            Self::Lysine => molecular_formula!(H 12 C 6 O 1 N 2),
            Self::Methionine => molecular_formula!(H 9 C 5 O 1 N 1 S 1),
            Self::Phenylalanine => molecular_formula!(H 9 C 9 O 1 N 1),
            Self::Proline => molecular_formula!(H 7 C 5 O 1 N 1),
            Self::Pyrrolysine => molecular_formula!(H 19 C 11 O 2 N 3),
            Self::Selenocysteine => molecular_formula!(H 5 C 3 O 1 N 1 Se 1),
            Self::Serine => molecular_formula!(H 5 C 3 O 2 N 1),
            Self::Threonine => molecular_formula!(H 7 C 4 O 2 N 1),
            Self::Tryptophan => molecular_formula!(H 10 C 11 O 1 N 2),
            Self::Tyrosine => molecular_formula!(H 9 C 9 O 2 N 1),
            Self::Valine => molecular_formula!(H 9 C 5 O 1 N 1),
            Self::AmbiguousAsparagine | Self::AmbiguousGlutamine | Self::Unknown => return None,
        })
    }

    /// Check if this is one of the ambiguity codes B, J, X, or Z
    pub const fn is_ambiguous(self) -> bool {
        matches!(
            self,
            Self::AmbiguousAsparagine
                | Self::AmbiguousLeucine
                | Self::AmbiguousGlutamine
                | Self::Unknown
        )
    }

    /// Get the single letter representation of the amino acid
    pub const fn one_letter_code(self) -> char {
        match self {
            Self::Alanine => 'A',
            Self::AmbiguousAsparagine => 'B',
            Self::Cysteine => 'C',
            Self::AsparticAcid => 'D',
            Self::GlutamicAcid => 'E',
            Self::Phenylalanine => 'F',
            Self::Glycine => 'G',
            Self::Histidine => 'H',
            Self::Isoleucine => 'I',
            Self::AmbiguousLeucine => 'J',
            Self::Lysine => 'K',
            Self::Leucine => 'L',
            Self::Methionine => 'M',
            Self::Asparagine => 'N',
            Self::Pyrrolysine => 'O',
            Self::Proline => 'P',
            Self::Glutamine => 'Q',
            Self::Arginine => 'R',
            Self::Serine => 'S',
            Self::Threonine => 'T',
            Self::Selenocysteine => 'U',
            Self::Valine => 'V',
            Self::Tryptophan => 'W',
            Self::Unknown => 'X',
            Self::Tyrosine => 'Y',
            Self::AmbiguousGlutamine => 'Z',
        }
    }
}

impl std::fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.one_letter_code())
    }
}

impl TryFrom<char> for AminoAcid {
    type Error = ();
    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value.to_ascii_uppercase() {
            'A' => Ok(Self::Alanine),
            'B' => Ok(Self::AmbiguousAsparagine),
            'C' => Ok(Self::Cysteine),
            'D' => Ok(Self::AsparticAcid),
            'E' => Ok(Self::GlutamicAcid),
            'F' => Ok(Self::Phenylalanine),
            'G' => Ok(Self::Glycine),
            'H' => Ok(Self::Histidine),
            'I' => Ok(Self::Isoleucine),
            'J' => Ok(Self::AmbiguousLeucine),
            'K' => Ok(Self::Lysine),
            'L' => Ok(Self::Leucine),
            'M' => Ok(Self::Methionine),
            'N' => Ok(Self::Asparagine),
            'O' => Ok(Self::Pyrrolysine),
            'P' => Ok(Self::Proline),
            'Q' => Ok(Self::Glutamine),
            'R' => Ok(Self::Arginine),
            'S' => Ok(Self::Serine),
            'T' => Ok(Self::Threonine),
            'U' => Ok(Self::Selenocysteine),
            'V' => Ok(Self::Valine),
            'W' => Ok(Self::Tryptophan),
            'X' => Ok(Self::Unknown),
            'Y' => Ok(Self::Tyrosine),
            'Z' => Ok(Self::AmbiguousGlutamine),
            _ => Err(()),
        }
    }
}

impl TryFrom<u8> for AminoAcid {
    type Error = ();
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_from(char::from(value))
    }
}

#[cfg(test)]
#[expect(clippy::missing_panics_doc)]
mod tests {
    use super::AminoAcid;
    use crate::system::in_da;

    #[test]
    fn masses() {
        let known = &[
            ('A', 71.037_11, 71.08),
            ('R', 156.101_11, 156.2),
            ('N', 114.042_93, 114.1),
            ('D', 115.026_94, 115.1),
            ('C', 103.009_19, 103.1),
            ('E', 129.042_59, 129.1),
            ('Q', 128.058_58, 128.1),
            ('G', 57.021_46, 57.05),
            ('H', 137.058_91, 137.1),
            ('I', 113.084_06, 113.2),
            ('J', 113.084_06, 113.2),
            ('L', 113.084_06, 113.2),
            ('K', 128.094_96, 128.2),
            ('M', 131.040_49, 131.2),
            ('F', 147.068_41, 147.2),
            ('P', 97.052_76, 97.12),
            ('S', 87.032_03, 87.08),
            ('T', 101.047_68, 101.1),
            ('W', 186.079_31, 186.2),
            ('Y', 163.063_33, 163.2),
            ('V', 99.068_41, 99.13),
        ];

        for (aa, mono_mass, average_weight) in known {
            let formula = AminoAcid::try_from(*aa).unwrap().formula().unwrap();
            let (mono, weight) = (
                in_da(formula.monoisotopic_mass()),
                in_da(formula.average_weight()),
            );
            assert!((mono - *mono_mass).abs() < 1e-5, "{aa}: {mono}");
            assert!((weight - *average_weight).abs() < 1e-1, "{aa}: {weight}");
        }
    }

    #[test]
    fn ambiguous_residues() {
        for code in ['B', 'Z', 'X'] {
            let aa = AminoAcid::try_from(code).unwrap();
            assert!(aa.is_ambiguous());
            assert_eq!(aa.formula(), None);
        }
        let leucine = AminoAcid::try_from('J').unwrap();
        assert!(leucine.is_ambiguous());
        assert_eq!(leucine.formula(), AminoAcid::Leucine.formula());
        assert!(!AminoAcid::Serine.is_ambiguous());
    }

    #[test]
    fn read_aa() {
        assert_eq!(
            AminoAcid::try_from('B').unwrap(),
            AminoAcid::AmbiguousAsparagine
        );
        assert_eq!(
            AminoAcid::try_from(b'B').unwrap(),
            AminoAcid::AmbiguousAsparagine
        );
        assert_eq!(AminoAcid::try_from('c'), Ok(AminoAcid::Cysteine));
        assert_eq!(AminoAcid::try_from('🦀'), Err(()));
        assert_eq!(AminoAcid::Tryptophan.to_string(), "W");
    }
}
