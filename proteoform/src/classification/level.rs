use serde::{Deserialize, Serialize};

/// The five-level proteoform classification code. Level 1 is a fully characterised proteoform,
/// every missing piece of information moves it down a level.
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum FiveLevel {
    /// Localized, identified, sequence known, and gene known
    One,
    /// Everything known except the localization
    TwoA,
    /// Everything known except the identity of the modifications
    TwoB,
    /// Everything known except the exact sequence
    TwoC,
    /// Everything known except the gene
    TwoD,
    /// Two pieces of information missing
    Three,
    /// Three pieces of information missing
    Four,
    /// Nothing known
    Five,
}

impl FiveLevel {
    /// The textual code (`1`, `2A`, ..., `5`)
    pub const fn code(self) -> &'static str {
        match self {
            Self::One => "1",
            Self::TwoA => "2A",
            Self::TwoB => "2B",
            Self::TwoC => "2C",
            Self::TwoD => "2D",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
        }
    }
}

impl std::fmt::Display for FiveLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for FiveLevel {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::One),
            "2A" | "2a" => Ok(Self::TwoA),
            "2B" | "2b" => Ok(Self::TwoB),
            "2C" | "2c" => Ok(Self::TwoC),
            "2D" | "2d" => Ok(Self::TwoD),
            "3" => Ok(Self::Three),
            "4" => Ok(Self::Four),
            "5" => Ok(Self::Five),
            _ => Err(()),
        }
    }
}

/// The four pieces of information that make up the five-level classification
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[allow(clippy::struct_excessive_bools)]
pub struct LevelFlags {
    /// All modifications are placed on exactly one residue
    pub localized: bool,
    /// All modifications are chemically identified, not only a mass shift
    pub identified: bool,
    /// The amino acid sequence is unambiguous
    pub sequence_known: bool,
    /// The proteoform maps to exactly one gene
    pub gene_known: bool,
}

impl LevelFlags {
    /// Combine the flags into the level
    pub fn level(self) -> FiveLevel {
        classify(
            self.localized,
            self.identified,
            self.sequence_known,
            self.gene_known,
        )
    }
}

/// Combine the four pieces of information into a level. With exactly one piece missing the
/// missing piece is named (`2A` to `2D`), otherwise the level is five minus the number of known
/// pieces, with everything known being level 1.
#[allow(clippy::fn_params_excessive_bools)]
pub fn classify(
    localized: bool,
    identified: bool,
    sequence_known: bool,
    gene_known: bool,
) -> FiveLevel {
    let known = [localized, identified, sequence_known, gene_known]
        .into_iter()
        .filter(|known| *known)
        .count();
    match known {
        4 => FiveLevel::One,
        3 if !localized => FiveLevel::TwoA,
        3 if !identified => FiveLevel::TwoB,
        3 if !sequence_known => FiveLevel::TwoC,
        3 => FiveLevel::TwoD,
        2 => FiveLevel::Three,
        1 => FiveLevel::Four,
        _ => FiveLevel::Five,
    }
}
