//! Five-level classification directly on the raw `|` separated gene and sequence strings as found
//! in PrSM reports, where every alternative is one candidate identification for the same spectrum.

use itertools::Itertools;

use crate::classification::{
    FiveLevel, LevelFlags, scan_sequence, structured::contains_ambiguous_residue,
};

/// Check if the raw modification text is only a mass shift (`+79.966`): more than one character
/// and everything after the first character parses as a finite number.
fn is_unknown_mass_shift(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next().is_some()
        && !chars.as_str().is_empty()
        && chars.as_str().parse::<f64>().is_ok_and(f64::is_finite)
}

/// Determine the five-level information for a PrSM given as raw gene and sequence strings. Both
/// can contain multiple alternatives separated by `|`, the first sequence alternative is the
/// reference all others are compared to.
pub fn raw_level_flags(gene: &str, sequence: &str) -> LevelFlags {
    let alternatives = sequence.split('|').map(scan_sequence).collect_vec();
    let Some((first, others)) = alternatives.split_first() else {
        return LevelFlags::default();
    };

    let sequence_known = !contains_ambiguous_residue(&first.base)
        && others.iter().all(|other| other.base == first.base);

    let mut identified = !first
        .modifications
        .iter()
        .any(|(_, text)| is_unknown_mass_shift(text));
    let mut localized = true;
    let first_texts = first.modifications.iter().map(|(_, t)| t).sorted().collect_vec();
    for other in others {
        if other.modifications.len() == first.modifications.len() {
            if other.modifications.iter().map(|(_, t)| t).sorted().collect_vec() != first_texts {
                identified = false;
            }
            if other
                .modifications
                .iter()
                .zip(&first.modifications)
                .any(|(a, b)| a.0 != b.0)
            {
                localized = false;
            }
        } else {
            identified = false;
            localized = false;
        }
    }

    LevelFlags {
        localized,
        identified,
        sequence_known,
        gene_known: gene.split('|').count() == 1,
    }
}

/// The five-level classification for a PrSM given as raw gene and sequence strings, see
/// [`raw_level_flags`].
/// ```rust
/// use proteoform::prelude::*;
/// assert_eq!(classify_prsm("GENE1", "PEP[Phospho]TIDE"), FiveLevel::One);
/// assert_eq!(classify_prsm("GENE1|GENE2", "PEP[+79.966]TIDE|PEP[+79.966]TIDE"), FiveLevel::Three);
/// ```
pub fn classify_prsm(gene: &str, sequence: &str) -> FiveLevel {
    raw_level_flags(gene, sequence).level()
}
