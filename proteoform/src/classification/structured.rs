use crate::{
    classification::{FiveLevel, LevelFlags},
    sequence::{Descriptor, DescriptorKey, LocalizedTag, Term, UnlocalizedTag},
};

/// Check if a sequence contains any of the ambiguous amino acid codes B, J, X, or Z
pub(crate) fn contains_ambiguous_residue(sequence: &str) -> bool {
    sequence
        .chars()
        .any(|c| matches!(c.to_ascii_uppercase(), 'B' | 'J' | 'X' | 'Z'))
}

impl Term {
    /// Determine which pieces of information of the five-level classification are known for this
    /// term, given the number of genes this proteoform could originate from.
    pub fn level_flags(&self, gene_count: usize) -> LevelFlags {
        let localized = self.unlocalized_tags().is_empty()
            && self.tag_groups().iter().all(|g| g.members().len() <= 1)
            && self.localized_tags().iter().all(|t| !t.is_range())
            && self.labile().is_empty();
        let identified = !self
            .localized_tags()
            .iter()
            .map(LocalizedTag::descriptors)
            .chain(self.unlocalized_tags().iter().map(UnlocalizedTag::descriptors))
            .chain([self.n_term(), self.c_term(), self.labile()])
            .any(Descriptor::is_ambiguous_set)
            && self
                .tag_groups()
                .iter()
                .all(|g| !matches!(g.descriptor().key(), DescriptorKey::Mass | DescriptorKey::None));
        let sequence_known =
            self.sequence_alternatives().is_empty() && !contains_ambiguous_residue(self.sequence());
        LevelFlags {
            localized,
            identified,
            sequence_known,
            gene_known: gene_count == 1,
        }
    }

    /// The five-level classification of this term
    pub fn five_level(&self, gene_count: usize) -> FiveLevel {
        self.level_flags(gene_count).level()
    }
}

/// The five-level classification of a term, see [`Term::level_flags`]
pub fn classify_term(term: &Term, gene_count: usize) -> FiveLevel {
    term.five_level(gene_count)
}

#[cfg(test)]
#[expect(clippy::missing_panics_doc)]
mod tests {
    use super::classify_term;
    use crate::{
        classification::{FiveLevel, LevelFlags},
        sequence::{
            Descriptor, DescriptorKey, EvidenceType, LocalizedTag, Membership, TagGroup, Term,
            UnlocalizedTag,
        },
    };

    fn phospho() -> Descriptor {
        Descriptor::name(EvidenceType::Unimod, "Phospho")
    }

    fn mass() -> Descriptor {
        Descriptor::keyed(DescriptorKey::Mass, "+79.966")
    }

    #[test]
    fn fully_characterised() {
        let term = Term::new("PEPTIDE")
            .with_tag(LocalizedTag::new(3, [phospho()]))
            .with_n_term([Descriptor::name(EvidenceType::None, "Acetyl")]);
        assert_eq!(term.level_flags(1), LevelFlags {
            localized: true,
            identified: true,
            sequence_known: true,
            gene_known: true,
        });
        assert_eq!(classify_term(&term, 1), FiveLevel::One);
        assert_eq!(term.five_level(2), FiveLevel::TwoD);
        assert_eq!(term.five_level(0), FiveLevel::TwoD);
        assert_eq!(Term::new("PEPTIDE").five_level(1), FiveLevel::One);
    }

    #[test]
    fn localization() {
        let range = Term::new("PEPTIDE").with_tag(LocalizedTag::range(1, 3, [phospho()]));
        assert_eq!(range.five_level(1), FiveLevel::TwoA);
        let unlocalized = Term::new("PEPTIDE").with_unlocalized_tag(UnlocalizedTag::new([phospho()]));
        assert_eq!(unlocalized.five_level(1), FiveLevel::TwoA);
        let labile =
            Term::new("PEPTIDE").with_labile(Descriptor::keyed(DescriptorKey::Glycan, "Hex1"));
        assert_eq!(labile.five_level(1), FiveLevel::TwoA);
        let group = Term::new("PEPTIDE").with_tag_group(TagGroup::new("g", phospho(), [
            Membership::new(1),
            Membership::new(3),
        ]));
        assert_eq!(group.five_level(1), FiveLevel::TwoA);
        let single = Term::new("PEPTIDE")
            .with_tag_group(TagGroup::new("g", phospho(), [Membership::new(3)]));
        assert_eq!(single.five_level(1), FiveLevel::One);
    }

    #[test]
    fn identification() {
        let term = Term::new("PEPTIDE").with_tag(LocalizedTag::new(3, [mass()]));
        assert_eq!(term.five_level(1), FiveLevel::TwoB);
        let term = Term::new("PEPTIDE").with_tag(LocalizedTag::new(3, [
            Descriptor::keyed(DescriptorKey::None, "+79.966"),
        ]));
        assert_eq!(term.five_level(1), FiveLevel::TwoB);
        let term = Term::new("PEPTIDE").with_tag(LocalizedTag::new(3, [mass(), phospho()]));
        assert_eq!(term.five_level(1), FiveLevel::One);
        let term = Term::new("PEPTIDE").with_c_term([mass()]);
        assert_eq!(term.five_level(1), FiveLevel::TwoB);
        let term = Term::new("PEPTIDE")
            .with_tag_group(TagGroup::new("g", mass(), [Membership::new(3)]));
        assert_eq!(term.five_level(1), FiveLevel::TwoB);
        let term = Term::new("PEPTIDE").with_unlocalized_tag(UnlocalizedTag::new([mass()]));
        assert_eq!(term.five_level(1), FiveLevel::Three);
    }

    #[test]
    fn sequence() {
        assert_eq!(Term::new("PEPTJDE").five_level(1), FiveLevel::TwoC);
        assert_eq!(Term::new("pepxide").five_level(1), FiveLevel::TwoC);
        assert_eq!(
            Term::new("PEPTIDE")
                .with_sequence_alternative("PEPTLDE")
                .five_level(1),
            FiveLevel::TwoC
        );
        assert_eq!(
            Term::new("PEPTBDE")
                .with_tag(LocalizedTag::range(0, 2, [mass()]))
                .five_level(3),
            FiveLevel::Five
        );
    }
}
