use std::fmt::Write;

use itertools::Itertools;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use thin_vec::ThinVec;

use crate::sequence::Descriptor;

/// One or more descriptors anchored to a zero based position (or range) on the sequence
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct LocalizedTag {
    descriptors: ThinVec<Descriptor>,
    start: usize,
    end: usize,
}

impl LocalizedTag {
    /// A tag on a single residue
    pub fn new(index: usize, descriptors: impl IntoIterator<Item = Descriptor>) -> Self {
        Self::range(index, index, descriptors)
    }

    /// A tag somewhere within the inclusive range `start..=end`
    pub fn range(
        start: usize,
        end: usize,
        descriptors: impl IntoIterator<Item = Descriptor>,
    ) -> Self {
        Self {
            descriptors: descriptors.into_iter().collect(),
            start,
            end,
        }
    }

    /// The descriptors
    pub fn descriptors(&self) -> &[Descriptor] {
        &self.descriptors
    }

    /// The first residue index
    pub const fn start(&self) -> usize {
        self.start
    }

    /// The last residue index (inclusive)
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Check if this tag spans more than one residue
    pub const fn is_range(&self) -> bool {
        self.start != self.end
    }
}

/// One or more descriptors not anchored to the sequence, occurring `count` times
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct UnlocalizedTag {
    descriptors: ThinVec<Descriptor>,
    count: u32,
}

impl UnlocalizedTag {
    /// A tag occurring once
    pub fn new(descriptors: impl IntoIterator<Item = Descriptor>) -> Self {
        Self {
            descriptors: descriptors.into_iter().collect(),
            count: 1,
        }
    }

    /// Set the number of times this tag occurs
    #[must_use]
    pub const fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// The descriptors
    pub fn descriptors(&self) -> &[Descriptor] {
        &self.descriptors
    }

    /// The multiplicity
    pub const fn count(&self) -> u32 {
        self.count
    }
}

/// A site that is part of a tag group, with an optional localisation weight
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Membership {
    index: usize,
    weight: Option<OrderedFloat<f64>>,
}

impl Membership {
    /// A member without weight
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            weight: None,
        }
    }

    /// A member with the given weight
    pub const fn weighted(index: usize, weight: f64) -> Self {
        Self {
            index,
            weight: Some(OrderedFloat(weight)),
        }
    }

    /// The zero based residue index
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The weight, if given
    pub fn weight(&self) -> Option<f64> {
        self.weight.map(|w| w.0)
    }
}

/// A single logical modification referenced from multiple sites that share one group name
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct TagGroup {
    name: Box<str>,
    descriptor: Descriptor,
    members: ThinVec<Membership>,
}

impl TagGroup {
    /// Create a new group
    pub fn new(
        name: impl Into<Box<str>>,
        descriptor: Descriptor,
        members: impl IntoIterator<Item = Membership>,
    ) -> Self {
        Self {
            name: name.into(),
            descriptor,
            members: members.into_iter().collect(),
        }
    }

    /// The group name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The descriptor shared by all members
    pub const fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// The member sites
    pub fn members(&self) -> &[Membership] {
        &self.members
    }
}

/// A tokenized proteoform term: a sequence with all its annotations.
///
/// All indices are zero based residue indices. The term is built up with the `with_*` methods:
/// ```rust
/// use proteoform::prelude::*;
/// let term = Term::new("PEPTIDE")
///     .with_tag(LocalizedTag::new(1, [Descriptor::name(EvidenceType::Unimod, "Phospho")]))
///     .with_n_term([Descriptor::name(EvidenceType::None, "Acetyl")]);
/// assert_eq!(term.to_string(), "[Acetyl]-PE[U:Phospho]PTIDE");
/// ```
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Term {
    sequence: Box<str>,
    localized_tags: Vec<LocalizedTag>,
    unlocalized_tags: Vec<UnlocalizedTag>,
    n_term: Vec<Descriptor>,
    c_term: Vec<Descriptor>,
    labile: Vec<Descriptor>,
    tag_groups: Vec<TagGroup>,
    sequence_alternatives: Vec<Box<str>>,
}

impl Term {
    /// A term for this sequence without any annotations
    pub fn new(sequence: impl Into<Box<str>>) -> Self {
        Self {
            sequence: sequence.into(),
            ..Self::default()
        }
    }

    /// Add a localized or range tag
    #[must_use]
    pub fn with_tag(mut self, tag: LocalizedTag) -> Self {
        self.localized_tags.push(tag);
        self
    }

    /// Add multiple localized or range tags
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = LocalizedTag>) -> Self {
        self.localized_tags.extend(tags);
        self
    }

    /// Add an unlocalized tag
    #[must_use]
    pub fn with_unlocalized_tag(mut self, tag: UnlocalizedTag) -> Self {
        self.unlocalized_tags.push(tag);
        self
    }

    /// Add descriptors to the N terminus
    #[must_use]
    pub fn with_n_term(mut self, descriptors: impl IntoIterator<Item = Descriptor>) -> Self {
        self.n_term.extend(descriptors);
        self
    }

    /// Add descriptors to the C terminus
    #[must_use]
    pub fn with_c_term(mut self, descriptors: impl IntoIterator<Item = Descriptor>) -> Self {
        self.c_term.extend(descriptors);
        self
    }

    /// Add a labile modification
    #[must_use]
    pub fn with_labile(mut self, descriptor: Descriptor) -> Self {
        self.labile.push(descriptor);
        self
    }

    /// Add a tag group
    #[must_use]
    pub fn with_tag_group(mut self, group: TagGroup) -> Self {
        self.tag_groups.push(group);
        self
    }

    /// Add an alternative reading of the sequence, any alternative makes the sequence ambiguous
    #[must_use]
    pub fn with_sequence_alternative(mut self, sequence: impl Into<Box<str>>) -> Self {
        self.sequence_alternatives.push(sequence.into());
        self
    }

    /// The base sequence as one letter codes
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    /// The localized and range tags
    pub fn localized_tags(&self) -> &[LocalizedTag] {
        &self.localized_tags
    }

    /// The unlocalized tags
    pub fn unlocalized_tags(&self) -> &[UnlocalizedTag] {
        &self.unlocalized_tags
    }

    /// The N terminal descriptors
    pub fn n_term(&self) -> &[Descriptor] {
        &self.n_term
    }

    /// The C terminal descriptors
    pub fn c_term(&self) -> &[Descriptor] {
        &self.c_term
    }

    /// The labile descriptors
    pub fn labile(&self) -> &[Descriptor] {
        &self.labile
    }

    /// The tag groups
    pub fn tag_groups(&self) -> &[TagGroup] {
        &self.tag_groups
    }

    /// The alternative readings of the sequence
    pub fn sequence_alternatives(&self) -> &[Box<str>] {
        &self.sequence_alternatives
    }
}

fn write_descriptors(buffer: &mut String, descriptors: &[Descriptor]) {
    write!(buffer, "[{}]", descriptors.iter().join("|")).unwrap();
}

impl std::fmt::Display for Term {
    /// Write the term in a simplified ProForma notation
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut buffer = String::new();
        for labile in &self.labile {
            write!(buffer, "{{{labile}}}").unwrap();
        }
        for tag in &self.unlocalized_tags {
            write_descriptors(&mut buffer, &tag.descriptors);
            if tag.count != 1 {
                write!(buffer, "^{}", tag.count).unwrap();
            }
            buffer.push('?');
        }
        if !self.n_term.is_empty() {
            write_descriptors(&mut buffer, &self.n_term);
            buffer.push('-');
        }
        let mut seen_groups = Vec::new();
        for (index, residue) in self.sequence.chars().enumerate() {
            if self.localized_tags.iter().any(|t| t.is_range() && t.start == index) {
                buffer.push('(');
            }
            buffer.push(residue);
            for tag in self.localized_tags.iter().filter(|t| !t.is_range() && t.start == index) {
                write_descriptors(&mut buffer, &tag.descriptors);
            }
            for group in &self.tag_groups {
                for member in group.members.iter().filter(|m| m.index == index) {
                    if seen_groups.contains(&group.name()) {
                        write!(buffer, "[#{}", group.name).unwrap();
                    } else {
                        write!(buffer, "[{}#{}", group.descriptor, group.name).unwrap();
                        seen_groups.push(group.name());
                    }
                    if let Some(weight) = member.weight {
                        write!(buffer, "({weight})").unwrap();
                    }
                    buffer.push(']');
                }
            }
            for tag in self.localized_tags.iter().filter(|t| t.is_range() && t.end == index) {
                buffer.push(')');
                write_descriptors(&mut buffer, &tag.descriptors);
            }
        }
        if !self.c_term.is_empty() {
            buffer.push('-');
            write_descriptors(&mut buffer, &self.c_term);
        }
        write!(f, "{buffer}")
    }
}

#[cfg(test)]
#[expect(clippy::missing_panics_doc)]
mod tests {
    use super::{LocalizedTag, Membership, TagGroup, Term, UnlocalizedTag};
    use crate::sequence::{Descriptor, DescriptorKey, EvidenceType};

    #[test]
    fn builder() {
        let term = Term::new("PEPTIDE")
            .with_tag(LocalizedTag::range(1, 3, [Descriptor::keyed(
                DescriptorKey::Mass,
                "+79.966",
            )]))
            .with_unlocalized_tag(
                UnlocalizedTag::new([Descriptor::name(EvidenceType::None, "Oxidation")])
                    .with_count(2),
            )
            .with_labile(Descriptor::keyed(DescriptorKey::Glycan, "Hex1"))
            .with_sequence_alternative("PEPTLDE");
        assert_eq!(term.sequence(), "PEPTIDE");
        assert_eq!(term.localized_tags().len(), 1);
        assert!(term.localized_tags()[0].is_range());
        assert_eq!(term.unlocalized_tags()[0].count(), 2);
        assert_eq!(term.labile().len(), 1);
        assert_eq!(term.sequence_alternatives().len(), 1);
        assert!(term.n_term().is_empty());
        assert!(term.tag_groups().is_empty());
    }

    #[test]
    fn display() {
        let phospho = Descriptor::name(EvidenceType::None, "Phospho");
        let term = Term::new("PEPTIDE")
            .with_tag(LocalizedTag::range(1, 3, [Descriptor::keyed(
                DescriptorKey::Mass,
                "+79.966",
            )]))
            .with_c_term([Descriptor::name(EvidenceType::None, "Amidated")])
            .with_tag_group(TagGroup::new("g1", phospho, [
                Membership::weighted(4, 0.25),
                Membership::new(5),
            ]));
        assert_eq!(
            term.to_string(),
            "P(EPT)[Mass:+79.966]I[Phospho#g1(0.25)]D[#g1]E-[Amidated]"
        );
        let term = Term::new("PEPTIDE")
            .with_unlocalized_tag(
                UnlocalizedTag::new([Descriptor::name(EvidenceType::None, "Oxidation")])
                    .with_count(2),
            )
            .with_labile(Descriptor::keyed(DescriptorKey::Glycan, "Hex1"));
        assert_eq!(term.to_string(), "{Glycan:Hex1}[Oxidation]^2?PEPTIDE");
    }
}
