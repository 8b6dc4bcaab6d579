#![doc = include_str!("../README.md")]

/// Contains all things related to the underlying chemistry.
pub mod chemistry;
/// The five-level proteoform classification, both on structured terms and on raw PrSM strings.
pub mod classification;
mod error;
/// All strategies to resolve modification descriptors into chemical formulas.
pub mod lookup;
mod proteoform_group;
/// Contains the annotation model: amino acids, descriptors, tags, and terms.
pub mod sequence;
pub mod system;


pub use error::*;
pub use proteoform_group::*;

/// A subset of the types and traits that are envisioned to be used the most, importing this is a good starting point for working with the crate
pub mod prelude {
    pub use crate::chemistry::{Element, MassMode, MolecularFormula};
    pub use crate::classification::{FiveLevel, LevelFlags, classify, classify_prsm, classify_term};
    pub use crate::error::ProteoformError;
    pub use crate::lookup::{
        CompositeLookup, EvidenceLookup, FormulaLookup, IgnoreKeyLookup, MassLookup,
        ModificationDelta, ModificationLookup, NamedVocabularyLookup, Resolution, Vocabulary,
        VocabularyEntry,
    };
    pub use crate::molecular_formula;
    pub use crate::proteoform_group::{
        GlobalModification, ProteoformGroup, SiteModification,
    };
    pub use crate::sequence::{
        AminoAcid, Descriptor, DescriptorKey, EvidenceType, LocalizedTag, Membership, TagGroup,
        Term, UnlocalizedTag,
    };
}
