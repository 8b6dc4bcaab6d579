//! Resolve an annotated [`Term`] into a fully defined chemical entity

use std::collections::BTreeMap;

use context_error::{BoxedError, Context, CreateError, FullErrorContent};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    chemistry::{MassMode, MolecularFormula},
    error::{ProteoformError, ProteoformResult},
    lookup::{ModificationDelta, ModificationLookup, Resolution},
    molecular_formula,
    sequence::{AminoAcid, Descriptor, Term},
    system::Mass,
};

/// A resolved modification on a single residue
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct SiteModification {
    index: usize,
    delta: ModificationDelta,
}

impl SiteModification {
    /// The zero based residue index
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The resolved modification
    pub const fn delta(&self) -> &ModificationDelta {
        &self.delta
    }
}

/// A resolved modification that is not placed on the sequence, either unlocalized or labile
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct GlobalModification {
    delta: ModificationDelta,
    count: u32,
    labile: bool,
}

impl GlobalModification {
    /// The resolved modification
    pub const fn delta(&self) -> &ModificationDelta {
        &self.delta
    }

    /// The number of times this modification occurs
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Check if this is a labile modification
    pub const fn is_labile(&self) -> bool {
        self.labile
    }

    /// The total formula, the formula of the modification times the count
    pub fn formula(&self) -> MolecularFormula {
        self.checked_formula().unwrap_or_else(|| {
            self.delta.formula() * i32::try_from(self.count).unwrap_or(i32::MAX)
        })
    }

    /// The total formula, `None` if the element counts overflow
    fn checked_formula(&self) -> Option<MolecularFormula> {
        self.delta
            .formula()
            .checked_mul(i32::try_from(self.count).ok()?)
    }
}

/// A proteoform with all its modifications resolved to chemical formulas.
///
/// Site modifications, terminal modifications, and global modifications are kept separately.
/// The collections are `None` when nothing was recorded, never an empty list.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ProteoformGroup {
    residues: Vec<(AminoAcid, MolecularFormula)>,
    modifications: Option<Vec<SiteModification>>,
    n_term: Option<ModificationDelta>,
    c_term: Option<ModificationDelta>,
    global_modifications: Option<Vec<GlobalModification>>,
    formula: MolecularFormula,
}

/// Resolves descriptor sets for one build, turning every outcome other than a resolved or ignored
/// set into an error that points at the offending location.
struct SiteResolver<'a> {
    lookup: Option<&'a dyn ModificationLookup>,
}

impl SiteResolver<'_> {
    fn resolve(
        &self,
        descriptors: &[Descriptor],
        location: &str,
    ) -> ProteoformResult<Option<ModificationDelta>> {
        let Some(lookup) = self.lookup else {
            return Err(BoxedError::new(
                ProteoformError::NoApplicableLookup,
                "Could not build proteoform group",
                format!("No modification lookup was supplied to resolve the modification at {location}"),
                Context::show(descriptors.iter().join("|")),
            ));
        };
        match lookup.resolve(descriptors) {
            Ok(Resolution::Resolved(delta)) => {
                tracing::debug!(location, formula = %delta.formula(), "Resolved modification");
                Ok(Some(delta))
            }
            Ok(Resolution::Ignored) => {
                tracing::trace!(location, "Ignored modification");
                Ok(None)
            }
            Ok(Resolution::Unresolved) => Err(BoxedError::new(
                ProteoformError::NoApplicableLookup,
                "Could not build proteoform group",
                format!("No lookup could handle the modification at {location}"),
                Context::show(descriptors.iter().join("|")),
            )),
            Err(err) => Err(wrap(err, location)),
        }
    }
}

/// Wrap an error with the location in the proteoform, keeping the kind of the underlying error
fn wrap(err: BoxedError<'static, ProteoformError>, location: &str) -> BoxedError<'static, ProteoformError> {
    BoxedError::new(
        err.get_kind(),
        "Could not build proteoform group",
        format!("The modification at {location} could not be resolved"),
        Context::show(location.to_string()),
    )
    .add_underlying_errors(vec![err])
}

/// The element counts of a formula do not fit in an `i32`
fn too_big(location: String) -> BoxedError<'static, ProteoformError> {
    BoxedError::new(
        ProteoformError::InvalidFormula,
        "Could not build proteoform group",
        "The number of atoms of an element in this proteoform is too big",
        Context::show(location),
    )
}

fn check_index(index: usize, length: usize, location: &str) -> ProteoformResult<()> {
    if index < length {
        Ok(())
    } else {
        Err(BoxedError::new(
            ProteoformError::InvalidIndex,
            "Could not build proteoform group",
            format!("The index {index} is outside of the sequence of length {length}"),
            Context::show(location.to_string()),
        ))
    }
}

/// Merge a site modification into the sites found so far, same site modifications need to be
/// chemically identical.
fn add_site(
    sites: &mut BTreeMap<usize, ModificationDelta>,
    index: usize,
    delta: ModificationDelta,
    location: &str,
) -> ProteoformResult<()> {
    if let Some(existing) = sites.remove(&index) {
        let merged = existing.merge(&delta).map_err(|err| wrap(err, location))?;
        sites.insert(index, merged);
    } else {
        sites.insert(index, delta);
    }
    Ok(())
}

impl ProteoformGroup {
    /// Resolve all modifications in the term with the given lookup and calculate the full
    /// chemical formula.
    /// # Errors
    /// * [`ProteoformError::UnknownResidue`] if the sequence contains a residue without a defined
    ///   composition (B, Z, X, or any unknown code).
    /// * [`ProteoformError::InvalidIndex`] if a tag or group member points outside the sequence.
    /// * [`ProteoformError::NoApplicableLookup`] if no lookup is given or no lookup handles a
    ///   modification.
    /// * [`ProteoformError::Conflict`] if multiple modifications on one site (or terminus) resolve
    ///   to different formulas.
    /// * Any error from the lookup itself.
    pub fn build(term: &Term, lookup: Option<&dyn ModificationLookup>) -> ProteoformResult<Self> {
        let resolver = SiteResolver { lookup };

        let residues = term
            .sequence()
            .chars()
            .enumerate()
            .map(|(index, code)| {
                AminoAcid::try_from(code)
                    .ok()
                    .and_then(|aa| aa.formula().map(|f| (aa, f)))
                    .ok_or_else(|| {
                        BoxedError::new(
                            ProteoformError::UnknownResidue,
                            "Could not build proteoform group",
                            format!(
                                "The residue '{code}' at index {index} does not have a defined composition"
                            ),
                            Context::show(term.sequence().to_string()),
                        )
                    })
            })
            .collect::<ProteoformResult<Vec<_>>>()?;
        let length = residues.len();

        let mut sites = BTreeMap::new();
        for tag in term.localized_tags() {
            let location = format!("index {} [{}]", tag.start(), tag.descriptors().iter().join("|"));
            check_index(tag.start(), length, &location)?;
            check_index(tag.end(), length, &location)?;
            if tag.start() > tag.end() {
                return Err(BoxedError::new(
                    ProteoformError::InvalidIndex,
                    "Could not build proteoform group",
                    format!("The range {}..={} is reversed", tag.start(), tag.end()),
                    Context::show(location),
                ));
            }
            if let Some(delta) = resolver.resolve(tag.descriptors(), &location)? {
                add_site(&mut sites, tag.start(), delta, &location)?;
            }
        }

        for group in term.tag_groups().iter().filter(|g| !g.members().is_empty()) {
            let location = format!("group #{} [{}]", group.name(), group.descriptor());
            for member in group.members() {
                check_index(member.index(), length, &location)?;
            }
            if let Some(delta) = resolver.resolve(std::slice::from_ref(group.descriptor()), &location)? {
                for member in group.members() {
                    add_site(&mut sites, member.index(), delta.clone(), &location)?;
                }
            }
        }

        let n_term = if term.n_term().is_empty() {
            None
        } else {
            resolver.resolve(
                term.n_term(),
                &format!("N-terminus [{}]", term.n_term().iter().join("|")),
            )?
        };
        let c_term = if term.c_term().is_empty() {
            None
        } else {
            resolver.resolve(
                term.c_term(),
                &format!("C-terminus [{}]", term.c_term().iter().join("|")),
            )?
        };

        let mut global = Vec::new();
        for tag in term.unlocalized_tags() {
            let location = format!("unlocalized [{}]", tag.descriptors().iter().join("|"));
            if let Some(delta) = resolver.resolve(tag.descriptors(), &location)? {
                let modification = GlobalModification {
                    delta,
                    count: tag.count(),
                    labile: false,
                };
                if modification.checked_formula().is_none() {
                    return Err(too_big(format!("{location}^{}", tag.count())));
                }
                global.push(modification);
            }
        }
        for descriptor in term.labile() {
            let location = format!("labile {{{descriptor}}}");
            if let Some(delta) = resolver.resolve(std::slice::from_ref(descriptor), &location)? {
                global.push(GlobalModification {
                    delta,
                    count: 1,
                    labile: true,
                });
            }
        }

        let modifications = sites
            .into_iter()
            .map(|(index, delta)| SiteModification { index, delta })
            .collect_vec();

        let global_formulas = global.iter().map(GlobalModification::formula).collect_vec();
        let formula = residues
            .iter()
            .map(|(_, f)| f)
            .chain(std::iter::once(&molecular_formula!(H 2 O 1)))
            .chain(modifications.iter().map(|m| m.delta.formula()))
            .chain(n_term.iter().chain(c_term.iter()).map(ModificationDelta::formula))
            .chain(global_formulas.iter())
            .try_fold(MolecularFormula::default(), |acc, f| acc.checked_add(f))
            .ok_or_else(|| too_big(term.to_string()))?;

        Ok(Self {
            residues,
            modifications: (!modifications.is_empty()).then_some(modifications),
            n_term,
            c_term,
            global_modifications: (!global.is_empty()).then_some(global),
            formula,
        })
    }

    /// The residues with their residue formulas
    pub fn residues(&self) -> &[(AminoAcid, MolecularFormula)] {
        &self.residues
    }

    /// The site modifications ordered by index, `None` if there are none
    pub fn modifications(&self) -> Option<&[SiteModification]> {
        self.modifications.as_deref()
    }

    /// The N terminal modification
    pub const fn n_term(&self) -> Option<&ModificationDelta> {
        self.n_term.as_ref()
    }

    /// The C terminal modification
    pub const fn c_term(&self) -> Option<&ModificationDelta> {
        self.c_term.as_ref()
    }

    /// The unlocalized and labile modifications, `None` if there are none
    pub fn global_modifications(&self) -> Option<&[GlobalModification]> {
        self.global_modifications.as_deref()
    }

    /// The full formula of the proteoform: residues, water, and all modifications
    pub const fn formula(&self) -> &MolecularFormula {
        &self.formula
    }

    /// The mass of the full proteoform
    pub fn mass(&self, mode: MassMode) -> Mass {
        self.formula.mass(mode)
    }

    /// The monoisotopic mass of the full proteoform
    pub fn monoisotopic_mass(&self) -> Mass {
        self.formula.monoisotopic_mass()
    }

    /// The average mass of the full proteoform
    pub fn average_mass(&self) -> Mass {
        self.formula.average_weight()
    }
}
