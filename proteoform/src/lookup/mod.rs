mod builtin;
mod composite;
mod formula;
mod ignore;
mod vocabulary;

use std::sync::Arc;

use context_error::{BoxedError, Context, CreateError};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

pub use builtin::*;
pub use composite::*;
pub use formula::*;
pub use ignore::*;
pub use vocabulary::*;

use crate::{
    chemistry::{MassMode, MolecularFormula},
    error::{ProteoformError, ProteoformResult},
    sequence::Descriptor,
    system::Mass,
};

/// The chemical change caused by a modification, together with the descriptor it was resolved from
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct ModificationDelta {
    formula: MolecularFormula,
    source: Descriptor,
}

impl ModificationDelta {
    /// Create a new delta
    pub const fn new(formula: MolecularFormula, source: Descriptor) -> Self {
        Self { formula, source }
    }

    /// The formula that this modification adds
    pub const fn formula(&self) -> &MolecularFormula {
        &self.formula
    }

    /// The descriptor that resolved to this delta
    pub const fn source(&self) -> &Descriptor {
        &self.source
    }

    /// The mass of this modification
    pub fn mass(&self, mode: MassMode) -> Mass {
        self.formula.mass(mode)
    }

    /// Merge two deltas that describe the same modification. Two deltas are the same when their
    /// formulas are identical, regardless of how they were written. The provenance of `self` is
    /// kept.
    /// # Errors
    /// A [`ProteoformError::Conflict`] if the formulas differ.
    pub fn merge(self, other: &Self) -> ProteoformResult<Self> {
        if self.formula == other.formula {
            Ok(self)
        } else {
            Err(BoxedError::new(
                ProteoformError::Conflict,
                "Conflicting modification descriptors",
                format!(
                    "The descriptors resolve to different formulas, {} is {} while {} is {}",
                    self.source, self.formula, other.source, other.formula
                ),
                Context::show(format!("{}|{}", self.source, other.source)),
            ))
        }
    }
}

/// The outcome of resolving one descriptor, or a set of descriptors
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Resolution {
    /// The descriptor resolved to this chemical delta
    Resolved(ModificationDelta),
    /// The descriptor is deliberately ignored, it carries no chemical information
    Ignored,
    /// This lookup does not know how to handle the descriptor
    Unresolved,
}

/// A strategy to turn modification descriptors into chemical formulas.
///
/// A lookup either claims a descriptor (and resolves it, ignores it, or fails with a hard error)
/// or leaves it [`Resolution::Unresolved`] so another lookup can handle it. A lookup that claims a
/// descriptor but cannot find it must fail with [`ProteoformError::LookupError`] and never return
/// `Unresolved`.
pub trait ModificationLookup: std::fmt::Debug + Send + Sync {
    /// Resolve a single descriptor.
    /// # Errors
    /// If the descriptor is claimed by this lookup but cannot be resolved.
    fn resolve_descriptor(&self, descriptor: &Descriptor) -> ProteoformResult<Resolution>;

    /// Resolve a set of descriptors that together annotate one site.
    ///
    /// Every descriptor is resolved on its own. If any is unresolved the set is unresolved. All
    /// resolved descriptors must agree on the formula. If nothing resolved the set is ignored.
    /// # Errors
    /// If any descriptor fails to resolve, or if the resolved formulas conflict.
    fn resolve(&self, descriptors: &[Descriptor]) -> ProteoformResult<Resolution> {
        let mut resolved: Option<ModificationDelta> = None;
        let mut unresolved = false;
        for descriptor in descriptors {
            match self.resolve_descriptor(descriptor)? {
                Resolution::Resolved(delta) => {
                    resolved = Some(match resolved {
                        Some(existing) => existing.merge(&delta).map_err(|err| {
                            BoxedError::new(
                                ProteoformError::Conflict,
                                "Conflicting modification descriptors",
                                "Descriptors on the same site resolve to different formulas",
                                Context::show(descriptors.iter().join("|")),
                            )
                            .add_underlying_errors(vec![err])
                        })?,
                        None => delta,
                    });
                }
                Resolution::Ignored => (),
                Resolution::Unresolved => unresolved = true,
            }
        }
        Ok(if unresolved {
            Resolution::Unresolved
        } else {
            resolved.map_or(Resolution::Ignored, Resolution::Resolved)
        })
    }
}

impl<T: ModificationLookup + ?Sized> ModificationLookup for Box<T> {
    fn resolve_descriptor(&self, descriptor: &Descriptor) -> ProteoformResult<Resolution> {
        (**self).resolve_descriptor(descriptor)
    }

    fn resolve(&self, descriptors: &[Descriptor]) -> ProteoformResult<Resolution> {
        (**self).resolve(descriptors)
    }
}

impl<T: ModificationLookup + ?Sized> ModificationLookup for Arc<T> {
    fn resolve_descriptor(&self, descriptor: &Descriptor) -> ProteoformResult<Resolution> {
        (**self).resolve_descriptor(descriptor)
    }

    fn resolve(&self, descriptors: &[Descriptor]) -> ProteoformResult<Resolution> {
        (**self).resolve(descriptors)
    }
}
