use context_error::{BoxedError, Context, CreateError};

use crate::{
    chemistry::MolecularFormula,
    error::{ProteoformError, ProteoformResult},
    lookup::{ModificationDelta, ModificationLookup, Resolution},
    sequence::{Descriptor, DescriptorKey},
};

/// Resolves `Formula:` descriptors by parsing the value as a ProForma molecular formula
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FormulaLookup;

impl ModificationLookup for FormulaLookup {
    fn resolve_descriptor(&self, descriptor: &Descriptor) -> ProteoformResult<Resolution> {
        if descriptor.key() != DescriptorKey::Formula {
            return Ok(Resolution::Unresolved);
        }
        MolecularFormula::pro_forma(descriptor.value())
            .map(|formula| Resolution::Resolved(ModificationDelta::new(formula, descriptor.clone())))
            .map_err(|err| {
                BoxedError::new(
                    ProteoformError::LookupError,
                    "Invalid modification",
                    "The formula of this modification could not be parsed",
                    Context::show(descriptor.to_string()),
                )
                .add_underlying_errors(vec![err])
            })
    }
}

/// Resolves mass shifts (`Mass:+15.995` or a bare `+15.995`) into a formula with only an additional
/// mass. Bare values that are not numbers are left unresolved.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MassLookup;

impl ModificationLookup for MassLookup {
    fn resolve_descriptor(&self, descriptor: &Descriptor) -> ProteoformResult<Resolution> {
        let mass = descriptor.value().trim().parse::<f64>().ok().filter(|m| m.is_finite());
        match (descriptor.key(), mass) {
            (DescriptorKey::Mass | DescriptorKey::None, Some(mass)) => {
                Ok(Resolution::Resolved(ModificationDelta::new(
                    MolecularFormula::with_additional_mass(mass),
                    descriptor.clone(),
                )))
            }
            (DescriptorKey::Mass, None) => Err(BoxedError::new(
                ProteoformError::LookupError,
                "Invalid modification",
                "The mass of this modification is not a valid number",
                Context::show(descriptor.to_string()),
            )),
            _ => Ok(Resolution::Unresolved),
        }
    }
}
