use std::{
    fmt::Write,
    num::NonZeroU16,
    ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign},
};

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use thin_vec::ThinVec;

use crate::{
    chemistry::{Element, MassMode},
    system::{Mass, da},
};

/// A molecular formula, a selection of elements of specified isotopes together forming a structure.
///
/// The elements are kept sorted and elements with a count of zero are removed, so two formulas
/// describing the same composition always compare equal. Negative counts are allowed, which is
/// needed for modifications that remove atoms (for example `H-1N-1O1` for deamidation).
///
/// The arithmetic operators saturate element counts at the bounds of `i32`, use
/// [`Self::checked_add`] and [`Self::checked_mul`] to detect overflow instead.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct MolecularFormula {
    /// Save all constituent parts as the element in question, the isotope (or None for natural distribution), and the number of this part
    elements: ThinVec<(Element, Option<NonZeroU16>, i32)>,
    /// Any addition mass, defined to be monoisotopic
    additional_mass: OrderedFloat<f64>,
}

/// Easily define molecular formulas using the following syntax: `<element> <num>` or `[<isotope> <element> <num>]`
/// ```
/// # use proteoform::*;
/// molecular_formula!(C 12 [13 C 1] H 24);
/// ```
/// # Panics
/// It panics if the defined molecular formula uses an isotope that has no defined mass.
#[macro_export]
macro_rules! molecular_formula {
    ($($tail:tt)*) => {
        $crate::__formula_internal__!([$($tail)*] -> [])
    };
}

/// Internal code for the [`molecular_formula`] macro.
#[doc(hidden)]
#[macro_export]
macro_rules! __formula_internal__ {
    ([$e:ident $n:literal $($tail:tt)*] -> [$($output:tt)*]) => {
        $crate::__formula_internal__!([$($tail)*] -> [$($output)*($crate::chemistry::Element::$e, None, $n),])
    };
    ([[$i:literal $e:ident $n:literal] $($tail:tt)*] -> [$($output:tt)*]) => {
        $crate::__formula_internal__!([$($tail)*] -> [$($output)*($crate::chemistry::Element::$e, Some(std::num::NonZeroU16::new($i).unwrap()), $n),])
    };
    ([] -> [$($output:tt)*]) =>{
        $crate::chemistry::MolecularFormula::new(&[$($output)*]).unwrap()
    };
}

impl MolecularFormula {
    /// Create a new molecular formula, the elements will be sorted and simplified.
    /// Returns `None` if any of the isotopes used has no defined mass.
    pub fn new(elements: &[(Element, Option<NonZeroU16>, i32)]) -> Option<Self> {
        let mut result = Self::default();
        for element in elements {
            if !result.add_element(*element) {
                return None;
            }
        }
        Some(result)
    }

    /// Create a new molecular formula with the given additional mass (monoisotopic), without any elements
    pub fn with_additional_mass(additional_mass: f64) -> Self {
        Self {
            elements: ThinVec::new(),
            additional_mass: OrderedFloat(additional_mass),
        }
    }

    /// Add the given element to this formula, while keeping it sorted and simple.
    /// Returns false if the isotope has no defined mass or if the count would overflow, the
    /// formula is left untouched in that case.
    pub fn add_element(&mut self, element: (Element, Option<NonZeroU16>, i32)) -> bool {
        self.insert_element(element, false)
    }

    /// Add an element, on overflow either saturate the count or leave the formula untouched and
    /// return false.
    fn insert_element(
        &mut self,
        element: (Element, Option<NonZeroU16>, i32),
        saturate: bool,
    ) -> bool {
        if !element.0.is_valid(element.1) {
            return false;
        }
        if element.2 == 0 {
            return true;
        }
        match self
            .elements
            .binary_search_by(|probe| (probe.0, probe.1).cmp(&(element.0, element.1)))
        {
            Ok(index) => {
                let current = self.elements[index].2;
                let Some(count) = current
                    .checked_add(element.2)
                    .or_else(|| saturate.then_some(current.saturating_add(element.2)))
                else {
                    return false;
                };
                if count == 0 {
                    self.elements.remove(index);
                } else {
                    self.elements[index].2 = count;
                }
            }
            Err(index) => self.elements.insert(index, element),
        }
        true
    }

    /// Add two formulas, returns `None` if any element count overflows
    pub fn checked_add(&self, rhs: &Self) -> Option<Self> {
        let mut result = self.clone();
        for element in &rhs.elements {
            if !result.add_element(*element) {
                return None;
            }
        }
        result.additional_mass = OrderedFloat(self.additional_mass.0 + rhs.additional_mass.0);
        Some(result)
    }

    /// Multiply all element counts, returns `None` if any element count overflows
    pub fn checked_mul(&self, rhs: i32) -> Option<Self> {
        if rhs == 0 {
            return Some(Self::default());
        }
        Some(Self {
            elements: self
                .elements
                .iter()
                .map(|(e, i, n)| n.checked_mul(rhs).map(|n| (*e, *i, n)))
                .collect::<Option<_>>()?,
            additional_mass: OrderedFloat(self.additional_mass.0 * f64::from(rhs)),
        })
    }

    /// Get the elements making this formula
    pub fn elements(&self) -> &[(Element, Option<NonZeroU16>, i32)] {
        &self.elements
    }

    /// Get the additional mass of this formula
    pub fn additional_mass(&self) -> f64 {
        self.additional_mass.0
    }

    /// Check if this formula has no elements and no additional mass
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty() && self.additional_mass.0 == 0.0
    }

    /// Check if this formula contains a negative number of any element
    pub fn contains_negative_amount(&self) -> bool {
        self.elements.iter().any(|e| e.2 < 0)
    }

    /// The mass of the molecular formula of this element
    pub fn monoisotopic_mass(&self) -> Mass {
        let mut mass = da(self.additional_mass.0);
        for (e, i, n) in &self.elements {
            // Only isotopes with a defined mass can be added
            if let Some(m) = e.mass(*i) {
                mass += m * f64::from(*n);
            }
        }
        mass
    }

    /// The average weight of the molecular formula of this element
    pub fn average_weight(&self) -> Mass {
        let mut mass = da(self.additional_mass.0); // The additional mass is defined to be monoisotopic, but no better option exists
        for (e, i, n) in &self.elements {
            if let Some(m) = e.average_weight(*i) {
                mass += m * f64::from(*n);
            }
        }
        mass
    }

    /// Get the mass in the given mode
    pub fn mass(&self, mode: MassMode) -> Mass {
        match mode {
            MassMode::Monoisotopic => self.monoisotopic_mass(),
            MassMode::Average => self.average_weight(),
        }
    }

    /// Create a [Hill notation](https://en.wikipedia.org/wiki/Chemical_formula#Hill_system) from
    /// this collection of elements merged with the ProForma notation for specific isotopes. Any
    /// additional mass is appended as a signed number.
    pub fn hill_notation(&self) -> String {
        let mut buffer = String::new();
        let has_carbon = self.elements.iter().any(|e| e.0 == Element::C);
        let mut order: Vec<&(Element, Option<NonZeroU16>, i32)> = self.elements.iter().collect();
        order.sort_by(|a, b| {
            let rank = |e: Element| match e {
                Element::C if has_carbon => 0,
                Element::H if has_carbon => 1,
                _ => 2,
            };
            (rank(a.0), a.0.symbol(), a.1).cmp(&(rank(b.0), b.0.symbol(), b.1))
        });
        for (element, isotope, count) in order {
            if let Some(isotope) = isotope {
                write!(buffer, "[{isotope}{element}{count}]").unwrap();
            } else {
                write!(buffer, "{element}{count}").unwrap();
            }
        }
        if self.additional_mass.0 != 0.0 {
            write!(buffer, "{:+}", self.additional_mass.0).unwrap();
        }
        buffer
    }
}

impl std::fmt::Display for MolecularFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hill_notation())
    }
}

impl Add<&MolecularFormula> for &MolecularFormula {
    type Output = MolecularFormula;
    fn add(self, rhs: &MolecularFormula) -> Self::Output {
        let mut result = self.clone();
        result += rhs;
        result
    }
}

impl Sub<&MolecularFormula> for &MolecularFormula {
    type Output = MolecularFormula;
    fn sub(self, rhs: &MolecularFormula) -> Self::Output {
        let mut result = self.clone();
        result -= rhs;
        result
    }
}

impl AddAssign<&Self> for MolecularFormula {
    fn add_assign(&mut self, rhs: &Self) {
        for element in &rhs.elements {
            // All elements in an existing formula are valid
            self.insert_element(*element, true);
        }
        self.additional_mass = OrderedFloat(self.additional_mass.0 + rhs.additional_mass.0);
    }
}

impl SubAssign<&Self> for MolecularFormula {
    fn sub_assign(&mut self, rhs: &Self) {
        for (element, isotope, count) in &rhs.elements {
            self.insert_element((*element, *isotope, count.saturating_neg()), true);
        }
        self.additional_mass = OrderedFloat(self.additional_mass.0 - rhs.additional_mass.0);
    }
}

impl Mul<i32> for &MolecularFormula {
    type Output = MolecularFormula;
    fn mul(self, rhs: i32) -> Self::Output {
        if rhs == 0 {
            return MolecularFormula::default();
        }
        MolecularFormula {
            elements: self
                .elements
                .iter()
                .map(|(e, i, n)| (*e, *i, n.saturating_mul(rhs)))
                .collect(),
            additional_mass: OrderedFloat(self.additional_mass.0 * f64::from(rhs)),
        }
    }
}

impl Neg for &MolecularFormula {
    type Output = MolecularFormula;
    fn neg(self) -> Self::Output {
        self * -1
    }
}

macro_rules! impl_owned_ops {
    ($($trait:ident, $method:ident, $assign:ident, $assign_method:ident);*) => {$(
        impl $trait<MolecularFormula> for MolecularFormula {
            type Output = Self;
            fn $method(mut self, rhs: Self) -> Self::Output {
                self.$assign_method(&rhs);
                self
            }
        }
        impl $trait<&MolecularFormula> for MolecularFormula {
            type Output = Self;
            fn $method(mut self, rhs: &Self) -> Self::Output {
                self.$assign_method(rhs);
                self
            }
        }
        impl $trait<MolecularFormula> for &MolecularFormula {
            type Output = MolecularFormula;
            fn $method(self, rhs: MolecularFormula) -> Self::Output {
                self.$method(&rhs)
            }
        }
        impl $assign<MolecularFormula> for MolecularFormula {
            fn $assign_method(&mut self, rhs: Self) {
                self.$assign_method(&rhs);
            }
        }
    )*};
}

impl_owned_ops!(Add, add, AddAssign, add_assign; Sub, sub, SubAssign, sub_assign);

impl Mul<i32> for MolecularFormula {
    type Output = Self;
    fn mul(self, rhs: i32) -> Self::Output {
        &self * rhs
    }
}

impl Neg for MolecularFormula {
    type Output = Self;
    fn neg(self) -> Self::Output {
        -&self
    }
}

impl std::iter::Sum<Self> for MolecularFormula {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, f| acc + f)
    }
}

impl<'a> std::iter::Sum<&'a Self> for MolecularFormula {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, f| acc + f)
    }
}
