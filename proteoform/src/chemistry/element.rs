use std::num::NonZeroU16;

use serde::{Deserialize, Serialize};

use crate::system::{Mass, da};

/// The elements that can occur in residues and modifications, the discriminant is the atomic number.
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[allow(missing_docs)]
pub enum Element {
    H = 1,
    Li = 3,
    B = 5,
    C = 6,
    N = 7,
    O = 8,
    F = 9,
    Na = 11,
    Mg = 12,
    Si = 14,
    P = 15,
    S = 16,
    Cl = 17,
    K = 19,
    Ca = 20,
    Mn = 25,
    Fe = 26,
    Co = 27,
    Ni = 28,
    Cu = 29,
    Zn = 30,
    As = 33,
    Se = 34,
    Br = 35,
    Mo = 42,
    I = 53,
    Hg = 80,
}

/// All element symbols with the two letter symbols first, so a greedy scan never picks `S` for `Se`.
pub const ELEMENT_PARSE_LIST: &[(&str, Element)] = &[
    ("Li", Element::Li),
    ("Na", Element::Na),
    ("Mg", Element::Mg),
    ("Si", Element::Si),
    ("Cl", Element::Cl),
    ("Ca", Element::Ca),
    ("Mn", Element::Mn),
    ("Fe", Element::Fe),
    ("Co", Element::Co),
    ("Ni", Element::Ni),
    ("Cu", Element::Cu),
    ("Zn", Element::Zn),
    ("As", Element::As),
    ("Se", Element::Se),
    ("Br", Element::Br),
    ("Mo", Element::Mo),
    ("Hg", Element::Hg),
    ("H", Element::H),
    ("B", Element::B),
    ("C", Element::C),
    ("N", Element::N),
    ("O", Element::O),
    ("F", Element::F),
    ("P", Element::P),
    ("S", Element::S),
    ("K", Element::K),
    ("I", Element::I),
];

/// Isotopes with a defined mass (mass number, monoisotopic mass)
const H_ISOTOPES: &[(u16, f64)] = &[(1, 1.007_825_032_07), (2, 2.014_101_777_8)];
const C_ISOTOPES: &[(u16, f64)] = &[(12, 12.0), (13, 13.003_354_837_8)];
const N_ISOTOPES: &[(u16, f64)] = &[(14, 14.003_074_004_8), (15, 15.000_108_898_2)];
const O_ISOTOPES: &[(u16, f64)] = &[(16, 15.994_914_619_56), (18, 17.999_161_0)];
const NO_ISOTOPES: &[(u16, f64)] = &[];

impl Element {
    /// The element symbol
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::H => "H",
            Self::Li => "Li",
            Self::B => "B",
            Self::C => "C",
            Self::N => "N",
            Self::O => "O",
            Self::F => "F",
            Self::Na => "Na",
            Self::Mg => "Mg",
            Self::Si => "Si",
            Self::P => "P",
            Self::S => "S",
            Self::Cl => "Cl",
            Self::K => "K",
            Self::Ca => "Ca",
            Self::Mn => "Mn",
            Self::Fe => "Fe",
            Self::Co => "Co",
            Self::Ni => "Ni",
            Self::Cu => "Cu",
            Self::Zn => "Zn",
            Self::As => "As",
            Self::Se => "Se",
            Self::Br => "Br",
            Self::Mo => "Mo",
            Self::I => "I",
            Self::Hg => "Hg",
        }
    }

    /// Find the element with exactly this symbol (case sensitive)
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        ELEMENT_PARSE_LIST
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|(_, e)| *e)
    }

    /// The (monoisotopic mass, average weight) of the natural element
    const fn masses(self) -> (f64, f64) {
        match self {
            Self::H => (1.007_825_032_07, 1.007_94),
            Self::Li => (7.016_004_55, 6.941),
            Self::B => (11.009_305_4, 10.811),
            Self::C => (12.0, 12.010_7),
            Self::N => (14.003_074_004_8, 14.006_7),
            Self::O => (15.994_914_619_56, 15.999_4),
            Self::F => (18.998_403_22, 18.998_403_2),
            Self::Na => (22.989_769_280_9, 22.989_769_28),
            Self::Mg => (23.985_041_7, 24.305_0),
            Self::Si => (27.976_926_532_5, 28.085_5),
            Self::P => (30.973_761_63, 30.973_762),
            Self::S => (31.972_071_00, 32.065),
            Self::Cl => (34.968_852_68, 35.453),
            Self::K => (38.963_706_68, 39.098_3),
            Self::Ca => (39.962_590_98, 40.078),
            Self::Mn => (54.938_045_1, 54.938_045),
            Self::Fe => (55.934_937_5, 55.845),
            Self::Co => (58.933_195_0, 58.933_195),
            Self::Ni => (57.935_342_9, 58.693_4),
            Self::Cu => (62.929_597_5, 63.546),
            Self::Zn => (63.929_142_2, 65.38),
            Self::As => (74.921_596_5, 74.921_60),
            Self::Se => (79.916_521_3, 78.96),
            Self::Br => (78.918_337_1, 79.904),
            Self::Mo => (97.905_408_2, 95.96),
            Self::I => (126.904_473, 126.904_47),
            Self::Hg => (201.970_643, 200.59),
        }
    }

    /// Get all isotopes that can be specified explicitly for this element (mass number, mass)
    pub const fn isotopes(self) -> &'static [(u16, f64)] {
        match self {
            Self::H => H_ISOTOPES,
            Self::C => C_ISOTOPES,
            Self::N => N_ISOTOPES,
            Self::O => O_ISOTOPES,
            _ => NO_ISOTOPES,
        }
    }

    fn isotope_mass(self, isotope: NonZeroU16) -> Option<f64> {
        self.isotopes()
            .iter()
            .find(|(n, _)| *n == isotope.get())
            .map(|(_, m)| *m)
    }

    /// Validate this isotope to have a defined mass
    pub fn is_valid(self, isotope: Option<NonZeroU16>) -> bool {
        isotope.is_none_or(|isotope| self.isotope_mass(isotope).is_some())
    }

    /// The mass of the specified isotope of this element (if that isotope exists)
    pub fn mass(self, isotope: Option<NonZeroU16>) -> Option<Mass> {
        isotope
            .map_or(Some(self.masses().0), |isotope| self.isotope_mass(isotope))
            .map(da)
    }

    /// The average weight of the specified isotope of this element (if that isotope exists),
    /// a specific isotope has no distribution so its average weight is its mass.
    pub fn average_weight(self, isotope: Option<NonZeroU16>) -> Option<Mass> {
        isotope
            .map_or(Some(self.masses().1), |isotope| self.isotope_mass(isotope))
            .map(da)
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
#[expect(clippy::missing_panics_doc)]
mod tests {
    use std::num::NonZeroU16;

    use super::{ELEMENT_PARSE_LIST, Element};
    use crate::system::in_da;

    #[test]
    fn parse_list_is_complete_and_greedy() {
        for (symbol, element) in ELEMENT_PARSE_LIST {
            assert_eq!(element.symbol(), *symbol);
            assert_eq!(Element::from_symbol(symbol), Some(*element));
        }
        let first_single = ELEMENT_PARSE_LIST
            .iter()
            .position(|(s, _)| s.len() == 1)
            .unwrap();
        assert!(ELEMENT_PARSE_LIST[first_single..].iter().all(|(s, _)| s.len() == 1));
        assert_eq!(Element::from_symbol("Xx"), None);
    }

    #[test]
    fn isotopes() {
        assert!(Element::C.is_valid(None));
        assert!(Element::C.is_valid(NonZeroU16::new(13)));
        assert!(!Element::C.is_valid(NonZeroU16::new(14)));
        assert!(!Element::S.is_valid(NonZeroU16::new(34)));
        assert!(
            (in_da(Element::C.mass(NonZeroU16::new(13)).unwrap()) - 13.003_354_837_8).abs()
                < 1e-9
        );
        assert_eq!(Element::C.mass(NonZeroU16::new(14)), None);
        assert!((in_da(Element::C.average_weight(None).unwrap()) - 12.010_7).abs() < 1e-9);
    }
}
