use std::num::NonZeroU16;

use context_error::{BoxedError, Context, CreateError};

use crate::{
    chemistry::{Element, MolecularFormula},
    error::{ProteoformError, ProteoformResult},
};

impl MolecularFormula {
    /// Parse a ProForma molecular formula.
    ///
    /// A formula is composed of pairs of atoms and their cardinality (`C2`), pairs may be separated
    /// by spaces. Cardinalities are positive or negative integers, a missing cardinality means one.
    /// Isotopes are written by prefixing the atom with its isotopic number in square brackets.
    /// ```text
    /// C12H20O2    C12 H20 O2    HN-1O2    [13C2][12C-2]H2N    [13C2]C-2H2N
    /// ```
    /// # Errors
    /// If the formula is empty, contains unknown elements, isotopes without a defined mass, or
    /// invalid numbers.
    ///
    /// ```rust
    /// use proteoform::prelude::*;
    /// assert!(MolecularFormula::pro_forma("C12H20O2").is_ok());
    /// assert!(MolecularFormula::pro_forma("C12 H20 O2").is_ok());
    /// assert!(MolecularFormula::pro_forma("HN-1O2").is_ok());
    /// assert!(MolecularFormula::pro_forma("[13C2][12C-2]H2N").is_ok());
    /// assert!(MolecularFormula::pro_forma("").is_err());
    /// ```
    pub fn pro_forma(value: &str) -> ProteoformResult<Self> {
        let error = |long: String| {
            BoxedError::new(
                ProteoformError::InvalidFormula,
                "Invalid ProForma molecular formula",
                long,
                Context::show(value.to_string()),
            )
        };
        let bytes = value.as_bytes();
        let mut index = 0;
        let mut found_any = false;
        let mut result = Self::default();

        while index < bytes.len() {
            match bytes[index] {
                b' ' => index += 1,
                b'[' => {
                    let close = bytes[index..]
                        .iter()
                        .position(|c| *c == b']')
                        .map(|p| index + p)
                        .ok_or_else(|| error("No closing square bracket found".to_string()))?;
                    let inner = value[index + 1..close].trim();
                    let isotope_len = inner.bytes().take_while(u8::is_ascii_digit).count();
                    let isotope = inner[..isotope_len].parse::<NonZeroU16>().map_err(|_| {
                        error(format!(
                            "The isotope number '{}' is not a valid isotope",
                            &inner[..isotope_len]
                        ))
                    })?;
                    let (element, rest) = parse_element(inner[isotope_len..].trim_start())
                        .ok_or_else(|| error(format!("Invalid element in '{inner}'")))?;
                    let (count, rest) = parse_count(rest.trim_start())
                        .ok_or_else(|| error(format!("Invalid element count in '{inner}'")))?;
                    if !rest.trim().is_empty() {
                        return Err(error(format!("Trailing characters in '{inner}'")));
                    }
                    if !element.is_valid(Some(isotope)) {
                        return Err(error(format!(
                            "The isotope {isotope}{element} has no defined mass"
                        )));
                    }
                    if !result.add_element((element, Some(isotope), count)) {
                        return Err(error(format!(
                            "The total count of {isotope}{element} is too big"
                        )));
                    }
                    found_any = true;
                    index = close + 1;
                }
                b'A'..=b'Z' => {
                    let (element, rest) = parse_element(&value[index..]).ok_or_else(|| {
                        error(format!("Invalid element at position {}", index + 1))
                    })?;
                    let rest = rest.trim_start_matches(' ');
                    let (count, rest) = parse_count(rest).ok_or_else(|| {
                        error(format!("Invalid element count for {element}"))
                    })?;
                    if !result.add_element((element, None, count)) {
                        return Err(error(format!("The total count of {element} is too big")));
                    }
                    found_any = true;
                    index = value.len() - rest.len();
                }
                _ => {
                    return Err(error(format!(
                        "Unexpected character '{}' at position {}",
                        value[index..].chars().next().unwrap_or_default(),
                        index + 1
                    )));
                }
            }
        }

        if found_any {
            Ok(result)
        } else {
            Err(error("The formula is empty".to_string()))
        }
    }
}

/// Parse an element symbol (an uppercase letter followed by lowercase letters) from the start of the text.
fn parse_element(text: &str) -> Option<(Element, &str)> {
    if !text.starts_with(|c: char| c.is_ascii_uppercase()) {
        return None;
    }
    let len = 1 + text[1..]
        .bytes()
        .take_while(u8::is_ascii_lowercase)
        .count();
    Element::from_symbol(&text[..len]).map(|e| (e, &text[len..]))
}

/// Parse a signed element count from the start of the text, an absent count is one.
fn parse_count(text: &str) -> Option<(i32, &str)> {
    let sign_len = usize::from(text.starts_with(['-', '+']));
    let digits = text[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return (sign_len == 0).then_some((1, text));
    }
    text[..sign_len + digits]
        .parse::<i32>()
        .ok()
        .map(|n| (n, &text[sign_len + digits..]))
}

#[cfg(test)]
#[expect(clippy::missing_panics_doc)]
mod tests {
    use context_error::FullErrorContent;

    use crate::{ProteoformError, chemistry::MolecularFormula};

    #[test]
    fn pro_forma_simple() {
        assert_eq!(
            MolecularFormula::pro_forma("C2H3N1O1").unwrap(),
            molecular_formula!(C 2 H 3 N 1 O 1)
        );
        assert_eq!(
            MolecularFormula::pro_forma("C2H3NO").unwrap(),
            molecular_formula!(C 2 H 3 N 1 O 1)
        );
        assert_eq!(
            MolecularFormula::pro_forma("HN-1O2").unwrap(),
            molecular_formula!(H 1 N -1 O 2)
        );
        assert_eq!(
            MolecularFormula::pro_forma("Se1Na2").unwrap(),
            molecular_formula!(Se 1 Na 2)
        );
    }

    #[test]
    fn pro_forma_spaces() {
        assert_eq!(
            MolecularFormula::pro_forma("C1[13C1]H6"),
            MolecularFormula::pro_forma("C 1 [ 13 C 1 ] H 6")
        );
        assert_eq!(
            MolecularFormula::pro_forma("C12 H20 O2").unwrap(),
            molecular_formula!(C 12 H 20 O 2)
        );
    }

    #[test]
    fn pro_forma_isotopes() {
        assert_eq!(
            MolecularFormula::pro_forma("[13C2][12C-2]H2N").unwrap(),
            molecular_formula!([13 C 2] [12 C -2] H 2 N 1)
        );
        assert_eq!(
            MolecularFormula::pro_forma("[13C2]C-2H2N").unwrap(),
            molecular_formula!([13 C 2] C -2 H 2 N 1)
        );
    }

    #[test]
    fn pro_forma_invalid() {
        for invalid in [
            "",
            "   ",
            "Xx2",
            "C2H3[13C",
            "[14C1]",
            "C--1",
            "c2",
            "C2!",
            "C2147483648",
            "C2147483647C1",
            "[13C2147483647][13C1]",
            "H-2147483648H-1",
        ] {
            let result = MolecularFormula::pro_forma(invalid);
            assert!(result.is_err(), "{invalid} should not parse");
            assert!(matches!(
                result.unwrap_err().get_kind(),
                ProteoformError::InvalidFormula
            ));
        }
    }
}
