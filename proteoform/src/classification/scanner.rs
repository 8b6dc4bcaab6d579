//! A bracket depth scanner for the raw sequence notation used in PrSM reports (`PEP[+79.966]TIDE`)

use serde::{Deserialize, Serialize};

/// One alternative of a raw sequence split into its base sequence and its modifications
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct ScannedSequence {
    /// The sequence with all top level bracketed spans removed
    pub base: String,
    /// The modifications as (one based index of the preceding residue, raw text). Modifications
    /// before the first residue have index 0. Nested brackets are kept in the text verbatim.
    pub modifications: Vec<(usize, String)>,
}

/// Scan one alternative. Unbalanced brackets are tolerated: an unclosed modification runs to the
/// end of the text and a closing bracket outside of any modification is skipped.
pub fn scan_sequence(text: &str) -> ScannedSequence {
    let mut result = ScannedSequence::default();
    let mut depth = 0_usize;
    let mut position = 0;
    let mut residues = 0;
    let mut buffer = String::new();

    for c in text.chars() {
        match (c, depth) {
            ('[', 0) => {
                depth = 1;
                position = residues;
            }
            ('[', _) => {
                depth += 1;
                buffer.push(c);
            }
            (']', 0) => (),
            (']', 1) => {
                depth = 0;
                result
                    .modifications
                    .push((position, std::mem::take(&mut buffer)));
            }
            (']', _) => {
                depth -= 1;
                buffer.push(c);
            }
            (_, 0) => {
                result.base.push(c);
                residues += 1;
            }
            (_, _) => buffer.push(c),
        }
    }
    if depth > 0 {
        result.modifications.push((position, buffer));
    }
    result
}
