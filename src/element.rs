//! Chemical elements and the few properties of them which are needed
//! to read identity strings and geometries.

use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Element symbols ordered by atomic number, starting at hydrogen.
const SYMBOLS: [&str; 86] = [
    "H", "He",
    "Li", "Be", "B", "C", "N", "O", "F", "Ne",
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar",
    "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn",
    "Ga", "Ge", "As", "Se", "Br", "Kr",
    "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd",
    "In", "Sn", "Sb", "Te", "I", "Xe",
    "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb", "Dy",
    "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt",
    "Au", "Hg", "Tl", "Pb", "Bi", "Po", "At", "Rn",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
/// A chemical element, identified by its atomic number.
///
/// Serialized as its symbol.
///
/// # Examples
/// ```
/// # use molspec::element::Element;
/// let oxygen: Element = "O".parse().unwrap();
/// assert_eq!(8, oxygen.atomic_number());
/// assert_eq!("O", oxygen.symbol());
/// ```
pub struct Element(u8);

impl Element {
    pub const HYDROGEN: Element = Element(1);

    /// Construct an element from its atomic number.
    pub fn from_atomic_number(number: u8) -> Option<Element> {
        if number >= 1 && (number as usize) <= SYMBOLS.len() {
            Some(Element(number))
        } else {
            None
        }
    }

    /// Look up an element by its case sensitive symbol.
    pub fn from_symbol(symbol: &str) -> Option<Element> {
        SYMBOLS.iter()
            .position(|&s| s == symbol)
            .map(|i| Element(i as u8 + 1))
    }

    pub fn atomic_number(&self) -> u8 {
        self.0
    }

    pub fn symbol(&self) -> &'static str {
        SYMBOLS[self.0 as usize - 1]
    }

    /// Normal valences of the elements which may be written without brackets
    /// in an identity string (the organic subset). Implicit hydrogens fill an
    /// atom up to the lowest of these which is not exceeded by its bonds.
    ///
    /// Returns an empty slice for all other elements, which never receive
    /// implicit hydrogens.
    pub fn default_valences(&self) -> &'static [u32] {
        match self.symbol() {
            "B" => &[3],
            "C" => &[4],
            "N" => &[3, 5],
            "O" => &[2],
            "P" => &[3, 5],
            "S" => &[2, 4, 6],
            "F" | "Cl" | "Br" | "I" => &[1],
            _ => &[],
        }
    }

    /// Whether the element may be written without brackets in an identity string.
    pub fn is_organic_subset(&self) -> bool {
        !self.default_valences().is_empty()
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Element {
    type Err = String;

    fn from_str(symbol: &str) -> Result<Element, Self::Err> {
        Element::from_symbol(symbol).ok_or(format!("unknown element '{}'", symbol))
    }
}

impl ::std::convert::TryFrom<String> for Element {
    type Error = String;

    fn try_from(symbol: String) -> Result<Element, Self::Error> {
        symbol.parse()
    }
}

impl From<Element> for String {
    fn from(element: Element) -> String {
        element.symbol().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json;

    #[test]
    fn symbols_and_atomic_numbers_agree() {
        for (i, symbol) in SYMBOLS.iter().enumerate() {
            let element = Element::from_symbol(symbol).unwrap();
            assert_eq!(i as u8 + 1, element.atomic_number());
            assert_eq!(Some(element), Element::from_atomic_number(i as u8 + 1));
        }
    }

    #[test]
    fn symbols_are_case_sensitive() {
        assert_eq!(Some(17), Element::from_symbol("Cl").map(|e| e.atomic_number()));
        assert!(Element::from_symbol("CL").is_none());
        assert!(Element::from_symbol("cl").is_none());
    }

    #[test]
    fn unknown_atomic_numbers_are_none() {
        assert!(Element::from_atomic_number(0).is_none());
        assert!(Element::from_atomic_number(87).is_none());
    }

    #[test]
    fn only_the_organic_subset_has_default_valences() {
        let organic = ["B", "C", "N", "O", "P", "S", "F", "Cl", "Br", "I"];

        for symbol in SYMBOLS.iter() {
            let element = Element::from_symbol(symbol).unwrap();
            assert_eq!(organic.contains(symbol), element.is_organic_subset(), "{}", symbol);
        }
    }

    #[test]
    fn element_is_serialized_as_its_symbol() {
        let element = Element::from_symbol("Na").unwrap();
        assert_eq!("\"Na\"", serde_json::to_string(&element).unwrap());
        assert_eq!(element, serde_json::from_str("\"Na\"").unwrap());
        assert!(serde_json::from_str::<Element>("\"Xx\"").is_err());
    }
}
