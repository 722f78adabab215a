//! Read SMILES strings.

use element::Element;
use error::{MolSpecError, Result};
use graph::{BondOrder, GraphAtom, MoleculeGraph};

use std::collections::HashMap;
use std::iter::Peekable;
use std::str::CharIndices;

/// Parse a SMILES string into a `MoleculeGraph`.
///
/// Supported are the organic subset (`B C N O P S F Cl Br I` and aromatic
/// `b c n o p s`), bracket atoms with isotope, chirality, hydrogen count,
/// charge and class (isotope, chirality and class are read but not kept),
/// bonds `- = # $ :` and `/ \` (as single bonds), branches, ring closures
/// (`1`-`9` and `%nn`) and disconnected parts separated by `.`.
///
/// Hydrogens are added as explicit atoms after all other atoms, in the order
/// of the atoms they are bonded to. Atoms in the organic subset are given
/// implicit hydrogens up to their lowest normal valence, bracket atoms only
/// get the hydrogens which are written out.
///
/// # Errors
/// Returns `MolSpecError::InvalidIdentity` for empty strings, unknown elements,
/// unbalanced branches and brackets, unclosed rings and dangling bonds.
///
/// # Examples
/// ```
/// # use molspec::identity::parse_smiles;
/// assert_eq!(9, parse_smiles("CCO").unwrap().num_atoms());
/// assert_eq!(12, parse_smiles("c1ccccc1").unwrap().num_atoms());
/// assert_eq!(1, parse_smiles("[Na+]").unwrap().formal_charge());
/// assert!(parse_smiles("C1CC").is_err());
/// ```
pub fn parse_smiles(smiles: &str) -> Result<MoleculeGraph> {
    SmilesReader::new(smiles)
        .read()
        .map_err(|err| MolSpecError::InvalidIdentity(format!("'{}': {}", smiles, err)))
}

// How many hydrogens an atom gets once the heavy atom graph is complete.
#[derive(Clone, Copy, Debug)]
enum Hydrogens {
    Implicit,
    Explicit(u32),
}

struct SmilesReader<'a> {
    chars: Peekable<CharIndices<'a>>,
    graph: MoleculeGraph,
    hydrogens: Vec<Hydrogens>,
    prev: Option<usize>,
    pending_bond: Option<BondOrder>,
    branches: Vec<usize>,
    rings: HashMap<u32, (usize, Option<BondOrder>)>,
}

type ReadResult<T> = ::std::result::Result<T, String>;

// Largest charge magnitude and hydrogen count of a bracket atom.
const MAX_CHARGE: u32 = 15;
const MAX_HYDROGENS: u32 = 9;

impl<'a> SmilesReader<'a> {
    fn new(smiles: &'a str) -> SmilesReader<'a> {
        SmilesReader {
            chars: smiles.char_indices().peekable(),
            graph: MoleculeGraph::new(),
            hydrogens: Vec::new(),
            prev: None,
            pending_bond: None,
            branches: Vec::new(),
            rings: HashMap::new(),
        }
    }

    fn read(mut self) -> ReadResult<MoleculeGraph> {
        while let Some((i, c)) = self.chars.next() {
            match c {
                '(' => {
                    let prev = self.prev.ok_or(format!("branch without a preceding atom at {}", i))?;
                    self.branches.push(prev);
                },
                ')' => {
                    if self.pending_bond.is_some() {
                        return Err(format!("bond without a following atom at {}", i));
                    }
                    self.prev = Some(self.branches.pop().ok_or(format!("unmatched ')' at {}", i))?);
                },
                '-' | '=' | '#' | '$' | ':' | '/' | '\\' => {
                    if self.pending_bond.is_some() {
                        return Err(format!("two bonds in a row at {}", i));
                    }
                    self.pending_bond = Some(bond_order(c));
                },
                '.' => {
                    if self.pending_bond.is_some() {
                        return Err(format!("bond without a following atom at {}", i));
                    }
                    self.prev = None;
                },
                '0'..='9' => {
                    let number = c.to_digit(10).unwrap_or(0);
                    self.ring_closure(number, i)?;
                },
                '%' => {
                    let number = self.read_two_digits(i)?;
                    self.ring_closure(number, i)?;
                },
                '[' => {
                    let (atom, num_hydrogens) = self.read_bracket_atom(i)?;
                    self.push_atom(atom, Hydrogens::Explicit(num_hydrogens), i)?;
                },
                c if c.is_ascii_alphabetic() => {
                    let atom = self.read_organic_atom(c, i)?;
                    self.push_atom(atom, Hydrogens::Implicit, i)?;
                },
                c => return Err(format!("unexpected character '{}' at {}", c, i)),
            }
        }

        if self.pending_bond.is_some() {
            return Err("bond without a following atom at end of string".to_string());
        }
        if !self.branches.is_empty() {
            return Err("unclosed branch".to_string());
        }
        if let Some(number) = self.rings.keys().min() {
            return Err(format!("unclosed ring {}", number));
        }
        if self.graph.num_atoms() == 0 {
            return Err("no atoms".to_string());
        }

        self.add_hydrogens();

        Ok(self.graph)
    }

    fn push_atom(&mut self, atom: GraphAtom, hydrogens: Hydrogens, i: usize) -> ReadResult<()> {
        let index = self.graph.add_atom(atom);
        self.hydrogens.push(hydrogens);

        match self.prev {
            Some(prev) => {
                let order = self.pending_bond.take()
                    .unwrap_or_else(|| self.default_bond(prev, index));
                self.graph.add_bond(prev, index, order);
            },
            None if self.pending_bond.is_some() => {
                return Err(format!("bond without a preceding atom at {}", i));
            },
            None => (),
        }

        self.prev = Some(index);

        Ok(())
    }

    fn ring_closure(&mut self, number: u32, i: usize) -> ReadResult<()> {
        let current = self.prev.ok_or(format!("ring closure without a preceding atom at {}", i))?;
        let bond = self.pending_bond.take();

        match self.rings.remove(&number) {
            Some((other, other_bond)) => {
                if other == current {
                    return Err(format!("ring {} closes on its own atom at {}", number, i));
                }
                if self.graph.has_bond(other, current) {
                    return Err(format!("ring bond duplicates an existing bond at {}", i));
                }

                let order = match (bond, other_bond) {
                    (Some(a), Some(b)) if a != b => {
                        return Err(format!("conflicting bonds for ring {} at {}", number, i));
                    },
                    (Some(order), _) | (None, Some(order)) => order,
                    (None, None) => self.default_bond(other, current),
                };

                self.graph.add_bond(other, current, order);
            },
            None => {
                self.rings.insert(number, (current, bond));
            },
        }

        Ok(())
    }

    fn default_bond(&self, i: usize, j: usize) -> BondOrder {
        if self.graph.atom(i).aromatic && self.graph.atom(j).aromatic {
            BondOrder::Aromatic
        } else {
            BondOrder::Single
        }
    }

    fn read_two_digits(&mut self, i: usize) -> ReadResult<u32> {
        let mut number = 0;

        for _ in 0..2 {
            let digit = self.chars.next()
                .and_then(|(_, c)| c.to_digit(10))
                .ok_or(format!("'%' must be followed by two digits at {}", i))?;
            number = number * 10 + digit;
        }

        Ok(number)
    }

    fn read_organic_atom(&mut self, c: char, i: usize) -> ReadResult<GraphAtom> {
        let aromatic = c.is_ascii_lowercase();
        let mut symbol = c.to_ascii_uppercase().to_string();

        // Cl and Br are the only two letter symbols
        if let Some(&(_, next)) = self.chars.peek() {
            if (c == 'C' && next == 'l') || (c == 'B' && next == 'r') {
                symbol.push(next);
                self.chars.next();
            }
        }

        let element = Element::from_symbol(&symbol)
            .filter(|element| element.is_organic_subset())
            .filter(|_| !aromatic || "BCNOPS".contains(symbol.as_str()))
            .ok_or(format!("'{}' at {} is not in the organic subset, use brackets", c, i))?;

        let mut atom = GraphAtom::new(element);
        atom.aromatic = aromatic;

        Ok(atom)
    }

    // [isotope? symbol chirality? hcount? charge? class?]
    fn read_bracket_atom(&mut self, start: usize) -> ReadResult<(GraphAtom, u32)> {
        let mut content = String::new();
        loop {
            match self.chars.next() {
                Some((_, ']')) => break,
                Some((_, c)) => content.push(c),
                None => return Err(format!("unclosed bracket atom at {}", start)),
            }
        }

        let mut rest = content.trim_start_matches(|c: char| c.is_ascii_digit());

        let (symbol, aromatic) = bracket_symbol(rest)
            .ok_or(format!("unknown element in '[{}]' at {}", content, start))?;
        rest = &rest[symbol.len()..];

        let mut atom = if aromatic {
            let mut upper = symbol[..1].to_uppercase();
            upper.push_str(&symbol[1..]);
            GraphAtom::new(element(&upper, start)?)
        } else {
            GraphAtom::new(element(symbol, start)?)
        };
        atom.aromatic = aromatic;

        rest = rest.trim_start_matches('@');

        let mut num_hydrogens = 0;
        if rest.starts_with('H') {
            rest = &rest[1..];
            let digits = leading_digits(rest);
            num_hydrogens = if digits.is_empty() { 1 } else { parse_number(digits, start)? };
            rest = &rest[digits.len()..];

            if num_hydrogens > MAX_HYDROGENS {
                return Err(format!("more than {} hydrogens in '[{}]' at {}",
                    MAX_HYDROGENS, content, start));
            }
        }

        if rest.starts_with('+') || rest.starts_with('-') {
            let sign = if rest.starts_with('+') { 1 } else { -1 };
            let sign_char = &rest[..1];
            let repeated = rest.len() - rest.trim_start_matches(sign_char).len();
            rest = &rest[repeated..];

            let digits = leading_digits(rest);
            let magnitude = if digits.is_empty() {
                repeated as u32
            } else if repeated == 1 {
                parse_number(digits, start)?
            } else {
                return Err(format!("malformed charge in '[{}]' at {}", content, start));
            };
            rest = &rest[digits.len()..];

            if repeated as u32 > MAX_CHARGE || magnitude > MAX_CHARGE {
                return Err(format!("charge magnitude above {} in '[{}]' at {}",
                    MAX_CHARGE, content, start));
            }

            atom.formal_charge = sign * magnitude as i32;
        }

        if rest.starts_with(':') {
            rest = rest[1..].trim_start_matches(|c: char| c.is_ascii_digit());
        }

        if !rest.is_empty() {
            return Err(format!("unexpected '{}' in '[{}]' at {}", rest, content, start));
        }

        Ok((atom, num_hydrogens))
    }

    fn add_hydrogens(&mut self) {
        let num_heavy = self.graph.num_atoms();

        for i in 0..num_heavy {
            let count = match self.hydrogens[i] {
                Hydrogens::Implicit => self.implicit_hydrogens(i),
                Hydrogens::Explicit(n) => n,
            };

            for _ in 0..count {
                let h = self.graph.add_atom(GraphAtom::new(Element::HYDROGEN));
                self.graph.add_bond(i, h, BondOrder::Single);
            }
        }
    }

    fn implicit_hydrogens(&self, i: usize) -> u32 {
        let atom = self.graph.atom(i);

        // Aromatic atoms which donate a pi electron count it as an extra bond.
        let aromatic_extra = match atom.element.symbol() {
            "B" | "C" | "N" | "P" if atom.aromatic => 1,
            _ => 0,
        };
        let valence = self.graph.bond_valence(i) + aromatic_extra;

        atom.element
            .default_valences()
            .iter()
            .find(|&&v| v >= valence)
            .map(|v| v - valence)
            .unwrap_or(0)
    }
}

fn bond_order(c: char) -> BondOrder {
    match c {
        '=' => BondOrder::Double,
        '#' => BondOrder::Triple,
        '$' => BondOrder::Quadruple,
        ':' => BondOrder::Aromatic,
        _ => BondOrder::Single,
    }
}

fn element(symbol: &str, i: usize) -> ReadResult<Element> {
    Element::from_symbol(symbol).ok_or(format!("unknown element '{}' at {}", symbol, i))
}

// Longest element symbol at the start of a bracket atom, and whether it is aromatic.
fn bracket_symbol(s: &str) -> Option<(&str, bool)> {
    for aromatic in &["se", "as"] {
        if s.starts_with(aromatic) {
            return Some((*aromatic, true));
        }
    }

    let mut chars = s.chars();
    match chars.next() {
        Some(c) if "bcnops".contains(c) => Some((&s[..1], true)),
        Some(c) if c.is_ascii_uppercase() => {
            match chars.next() {
                Some(d) if d.is_ascii_lowercase() && Element::from_symbol(&s[..2]).is_some() => {
                    Some((&s[..2], false))
                },
                _ => Some((&s[..1], false)),
            }
        },
        _ => None,
    }
}

fn leading_digits(s: &str) -> &str {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    &s[..end]
}

fn parse_number(digits: &str, i: usize) -> ReadResult<u32> {
    digits.parse::<u32>().map_err(|_| format!("bad number '{}' at {}", digits, i))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(graph: &MoleculeGraph) -> Vec<&'static str> {
        graph.atoms().map(|a| a.element.symbol()).collect()
    }

    #[test]
    fn water_gets_two_implicit_hydrogens_after_the_oxygen() {
        let graph = parse_smiles("O").unwrap();

        assert_eq!(vec!["O", "H", "H"], symbols(&graph));
        assert_eq!(2, graph.num_bonds());
        assert_eq!(0, graph.formal_charge());
    }

    #[test]
    fn ethanol_has_nine_atoms_with_hydrogens_last() {
        let graph = parse_smiles("CCO").unwrap();

        assert_eq!(9, graph.num_atoms());
        assert_eq!(8, graph.num_bonds());
        assert_eq!(vec!["C", "C", "O", "H", "H", "H", "H", "H", "H"], symbols(&graph));
    }

    #[test]
    fn two_letter_organic_atoms_are_read() {
        let graph = parse_smiles("ClCBr").unwrap();
        assert_eq!("CH2BrCl", &graph.formula());
    }

    #[test]
    fn double_and_triple_bonds_reduce_the_hydrogen_count() {
        assert_eq!("C2H4", &parse_smiles("C=C").unwrap().formula());
        assert_eq!("C2H2", &parse_smiles("C#C").unwrap().formula());
        assert_eq!("CO2", &parse_smiles("O=C=O").unwrap().formula());
    }

    #[test]
    fn branches_are_bonded_to_the_atom_before_them() {
        // Isobutane: the central carbon has three carbon neighbours.
        let graph = parse_smiles("CC(C)C").unwrap();

        assert_eq!("C4H10", &graph.formula());
        let neighbours = graph.neighbours(1).filter(|&(j, _)| j < 4).count();
        assert_eq!(3, neighbours);
    }

    #[test]
    fn rings_are_closed_with_a_bond() {
        let graph = parse_smiles("C1CCCCC1").unwrap();

        assert_eq!("C6H12", &graph.formula());
        assert_eq!(6 + 12, graph.num_bonds());
    }

    #[test]
    fn aromatic_rings_get_aromatic_bonds_and_one_hydrogen_per_carbon() {
        let graph = parse_smiles("c1ccccc1").unwrap();

        assert_eq!("C6H6", &graph.formula());
        let aromatic = graph.bonds().filter(|&(_, _, order)| order == BondOrder::Aromatic).count();
        assert_eq!(6, aromatic);
    }

    #[test]
    fn aromatic_heteroatoms() {
        assert_eq!("C5H5N", &parse_smiles("n1ccccc1").unwrap().formula());
        assert_eq!("C4H5N", &parse_smiles("c1cc[nH]c1").unwrap().formula());
        assert_eq!("C4H4S", &parse_smiles("c1ccsc1").unwrap().formula());
    }

    #[test]
    fn two_digit_ring_closures() {
        assert_eq!("C3H6", &parse_smiles("C%12CC%12").unwrap().formula());
    }

    #[test]
    fn bracket_atoms_keep_charges_and_explicit_hydrogens() {
        let ammonium = parse_smiles("[NH4+]").unwrap();
        assert_eq!(5, ammonium.num_atoms());
        assert_eq!(1, ammonium.formal_charge());

        let sodium = parse_smiles("[Na+]").unwrap();
        assert_eq!(1, sodium.num_atoms());
        assert_eq!(1, sodium.formal_charge());

        let hexafluorophosphate = parse_smiles("F[P-](F)(F)(F)(F)F").unwrap();
        assert_eq!(7, hexafluorophosphate.num_atoms());
        assert_eq!(-1, hexafluorophosphate.formal_charge());
    }

    #[test]
    fn bracket_charges_may_be_repeated_or_numbered() {
        assert_eq!(2, parse_smiles("[Mg++]").unwrap().formal_charge());
        assert_eq!(2, parse_smiles("[Mg+2]").unwrap().formal_charge());
        assert_eq!(-2, parse_smiles("[O-2]").unwrap().formal_charge());
        assert!(parse_smiles("[Mg++2]").is_err());
    }

    #[test]
    fn isotopes_chirality_and_classes_are_skipped() {
        let graph = parse_smiles("[13CH4]").unwrap();
        assert_eq!("CH4", &graph.formula());

        let graph = parse_smiles("N[C@@H](C)C(=O)O").unwrap();
        assert_eq!("C3H7NO2", &graph.formula());

        let graph = parse_smiles("[CH3:1]O").unwrap();
        assert_eq!("CH4O", &graph.formula());
    }

    #[test]
    fn disconnected_parts_are_kept_in_one_graph() {
        let graph = parse_smiles("[Na+].[Cl-]").unwrap();

        assert_eq!(2, graph.num_atoms());
        assert_eq!(0, graph.num_bonds());
        assert_eq!(0, graph.formal_charge());
    }

    #[test]
    fn explicit_hydrogen_atoms_are_not_doubled() {
        let graph = parse_smiles("[H]O[H]").unwrap();
        assert_eq!(3, graph.num_atoms());
    }

    #[test]
    fn malformed_strings_are_errors() {
        let bad = [
            "", "C1CC", "CC(C", "CC)C", "C=", "=C", "C==C", "X", "[Xx]", "[C", "C.=C",
            "C%1", "(C)", "C11", "c1ccccc1 C", "[C+-]", "[C@H3x]", "C1C1", "H", "f", "Na",
        ];

        for smiles in bad.iter() {
            match parse_smiles(smiles) {
                Err(MolSpecError::InvalidIdentity(_)) => (),
                other => panic!("'{}' gave {:?}", smiles, other),
            }
        }
    }

    #[test]
    fn ring_bond_between_bonded_atoms_is_error() {
        let err = parse_smiles("C1C1").unwrap_err();
        assert!(err.to_string().contains("duplicates an existing bond"));

        // Closing over a longer path is fine
        assert_eq!("C3H6", &parse_smiles("C1CC1").unwrap().formula());
    }

    #[test]
    fn charges_and_hydrogen_counts_are_bounded() {
        assert_eq!(15, parse_smiles("[Fe+15]").unwrap().formal_charge());
        assert_eq!(-15, parse_smiles("[Fe-15]").unwrap().formal_charge());
        assert_eq!(10, parse_smiles("[CH9]").unwrap().num_atoms());

        let bad = [
            "[C+4000000000]", "[C-16]", "[Na+2147483647].[Na+2147483647]",
            "[C++++++++++++++++]", "[CH4000000000]", "[CH10]", "[C+99999999999]",
        ];

        for smiles in bad.iter() {
            match parse_smiles(smiles) {
                Err(MolSpecError::InvalidIdentity(_)) => (),
                other => panic!("'{}' gave {:?}", smiles, other),
            }
        }
    }

    #[test]
    fn error_message_contains_the_input() {
        let err = parse_smiles("C1CC").unwrap_err();
        assert!(err.to_string().contains("'C1CC'"));
        assert!(err.to_string().contains("unclosed ring 1"));
    }
}
