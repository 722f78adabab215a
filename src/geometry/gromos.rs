//! Read Gromos87 (.gro) formatted configurations.

use coord::Coord;
use element::Element;
use error::{MolSpecError, Result};
use geometry::Geometry;

use std::result;
use std::str::FromStr;

/// Read the positions of all atoms in a Gromos87 formatted configuration.
///
/// Positions are kept in nm as they are stored. The element of every atom is
/// guessed from its name: two letter names of common ions (eg. `CL`, `NA`) are
/// read as those, otherwise the first letter is used if it is an element symbol
/// and the first two letters if not. `CA` is thus carbon, not calcium.
///
/// # Errors
/// Returns `MolSpecError::InvalidGeometry` if the title, number of atoms, any atom
/// line or the box vectors are missing or could not be parsed.
pub fn read_gromos(content: &str) -> Result<Geometry> {
    let bad = |msg: String| MolSpecError::InvalidGeometry(msg);

    let mut iter_lines = content.lines();

    iter_lines.next().ok_or(bad("no title in file".into()))?;

    let num_atoms = iter_lines
        .next()
        .ok_or(bad("no number of atoms in file".into()))?
        .trim()
        .parse::<usize>()
        .map_err(|_| bad("number of atoms could not be parsed as a number".into()))?;

    let mut species = Vec::new();
    let mut positions = Vec::new();

    for i in 0..num_atoms {
        let line = iter_lines.next()
            .ok_or(bad(format!("expected {} atoms, but found {}", num_atoms, i)))?;

        let atom_line = AtomLine::from_str(line)
            .map_err(|msg| bad(format!("line of atom {}: {}", i + 1, msg)))?;

        let element = guess_element(&atom_line.atom_name)
            .ok_or(bad(format!("could not guess the element of atom '{}' ({}) in residue '{}'",
                atom_line.atom_name, i + 1, atom_line.res_name)))?;

        species.push(element);
        positions.push(atom_line.position);
    }

    iter_lines
        .next()
        .ok_or(bad("no box size vectors in file".into()))
        .and_then(|line| Coord::from_str(line).map_err(|_| bad("box size vectors could not be parsed".into())))?;

    Geometry::new(species, positions)
}

struct AtomLine {
    res_name: String,
    atom_name: String,
    position: Coord,
}

impl FromStr for AtomLine {
    type Err = String;

    fn from_str(s: &str) -> result::Result<Self, Self::Err> {
        let mut chars = s.chars();
        let mut field = |width: usize| chars.by_ref().take(width).collect::<String>().trim().to_string();

        let parse_int = |value: String| {
            value.parse::<u64>().map_err(|_| format!("'{}' is not an index", value))
        };
        let parse_float = |value: String| {
            value.parse::<f64>().map_err(|_| format!("'{}' is not a coordinate", value))
        };

        parse_int(field(5))?;
        let res_name = field(5);
        let atom_name = field(5);
        parse_int(field(5))?;

        let x = parse_float(field(8))?;
        let y = parse_float(field(8))?;
        let z = parse_float(field(8))?;

        Ok(AtomLine {
            res_name,
            atom_name,
            position: Coord::new(x, y, z),
        })
    }
}

// Ions which are commonly named by their element symbol.
const IONS: [&str; 14] = [
    "BR", "CD", "CL", "CS", "CU", "FE", "LI", "MG", "MN", "NA", "NI", "RB", "SR", "ZN",
];

fn guess_element(atom_name: &str) -> Option<Element> {
    let upper = atom_name.to_ascii_uppercase();
    if IONS.contains(&upper.as_str()) {
        let symbol = format!("{}{}", &upper[..1], upper[1..].to_ascii_lowercase());
        return Element::from_symbol(&symbol);
    }

    let letters = atom_name
        .trim_start_matches(|c: char| c.is_ascii_digit())
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect::<Vec<char>>();

    let first = letters.first()?.to_ascii_uppercase().to_string();
    if let Some(element) = Element::from_symbol(&first) {
        return Some(element);
    }

    letters.get(1).and_then(|c| {
        let symbol = format!("{}{}", first, c.to_ascii_lowercase());
        Element::from_symbol(&symbol)
    })
}
