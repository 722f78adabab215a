//! Read XYZ formatted text.

use coord::Coord;
use element::Element;
use error::{MolSpecError, Result};
use geometry::Geometry;

use std::str::FromStr;

/// Read the first frame of XYZ formatted text.
///
/// The first line holds the number of atoms and the second a comment, after which
/// every line is an element (symbol or atomic number) and three coordinates.
/// Anything after the declared atoms, such as more frames, is ignored.
///
/// # Errors
/// Returns `MolSpecError::InvalidGeometry` if the header is missing, if fewer atom
/// lines than declared are found or if an atom line cannot be parsed.
pub fn read_xyz(content: &str) -> Result<Geometry> {
    let bad = |msg: String| MolSpecError::InvalidGeometry(msg);

    let mut lines = content.lines();

    let header = lines.next().ok_or(bad("no number of atoms".to_string()))?;
    let num_atoms = header.trim()
        .parse::<usize>()
        .map_err(|_| bad(format!("number of atoms '{}' could not be parsed", header.trim())))?;

    lines.next().ok_or(bad("no comment line".to_string()))?;

    let mut species = Vec::new();
    let mut positions = Vec::new();

    for i in 0..num_atoms {
        let line = lines.next()
            .ok_or(bad(format!("expected {} atoms, but found {}", num_atoms, i)))?;

        let (element, position) = read_atom_line(line)
            .map_err(|msg| bad(format!("atom {}: {}", i + 1, msg)))?;

        species.push(element);
        positions.push(position);
    }

    Geometry::new(species, positions)
}

fn read_atom_line(line: &str) -> ::std::result::Result<(Element, Coord), String> {
    let line = line.trim();
    let split = line.find(char::is_whitespace).unwrap_or(line.len());
    let (label, rest) = line.split_at(split);

    if label.is_empty() {
        return Err("empty line".to_string());
    }

    let element = parse_element(label)?;
    let position = Coord::from_str(rest)?;

    Ok((element, position))
}

// Symbols are accepted in any case, as are atomic numbers.
fn parse_element(label: &str) -> ::std::result::Result<Element, String> {
    if let Ok(number) = label.parse::<u8>() {
        return Element::from_atomic_number(number)
            .ok_or(format!("unknown atomic number {}", number));
    }

    let symbol = label.chars()
        .enumerate()
        .map(|(i, c)| if i == 0 { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
        .collect::<String>();

    symbol.parse()
}
