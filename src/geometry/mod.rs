//! Resolve geometry sources into ordered atomic positions.
//!
//! A geometry can be given as an in-memory `Structure`, as a path to a file or
//! as raw text. All of them are resolved into a `Geometry` by a `GeometryParser`,
//! of which `GeometryReader` is the default implementation:
//!
//! * structures are copied,
//! * files ending in `.gro` are read as GROMOS87 configurations and all
//!   other files as XYZ,
//! * text is read as XYZ.
//!
//! # Examples
//! ```
//! use molspec::geometry::{resolve, GeometrySource};
//!
//! let text = "3\nwater\nO 0.0 0.0 0.0\nH 0.96 0.0 0.0\nH -0.24 0.93 0.0\n";
//! let geometry = resolve(&GeometrySource::Text(text.to_string())).unwrap();
//!
//! assert_eq!(3, geometry.num_atoms());
//! ```

mod gromos;
mod xyz;

pub use self::gromos::read_gromos;
pub use self::xyz::read_xyz;

use coord::Coord;
use element::Element;
use error::{MolSpecError, Result};

use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
/// An in-memory molecular structure: element symbols with their coordinates.
pub struct Structure {
    pub species: Vec<Element>,
    pub coords: Vec<Coord>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(from = "SourceRepr", into = "SourceRepr")]
/// Where a geometry is read from.
///
/// In serialized form a source is either a structure object, an object with a
/// single `path` or `text` field, or a bare string. A bare string which names
/// an existing file is a path, any other string is text.
pub enum GeometrySource {
    Structure(Structure),
    Path(PathBuf),
    Text(String),
}

impl GeometrySource {
    /// Classify a string as either a path to an existing file or as text.
    pub fn from_string(value: String) -> GeometrySource {
        if Path::new(&value).is_file() {
            GeometrySource::Path(PathBuf::from(value))
        } else {
            GeometrySource::Text(value)
        }
    }

    /// A short description of the source for messages.
    pub fn describe(&self) -> String {
        match *self {
            GeometrySource::Structure(ref s) => format!("structure of {} atoms", s.species.len()),
            GeometrySource::Path(ref path) => format!("file '{}'", path.display()),
            GeometrySource::Text(_) => "text".to_string(),
        }
    }
}

impl From<Structure> for GeometrySource {
    fn from(structure: Structure) -> GeometrySource {
        GeometrySource::Structure(structure)
    }
}

impl<'a> From<&'a Path> for GeometrySource {
    fn from(path: &'a Path) -> GeometrySource {
        GeometrySource::Path(path.to_path_buf())
    }
}

#[derive(Clone, Deserialize, Serialize)]
#[serde(untagged)]
enum SourceRepr {
    Structure(Structure),
    Path { path: PathBuf },
    Text { text: String },
    Bare(String),
}

impl From<SourceRepr> for GeometrySource {
    fn from(repr: SourceRepr) -> GeometrySource {
        match repr {
            SourceRepr::Structure(structure) => GeometrySource::Structure(structure),
            SourceRepr::Path { path } => GeometrySource::Path(path),
            SourceRepr::Text { text } => GeometrySource::Text(text),
            SourceRepr::Bare(value) => GeometrySource::from_string(value),
        }
    }
}

impl From<GeometrySource> for SourceRepr {
    fn from(source: GeometrySource) -> SourceRepr {
        match source {
            GeometrySource::Structure(structure) => SourceRepr::Structure(structure),
            GeometrySource::Path(path) => SourceRepr::Path { path },
            GeometrySource::Text(text) => SourceRepr::Text { text },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
/// Resolved positions of one conformer, in the order of the source.
pub struct Geometry {
    /// Element of every position.
    pub species: Vec<Element>,
    /// Atomic positions.
    pub positions: Vec<Coord>,
}

impl Geometry {
    /// Construct a geometry, asserting that it is non-empty, that every position
    /// has an element and that all positions are finite.
    pub fn new(species: Vec<Element>, positions: Vec<Coord>) -> Result<Geometry> {
        if positions.is_empty() {
            return Err(MolSpecError::InvalidGeometry("no atoms".to_string()));
        }

        if species.len() != positions.len() {
            return Err(MolSpecError::InvalidGeometry(format!(
                "{} species were given for {} positions", species.len(), positions.len())));
        }

        if let Some(i) = positions.iter().position(|p| !p.is_finite()) {
            return Err(MolSpecError::InvalidGeometry(format!(
                "position of atom {} is not finite", i)));
        }

        Ok(Geometry { species, positions })
    }

    pub fn num_atoms(&self) -> usize {
        self.positions.len()
    }
}

/// Resolve a `GeometrySource` into a `Geometry`.
pub trait GeometryParser {
    /// # Errors
    /// Returns `MolSpecError::InvalidGeometry` if the source cannot be read or parsed.
    fn parse_geometry(&self, source: &GeometrySource) -> Result<Geometry>;
}

#[derive(Clone, Copy, Debug, Default)]
/// Reads structures, XYZ text and XYZ or GROMOS87 files.
pub struct GeometryReader;

impl GeometryParser for GeometryReader {
    fn parse_geometry(&self, source: &GeometrySource) -> Result<Geometry> {
        let geometry = match *source {
            GeometrySource::Structure(ref structure) => {
                Geometry::new(structure.species.clone(), structure.coords.clone())
            },
            GeometrySource::Path(ref path) => read_file(path),
            GeometrySource::Text(ref text) => read_xyz(text),
        };

        let geometry = geometry.map_err(|err| match err {
            MolSpecError::InvalidGeometry(msg) => {
                MolSpecError::InvalidGeometry(format!("{}: {}", source.describe(), msg))
            },
            err => err,
        })?;

        debug!("Resolved geometry of {} atoms from {}", geometry.num_atoms(), source.describe());

        Ok(geometry)
    }
}

impl<'a, T: GeometryParser + ?Sized> GeometryParser for &'a T {
    fn parse_geometry(&self, source: &GeometrySource) -> Result<Geometry> {
        (**self).parse_geometry(source)
    }
}

/// Resolve a source using the default `GeometryReader`.
pub fn resolve(source: &GeometrySource) -> Result<Geometry> {
    GeometryReader.parse_geometry(source)
}

fn read_file(path: &Path) -> Result<Geometry> {
    let content = fs::read_to_string(path)
        .map_err(|err| MolSpecError::InvalidGeometry(format!("could not read file ({})", err)))?;

    let extension = path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    match extension.as_ref().map(|ext| ext.as_str()) {
        Some("gro") => read_gromos(&content),
        Some("xyz") => read_xyz(&content),
        _ => {
            warn!("Unknown geometry file extension of '{}': reading it as XYZ", path.display());
            read_xyz(&content)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json;
    use std::io::Write;
    use tempfile;

    const WATER_XYZ: &str = "3\nwater\nO 0.0 0.0 0.0\nH 0.96 0.0 0.0\nH -0.24 0.93 0.0\n";

    fn water_structure() -> Structure {
        Structure {
            species: vec!["O".parse().unwrap(), Element::HYDROGEN, Element::HYDROGEN],
            coords: vec![
                Coord::new(0.0, 0.0, 0.0),
                Coord::new(0.96, 0.0, 0.0),
                Coord::new(-0.24, 0.93, 0.0),
            ],
        }
    }

    #[test]
    fn resolve_structure_copies_it() {
        let structure = water_structure();
        let geometry = resolve(&GeometrySource::Structure(structure.clone())).unwrap();

        assert_eq!(structure.species, geometry.species);
        assert_eq!(structure.coords, geometry.positions);
    }

    #[test]
    fn resolve_structure_with_missing_species_is_error() {
        let mut structure = water_structure();
        structure.species.pop();

        match resolve(&structure.into()) {
            Err(MolSpecError::InvalidGeometry(msg)) => assert!(msg.starts_with("structure of 2 atoms")),
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn resolve_empty_structure_is_error() {
        let structure = Structure { species: vec![], coords: vec![] };
        assert!(resolve(&structure.into()).is_err());
    }

    #[test]
    fn resolve_text_as_xyz() {
        let geometry = resolve(&GeometrySource::Text(WATER_XYZ.to_string())).unwrap();
        assert_eq!(geometry.species, water_structure().species);
        assert_eq!(geometry.positions, water_structure().coords);
    }

    #[test]
    fn resolve_xyz_and_unknown_files_as_xyz() {
        let dir = tempfile::tempdir().unwrap();

        for name in &["water.xyz", "water.txt"] {
            let path = dir.path().join(name);
            let mut file = fs::File::create(&path).unwrap();
            file.write_all(WATER_XYZ.as_bytes()).unwrap();

            let geometry = resolve(&GeometrySource::Path(path)).unwrap();
            assert_eq!(3, geometry.num_atoms());
        }
    }

    #[test]
    fn resolve_gro_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("water.GRO");
        fs::write(&path, "\
Water
    3
    1SOL     OW    1   0.126   1.624   1.679
    1SOL    HW1    2   0.190   1.661   1.747
    1SOL    HW2    3   0.177   1.568   1.613
   1.86206   1.86206   1.86206
").unwrap();

        let geometry = resolve(&path.as_path().into()).unwrap();
        assert_eq!(3, geometry.num_atoms());
        assert_eq!("O", geometry.species[0].symbol());
        assert_eq!(Coord::new(0.190, 1.661, 1.747), geometry.positions[1]);
    }

    #[test]
    fn resolve_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.xyz");

        match resolve(&GeometrySource::Path(path)) {
            Err(MolSpecError::InvalidGeometry(msg)) => assert!(msg.contains("missing.xyz")),
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn bare_strings_are_paths_only_if_the_file_exists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("water.xyz");
        fs::write(&path, WATER_XYZ).unwrap();

        let path_str = path.to_str().unwrap().to_string();
        let json = serde_json::to_string(&path_str).unwrap();
        let source: GeometrySource = serde_json::from_str(&json).unwrap();
        assert_eq!(GeometrySource::Path(path.clone()), source);

        let json = serde_json::to_string(WATER_XYZ).unwrap();
        let source: GeometrySource = serde_json::from_str(&json).unwrap();
        assert_eq!(GeometrySource::Text(WATER_XYZ.to_string()), source);
    }

    #[test]
    fn serialize_and_deserialize_sources() {
        let sources = vec![
            GeometrySource::Structure(water_structure()),
            GeometrySource::Path(PathBuf::from("does/not/exist.xyz")),
            GeometrySource::Text(WATER_XYZ.to_string()),
        ];

        let serialized = serde_json::to_string(&sources).unwrap();
        let deserialized: Vec<GeometrySource> = serde_json::from_str(&serialized).unwrap();

        assert_eq!(sources, deserialized);
    }

    #[test]
    fn structure_is_read_from_species_and_coordinate_arrays() {
        let json = r#"{"species": ["O", "H", "H"], "coords": [[0.0, 0.0, 0.0], [0.96, 0.0, 0.0], [-0.24, 0.93, 0.0]]}"#;
        let source: GeometrySource = serde_json::from_str(json).unwrap();

        assert_eq!(GeometrySource::Structure(water_structure()), source);
    }
}
