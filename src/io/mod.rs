//! Read and write molecule specifications and set contents as JSON.
//!
//! Written files always get the `.json` extension.

use contents::SetContents;
use spec::{InputMoleculeSpec, MoleculeSpec};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json;

use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::result;

#[derive(Debug)]
/// Errors from reading or writing files.
pub enum MolSpecIoError {
    /// The file could not be opened, read or written.
    Io(io::Error),
    /// The content was not valid JSON of the expected form.
    Json(serde_json::Error),
    /// The output path has no file name.
    BadPath(PathBuf),
}
use self::MolSpecIoError::*;

pub type Result<T> = result::Result<T, MolSpecIoError>;

impl fmt::Display for MolSpecIoError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Io(ref err) => write!(f, "{}", err),
            Json(ref err) => write!(f, "could not parse JSON ({})", err),
            BadPath(ref path) => write!(f, "'{}' is not a file path", path.display()),
        }
    }
}

impl Error for MolSpecIoError {
    fn source(&self) -> Option<&(Error + 'static)> {
        match *self {
            Io(ref err) => Some(err),
            Json(ref err) => Some(err),
            BadPath(_) => None,
        }
    }
}

impl From<io::Error> for MolSpecIoError {
    fn from(err: io::Error) -> Self {
        Io(err)
    }
}

impl From<serde_json::Error> for MolSpecIoError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Io(err.into())
        } else {
            Json(err)
        }
    }
}

/// Parse a reader for a JSON formatted object.
pub fn from_reader<T: DeserializeOwned, R: Read>(reader: R) -> Result<T> {
    serde_json::from_reader(reader).map_err(MolSpecIoError::from)
}

/// Write an object as pretty JSON to a writer.
pub fn to_writer<T: Serialize, W: Write>(value: &T, writer: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writer.write_all(b"\n")?;

    Ok(())
}

/// Read a JSON list of raw molecule specifications.
///
/// Geometry entries which are relative paths are relative to the working directory.
pub fn read_input_specs<P: AsRef<Path>>(path: P) -> Result<Vec<InputMoleculeSpec>> {
    read_json(path.as_ref())
}

/// Read a JSON list of validated molecule specifications.
pub fn read_molecule_specs<P: AsRef<Path>>(path: P) -> Result<Vec<MoleculeSpec>> {
    read_json(path.as_ref())
}

/// Read `SetContents` from a JSON file.
pub fn read_set_contents<P: AsRef<Path>>(path: P) -> Result<SetContents> {
    read_json(path.as_ref())
}

/// Write `SetContents` as a JSON file. The extension of the path is set to `json`
/// and the final path is returned.
pub fn write_set_contents<P: AsRef<Path>>(contents: &SetContents, path: P) -> Result<PathBuf> {
    write_json(contents, path.as_ref())
}

/// Write validated molecule specifications as a JSON file. The extension of the
/// path is set to `json` and the final path is returned.
pub fn write_molecule_specs<P: AsRef<Path>>(specs: &[MoleculeSpec], path: P) -> Result<PathBuf> {
    write_json(&specs, path.as_ref())
}

/// Set the extension of a path to `json`. Paths without a file name are an error.
pub fn json_path(path: &Path) -> Result<PathBuf> {
    if path.file_stem().is_none() {
        return Err(BadPath(path.to_path_buf()));
    }

    Ok(path.with_extension("json"))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)?;
    debug!("Reading '{}'", path.display());

    from_reader(BufReader::new(file))
}

fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<PathBuf> {
    let path = json_path(path)?;
    let mut writer = BufWriter::new(File::create(&path)?);

    to_writer(value, &mut writer)?;
    writer.flush()?;

    info!("Wrote '{}'", path.display());

    Ok(path)
}
