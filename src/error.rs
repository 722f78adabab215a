//! Implements the custom `MolSpecError` class for the library.

use std::{error, fmt, result};

#[derive(Clone, Debug, PartialEq)]
/// Errors raised while validating a molecule specification.
///
/// Validation stops at the first violated field, so a single error is returned
/// even if the input has several problems.
pub enum MolSpecError {
    /// The identity string could not be parsed into a molecule.
    InvalidIdentity(String),
    /// A geometry source could not be read or parsed.
    InvalidGeometry(String),
    /// Geometries (by index) whose atom count differs from that of the identity.
    GeometryMismatch { expected: usize, mismatched: Vec<(usize, usize)> },
    /// Partial charges were given but no geometries.
    MissingGeometry,
    /// The number of partial charges differs from the number of atoms.
    LengthMismatch { expected: usize, found: usize },
    /// A partial charge label was given without partial charges.
    InconsistentLabel(String),
    /// A value was outside of its allowed range.
    Range { field: &'static str, value: f64, min: f64, max: f64 },
    /// A count was not strictly positive.
    InvalidCount { field: &'static str, value: i64 },
    /// A specification in a list (by index) failed validation.
    InSpec { index: usize, identity: String, error: Box<MolSpecError> },
}

/// Shorthand for our `Result` class.
pub type Result<T> = result::Result<T, MolSpecError>;

impl fmt::Display for MolSpecError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::MolSpecError::*;

        match *self {
            InvalidIdentity(ref err) => write!(f, "invalid identity string: {}", err),
            InvalidGeometry(ref err) => write!(f, "invalid geometry: {}", err),
            GeometryMismatch { expected, ref mismatched } => {
                let entries = mismatched
                    .iter()
                    .map(|&(i, n)| format!("#{} ({} atoms)", i, n))
                    .collect::<Vec<_>>()
                    .join(", ");

                write!(f,
                    "all geometries must have the same number of atoms as the molecule \
                    defined by the identity string ({}), but found: {}",
                    expected, entries)
            },
            MissingGeometry => {
                write!(f, "geometries must be set if partial charges are set")
            },
            LengthMismatch { expected, found } => {
                write!(f, "partial charges must be the same length as all geometries \
                    (expected {}, found {})", expected, found)
            },
            InconsistentLabel(ref label) => {
                write!(f, "partial charges must be set if a partial charge label is set \
                    (label: '{}')", label)
            },
            Range { field, value, min, max } => {
                write!(f, "{} must be within [{}, {}], but is {}", field, min, max, value)
            },
            InvalidCount { field, value } => {
                write!(f, "{} must be a positive integer, but is {}", field, value)
            },
            InSpec { index, ref identity, ref error } => {
                write!(f, "molecule spec #{} ('{}'): {}", index, identity, error)
            },
        }
    }
}

impl error::Error for MolSpecError {
    fn source(&self) -> Option<&(error::Error + 'static)> {
        match *self {
            MolSpecError::InSpec { ref error, .. } => Some(&**error),
            _ => None,
        }
    }
}
