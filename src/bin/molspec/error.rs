//! Errors when executing the binary.

use molspec::error::MolSpecError;
use molspec::io::MolSpecIoError;

use colored::*;
use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::io;
use std::result;

/// Shorthand for our `Result` class.
pub type Result<T> = result::Result<T, MolSpecCliError>;

#[derive(Debug)]
/// Runtime errors of the binary.
pub enum MolSpecCliError {
    /// Something went wrong when reading or writing.
    IoError(MolSpecIoError),
    /// A molecule specification was invalid.
    SpecError(MolSpecError),
}

impl Error for MolSpecCliError {
    fn source(&self) -> Option<&(Error + 'static)> {
        match *self {
            MolSpecCliError::IoError(ref err) => Some(err),
            MolSpecCliError::SpecError(ref err) => Some(err),
        }
    }
}

impl Display for MolSpecCliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let red_error = "error:".color("red");

        match *self {
            MolSpecCliError::IoError(ref err) => write!(f, "{} {}", red_error, err),
            MolSpecCliError::SpecError(ref err) => write!(f, "{} {}", red_error, err),
        }
    }
}

impl From<io::Error> for MolSpecCliError {
    fn from(err: io::Error) -> MolSpecCliError {
        MolSpecCliError::IoError(MolSpecIoError::from(err))
    }
}

impl From<MolSpecIoError> for MolSpecCliError {
    fn from(err: MolSpecIoError) -> MolSpecCliError {
        MolSpecCliError::IoError(err)
    }
}

impl From<MolSpecError> for MolSpecCliError {
    fn from(err: MolSpecError) -> MolSpecCliError {
        MolSpecCliError::SpecError(err)
    }
}
