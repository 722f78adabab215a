//! Parse identity strings into molecular graphs.
//!
//! Any chemistry toolkit can be used to interpret identity strings by implementing
//! the `IdentityParser` trait. The crate provides `SmilesParser` which reads
//! SMILES strings.
//!
//! # Examples
//! ```
//! use molspec::identity::{IdentityParser, SmilesParser};
//!
//! let graph = SmilesParser.parse_identity("O").unwrap();
//! assert_eq!(3, graph.num_atoms());
//! ```

mod smiles;

pub use self::smiles::parse_smiles;

use error::Result;
use graph::MoleculeGraph;

/// Interpret an identity string as a molecular graph.
pub trait IdentityParser {
    /// Parse the identity string into a graph which contains all atoms of the
    /// molecule, hydrogens included.
    ///
    /// # Errors
    /// Returns `MolSpecError::InvalidIdentity` if the string cannot be parsed.
    fn parse_identity(&self, identity: &str) -> Result<MoleculeGraph>;
}

#[derive(Clone, Copy, Debug, Default)]
/// Identity parser for SMILES strings. See `parse_smiles` for what is supported.
pub struct SmilesParser;

impl IdentityParser for SmilesParser {
    fn parse_identity(&self, identity: &str) -> Result<MoleculeGraph> {
        parse_smiles(identity)
    }
}

impl<'a, T: IdentityParser + ?Sized> IdentityParser for &'a T {
    fn parse_identity(&self, identity: &str) -> Result<MoleculeGraph> {
        (**self).parse_identity(identity)
    }
}
