//! Validate molecule specifications and combine them into the contents of a
//! molecular simulation.
//!
//! Every molecular species of a simulation is given as an `InputMoleculeSpec`:
//! an identity (SMILES) string, how many molecules to use and optional geometries,
//! partial charges and force field. These are validated into `MoleculeSpec`s,
//! which are aggregated into `SetContents` where every atom of the final system
//! has its atom type and residue name.
//!
//! # Examples
//! ```
//! use molspec::contents::aggregate;
//! use molspec::spec::{InputMoleculeSpec, MoleculeSpec};
//!
//! let inputs = vec![InputMoleculeSpec::new("O", 2), InputMoleculeSpec::new("[Cl-]", 3)];
//!
//! let specs = inputs
//!     .iter()
//!     .map(|input| MoleculeSpec::from_input(input))
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//!
//! let contents = aggregate(specs);
//! assert_eq!(&[0, 1, 2, 0, 1, 2, 3, 3, 3], contents.atom_types());
//! ```

#[macro_use]
extern crate log;
extern crate petgraph;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;

#[cfg(test)]
extern crate tempfile;

pub mod contents;
pub mod coord;
pub mod describe;
pub mod element;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod identity;
pub mod io;
pub mod settings;
pub mod spec;

pub use contents::{aggregate, SetContents};
pub use error::{MolSpecError, Result};
pub use settings::InputSetSettings;
pub use spec::{InputMoleculeSpec, MoleculeSpec, SpecValidator};
