//! Combine validated molecule specifications into the contents of a simulation.

use describe::Describe;
use spec::MoleculeSpec;

use std::iter;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
/// All molecules of a simulation with their per-atom data flattened.
///
/// Atoms are ordered as they are placed in the system: for every molecule
/// specification in input order, `count` copies of the molecule after one another.
/// `atom_types` and `atom_resnames` follow that order, so an atom's index in
/// the system is its index in these lists.
///
/// Every atom of every species has its own atom type: the index of the atom
/// in its molecule plus the total number of atoms of one molecule of each
/// earlier species. The residue name of an atom is the index of its species.
pub struct SetContents {
    molecule_specs: Vec<MoleculeSpec>,
    force_fields: Vec<Option<String>>,
    partial_charge_methods: Vec<String>,
    atom_types: Vec<usize>,
    atom_resnames: Vec<usize>,
}

impl SetContents {
    /// Aggregate validated molecule specifications. See `aggregate`.
    pub fn new(molecule_specs: Vec<MoleculeSpec>) -> SetContents {
        aggregate(molecule_specs)
    }

    pub fn molecule_specs(&self) -> &[MoleculeSpec] {
        &self.molecule_specs
    }

    /// Force field of every specification.
    pub fn force_fields(&self) -> &[Option<String>] {
        &self.force_fields
    }

    /// Charge method of every specification.
    pub fn partial_charge_methods(&self) -> &[String] {
        &self.partial_charge_methods
    }

    /// Atom type of every atom in the system.
    pub fn atom_types(&self) -> &[usize] {
        &self.atom_types
    }

    /// Residue name index of every atom in the system.
    pub fn atom_resnames(&self) -> &[usize] {
        &self.atom_resnames
    }

    /// Total number of atoms.
    pub fn num_atoms(&self) -> usize {
        self.atom_types.len()
    }

    /// Total number of molecules.
    pub fn num_molecules(&self) -> usize {
        self.molecule_specs.iter().map(|spec| spec.count()).sum()
    }
}

/// Flatten validated molecule specifications into `SetContents`.
///
/// The specifications are not checked again: they are assumed to come from
/// validation and are kept in their input order.
///
/// # Examples
/// ```
/// use molspec::contents::aggregate;
/// use molspec::spec::{InputMoleculeSpec, MoleculeSpec};
///
/// let water = MoleculeSpec::from_input(&InputMoleculeSpec::new("O", 2)).unwrap();
/// let sodium = MoleculeSpec::from_input(&InputMoleculeSpec::new("[Na+]", 1)).unwrap();
///
/// let contents = aggregate(vec![water, sodium]);
///
/// assert_eq!(&[0, 1, 2, 0, 1, 2, 3], contents.atom_types());
/// assert_eq!(&[0, 0, 0, 0, 0, 0, 1], contents.atom_resnames());
/// ```
pub fn aggregate(molecule_specs: Vec<MoleculeSpec>) -> SetContents {
    let num_atoms = molecule_specs
        .iter()
        .map(|spec| spec.count() * spec.num_atoms())
        .sum();

    let mut atom_types = Vec::with_capacity(num_atoms);
    let mut atom_resnames = Vec::with_capacity(num_atoms);
    let mut offset = 0;

    for (i, spec) in molecule_specs.iter().enumerate() {
        let n = spec.num_atoms();

        for _ in 0..spec.count() {
            atom_types.extend(offset..offset + n);
            atom_resnames.extend(iter::repeat(i).take(n));
        }

        offset += n;
    }

    let force_fields = molecule_specs
        .iter()
        .map(|spec| spec.force_field().map(|ff| ff.to_string()))
        .collect();

    let partial_charge_methods = molecule_specs
        .iter()
        .map(|spec| spec.charge_method().to_string())
        .collect();

    info!("Aggregated {} molecule species into {} atoms", molecule_specs.len(), num_atoms);

    SetContents {
        molecule_specs,
        force_fields,
        partial_charge_methods,
        atom_types,
        atom_resnames,
    }
}

impl Describe for MoleculeSpec {
    fn describe(&self) -> String {
        let force_field = self.force_field().unwrap_or("no force field");

        format!("{} x{} ({}, {} atoms, charge {:+}, {}, {})",
            self.name(), self.count(), self.graph().formula(), self.num_atoms(),
            self.formal_charge(), self.charge_method(), force_field)
    }
}

impl Describe for SetContents {
    fn describe(&self) -> String {
        format!("{} molecules of {} species with {} atoms",
            self.num_molecules(), self.molecule_specs.len(), self.num_atoms())
    }
}
