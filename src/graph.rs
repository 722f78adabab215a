//! Structural graph of a molecule: atoms as nodes and bonds as edges.

use element::Element;

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
/// A node in the molecular graph.
pub struct GraphAtom {
    /// Element of the atom.
    pub element: Element,
    /// Formal charge in units of the elementary charge.
    #[serde(default)]
    pub formal_charge: i32,
    /// Whether the atom was written as aromatic.
    #[serde(default)]
    pub aromatic: bool,
}

impl GraphAtom {
    pub fn new(element: Element) -> GraphAtom {
        GraphAtom { element, formal_charge: 0, aromatic: false }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
/// Bond orders.
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Quadruple,
    Aromatic,
}

impl BondOrder {
    /// Contribution of the bond to the valence of its atoms.
    ///
    /// Aromatic bonds count as single bonds here: the extra electron of an
    /// aromatic atom is accounted for when its implicit hydrogens are counted.
    pub fn valence(&self) -> u32 {
        match *self {
            BondOrder::Single | BondOrder::Aromatic => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
            BondOrder::Quadruple => 4,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
/// A molecule as an undirected graph with atoms as nodes and bond orders as edges.
///
/// Atoms are indexed in the order they were added, which is the order of atoms
/// in any geometry or partial charge list which belongs to the molecule.
pub struct MoleculeGraph {
    graph: UnGraph<GraphAtom, BondOrder>,
}

impl MoleculeGraph {
    pub fn new() -> MoleculeGraph {
        MoleculeGraph::default()
    }

    /// Add an atom and return its index.
    pub fn add_atom(&mut self, atom: GraphAtom) -> usize {
        self.graph.add_node(atom).index()
    }

    /// Add a bond between two existing atoms.
    ///
    /// # Panics
    /// If either index is out of bounds, the atoms are the same or they are already bonded.
    pub fn add_bond(&mut self, i: usize, j: usize, order: BondOrder) {
        assert!(i < self.num_atoms() && j < self.num_atoms() && i != j,
            "bond between invalid atoms ({}, {})", i, j);
        assert!(!self.has_bond(i, j), "atoms ({}, {}) are already bonded", i, j);

        self.graph.add_edge(NodeIndex::new(i), NodeIndex::new(j), order);
    }

    /// Whether two atoms are bonded to each other.
    pub fn has_bond(&self, i: usize, j: usize) -> bool {
        self.graph.find_edge(NodeIndex::new(i), NodeIndex::new(j)).is_some()
    }

    /// The atom at an index.
    ///
    /// # Panics
    /// If the index is out of bounds.
    pub fn atom(&self, i: usize) -> &GraphAtom {
        &self.graph[NodeIndex::new(i)]
    }

    /// All atoms in index order.
    pub fn atoms<'a>(&'a self) -> impl Iterator<Item = &'a GraphAtom> + 'a {
        self.graph.raw_nodes().iter().map(|node| &node.weight)
    }

    /// All bonds as `(i, j, order)` in the order they were added.
    pub fn bonds<'a>(&'a self) -> impl Iterator<Item = (usize, usize, BondOrder)> + 'a {
        self.graph
            .raw_edges()
            .iter()
            .map(|edge| (edge.source().index(), edge.target().index(), edge.weight))
    }

    /// Atoms bonded to an atom, with the order of the bond.
    pub fn neighbours<'a>(&'a self, i: usize) -> impl Iterator<Item = (usize, BondOrder)> + 'a {
        let node = NodeIndex::new(i);

        self.graph.edges(node).map(move |edge| {
            let other = if edge.source() == node { edge.target() } else { edge.source() };
            (other.index(), *edge.weight())
        })
    }

    pub fn num_atoms(&self) -> usize {
        self.graph.node_count()
    }

    pub fn num_bonds(&self) -> usize {
        self.graph.edge_count()
    }

    /// Total formal charge of the molecule.
    pub fn formal_charge(&self) -> i32 {
        self.atoms().map(|atom| atom.formal_charge).sum()
    }

    /// Sum of bond valences of an atom.
    pub fn bond_valence(&self, i: usize) -> u32 {
        self.neighbours(i).map(|(_, order)| order.valence()).sum()
    }

    /// Molecular formula in Hill order: carbon, hydrogen, then the rest alphabetically.
    /// Without carbon all elements are alphabetical.
    ///
    /// # Examples
    /// ```
    /// # use molspec::identity::parse_smiles;
    /// let graph = parse_smiles("CCO").unwrap();
    /// assert_eq!("C2H6O", &graph.formula());
    /// ```
    pub fn formula(&self) -> String {
        use std::collections::BTreeMap;

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for atom in self.atoms() {
            *counts.entry(atom.element.symbol()).or_insert(0) += 1;
        }

        let mut formula = String::new();
        let mut push = |symbol: &str, n: usize| {
            formula.push_str(symbol);
            if n > 1 {
                formula.push_str(&n.to_string());
            }
        };

        if let Some(n) = counts.remove("C") {
            push("C", n);
            if let Some(n) = counts.remove("H") {
                push("H", n);
            }
        }

        for (symbol, n) in counts {
            push(symbol, n);
        }

        formula
    }
}

// Graphs are equal if they have the same atoms and bonds in the same order.
impl PartialEq for MoleculeGraph {
    fn eq(&self, other: &MoleculeGraph) -> bool {
        self.atoms().eq(other.atoms()) && self.bonds().eq(other.bonds())
    }
}
