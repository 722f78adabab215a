//! Derive the formal charge and charge method of a validated molecule.

use error::Result;
use graph::MoleculeGraph;

/// Charge method which is used when no partial charges are supplied.
pub const DEFAULT_CHARGE_METHOD: &str = "am1bcc";

/// Derive the formal charge and the charge method label of a molecule once all
/// of its input has been validated.
pub trait ChargeDeriver {
    /// Return `(formal_charge, charge_method)` for a molecule.
    ///
    /// `partial_charges` and `label` are either both set or both unset.
    fn derive(&self, graph: &MoleculeGraph, partial_charges: Option<&[f64]>, label: Option<&str>)
        -> Result<(i32, String)>;
}

#[derive(Clone, Debug)]
/// Takes the formal charge from the graph and the charge method from the partial
/// charge label, or from `default_method` if no partial charges were given.
pub struct GraphChargeDeriver {
    pub default_method: String,
}

impl Default for GraphChargeDeriver {
    fn default() -> GraphChargeDeriver {
        GraphChargeDeriver { default_method: DEFAULT_CHARGE_METHOD.to_string() }
    }
}

impl ChargeDeriver for GraphChargeDeriver {
    fn derive(&self, graph: &MoleculeGraph, partial_charges: Option<&[f64]>, label: Option<&str>)
            -> Result<(i32, String)> {
        let formal_charge = graph.formal_charge();

        let charge_method = match (partial_charges, label) {
            (Some(_), Some(label)) => label.to_string(),
            _ => self.default_method.clone(),
        };

        Ok((formal_charge, charge_method))
    }
}

impl<'a, T: ChargeDeriver + ?Sized> ChargeDeriver for &'a T {
    fn derive(&self, graph: &MoleculeGraph, partial_charges: Option<&[f64]>, label: Option<&str>)
            -> Result<(i32, String)> {
        (**self).derive(graph, partial_charges, label)
    }
}
