//! Validate molecule specifications.
//!
//! An `InputMoleculeSpec` is the raw user input for one molecular species. It is
//! validated by a `SpecValidator` into a `MoleculeSpec`, which is what the rest of
//! the input generation works with. Fields are validated in a fixed order, where
//! every step only uses fields which have been validated before it:
//!
//! 1. `identity` is parsed into a molecular graph,
//! 2. `count` must be positive,
//! 3. `name` defaults to the identity string,
//! 4. `force_field` is lowercased,
//! 5. `geometries` are resolved and must match the atom count of the identity,
//! 6. `partial_charges` need geometries and must match their atom count,
//! 7. `partial_charge_label` needs partial charges and defaults to `"custom"`,
//! 8. `charge_scaling` must be within [0.1, 10],
//! 9. `max_conformers` must be positive.
//!
//! Validation stops at the first invalid field.
//!
//! # Examples
//! ```
//! use molspec::spec::{InputMoleculeSpec, SpecValidator};
//!
//! let input = InputMoleculeSpec {
//!     force_field: Some("TIP3P".to_string()),
//!     ..InputMoleculeSpec::new("O", 500)
//! };
//!
//! let validator: SpecValidator = SpecValidator::default();
//! let spec = validator.validate(&input).unwrap();
//!
//! assert_eq!("O", spec.name());
//! assert_eq!(Some("tip3p"), spec.force_field());
//! assert_eq!(3, spec.num_atoms());
//! ```

mod charge;

pub use self::charge::{ChargeDeriver, GraphChargeDeriver, DEFAULT_CHARGE_METHOD};

use error::{MolSpecError, Result};
use geometry::{Geometry, GeometryParser, GeometryReader, GeometrySource};
use graph::MoleculeGraph;
use identity::{IdentityParser, SmilesParser};

/// Label of partial charges which are given without one.
pub const CUSTOM_CHARGE_LABEL: &str = "custom";

/// Allowed range of the charge scaling factor.
pub const CHARGE_SCALING_RANGE: (f64, f64) = (0.1, 10.0);

fn default_charge_scaling() -> Option<f64> {
    Some(1.0)
}

fn default_max_conformers() -> i64 {
    1
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
/// Raw, unvalidated specification of one molecular species.
pub struct InputMoleculeSpec {
    /// Identity (SMILES) string of the molecule.
    #[serde(alias = "smile")]
    pub identity: String,
    /// Number of molecules in the system.
    pub count: i64,
    /// Name of the molecule. Defaults to the identity string.
    #[serde(default)]
    pub name: Option<String>,
    /// Factor to scale the partial charges by.
    #[serde(default = "default_charge_scaling")]
    pub charge_scaling: Option<f64>,
    /// Force field keyword, in any case.
    #[serde(default)]
    pub force_field: Option<String>,
    /// Geometries of the molecule.
    #[serde(default)]
    pub geometries: Option<Vec<GeometrySource>>,
    /// Partial charges in the atom order of the geometries.
    #[serde(default)]
    pub partial_charges: Option<Vec<f64>>,
    /// Method used to obtain the partial charges.
    #[serde(default)]
    pub partial_charge_label: Option<String>,
    /// Maximum number of conformers to generate.
    #[serde(default = "default_max_conformers")]
    pub max_conformers: i64,
}

impl InputMoleculeSpec {
    /// Construct a specification with only the required fields set.
    pub fn new(identity: &str, count: i64) -> InputMoleculeSpec {
        InputMoleculeSpec {
            identity: identity.to_string(),
            count,
            name: None,
            charge_scaling: default_charge_scaling(),
            force_field: None,
            geometries: None,
            partial_charges: None,
            partial_charge_label: None,
            max_conformers: default_max_conformers(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
/// All fields of an `InputMoleculeSpec` after validation.
pub struct ValidatedInput {
    pub identity: String,
    pub graph: MoleculeGraph,
    pub count: usize,
    pub name: String,
    pub force_field: Option<String>,
    pub geometries: Option<Vec<Geometry>>,
    pub partial_charges: Option<Vec<f64>>,
    pub partial_charge_label: Option<String>,
    pub charge_scaling: f64,
    pub max_conformers: usize,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
/// A validated molecule specification.
///
/// Can only be created by validating an `InputMoleculeSpec` (or by reading a
/// previously written one) and cannot be modified.
pub struct MoleculeSpec {
    name: String,
    count: usize,
    #[serde(alias = "smile")]
    identity: String,
    force_field: Option<String>,
    formal_charge: i32,
    charge_method: String,
    #[serde(rename = "molgraph")]
    graph: MoleculeGraph,
    #[serde(default)]
    geometries: Vec<Geometry>,
    #[serde(default)]
    partial_charges: Option<Vec<f64>>,
    charge_scaling: f64,
    max_conformers: usize,
}

impl MoleculeSpec {
    /// Validate an input specification with the default `SpecValidator`.
    pub fn from_input(input: &InputMoleculeSpec) -> Result<MoleculeSpec> {
        let validator: SpecValidator = SpecValidator::default();
        validator.validate(input)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of molecules of this species.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Lowercase force field keyword, if one was given.
    pub fn force_field(&self) -> Option<&str> {
        self.force_field.as_ref().map(|s| s.as_str())
    }

    pub fn formal_charge(&self) -> i32 {
        self.formal_charge
    }

    pub fn charge_method(&self) -> &str {
        &self.charge_method
    }

    pub fn graph(&self) -> &MoleculeGraph {
        &self.graph
    }

    /// Resolved geometries, empty if none were given.
    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    pub fn partial_charges(&self) -> Option<&[f64]> {
        self.partial_charges.as_ref().map(|q| q.as_slice())
    }

    pub fn charge_scaling(&self) -> f64 {
        self.charge_scaling
    }

    pub fn max_conformers(&self) -> usize {
        self.max_conformers
    }

    /// Number of atoms in one molecule.
    pub fn num_atoms(&self) -> usize {
        self.graph.num_atoms()
    }
}

/// Validates `InputMoleculeSpec`s using an identity parser, a geometry parser
/// and a charge deriver.
///
/// The validator holds no state which changes during validation, so it can be
/// shared between threads if its parsers can.
pub struct SpecValidator<I = SmilesParser, G = GeometryReader, C = GraphChargeDeriver> {
    identity_parser: I,
    geometry_parser: G,
    charge_deriver: C,
}

impl Default for SpecValidator {
    fn default() -> SpecValidator {
        SpecValidator::new(SmilesParser, GeometryReader, GraphChargeDeriver::default())
    }
}

impl<I, G, C> SpecValidator<I, G, C>
        where I: IdentityParser, G: GeometryParser, C: ChargeDeriver {
    pub fn new(identity_parser: I, geometry_parser: G, charge_deriver: C) -> SpecValidator<I, G, C> {
        SpecValidator { identity_parser, geometry_parser, charge_deriver }
    }

    /// Validate an input specification and construct the final `MoleculeSpec`.
    ///
    /// # Errors
    /// Returns the error of the first field which fails validation, or of
    /// the charge derivation.
    pub fn validate(&self, input: &InputMoleculeSpec) -> Result<MoleculeSpec> {
        let validated = self.validate_input(input)?;

        let (formal_charge, charge_method) = self.charge_deriver.derive(
            &validated.graph,
            validated.partial_charges.as_ref().map(|q| q.as_slice()),
            validated.partial_charge_label.as_ref().map(|s| s.as_str()),
        )?;

        debug!("Validated '{}': formal charge {}, charge method '{}'",
            validated.name, formal_charge, charge_method);

        Ok(MoleculeSpec {
            name: validated.name,
            count: validated.count,
            identity: validated.identity,
            force_field: validated.force_field,
            formal_charge,
            charge_method,
            graph: validated.graph,
            geometries: validated.geometries.unwrap_or_default(),
            partial_charges: validated.partial_charges,
            charge_scaling: validated.charge_scaling,
            max_conformers: validated.max_conformers,
        })
    }

    /// Validate a list of input specifications in order.
    ///
    /// # Errors
    /// Returns the error of the first specification which fails, wrapped with
    /// its index in the list.
    pub fn validate_all(&self, inputs: &[InputMoleculeSpec]) -> Result<Vec<MoleculeSpec>> {
        inputs
            .iter()
            .enumerate()
            .map(|(index, input)| {
                self.validate(input).map_err(|err| MolSpecError::InSpec {
                    index,
                    identity: input.identity.clone(),
                    error: Box::new(err),
                })
            })
            .collect()
    }

    /// Validate all fields of an input specification in order.
    ///
    /// # Errors
    /// Returns the error of the first field which fails validation.
    pub fn validate_input(&self, input: &InputMoleculeSpec) -> Result<ValidatedInput> {
        debug!("Validating molecule spec '{}'", input.identity);

        let graph = self.identity_parser.parse_identity(&input.identity)?;
        let count = validate_count("count", input.count)?;
        let name = default_name(input.name.as_ref(), &input.identity);
        let force_field = normalize_force_field(input.force_field.as_ref());

        let geometries = match input.geometries {
            Some(ref sources) => Some(self.resolve_geometries(sources, graph.num_atoms())?),
            None => None,
        };

        let partial_charges = validate_partial_charges(
            input.partial_charges.as_ref(), geometries.as_ref())?;
        let partial_charge_label = validate_partial_charge_label(
            input.partial_charge_label.as_ref(), partial_charges.as_ref())?;

        let charge_scaling = validate_charge_scaling(input.charge_scaling)?;
        let max_conformers = validate_count("max_conformers", input.max_conformers)?;

        Ok(ValidatedInput {
            identity: input.identity.clone(),
            graph,
            count,
            name,
            force_field,
            geometries,
            partial_charges,
            partial_charge_label,
            charge_scaling,
            max_conformers,
        })
    }

    /// Resolve all geometries, then assert that all of them have the expected number of atoms.
    fn resolve_geometries(&self, sources: &[GeometrySource], num_atoms: usize) -> Result<Vec<Geometry>> {
        let geometries = sources
            .iter()
            .map(|source| self.geometry_parser.parse_geometry(source))
            .collect::<Result<Vec<_>>>()?;

        let mismatched = geometries
            .iter()
            .enumerate()
            .filter(|&(_, geometry)| geometry.num_atoms() != num_atoms)
            .map(|(i, geometry)| (i, geometry.num_atoms()))
            .collect::<Vec<_>>();

        if !mismatched.is_empty() {
            return Err(MolSpecError::GeometryMismatch { expected: num_atoms, mismatched });
        }

        Ok(geometries)
    }
}

/// Name of a molecule: the given name or, if none, its identity string.
pub fn default_name(name: Option<&String>, identity: &str) -> String {
    name.cloned().unwrap_or_else(|| identity.to_string())
}

/// Force field keywords are case insensitive and kept in lowercase.
pub fn normalize_force_field(force_field: Option<&String>) -> Option<String> {
    force_field.map(|ff| ff.to_lowercase())
}

fn validate_count(field: &'static str, value: i64) -> Result<usize> {
    if value > 0 {
        Ok(value as usize)
    } else {
        Err(MolSpecError::InvalidCount { field, value })
    }
}

fn validate_partial_charges(partial_charges: Option<&Vec<f64>>, geometries: Option<&Vec<Geometry>>)
        -> Result<Option<Vec<f64>>> {
    let charges = match partial_charges {
        Some(charges) => charges,
        None => return Ok(None),
    };

    let num_atoms = geometries
        .and_then(|geometries| geometries.first())
        .map(|geometry| geometry.num_atoms())
        .ok_or(MolSpecError::MissingGeometry)?;

    if charges.len() != num_atoms {
        return Err(MolSpecError::LengthMismatch { expected: num_atoms, found: charges.len() });
    }

    Ok(Some(charges.clone()))
}

fn validate_partial_charge_label(label: Option<&String>, partial_charges: Option<&Vec<f64>>)
        -> Result<Option<String>> {
    match (label, partial_charges) {
        (Some(label), None) => Err(MolSpecError::InconsistentLabel(label.clone())),
        (Some(label), Some(_)) => Ok(Some(label.clone())),
        (None, Some(_)) => Ok(Some(CUSTOM_CHARGE_LABEL.to_string())),
        (None, None) => Ok(None),
    }
}

fn validate_charge_scaling(charge_scaling: Option<f64>) -> Result<f64> {
    let (min, max) = CHARGE_SCALING_RANGE;

    match charge_scaling {
        None => Ok(1.0),
        Some(value) if value >= min && value <= max => Ok(value),
        Some(value) => Err(MolSpecError::Range { field: "charge_scaling", value, min, max }),
    }
}
