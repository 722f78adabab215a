extern crate molspec;
extern crate serde_json;
extern crate tempfile;

use molspec::contents::{aggregate, SetContents};
use molspec::error::MolSpecError;
use molspec::io::{read_input_specs, read_set_contents, write_set_contents};
use molspec::spec::{InputMoleculeSpec, MoleculeSpec, SpecValidator};

use std::fs;
use std::path::Path;

const WATER_GRO: &str = "\
Water
    3
    1SOL     OW    1   0.126   1.624   1.679
    1SOL    HW1    2   0.190   1.661   1.747
    1SOL    HW2    3   0.177   1.568   1.613
   1.86206   1.86206   1.86206
";

const WATER_XYZ: &str = "3\nwater\nO 1.26 16.24 16.79\nH 1.90 16.61 17.47\nH 1.77 15.68 16.13\n";

fn write_file(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();

    path.to_str().unwrap().to_string()
}

fn validate_all(inputs: &[InputMoleculeSpec]) -> Result<Vec<MoleculeSpec>, MolSpecError> {
    let validator: SpecValidator = SpecValidator::default();
    validator.validate_all(inputs)
}

#[test]
fn validate_a_json_input_file_and_aggregate_the_system() {
    let dir = tempfile::tempdir().unwrap();

    let gro = write_file(dir.path(), "water.gro", WATER_GRO);
    let xyz = write_file(dir.path(), "water.xyz", WATER_XYZ);

    let input = format!(r#"[
        {{
            "identity": "O",
            "count": 2,
            "name": "water",
            "force_field": "TIP3P",
            "geometries": ["{}", "{}"],
            "partial_charges": [-0.834, 0.417, 0.417],
            "partial_charge_label": "tip3p"
        }},
        {{"smile": "[Na+]", "count": 3}}
    ]"#, gro, xyz);
    let input_path = write_file(dir.path(), "input.json", &input);

    let inputs = read_input_specs(&input_path).unwrap();
    let specs = validate_all(&inputs).unwrap();

    let water = &specs[0];
    assert_eq!("water", water.name());
    assert_eq!(Some("tip3p"), water.force_field());
    assert_eq!("tip3p", water.charge_method());
    assert_eq!(0, water.formal_charge());
    assert_eq!(2, water.geometries().len());

    let sodium = &specs[1];
    assert_eq!("[Na+]", sodium.name());
    assert_eq!(None, sodium.force_field());
    assert_eq!(1, sodium.formal_charge());
    assert!(sodium.geometries().is_empty());

    let contents = aggregate(specs);

    // Two waters of three atoms, then three ions
    assert_eq!(9, contents.num_atoms());
    assert_eq!(&[0, 1, 2, 0, 1, 2, 3, 3, 3], contents.atom_types());
    assert_eq!(&[0, 0, 0, 0, 0, 0, 1, 1, 1], contents.atom_resnames());
    assert_eq!(&[Some("tip3p".to_string()), None], contents.force_fields());
    assert_eq!(&["tip3p".to_string(), "am1bcc".to_string()], contents.partial_charge_methods());

    let output = write_set_contents(&contents, dir.path().join("contents")).unwrap();
    assert_eq!(Some("json"), output.extension().and_then(|ext| ext.to_str()));
    assert_eq!(contents, read_set_contents(&output).unwrap());
}

#[test]
fn geometries_of_the_wrong_size_in_a_list_are_reported_with_the_spec() {
    let dir = tempfile::tempdir().unwrap();
    let gro = write_file(dir.path(), "water.gro", WATER_GRO);

    let input = format!(r#"[
        {{"identity": "O", "count": 1}},
        {{"identity": "CCO", "count": 1, "geometries": ["{}"]}}
    ]"#, gro);
    let inputs: Vec<InputMoleculeSpec> = serde_json::from_str(&input).unwrap();

    match validate_all(&inputs) {
        Err(MolSpecError::InSpec { index, identity, error }) => {
            assert_eq!(1, index);
            assert_eq!("CCO", &identity);
            assert_eq!(MolSpecError::GeometryMismatch { expected: 9, mismatched: vec![(0, 3)] }, *error);
        },
        other => panic!("{:?}", other),
    }
}

#[test]
fn inline_geometry_text_is_read_as_xyz() {
    let input = InputMoleculeSpec {
        geometries: Some(vec![serde_json::from_value(serde_json::Value::from(WATER_XYZ)).unwrap()]),
        partial_charges: Some(vec![-0.8, 0.4, 0.4]),
        ..InputMoleculeSpec::new("O", 1)
    };

    let spec = MoleculeSpec::from_input(&input).unwrap();

    assert_eq!("custom", spec.charge_method());
    assert_eq!(3, spec.geometries()[0].num_atoms());
}

#[test]
fn every_validation_error_of_a_single_spec() {
    let water_xyz = || serde_json::from_value(serde_json::Value::from(WATER_XYZ)).unwrap();
    let h2_xyz = || serde_json::from_value(serde_json::Value::from("2\n\nH 0 0 0\nH 0.74 0 0\n")).unwrap();

    let cases = vec![
        (InputMoleculeSpec::new("C(C", 1), "invalid identity"),
        (InputMoleculeSpec::new("O", 0), "count"),
        (InputMoleculeSpec { geometries: Some(vec![h2_xyz()]), ..InputMoleculeSpec::new("O", 1) },
            "geometries"),
        (InputMoleculeSpec { partial_charges: Some(vec![0.0; 3]), ..InputMoleculeSpec::new("O", 1) },
            "geometries must be set"),
        (InputMoleculeSpec {
            geometries: Some(vec![water_xyz()]),
            partial_charges: Some(vec![0.1, 0.2]),
            ..InputMoleculeSpec::new("O", 1)
        }, "partial charges must be the same length"),
        (InputMoleculeSpec { partial_charge_label: Some("resp".into()), ..InputMoleculeSpec::new("O", 1) },
            "partial charges must be set"),
        (InputMoleculeSpec { charge_scaling: Some(0.05), ..InputMoleculeSpec::new("O", 1) },
            "charge_scaling"),
        (InputMoleculeSpec { max_conformers: 0, ..InputMoleculeSpec::new("O", 1) },
            "max_conformers"),
    ];

    for (input, expected) in cases {
        let err = MoleculeSpec::from_input(&input).unwrap_err();
        assert!(err.to_string().contains(expected), "'{}' does not contain '{}'", err, expected);
    }
}

#[test]
fn set_contents_survive_a_json_round_trip() {
    let inputs = vec![
        InputMoleculeSpec::new("CCO", 4),
        InputMoleculeSpec::new("c1ccccc1", 2),
        InputMoleculeSpec::new("[Cl-]", 1),
    ];
    let contents = SetContents::new(validate_all(&inputs).unwrap());

    assert_eq!(4 * 9 + 2 * 12 + 1, contents.num_atoms());
    assert_eq!(7, contents.num_molecules());
    assert_eq!(9 + 12, contents.atom_types()[contents.num_atoms() - 1]);

    let serialized = serde_json::to_string(&contents).unwrap();
    let deserialized: SetContents = serde_json::from_str(&serialized).unwrap();

    assert_eq!(contents, deserialized);
}

#[test]
fn set_contents_with_full_precision_charges_survive_a_json_round_trip() {
    // Charges which do not have a short decimal representation
    let charges = (0..3)
        .map(|i| (i as f64 + 0.5).sqrt().sin() / 3.0)
        .chain(Some(0.18017933438838418))
        .collect::<Vec<f64>>();

    let input = InputMoleculeSpec {
        geometries: Some(vec![serde_json::from_value(serde_json::Value::from(
            "4\nammonia\nN 0 0 0\nH 1 0 0\nH 0 1 0\nH 0 0 1\n")).unwrap()]),
        partial_charges: Some(charges.clone()),
        ..InputMoleculeSpec::new("N", 10)
    };
    let contents = SetContents::new(validate_all(&[input]).unwrap());

    let serialized = serde_json::to_string_pretty(&contents).unwrap();
    let deserialized: SetContents = serde_json::from_str(&serialized).unwrap();

    assert_eq!(Some(charges.as_slice()), deserialized.molecule_specs()[0].partial_charges());
    assert_eq!(contents, deserialized);
}
