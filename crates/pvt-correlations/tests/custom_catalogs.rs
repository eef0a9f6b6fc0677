use pvt_correlations::{
    CorrelationError, InputSet, Quantity, Registry, RegistryBuilder, SweepDefinition, SweepType,
    Tuning, UnitKind,
};
use std::path::PathBuf;

const FIELD_PB: &str = r#"
- name: PbFieldFit
  category: BubblePointPressure
  unit: psia
  range: [100, 6000]
  title: Field-tuned bubble point
  authors: [Reservoir Engineering]
  parameters:
    - { name: rsb, unit: SCF_STB, min: 50, max: 1500 }
  equation: pb_hanafy
"#;

fn builtin_plus(source: &str, text: &str) -> Result<Registry, CorrelationError> {
    let mut builder = RegistryBuilder::new().with_builtin_catalog()?;
    builder.load_yaml_str(source, text)?;
    builder.build()
}

#[test]
fn extra_catalog_extends_the_builtin_one() {
    let registry = builtin_plus("field.yaml", FIELD_PB).unwrap();
    assert!(registry.contains("PbFieldFit"));
    assert!(registry.contains("PbStanding"));
    let eval = registry
        .evaluate("PbFieldFit", &InputSet::new().with("rsb", 400.0))
        .unwrap();
    assert!(eval.is_within_ranges(), "{:?}", eval.warnings);
}

#[test]
fn extra_catalog_cannot_reuse_a_builtin_name() {
    let clash = FIELD_PB.replace("PbFieldFit", "PbStanding");
    let err = builtin_plus("clash.yaml", &clash).unwrap_err();
    assert_eq!(
        err,
        CorrelationError::DuplicateCorrelationName {
            name: "PbStanding".into()
        }
    );
}

#[test]
fn output_references_into_the_builtin_catalog_resolve() {
    let yaml = r#"
- name: BoaStandingBounded
  category: UndersaturatedOilFormationVolumeFactor
  unit: RB_STB
  parameters:
    - { name: p, unit: psia }
    - { name: pb, unit: psia, min: { output_min_of: PbStanding }, max: { output_max_of: PbStanding } }
    - { name: bobp, unit: RB_STB, min: { output_min_of: BobStanding }, max: { output_max_of: BobStanding } }
    - { name: co, unit: psia_1 }
  preconditions:
    - { left: p, op: ge, right: pb }
  equation: boa_mccain
"#;
    let registry = builtin_plus("bounded.yaml", yaml).unwrap();
    let def = registry.lookup_by_name("BoaStandingBounded").unwrap();
    let pb = def.parameter("pb").unwrap();
    assert_eq!((pb.lower, pb.upper), (Some(130.0), Some(7000.0)));
    let bobp = def.parameter("bobp").unwrap();
    assert_eq!((bobp.lower, bobp.upper), (Some(1.024), Some(2.15)));
}

#[test]
fn dangling_output_reference_fails_the_load() {
    let yaml = r#"
- name: Dangling
  category: UndersaturatedOilFormationVolumeFactor
  unit: RB_STB
  parameters:
    - { name: p, unit: psia }
    - { name: pb, unit: psia, max: { output_max_of: PbNotThere } }
    - { name: bobp, unit: RB_STB }
    - { name: co, unit: psia_1 }
  equation: boa_mccain
"#;
    let err = builtin_plus("dangling.yaml", yaml).unwrap_err();
    assert!(
        matches!(err, CorrelationError::UnresolvedReference { ref correlation, ref reference }
            if correlation == "Dangling" && reference == "PbNotThere"),
        "{err}"
    );
}

#[test]
fn gaps_between_variants_fail_the_load() {
    let yaml = r#"
- name: PbGappy
  category: BubblePointPressure
  unit: psia
  parameters:
    - { name: yg, unit: Sgg }
    - { name: rsb, unit: SCF_STB }
    - { name: api, unit: Api, min: 10, max: 50 }
    - { name: t, unit: Fahrenheit }
  variants:
    - { id: heavy, equation: pb_de_ghetto_heavy, when: { param: api, op: lt, value: 20 } }
    - { id: light, equation: pb_standing, when: { param: api, op: gt, value: 20 } }
"#;
    let mut builder = RegistryBuilder::new();
    builder.load_yaml_str("gappy.yaml", yaml).unwrap();
    let err = builder.build().unwrap_err();
    assert!(
        matches!(err, CorrelationError::InvalidDefinition { ref reason, .. } if reason.contains("no variant applies at api = 20")),
        "{err}"
    );
}

#[test]
fn unknown_equations_fail_the_load() {
    let yaml = FIELD_PB.replace("pb_hanafy", "pb_imaginary");
    let mut builder = RegistryBuilder::new();
    builder.load_yaml_str("typo.yaml", &yaml).unwrap();
    assert!(matches!(
        builder.build().unwrap_err(),
        CorrelationError::UnknownEquation { ref equation, .. } if equation == "pb_imaginary"
    ));
}

#[test]
fn misspelled_record_keys_fail_the_load() {
    let yaml = r#"
- name: BoaLoose
  category: UndersaturatedOilFormationVolumeFactor
  unit: RB_STB
  parameters:
    - { name: p, unit: psia }
    - { name: pb, unit: psia }
    - { name: bobp, unit: RB_STB }
    - { name: co, unit: psia_1 }
  precondition:
    - { left: p, op: ge, right: pb }
  equation: boa_mccain
"#;
    let err = builtin_plus("loose.yaml", yaml).unwrap_err();
    assert!(
        matches!(err, CorrelationError::InvalidDefinition { ref correlation, ref reason }
            if correlation == "BoaLoose" && reason.contains("'precondition'")),
        "{err}"
    );
}

#[test]
fn mixed_unit_preconditions_compare_physical_values() {
    let yaml = r#"
- name: BoaKiloPascal
  category: UndersaturatedOilFormationVolumeFactor
  unit: RB_STB
  parameters:
    - { name: p, unit: psia }
    - { name: pb, unit: kPa }
    - { name: bobp, unit: RB_STB }
    - { name: co, unit: psia_1 }
  preconditions:
    - { left: p, op: ge, right: pb }
  equation: boa_mccain
"#;
    let registry = builtin_plus("kpa.yaml", yaml).unwrap();
    let inputs = InputSet::new()
        .with("p", 3000.0)
        .with("pb", Quantity::new(2500.0, UnitKind::Psia))
        .with("bobp", 1.3)
        .with("co", 1.5e-5);
    assert!(registry.evaluate("BoaKiloPascal", &inputs).is_ok());
    assert!(matches!(
        registry.evaluate("BoaKiloPascal", &inputs.with("p", 2000.0)),
        Err(CorrelationError::PreconditionViolated { .. })
    ));
}

#[test]
fn catalogs_load_from_files() {
    let path: PathBuf = std::env::temp_dir().join(format!("pvt-field-{}.yaml", std::process::id()));
    std::fs::write(&path, FIELD_PB).unwrap();

    let mut builder = RegistryBuilder::new();
    let added = builder.load_yaml_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(added, 1);
    assert_eq!(builder.build().unwrap().list_correlations(), vec!["PbFieldFit"]);

    let err = RegistryBuilder::new()
        .load_yaml_file(&path)
        .unwrap_err();
    assert!(matches!(err, CorrelationError::CatalogParse { .. }));
}

#[test]
fn sweep_over_temperature_in_celsius() {
    let registry = Registry::builtin().unwrap();
    let inputs = InputSet::new()
        .with("yg", 0.75)
        .with("rsb", 500.0)
        .with("api", 35.0);
    let sweep = SweepDefinition::new("t", 40.0, 120.0, 9, SweepType::Linear)
        .unwrap()
        .with_unit(UnitKind::Celsius);
    let result = registry
        .sweep("PbStanding", &inputs, &sweep, Tuning::default())
        .unwrap();

    assert_eq!(result.num_successful, 9);
    assert_eq!(result.num_failed, 0);
    let values = result.values();
    assert_eq!(values.first().map(|(x, _)| *x), Some(40.0));
    assert!(values.windows(2).all(|w| w[1].1 > w[0].1));
}

#[test]
fn swept_parameter_replaces_its_synonym() {
    let registry = Registry::builtin().unwrap();
    let inputs = InputSet::new()
        .with("yg", 0.8)
        .with("rsb", 500.0)
        .with("t", 180.0)
        .with("api", 30.0);
    let sweep = SweepDefinition::new("yo", 0.85, 0.9, 3, SweepType::Linear).unwrap();
    let result = registry
        .sweep("PbAlShammasi", &inputs, &sweep, Tuning::default())
        .unwrap();
    assert_eq!(result.num_failed, 0, "{:?}", result.points[0].result);
    assert_eq!(result.num_successful, 3);

    // and the other way round: sweeping the synonym over a fixed canonical input
    let inputs = inputs.with("yo", 0.87);
    let sweep = SweepDefinition::new("api", 25.0, 35.0, 3, SweepType::Linear).unwrap();
    let result = registry
        .sweep("PbAlShammasi", &inputs, &sweep, Tuning::default())
        .unwrap();
    assert_eq!(result.num_successful, 3);
}

#[test]
fn sweep_keeps_failing_points() {
    let registry = Registry::builtin().unwrap();
    let inputs = InputSet::new()
        .with("pb", 2500.0)
        .with("bobp", 1.3)
        .with("co", 1.5e-5);
    let sweep = SweepDefinition::new("p", 2000.0, 3000.0, 5, SweepType::Linear).unwrap();
    let result = registry
        .sweep("BoaMcCain", &inputs, &sweep, Tuning::default())
        .unwrap();

    assert_eq!(result.num_failed, 2);
    assert_eq!(result.successful_inputs(), vec![2500.0, 2750.0, 3000.0]);
    assert!(matches!(
        result.points[0].result,
        Err(CorrelationError::PreconditionViolated { .. })
    ));

    let bad = SweepDefinition::new("nope", 1.0, 2.0, 3, SweepType::Linear).unwrap();
    assert!(matches!(
        registry.sweep("BoaMcCain", &inputs, &bad, Tuning::default()),
        Err(CorrelationError::UnknownParameter { .. })
    ));
}
