use proptest::prelude::*;
use pvt_correlations::{
    CorrelationDefinition, CorrelationError, InputSet, InputValue, Quantity, Registry, Relation,
    Tuning, UnitKind, WarningTarget, evaluate,
};

fn registry() -> &'static Registry {
    Registry::builtin().expect("builtin catalog loads")
}

/// Midpoint of every required parameter, if all of them are bounded.
fn midpoint_inputs(def: &CorrelationDefinition) -> Option<InputSet> {
    def.parameters
        .iter()
        .filter(|p| p.required)
        .map(|p| match (p.lower, p.upper) {
            (Some(lo), Some(hi)) => Some((p.name.clone(), 0.5 * (lo + hi))),
            _ => None,
        })
        .collect()
}

fn parameter_warnings(def: &CorrelationDefinition, inputs: &InputSet, name: &str) -> Option<usize> {
    let eval = evaluate(def, inputs, Tuning::default()).ok()?;
    Some(
        eval.warnings
            .iter()
            .filter(|w| w.target == WarningTarget::Parameter(name.to_string()))
            .count(),
    )
}

#[test]
fn bounds_are_inclusive_and_one_unit_outside_warns_once() {
    let mut checked = 0;
    for def in registry().definitions().filter(|d| d.preconditions.is_empty()) {
        let Some(mid) = midpoint_inputs(def) else {
            continue;
        };
        if evaluate(def, &mid, Tuning::default()).is_err() {
            continue;
        }
        for param in def.parameters.iter().filter(|p| p.required) {
            let (Some(lo), Some(hi)) = (param.lower, param.upper) else {
                continue;
            };
            for at in [lo, hi] {
                let inputs = mid.clone().with(param.name.clone(), at);
                if let Some(count) = parameter_warnings(def, &inputs, &param.name) {
                    assert_eq!(count, 0, "{} {} = {at}", def.name, param.name);
                }
            }
            for outside in [lo - 1.0, hi + 1.0] {
                let inputs = mid.clone().with(param.name.clone(), outside);
                if let Some(count) = parameter_warnings(def, &inputs, &param.name) {
                    assert_eq!(count, 1, "{} {} = {outside}", def.name, param.name);
                }
            }
            checked += 1;
        }
    }
    assert!(checked > 50, "only {checked} parameters checked");
}

#[test]
fn synonyms_match_canonical_inputs_and_conflict_with_them() {
    let mut checked = 0;
    for def in registry().definitions().filter(|d| !d.synonyms.is_empty()) {
        let Some(mid) = midpoint_inputs(def) else {
            continue;
        };
        let Ok(direct) = evaluate(def, &mid, Tuning::default()) else {
            continue;
        };
        for synonym in &def.synonyms {
            let target = &def.parameters[synonym.index];
            let Some(InputValue::Raw(v)) = mid.get(&target.name) else {
                continue;
            };
            let alias_value = Quantity::new(v, target.unit).convert(synonym.unit).unwrap();

            let mut via_alias = mid.clone();
            via_alias.remove(&target.name);
            via_alias.insert(synonym.alias.clone(), alias_value.value());
            let aliased = evaluate(def, &via_alias, Tuning::default()).unwrap();
            let rel = (aliased.value.value() - direct.value.value()).abs() / direct.value.value().abs();
            assert!(rel < 1e-9, "{}: {} vs {}", def.name, aliased.value, direct.value);

            let both = mid.clone().with(synonym.alias.clone(), alias_value.value());
            let err = evaluate(def, &both, Tuning::default()).unwrap_err();
            assert!(
                matches!(err, CorrelationError::ConflictingSynonym { .. }),
                "{}: {err}",
                def.name
            );
            checked += 1;
        }
    }
    assert!(checked >= 5, "only {checked} synonyms checked");
}

fn typical_value(name: &str) -> InputValue {
    let raw = match name {
        "t" => return Quantity::new(180.0, UnitKind::Fahrenheit).into(),
        "tsep" => return Quantity::new(100.0, UnitKind::Fahrenheit).into(),
        "yg" => 0.75,
        "yo" => 0.85,
        "api" => 35.0,
        "rs" | "rsb" => 500.0,
        "psep" => 114.7,
        "co" => 1.2e-5,
        "bobp" => 1.3,
        "uod" => 2.0,
        "bwbp" => 1.02,
        "cwa" => 3.0e-6,
        _ => 1.0,
    };
    InputValue::Raw(raw)
}

#[test]
fn pressure_preconditions_split_at_the_bubble_point() {
    let mut checked = 0;
    for def in registry().definitions() {
        let Some(condition) = def
            .preconditions
            .iter()
            .find(|c| c.left == "p" && c.right == "pb")
        else {
            continue;
        };
        let pb = def
            .parameter("pb")
            .and_then(|p| p.lower.zip(p.upper))
            .map_or(2500.0, |(lo, hi)| 0.5 * (lo + hi));

        let mut inputs: InputSet = def
            .parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| match (p.lower, p.upper) {
                (Some(lo), Some(hi)) => (p.name.clone(), InputValue::Raw(0.5 * (lo + hi))),
                _ => (p.name.clone(), typical_value(&p.name)),
            })
            .collect();
        inputs.insert("pb", pb);

        let (wrong_side, accepted) = match condition.relation {
            Relation::Ge => (pb - 1.0, pb),
            Relation::Gt => (pb, pb + 1.0),
            Relation::Le => (pb + 1.0, pb),
            Relation::Lt => (pb, pb - 1.0),
        };
        let err = evaluate(def, &inputs.clone().with("p", wrong_side), Tuning::default()).unwrap_err();
        assert!(
            matches!(err, CorrelationError::PreconditionViolated { .. }),
            "{}: {err}",
            def.name
        );

        let at = evaluate(def, &inputs.with("p", accepted), Tuning::default());
        assert!(at.is_ok(), "{}: {:?}", def.name, at.err());
        checked += 1;
    }
    assert!(checked >= 15, "only {checked} preconditions checked");
}

#[test]
fn evaluation_is_idempotent() {
    for def in registry().definitions() {
        let Some(inputs) = midpoint_inputs(def) else {
            continue;
        };
        let first = evaluate(def, &inputs, Tuning::default());
        let second = evaluate(def, &inputs, Tuning::default());
        assert_eq!(first, second, "{}", def.name);
    }
}

proptest! {
    #[test]
    fn standing_inside_its_bounds_never_warns_on_inputs(
        yg in 0.59f64..=0.95,
        rsb in 20.0f64..=1425.0,
        api in 16.5f64..=63.8,
        t in 100.0f64..=258.0,
    ) {
        let inputs = InputSet::new()
            .with("yg", yg)
            .with("rsb", rsb)
            .with("api", api)
            .with("t", t);
        let eval = registry().evaluate("PbStanding", &inputs).unwrap();
        prop_assert!(eval.value.value() > 0.0);
        prop_assert!(eval.warnings.iter().all(|w| w.target == WarningTarget::Output));
    }

    #[test]
    fn de_ghetto_viscosity_variant_follows_api(api in 6.0f64..=22.3, rs in 17.21f64..=640.25) {
        let inputs = InputSet::new()
            .with("uod", 50.0)
            .with("rs", rs)
            .with("api", api);
        let eval = registry().evaluate("UobDeGhettoEtAl", &inputs).unwrap();
        let expected = if api <= 10.0 { "extra_heavy" } else { "heavy" };
        prop_assert_eq!(eval.variant_used.as_str(), expected);
    }

    #[test]
    fn temperature_units_do_not_change_results(t in 100.0f64..=258.0) {
        let base = InputSet::new()
            .with("yg", 0.75)
            .with("rsb", 500.0)
            .with("api", 35.0);
        let fahrenheit = registry()
            .evaluate("PbStanding", &base.clone().with("t", t))
            .unwrap();
        let celsius = Quantity::new(t, UnitKind::Fahrenheit)
            .convert(UnitKind::Celsius)
            .unwrap();
        let converted = registry()
            .evaluate("PbStanding", &base.with("t", celsius))
            .unwrap();
        let rel = (fahrenheit.value.value() - converted.value.value()).abs() / fahrenheit.value.value();
        prop_assert!(rel < 1e-9);
    }

    #[test]
    fn mccain_compression_is_monotone_in_pressure(
        pb in 1000.0f64..4000.0,
        dp in 0.0f64..3000.0,
        co in 1e-6f64..5e-5,
    ) {
        let inputs = InputSet::new()
            .with("pb", pb)
            .with("bobp", 1.3)
            .with("co", co);
        let at_pb = registry()
            .evaluate("BoaMcCain", &inputs.clone().with("p", pb))
            .unwrap();
        let above = registry()
            .evaluate("BoaMcCain", &inputs.with("p", pb + dp))
            .unwrap();
        prop_assert!(above.value.value() <= at_pb.value.value());
    }
}
