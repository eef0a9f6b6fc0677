//! Load-time consistency checks on resolved definitions.

use crate::definition::{CorrelationDefinition, DefaultValue, Guard};
use crate::error::{CorrelationError, CorrelationResult};
use std::collections::{BTreeMap, HashSet};

pub fn validate_definition(def: &CorrelationDefinition) -> CorrelationResult<()> {
    let invalid = |reason: String| CorrelationError::InvalidDefinition {
        correlation: def.name.clone(),
        reason,
    };

    let mut names = HashSet::new();
    for param in &def.parameters {
        if !names.insert(param.name.as_str()) {
            return Err(invalid(format!("parameter '{}' declared twice", param.name)));
        }
        if let (Some(lo), Some(hi)) = (param.lower, param.upper) {
            if lo > hi {
                return Err(invalid(format!(
                    "bounds of '{}' are inverted ({lo} > {hi})",
                    param.name
                )));
            }
        }
        if let Some(DefaultValue::Parameter { index, name }) = &param.default {
            let source = &def.parameters[*index];
            if source.name == param.name {
                return Err(invalid(format!("'{}' defaults to itself", param.name)));
            }
            if matches!(source.default, Some(DefaultValue::Parameter { .. })) {
                return Err(invalid(format!(
                    "'{}' defaults to '{name}', which itself defaults to a parameter",
                    param.name
                )));
            }
            if !source.unit.is_convertible_to(param.unit) {
                return Err(invalid(format!(
                    "'{}' ({}) cannot default to '{name}' ({})",
                    param.name, param.unit, source.unit
                )));
            }
        }
    }

    if let Some((lo, hi)) = def.output_range {
        if lo > hi {
            return Err(invalid(format!("output range is inverted ({lo} > {hi})")));
        }
    }

    let mut aliases = HashSet::new();
    for synonym in &def.synonyms {
        if names.contains(synonym.alias.as_str()) {
            return Err(invalid(format!(
                "synonym '{}' shadows a parameter",
                synonym.alias
            )));
        }
        if !aliases.insert(synonym.alias.as_str()) {
            return Err(invalid(format!("synonym '{}' declared twice", synonym.alias)));
        }
        let target = &def.parameters[synonym.index];
        if !synonym.unit.is_convertible_to(target.unit) {
            return Err(CorrelationError::IncompatibleUnitKind {
                parameter: synonym.alias.clone(),
                from: synonym.unit,
                to: target.unit,
            });
        }
    }

    for condition in &def.preconditions {
        let (l, r) = condition.indices;
        let (left, right) = (&def.parameters[l], &def.parameters[r]);
        if !left.unit.is_convertible_to(right.unit) {
            return Err(invalid(format!(
                "precondition {} compares {} with {}",
                condition.describe(),
                left.unit.family(),
                right.unit.family()
            )));
        }
    }

    let mut ids = HashSet::new();
    for variant in &def.variants {
        if !ids.insert(variant.id.as_str()) {
            return Err(invalid(format!("variant id '{}' declared twice", variant.id)));
        }
    }

    check_variant_coverage(def)
}

/// Exactly one guard must hold at every sample point of the guarded
/// parameters' declared ranges.
fn check_variant_coverage(def: &CorrelationDefinition) -> CorrelationResult<()> {
    if def.variants.len() == 1 {
        return Ok(());
    }

    let mut constants: BTreeMap<usize, Vec<f64>> = BTreeMap::new();
    for variant in &def.variants {
        collect_constants(&variant.guard, &mut constants);
    }

    let axes: Vec<(usize, Vec<f64>)> = constants
        .into_iter()
        .map(|(index, values)| {
            let param = &def.parameters[index];
            (index, sample_points(values, param.lower, param.upper))
        })
        .collect();

    let mut values = vec![None; def.parameters.len()];
    let mut cursor = vec![0usize; axes.len()];
    loop {
        for (slot, (index, points)) in cursor.iter().zip(&axes) {
            values[*index] = Some(points[*slot]);
        }

        let matching: Vec<&str> = def
            .variants
            .iter()
            .filter(|v| v.guard.holds(&values))
            .map(|v| v.id.as_str())
            .collect();
        if matching.len() != 1 {
            let at = axes
                .iter()
                .map(|(index, _)| {
                    format!(
                        "{} = {}",
                        def.parameters[*index].name,
                        values[*index].unwrap_or(f64::NAN)
                    )
                })
                .collect::<Vec<_>>()
                .join(", ");
            let reason = if matching.is_empty() {
                format!("no variant applies at {at}")
            } else {
                format!("variants {} overlap at {at}", matching.join(", "))
            };
            return Err(CorrelationError::InvalidDefinition {
                correlation: def.name.clone(),
                reason,
            });
        }

        // Advance the mixed-radix cursor.
        let mut axis = 0;
        loop {
            if axis == axes.len() {
                return Ok(());
            }
            cursor[axis] += 1;
            if cursor[axis] < axes[axis].1.len() {
                break;
            }
            cursor[axis] = 0;
            axis += 1;
        }
    }
}

fn collect_constants(guard: &Guard, out: &mut BTreeMap<usize, Vec<f64>>) {
    match guard {
        Guard::Always => {}
        Guard::Compare { index, value, .. } => out.entry(*index).or_default().push(*value),
        Guard::All(guards) => guards.iter().for_each(|g| collect_constants(g, out)),
    }
}

/// Guard constants and declared bounds, the midpoints between them, and one
/// step past each open end. Points outside the declared range are dropped.
fn sample_points(mut edges: Vec<f64>, lower: Option<f64>, upper: Option<f64>) -> Vec<f64> {
    edges.extend(lower);
    edges.extend(upper);
    edges.retain(|v| lower.is_none_or(|lo| *v >= lo) && upper.is_none_or(|hi| *v <= hi));
    edges.sort_by(f64::total_cmp);
    edges.dedup();

    let mut points = edges.clone();
    points.extend(edges.windows(2).map(|w| 0.5 * (w[0] + w[1])));
    if let (None, Some(first)) = (lower, edges.first()) {
        points.push(first - 1.0);
    }
    if let (None, Some(last)) = (upper, edges.last()) {
        points.push(last + 1.0);
    }
    points.sort_by(f64::total_cmp);
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::resolve;
    use crate::schema::CorrelationRecord;
    use std::collections::HashMap;

    fn definition(yaml: &str) -> CorrelationDefinition {
        let record: CorrelationRecord = serde_yaml::from_str(yaml).unwrap();
        resolve(&record, &HashMap::new()).unwrap()
    }

    const VISCOSITY: &str = r#"
name: UobTwoRegimes
category: SaturatedOilViscosity
unit: CP
parameters:
  - { name: uod, unit: CP }
  - { name: rs, unit: SCF_STB }
  - { name: api, unit: Api, min: 6, max: 22.3 }
variants:
  - { id: extra_heavy, equation: uob_de_ghetto_extra_heavy, when: { param: api, op: le, value: 10 } }
  - { id: heavy, equation: uob_de_ghetto_heavy, when: { param: api, op: gt, value: 10 } }
"#;

    #[test]
    fn complementary_guards_pass() {
        validate_definition(&definition(VISCOSITY)).unwrap();
    }

    #[test]
    fn gap_between_guards_is_reported() {
        let yaml = VISCOSITY.replace("op: gt, value: 10", "op: gt, value: 12");
        let err = validate_definition(&definition(&yaml)).unwrap_err();
        assert!(
            matches!(err, CorrelationError::InvalidDefinition { ref reason, .. } if reason.starts_with("no variant applies at api = 11")),
            "{err}"
        );
    }

    #[test]
    fn overlap_at_boundary_is_reported() {
        let yaml = VISCOSITY.replace("op: gt, value: 10", "op: ge, value: 10");
        let err = validate_definition(&definition(&yaml)).unwrap_err();
        assert!(
            matches!(err, CorrelationError::InvalidDefinition { ref reason, .. } if reason.contains("overlap at api = 10")),
            "{err}"
        );
    }

    #[test]
    fn unbounded_side_is_sampled() {
        let yaml = r#"
name: UobThreeRegimes
category: SaturatedOilViscosity
unit: CP
parameters:
  - { name: uod, unit: CP }
  - { name: rs, unit: SCF_STB }
  - { name: api, unit: Api, max: 22.3 }
variants:
  - { id: a, equation: uob_de_ghetto_extra_heavy, when: { param: api, op: le, value: 10 } }
  - { id: b, equation: uob_de_ghetto_heavy, when: { all: [{ param: api, op: gt, value: 10 }, { param: api, op: lt, value: 12 }] } }
  - { id: c, equation: uob_de_ghetto_heavy, when: { param: api, op: ge, value: 12 } }
"#;
        validate_definition(&definition(yaml)).unwrap();

        let without_low = yaml.replace("op: le, value: 10", "op: lt, value: 9");
        let err = validate_definition(&definition(&without_low)).unwrap_err();
        assert!(matches!(err, CorrelationError::InvalidDefinition { ref reason, .. } if reason.contains("no variant applies")));

        let samples = sample_points(vec![10.0], None, Some(20.0));
        assert_eq!(samples, vec![9.0, 10.0, 15.0, 20.0]);
    }

    #[test]
    fn inverted_bounds_rejected() {
        let yaml = VISCOSITY.replace("min: 6, max: 22.3", "min: 30, max: 22.3");
        let err = validate_definition(&definition(&yaml)).unwrap_err();
        assert!(matches!(err, CorrelationError::InvalidDefinition { .. }));
    }

    #[test]
    fn synonym_rules() {
        let base = r#"
name: YwgrTest
category: WetGasSpecificGravity
unit: Sgg
parameters:
  - { name: yg, unit: Sgg }
  - { name: yo, unit: Sg_do }
  - { name: rsp1, unit: SCF_STB }
  - { name: gpa, unit: SCF_STB }
  - { name: veq, unit: SCF_STB }
synonyms:
  - { alias: ALIAS, target: yo, unit: UNIT }
equation: ywgr_mccain
"#;
        let ok = base.replace("ALIAS", "api").replace("UNIT", "Api");
        validate_definition(&definition(&ok)).unwrap();

        let shadow = base.replace("ALIAS", "yg").replace("UNIT", "Api");
        assert!(validate_definition(&definition(&shadow)).is_err());

        let wrong_family = base.replace("ALIAS", "api").replace("UNIT", "psia");
        let err = validate_definition(&definition(&wrong_family)).unwrap_err();
        assert!(matches!(err, CorrelationError::IncompatibleUnitKind { .. }));
    }

    #[test]
    fn precondition_across_families_rejected() {
        let yaml = r#"
name: BoaTest
category: OilFormationVolumeFactor
unit: RB_STB
parameters:
  - { name: p, unit: psia }
  - { name: pb, unit: Fahrenheit }
  - { name: bobp, unit: RB_STB }
  - { name: co, unit: psia_1 }
preconditions:
  - { left: p, op: ge, right: pb }
equation: boa_mccain
"#;
        let err = validate_definition(&definition(yaml)).unwrap_err();
        assert!(matches!(err, CorrelationError::InvalidDefinition { ref reason, .. } if reason.contains("p >= pb")));
    }
}
