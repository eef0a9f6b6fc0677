//! Resolved correlation definitions.
//!
//! A [`CorrelationDefinition`] is what the evaluator works on: every bound is
//! a number in the parameter's own unit, every name reference is an index and
//! every variant points at its kernel with its argument slots bound.

use crate::error::{CorrelationError, CorrelationResult};
use crate::kernels::{self, Kernel};
use crate::schema::{
    Category, CorrelationRecord, GuardRecord, Grid, Metadata, ParameterRecord, Relation,
    ValueRecord,
};
use pvt_core::{Quantity, UnitKind};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub name: String,
    pub unit: UnitKind,
    pub label: Option<String>,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    pub default: Option<DefaultValue>,
    /// Needed by some kernel, guard or precondition.
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// Already in the parameter's unit.
    Value(f64),
    /// Take the value resolved for another parameter.
    Parameter { index: usize, name: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Synonym {
    pub alias: String,
    pub target: String,
    pub unit: UnitKind,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Precondition {
    pub left: String,
    pub relation: Relation,
    pub right: String,
    pub indices: (usize, usize),
}

impl Precondition {
    pub fn describe(&self) -> String {
        format!("{} {} {}", self.left, self.relation, self.right)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Guard {
    Always,
    Compare {
        param: String,
        index: usize,
        relation: Relation,
        value: f64,
    },
    All(Vec<Guard>),
}

impl Guard {
    /// Evaluate against normalized values; an absent value never matches.
    pub fn holds(&self, values: &[Option<f64>]) -> bool {
        match self {
            Self::Always => true,
            Self::Compare {
                index,
                relation,
                value,
                ..
            } => values
                .get(*index)
                .copied()
                .flatten()
                .is_some_and(|v| relation.holds(v, *value)),
            Self::All(guards) => guards.iter().all(|g| g.holds(values)),
        }
    }

    /// Parameter indices the guard reads.
    pub fn indices(&self, out: &mut Vec<usize>) {
        match self {
            Self::Always => {}
            Self::Compare { index, .. } => out.push(*index),
            Self::All(guards) => guards.iter().for_each(|g| g.indices(out)),
        }
    }
}

impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => f.write_str("always"),
            Self::Compare {
                param,
                relation,
                value,
                ..
            } => write!(f, "{param} {relation} {value}"),
            Self::All(guards) => {
                let parts: Vec<String> = guards.iter().map(ToString::to_string).collect();
                f.write_str(&parts.join(" and "))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct EquationVariant {
    pub id: String,
    pub guard: Guard,
    pub kernel: &'static Kernel,
    /// Parameter index for each kernel argument.
    pub args: Vec<usize>,
}

impl PartialEq for EquationVariant {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.guard == other.guard
            && self.kernel.id == other.kernel.id
            && self.args == other.args
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationDefinition {
    pub name: String,
    pub category: Category,
    pub unit: UnitKind,
    pub output_range: Option<(f64, f64)>,
    pub parameters: Vec<ParameterSpec>,
    pub synonyms: Vec<Synonym>,
    pub preconditions: Vec<Precondition>,
    pub variants: Vec<EquationVariant>,
    pub hidden: Vec<Grid>,
    pub metadata: Metadata,
}

impl CorrelationDefinition {
    pub fn parameter_index(&self, name: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p.name == name)
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn synonym(&self, alias: &str) -> Option<&Synonym> {
        self.synonyms.iter().find(|s| s.alias == alias)
    }

    pub fn is_hidden_in(&self, grid: Grid) -> bool {
        self.hidden.contains(&grid)
    }
}

/// Output unit and range of every registered record, by name.
pub(crate) type OutputIndex<'a> = HashMap<&'a str, (UnitKind, Option<[f64; 2]>)>;

/// Resolve a raw record against the full set of registered outputs.
pub(crate) fn resolve(
    record: &CorrelationRecord,
    outputs: &OutputIndex<'_>,
) -> CorrelationResult<CorrelationDefinition> {
    let name = record.name.as_str();
    let invalid = |reason: String| CorrelationError::InvalidDefinition {
        correlation: name.to_string(),
        reason,
    };

    if let Some(key) = record.extra.keys().next() {
        return Err(invalid(format!("unknown key '{key}'")));
    }

    let index: HashMap<&str, usize> = record
        .parameters
        .iter()
        .enumerate()
        .map(|(i, p)| (p.name.as_str(), i))
        .collect();
    if index.len() != record.parameters.len() {
        return Err(invalid("duplicate parameter name".into()));
    }
    let lookup = |param: &str| {
        index
            .get(param)
            .copied()
            .ok_or_else(|| invalid(format!("'{param}' is not a declared parameter")))
    };

    let mut parameters = Vec::with_capacity(record.parameters.len());
    for p in &record.parameters {
        let lower = p
            .min
            .as_ref()
            .map(|v| resolve_bound(name, p, v, outputs))
            .transpose()?;
        let upper = p
            .max
            .as_ref()
            .map(|v| resolve_bound(name, p, v, outputs))
            .transpose()?;
        let default = match &p.default {
            None => None,
            Some(ValueRecord::Param { param }) => Some(DefaultValue::Parameter {
                index: lookup(param)?,
                name: param.clone(),
            }),
            Some(v) => Some(DefaultValue::Value(resolve_bound(name, p, v, outputs)?)),
        };
        parameters.push(ParameterSpec {
            name: p.name.clone(),
            unit: p.unit,
            label: p.label.clone(),
            lower,
            upper,
            default,
            required: false,
        });
    }

    let mut synonyms = Vec::with_capacity(record.synonyms.len());
    for s in &record.synonyms {
        synonyms.push(Synonym {
            alias: s.alias.clone(),
            target: s.target.clone(),
            unit: s.unit,
            index: lookup(&s.target)?,
        });
    }

    let mut preconditions = Vec::with_capacity(record.preconditions.len());
    for c in &record.preconditions {
        preconditions.push(Precondition {
            left: c.left.clone(),
            relation: c.op,
            right: c.right.clone(),
            indices: (lookup(&c.left)?, lookup(&c.right)?),
        });
    }

    let mut variants = Vec::new();
    match (&record.equation, record.variants.is_empty()) {
        (Some(equation), true) => {
            variants.push(bind_variant(name, equation, equation, Guard::Always, &lookup)?);
        }
        (None, false) => {
            for v in &record.variants {
                let guard = match &v.when {
                    Some(g) => resolve_guard(g, &lookup)?,
                    None => Guard::Always,
                };
                variants.push(bind_variant(name, &v.id, &v.equation, guard, &lookup)?);
            }
        }
        (Some(_), false) => {
            return Err(invalid("declares both 'equation' and 'variants'".into()));
        }
        (None, true) => return Err(invalid("declares no equation".into())),
    }

    let mut used = Vec::new();
    for v in &variants {
        used.extend(&v.args);
        v.guard.indices(&mut used);
    }
    for c in &preconditions {
        used.extend([c.indices.0, c.indices.1]);
    }
    for i in used {
        parameters[i].required = true;
    }

    Ok(CorrelationDefinition {
        name: record.name.clone(),
        category: record.category,
        unit: record.unit,
        output_range: record.range.map(|[lo, hi]| (lo, hi)),
        parameters,
        synonyms,
        preconditions,
        variants,
        hidden: record.hidden.clone(),
        metadata: record.metadata.clone(),
    })
}

fn bind_variant<F>(
    correlation: &str,
    id: &str,
    equation: &str,
    guard: Guard,
    lookup: &F,
) -> CorrelationResult<EquationVariant>
where
    F: Fn(&str) -> CorrelationResult<usize>,
{
    let kernel = kernels::lookup(equation).ok_or_else(|| CorrelationError::UnknownEquation {
        correlation: correlation.to_string(),
        equation: equation.to_string(),
    })?;
    let args = kernel
        .params
        .iter()
        .map(|p| lookup(*p))
        .collect::<CorrelationResult<Vec<_>>>()?;
    Ok(EquationVariant {
        id: id.to_string(),
        guard,
        kernel,
        args,
    })
}

fn resolve_guard<F>(guard: &GuardRecord, lookup: &F) -> CorrelationResult<Guard>
where
    F: Fn(&str) -> CorrelationResult<usize>,
{
    Ok(match guard {
        GuardRecord::Compare { param, op, value } => Guard::Compare {
            param: param.clone(),
            index: lookup(param)?,
            relation: *op,
            value: *value,
        },
        GuardRecord::All { all } => Guard::All(
            all.iter()
                .map(|g| resolve_guard(g, lookup))
                .collect::<CorrelationResult<Vec<_>>>()?,
        ),
    })
}

/// Turn a bound or literal default into a number in the parameter's unit.
fn resolve_bound(
    correlation: &str,
    param: &ParameterRecord,
    value: &ValueRecord,
    outputs: &OutputIndex<'_>,
) -> CorrelationResult<f64> {
    let unresolved = |reference: String| CorrelationError::UnresolvedReference {
        correlation: correlation.to_string(),
        reference,
    };
    let quantity = match value {
        ValueRecord::Number(v) => return Ok(*v),
        ValueRecord::Quantity { value, unit } => Quantity::new(*value, *unit),
        ValueRecord::UnitMin { unit_min } => {
            let v = unit_min
                .physical_min()
                .ok_or_else(|| unresolved(format!("minimum of {unit_min}")))?;
            Quantity::new(v, *unit_min)
        }
        ValueRecord::UnitMax { unit_max } => {
            let v = unit_max
                .physical_max()
                .ok_or_else(|| unresolved(format!("maximum of {unit_max}")))?;
            Quantity::new(v, *unit_max)
        }
        ValueRecord::OutputMinOf { output_min_of: other } => {
            let (unit, range) = outputs
                .get(other.as_str())
                .ok_or_else(|| unresolved(other.clone()))?;
            let [lo, _] = range.ok_or_else(|| unresolved(format!("output range of {other}")))?;
            Quantity::new(lo, *unit)
        }
        ValueRecord::OutputMaxOf { output_max_of: other } => {
            let (unit, range) = outputs
                .get(other.as_str())
                .ok_or_else(|| unresolved(other.clone()))?;
            let [_, hi] = range.ok_or_else(|| unresolved(format!("output range of {other}")))?;
            Quantity::new(hi, *unit)
        }
        ValueRecord::Param { param: other } => {
            return Err(CorrelationError::InvalidDefinition {
                correlation: correlation.to_string(),
                reason: format!("bound of '{}' cannot refer to parameter '{other}'", param.name),
            });
        }
    };
    quantity
        .convert(param.unit)
        .map(|q| q.value())
        .map_err(|_| CorrelationError::InvalidDefinition {
            correlation: correlation.to_string(),
            reason: format!(
                "'{}' is declared in {} but its bound is given in {}",
                param.name,
                param.unit,
                quantity.unit()
            ),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ParameterRecord;

    fn record(yaml: &str) -> CorrelationRecord {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn outputs(entries: &[(&'static str, UnitKind, Option<[f64; 2]>)]) -> OutputIndex<'static> {
        entries.iter().map(|(n, u, r)| (*n, (*u, *r))).collect()
    }

    const STANDING: &str = r#"
name: PbStanding
category: BubblePointPressure
unit: psia
parameters:
  - { name: yg, unit: Sgg, min: 0.59, max: 0.95 }
  - { name: rsb, unit: SCF_STB }
  - { name: api, unit: Api, min: { value: 0.95608, unit: Sg_do } }
  - { name: t, unit: Fahrenheit, max: { value: 717.67, unit: Rankine } }
  - { name: extra, unit: psia }
equation: pb_standing
"#;

    #[test]
    fn resolves_bounds_into_parameter_units() {
        let def = resolve(&record(STANDING), &outputs(&[])).unwrap();
        let api = def.parameter("api").unwrap();
        assert!((api.lower.unwrap() - 16.5).abs() < 0.01);
        let t = def.parameter("t").unwrap();
        assert!((t.upper.unwrap() - 258.0).abs() < 1e-9);
    }

    #[test]
    fn binds_kernel_arguments_by_name() {
        let def = resolve(&record(STANDING), &outputs(&[])).unwrap();
        let variant = &def.variants[0];
        assert_eq!(variant.id, "pb_standing");
        assert_eq!(variant.args, vec![0, 1, 2, 3]);
        assert!(def.parameters[..4].iter().all(|p| p.required));
        assert!(!def.parameter("extra").unwrap().required);
    }

    #[test]
    fn output_bound_reference() {
        let yaml = r#"
name: BoaX
category: OilFormationVolumeFactor
unit: RB_STB
parameters:
  - { name: p, unit: psia }
  - { name: pb, unit: psia, min: { output_min_of: PbX }, max: { output_max_of: PbX } }
  - { name: bobp, unit: RB_STB }
  - { name: co, unit: psia_1 }
equation: boa_mccain
"#;
        let idx = outputs(&[("PbX", UnitKind::Psia, Some([100.0, 5000.0]))]);
        let def = resolve(&record(yaml), &idx).unwrap();
        let pb = def.parameter("pb").unwrap();
        assert_eq!((pb.lower, pb.upper), (Some(100.0), Some(5000.0)));

        let err = resolve(&record(yaml), &outputs(&[])).unwrap_err();
        assert!(matches!(err, CorrelationError::UnresolvedReference { ref reference, .. } if reference == "PbX"));

        let no_range = outputs(&[("PbX", UnitKind::Psia, None)]);
        let err = resolve(&record(yaml), &no_range).unwrap_err();
        assert!(matches!(err, CorrelationError::UnresolvedReference { .. }));
    }

    #[test]
    fn unknown_equation_and_missing_argument() {
        let yaml = STANDING.replace("equation: pb_standing", "equation: pb_nowhere");
        let err = resolve(&record(&yaml), &outputs(&[])).unwrap_err();
        assert!(matches!(err, CorrelationError::UnknownEquation { .. }));

        let yaml = STANDING.replace("equation: pb_standing", "equation: pb_al_marhoun");
        let err = resolve(&record(&yaml), &outputs(&[])).unwrap_err();
        assert!(matches!(err, CorrelationError::InvalidDefinition { ref reason, .. } if reason.contains("'yo'")));
    }

    #[test]
    fn bound_in_wrong_family_is_rejected() {
        let param = ParameterRecord {
            name: "t".into(),
            unit: UnitKind::Fahrenheit,
            label: None,
            min: None,
            max: None,
            default: None,
        };
        let err = resolve_bound(
            "X",
            &param,
            &ValueRecord::Quantity {
                value: 1.0,
                unit: UnitKind::Psia,
            },
            &outputs(&[]),
        )
        .unwrap_err();
        assert!(matches!(err, CorrelationError::InvalidDefinition { .. }));
    }

    #[test]
    fn guard_display_and_evaluation() {
        let guard = Guard::All(vec![
            Guard::Compare {
                param: "api".into(),
                index: 0,
                relation: Relation::Gt,
                value: 10.0,
            },
            Guard::Compare {
                param: "api".into(),
                index: 0,
                relation: Relation::Le,
                value: 35.0,
            },
        ]);
        assert_eq!(guard.to_string(), "api > 10 and api <= 35");
        assert!(guard.holds(&[Some(35.0)]));
        assert!(!guard.holds(&[Some(10.0)]));
        assert!(!guard.holds(&[None]));
    }
}
