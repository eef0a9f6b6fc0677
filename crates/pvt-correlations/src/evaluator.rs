//! Correlation evaluation.
//!
//! Evaluation is a fixed pipeline over one resolved definition: synonym
//! resolution, completeness with defaults, unit normalization, range
//! warnings, preconditions, variant selection, the kernel itself, tuning and
//! finally the output range check. Range violations never fail an
//! evaluation; they are reported as [`RangeWarning`]s next to the value.

use crate::definition::{CorrelationDefinition, DefaultValue};
use crate::error::{CorrelationError, CorrelationResult};
use pvt_core::{Quantity, ensure_finite, within_bounds};
use serde::Serialize;
use std::fmt;

/// A single input: a bare number in the implicit unit, or a unit-tagged
/// quantity.
///
/// The implicit unit is the declared unit of the parameter, or of the
/// synonym when the input is named by a synonym.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputValue {
    Raw(f64),
    Quantity(Quantity),
}

impl From<f64> for InputValue {
    fn from(v: f64) -> Self {
        Self::Raw(v)
    }
}

impl From<Quantity> for InputValue {
    fn from(q: Quantity) -> Self {
        Self::Quantity(q)
    }
}

/// Named inputs for one evaluation, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSet {
    entries: Vec<(String, InputValue)>,
}

impl InputSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`InputSet::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<InputValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set `name`, replacing any earlier value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<InputValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<InputValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn remove(&mut self, name: &str) -> Option<InputValue> {
        let pos = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, InputValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S, V> FromIterator<(S, V)> for InputSet
where
    S: Into<String>,
    V: Into<InputValue>,
{
    fn from_iter<I: IntoIterator<Item = (S, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}

/// Linear adjustment `c + m * y` applied to a raw correlation result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tuning {
    pub c: f64,
    pub m: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self { c: 0.0, m: 1.0 }
    }
}

impl Tuning {
    pub fn apply(&self, y: f64) -> f64 {
        self.c + self.m * y
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningTarget {
    Parameter(String),
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bound {
    Lower(f64),
    Upper(f64),
}

/// A value outside its declared range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeWarning {
    pub target: WarningTarget,
    pub value: f64,
    pub bound: Bound,
}

impl fmt::Display for RangeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            WarningTarget::Parameter(name) => write!(f, "{name} = {}", self.value)?,
            WarningTarget::Output => write!(f, "result {}", self.value)?,
        }
        match self.bound {
            Bound::Lower(lo) => write!(f, " is below the lower bound {lo}"),
            Bound::Upper(hi) => write!(f, " is above the upper bound {hi}"),
        }
    }
}

/// Outcome of a successful evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub value: Quantity,
    pub warnings: Vec<RangeWarning>,
    pub variant_used: String,
}

impl Evaluation {
    pub fn is_within_ranges(&self) -> bool {
        self.warnings.is_empty()
    }
}

fn range_warning(
    target: WarningTarget,
    value: f64,
    lower: Option<f64>,
    upper: Option<f64>,
) -> Option<RangeWarning> {
    if within_bounds(value, lower, upper) {
        return None;
    }
    let bound = match lower {
        Some(lo) if value < lo => Bound::Lower(lo),
        _ => Bound::Upper(upper?),
    };
    Some(RangeWarning {
        target,
        value,
        bound,
    })
}

/// Evaluate `def` on `inputs`.
pub fn evaluate(
    def: &CorrelationDefinition,
    inputs: &InputSet,
    tuning: Tuning,
) -> CorrelationResult<Evaluation> {
    let supplied = resolve_inputs(def, inputs)?;
    let values = complete_and_normalize(def, supplied)?;

    let mut warnings: Vec<RangeWarning> = def
        .parameters
        .iter()
        .zip(&values)
        .filter_map(|(param, value)| {
            let v = (*value)?;
            range_warning(
                WarningTarget::Parameter(param.name.clone()),
                v,
                param.lower,
                param.upper,
            )
        })
        .collect();

    for condition in &def.preconditions {
        let (l, r) = condition.indices;
        if let (Some(left), Some(right)) = (values[l], values[r]) {
            // Both sides in the left parameter's unit
            let (left_param, right_param) = (&def.parameters[l], &def.parameters[r]);
            let right = Quantity::new(right, right_param.unit)
                .convert(left_param.unit)
                .map_err(|e| CorrelationError::from_unit(&right_param.name, e))?
                .value();
            if !condition.relation.holds(left, right) {
                return Err(CorrelationError::PreconditionViolated {
                    correlation: def.name.clone(),
                    relation: condition.describe(),
                    left,
                    right,
                });
            }
        }
    }

    let variant = def
        .variants
        .iter()
        .find(|v| v.guard.holds(&values))
        .ok_or_else(|| CorrelationError::NoApplicableVariant {
            correlation: def.name.clone(),
        })?;

    let args = variant
        .args
        .iter()
        .map(|&i| {
            values[i].ok_or_else(|| CorrelationError::MissingParameter {
                correlation: def.name.clone(),
                name: def.parameters[i].name.clone(),
            })
        })
        .collect::<CorrelationResult<Vec<f64>>>()?;

    let raw = (variant.kernel.eval)(&args)?;
    if !raw.is_finite() {
        return Err(CorrelationError::NonFiniteResult {
            correlation: def.name.clone(),
            variant: variant.id.clone(),
        });
    }

    let y = tuning.apply(raw);
    if let Some((lo, hi)) = def.output_range {
        warnings.extend(range_warning(WarningTarget::Output, y, Some(lo), Some(hi)));
    }

    tracing::debug!(
        correlation = %def.name,
        variant = %variant.id,
        value = y,
        warnings = warnings.len(),
        "evaluated correlation"
    );

    Ok(Evaluation {
        value: Quantity::new(y, def.unit),
        warnings,
        variant_used: variant.id.clone(),
    })
}

/// Map each input onto its parameter slot.
fn resolve_inputs(
    def: &CorrelationDefinition,
    inputs: &InputSet,
) -> CorrelationResult<Vec<Option<Quantity>>> {
    let mut slots: Vec<Option<Quantity>> = vec![None; def.parameters.len()];
    let mut supplied_as: Vec<Option<&str>> = vec![None; def.parameters.len()];

    for (name, value) in inputs.iter() {
        let (index, unit) = if let Some(i) = def.parameter_index(name) {
            (i, def.parameters[i].unit)
        } else if let Some(s) = def.synonym(name) {
            (s.index, s.unit)
        } else {
            return Err(CorrelationError::UnknownParameter {
                correlation: def.name.clone(),
                name: name.to_string(),
            });
        };

        let quantity = match value {
            InputValue::Raw(v) => Quantity::new(v, unit),
            InputValue::Quantity(q) => q,
        };
        ensure_finite(quantity.value(), "input").map_err(|_| {
            CorrelationError::NonFiniteInput {
                parameter: name.to_string(),
            }
        })?;

        if let Some(previous) = supplied_as[index] {
            let target = def.parameters[index].name.as_str();
            let synonym = if previous == target { name } else { previous };
            return Err(CorrelationError::ConflictingSynonym {
                correlation: def.name.clone(),
                synonym: synonym.to_string(),
                target: target.to_string(),
            });
        }
        supplied_as[index] = Some(name);
        slots[index] = Some(quantity);
    }
    Ok(slots)
}

/// Apply defaults, check that every required parameter is present and
/// convert all present values into their parameter's unit.
fn complete_and_normalize(
    def: &CorrelationDefinition,
    mut slots: Vec<Option<Quantity>>,
) -> CorrelationResult<Vec<Option<f64>>> {
    for (slot, param) in slots.iter_mut().zip(&def.parameters) {
        if let (true, Some(DefaultValue::Value(v))) = (slot.is_none(), &param.default) {
            *slot = Some(Quantity::new(*v, param.unit));
        }
    }
    for (i, param) in def.parameters.iter().enumerate() {
        if let (None, Some(DefaultValue::Parameter { index, .. })) = (slots[i], &param.default) {
            slots[i] = slots[*index];
        }
    }

    def.parameters
        .iter()
        .zip(slots)
        .map(|(param, slot)| match slot {
            Some(q) => q
                .convert(param.unit)
                .map(|q| Some(q.value()))
                .map_err(|e| CorrelationError::from_unit(&param.name, e)),
            None if param.required => Err(CorrelationError::MissingParameter {
                correlation: def.name.clone(),
                name: param.name.clone(),
            }),
            None => Ok(None),
        })
        .collect()
}
