//! Parameter sweeps.
//!
//! One parameter varies between two values while every other input stays
//! fixed. Points are evaluated in parallel; a failing point keeps its error
//! and does not abort the sweep.

use crate::definition::CorrelationDefinition;
use crate::error::{CorrelationError, CorrelationResult};
use crate::evaluator::{self, Evaluation, InputSet, InputValue, Tuning};
use pvt_core::{Quantity, UnitKind};
use rayon::prelude::*;
use std::fmt;

/// Type of sweep progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepType {
    /// Uniformly spaced points
    Linear,
    /// Logarithmically spaced points
    Logarithmic,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SweepDefinition {
    /// Parameter or synonym being varied
    pub parameter: String,
    pub start: f64,
    pub end: f64,
    /// Unit of `start` and `end`; the implicit unit of `parameter` if `None`
    pub unit: Option<UnitKind>,
    pub num_points: usize,
    pub sweep_type: SweepType,
}

impl SweepDefinition {
    pub fn new(
        parameter: impl Into<String>,
        start: f64,
        end: f64,
        num_points: usize,
        sweep_type: SweepType,
    ) -> CorrelationResult<Self> {
        let invalid = |reason: &str| CorrelationError::InvalidSweep {
            reason: reason.to_string(),
        };
        if num_points < 2 {
            return Err(invalid("sweep must have at least 2 points"));
        }
        if !start.is_finite() || !end.is_finite() {
            return Err(invalid("sweep bounds must be finite"));
        }
        if start == end {
            return Err(invalid("start and end values must be different"));
        }
        Ok(Self {
            parameter: parameter.into(),
            start,
            end,
            unit: None,
            num_points,
            sweep_type,
        })
    }

    pub fn with_unit(mut self, unit: UnitKind) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Generate all points in the sweep. Both ends are exact.
    pub fn generate_points(&self) -> Vec<f64> {
        match self.sweep_type {
            SweepType::Linear => self.generate_linear(),
            SweepType::Logarithmic => self.generate_logarithmic(),
        }
    }

    fn generate_linear(&self) -> Vec<f64> {
        if self.num_points <= 1 {
            return vec![self.start];
        }
        let delta = (self.end - self.start) / (self.num_points - 1) as f64;
        let mut points: Vec<f64> = (0..self.num_points)
            .map(|i| self.start + i as f64 * delta)
            .collect();
        points[self.num_points - 1] = self.end;
        points
    }

    fn generate_logarithmic(&self) -> Vec<f64> {
        if self.num_points <= 1 {
            return vec![self.start];
        }
        // Falls back to linear spacing unless both ends are positive
        if self.start <= 0.0 || self.end <= 0.0 {
            return self.generate_linear();
        }
        let log_start = self.start.ln();
        let log_delta = (self.end.ln() - log_start) / (self.num_points - 1) as f64;
        let mut points: Vec<f64> = (0..self.num_points)
            .map(|i| (log_start + i as f64 * log_delta).exp())
            .collect();
        points[0] = self.start;
        points[self.num_points - 1] = self.end;
        points
    }
}

impl fmt::Display for SweepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::Logarithmic => write!(f, "Logarithmic"),
        }
    }
}

impl fmt::Display for SweepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.unit.map(|u| format!(" {u}")).unwrap_or_default();
        write!(
            f,
            "Sweep {} from {}{unit} to {}{unit} ({} points, {})",
            self.parameter, self.start, self.end, self.num_points, self.sweep_type
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint {
    /// Value of the swept parameter, in the sweep's unit
    pub input: f64,
    pub result: CorrelationResult<Evaluation>,
}

/// Result of a correlation sweep, in point order.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult {
    pub correlation: String,
    pub parameter: String,
    pub points: Vec<SweepPoint>,
    pub num_successful: usize,
    pub num_failed: usize,
}

impl SweepResult {
    /// `(input, value)` pairs of the successful points.
    pub fn values(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .filter_map(|p| p.result.as_ref().ok().map(|e| (p.input, e.value.value())))
            .collect()
    }

    /// Get independent values corresponding to successful points
    pub fn successful_inputs(&self) -> Vec<f64> {
        self.values().into_iter().map(|(x, _)| x).collect()
    }
}

/// Evaluate `def` at every point of `sweep`, the swept parameter overriding
/// any value for it in `inputs`, whether given by its name or a synonym.
pub fn execute(
    def: &CorrelationDefinition,
    inputs: &InputSet,
    sweep: &SweepDefinition,
    tuning: Tuning,
) -> CorrelationResult<SweepResult> {
    let index = def
        .parameter_index(&sweep.parameter)
        .or_else(|| def.synonym(&sweep.parameter).map(|s| s.index))
        .ok_or_else(|| CorrelationError::UnknownParameter {
            correlation: def.name.clone(),
            name: sweep.parameter.clone(),
        })?;

    // Drop fixed inputs that name the swept slot, canonically or by synonym
    let mut fixed = inputs.clone();
    fixed.remove(&def.parameters[index].name);
    for synonym in def.synonyms.iter().filter(|s| s.index == index) {
        fixed.remove(&synonym.alias);
    }

    let xs = sweep.generate_points();
    let points: Vec<SweepPoint> = xs
        .par_iter()
        .map(|&x| {
            let value = match sweep.unit {
                Some(unit) => InputValue::Quantity(Quantity::new(x, unit)),
                None => InputValue::Raw(x),
            };
            let point_inputs = fixed.clone().with(sweep.parameter.clone(), value);
            SweepPoint {
                input: x,
                result: evaluator::evaluate(def, &point_inputs, tuning),
            }
        })
        .collect();

    let num_successful = points.iter().filter(|p| p.result.is_ok()).count();
    let num_failed = points.len() - num_successful;
    tracing::debug!(
        correlation = %def.name,
        parameter = %sweep.parameter,
        num_successful,
        num_failed,
        "sweep finished"
    );

    Ok(SweepResult {
        correlation: def.name.clone(),
        parameter: sweep.parameter.clone(),
        points,
        num_successful,
        num_failed,
    })
}
