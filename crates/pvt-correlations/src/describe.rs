//! Serializable description of a correlation's interface.

use crate::definition::{CorrelationDefinition, DefaultValue};
use crate::schema::{Category, Grid, Metadata};
use pvt_core::UnitKind;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationSchema {
    pub name: String,
    pub category: Category,
    pub unit: UnitKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_range: Option<[f64; 2]>,
    pub parameters: Vec<ParameterSchema>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<SynonymSchema>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub preconditions: Vec<String>,
    pub variants: Vec<VariantSchema>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hidden: Vec<Grid>,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSchema {
    pub name: String,
    pub unit: UnitKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultSchema>,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultSchema {
    Value(f64),
    Parameter(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynonymSchema {
    pub alias: String,
    pub target: String,
    pub unit: UnitKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantSchema {
    pub id: String,
    pub equation: String,
    pub guard: String,
}

impl From<&CorrelationDefinition> for CorrelationSchema {
    fn from(def: &CorrelationDefinition) -> Self {
        Self {
            name: def.name.clone(),
            category: def.category,
            unit: def.unit,
            output_range: def.output_range.map(|(lo, hi)| [lo, hi]),
            parameters: def
                .parameters
                .iter()
                .map(|p| ParameterSchema {
                    name: p.name.clone(),
                    unit: p.unit,
                    label: p.label.clone(),
                    lower: p.lower,
                    upper: p.upper,
                    default: p.default.as_ref().map(|d| match d {
                        DefaultValue::Value(v) => DefaultSchema::Value(*v),
                        DefaultValue::Parameter { name, .. } => DefaultSchema::Parameter(name.clone()),
                    }),
                    required: p.required,
                })
                .collect(),
            synonyms: def
                .synonyms
                .iter()
                .map(|s| SynonymSchema {
                    alias: s.alias.clone(),
                    target: s.target.clone(),
                    unit: s.unit,
                })
                .collect(),
            preconditions: def.preconditions.iter().map(|c| c.describe()).collect(),
            variants: def
                .variants
                .iter()
                .map(|v| VariantSchema {
                    id: v.id.clone(),
                    equation: v.kernel.id.to_string(),
                    guard: v.guard.to_string(),
                })
                .collect(),
            hidden: def.hidden.clone(),
            metadata: def.metadata.clone(),
        }
    }
}

impl CorrelationSchema {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn bounds_text(lower: Option<f64>, upper: Option<f64>) -> String {
    match (lower, upper) {
        (Some(lo), Some(hi)) => format!("[{lo}, {hi}]"),
        (Some(lo), None) => format!(">= {lo}"),
        (None, Some(hi)) => format!("<= {hi}"),
        (None, None) => "unbounded".to_string(),
    }
}

impl fmt::Display for CorrelationSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({}, {})", self.name, self.category, self.unit)?;
        if let Some(title) = &self.metadata.title {
            writeln!(f, "  {title}")?;
        }
        if !self.metadata.authors.is_empty() {
            writeln!(f, "  Authors: {}", self.metadata.authors.join(", "))?;
        }
        if let Some([lo, hi]) = self.output_range {
            writeln!(f, "  Output range: [{lo}, {hi}] {}", self.unit)?;
        }

        writeln!(f, "  Parameters:")?;
        for p in &self.parameters {
            write!(
                f,
                "    {:<18} {:<26} {}",
                p.name,
                p.unit.symbol(),
                bounds_text(p.lower, p.upper)
            )?;
            match &p.default {
                Some(DefaultSchema::Value(v)) => write!(f, "  default {v}")?,
                Some(DefaultSchema::Parameter(name)) => write!(f, "  default = {name}")?,
                None if !p.required => write!(f, "  optional")?,
                None => {}
            }
            writeln!(f)?;
        }

        if !self.synonyms.is_empty() {
            writeln!(f, "  Synonyms:")?;
            for s in &self.synonyms {
                writeln!(f, "    {} -> {} ({})", s.alias, s.target, s.unit.symbol())?;
            }
        }
        if !self.preconditions.is_empty() {
            writeln!(f, "  Preconditions: {}", self.preconditions.join(", "))?;
        }
        if self.variants.len() > 1 {
            writeln!(f, "  Variants:")?;
            for v in &self.variants {
                writeln!(f, "    {:<18} {:<34} when {}", v.id, v.equation, v.guard)?;
            }
        }
        if !self.hidden.is_empty() {
            let grids: Vec<&str> = self.hidden.iter().map(|g| g.name()).collect();
            writeln!(f, "  Hidden in: {}", grids.join(", "))?;
        }
        Ok(())
    }
}
