//! Catalog record schema.
//!
//! These are the raw, unresolved records read from catalog YAML. References
//! to unit limits, other correlations' output bounds and sibling parameters
//! stay symbolic here; [`crate::registry::RegistryBuilder::build`] resolves
//! them once every record is registered.

use pvt_core::UnitKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Output property a correlation estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    BubblePointPressure,
    SaturatedOilFormationVolumeFactor,
    OilFormationVolumeFactor,
    UndersaturatedOilFormationVolumeFactor,
    SaturatedOilViscosity,
    SaturatedOilCompressibility,
    UndersaturatedOilCompressibility,
    GasCompressibility,
    GasPseudoReducedRatio,
    GasPseudocriticalTemp,
    GasVolumeFactor,
    GasViscosity,
    WetGasSpecificGravity,
    AdditionalGasProduced,
    EquivalentVolume,
    WaterDensity,
    WaterViscosity,
    SolutionGasWaterRelation,
    SaturatedWaterVolumeFactor,
    UndersaturatedWaterVolumeFactor,
    BrineModel,
    OilInterfacialTension,
    WaterInterfacialTension,
}

impl Category {
    pub const ALL: [Category; 23] = [
        Self::BubblePointPressure,
        Self::SaturatedOilFormationVolumeFactor,
        Self::OilFormationVolumeFactor,
        Self::UndersaturatedOilFormationVolumeFactor,
        Self::SaturatedOilViscosity,
        Self::SaturatedOilCompressibility,
        Self::UndersaturatedOilCompressibility,
        Self::GasCompressibility,
        Self::GasPseudoReducedRatio,
        Self::GasPseudocriticalTemp,
        Self::GasVolumeFactor,
        Self::GasViscosity,
        Self::WetGasSpecificGravity,
        Self::AdditionalGasProduced,
        Self::EquivalentVolume,
        Self::WaterDensity,
        Self::WaterViscosity,
        Self::SolutionGasWaterRelation,
        Self::SaturatedWaterVolumeFactor,
        Self::UndersaturatedWaterVolumeFactor,
        Self::BrineModel,
        Self::OilInterfacialTension,
        Self::WaterInterfacialTension,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::BubblePointPressure => "BubblePointPressure",
            Self::SaturatedOilFormationVolumeFactor => "SaturatedOilFormationVolumeFactor",
            Self::OilFormationVolumeFactor => "OilFormationVolumeFactor",
            Self::UndersaturatedOilFormationVolumeFactor => "UndersaturatedOilFormationVolumeFactor",
            Self::SaturatedOilViscosity => "SaturatedOilViscosity",
            Self::SaturatedOilCompressibility => "SaturatedOilCompressibility",
            Self::UndersaturatedOilCompressibility => "UndersaturatedOilCompressibility",
            Self::GasCompressibility => "GasCompressibility",
            Self::GasPseudoReducedRatio => "GasPseudoReducedRatio",
            Self::GasPseudocriticalTemp => "GasPseudocriticalTemp",
            Self::GasVolumeFactor => "GasVolumeFactor",
            Self::GasViscosity => "GasViscosity",
            Self::WetGasSpecificGravity => "WetGasSpecificGravity",
            Self::AdditionalGasProduced => "AdditionalGasProduced",
            Self::EquivalentVolume => "EquivalentVolume",
            Self::WaterDensity => "WaterDensity",
            Self::WaterViscosity => "WaterViscosity",
            Self::SolutionGasWaterRelation => "SolutionGasWaterRelation",
            Self::SaturatedWaterVolumeFactor => "SaturatedWaterVolumeFactor",
            Self::UndersaturatedWaterVolumeFactor => "UndersaturatedWaterVolumeFactor",
            Self::BrineModel => "BrineModel",
            Self::OilInterfacialTension => "OilInterfacialTension",
            Self::WaterInterfacialTension => "WaterInterfacialTension",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown category '{s}'"))
    }
}

/// Presentation grids a correlation may be hidden from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grid {
    Blackoil,
    Drygas,
    Wetgas,
}

impl Grid {
    pub fn name(self) -> &'static str {
        match self {
            Self::Blackoil => "blackoil",
            Self::Drygas => "drygas",
            Self::Wetgas => "wetgas",
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Grid {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blackoil" => Ok(Self::Blackoil),
            "drygas" => Ok(Self::Drygas),
            "wetgas" => Ok(Self::Wetgas),
            _ => Err(format!("Unknown grid '{s}' (expected blackoil, drygas or wetgas)")),
        }
    }
}

/// Ordering relation used by preconditions and variant guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    Lt,
    Le,
    Gt,
    Ge,
}

impl Relation {
    pub fn holds(self, left: f64, right: f64) -> bool {
        match self {
            Self::Lt => left < right,
            Self::Le => left <= right,
            Self::Gt => left > right,
            Self::Ge => left >= right,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CorrelationRecord {
    pub name: String,
    pub category: Category,
    pub unit: UnitKind,
    /// Declared output range `[low, high]` in `unit`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    #[serde(default)]
    pub parameters: Vec<ParameterRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<SynonymRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preconditions: Vec<PreconditionRecord>,
    /// Kernel id of a single-variant correlation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equation: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<VariantRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hidden: Vec<Grid>,
    #[serde(flatten)]
    pub metadata: Metadata,
    /// Keys matching no field above; a non-empty map fails the load.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Free text carried with a correlation and never interpreted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub refs: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub db: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub internal_notes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub equations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ParameterRecord {
    pub name: String,
    pub unit: UnitKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<ValueRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<ValueRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ValueRecord>,
}

/// A bound or default value, possibly deferred.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ValueRecord {
    /// Literal in the parameter's own unit.
    Number(f64),
    /// Literal in another unit of the same family.
    Quantity { value: f64, unit: UnitKind },
    /// Physical minimum of a unit kind.
    UnitMin { unit_min: UnitKind },
    /// Physical maximum of a unit kind.
    UnitMax { unit_max: UnitKind },
    /// Lower end of another correlation's output range.
    OutputMinOf { output_min_of: String },
    /// Upper end of another correlation's output range.
    OutputMaxOf { output_max_of: String },
    /// Value supplied for another parameter (defaults only).
    Param { param: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SynonymRecord {
    pub alias: String,
    pub target: String,
    pub unit: UnitKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PreconditionRecord {
    pub left: String,
    pub op: Relation,
    pub right: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct VariantRecord {
    pub id: String,
    pub equation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<GuardRecord>,
}

/// Variant selection condition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum GuardRecord {
    All { all: Vec<GuardRecord> },
    Compare { param: String, op: Relation, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_record() {
        let yaml = r#"
name: PbStanding
category: BubblePointPressure
unit: psia
range: [130, 7000]
title: STANDING CORRELATION
authors: [Standing]
parameters:
  - { name: yg, unit: Sgg, label: Gas specific gravity, min: 0.59, max: 0.95 }
  - { name: api, unit: Api, min: { unit_min: Api } }
  - { name: yo, unit: Sg_do, min: { value: 63.8, unit: Api } }
  - { name: rs, unit: SCF_STB, default: { param: rsb } }
equation: pb_standing
hidden: [wetgas]
"#;
        let record: CorrelationRecord = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(record.category, Category::BubblePointPressure);
        assert_eq!(record.unit, UnitKind::Psia);
        assert_eq!(record.range, Some([130.0, 7000.0]));
        assert_eq!(record.parameters[0].min, Some(ValueRecord::Number(0.59)));
        assert_eq!(
            record.parameters[1].min,
            Some(ValueRecord::UnitMin {
                unit_min: UnitKind::Api
            })
        );
        assert_eq!(
            record.parameters[2].min,
            Some(ValueRecord::Quantity {
                value: 63.8,
                unit: UnitKind::Api
            })
        );
        assert_eq!(
            record.parameters[3].default,
            Some(ValueRecord::Param { param: "rsb".into() })
        );
        assert_eq!(record.hidden, vec![Grid::Wetgas]);
        assert_eq!(record.metadata.title.as_deref(), Some("STANDING CORRELATION"));
        assert!(record.extra.is_empty());
    }

    #[test]
    fn misspelled_keys_are_kept_aside() {
        let yaml = r#"
name: BoaTypo
category: UndersaturatedOilFormationVolumeFactor
unit: RB_STB
title: Misspelled guard
parameters:
  - { name: p, unit: psia }
  - { name: pb, unit: psia }
precondition:
  - { left: p, op: ge, right: pb }
equation: boa_mccain
"#;
        let record: CorrelationRecord = serde_yaml::from_str(yaml).unwrap();
        assert!(record.preconditions.is_empty());
        assert_eq!(record.metadata.title.as_deref(), Some("Misspelled guard"));
        assert_eq!(record.extra.keys().collect::<Vec<_>>(), vec!["precondition"]);

        let typo = "- { name: p, unit: psia, mn: 100 }";
        assert!(serde_yaml::from_str::<Vec<ParameterRecord>>(typo).is_err());
    }

    #[test]
    fn parse_guards() {
        let yaml = r#"
- { id: heavy, equation: a, when: { param: api, op: le, value: 10 } }
- { id: medium, equation: b, when: { all: [{ param: api, op: gt, value: 10 }, { param: api, op: le, value: 35 }] } }
"#;
        let variants: Vec<VariantRecord> = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(
            variants[0].when,
            Some(GuardRecord::Compare { op: Relation::Le, .. })
        ));
        assert!(matches!(&variants[1].when, Some(GuardRecord::All { all }) if all.len() == 2));
    }

    #[test]
    fn category_round_trips_through_text() {
        for category in Category::ALL {
            assert_eq!(category.name().parse::<Category>().unwrap(), category);
        }
        assert!("NotACategory".parse::<Category>().is_err());
    }

    #[test]
    fn relations() {
        assert!(Relation::Ge.holds(2500.0, 2500.0));
        assert!(!Relation::Gt.holds(2500.0, 2500.0));
        assert!(Relation::Lt.holds(1.0, 2.0));
        assert_eq!(Relation::Le.to_string(), "<=");
    }
}
