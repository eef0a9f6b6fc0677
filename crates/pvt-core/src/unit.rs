//! Field unit kinds used by the correlation catalog.
//!
//! Every kind belongs to exactly one [`UnitFamily`]. Kinds in the same family
//! convert into each other through the family's base kind; kinds in different
//! families never do. Most families only have one member, so conversion is a
//! pass-through to the kind itself.

use crate::{CoreError, CoreResult};
use std::fmt;

const RANKINE_OFFSET: f64 = 459.67;
const KELVIN_OFFSET: f64 = 273.15;
const PSI_PER_KPA: f64 = 0.145_037_737_730_209_2;
const PSI_PER_BAR: f64 = 14.503_773_773_020_92;
const SCF_STB_PER_SM3_SM3: f64 = 5.614_583_333;
const LB_FT3_PER_G_CM3: f64 = 62.427_960_576;
/// g/mol
const NACL_MOLAR_MASS: f64 = 58.4428;

/// API gravity to oil specific gravity (water = 1).
#[inline]
pub fn api_to_sg(api: f64) -> f64 {
    141.5 / (131.5 + api)
}

/// Oil specific gravity to API gravity.
#[inline]
pub fn sg_to_api(sg: f64) -> f64 {
    141.5 / sg - 131.5
}

/// Conversion family: kinds that measure the same physical thing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitFamily {
    Temperature,
    Pressure,
    OilGravity,
    GasGravity,
    GasOilRatio,
    OilVolumeFactor,
    GasVolumeFactor,
    Viscosity,
    Compressibility,
    GasCompressibilityFactor,
    Concentration,
    PseudoReducedTemperature,
    PseudoReducedPressure,
    Salinity,
    Density,
    InterfacialTension,
}

impl fmt::Display for UnitFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum UnitKind {
    Fahrenheit,
    Rankine,
    Celsius,
    Kelvin,
    Psia,
    KiloPascal,
    Bar,
    MegaPascal,
    Api,
    SgDo,
    Sgg,
    ScfStb,
    RbStb,
    RcfScf,
    Centipoise,
    Millipoise,
    ZFactor,
    MolePercent,
    MoleFraction,
    PseudoReducedTemperature,
    PseudoReducedPressure,
    PerPsia,
    SmStm,
    PascalSecond,
    PerMegaPascal,
    SaltPpm,
    SaltPercent,
    MolalityNaCl,
    GramPerCm3,
    PoundPerFt3,
    DynePerCm,
    MilliNewtonPerMeter,
}

impl UnitKind {
    pub const ALL: [UnitKind; 32] = [
        UnitKind::Fahrenheit,
        UnitKind::Rankine,
        UnitKind::Celsius,
        UnitKind::Kelvin,
        UnitKind::Psia,
        UnitKind::KiloPascal,
        UnitKind::Bar,
        UnitKind::MegaPascal,
        UnitKind::Api,
        UnitKind::SgDo,
        UnitKind::Sgg,
        UnitKind::ScfStb,
        UnitKind::RbStb,
        UnitKind::RcfScf,
        UnitKind::Centipoise,
        UnitKind::Millipoise,
        UnitKind::ZFactor,
        UnitKind::MolePercent,
        UnitKind::MoleFraction,
        UnitKind::PseudoReducedTemperature,
        UnitKind::PseudoReducedPressure,
        UnitKind::PerPsia,
        UnitKind::SmStm,
        UnitKind::PascalSecond,
        UnitKind::PerMegaPascal,
        UnitKind::SaltPpm,
        UnitKind::SaltPercent,
        UnitKind::MolalityNaCl,
        UnitKind::GramPerCm3,
        UnitKind::PoundPerFt3,
        UnitKind::DynePerCm,
        UnitKind::MilliNewtonPerMeter,
    ];

    /// Catalog symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Fahrenheit => "Fahrenheit",
            Self::Rankine => "Rankine",
            Self::Celsius => "Celsius",
            Self::Kelvin => "Kelvin",
            Self::Psia => "psia",
            Self::KiloPascal => "kPa",
            Self::Bar => "bar",
            Self::MegaPascal => "MPa",
            Self::Api => "Api",
            Self::SgDo => "Sg_do",
            Self::Sgg => "Sgg",
            Self::ScfStb => "SCF_STB",
            Self::RbStb => "RB_STB",
            Self::RcfScf => "RCF_SCF",
            Self::Centipoise => "CP",
            Self::Millipoise => "mP",
            Self::ZFactor => "ZFactor",
            Self::MolePercent => "MolePercent",
            Self::MoleFraction => "MoleFraction",
            Self::PseudoReducedTemperature => "PseudoReducedTemperature",
            Self::PseudoReducedPressure => "PseudoReducedPressure",
            Self::PerPsia => "psia_1",
            Self::SmStm => "Sm3_Sm3",
            Self::PascalSecond => "Pa_s",
            Self::PerMegaPascal => "MPa_1",
            Self::SaltPpm => "Salt_PPM",
            Self::SaltPercent => "Salt_Percent",
            Self::MolalityNaCl => "Molality_NaCl",
            Self::GramPerCm3 => "g_cm3",
            Self::PoundPerFt3 => "lb_ft3",
            Self::DynePerCm => "dynes_cm",
            Self::MilliNewtonPerMeter => "mN_m",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Fahrenheit => "Degrees Fahrenheit",
            Self::Rankine => "Degrees Rankine",
            Self::Celsius => "Degrees Celsius",
            Self::Kelvin => "Kelvin",
            Self::Psia => "Pounds per square inch, absolute",
            Self::KiloPascal => "Kilopascal, absolute",
            Self::Bar => "Bar, absolute",
            Self::MegaPascal => "Megapascal, absolute",
            Self::Api => "API gravity of dead oil",
            Self::SgDo => "Specific gravity of dead oil (water = 1)",
            Self::Sgg => "Specific gravity of gas (air = 1)",
            Self::ScfStb => "Standard cubic feet per stock tank barrel",
            Self::RbStb => "Reservoir barrels per stock tank barrel",
            Self::RcfScf => "Reservoir cubic feet per standard cubic foot",
            Self::Centipoise => "Centipoise",
            Self::Millipoise => "Millipoise",
            Self::ZFactor => "Gas compressibility factor",
            Self::MolePercent => "Mole percent",
            Self::MoleFraction => "Mole fraction",
            Self::PseudoReducedTemperature => "Pseudo-reduced temperature",
            Self::PseudoReducedPressure => "Pseudo-reduced pressure",
            Self::PerPsia => "Reciprocal psia",
            Self::SmStm => "Standard cubic metres per standard cubic metre",
            Self::PascalSecond => "Pascal second",
            Self::PerMegaPascal => "Reciprocal megapascal",
            Self::SaltPpm => "Dissolved solids, parts per million by weight",
            Self::SaltPercent => "Dissolved solids, weight percent",
            Self::MolalityNaCl => "NaCl molality, mol per kg of water",
            Self::GramPerCm3 => "Grams per cubic centimetre",
            Self::PoundPerFt3 => "Pounds mass per cubic foot",
            Self::DynePerCm => "Dynes per centimetre",
            Self::MilliNewtonPerMeter => "Millinewtons per metre",
        }
    }

    pub fn family(self) -> UnitFamily {
        match self {
            Self::Fahrenheit | Self::Rankine | Self::Celsius | Self::Kelvin => {
                UnitFamily::Temperature
            }
            Self::Psia | Self::KiloPascal | Self::Bar | Self::MegaPascal => UnitFamily::Pressure,
            Self::Api | Self::SgDo => UnitFamily::OilGravity,
            Self::Sgg => UnitFamily::GasGravity,
            Self::ScfStb | Self::SmStm => UnitFamily::GasOilRatio,
            Self::RbStb => UnitFamily::OilVolumeFactor,
            Self::RcfScf => UnitFamily::GasVolumeFactor,
            Self::Centipoise | Self::Millipoise | Self::PascalSecond => UnitFamily::Viscosity,
            Self::ZFactor => UnitFamily::GasCompressibilityFactor,
            Self::MolePercent | Self::MoleFraction => UnitFamily::Concentration,
            Self::PseudoReducedTemperature => UnitFamily::PseudoReducedTemperature,
            Self::PseudoReducedPressure => UnitFamily::PseudoReducedPressure,
            Self::PerPsia | Self::PerMegaPascal => UnitFamily::Compressibility,
            Self::SaltPpm | Self::SaltPercent | Self::MolalityNaCl => UnitFamily::Salinity,
            Self::GramPerCm3 | Self::PoundPerFt3 => UnitFamily::Density,
            Self::DynePerCm | Self::MilliNewtonPerMeter => UnitFamily::InterfacialTension,
        }
    }

    /// Smallest physically meaningful value, if the kind has one.
    pub fn physical_min(self) -> Option<f64> {
        match self {
            Self::Fahrenheit => Some(-RANKINE_OFFSET),
            Self::Celsius => Some(-KELVIN_OFFSET),
            Self::Rankine | Self::Kelvin => Some(0.0),
            Self::Psia | Self::KiloPascal | Self::Bar | Self::MegaPascal => Some(0.0),
            Self::Api => Some(4.0),
            Self::SgDo => Some(0.58592),
            Self::MolePercent | Self::MoleFraction => Some(0.0),
            Self::SaltPpm | Self::SaltPercent | Self::MolalityNaCl => Some(0.0),
            Self::GramPerCm3 | Self::PoundPerFt3 => Some(0.0),
            _ => None,
        }
    }

    /// Largest physically meaningful value, if the kind has one.
    pub fn physical_max(self) -> Option<f64> {
        match self {
            Self::Api => Some(110.0),
            Self::SgDo => Some(1.04428),
            Self::MolePercent => Some(100.0),
            Self::MoleFraction => Some(1.0),
            Self::SaltPercent => Some(100.0),
            Self::SaltPpm => Some(1e6),
            _ => None,
        }
    }

    pub fn is_convertible_to(self, other: UnitKind) -> bool {
        self.family() == other.family()
    }

    /// Resolve a catalog symbol or a common alias.
    pub fn from_symbol(symbol: &str) -> CoreResult<UnitKind> {
        let trimmed = symbol.trim();
        if let Some(kind) = Self::ALL.iter().find(|k| k.symbol() == trimmed) {
            return Ok(*kind);
        }
        let kind = match trimmed.to_lowercase().as_str() {
            "f" | "°f" | "degf" | "fahrenheit" => Self::Fahrenheit,
            "r" | "°r" | "degr" | "rankine" => Self::Rankine,
            "c" | "°c" | "degc" | "celsius" => Self::Celsius,
            "k" | "kelvin" => Self::Kelvin,
            "psia" => Self::Psia,
            "kpa" => Self::KiloPascal,
            "bar" | "bara" => Self::Bar,
            "mpa" => Self::MegaPascal,
            "api" | "°api" => Self::Api,
            "sg_do" | "sgo" | "sg" => Self::SgDo,
            "sgg" => Self::Sgg,
            "scf_stb" | "scf/stb" => Self::ScfStb,
            "rb_stb" | "rb/stb" | "bbl/stb" => Self::RbStb,
            "rcf_scf" | "ft3/scf" => Self::RcfScf,
            "cp" | "centipoise" => Self::Centipoise,
            "mp" | "millipoise" => Self::Millipoise,
            "zfactor" | "z" => Self::ZFactor,
            "molepercent" | "mol%" | "%" => Self::MolePercent,
            "molefraction" => Self::MoleFraction,
            "pseudoreducedtemperature" | "tpr" => Self::PseudoReducedTemperature,
            "pseudoreducedpressure" | "ppr" => Self::PseudoReducedPressure,
            "psia_1" | "1/psia" | "1/psi" => Self::PerPsia,
            "sm3_sm3" | "sm3/sm3" => Self::SmStm,
            "pa_s" | "pa.s" | "pa·s" | "paxs" => Self::PascalSecond,
            "mpa_1" | "1/mpa" => Self::PerMegaPascal,
            "salt_ppm" | "ppm" => Self::SaltPpm,
            "salt_percent" | "wt%" => Self::SaltPercent,
            "molality_nacl" | "mol/kg" | "molal" => Self::MolalityNaCl,
            "g_cm3" | "g/cm3" | "g/cc" | "gr_cm3" => Self::GramPerCm3,
            "lb_ft3" | "lb/ft3" | "lbm/ft3" => Self::PoundPerFt3,
            "dynes_cm" | "dyne/cm" | "dynes/cm" => Self::DynePerCm,
            "mn_m" | "mn/m" => Self::MilliNewtonPerMeter,
            "psi" | "psig" => {
                return Err(CoreError::AmbiguousUnit {
                    symbol: trimmed.to_string(),
                    reason: "Use psia; gauge pressures are not accepted",
                });
            }
            _ => {
                return Err(CoreError::UnknownUnit {
                    symbol: trimmed.to_string(),
                });
            }
        };
        Ok(kind)
    }

    /// Value expressed in this kind → value in the family base kind.
    fn to_base(self, v: f64) -> f64 {
        match self {
            Self::Fahrenheit => v + RANKINE_OFFSET,
            Self::Celsius => (v + KELVIN_OFFSET) * 1.8,
            Self::Kelvin => v * 1.8,
            Self::KiloPascal => v * PSI_PER_KPA,
            Self::Bar => v * PSI_PER_BAR,
            Self::MegaPascal => v * PSI_PER_KPA * 1000.0,
            Self::Api => api_to_sg(v),
            Self::Millipoise => v / 10.0,
            Self::MoleFraction => v * 100.0,
            Self::SmStm => v * SCF_STB_PER_SM3_SM3,
            Self::PascalSecond => v * 1000.0,
            Self::PerMegaPascal => v / (PSI_PER_KPA * 1000.0),
            Self::SaltPpm => v / 1e4,
            Self::MolalityNaCl => {
                let solute = v * NACL_MOLAR_MASS;
                100.0 * solute / (1000.0 + solute)
            }
            Self::PoundPerFt3 => v / LB_FT3_PER_G_CM3,
            _ => v,
        }
    }

    /// Value in the family base kind → value expressed in this kind.
    fn from_base(self, v: f64) -> f64 {
        match self {
            Self::Fahrenheit => v - RANKINE_OFFSET,
            Self::Celsius => v / 1.8 - KELVIN_OFFSET,
            Self::Kelvin => v / 1.8,
            Self::KiloPascal => v / PSI_PER_KPA,
            Self::Bar => v / PSI_PER_BAR,
            Self::MegaPascal => v / (PSI_PER_KPA * 1000.0),
            Self::Api => sg_to_api(v),
            Self::Millipoise => v * 10.0,
            Self::MoleFraction => v / 100.0,
            Self::SmStm => v / SCF_STB_PER_SM3_SM3,
            Self::PascalSecond => v / 1000.0,
            Self::PerMegaPascal => v * PSI_PER_KPA * 1000.0,
            Self::SaltPpm => v * 1e4,
            Self::MolalityNaCl => 1000.0 * v / (NACL_MOLAR_MASS * (100.0 - v)),
            Self::PoundPerFt3 => v * LB_FT3_PER_G_CM3,
            _ => v,
        }
    }

    /// Convert a raw value between two kinds of the same family.
    pub fn convert_value(self, v: f64, target: UnitKind) -> CoreResult<f64> {
        if self == target {
            return Ok(v);
        }
        if !self.is_convertible_to(target) {
            return Err(CoreError::IncompatibleUnitKind {
                from: self,
                to: target,
            });
        }
        Ok(target.from_base(self.to_base(v)))
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl std::str::FromStr for UnitKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitKind::from_symbol(s)
    }
}

impl TryFrom<String> for UnitKind {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        UnitKind::from_symbol(&value)
    }
}

impl From<UnitKind> for String {
    fn from(kind: UnitKind) -> Self {
        kind.symbol().to_string()
    }
}
