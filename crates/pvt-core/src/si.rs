// pvt-core/src/si.rs

use crate::{Quantity, UnitFamily, UnitKind};
use uom::si::f64::{
    DynamicViscosity as UomDynamicViscosity, MassDensity as UomMassDensity,
    Pressure as UomPressure, ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical SI types (f64)
pub type DynVisc = UomDynamicViscosity;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;
pub type Density = UomMassDensity;

#[inline]
pub fn psia(v: f64) -> Pressure {
    use uom::si::pressure::pound_force_per_square_inch;
    Pressure::new::<pound_force_per_square_inch>(v)
}

#[inline]
pub fn rankine(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_rankine;
    Temperature::new::<degree_rankine>(v)
}

#[inline]
pub fn fahrenheit(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_fahrenheit;
    Temperature::new::<degree_fahrenheit>(v)
}

#[inline]
pub fn centipoise(v: f64) -> DynVisc {
    use uom::si::dynamic_viscosity::centipoise;
    DynVisc::new::<centipoise>(v)
}

#[inline]
pub fn gram_per_cm3(v: f64) -> Density {
    use uom::si::mass_density::gram_per_cubic_centimeter;
    Density::new::<gram_per_cubic_centimeter>(v)
}

/// A field quantity re-expressed as a `uom` SI quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SiQuantity {
    Pressure(Pressure),
    Temperature(Temperature),
    Viscosity(DynVisc),
    Density(Density),
}

impl SiQuantity {
    /// Value in the SI base unit of its dimension.
    pub fn base_value(&self) -> f64 {
        match self {
            Self::Pressure(p) => p.value,
            Self::Temperature(t) => t.value,
            Self::Viscosity(mu) => mu.value,
            Self::Density(rho) => rho.value,
        }
    }

    pub fn base_symbol(&self) -> &'static str {
        match self {
            Self::Pressure(_) => "Pa",
            Self::Temperature(_) => "K",
            Self::Viscosity(_) => "Pa·s",
            Self::Density(_) => "kg/m³",
        }
    }
}

/// SI form of `q`, for the families that have a dimensional SI counterpart.
pub fn to_si(q: &Quantity) -> Option<SiQuantity> {
    let si = match q.family() {
        UnitFamily::Pressure => SiQuantity::Pressure(psia(q.convert(UnitKind::Psia).ok()?.value())),
        UnitFamily::Temperature => {
            SiQuantity::Temperature(rankine(q.convert(UnitKind::Rankine).ok()?.value()))
        }
        UnitFamily::Viscosity => {
            SiQuantity::Viscosity(centipoise(q.convert(UnitKind::Centipoise).ok()?.value()))
        }
        UnitFamily::Density => {
            SiQuantity::Density(gram_per_cm3(q.convert(UnitKind::GramPerCm3).ok()?.value()))
        }
        _ => return None,
    };
    Some(si)
}
