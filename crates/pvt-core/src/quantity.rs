//! Unit-tagged values.
//!
//! A [`Quantity`] keeps the value and kind it was created with. Converting
//! always starts from that origin, so converting back to the original kind
//! returns the original value bit-for-bit no matter how many intermediate
//! kinds were visited.

use crate::{CoreError, CoreResult, UnitFamily, UnitKind};
use std::fmt;

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quantity {
    value: f64,
    unit: UnitKind,
    #[cfg_attr(feature = "serde", serde(skip))]
    origin: Option<Origin>,
}

#[derive(Debug, Clone, Copy)]
struct Origin {
    value: f64,
    unit: UnitKind,
}

impl Quantity {
    pub fn new(value: f64, unit: UnitKind) -> Self {
        Self {
            value,
            unit,
            origin: None,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> UnitKind {
        self.unit
    }

    pub fn family(&self) -> UnitFamily {
        self.unit.family()
    }

    /// Express this quantity in `target`, which must share its family.
    pub fn convert(&self, target: UnitKind) -> CoreResult<Quantity> {
        if target == self.unit {
            return Ok(*self);
        }
        let origin = self.origin.unwrap_or(Origin {
            value: self.value,
            unit: self.unit,
        });
        let value = if origin.unit == target {
            origin.value
        } else {
            origin
                .unit
                .convert_value(origin.value, target)
                .map_err(|_| CoreError::IncompatibleUnitKind {
                    from: self.unit,
                    to: target,
                })?
        };
        Ok(Quantity {
            value,
            unit: target,
            origin: Some(origin),
        })
    }

    /// Whether the value lies inside the kind's physical limits.
    pub fn is_physical(&self) -> bool {
        crate::within_bounds(
            self.value,
            self.unit.physical_min(),
            self.unit.physical_max(),
        )
    }

    /// Parse user text such as `"150 F"`, `"2500psia"` or `"0.75"`.
    ///
    /// A bare number takes `default_unit`; without one it is an error.
    pub fn parse(text: &str, default_unit: Option<UnitKind>) -> CoreResult<Quantity> {
        let (value, unit) = split_value_and_unit(text)?;
        let unit = if unit.is_empty() {
            default_unit.ok_or_else(|| {
                CoreError::Parse(format!("Missing unit in '{}'", text.trim()))
            })?
        } else {
            UnitKind::from_symbol(&unit)?
        };
        Ok(Quantity::new(value, unit))
    }
}

/// Free-function form of [`Quantity::convert`].
pub fn convert(quantity: &Quantity, target: UnitKind) -> CoreResult<Quantity> {
    quantity.convert(target)
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.unit == other.unit && self.value == other.value
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

fn split_value_and_unit(input: &str) -> CoreResult<(f64, String)> {
    let trimmed = input.trim();

    let split_idx = trimmed
        .find(|c: char| !c.is_ascii_digit() && c != '.' && c != '-' && c != '+' && c != 'e' && c != 'E')
        .unwrap_or(trimmed.len());

    let (num_part, unit_part) = trimmed.split_at(split_idx);
    let value: f64 = num_part.trim().parse().map_err(|_| {
        CoreError::Parse(format!("Could not parse numeric value from '{}'", input))
    })?;

    Ok((value, unit_part.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fahrenheit_round_trip_is_exact() {
        for f in [60.0, 100.0, 150.0, 258.0, 70.5, -40.0, 0.0] {
            let q = Quantity::new(f, UnitKind::Fahrenheit);
            let back = q
                .convert(UnitKind::Rankine)
                .unwrap()
                .convert(UnitKind::Fahrenheit)
                .unwrap();
            assert_eq!(back.value(), f);
            assert_eq!(back.unit(), UnitKind::Fahrenheit);
        }
    }

    #[test]
    fn detour_through_other_kinds_stays_exact() {
        let q = Quantity::new(44.6, UnitKind::Api);
        let back = q
            .convert(UnitKind::SgDo)
            .unwrap()
            .convert(UnitKind::Api)
            .unwrap();
        assert_eq!(back.value(), 44.6);

        let t = Quantity::new(212.0, UnitKind::Fahrenheit);
        let back = t
            .convert(UnitKind::Kelvin)
            .unwrap()
            .convert(UnitKind::Celsius)
            .unwrap()
            .convert(UnitKind::Fahrenheit)
            .unwrap();
        assert_eq!(back.value(), 212.0);
    }

    #[test]
    fn converted_value_matches_formula() {
        let r = Quantity::new(150.0, UnitKind::Fahrenheit)
            .convert(UnitKind::Rankine)
            .unwrap();
        assert_eq!(r.value(), 150.0 + 459.67);
        assert_eq!(r, Quantity::new(150.0 + 459.67, UnitKind::Rankine));
    }

    #[test]
    fn incompatible_conversion_reports_kinds() {
        let err = Quantity::new(0.7, UnitKind::Sgg)
            .convert(UnitKind::Rankine)
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::IncompatibleUnitKind {
                from: UnitKind::Sgg,
                to: UnitKind::Rankine
            }
        );
    }

    #[test]
    fn parse_with_and_without_units() {
        let q = Quantity::parse("150 F", None).unwrap();
        assert_eq!(q, Quantity::new(150.0, UnitKind::Fahrenheit));

        let q = Quantity::parse("2500psia", None).unwrap();
        assert_eq!(q, Quantity::new(2500.0, UnitKind::Psia));

        let q = Quantity::parse("0.75", Some(UnitKind::Sgg)).unwrap();
        assert_eq!(q, Quantity::new(0.75, UnitKind::Sgg));

        let q = Quantity::parse("-40C", None).unwrap();
        assert_eq!(q, Quantity::new(-40.0, UnitKind::Celsius));

        assert!(Quantity::parse("0.75", None).is_err());
        assert!(Quantity::parse("abc", Some(UnitKind::Sgg)).is_err());
        assert!(Quantity::parse("14.7 psi", None).is_err());
    }

    #[test]
    fn physical_limits() {
        assert!(Quantity::new(35.0, UnitKind::Api).is_physical());
        assert!(!Quantity::new(120.0, UnitKind::Api).is_physical());
        assert!(!Quantity::new(-500.0, UnitKind::Fahrenheit).is_physical());
        assert!(Quantity::new(1e6, UnitKind::ScfStb).is_physical());
    }
}
