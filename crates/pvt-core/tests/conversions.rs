use proptest::prelude::*;
use pvt_core::{CoreError, Quantity, Tolerances, UnitKind, api_to_sg, nearly_equal, sg_to_api};

proptest! {
    #[test]
    fn fahrenheit_rankine_fahrenheit_is_exact(f in -400.0f64..1000.0) {
        let back = Quantity::new(f, UnitKind::Fahrenheit)
            .convert(UnitKind::Rankine)
            .unwrap()
            .convert(UnitKind::Fahrenheit)
            .unwrap();
        prop_assert_eq!(back.value(), f);
    }

    #[test]
    fn api_sg_api_within_tolerance(api in 4.0f64..110.0) {
        let sg = UnitKind::Api.convert_value(api, UnitKind::SgDo).unwrap();
        let back = UnitKind::SgDo.convert_value(sg, UnitKind::Api).unwrap();
        prop_assert!(nearly_equal(back, api, Tolerances::default()));
        prop_assert!(nearly_equal(sg_to_api(api_to_sg(api)), api, Tolerances::default()));
    }

    #[test]
    fn rankine_reading_of_fahrenheit_is_offset(f in -400.0f64..1000.0) {
        let r = Quantity::new(f, UnitKind::Fahrenheit)
            .convert(UnitKind::Rankine)
            .unwrap();
        prop_assert_eq!(r.value(), f + 459.67);
    }

    #[test]
    fn pressure_kinds_round_trip(p in 0.0f64..20_000.0) {
        for kind in [UnitKind::KiloPascal, UnitKind::Bar, UnitKind::MegaPascal] {
            let there = UnitKind::Psia.convert_value(p, kind).unwrap();
            let back = kind.convert_value(there, UnitKind::Psia).unwrap();
            let tol = Tolerances { abs: 1e-9, rel: 1e-12 };
            prop_assert!(nearly_equal(back, p, tol));
        }
    }
}

#[test]
fn every_cross_family_pair_is_rejected() {
    for from in UnitKind::ALL {
        for to in UnitKind::ALL {
            let result = Quantity::new(1.0, from).convert(to);
            if from.family() == to.family() {
                assert!(result.is_ok(), "{from} -> {to}");
            } else {
                assert_eq!(
                    result.unwrap_err(),
                    CoreError::IncompatibleUnitKind { from, to }
                );
            }
        }
    }
}
