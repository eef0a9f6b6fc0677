//! Gas-oil and gas-water interfacial tension, dynes/cm.

use super::Kernel;
use crate::error::CorrelationResult;

pub(super) const KERNELS: &[Kernel] = &[
    Kernel { id: "sgo_baker_swerdloff", params: &["t", "api", "p"], eval: sgo_baker_swerdloff },
    Kernel { id: "sgw_jennings_newman", params: &["t", "p"], eval: sgw_jennings_newman },
];

/// Dead oil tension interpolated between its 68 °F and 100 °F lines, then
/// reduced for dissolved gas. The reduction reaches zero near 3977 psia and
/// is held there above it.
fn sgo_baker_swerdloff(a: &[f64]) -> CorrelationResult<f64> {
    args!("sgo_baker_swerdloff", a, [t, api, p]);
    let at_68 = 39.0 - 0.2571 * api;
    let at_100 = 37.5 - 0.2571 * api;
    let dead = if t <= 68.0 {
        at_68
    } else if t >= 100.0 {
        at_100
    } else {
        at_68 - (t - 68.0) * (at_68 - at_100) / 32.0
    };
    Ok(dead * (1.0 - 0.024 * p.powf(0.45)).max(0.0))
}

fn sgw_jennings_newman(a: &[f64]) -> CorrelationResult<f64> {
    args!("sgw_jennings_newman", a, [t, p]);
    let a = 79.1618 - 0.118_978 * t;
    let b = -5.284_73e-3 + 9.879_13e-6 * t;
    let c = (2.338_14 - 4.571_94e-4 * t - 7.526_78e-6 * t * t) * 1e-7;
    Ok(a + b * p + c * p * p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dead_oil_tension_is_interpolated_between_68_and_100_f() {
        let cold = sgo_baker_swerdloff(&[60.0, 35.0, 0.0]).unwrap();
        let mid = sgo_baker_swerdloff(&[84.0, 35.0, 0.0]).unwrap();
        let hot = sgo_baker_swerdloff(&[150.0, 35.0, 0.0]).unwrap();
        assert!((cold - (39.0 - 0.2571 * 35.0)).abs() < 1e-12);
        assert!((mid - 0.5 * (cold + hot)).abs() < 1e-12);
    }

    #[test]
    fn dissolved_gas_lowers_oil_tension_down_to_zero() {
        let low = sgo_baker_swerdloff(&[150.0, 35.0, 1000.0]).unwrap();
        let high = sgo_baker_swerdloff(&[150.0, 35.0, 3000.0]).unwrap();
        assert!((low - 13.19).abs() < 0.01, "{low}");
        assert!(high < low && high > 0.0);
        assert_eq!(sgo_baker_swerdloff(&[150.0, 35.0, 6000.0]).unwrap(), 0.0);
    }

    #[test]
    fn water_tension_falls_with_temperature_and_pressure() {
        let surface = sgw_jennings_newman(&[74.0, 14.7]).unwrap();
        assert!((surface - 70.3).abs() < 0.2, "{surface}");
        assert!(sgw_jennings_newman(&[200.0, 3000.0]).unwrap() < surface);
        assert!(sgw_jennings_newman(&[200.0, 5000.0]).unwrap() < sgw_jennings_newman(&[200.0, 1000.0]).unwrap());
    }
}
