//! Pseudo-reduced ratios, gas volume factor, hydrocarbon pseudocritical
//! temperature and gas viscosity.

use super::Kernel;
use crate::error::CorrelationResult;

pub(super) const KERNELS: &[Kernel] = &[
    Kernel { id: "tpr", params: &["t", "tpcm"], eval: tpr },
    Kernel { id: "ppr", params: &["p", "ppcm"], eval: ppr },
    Kernel { id: "bg", params: &["t", "p", "z"], eval: bg },
    Kernel { id: "tsc_hc_standing", params: &["yghc"], eval: tsc_hc_standing },
    Kernel { id: "tsc_hc_standing_heavier_fractions", params: &["yghc"], eval: tsc_hc_standing_heavier_fractions },
    Kernel { id: "tsc_hc_sutton", params: &["yghc"], eval: tsc_hc_sutton },
    Kernel { id: "tpc_hc_elsharkawy", params: &["yghc"], eval: tpc_hc_elsharkawy },
    Kernel {
        id: "ug_carr_kb",
        params: &["t", "tpr", "ppr", "yg", "n2_concentration", "co2_concentration", "h2s_concentration"],
        eval: ug_carr_kb,
    },
    Kernel { id: "ug_lee_ge", params: &["t", "p", "yg", "z"], eval: ug_lee_ge },
    Kernel { id: "ug_dean_stiel", params: &["t", "p", "tsc", "psc", "yg", "z"], eval: ug_dean_stiel },
];

fn tpr(a: &[f64]) -> CorrelationResult<f64> {
    args!("tpr", a, [t, tpcm]);
    Ok(t / tpcm)
}

fn ppr(a: &[f64]) -> CorrelationResult<f64> {
    args!("ppr", a, [p, ppcm]);
    Ok(p / ppcm)
}

/// Reservoir cubic feet per standard cubic foot.
fn bg(a: &[f64]) -> CorrelationResult<f64> {
    args!("bg", a, [t, p, z]);
    Ok(0.028_27 * z * t / p)
}

fn quadratic(c: [f64; 3], yg: f64) -> f64 {
    c[0] + c[1] * yg + c[2] * yg * yg
}

fn tsc_hc_standing(a: &[f64]) -> CorrelationResult<f64> {
    args!("tsc_hc_standing", a, [yghc]);
    Ok(quadratic([168.0, 325.0, -12.5], yghc))
}

fn tsc_hc_standing_heavier_fractions(a: &[f64]) -> CorrelationResult<f64> {
    args!("tsc_hc_standing_heavier_fractions", a, [yghc]);
    Ok(quadratic([187.0, 330.0, -71.5], yghc))
}

fn tsc_hc_sutton(a: &[f64]) -> CorrelationResult<f64> {
    args!("tsc_hc_sutton", a, [yghc]);
    Ok(quadratic([169.2, 349.5, -74.0], yghc))
}

fn tpc_hc_elsharkawy(a: &[f64]) -> CorrelationResult<f64> {
    args!("tpc_hc_elsharkawy", a, [yghc]);
    Ok(quadratic([149.18, 358.14, -66.976], yghc))
}

const CARR_KB: [[f64; 4]; 4] = [
    [-2.462_118_20, 2.970_547_14, -2.862_640_54e-1, 8.054_205_22e-3],
    [2.808_609_49, -3.498_033_05, 3.603_730_20e-1, -1.044_324_13e-2],
    [-7.933_856_84e-1, 1.396_433_06, -1.491_449_25e-1, 4.410_155_12e-3],
    [8.393_871_78e-2, -1.864_088_48e-1, 2.033_678_81e-2, -6.095_792_63e-4],
];

/// Carr, Kobayashi and Burrows. Temperature in Fahrenheit, impurities as
/// mole fractions.
fn ug_carr_kb(a: &[f64]) -> CorrelationResult<f64> {
    args!("ug_carr_kb", a, [t, tsr, psr, yg, n2, co2, h2s]);
    let log_yg = yg.log10();
    let ugs = (1.709e-5 - 2.062e-6 * yg) * t + 8.188e-3 - 6.15e-3 * log_yg;
    let cco2 = 1e-3 * co2 * (9.08 * log_yg + 6.24);
    let cn2 = 1e-3 * n2 * (8.48 * log_yg + 9.59);
    let ch2s = 1e-3 * h2s * (8.49 * log_yg + 3.73);
    let ugsc = ugs + cco2 + ch2s + cn2;

    let psr_powers = [1.0, psr, psr * psr, psr * psr * psr];
    let mut x = 0.0;
    let mut tsr_power = 1.0;
    for row in CARR_KB {
        let inner: f64 = row.iter().zip(psr_powers).map(|(c, p)| c * p).sum();
        x += tsr_power * inner;
        tsr_power *= tsr;
    }

    Ok(ugsc * x.exp() / tsr)
}

/// Lee, Gonzalez and Eakin. Temperature in Rankine.
fn ug_lee_ge(a: &[f64]) -> CorrelationResult<f64> {
    args!("ug_lee_ge", a, [t, p, yg, z]);
    let mg = 28.96 * yg;
    let k = (9.4 + 0.02 * mg) * t.powf(1.5) / (209.0 + 19.0 * mg + t);
    let x = 3.5 + 986.0 / t + 0.01 * mg;
    let y = 2.4 - 0.2 * x;
    // g/cm3
    let rho = 1.4935e-3 * p * mg / (z * t);
    Ok(1e-4 * k * (x * rho.powf(y)).exp())
}

/// Dean and Stiel. Temperatures in Rankine.
fn ug_dean_stiel(a: &[f64]) -> CorrelationResult<f64> {
    args!("ug_dean_stiel", a, [t, p, tsc, psc, yg, z]);
    let tsr = t / tsc;
    let psr = p / psc;
    let mg = 28.96 * yg;
    let em = 5.4402 * tsc.powf(1.0 / 6.0) / (mg.sqrt() * psc.powf(2.0 / 3.0));
    let rho_r = 0.27 * psr / (z * tsr);

    let ugs = if tsr <= 1.5 {
        34e-5 * tsr.powf(8.0 / 9.0) / em
    } else {
        166.8e-5 * (0.1338 * tsr - 0.0932).powf(5.0 / 9.0) / em
    };
    Ok(ugs + 10.8e-5 * ((1.439 * rho_r).exp() - (-1.111 * rho_r.powf(1.888)).exp()) / em)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratios_are_plain_quotients() {
        assert_eq!(tpr(&[600.0, 400.0]).unwrap(), 1.5);
        assert_eq!(ppr(&[1340.0, 670.0]).unwrap(), 2.0);
    }

    #[test]
    fn bg_at_standard_conditions_is_near_one() {
        let bg = bg(&[519.67, 14.696, 1.0]).unwrap();
        assert!((bg - 1.0).abs() < 0.001, "bg = {bg}");
    }

    #[test]
    fn pseudocritical_temperature_grows_with_gravity() {
        for kernel in KERNELS.iter().filter(|k| k.params == ["yghc"]) {
            let light = (kernel.eval)(&[0.6]).unwrap();
            let heavy = (kernel.eval)(&[0.9]).unwrap();
            assert!(heavy > light, "{}", kernel.id);
            assert!(light > 300.0 && light < 400.0, "{} = {light}", kernel.id);
        }
    }

    #[test]
    fn gas_viscosities_agree_in_magnitude() {
        // tpr 1.5, ppr 2.0 at 600 R for a 0.7 gravity gas
        let z = 0.82;
        let carr = ug_carr_kb(&[140.33, 1.5, 2.0, 0.7, 0.0, 0.0, 0.0]).unwrap();
        let lee = ug_lee_ge(&[600.0, 1340.0, 0.7, z]).unwrap();
        let dean = ug_dean_stiel(&[600.0, 1340.0, 400.0, 670.0, 0.7, z]).unwrap();
        for ug in [carr, lee, dean] {
            assert!(ug > 0.01 && ug < 0.03, "ug = {ug}");
        }
    }

    #[test]
    fn impurities_change_carr_viscosity() {
        let sweet = ug_carr_kb(&[140.0, 1.5, 2.0, 0.7, 0.0, 0.0, 0.0]).unwrap();
        let sour = ug_carr_kb(&[140.0, 1.5, 2.0, 0.7, 0.0, 0.0, 0.1]).unwrap();
        assert!(sour > sweet);
    }
}
