//! Saturated oil viscosity (cP), mostly as a correction of dead oil viscosity.

use super::Kernel;
use crate::error::CorrelationResult;
use pvt_core::api_to_sg;

pub(super) const KERNELS: &[Kernel] = &[
    Kernel { id: "uob_beggs_robinson", params: &["uod", "rs"], eval: beggs_robinson },
    Kernel { id: "uob_chew_connally", params: &["uod", "rs"], eval: chew_connally },
    Kernel { id: "uob_khan", params: &["rsb", "api", "yg", "t", "p", "pb"], eval: khan },
    Kernel { id: "uob_kartoatmodjo_schmidt", params: &["uod", "rs"], eval: kartoatmodjo_schmidt },
    Kernel { id: "uob_petrosky_farshad", params: &["uod", "rs"], eval: petrosky_farshad },
    Kernel { id: "uob_perez_ml", params: &["uod", "rs"], eval: perez_ml },
    Kernel { id: "uob_gil_fonseca", params: &["uod", "rs"], eval: gil_fonseca },
    Kernel { id: "uob_de_ghetto_extra_heavy", params: &["uod", "rs"], eval: de_ghetto_extra_heavy },
    Kernel { id: "uob_de_ghetto_heavy", params: &["uod", "rs"], eval: de_ghetto_heavy },
    Kernel { id: "uob_dindoruk_christman", params: &["uod", "rs"], eval: dindoruk_christman },
];

fn beggs_robinson(a: &[f64]) -> CorrelationResult<f64> {
    args!("uob_beggs_robinson", a, [uod, rs]);
    let a = 10.715 * (rs + 100.0).powf(-0.515);
    let b = 5.44 * (rs + 150.0).powf(-0.338);
    Ok(a * uod.powf(b))
}

fn chew_connally(a: &[f64]) -> CorrelationResult<f64> {
    args!("uob_chew_connally", a, [uod, rs]);
    let a = 10f64.powf(rs * (2.2e-7 * rs - 7.4e-4));
    let b = 0.68 / 10f64.powf(8.62e-5 * rs)
        + 0.25 / 10f64.powf(1.1e-3 * rs)
        + 0.062 / 10f64.powf(3.74e-3 * rs);
    Ok(a * uod.powf(b))
}

/// Viscosity at `pb` from oil and gas gravity, carried to `p <= pb`.
fn khan(a: &[f64]) -> CorrelationResult<f64> {
    args!("uob_khan", a, [rsb, api, yg, t, p, pb]);
    let yo = api_to_sg(api);
    let tr = (t + 459.67) / 459.67;
    let uo_bubble = 0.09 * yg.sqrt() / (rsb.cbrt() * tr.powf(4.5) * (1.0 - yo).powi(3));
    Ok(uo_bubble * (p / pb).powf(-0.14) * (-2.5e-4 * (p - pb)).exp())
}

fn kartoatmodjo_schmidt(a: &[f64]) -> CorrelationResult<f64> {
    args!("uob_kartoatmodjo_schmidt", a, [uod, rs]);
    let y = 10f64.powf(-0.000_81 * rs);
    let f = (0.2001 + 0.8428 * 10f64.powf(-0.000_845 * rs)) * uod.powf(0.43 + 0.5165 * y);
    Ok(-0.068_21 + 0.9824 * f + 0.000_403_4 * f * f)
}

fn petrosky_farshad(a: &[f64]) -> CorrelationResult<f64> {
    args!("uob_petrosky_farshad", a, [uod, rs]);
    let a = 0.1651 + 0.6165 * 10f64.powf(-6.0866e-4 * rs);
    let b = 0.5131 + 0.5109 * 10f64.powf(-1.1831e-3 * rs);
    Ok(a * uod.powf(b))
}

fn perez_ml(a: &[f64]) -> CorrelationResult<f64> {
    args!("uob_perez_ml", a, [uod, rs]);
    Ok(uod.powf(0.5704 + 0.4296 * 10f64.powf(-0.001_80 * rs)))
}

fn gil_fonseca(a: &[f64]) -> CorrelationResult<f64> {
    args!("uob_gil_fonseca", a, [uod, rs]);
    let a = 0.769_22 + 0.2244 * 10f64.powf(-0.0139 * rs);
    let b = 0.105_63 + 0.894_05 * 10f64.powf(-0.000_57 * rs);
    Ok(a * uod.powf(b))
}

/// API <= 10.
fn de_ghetto_extra_heavy(a: &[f64]) -> CorrelationResult<f64> {
    args!("uob_de_ghetto_extra_heavy", a, [uod, rs]);
    let y = 10f64.powf(-0.000_81 * rs);
    let f = (-0.0335 + 1.0785 * 10f64.powf(-0.000_845 * rs)) * uod.powf(0.5798 + 0.3432 * y);
    Ok(2.3945 + 0.8927 * f + 0.001_567 * f * f)
}

/// API > 10.
fn de_ghetto_heavy(a: &[f64]) -> CorrelationResult<f64> {
    args!("uob_de_ghetto_heavy", a, [uod, rs]);
    let y = 10f64.powf(-0.000_81 * rs);
    let f = (0.2478 + 0.6114 * 10f64.powf(-0.000_845 * rs)) * uod.powf(0.4731 + 0.5158 * y);
    Ok(-0.6311 + 1.078 * f + 0.003_653 * f * f)
}

fn dindoruk_christman(a: &[f64]) -> CorrelationResult<f64> {
    args!("uob_dindoruk_christman", a, [uod, rs]);
    const A1: f64 = 1.0;
    const A2: f64 = 4.740_729e-4;
    const A3: f64 = -1.023_451e-2;
    const A4: f64 = 6.600_358e-1;
    const A5: f64 = 1.075_080e-3;
    const A6: f64 = 1.0;
    const A7: f64 = -2.191_172e-5;
    const A8: f64 = -1.660_981e-2;
    const A9: f64 = 4.233_179e-1;
    const A10: f64 = -2.273_945e-4;

    let a = A1 / (A2 * rs).exp() + A3 * rs.powf(A4) / (A5 * rs).exp();
    let b = A6 / (A7 * rs).exp() + A8 * rs.powf(A9) / (A10 * rs).exp();
    Ok(a * uod.powf(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dissolved_gas_thins_the_oil() {
        for kernel in KERNELS.iter().filter(|k| k.params == ["uod", "rs"]) {
            let lean = (kernel.eval)(&[20.0, 50.0]).unwrap();
            let rich = (kernel.eval)(&[20.0, 600.0]).unwrap();
            assert!(rich < lean, "{}: {lean} -> {rich}", kernel.id);
        }
    }

    #[test]
    fn beggs_robinson_reference_point() {
        // a = 10.715 * 200^-0.515, b = 5.44 * 250^-0.338
        let uob = beggs_robinson(&[10.0, 100.0]).unwrap();
        let expected = 10.715 * 200f64.powf(-0.515) * 10f64.powf(5.44 * 250f64.powf(-0.338));
        assert!((uob - expected).abs() < 1e-12);
    }

    #[test]
    fn khan_at_bubble_point_has_no_pressure_correction() {
        let at_pb = khan(&[500.0, 30.0, 0.8, 180.0, 2000.0, 2000.0]).unwrap();
        let below = khan(&[500.0, 30.0, 0.8, 180.0, 1500.0, 2000.0]).unwrap();
        assert!(at_pb > 0.0);
        assert!(below > at_pb);
    }
}
