//! Gas compressibility factor from temperature and pressure reduced by the
//! pseudocritical point.

use super::Kernel;
use crate::error::CorrelationResult;
use crate::solver::{NewtonConfig, newton_solve};

pub(super) const KERNELS: &[Kernel] = &[
    Kernel { id: "z_sarem", params: &["t", "p", "tsc", "psc"], eval: sarem },
    Kernel { id: "z_hall_yarborough", params: &["t", "p", "tsc", "psc"], eval: hall_yarborough },
    Kernel { id: "z_dranchuk_pr", params: &["t", "p", "tsc", "psc"], eval: dranchuk_pr },
    Kernel { id: "z_dranchuk_ak", params: &["t", "p", "tsc", "psc"], eval: dranchuk_ak },
    Kernel { id: "z_gopal", params: &["t", "p", "tsc", "psc"], eval: gopal },
    Kernel { id: "z_brill_beggs", params: &["t", "p", "tsc", "psc"], eval: brill_beggs },
    Kernel { id: "z_papay", params: &["t", "p", "tsc", "psc"], eval: papay },
];

/// `(tpr, ppr)` from `[t, p, tsc, psc]`.
fn reduced(id: &'static str, a: &[f64]) -> CorrelationResult<(f64, f64)> {
    let &[t, p, tsc, psc] = a else {
        return Err(super::arity_error(id, 4, a.len()));
    };
    Ok((t / tsc, p / psc))
}

/// Normalized Legendre polynomials P0..P5 on [-1, 1].
fn legendre(x: f64) -> [f64; 6] {
    let x2 = x * x;
    let x3 = x2 * x;
    [
        0.707_106_8,
        1.224_745 * x,
        0.790_569_5 * (3.0 * x2 - 1.0),
        0.935_414_5 * (5.0 * x3 - 3.0 * x),
        0.265_165 * (35.0 * x3 * x - 30.0 * x2 + 3.0),
        0.293_151 * (63.0 * x3 * x2 - 70.0 * x3 + 15.0 * x),
    ]
}

/// Row `i` multiplies `P_i(ppr)`, column `j` multiplies `P_j(tpr)`.
const SAREM: [[f64; 6]; 6] = [
    [2.143_350_4, 0.083_176_2, -0.021_467_0, -0.000_871_4, 0.004_284_6, -0.001_659_5],
    [0.331_235_2, -0.134_036_1, 0.066_881_0, -0.027_174_3, 0.008_851_2, -0.002_152],
    [0.105_728_7, -0.050_393_7, 0.005_092_5, 0.010_551_3, -0.007_318_2, 0.002_696_0],
    [0.052_184_0, 0.044_312_1, -0.019_329_4, 0.005_897_3, 0.001_536_7, -0.002_832_7],
    [0.019_704_0, -0.026_383_4, 0.019_262, -0.011_535_4, 0.004_291_0, -0.008_130_3],
    [0.005_309_6, 0.008_917_8, -0.010_894_8, 0.009_559_4, -0.006_011_4, 0.003_117_5],
];

fn sarem(a: &[f64]) -> CorrelationResult<f64> {
    let (tpr, ppr) = reduced("z_sarem", a)?;
    let px = legendre((2.0 * ppr - 15.0) / 14.8);
    let py = legendre((2.0 * tpr - 4.0) / 1.9);

    let mut z = 0.0;
    for (i, row) in SAREM.iter().enumerate() {
        for (j, coef) in row.iter().enumerate() {
            z += coef * px[i] * py[j];
        }
    }
    Ok(z)
}

/// Solves for the reduced density, then recovers z from it.
fn hall_yarborough(a: &[f64]) -> CorrelationResult<f64> {
    let (tpr, ppr) = reduced("z_hall_yarborough", a)?;
    let t = 1.0 / tpr;
    let t2 = t * t;
    let t3 = t2 * t;
    let a = 0.061_25 * t * (-1.2 * (1.0 - t) * (1.0 - t)).exp();
    let b = 14.76 * t - 9.76 * t2 + 4.58 * t3;
    let c = 90.7 * t - 242.2 * t2 + 42.4 * t3;
    let d = 2.18 + 2.82 * t;

    let config = NewtonConfig {
        step_tol: 1e-10,
        ..NewtonConfig::default()
    };
    let rho = newton_solve(
        "Hall-Yarborough reduced density",
        1e-5,
        |y| {
            let y2 = y * y;
            let y3 = y2 * y;
            let y4 = y3 * y;
            let f = -a * ppr + (y + y2 + y3 - y4) / (1.0 - y).powi(3) - b * y2 + c * y.powf(d);
            let df = (1.0 + 4.0 * y + 4.0 * y2 - 4.0 * y3 + y4) / (1.0 - y).powi(4) - 2.0 * b * y
                + c * d * y.powf(d - 1.0);
            (f, df)
        },
        &config,
    )?
    .x;

    Ok(a * ppr / rho)
}

fn dranchuk_config() -> NewtonConfig {
    NewtonConfig {
        step_tol: 1e-8,
        ..NewtonConfig::default()
    }
}

fn dranchuk_pr(a: &[f64]) -> CorrelationResult<f64> {
    const A1: f64 = 0.315_062_37;
    const A2: f64 = -1.046_709_9;
    const A3: f64 = -0.578_327_29;
    const A4: f64 = 0.535_307_71;
    const A5: f64 = -0.612_320_32;
    const A6: f64 = -0.104_888_13;
    const A7: f64 = 0.681_570_01;
    const A8: f64 = 0.684_465_49;

    let (tpr, ppr) = reduced("z_dranchuk_pr", a)?;
    let tpr3 = tpr * tpr * tpr;
    let c1 = A1 + A2 / tpr + A3 / tpr3;
    let c2 = A4 + A5 / tpr;
    let c5 = A5 * A6 / tpr;

    let z = newton_solve(
        "Dranchuk-Purvis-Robinson z-factor",
        0.6,
        |z| {
            let rho = 0.27 * ppr / (z * tpr);
            let rho2 = rho * rho;
            let rho5 = rho2 * rho2 * rho;
            let ar2 = A8 * rho2;
            let decay = (-ar2).exp();
            let f = z - (1.0 + c1 * rho + c2 * rho2 + c5 * rho5 + A7 * (1.0 + ar2) * (rho2 / tpr3) * decay);
            let df = 1.0 + c1 * rho / z + 2.0 * c2 * rho2 / z + 5.0 * c5 * rho5 / z
                + 2.0 * A7 * rho2 / (z * tpr3) * (1.0 + ar2 - ar2 * ar2) * decay;
            (f, df)
        },
        &dranchuk_config(),
    )?
    .x;
    Ok(z)
}

fn dranchuk_ak(a: &[f64]) -> CorrelationResult<f64> {
    const A1: f64 = 0.3265;
    const A2: f64 = -1.07;
    const A3: f64 = -0.5339;
    const A4: f64 = 0.015_69;
    const A5: f64 = -0.051_65;
    const A6: f64 = 0.5475;
    const A7: f64 = -0.7361;
    const A8: f64 = 0.1844;
    const A9: f64 = 0.1056;
    const A10: f64 = 0.6134;
    const A11: f64 = 0.721;

    let (tpr, ppr) = reduced("z_dranchuk_ak", a)?;
    let tpr2 = tpr * tpr;
    let tpr3 = tpr2 * tpr;
    let c1 = A1 + A2 / tpr + A3 / tpr3 + A4 / (tpr3 * tpr) + A5 / (tpr3 * tpr2);
    let c2 = A6 + A7 / tpr + A8 / tpr2;
    let c5 = A9 * (A7 / tpr + A8 / tpr2);

    let z = newton_solve(
        "Dranchuk-Abou-Kassem z-factor",
        0.6,
        |z| {
            let rho = 0.27 * ppr / (z * tpr);
            let rho2 = rho * rho;
            let rho5 = rho2 * rho2 * rho;
            let ar2 = A11 * rho2;
            let decay = (-ar2).exp();
            let f = z - (1.0 + c1 * rho + c2 * rho2 - c5 * rho5 + A10 * (1.0 + ar2) * (rho2 / tpr3) * decay);
            let df = 1.0 + c1 * rho / z + 2.0 * c2 * rho2 / z - 5.0 * c5 * rho5 / z
                + 2.0 * A10 * rho2 / (z * tpr3) * (1.0 + ar2 - ar2 * ar2) * decay;
            (f, df)
        },
        &dranchuk_config(),
    )?
    .x;
    Ok(z)
}

/// Piecewise linear fit in `ppr` over four temperature bands.
fn gopal(a: &[f64]) -> CorrelationResult<f64> {
    let (tpr, ppr) = reduced("z_gopal", a)?;

    // (slope tpr coef, slope const, intercept tpr coef, intercept const) per band
    let band = |rows: [[f64; 4]; 4]| {
        let [s1, s0, i1, i0] = if (1.05..=1.2).contains(&tpr) {
            rows[0]
        } else if tpr > 1.2 && tpr <= 1.4 {
            rows[1]
        } else if tpr > 1.4 && tpr <= 2.0 {
            rows[2]
        } else {
            rows[3]
        };
        ppr * (s1 * tpr + s0) + i1 * tpr + i0
    };

    let z = if (0.2..=1.2).contains(&ppr) {
        band([
            [1.6643, -2.2114, -0.3647, 1.4385],
            [0.0522, -0.8511, -0.0364, 1.0490],
            [0.1391, -0.2988, 0.0007, 0.9969],
            [0.0295, -0.0825, 0.0009, 0.9967],
        ])
    } else if ppr > 1.2 && ppr <= 2.8 {
        band([
            [-1.3570, 1.4942, 4.6315, -4.7009],
            [0.1717, -0.3232, 0.5869, 0.1229],
            [0.0984, -0.2053, 0.0621, 0.8580],
            [0.0211, -0.0527, 0.0127, 0.9549],
        ])
    } else if ppr > 2.8 && ppr <= 5.4 {
        band([
            [-0.3278, 0.4752, 1.8223, -1.9036],
            [-0.2521, 0.3871, 1.6087, -1.6635],
            [-0.0284, 0.0625, 0.4714, -0.0011],
            [0.0041, 0.0039, 0.0607, 0.7927],
        ])
    } else {
        ppr * (0.711 + 3.66 * tpr + 0.0039).powf(-1.4667) - 1.637 / (0.319 * tpr + 0.522) + 2.071
    };
    Ok(z)
}

fn brill_beggs(a: &[f64]) -> CorrelationResult<f64> {
    let (tpr, ppr) = reduced("z_brill_beggs", a)?;
    let a = 1.39 * (tpr - 0.92).sqrt() - 0.36 * tpr - 0.10;
    let b = (0.62 - 0.23 * tpr) * ppr
        + (0.066 / (tpr - 0.86) - 0.037) * ppr * ppr
        + 0.32 / 10f64.powf(9.0 * (tpr - 1.0)) * ppr.powi(6);
    let c = 0.132 - 0.32 * tpr.log10();
    let d = 10f64.powf(0.3106 - 0.49 * tpr + 0.1824 * tpr * tpr);

    // exp(b) overflows past this point and the middle term vanishes
    if b > 700.0 {
        Ok(a + c * ppr.powf(d))
    } else {
        Ok(a + (1.0 - a) / b.exp() + c * ppr.powf(d))
    }
}

fn papay(a: &[f64]) -> CorrelationResult<f64> {
    let (tpr, ppr) = reduced("z_papay", a)?;
    Ok(1.0 - 3.52 * ppr / 10f64.powf(0.9813 * tpr) + 0.274 * ppr * ppr / 10f64.powf(0.8157 * tpr))
}
