//! Oil formation volume factor (RB/STB), saturated and undersaturated.
//!
//! An undersaturated kernel takes the arguments of its saturated kernel
//! followed by `p`, `pb` and `co`, and scales the saturated value by
//! `exp(co * (pb - p))`.

use super::{Kernel, KernelFn, bubble_point};
use crate::error::{CorrelationError, CorrelationResult};
use pvt_core::{api_to_sg, sg_to_api};

pub(super) const KERNELS: &[Kernel] = &[
    Kernel { id: "bob_al_marhoun", params: &["yg", "yo", "rs", "t"], eval: bob_al_marhoun },
    Kernel { id: "bob_al_shammasi", params: &["yg", "yo", "rs", "t"], eval: bob_al_shammasi },
    Kernel { id: "bob_de_ghetto", params: &["yg", "api", "rs", "t", "tsep", "psep"], eval: bob_de_ghetto },
    Kernel { id: "bob_dindoruk_christman", params: &["yg", "api", "rs", "t"], eval: bob_dindoruk_christman },
    Kernel { id: "bob_dokla_osman", params: &["yg", "yo", "rs", "t"], eval: bob_dokla_osman },
    Kernel { id: "bob_glaso", params: &["yg", "yo", "rs", "t"], eval: bob_glaso },
    Kernel { id: "bob_hanafy", params: &["rs"], eval: bob_hanafy },
    Kernel { id: "bob_kartoatmodjo", params: &["yg", "yo", "rs", "t", "tsep", "psep"], eval: bob_kartoatmodjo },
    Kernel { id: "bob_manucci_rosales", params: &["rs", "t"], eval: bob_manucci_rosales },
    Kernel { id: "bob_millan_arcia", params: &["rsb", "p", "pb"], eval: bob_millan_arcia },
    Kernel { id: "bob_perez_ml", params: &["yg", "yo", "rsb", "t", "p", "pb"], eval: bob_perez_ml },
    Kernel { id: "bob_petrosky_farshad", params: &["yg", "yo", "rs", "t"], eval: bob_petrosky_farshad },
    Kernel { id: "bob_standing", params: &["yg", "yo", "rs", "t"], eval: bob_standing },
    Kernel { id: "bob_total_cfp", params: &["yg", "api", "rs", "t"], eval: bob_total_cfp },
    Kernel { id: "bob_vasquez_beggs_heavy", params: &["yg", "api", "rs", "t", "tsep", "psep"], eval: bob_vasquez_beggs_heavy },
    Kernel { id: "bob_vasquez_beggs_light", params: &["yg", "api", "rs", "t", "tsep", "psep"], eval: bob_vasquez_beggs_light },
    Kernel { id: "bob_velarde_mccain", params: &["yg", "yo", "rs", "t", "p"], eval: bob_velarde_mccain },
    Kernel { id: "boa_mccain", params: &["p", "pb", "bobp", "co"], eval: boa_mccain },
    Kernel { id: "boa_al_marhoun", params: &["yg", "yo", "rs", "t", "p", "pb", "co"], eval: boa_al_marhoun },
    Kernel { id: "boa_al_shammasi", params: &["yg", "yo", "rs", "t", "p", "pb", "co"], eval: boa_al_shammasi },
    Kernel { id: "boa_de_ghetto", params: &["yg", "api", "rs", "t", "tsep", "psep", "p", "pb", "co"], eval: boa_de_ghetto },
    Kernel { id: "boa_dindoruk_christman", params: &["yg", "api", "rs", "t", "p", "pb", "co"], eval: boa_dindoruk_christman },
    Kernel { id: "boa_dokla_osman", params: &["yg", "yo", "rs", "t", "p", "pb", "co"], eval: boa_dokla_osman },
    Kernel { id: "boa_glaso", params: &["yg", "yo", "rs", "t", "p", "pb", "co"], eval: boa_glaso },
    Kernel { id: "boa_hanafy", params: &["rs", "p", "pb", "co"], eval: boa_hanafy },
    Kernel {
        id: "boa_kartoatmodjo",
        params: &["yg", "yo", "rs", "t", "tsep", "psep", "p", "pb", "co"],
        eval: boa_kartoatmodjo,
    },
    Kernel { id: "boa_manucci_rosales", params: &["rs", "t", "p", "pb", "co"], eval: boa_manucci_rosales },
    Kernel { id: "boa_millan_arcia", params: &["rsb", "p", "pb", "co"], eval: boa_millan_arcia },
    Kernel { id: "boa_perez_ml", params: &["yg", "yo", "rsb", "t", "p", "pb", "co"], eval: boa_perez_ml },
    Kernel { id: "boa_petrosky_farshad", params: &["yg", "yo", "rs", "t", "p", "pb", "co"], eval: boa_petrosky_farshad },
    Kernel { id: "boa_standing", params: &["yg", "yo", "rs", "t", "p", "pb", "co"], eval: boa_standing },
    Kernel { id: "boa_total_cfp", params: &["yg", "api", "rs", "t", "p", "pb", "co"], eval: boa_total_cfp },
    Kernel {
        id: "boa_vasquez_beggs_heavy",
        params: &["yg", "api", "rs", "t", "tsep", "psep", "p", "pb", "co"],
        eval: boa_vasquez_beggs_heavy,
    },
    Kernel {
        id: "boa_vasquez_beggs_light",
        params: &["yg", "api", "rs", "t", "tsep", "psep", "p", "pb", "co"],
        eval: boa_vasquez_beggs_light,
    },
    Kernel { id: "boa_velarde_mccain", params: &["yg", "yo", "rs", "t", "p", "pb", "co"], eval: boa_velarde_mccain },
];

/// Temperature in Rankine.
fn bob_al_marhoun(a: &[f64]) -> CorrelationResult<f64> {
    args!("bob_al_marhoun", a, [yg, yo, rs, t]);
    let f = rs.powf(0.742_39) * yg.powf(0.323_294) * yo.powf(-1.202_04);
    Ok(0.497_069 + 0.862_963e-3 * t + 0.182_594e-2 * f + 0.318_099e-5 * f * f)
}

fn bob_al_shammasi(a: &[f64]) -> CorrelationResult<f64> {
    args!("bob_al_shammasi", a, [yg, yo, rs, t]);
    Ok(1.0 + 5.53e-7 * rs * (t - 60.0)
        + 0.000_181 * rs / yo
        + 0.000_449 * (t - 60.0) / yo
        + 0.000_206 * rs * yg / yo)
}

fn bob_de_ghetto(a: &[f64]) -> CorrelationResult<f64> {
    args!("bob_de_ghetto", a, [yg, api, rs, t, tsep, psep]);
    Ok(vasquez_beggs(VASQUEZ_BEGGS_HEAVY, yg, api, rs, t, tsep, psep))
}

/// Temperature in Rankine.
fn bob_dokla_osman(a: &[f64]) -> CorrelationResult<f64> {
    args!("bob_dokla_osman", a, [yg, yo, rs, t]);
    let f = rs.powf(0.773_572) * yg.powf(0.404_02) * yo.powf(-0.882_605);
    Ok(0.043_193_5 + 0.156_667e-2 * t + 0.139_775e-2 * f + 0.380_525e-5 * f * f)
}

fn bob_glaso(a: &[f64]) -> CorrelationResult<f64> {
    args!("bob_glaso", a, [yg, yo, rs, t]);
    let bob_star = rs * (yg / yo).powf(0.526) + 0.968 * t;
    let log_b = bob_star.log10();
    let exponent = -6.585_11 + 2.913_29 * log_b - 0.276_83 * log_b * log_b;
    Ok(1.0 + 10f64.powf(exponent))
}

fn bob_kartoatmodjo(a: &[f64]) -> CorrelationResult<f64> {
    args!("bob_kartoatmodjo", a, [yg, yo, rs, t, tsep, psep]);
    let ygcorr = bubble_point::kartoatmodjo_gas_gravity(yg, sg_to_api(yo), tsep, psep);
    let f = rs.powf(0.755) * ygcorr.powf(0.25) * yo.powf(-1.5) + 0.45 * t;
    Ok(0.984_96 + 1e-4 * f.powf(1.5))
}

fn bob_petrosky_farshad(a: &[f64]) -> CorrelationResult<f64> {
    args!("bob_petrosky_farshad", a, [yg, yo, rs, t]);
    let f = rs.powf(0.3738) * yg.powf(0.2914) / yo.powf(0.6265) + 0.246_26 * t.powf(0.5371);
    Ok(1.0113 + 7.2046e-5 * f.powf(3.0936))
}

fn bob_standing(a: &[f64]) -> CorrelationResult<f64> {
    args!("bob_standing", a, [yg, yo, rs, t]);
    Ok(0.9759 + 12e-5 * (rs * (yg / yo).sqrt() + 1.25 * t).powf(1.2))
}

fn bob_total_cfp(a: &[f64]) -> CorrelationResult<f64> {
    args!("bob_total_cfp", a, [yg, api, rs, t]);
    let x = (t - 60.0) * api / yg;
    Ok(1.022 + 4.857e-4 * rs - 2.009e-6 * x + 17.569e-9 * rs * x)
}

fn bob_dindoruk_christman(a: &[f64]) -> CorrelationResult<f64> {
    args!("bob_dindoruk_christman", a, [yg, api, rs, t]);
    const A: [f64; 14] = [
        2.510_755, -4.852_538, 11.835, 136_542.8, 2.252_88, 10.0719, 0.445_084_9, 5.352_624,
        -0.630_905_2, 0.900_074_9, 0.987_176_6, 7.865_146e-4, 2.689_173e-6, 1.100_001e-5,
    ];
    let yo = api_to_sg(api);
    let dt = t - 60.0;
    let num = (rs.powf(A[0]) * yg.powf(A[1]) / yo.powf(A[2]) + A[3] * dt.powf(A[4]) + A[5] * rs)
        .powf(A[6]);
    let den = A[7] + 2.0 * rs.powf(A[8]) / yg.powf(A[9]) * dt;
    let x = num / (den * den);
    Ok(A[10] + A[11] * x + A[12] * x * x + A[13] * dt * api / yg)
}

fn bob_hanafy(a: &[f64]) -> CorrelationResult<f64> {
    args!("bob_hanafy", a, [rs]);
    Ok(1.079 + 0.0006 * rs)
}

/// Standing-type bubble point factor carried below `pb` with the
/// Ezekwe-Querin-Humphrey pressure term.
fn bob_perez_ml(a: &[f64]) -> CorrelationResult<f64> {
    args!("bob_perez_ml", a, [yg, yo, rsb, t, p, pb]);
    let bobp = 0.974_322 + 4.350_48e-4 * (rsb * (yg / yo).sqrt() + 1.25 * t);
    Ok(bobp * (1.0 - (8.801 + 0.1547 * t) * 1e-3 * (1.0 - p / pb)))
}

/// Linear in `rsb` at the bubble point; below it the dissolved gas follows
/// the inverse of the Millán-Arcia bubble point exponent.
///
/// The constants are fitted to the published development ranges, the
/// paper's own coefficients not being available.
fn bob_millan_arcia(a: &[f64]) -> CorrelationResult<f64> {
    args!("bob_millan_arcia", a, [rsb, p, pb]);
    let bobp = 0.9835 + 5.76e-4 * rsb;
    Ok(1.0 + (bobp - 1.0) * (p / pb).powf(1.0 / (0.8303 * 0.9433)))
}

/// Standing functional form; constants fitted to the published development
/// ranges, the paper's own coefficients not being available.
fn bob_manucci_rosales(a: &[f64]) -> CorrelationResult<f64> {
    args!("bob_manucci_rosales", a, [rs, t]);
    Ok(0.917 + 1.046e-4 * (rs + 1.25 * t).powf(1.2))
}

/// Material balance on the McCain oil density. `yg` is the separator gas
/// gravity; the pseudo-liquid density is found by successive substitution
/// on the apparent gas density of Velarde, Blasingame & McCain.
fn bob_velarde_mccain(a: &[f64]) -> CorrelationResult<f64> {
    args!("bob_velarde_mccain", a, [yg, yo, rs, t, p]);
    const A: [f64; 6] = [-49.8930, 85.0149, -3.703_73, 0.047_981_8, 2.989_14, -0.035_688_8];
    let apparent = |rho: f64| {
        A[0] + A[1] * yg + A[2] * yg * rho + A[3] * yg * rho * rho + A[4] * rho + A[5] * rho * rho
    };

    let mut rho_po = 52.8 - 0.01 * rs;
    let mut converged = false;
    for _ in 0..100 {
        let next = (rs * yg + 4600.0 * yo) / (73.71 + rs * yg / apparent(rho_po));
        if !next.is_finite() {
            break;
        }
        let done = (next - rho_po).abs() <= 1e-10;
        rho_po = next;
        if done {
            converged = true;
            break;
        }
    }
    if !converged {
        return Err(CorrelationError::ConvergenceFailure {
            what: "bob_velarde_mccain pseudo-liquid density".into(),
            iterations: 100,
        });
    }

    let kp = p / 1000.0;
    let drho_p = (0.167 + 16.181 * 10f64.powf(-0.0425 * rho_po)) * kp
        - 0.01 * (0.299 + 263.0 * 10f64.powf(-0.0603 * rho_po)) * kp * kp;
    let rho_bs = rho_po + drho_p;
    let dt = t - 60.0;
    let drho_t = (0.003_02 + 1.505 * rho_bs.powf(-0.951)) * dt.powf(0.938)
        - (0.0216 - 0.0233 * 10f64.powf(-0.0161 * rho_bs)) * dt.powf(0.475);
    Ok((62.427_96 * yo + 0.0136 * rs * yg) / (rho_bs - drho_t))
}

/// Vasquez-Beggs coefficients `C1`, `C2`, `C3` for API <= 30.
const VASQUEZ_BEGGS_HEAVY: [f64; 3] = [4.677e-4, 1.751e-5, -1.811e-8];
/// Vasquez-Beggs coefficients `C1`, `C2`, `C3` for API > 30.
const VASQUEZ_BEGGS_LIGHT: [f64; 3] = [4.670e-4, 1.100e-5, 1.337e-9];

fn vasquez_beggs(c: [f64; 3], yg: f64, api: f64, rs: f64, t: f64, tsep: f64, psep: f64) -> f64 {
    let ygs = bubble_point::vasquez_beggs_gas_gravity(yg, api, tsep, psep);
    let x = (t - 60.0) * api / ygs;
    let [c1, c2, c3] = c;
    1.0 + c1 * rs + c2 * x + c3 * rs * x
}

fn bob_vasquez_beggs_heavy(a: &[f64]) -> CorrelationResult<f64> {
    args!("bob_vasquez_beggs_heavy", a, [yg, api, rs, t, tsep, psep]);
    Ok(vasquez_beggs(VASQUEZ_BEGGS_HEAVY, yg, api, rs, t, tsep, psep))
}

fn bob_vasquez_beggs_light(a: &[f64]) -> CorrelationResult<f64> {
    args!("bob_vasquez_beggs_light", a, [yg, api, rs, t, tsep, psep]);
    Ok(vasquez_beggs(VASQUEZ_BEGGS_LIGHT, yg, api, rs, t, tsep, psep))
}

fn compress(bobp: f64, co: f64, p: f64, pb: f64) -> f64 {
    bobp * (co * (pb - p)).exp()
}

fn boa_mccain(a: &[f64]) -> CorrelationResult<f64> {
    args!("boa_mccain", a, [p, pb, bobp, co]);
    Ok(compress(bobp, co, p, pb))
}

/// Evaluate `saturated` on the leading arguments, then compress from `pb` to `p`.
fn undersaturated(id: &'static str, saturated: KernelFn, a: &[f64]) -> CorrelationResult<f64> {
    let [head @ .., p, pb, co] = a else {
        return Err(super::arity_error(id, 3, a.len()));
    };
    Ok(compress(saturated(head)?, *co, *p, *pb))
}

fn boa_al_marhoun(a: &[f64]) -> CorrelationResult<f64> {
    undersaturated("boa_al_marhoun", bob_al_marhoun, a)
}

fn boa_al_shammasi(a: &[f64]) -> CorrelationResult<f64> {
    undersaturated("boa_al_shammasi", bob_al_shammasi, a)
}

fn boa_de_ghetto(a: &[f64]) -> CorrelationResult<f64> {
    undersaturated("boa_de_ghetto", bob_de_ghetto, a)
}

fn boa_dokla_osman(a: &[f64]) -> CorrelationResult<f64> {
    undersaturated("boa_dokla_osman", bob_dokla_osman, a)
}

fn boa_glaso(a: &[f64]) -> CorrelationResult<f64> {
    undersaturated("boa_glaso", bob_glaso, a)
}

fn boa_kartoatmodjo(a: &[f64]) -> CorrelationResult<f64> {
    undersaturated("boa_kartoatmodjo", bob_kartoatmodjo, a)
}

fn boa_petrosky_farshad(a: &[f64]) -> CorrelationResult<f64> {
    undersaturated("boa_petrosky_farshad", bob_petrosky_farshad, a)
}

fn boa_standing(a: &[f64]) -> CorrelationResult<f64> {
    undersaturated("boa_standing", bob_standing, a)
}

fn boa_total_cfp(a: &[f64]) -> CorrelationResult<f64> {
    undersaturated("boa_total_cfp", bob_total_cfp, a)
}

fn boa_vasquez_beggs_heavy(a: &[f64]) -> CorrelationResult<f64> {
    undersaturated("boa_vasquez_beggs_heavy", bob_vasquez_beggs_heavy, a)
}

fn boa_vasquez_beggs_light(a: &[f64]) -> CorrelationResult<f64> {
    undersaturated("boa_vasquez_beggs_light", bob_vasquez_beggs_light, a)
}

fn boa_dindoruk_christman(a: &[f64]) -> CorrelationResult<f64> {
    undersaturated("boa_dindoruk_christman", bob_dindoruk_christman, a)
}

fn boa_hanafy(a: &[f64]) -> CorrelationResult<f64> {
    undersaturated("boa_hanafy", bob_hanafy, a)
}

fn boa_manucci_rosales(a: &[f64]) -> CorrelationResult<f64> {
    undersaturated("boa_manucci_rosales", bob_manucci_rosales, a)
}

fn boa_millan_arcia(a: &[f64]) -> CorrelationResult<f64> {
    args!("boa_millan_arcia", a, [rsb, p, pb, co]);
    Ok(compress(bob_millan_arcia(&[rsb, pb, pb])?, co, p, pb))
}

fn boa_perez_ml(a: &[f64]) -> CorrelationResult<f64> {
    args!("boa_perez_ml", a, [yg, yo, rsb, t, p, pb, co]);
    Ok(compress(bob_perez_ml(&[yg, yo, rsb, t, pb, pb])?, co, p, pb))
}

fn boa_velarde_mccain(a: &[f64]) -> CorrelationResult<f64> {
    args!("boa_velarde_mccain", a, [yg, yo, rs, t, p, pb, co]);
    Ok(compress(bob_velarde_mccain(&[yg, yo, rs, t, pb])?, co, p, pb))
}
