//! Formation water: density, viscosity, gas solubility, volume factor and
//! the Spivey-McCain-North brine model those are built from.
//!
//! The Spivey kernels take temperature in Celsius, pressure in MPa and
//! salinity either as NaCl molality or as weight percent of dissolved salt.
//! The field kernels take Fahrenheit, psia and weight percent.

use super::Kernel;
use crate::error::{CorrelationError, CorrelationResult};

pub(super) const KERNELS: &[Kernel] = &[
    Kernel { id: "pv_spivey_mn", params: &["t"], eval: pv_spivey_mn },
    Kernel { id: "mw_spivey_mn", params: &["t", "p", "pv", "nacl_concentration"], eval: mw_spivey_mn },
    Kernel { id: "cgfw_spivey_mn", params: &["t", "p", "nacl_concentration"], eval: cgfw_spivey_mn },
    Kernel { id: "pw_spivey_mn", params: &["t", "p", "s"], eval: pw_spivey_mn },
    Kernel { id: "pw_spivey_mn_gas_free", params: &["t", "p", "s"], eval: pw_spivey_mn_gas_free },
    Kernel { id: "pw_mccain", params: &["s", "bw"], eval: pw_mccain },
    Kernel { id: "uw_mao_duan", params: &["t", "p", "s"], eval: uw_mao_duan },
    Kernel { id: "uw_van_wingen", params: &["t"], eval: uw_van_wingen },
    Kernel { id: "uw_matthews_russel", params: &["t", "p", "s"], eval: uw_matthews_russel },
    Kernel { id: "uw_mccain", params: &["t", "p", "s"], eval: uw_mccain },
    Kernel { id: "uw_mccoy", params: &["t", "s"], eval: uw_mccoy },
    Kernel { id: "rsw_spivey_mn", params: &["t", "p", "nacl_concentration"], eval: rsw_spivey_mn },
    Kernel { id: "rsw_culberson_mcketta", params: &["t", "p", "s"], eval: rsw_culberson_mcketta },
    Kernel { id: "rsw_mccoy", params: &["t", "p", "s"], eval: rsw_mccoy },
    Kernel { id: "bw_spivey_mn", params: &["t", "p", "nacl_concentration"], eval: bw_spivey_mn },
    Kernel { id: "bwb_mccain", params: &["t", "p"], eval: bwb_mccain },
    Kernel { id: "bwb_mccoy", params: &["t", "p", "s"], eval: bwb_mccoy },
    Kernel { id: "bwa_mccain", params: &["p", "pb", "bwbp", "cwa"], eval: bwa_mccain },
];

const KELVIN_OFFSET: f64 = 273.15;
/// g/mol
const NACL_MOLAR_MASS: f64 = 58.4428;
/// g/mol
const METHANE_MOLAR_MASS: f64 = 16.043;
/// MPa cm³ / (gmol K)
const GAS_CONSTANT: f64 = 8.314_467;
/// 60 °F and 14.7 psia
const STANDARD_T_C: f64 = 15.555_556;
const STANDARD_P_MPA: f64 = 0.101_352;

/// Weight percent of dissolved NaCl to molality.
fn molality(s: f64) -> f64 {
    let w = s / 100.0;
    1000.0 * w / (NACL_MOLAR_MASS * (1.0 - w))
}

/// IAPWS-95 vapor pressure of pure water in MPa, `tk` in Kelvin.
fn vapor_pressure(tk: f64) -> f64 {
    const TC: f64 = 647.096;
    const PC: f64 = 22.064;
    let v = 1.0 - tk / TC;
    let sum = -7.859_517_83 * v + 1.844_082_59 * v.powf(1.5) - 11.786_649_7 * v.powi(3)
        + 22.680_741_1 * v.powf(3.5)
        - 15.961_871_9 * v.powi(4)
        + 1.801_225_02 * v.powf(7.5);
    (TC / tk * sum + PC.ln()).exp()
}

/// Rejects pressures at or below the vapor pressure, where `ln(p - pv)` is undefined.
fn above_vapor_pressure(equation: &str, p: f64, pv: f64) -> CorrelationResult<f64> {
    if p <= pv {
        return Err(CorrelationError::OutsideDomain {
            equation: equation.to_string(),
            reason: format!("pressure {p} MPa is not above the vapor pressure {pv} MPa"),
        });
    }
    Ok((p - pv).ln())
}

/// Pure water density at the 70 MPa reference pressure and its
/// compressibility coefficients `(rho_ref, e, f)`.
fn pure_water(t100: f64) -> (f64, f64, f64) {
    let t2 = t100 * t100;
    let rho = (-0.127_213 * t2 + 0.645_486 * t100 + 1.032_65) / (-0.070_291 * t2 + 0.639_589 * t100 + 1.0);
    let e = (4.221 * t2 - 3.478 * t100 + 6.221) / (0.5182 * t2 - 0.4405 * t100 + 1.0);
    let f = (-11.403 * t2 + 29.932 * t100 + 27.952) / (0.206_84 * t2 + 0.3768 * t100 + 1.0);
    (rho, e, f)
}

/// Carry a 70 MPa reference density to `p` through the `e`, `f` compressibility fit.
fn at_pressure(rho_ref: f64, e: f64, f: f64, p: f64) -> f64 {
    let i_ref = (e + f).abs().ln() / e;
    let i = (e * p / 70.0 + f).abs().ln() / e;
    rho_ref * (i - i_ref).exp()
}

/// Density of methane-free brine in g/cm³.
fn gas_free_brine_density(t: f64, p: f64, m: f64) -> f64 {
    let t100 = t / 100.0;
    let t2 = t100 * t100;
    let (rho_pw, e_pw, f_pw) = pure_water(t100);

    let d1 = -1.1149e-4 * t2 + 1.7105e-4 * t100 - 4.3766e-4;
    let d2 = (-8.878e-4 * t2 - 1.388e-4 * t100 - 2.963_18e-3) / (0.511_03 * t100 + 1.0);
    let d3 = (2.1466e-3 * t2 + 1.2427e-2 * t100 + 4.2648e-2) / (-8.1009e-2 * t2 + 0.525_417 * t100 + 1.0);
    let d4 = 2.356e-4 * t2 - 3.636e-4 * t100 - 2.278e-4;
    let rho_ref = rho_pw + d1 * m * m + d2 * m.powf(1.5) + d3 * m + d4 * m.sqrt();

    let f1 = (-0.617 * t2 - 0.747 * t100 - 0.4339) / (10.26 * t100 + 1.0);
    let f2 = (9.917 * t100 + 5.1128) / (3.892 * t100 + 1.0);
    let f3 = 0.0365 * t2 - 0.0369 * t100;
    let e = e_pw + 0.1249 * m;
    let f = f_pw + f1 * m.powf(1.5) + f2 * m + f3 * m.sqrt();
    at_pressure(rho_ref, e, f, p)
}

/// Methane molality in brine and `dc1/dp`, from the 2011 McCain-Spivey-Lenn fit.
fn methane_in_brine(t: f64, p: f64, pv: f64, m: f64, equation: &str) -> CorrelationResult<(f64, f64)> {
    let t100 = t / 100.0;
    let t2 = t100 * t100;
    let tk = t + KELVIN_OFFSET;
    let ln_dp = above_vapor_pressure(equation, p, pv)?;

    let a = -0.007_751 * t2 + 0.013_624 * t100 - 0.0781;
    let b = 0.011_93 * t2 + 0.0851 * t100 + 1.027_66;
    let c = (1.8316 * t2 - 7.8119 * t100 - 3.6231) / (-0.107_33 * t2 + 1.091_92 * t100 + 1.0);
    let pure = (a * ln_dp * ln_dp + b * ln_dp + c).exp();

    let c1 = 7.015e-2 + 1.074e-4 * tk + 2.260e-1 * p / tk - 1.227e-3 * p * p / tk;
    let c2 = -6.28e-3;
    let dc1_dp = 2.260e-1 / tk - 2.0 * 1.227e-3 * p / tk;
    Ok((pure * (-2.0 * c1 * m - c2 * m * m).exp(), dc1_dp))
}

/// Partial molar volume of methane in brine, cm³/gmol.
fn methane_partial_volume(t: f64, m: f64, dc1_dp: f64) -> f64 {
    let tk = t + KELVIN_OFFSET;
    let c3 = 7.698_589e-2 - 5.025_333_1e-5 * tk - 30.092_013 / tk + 4.846_850_2e3 / (tk * tk);
    GAS_CONSTANT * tk * (c3 + 2.0 * m * dc1_dp)
}

/// Temperature in Kelvin; MPa.
fn pv_spivey_mn(a: &[f64]) -> CorrelationResult<f64> {
    args!("pv_spivey_mn", a, [tk]);
    Ok(vapor_pressure(tk))
}

fn mw_spivey_mn(a: &[f64]) -> CorrelationResult<f64> {
    args!("mw_spivey_mn", a, [t, p, pv, m]);
    Ok(methane_in_brine(t, p, pv, m, "mw_spivey_mn")?.0)
}

/// Compressibility of gas-free brine, MPa⁻¹.
fn cgfw_spivey_mn(a: &[f64]) -> CorrelationResult<f64> {
    args!("cgfw_spivey_mn", a, [t, p, m]);
    let t100 = t / 100.0;
    let t2 = t100 * t100;
    let (_, e_pw, f_pw) = pure_water(t100);

    let f1 = (-1.409 * t2 - 0.361 * t100 - 0.2532) / (9.216 * t100 + 1.0);
    let f2 = (5.614 * t100 + 4.6782) / (-0.307 * t2 + 2.6069 * t100 + 1.0);
    let f3 = -0.1127 * t2 + 0.2047 * t100 - 0.0452;
    let e = e_pw + 0.1353 * m;
    let f = f_pw + f1 * m.powf(1.5) + f2 * m + f3 * m.sqrt();
    Ok(1.0 / (70.0 * (e * p / 70.0 + f)))
}

/// Brine with dissolved methane, from the 2004 Spivey-McCain-North fits.
fn pw_spivey_mn(a: &[f64]) -> CorrelationResult<f64> {
    args!("pw_spivey_mn", a, [t, p, s]);
    let m = molality(s);
    let t100 = t / 100.0;
    let t2 = t100 * t100;
    let tk = t + KELVIN_OFFSET;
    let ln_dp = above_vapor_pressure("pw_spivey_mn", p, vapor_pressure(tk))?;

    let a = -0.004_462 * t100 - 0.067_63;
    let b = -0.036_02 * t2 + 0.189_17 * t100 + 0.972_42;
    let c = (0.6855 * t2 - 3.1992 * t100 - 3.7968) / (0.077_11 * t2 + 0.2229 * t100 + 1.0);
    let methane_pure = (a * ln_dp * ln_dp + b * ln_dp + c).exp();

    let c1 = -0.808_98 + 1.0827e-3 * tk + 183.85 / tk + 3.924e-4 * p - 1.97e-6 * p * p;
    let c2 = -3.89e-3;
    let methane = methane_pure * (-2.0 * c1 * m - c2 * m * m).exp();
    let dc1_dp = 3.924e-4 - 2.0 * 1.97e-6 * p;

    let brine_mass = 1000.0 + m * NACL_MOLAR_MASS;
    let volume = brine_mass / gas_free_brine_density(t, p, m)
        + methane * methane_partial_volume(t, m, dc1_dp);
    Ok((brine_mass + methane * METHANE_MOLAR_MASS) / volume)
}

fn pw_spivey_mn_gas_free(a: &[f64]) -> CorrelationResult<f64> {
    args!("pw_spivey_mn_gas_free", a, [t, p, s]);
    Ok(gas_free_brine_density(t, p, molality(s)))
}

/// Stock tank brine density carried to reservoir conditions by `bw`; lb/ft³.
fn pw_mccain(a: &[f64]) -> CorrelationResult<f64> {
    args!("pw_mccain", a, [s, bw]);
    Ok((62.368 + 0.438_603 * s + 1.600_74e-3 * s * s) / bw)
}

/// Pa·s.
fn uw_mao_duan(a: &[f64]) -> CorrelationResult<f64> {
    args!("uw_mao_duan", a, [t, p, s]);
    let (rho_ref, e, f) = pure_water(t / 100.0);
    let rho = at_pressure(rho_ref, e, f, p);
    let tk = t + KELVIN_OFFSET;
    let tk2 = tk * tk;

    let pure = ((0.288_531_70e7 / tk2 - 0.110_725_77e5 / tk - 0.908_340_95e1 + 0.309_256_51e-1 * tk
        - 0.274_071_00e-4 * tk2)
        + rho
            * (-0.192_838_51e7 / tk2 + 0.562_160_46e4 / tk + 0.138_272_50e2 - 0.476_095_23e-1 * tk
                + 0.355_450_41e-4 * tk2))
        .exp();

    let a = -0.213_192_13 + 0.136_515_89e-2 * tk - 0.121_917_56e-5 * tk2;
    let b = 0.691_619_45e-1 - 0.272_922_63e-3 * tk + 0.208_524_48e-6 * tk2;
    let c = -0.259_888_55e-2 + 0.779_892_27e-5 * tk;
    let m = molality(s);
    Ok(pure * (a * m + b * m * m + c * m * m * m).exp())
}

fn uw_van_wingen(a: &[f64]) -> CorrelationResult<f64> {
    args!("uw_van_wingen", a, [t]);
    Ok((1.003 - 1.479e-2 * t + 1.982e-5 * t * t).exp())
}

fn uw_matthews_russel(a: &[f64]) -> CorrelationResult<f64> {
    args!("uw_matthews_russel", a, [t, p, s]);
    let a = -0.045_18 + 0.009_313 * s - 0.000_393 * s * s;
    let b = 70.634 + 0.095_76 * s * s;
    Ok((a + b / t) * (1.0 + 3.5e-12 * p * p * (t - 40.0)))
}

fn uw_mccain(a: &[f64]) -> CorrelationResult<f64> {
    args!("uw_mccain", a, [t, p, s]);
    let (s2, s3) = (s * s, s * s * s);
    let a = 109.574 - 8.405_64 * s + 0.313_314 * s2 + 8.722_13e-3 * s3;
    let b = -1.121_66 + 2.639_51e-2 * s - 6.794_61e-4 * s2 - 5.471_19e-5 * s3 + 1.555_86e-6 * s3 * s;
    Ok(a * t.powf(b) * (0.9994 + 4.0295e-5 * p + 3.1062e-9 * p * p))
}

fn uw_mccoy(a: &[f64]) -> CorrelationResult<f64> {
    args!("uw_mccoy", a, [t, s]);
    let kelvin = t / 1.8 + 255.37;
    let pure = 0.024_14 * 10f64.powf(247.8 / (kelvin - 140.0));
    Ok(pure
        * (1.0 - 1.87e-3 * s.sqrt() + 2.18e-4 * s.powf(2.5)
            + (t.sqrt() - 1.35e-2 * t) * (2.76e-3 * s - 3.44e-4 * s.powf(1.5))))
}

/// Sm³/Sm³.
fn rsw_spivey_mn(a: &[f64]) -> CorrelationResult<f64> {
    args!("rsw_spivey_mn", a, [t, p, m]);
    let pv = vapor_pressure(t + KELVIN_OFFSET);
    let (methane, _) = methane_in_brine(t, p, pv, m, "rsw_spivey_mn")?;
    // Ideal gas molar volume at standard conditions, cm³/gmol
    let molar_volume = GAS_CONSTANT * (STANDARD_T_C + KELVIN_OFFSET) / STANDARD_P_MPA;
    let brine_volume = (1000.0 + m * NACL_MOLAR_MASS) / gas_free_brine_density(STANDARD_T_C, STANDARD_P_MPA, m);
    Ok(methane * molar_volume / brine_volume)
}

fn rsw_culberson_mcketta(a: &[f64]) -> CorrelationResult<f64> {
    args!("rsw_culberson_mcketta", a, [t, p, s]);
    let (t2, t3) = (t * t, t * t * t);
    let a = 8.158_39 - 6.122_65e-2 * t + 1.916_63e-4 * t2 - 2.1654e-7 * t3;
    let b = 1.010_21e-2 - 7.442_41e-5 * t + 3.055_53e-7 * t2 - 2.948_83e-10 * t3;
    let c = (-9.025_05 + 0.130_237 * t - 8.534_25e-4 * t2 + 2.341_22e-6 * t3 - 2.370_49e-9 * t3 * t) * 1e-7;
    let pure = a + b * p + c * p * p;
    Ok(pure * 10f64.powf(-0.084_065_5 * s * t.powf(-0.285_854)))
}

fn rsw_mccoy(a: &[f64]) -> CorrelationResult<f64> {
    args!("rsw_mccoy", a, [t, p, s]);
    let a = 2.12 + 3.45e-3 * t - 3.59e-5 * t * t;
    let b = 0.0107 - 5.26e-5 * t + 1.48e-7 * t * t;
    let c = -8.75e-7 + 3.9e-9 * t - 1.02e-11 * t * t;
    Ok((a + b * p + c * p * p) * (1.0 - (0.0753 - 1.73e-4 * t) * s))
}

/// Reservoir volume of brine with its dissolved methane over the stock tank
/// volume of the same brine once the methane is gone.
fn bw_spivey_mn(a: &[f64]) -> CorrelationResult<f64> {
    args!("bw_spivey_mn", a, [t, p, m]);
    let pv = vapor_pressure(t + KELVIN_OFFSET);
    let (methane, dc1_dp) = methane_in_brine(t, p, pv, m, "bw_spivey_mn")?;
    let brine_mass = 1000.0 + m * NACL_MOLAR_MASS;
    let reservoir = brine_mass / gas_free_brine_density(t, p, m) + methane * methane_partial_volume(t, m, dc1_dp);
    let stock_tank = brine_mass / gas_free_brine_density(STANDARD_T_C, STANDARD_P_MPA, m);
    Ok(reservoir / stock_tank)
}

fn bwb_mccain(a: &[f64]) -> CorrelationResult<f64> {
    args!("bwb_mccain", a, [t, p]);
    let dv_t = -1.0001e-2 + 1.333_91e-4 * t + 5.506_54e-7 * t * t;
    let dv_p = -1.953_01e-9 * p * t - 1.728_34e-13 * p * p * t - 3.589_22e-7 * p - 2.253_41e-10 * p * p;
    Ok((1.0 + dv_p) * (1.0 + dv_t))
}

fn bwb_mccoy(a: &[f64]) -> CorrelationResult<f64> {
    args!("bwb_mccoy", a, [t, p, s]);
    let a = 0.9911 + 6.35e-5 * t + 8.5e-7 * t * t;
    let b = -1.093e-6 - 3.497e-9 * t + 4.57e-12 * t * t;
    let c = -5e-11 + 6.429e-13 * t - 1.43e-15 * t * t;
    let pure = a + b * p + c * p * p;
    let dt = t - 60.0;
    Ok(pure * (1.0 + s * (5.1e-8 * p + (5.47e-6 - 1.95e-10 * p) * dt - (3.23e-8 - 8.5e-13 * p * dt * dt))))
}

fn bwa_mccain(a: &[f64]) -> CorrelationResult<f64> {
    args!("bwa_mccain", a, [p, pb, bwbp, cwa]);
    Ok(bwbp * (cwa * (pb - p)).exp())
}
